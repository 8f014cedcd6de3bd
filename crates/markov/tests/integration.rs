//! Integration tests: full generation runs over the bundled corpus files.
//!
//! Expected outputs were recorded from known-good runs with the same corpus,
//! n-gram size, budget, seed and PRNG seed.

use std::path::{Path, PathBuf};

use markov::{
    CharConfig, CharGenerator, StopReason, WordConfig, WordGenerator, XorShift32, load_corpus,
};

/// Path to the corpus directory (bundled in the repo).
fn data_dir() -> PathBuf {
    let manifest = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest.join("../../data")
}

fn corpus(name: &str) -> Vec<u8> {
    load_corpus(&data_dir().join(name)).expect("failed to load corpus")
}

fn chars(file: &str, order: usize, max_output: u32, seed: &str, rng_seed: u32) -> String {
    let corpus = corpus(file);
    let config = CharConfig {
        order,
        ..CharConfig::default()
    };
    let mut generator = CharGenerator::new(&corpus, config, XorShift32::new(rng_seed)).unwrap();
    let out = generator.generate(seed, max_output);
    String::from_utf8(out.text().to_vec()).unwrap()
}

fn words(file: &str, order: usize, max_words: u32, seed: &str, rng_seed: u32) -> String {
    let corpus = corpus(file);
    let config = WordConfig {
        order,
        ..WordConfig::default()
    };
    let mut generator = WordGenerator::new(&corpus, config, XorShift32::new(rng_seed)).unwrap();
    let out = generator.generate(seed, max_words);
    String::from_utf8(out.text().to_vec()).unwrap()
}

// ---------------------------------------------------------------------------
// Character model
// ---------------------------------------------------------------------------

#[test]
fn chars_random_seed_on_cat() {
    assert_eq!(
        chars("cat.txt", 4, 60, "", 31337),
        "the cat sat on the mat the mat the cat sat on the mat the cat sa"
    );
}

#[test]
fn chars_unseen_seed_stops_immediately() {
    assert_eq!(chars("cat.txt", 3, 10, "xyz", 5), "xyz");
}

#[test]
fn chars_seeded_on_fox_crosses_lines() {
    assert_eq!(
        chars("fox.txt", 4, 80, "the ", 2024),
        "the quick red fox naps under the quick red fox naps under the quick red fox.\n"
    );
}

#[test]
fn chars_low_order_on_fox() {
    assert_eq!(
        chars("fox.txt", 2, 50, "", 77),
        "d fox.\nthe quick red fox.\nthe lazy dog.\nthe lazy dog"
    );
    assert_eq!(
        chars("fox.txt", 1, 30, "", 3),
        "ndove ther na lazy ck ck  ck la"
    );
}

#[test]
fn chars_high_order_on_fox() {
    assert_eq!(
        chars("fox.txt", 6, 100, "", 5),
        "uick brown fox jumps over the lazy dog.\n\
         the quick red fox naps under the lazy dog.\n\
         the quick red fox naps "
    );
}

#[test]
fn chars_budget_is_exact_when_chain_continues() {
    let corpus = corpus("fox.txt");
    let config = CharConfig {
        order: 2,
        ..CharConfig::default()
    };
    let mut generator = CharGenerator::new(&corpus, config, XorShift32::new(77)).unwrap();
    let out = generator.generate("", 50);
    assert_eq!(out.stop, StopReason::BudgetExhausted);
    assert_eq!(out.bytes.len(), 2 + 50);
}

// ---------------------------------------------------------------------------
// Word model
// ---------------------------------------------------------------------------

#[test]
fn words_seeded_on_cat_runs_to_dead_end() {
    assert_eq!(
        words("cat.txt", 1, 10, "the", 42),
        "the cat sat on the mat the cat ran"
    );
}

#[test]
fn words_random_seed_on_cat() {
    assert_eq!(words("cat.txt", 2, 20, "", 3), "cat ran");
}

#[test]
fn words_small_budget_on_cat() {
    assert_eq!(words("cat.txt", 1, 4, "the", 8), "the cat sat on the ");
}

#[test]
fn words_keep_corpus_whitespace() {
    assert_eq!(
        words("fox.txt", 2, 30, "", 7),
        "over the lazy dog.\nthe quick brown fox jumps over the lazy cat.\n a  dog and a cat\tand a fox.\n"
    );
    assert_eq!(
        words("fox.txt", 1, 25, "", 1234),
        "cat.\na cat\tand a cat\tand a dog and a cat\tand a cat\tand a dog and a fox.\n"
    );
}

#[test]
fn words_seeded_on_fox() {
    assert_eq!(
        words("fox.txt", 2, 12, "the quick", 99),
        "the quick brown fox jumps over the lazy dog.\nthe quick red fox naps "
    );
}

#[test]
fn words_order_three_on_fox() {
    assert_eq!(
        words("fox.txt", 3, 30, "", 2024),
        "lazy cat.\n a  dog and a cat\tand a fox.\n"
    );
}

#[test]
fn words_zero_rng_seed_always_takes_last_match() {
    assert_eq!(
        words("fox.txt", 1, 20, "the", 0),
        "the lazy cat.\na dog and a dog and a dog and a dog and a dog and a dog and "
    );
}

#[test]
fn words_every_entry_is_sorted() {
    let corpus = corpus("fox.txt");
    let generator =
        WordGenerator::new(&corpus, WordConfig::default(), XorShift32::new(1)).unwrap();
    let index = generator.index();
    let entries = index.entries();
    assert!(!entries.is_empty());
    for pair in entries.windows(2) {
        assert_ne!(
            word_index::partial_compare(index.tail(pair[0]), index.tail(pair[1]), 2),
            std::cmp::Ordering::Greater
        );
    }
}

#[test]
fn words_capacity_limits_output() {
    let corpus = corpus("fox.txt");
    let config = WordConfig {
        order: 1,
        capacity: 40,
    };
    let mut generator = WordGenerator::new(&corpus, config, XorShift32::new(1234)).unwrap();
    let out = generator.generate("", 25);
    assert_eq!(out.stop, StopReason::CapacityReached);
    assert!(out.bytes.len() < 40);
}
