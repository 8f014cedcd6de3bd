//! CLI integration tests for the `markov-chars` and `markov-words` binaries.
//!
//! Uses `assert_cmd` to spawn each binary as a subprocess and assert on
//! stdout/stderr/exit code.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

/// Path to the bundled corpus directory.
fn data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
}

fn corpus(name: &str) -> String {
    data_dir().join(name).to_string_lossy().into_owned()
}

fn chars_cmd() -> Command {
    Command::from(cargo_bin_cmd!("markov-chars"))
}

fn words_cmd() -> Command {
    Command::from(cargo_bin_cmd!("markov-words"))
}

// ---------------------------------------------------------------------------
// Basic CLI behavior
// ---------------------------------------------------------------------------

#[test]
fn help_flag() {
    chars_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("one character at a time"));
    words_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--capacity"));
}

#[test]
fn version_flag() {
    chars_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("markov-chars"));
}

#[test]
fn missing_arguments_is_usage_error() {
    chars_cmd()
        .arg(corpus("cat.txt"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage"));
    words_cmd().assert().code(1);
}

#[test]
fn zero_ngram_size_is_rejected() {
    chars_cmd()
        .args([corpus("cat.txt").as_str(), "0", "10", ""])
        .assert()
        .code(1);
}

#[test]
fn missing_file_reports_path() {
    chars_cmd()
        .args(["/nonexistent/corpus.txt", "3", "10", ""])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "Failed to open file /nonexistent/corpus.txt",
        ));
    words_cmd()
        .args(["/nonexistent/corpus.txt", "2", "10", ""])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to open file"));
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

#[test]
fn chars_seeded_output() {
    chars_cmd()
        .args([corpus("cat.txt").as_str(), "3", "40", "the", "12345"])
        .assert()
        .success()
        .stdout("the mat the mat the mat sat sat the mat the\n");
}

#[test]
fn chars_random_seed_output() {
    chars_cmd()
        .args([corpus("cat.txt").as_str(), "3", "40", "", "7"])
        .assert()
        .success()
        .stdout("e cat sat the mat the mat the cat the cat r\n");
}

#[test]
fn chars_dead_end_stops_early() {
    chars_cmd()
        .args([corpus("cat.txt").as_str(), "2", "30", "at", "99"])
        .assert()
        .success()
        .stdout("at ran\n");
}

#[test]
fn words_seeded_output() {
    words_cmd()
        .args([corpus("cat.txt").as_str(), "2", "10", "the cat", "5"])
        .assert()
        .success()
        .stdout("the cat sat on the mat the cat sat on the mat \n");
}

#[test]
fn words_random_seed_output() {
    words_cmd()
        .args([corpus("cat.txt").as_str(), "1", "10", "", "42"])
        .assert()
        .success()
        .stdout("the mat the cat ran\n");
}

#[test]
fn same_rng_seed_is_deterministic() {
    let run = || {
        words_cmd()
            .args([corpus("fox.txt").as_str(), "1", "30", "", "77"])
            .output()
            .unwrap()
            .stdout
    };
    assert_eq!(run(), run());
}

#[test]
fn negative_rng_seed_is_accepted() {
    chars_cmd()
        .args([corpus("cat.txt").as_str(), "2", "10", "", "-5"])
        .assert()
        .success();
}

#[test]
fn mismatched_seed_warns_and_falls_back() {
    let fallback = chars_cmd()
        .args([corpus("cat.txt").as_str(), "3", "40", "", "7"])
        .output()
        .unwrap()
        .stdout;
    chars_cmd()
        .args([corpus("cat.txt").as_str(), "3", "40", "toolong", "7"])
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stdout(fallback)
        .stderr(predicate::str::contains("random seed"));

    words_cmd()
        .args([corpus("cat.txt").as_str(), "2", "10", "the", "3"])
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stderr(predicate::str::contains("random seed"));
}

#[test]
fn small_capacity_truncates_word_output() {
    let out = words_cmd()
        .args([corpus("fox.txt").as_str(), "1", "25", "", "1234", "--capacity", "40"])
        .output()
        .unwrap();
    assert!(out.status.success());
    assert!(out.stdout.len() <= 40);
}

#[test]
fn byte_alphabet_is_accepted() {
    chars_cmd()
        .args([corpus("cat.txt").as_str(), "3", "40", "the", "12345", "--alphabet", "byte"])
        .assert()
        .success()
        .stdout("the mat the mat the mat sat sat the mat the\n");
}

#[test]
fn verbose_logs_model_details() {
    chars_cmd()
        .args(["-v", corpus("cat.txt").as_str(), "3", "10", "the", "1"])
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stderr(predicate::str::contains("character model trained"))
        .stderr(predicate::str::contains("character generator ready"))
        .stderr(predicate::str::contains("rng seeded"));
}

#[test]
fn verbose_logs_word_index_details() {
    words_cmd()
        .args(["--verbose", corpus("cat.txt").as_str(), "1", "10", "the", "42"])
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stdout("the cat sat on the mat the cat ran\n")
        .stderr(predicate::str::contains("word index built"))
        .stderr(predicate::str::contains("word generator ready"));
}
