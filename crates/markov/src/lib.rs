//! Markov text generation over characters or words.
//!
//! This is the facade crate that wires together the lower-level components:
//! - [`xorshift_rng`]: the deterministic random source
//! - [`char_chain`]: the character model over a byte trie
//! - [`word_tokenizer`] / [`word_index`]: the word model
//! - [`markov_gen`]: the shared generation loop
//!
//! # Quick Start
//!
//! ```
//! use markov::{CharConfig, CharGenerator, XorShift32};
//!
//! let corpus = b"the cat sat on the mat the cat ran";
//! let config = CharConfig { order: 3, ..CharConfig::default() };
//! let mut generator = CharGenerator::new(corpus, config, XorShift32::new(12345)).unwrap();
//! let out = generator.generate("the", 40);
//! assert_eq!(out.text(), b"the mat the mat the mat sat sat the mat the");
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use char_chain::CharModel;
use markov_gen::{generate_chars, generate_words};
use rand::RngCore;
use thiserror::Error;
use tracing::{debug, warn};
use word_index::WordIndex;
use word_tokenizer::count_words;

pub use char_chain::Alphabet;
pub use markov_gen::{Generated, StopReason};
pub use xorshift_rng::XorShift32;

/// Output budget used when none is given: 256 bytes or words.
pub const DEFAULT_MAX_OUTPUT: u32 = 256;

/// Word output buffer capacity used when none is given.
pub const DEFAULT_WORD_CAPACITY: usize = 3 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum MarkovError {
    #[error("Failed to open file {}: {source}", path.display())]
    CorpusRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("n-gram size must be at least 1")]
    ZeroOrder,

    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Read a whole corpus file into memory.
pub fn load_corpus(path: &Path) -> Result<Vec<u8>, MarkovError> {
    let corpus = fs::read(path).map_err(|source| MarkovError::CorpusRead {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = corpus.len(), "corpus loaded");
    Ok(corpus)
}

/// Character model settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharConfig {
    /// Context length in bytes.
    pub order: usize,
    pub alphabet: Alphabet,
}

impl Default for CharConfig {
    fn default() -> Self {
        CharConfig {
            order: 7,
            alphabet: Alphabet::Ascii,
        }
    }
}

/// Word model settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordConfig {
    /// Context length in words.
    pub order: usize,
    /// Output buffer capacity in bytes.
    pub capacity: usize,
}

impl Default for WordConfig {
    fn default() -> Self {
        WordConfig {
            order: 2,
            capacity: DEFAULT_WORD_CAPACITY,
        }
    }
}

/// Character-level generator: a trained [`CharModel`] plus its corpus and
/// random source.
///
/// Generic over the PRNG for testability. Use [`XorShift32`] for output that
/// is reproducible from an rng seed.
pub struct CharGenerator<'c, R: RngCore> {
    corpus: &'c [u8],
    model: CharModel,
    rng: R,
}

impl<'c, R: RngCore> CharGenerator<'c, R> {
    /// Train on `corpus`.
    pub fn new(corpus: &'c [u8], config: CharConfig, rng: R) -> Result<Self, MarkovError> {
        if config.order == 0 {
            return Err(MarkovError::ZeroOrder);
        }
        let model = CharModel::train(config.order, config.alphabet, corpus);
        Ok(CharGenerator { corpus, model, rng })
    }

    /// The seed bytes to use for `seed`, or `None` to draw one at random.
    ///
    /// A seed is accepted only when it is exactly `order` bytes long. Any
    /// other non-empty seed is reported and ignored.
    pub fn accept_seed<'s>(&self, seed: &'s str) -> Option<&'s [u8]> {
        if seed.is_empty() {
            return None;
        }
        if seed.len() != self.model.order() {
            warn!(
                seed,
                expected = self.model.order(),
                actual = seed.len(),
                "seed length does not match n-gram size, using a random seed"
            );
            return None;
        }
        Some(seed.as_bytes())
    }

    /// Generate up to `max_output` bytes after the seed.
    pub fn generate(&mut self, seed: &str, max_output: u32) -> Generated {
        let seed = self.accept_seed(seed);
        generate_chars(
            &self.model,
            self.corpus,
            seed,
            max_output as u64,
            &mut self.rng,
        )
    }

    /// The trained model (for inspection/testing).
    pub fn model(&self) -> &CharModel {
        &self.model
    }
}

/// Word-level generator: a sorted [`WordIndex`] over the corpus plus the
/// random source.
pub struct WordGenerator<'c, R: RngCore> {
    index: WordIndex<'c>,
    capacity: usize,
    rng: R,
}

impl<'c, R: RngCore> WordGenerator<'c, R> {
    /// Tokenize and sort `corpus`.
    pub fn new(corpus: &'c [u8], config: WordConfig, rng: R) -> Result<Self, MarkovError> {
        if config.order == 0 {
            return Err(MarkovError::ZeroOrder);
        }
        Ok(WordGenerator {
            index: WordIndex::build(corpus, config.order),
            capacity: config.capacity,
            rng,
        })
    }

    /// The seed phrase to use for `seed`, or `None` to draw one at random.
    ///
    /// A seed is accepted when it counts exactly `order` words. A trailing
    /// space is appended unless it already ends with one, so the seed
    /// carries its delimiter like every other phrase.
    pub fn accept_seed(&self, seed: &str) -> Option<Vec<u8>> {
        if seed.is_empty() {
            return None;
        }
        let words = count_words(seed.as_bytes());
        if words != self.index.words() {
            warn!(
                seed,
                expected = self.index.words(),
                actual = words,
                "seed word count does not match n-gram size, using a random seed"
            );
            return None;
        }

        let mut phrase = seed.as_bytes().to_vec();
        if phrase.last() != Some(&b' ') {
            phrase.push(b' ');
        }
        Some(phrase)
    }

    /// Generate roughly `max_words` words after the seed.
    ///
    /// The budget is charged `order` words per phrase, so it is an upper
    /// bound rather than an exact count.
    pub fn generate(&mut self, seed: &str, max_words: u32) -> Generated {
        let seed = self.accept_seed(seed);
        generate_words(
            &self.index,
            seed.as_deref(),
            max_words as u64,
            self.capacity,
            &mut self.rng,
        )
    }

    /// The sorted index (for inspection/testing).
    pub fn index(&self) -> &WordIndex<'c> {
        &self.index
    }
}
