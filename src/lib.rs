//! Command-line front ends for the `markov` generators.
//!
//! Both binaries share the same positional arguments and exit conventions:
//! output goes to stdout followed by a newline, diagnostics go to stderr,
//! and any failure exits with status 1.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, ValueEnum};
use markov::{
    Alphabet, CharConfig, CharGenerator, DEFAULT_WORD_CAPACITY, Generated, MarkovError,
    WordConfig, WordGenerator, XorShift32, load_corpus,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Arguments shared by both generators.
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Corpus file to learn from.
    pub source: PathBuf,

    /// Context length (bytes for characters, words for words).
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    pub ngram_size: u32,

    /// Output budget (bytes for characters, words for words).
    pub max_output: u32,

    /// Starting context. Empty picks one at random from the corpus.
    pub seed: String,

    /// PRNG seed for reproducible output. Defaults to the clock.
    #[arg(allow_negative_numbers = true)]
    pub rng_seed: Option<i64>,

    /// Log model and generation details to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommonArgs {
    fn rng(&self) -> XorShift32 {
        let rng = match self.rng_seed {
            // Truncated to the generator's 32-bit state.
            Some(seed) => XorShift32::new(seed as u32),
            None => XorShift32::from_time(),
        };
        debug!(state = rng.state(), "rng seeded");
        rng
    }
}

/// Which bytes the character model may learn from.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlphabetArg {
    /// Bytes 0..128; windows containing other bytes are skipped.
    Ascii,
    /// All 256 byte values.
    Byte,
}

impl From<AlphabetArg> for Alphabet {
    fn from(arg: AlphabetArg) -> Self {
        match arg {
            AlphabetArg::Ascii => Alphabet::Ascii,
            AlphabetArg::Byte => Alphabet::Byte,
        }
    }
}

/// Generate text from a corpus, one character at a time.
#[derive(Parser, Debug)]
#[command(name = "markov-chars", version, about)]
pub struct CharArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Byte range the model learns from.
    #[arg(long, value_enum, default_value_t = AlphabetArg::Ascii)]
    pub alphabet: AlphabetArg,
}

/// Generate text from a corpus, one phrase of words at a time.
#[derive(Parser, Debug)]
#[command(name = "markov-words", version, about)]
pub struct WordArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Output buffer capacity in bytes.
    #[arg(long, default_value_t = DEFAULT_WORD_CAPACITY)]
    pub capacity: usize,
}

/// Parse arguments, mapping clap's exit codes onto ours.
///
/// Help and version print to stdout and exit 0; usage errors exit 1.
pub fn parse_args<T: Parser>() -> Result<T, ExitCode> {
    T::try_parse().map_err(|err| {
        let _ = err.print();
        if err.use_stderr() {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        }
    })
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `--verbose`.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(io::stderr)
        .init();
}

pub fn run_chars(args: &CharArgs) -> Result<(), MarkovError> {
    let common = &args.common;
    let corpus = load_corpus(&common.source)?;
    let config = CharConfig {
        order: common.ngram_size as usize,
        alphabet: args.alphabet.into(),
    };
    let mut generator = CharGenerator::new(&corpus, config, common.rng())?;
    debug!(
        alphabet = ?generator.model().alphabet(),
        "character generator ready"
    );
    let out = generator.generate(&common.seed, common.max_output);
    emit(&out)
}

pub fn run_words(args: &WordArgs) -> Result<(), MarkovError> {
    let common = &args.common;
    let corpus = load_corpus(&common.source)?;
    let config = WordConfig {
        order: common.ngram_size as usize,
        capacity: args.capacity,
    };
    let mut generator = WordGenerator::new(&corpus, config, common.rng())?;
    debug!(
        capacity = config.capacity,
        entries = generator.index().len(),
        "word generator ready"
    );
    let out = generator.generate(&common.seed, common.max_output);
    emit(&out)
}

fn emit(out: &Generated) -> Result<(), MarkovError> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(out.text())?;
    stdout.write_all(b"\n")?;
    stdout.flush()?;
    Ok(())
}

/// Report a failed run and pick the exit status.
pub fn finish(result: Result<(), MarkovError>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
