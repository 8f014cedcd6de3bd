//! Text generation: seed, extend, terminate.
//!
//! Both model variants share one driver, [`Generator`], which owns the output
//! buffer and the remaining budget and moves through three phases:
//!
//! 1. **Seeded**: the output holds the seed (`order` bytes or words).
//! 2. **Extending**: each step asks a [`Walker`] to append what comes after
//!    the trailing context, and charges its cost to the budget.
//! 3. **Terminated**: the budget ran out or the walker could not continue.
//!    No further queries happen.
//!
//! [`CharWalker`] appends one byte per step. [`WordWalker`] appends a whole
//! `order`-word phrase per step, so its budget is charged `order` at a time.

use char_chain::CharModel;
use rand::RngCore;
use tracing::debug;
use word_index::WordIndex;
use word_tokenizer::{TERMINATOR, phrase_len, until_terminator};

/// Why generation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The output budget reached zero.
    BudgetExhausted,
    /// The model had nothing to follow the current context.
    NoContinuation,
    /// Appending the next phrase would have filled the output buffer.
    CapacityReached,
}

/// Where a [`Generator`] is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Seeded,
    Extending,
    Terminated(StopReason),
}

/// One model-specific extension step.
pub trait Walker {
    /// Budget consumed by one successful step.
    fn step_cost(&self) -> u64;

    /// Append the continuation of the trailing context to `output`, or say why
    /// there is none. On error `output` must be left untouched.
    fn extend<R: RngCore + ?Sized>(
        &mut self,
        output: &mut Vec<u8>,
        rng: &mut R,
    ) -> Result<(), StopReason>;
}

/// The result of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    /// Everything written, seed included.
    pub bytes: Vec<u8>,
    pub stop: StopReason,
    /// Successful extension steps.
    pub steps: usize,
}

impl Generated {
    /// The output as a C string would print it: cut at the first NUL.
    pub fn text(&self) -> &[u8] {
        until_terminator(&self.bytes)
    }
}

/// Drives a [`Walker`] from a seed until the budget or the model runs out.
#[derive(Debug)]
pub struct Generator<W> {
    walker: W,
    output: Vec<u8>,
    remaining: u64,
    steps: usize,
    phase: Phase,
}

impl<W: Walker> Generator<W> {
    /// Start in [`Phase::Seeded`] with `seed` already written.
    pub fn new(walker: W, seed: &[u8], budget: u64) -> Self {
        Generator {
            walker,
            output: seed.to_vec(),
            remaining: budget,
            steps: 0,
            phase: Phase::Seeded,
        }
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Output written so far.
    #[inline]
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Perform one transition and return the new phase.
    ///
    /// Once terminated, further calls do nothing.
    pub fn step<R: RngCore + ?Sized>(&mut self, rng: &mut R) -> Phase {
        if let Phase::Terminated(_) = self.phase {
            return self.phase;
        }
        if self.remaining == 0 {
            self.phase = Phase::Terminated(StopReason::BudgetExhausted);
            return self.phase;
        }

        self.phase = match self.walker.extend(&mut self.output, rng) {
            Ok(()) => {
                self.steps += 1;
                self.remaining = self.remaining.saturating_sub(self.walker.step_cost());
                Phase::Extending
            }
            Err(reason) => Phase::Terminated(reason),
        };
        self.phase
    }

    /// Step until terminated.
    pub fn run<R: RngCore + ?Sized>(mut self, rng: &mut R) -> Generated {
        let stop = loop {
            if let Phase::Terminated(reason) = self.step(rng) {
                break reason;
            }
        };

        debug!(?stop, steps = self.steps, bytes = self.output.len(), "generation finished");
        Generated {
            bytes: self.output,
            stop,
            steps: self.steps,
        }
    }
}

/// Appends one byte per step from a [`CharModel`].
///
/// The context is always the last `order` bytes of the output.
#[derive(Debug)]
pub struct CharWalker<'m> {
    model: &'m CharModel,
    cursor: usize,
}

impl<'m> CharWalker<'m> {
    /// `seed_len` is the number of bytes already in the output.
    pub fn new(model: &'m CharModel, seed_len: usize) -> Self {
        CharWalker {
            model,
            cursor: seed_len.saturating_sub(model.order()),
        }
    }
}

impl Walker for CharWalker<'_> {
    fn step_cost(&self) -> u64 {
        1
    }

    fn extend<R: RngCore + ?Sized>(
        &mut self,
        output: &mut Vec<u8>,
        rng: &mut R,
    ) -> Result<(), StopReason> {
        let context = output.get(self.cursor..).unwrap_or_default();
        match self.model.next_byte(context, rng) {
            Some(next) if next != TERMINATOR => {
                output.push(next);
                self.cursor += 1;
                Ok(())
            }
            _ => Err(StopReason::NoContinuation),
        }
    }
}

/// Appends one `order`-word phrase per step from a [`WordIndex`].
///
/// The context is the phrase appended last (or the seed). A phrase that
/// would bring the output to `capacity` bytes or more is not written.
#[derive(Debug)]
pub struct WordWalker<'i, 't> {
    index: &'i WordIndex<'t>,
    phrase_start: usize,
    capacity: usize,
}

impl<'i, 't> WordWalker<'i, 't> {
    /// The seed must be the only thing in the output.
    pub fn new(index: &'i WordIndex<'t>, capacity: usize) -> Self {
        WordWalker {
            index,
            phrase_start: 0,
            capacity,
        }
    }
}

impl Walker for WordWalker<'_, '_> {
    fn step_cost(&self) -> u64 {
        self.index.words() as u64
    }

    fn extend<R: RngCore + ?Sized>(
        &mut self,
        output: &mut Vec<u8>,
        rng: &mut R,
    ) -> Result<(), StopReason> {
        let phrase = output.get(self.phrase_start..).unwrap_or_default();
        let entry = self
            .index
            .pick_match(phrase, rng)
            .ok_or(StopReason::NoContinuation)?;
        let next = self
            .index
            .extend_phrase(entry)
            .ok_or(StopReason::NoContinuation)?;

        let tail = self.index.tail(next);
        let segment = &tail[..phrase_len(tail, self.index.words())];
        if output.len() + segment.len() >= self.capacity {
            return Err(StopReason::CapacityReached);
        }

        self.phrase_start = output.len();
        output.extend_from_slice(segment);
        Ok(())
    }
}

/// Draw a random `order`-byte seed from `corpus` (one draw).
///
/// When the corpus has no complete window the whole corpus is the seed and
/// nothing is drawn.
pub fn random_char_seed<'c, R: RngCore + ?Sized>(
    corpus: &'c [u8],
    order: usize,
    rng: &mut R,
) -> &'c [u8] {
    let windows = corpus.len().saturating_sub(order);
    if windows == 0 {
        return corpus;
    }
    let start = (rng.next_u32() as u64 % windows as u64) as usize;
    &corpus[start..start + order]
}

/// The first `order` words of a random index entry (one draw), or nothing
/// for an empty index.
pub fn random_word_seed<R: RngCore + ?Sized>(index: &WordIndex<'_>, rng: &mut R) -> Vec<u8> {
    match index.random_entry(rng) {
        Some(entry) => {
            let tail = index.tail(entry);
            tail[..phrase_len(tail, index.words())].to_vec()
        }
        None => Vec::new(),
    }
}

/// Generate from a character model. `seed` must already be valid
/// (`order` bytes); `None` draws one from `corpus`.
pub fn generate_chars<R: RngCore + ?Sized>(
    model: &CharModel,
    corpus: &[u8],
    seed: Option<&[u8]>,
    max_output: u64,
    rng: &mut R,
) -> Generated {
    let seed = match seed {
        Some(seed) => seed,
        None => random_char_seed(corpus, model.order(), rng),
    };
    debug!(seed = %String::from_utf8_lossy(seed), "character seed");

    Generator::new(CharWalker::new(model, seed.len()), seed, max_output).run(rng)
}

/// Generate from a word index. `seed` must already hold `order` words with
/// a trailing delimiter; `None` draws one from the index.
pub fn generate_words<R: RngCore + ?Sized>(
    index: &WordIndex<'_>,
    seed: Option<&[u8]>,
    max_words: u64,
    capacity: usize,
    rng: &mut R,
) -> Generated {
    let seed = match seed {
        Some(seed) => seed[..phrase_len(seed, index.words())].to_vec(),
        None => random_word_seed(index, rng),
    };
    debug!(seed = %String::from_utf8_lossy(&seed), "word seed");

    if seed.is_empty() {
        return Generated {
            bytes: seed,
            stop: StopReason::NoContinuation,
            steps: 0,
        };
    }

    Generator::new(WordWalker::new(index, capacity), &seed, max_words).run(rng)
}
