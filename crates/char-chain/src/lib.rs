//! Order-k character Markov model.
//!
//! [`CharModel`] slides a window of `order` bytes over a corpus and records,
//! in a [`Trie`], which byte followed each window. Querying walks the same
//! path and draws the next byte with a running-sum weighted pick.

use byte_trie::Trie;
use rand::RngCore;
use tracing::debug;

/// The symbol set a model accepts.
///
/// `Ascii` is the classic 128-symbol table. `Byte` covers the full
/// byte range. For pure ASCII corpora both produce identical output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alphabet {
    #[default]
    Ascii,
    Byte,
}

impl Alphabet {
    /// Number of symbols in the alphabet.
    #[inline]
    pub fn size(self) -> usize {
        match self {
            Alphabet::Ascii => 128,
            Alphabet::Byte => 256,
        }
    }

    #[inline]
    pub fn contains(self, byte: u8) -> bool {
        (byte as usize) < self.size()
    }

    fn contains_all(self, bytes: &[u8]) -> bool {
        bytes.iter().all(|&b| self.contains(b))
    }
}

/// A trained character model: context length, alphabet and the trie.
#[derive(Debug)]
pub struct CharModel {
    order: usize,
    alphabet: Alphabet,
    trie: Trie,
    observations: usize,
}

impl CharModel {
    /// Create an empty model for contexts of `order` bytes.
    pub fn new(order: usize, alphabet: Alphabet) -> Self {
        CharModel {
            order,
            alphabet,
            trie: Trie::new(),
            observations: 0,
        }
    }

    /// Build a model from a whole corpus in one pass.
    pub fn train(order: usize, alphabet: Alphabet, corpus: &[u8]) -> Self {
        let mut model = CharModel::new(order, alphabet);
        model.learn(corpus);
        model
    }

    /// Record every `(context, next)` window of `corpus`.
    ///
    /// For each `i` in `0..corpus.len() - order` the context is
    /// `corpus[i..i + order]` and the observed byte is `corpus[i + order]`.
    /// A corpus no longer than `order` contributes nothing. Windows touching a
    /// byte outside the alphabet are skipped.
    pub fn learn(&mut self, corpus: &[u8]) {
        let windows = corpus.len().saturating_sub(self.order);
        let mut skipped = 0usize;

        for start in 0..windows {
            let context = &corpus[start..start + self.order];
            let next = corpus[start + self.order];
            if !self.alphabet.contains(next) || !self.alphabet.contains_all(context) {
                skipped += 1;
                continue;
            }
            self.trie.insert_gram(context, next);
            self.observations += 1;
        }

        debug!(
            order = self.order,
            windows,
            skipped,
            nodes = self.trie.len(),
            "character model trained"
        );
    }

    /// Draw the byte to follow `context`.
    ///
    /// Only the first `order` bytes of `context` are used. Returns `None` when
    /// the context was never seen, leaves the alphabet, is shorter than
    /// `order`, or its node has no observations.
    ///
    /// The pick walks observed symbols in ascending order, keeps a running
    /// sum of their counts and, for each one, draws `r = next_u32() % sum`;
    /// the symbol is tentatively selected when `r <= count`, and later
    /// symbols may overwrite the selection, which favours them. One draw is
    /// consumed per observed symbol.
    pub fn next_byte<R: RngCore + ?Sized>(&self, context: &[u8], rng: &mut R) -> Option<u8> {
        let context = context.get(..self.order)?;
        if !self.alphabet.contains_all(context) {
            return None;
        }

        let node = self.trie.node(self.trie.walk(context)?);
        if node.total_count == 0 {
            return None;
        }

        let mut running: u32 = 0;
        let mut picked = None;
        for obs in node.observations() {
            running = running.saturating_add(obs.count);
            if rng.next_u32() % running <= obs.count {
                picked = Some(obs.symbol);
            }
        }
        picked
    }

    /// Context length in bytes.
    #[inline]
    pub fn order(&self) -> usize {
        self.order
    }

    #[inline]
    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    /// Number of windows recorded so far.
    #[inline]
    pub fn observations(&self) -> usize {
        self.observations
    }

    /// The underlying trie, for inspection.
    #[inline]
    pub fn trie(&self) -> &Trie {
        &self.trie
    }
}
