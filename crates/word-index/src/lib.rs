//! Sorted index of n-word windows over a shared corpus.
//!
//! Every word start in the corpus is an entry: a byte offset, never a copy.
//! Entries are ordered by [`partial_compare`], which only looks at the first
//! `n` words, so all windows that share those words form one contiguous run.
//! Looking up a phrase bisects to that run ([`WordIndex::find_match_range`]),
//! one member is chosen by single-pass reservoir sampling, and the words that
//! follow it become the next phrase ([`WordIndex::extend_phrase`]).

use std::cmp::Ordering;
use std::ops::Range;

use rand::RngCore;
use tracing::debug;
use word_tokenizer::{TERMINATOR, byte_at, is_boundary, is_whitespace, skip_whitespace, tokenize};

/// Compare two NUL-terminated byte strings on their first `words` words.
///
/// Bytes are compared pairwise until they differ, which decides the order
/// (unsigned). Each shared whitespace or terminator byte closes one word, and
/// once `words` words have closed with no difference the two are equal,
/// whatever follows. A string ending early compares by its terminator, so
/// `"the"` orders before `"the cat"` even for one word.
///
/// `words == 0` behaves like `words == 1`.
///
/// ```
/// use std::cmp::Ordering;
/// use word_index::partial_compare;
///
/// assert_eq!(partial_compare(b"the cat sat", b"the cat ran", 2), Ordering::Equal);
/// assert_eq!(partial_compare(b"the cat sat", b"the cat ran", 3), Ordering::Greater);
/// ```
pub fn partial_compare(a: &[u8], b: &[u8], words: usize) -> Ordering {
    let mut remaining = words.max(1);
    let mut pos = 0;

    loop {
        let (x, y) = (byte_at(a, pos), byte_at(b, pos));
        if x != y {
            return x.cmp(&y);
        }
        if is_boundary(x) {
            remaining -= 1;
            if remaining == 0 {
                return Ordering::Equal;
            }
        }
        pos += 1;
    }
}

/// Sort word-start offsets into `text` under [`partial_compare`].
///
/// Partition-exchange with the last element as pivot (Lomuto), driven from
/// an explicit worklist instead of recursion. Sub-ranges are disjoint, so the
/// final order is the one the recursive formulation produces. Entries that
/// compare equal end up adjacent in an order fixed by the partitioning.
pub fn sort_entries(text: &[u8], entries: &mut [usize], words: usize) {
    let tail = |offset: usize| &text[offset.min(text.len())..];
    let mut pending = vec![0..entries.len()];

    while let Some(range) = pending.pop() {
        if range.len() < 2 {
            continue;
        }

        let last = range.end - 1;
        let pivot = tail(entries[last]);
        let mut store = range.start;
        for idx in range.start..last {
            if partial_compare(tail(entries[idx]), pivot, words) == Ordering::Less {
                entries.swap(store, idx);
                store += 1;
            }
        }
        entries.swap(store, last);

        pending.push(range.start..store);
        pending.push(store + 1..range.end);
    }
}

/// Pick one item uniformly from a stream of unknown length.
///
/// The `k`-th item (0-based) replaces the current choice when
/// `next_u32() % (k + 1) == 0`. Exactly one draw per item.
pub fn reservoir_pick<I, R>(items: I, rng: &mut R) -> Option<I::Item>
where
    I: IntoIterator,
    R: RngCore + ?Sized,
{
    let mut chosen = None;
    for (seen, item) in items.into_iter().enumerate() {
        if rng.next_u32() as u64 % (seen as u64 + 1) == 0 {
            chosen = Some(item);
        }
    }
    chosen
}

/// Word windows of one corpus, sorted on their first `words` words.
#[derive(Debug)]
pub struct WordIndex<'t> {
    text: &'t [u8],
    entries: Vec<usize>,
    words: usize,
}

impl<'t> WordIndex<'t> {
    /// Tokenize `text` and sort every word start on its first `words` words.
    pub fn build(text: &'t [u8], words: usize) -> Self {
        let mut entries = tokenize(text);
        sort_entries(text, &mut entries, words);
        debug!(entries = entries.len(), words, "word index built");

        WordIndex {
            text,
            entries,
            words,
        }
    }

    /// Sorted entry offsets.
    #[inline]
    pub fn entries(&self) -> &[usize] {
        &self.entries
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Words per window.
    #[inline]
    pub fn words(&self) -> usize {
        self.words
    }

    /// Corpus text from `offset` to the end.
    #[inline]
    pub fn tail(&self, offset: usize) -> &'t [u8] {
        &self.text[offset.min(self.text.len())..]
    }

    fn compare_at(&self, phrase: &[u8], idx: usize) -> Ordering {
        partial_compare(phrase, self.tail(self.entries[idx]), self.words)
    }

    /// Index range of the entries equal to `phrase` on the first `words` words.
    ///
    /// Bisects (`equal` keeps `mid` as the upper bound, `less` moves below
    /// it, `greater` above it), steps left while the predecessor is still
    /// equal, then extends right over the equal run. Empty when nothing
    /// matches.
    pub fn find_match_range(&self, phrase: &[u8]) -> Range<usize> {
        if self.entries.is_empty() {
            return 0..0;
        }

        let mut lower = 0;
        let mut upper = self.entries.len() - 1;
        while lower < upper {
            let middle = (lower + upper) / 2;
            match self.compare_at(phrase, middle) {
                Ordering::Equal => upper = middle,
                Ordering::Less if middle == 0 => {
                    upper = 0;
                    break;
                }
                Ordering::Less => upper = middle - 1,
                Ordering::Greater => lower = middle + 1,
            }
        }

        let mut first = upper;
        while first > 0 && self.compare_at(phrase, first - 1) == Ordering::Equal {
            first -= 1;
        }

        let mut end = first;
        while end < self.entries.len() && self.compare_at(phrase, end) == Ordering::Equal {
            end += 1;
        }

        first..end
    }

    /// Choose one entry whose first words equal `phrase`, uniformly.
    /// Returns the entry's corpus offset.
    pub fn pick_match<R: RngCore + ?Sized>(&self, phrase: &[u8], rng: &mut R) -> Option<usize> {
        let range = self.find_match_range(phrase);
        reservoir_pick(&self.entries[range], rng).copied()
    }

    /// Offset of the phrase that follows the window starting at `entry`.
    ///
    /// Skips `words` whitespace bytes (each one closes a word), then any
    /// whitespace run. `None` when the corpus ends first.
    pub fn extend_phrase(&self, entry: usize) -> Option<usize> {
        let mut pos = entry;
        let mut skip = self.words;
        while skip > 0 {
            let b = byte_at(self.text, pos);
            if b == TERMINATOR {
                break;
            }
            if is_whitespace(b) {
                skip -= 1;
            }
            pos += 1;
        }

        let pos = skip_whitespace(self.text, pos);
        (byte_at(self.text, pos) != TERMINATOR).then_some(pos)
    }

    /// A uniformly drawn entry offset (one draw), `None` for an empty index.
    pub fn random_entry<R: RngCore + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        if self.entries.is_empty() {
            return None;
        }
        let idx = rng.next_u32() as u64 % self.entries.len() as u64;
        Some(self.entries[idx as usize])
    }
}
