//! Whitespace word scanning over byte text.
//!
//! Reading at or past the end of a slice yields `0`, the terminator. An
//! embedded `0` byte closes a word for comparison purposes, but tokenizing
//! still covers the whole slice. Whitespace is
//! exactly space, tab, carriage return and line feed; everything else,
//! including non-ASCII bytes, is part of a word.
//!
//! This crate has no dependencies on the other workspace crates. It is a pure
//! text utility producing byte offsets.

/// The terminator byte. Also what [`byte_at`] returns past the end.
pub const TERMINATOR: u8 = 0;

/// Byte at `pos`, or [`TERMINATOR`] past the end of `text`.
#[inline]
pub fn byte_at(text: &[u8], pos: usize) -> u8 {
    text.get(pos).copied().unwrap_or(TERMINATOR)
}

#[inline]
pub fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\r' | b'\n' | b'\t')
}

/// Whitespace or the terminator: the bytes that close a word.
#[inline]
pub fn is_boundary(b: u8) -> bool {
    is_whitespace(b) || b == TERMINATOR
}

/// Advance `pos` past any run of whitespace.
pub fn skip_whitespace(text: &[u8], mut pos: usize) -> usize {
    while is_whitespace(byte_at(text, pos)) {
        pos += 1;
    }
    pos
}

/// Offsets of the first byte of every maximal non-whitespace run.
///
/// Scans the whole slice. A run may not start on a `0` byte: the scan ends
/// there. A `0` inside a run does not split it.
///
/// # Examples
///
/// ```
/// use word_tokenizer::tokenize;
///
/// assert_eq!(tokenize(b"  the cat\n sat"), vec![2, 6, 11]);
/// ```
pub fn tokenize(text: &[u8]) -> Vec<usize> {
    let mut starts = Vec::new();
    let mut pos = 0;

    while pos < text.len() {
        pos = skip_whitespace(text, pos);
        if byte_at(text, pos) == TERMINATOR {
            break;
        }

        starts.push(pos);
        while pos < text.len() && !is_whitespace(text[pos]) {
            pos += 1;
        }
    }

    starts
}

/// Count words the way seed strings are counted.
///
/// Every whitespace run closes one word and so does the terminator, which
/// means leading whitespace counts as an (empty) word of its own and the
/// empty string counts as one word. Callers decide what an empty seed means
/// before asking.
pub fn count_words(text: &[u8]) -> usize {
    let mut count = 0;
    let mut pos = 0;

    loop {
        if is_boundary(byte_at(text, pos)) {
            count += 1;
            pos = skip_whitespace(text, pos);
            if byte_at(text, pos) == TERMINATOR {
                break;
            }
        }
        pos += 1;
    }

    count
}

/// Length in bytes of the next `words` words of `text`.
///
/// Every whitespace byte closes a word and is included in the phrase, so a
/// complete phrase ends with its delimiter. Stops early, before the
/// terminator, when the text runs out.
///
/// # Examples
///
/// ```
/// use word_tokenizer::phrase_len;
///
/// assert_eq!(phrase_len(b"the cat sat", 2), 8);
/// assert_eq!(phrase_len(b"the cat", 5), 7);
/// ```
pub fn phrase_len(text: &[u8], words: usize) -> usize {
    let mut remaining = words;
    let mut len = 0;

    while remaining > 0 {
        let b = byte_at(text, len);
        if b == TERMINATOR {
            break;
        }
        if is_whitespace(b) {
            remaining -= 1;
        }
        len += 1;
    }

    len
}

/// The prefix of `text` up to (not including) its first terminator.
pub fn until_terminator(text: &[u8]) -> &[u8] {
    let end = text
        .iter()
        .position(|&b| b == TERMINATOR)
        .unwrap_or(text.len());
    &text[..end]
}
