//! Two-state word tokenizer over a buffered byte stream.
//!
//! The scanner is an explicit two-state machine: `Seeking` skips the
//! separators between words, `InWord` accumulates the current word. Plain
//! spaces and tabs only delimit words; newline and carriage return are
//! surfaced as their own tokens so the layout engine can decide what a
//! line break means.
//!
//! Words are capped at [`MAX_WORD_LEN`] bytes. Bytes past the cap are
//! consumed and dropped — an over-long run of non-whitespace stays a
//! single (truncated) word and never splits into two.

use std::io::{self, BufRead};
use std::mem;

/// Longest word the tokenizer will produce, in bytes.
pub const MAX_WORD_LEN: usize = 99;

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

/// One token of document text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextToken {
    /// A maximal run of non-whitespace bytes, truncated to [`MAX_WORD_LEN`].
    Word(Vec<u8>),
    /// An explicit `\n` in the input.
    LineBreak,
    /// An explicit `\r` in the input.
    CarriageReturn,
}

// ---------------------------------------------------------------------------
// Scanner
// ---------------------------------------------------------------------------

/// Scanner state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Between words, skipping separators.
    Seeking,
    /// Accumulating a word.
    InWord,
}

/// Streaming word scanner over a buffered reader.
///
/// Single-pass: the underlying reader is consumed as tokens are pulled.
pub struct WordScanner<R: BufRead> {
    bytes: io::Bytes<R>,
    state: ScanState,
    word: Vec<u8>,
    /// A break token held back while the preceding word is flushed first.
    pending: Option<TextToken>,
}

impl<R: BufRead> WordScanner<R> {
    /// Create a scanner over the given reader.
    pub fn new(reader: R) -> Self {
        Self {
            bytes: reader.bytes(),
            state: ScanState::Seeking,
            word: Vec::new(),
            pending: None,
        }
    }

    /// Flush the accumulated word and stage `after` for the next pull.
    fn flush_word(&mut self, after: Option<TextToken>) -> TextToken {
        self.state = ScanState::Seeking;
        self.pending = after;
        TextToken::Word(mem::take(&mut self.word))
    }
}

impl<R: BufRead> Iterator for WordScanner<R> {
    type Item = io::Result<TextToken>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(token) = self.pending.take() {
            return Some(Ok(token));
        }

        loop {
            let byte = match self.bytes.next() {
                Some(Ok(b)) => Some(b),
                Some(Err(e)) => return Some(Err(e)),
                None => None,
            };

            match self.state {
                ScanState::Seeking => match byte {
                    None => return None,
                    Some(b'\n') => return Some(Ok(TextToken::LineBreak)),
                    Some(b'\r') => return Some(Ok(TextToken::CarriageReturn)),
                    Some(b' ' | b'\t') => {}
                    Some(b) => {
                        self.state = ScanState::InWord;
                        self.word.push(b);
                    }
                },
                ScanState::InWord => match byte {
                    None => return Some(Ok(self.flush_word(None))),
                    Some(b'\n') => return Some(Ok(self.flush_word(Some(TextToken::LineBreak)))),
                    Some(b'\r') => {
                        return Some(Ok(self.flush_word(Some(TextToken::CarriageReturn))));
                    }
                    Some(b' ' | b'\t') => return Some(Ok(self.flush_word(None))),
                    Some(b) => {
                        if self.word.len() < MAX_WORD_LEN {
                            self.word.push(b);
                        }
                        // Bytes past the cap are dropped, not re-worded.
                    }
                },
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
