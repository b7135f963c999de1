//! Word segmentation for pre-tokenization.
//!
//! Text is split on the ASCII space character (U+0020) only. Tabs, newlines
//! and other Unicode whitespace are ordinary word characters. Runs of spaces
//! never produce empty words.

use std::iter::FusedIterator;

const SPACE: u8 = b' ';

/// Splits text into words on ASCII spaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct Splitter;

impl Splitter {
    /// Create a new splitter.
    pub fn new() -> Self {
        Self
    }

    /// Split text into words, borrowing from `text`.
    ///
    /// ```rust
    /// use wordpiece_tokenizer::Splitter;
    ///
    /// let words: Vec<&str> = Splitter::new().split("  hello  world ").collect();
    /// assert_eq!(words, ["hello", "world"]);
    /// ```
    pub fn split<'a>(&self, text: &'a str) -> Words<'a> {
        Words { text, last: 0 }
    }
}

/// Iterator over the words of one string.
///
/// Scans left to right keeping `last`, the byte offset where the current run
/// started. A space byte can never occur inside a multi-byte UTF-8 sequence,
/// so every emitted slice lies on char boundaries.
#[derive(Debug, Clone)]
pub struct Words<'a> {
    text: &'a str,
    last: usize,
}

impl<'a> Iterator for Words<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        while self.last < self.text.len() {
            let start = self.last;
            let rest = &self.text.as_bytes()[start..];

            match rest.iter().position(|&b| b == SPACE) {
                Some(len) => {
                    self.last = start + len + 1;
                    if len > 0 {
                        return Some(&self.text[start..start + len]);
                    }
                }
                None => {
                    self.last = self.text.len();
                    return Some(&self.text[start..]);
                }
            }
        }

        None
    }
}

impl FusedIterator for Words<'_> {}
