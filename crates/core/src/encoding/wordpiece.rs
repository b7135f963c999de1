//! Greedy longest-match-first WordPiece matching.
//!
//! A word is consumed left to right. At every position the longest remaining
//! suffix is tried first and shrunk one code point at a time from the right
//! until a vocabulary entry matches. Pieces that do not start the word are
//! looked up with the suffix indicator prepended (`"##"` for BERT).
//!
//! Words that are too long, or that reach a position where nothing matches,
//! are reported with the [`UNRECOGNIZED_ID`] sentinel rather than an error.

use crate::core::vocab::Vocabulary;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Sentinel id emitted for a word that could not be tokenized.
pub const UNRECOGNIZED_ID: i32 = -1;

/// Continuation marker used by BERT vocabularies.
pub const DEFAULT_SUFFIX_INDICATOR: &str = "##";

/// Longest word (in code points) that is matched at all.
pub const DEFAULT_MAX_INPUT_CHARS_PER_WORD: usize = 200;

/// What happens to the pieces already matched when a word fails part way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FailurePolicy {
    /// Keep the ids matched before the failure and append one sentinel.
    ///
    /// `"unknown"` with only `"un"` in the vocabulary yields `[id("un"), -1]`.
    #[default]
    KeepPartial,
    /// Drop the ids matched before the failure; the word becomes a single sentinel.
    Discard,
}

/// How a single word was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// Every piece of the word was found in the vocabulary.
    Matched,
    /// The word exceeded the length limit and was not matched.
    TooLong,
    /// Some position of the word had no matching piece.
    NoMatch,
}

/// WordPiece matcher over a shared vocabulary.
#[derive(Debug, Clone)]
pub struct WordPieceEncoder {
    /// Vocabulary shared with every clone of the owning tokenizer
    vocab: Arc<Vocabulary>,
    /// Prefix for pieces that continue a word
    suffix_indicator: CompactString,
    /// Length limit in code points
    max_input_chars_per_word: usize,
    /// Handling of partial matches on failure
    failure_policy: FailurePolicy,
}

impl WordPieceEncoder {
    /// Create a new encoder with the default failure policy.
    pub fn new(
        vocab: Arc<Vocabulary>,
        suffix_indicator: &str,
        max_input_chars_per_word: usize,
    ) -> Self {
        Self {
            vocab,
            suffix_indicator: CompactString::new(suffix_indicator),
            max_input_chars_per_word,
            failure_policy: FailurePolicy::default(),
        }
    }

    /// Set the failure policy.
    pub fn with_failure_policy(mut self, failure_policy: FailurePolicy) -> Self {
        self.failure_policy = failure_policy;
        self
    }

    /// Get the shared vocabulary.
    pub fn vocab(&self) -> &Arc<Vocabulary> {
        &self.vocab
    }

    pub fn suffix_indicator(&self) -> &str {
        &self.suffix_indicator
    }

    pub fn max_input_chars_per_word(&self) -> usize {
        self.max_input_chars_per_word
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }

    /// Encode one word into a fresh vector of ids.
    pub fn encode(&self, word: &str) -> Vec<i32> {
        let mut ids = Vec::new();
        let mut scratch = String::new();
        self.encode_into(word, &mut scratch, &mut ids);
        ids
    }

    /// Encode one word, appending its ids to `ids`.
    ///
    /// `scratch` holds the prefixed candidate for continuation pieces; reusing
    /// it across calls keeps the matcher allocation-free once it has grown to
    /// the longest candidate. An empty word appends nothing.
    pub fn encode_into(&self, word: &str, scratch: &mut String, ids: &mut Vec<i32>) -> MatchOutcome {
        if word.chars().count() > self.max_input_chars_per_word {
            ids.push(UNRECOGNIZED_ID);
            return MatchOutcome::TooLong;
        }

        let word_start = ids.len();
        let mut start = 0;

        while start < word.len() {
            // Always retry from the full remaining suffix.
            let mut end = word.len();
            let mut matched = None;

            while start < end {
                let piece = &word[start..end];
                let candidate = if start > 0 {
                    scratch.clear();
                    scratch.push_str(&self.suffix_indicator);
                    scratch.push_str(piece);
                    scratch.as_str()
                } else {
                    piece
                };

                if let Some(id) = self.vocab.find(candidate) {
                    matched = Some(id);
                    break;
                }

                // Drop the last code point of the piece.
                match piece.chars().next_back() {
                    Some(ch) => end -= ch.len_utf8(),
                    None => break,
                }
            }

            match matched {
                Some(id) => {
                    ids.push(id);
                    start = end;
                }
                None => {
                    if self.failure_policy == FailurePolicy::Discard {
                        ids.truncate(word_start);
                    }
                    ids.push(UNRECOGNIZED_ID);
                    return MatchOutcome::NoMatch;
                }
            }
        }

        MatchOutcome::Matched
    }
}
