//! Wordpiece-core - vocabulary and WordPiece matching
//!
//! This crate provides the building blocks of the tokenizer, independent of
//! how text is segmented into words or how batches are assembled.
//!
//! # Features
//!
//! - Immutable vocabulary backed by `AHashMap` and compact strings
//! - Greedy longest-match-first WordPiece matching with a configurable
//!   suffix indicator and word length limit
//! - Error handling with detailed diagnostics
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use wordpiece_core::{Vocabulary, WordPieceEncoder};
//!
//! let vocab = Vocabulary::from_entries([("un", 0), ("##aff", 1), ("##able", 2)])?;
//! let encoder = WordPieceEncoder::new(Arc::new(vocab), "##", 200);
//! assert_eq!(encoder.encode("unaffable"), vec![0, 1, 2]);
//! # Ok::<(), wordpiece_core::TokenizerError>(())
//! ```

pub mod error;
pub use error::{Result, TokenizerError};

pub mod core;
pub use core::{Vocab, Vocabulary};

pub mod encoding;
pub use encoding::{
    FailurePolicy, MatchOutcome, WordPieceEncoder, DEFAULT_MAX_INPUT_CHARS_PER_WORD,
    DEFAULT_SUFFIX_INDICATOR, UNRECOGNIZED_ID,
};
