//! Wordpiece-tokenizer - batched WordPiece tokenization
//!
//! This crate turns a batch of strings into one flat array of vocabulary ids
//! plus CSR row offsets, ready to hand to numeric pipelines.
//!
//! # Features
//!
//! - Builder pattern for tokenizer configuration
//! - ASCII-space word segmentation followed by greedy longest-match-first
//!   WordPiece matching
//! - Unrecognized words reported as `-1` instead of failing the batch
//! - Sequential and rayon-parallel batch tokenization with identical output
//! - Loading from `vocab.json`, `vocab.txt`, graph node attributes or a saved
//!   `tokenizer.json`
//!
//! # Example
//!
//! ```rust
//! use wordpiece_tokenizer::{Tokenizer, Vocabulary};
//!
//! let vocab = Vocabulary::from_json(r###"{"un": 0, "##aff": 1, "##able": 2, "foo": 3}"###)?;
//! let tokenizer = Tokenizer::builder().suffix_indicator("##").build(vocab)?;
//!
//! let batch = tokenizer.tokenize(&["unaffable", "foo bar"]);
//! assert_eq!(batch.ids(), &[0, 1, 2, 3, -1]);
//! assert_eq!(batch.row_offsets(), &[0, 3, 5]);
//! # Ok::<(), wordpiece_tokenizer::TokenizerError>(())
//! ```

// Re-export core types
pub use wordpiece_core::{
    FailurePolicy, Result, TokenizerError, Vocabulary, DEFAULT_MAX_INPUT_CHARS_PER_WORD,
    DEFAULT_SUFFIX_INDICATOR, UNRECOGNIZED_ID,
};

// Tokenizer API
pub mod tokenizer;
pub use tokenizer::{BatchStats, TokenizedBatch, Tokenizer, TokenizerBuilder, TokenizerConfig};

// IO/Serialization
pub mod io;
pub use io::{TokenizerAttributes, TokenizerLoader, TokenizerSaver};

// Pre-tokenization
pub mod pre_tokenizer;
pub use pre_tokenizer::{Splitter, Words};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
