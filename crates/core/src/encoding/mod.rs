//! Subword encoders.
//!
//! Only WordPiece is provided: greedy longest-match-first matching of a single
//! pre-segmented word against a fixed vocabulary.

pub mod wordpiece;

pub use wordpiece::{
    FailurePolicy, MatchOutcome, WordPieceEncoder, DEFAULT_MAX_INPUT_CHARS_PER_WORD,
    DEFAULT_SUFFIX_INDICATOR, UNRECOGNIZED_ID,
};
