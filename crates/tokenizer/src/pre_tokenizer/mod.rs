//! Pre-tokenization pipeline.
//!
//! Text is segmented into words before WordPiece matching. The only
//! segmentation performed is splitting on ASCII spaces; no normalization is
//! applied.

pub mod split;

pub use split::{Splitter, Words};
