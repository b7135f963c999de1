//! Core data structures.
//!
//! This module holds the immutable vocabulary shared by every encoder.

pub mod vocab;

pub use vocab::{Vocab, Vocabulary};
