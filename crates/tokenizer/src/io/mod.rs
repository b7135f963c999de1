//! Serialization and deserialization for tokenizers.
//!
//! This module loads vocabularies (`vocab.json`, `vocab.txt`), graph node
//! attribute bundles and complete tokenizers saved as `tokenizer.json`.

pub mod format;
pub mod load;
pub mod save;

pub use format::{SerializedConfig, SerializedTokenizer, TokenizerAttributes};
pub use load::TokenizerLoader;
pub use save::TokenizerSaver;
