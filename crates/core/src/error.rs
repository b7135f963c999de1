//! Error types for the WordPiece tokenizer library.
//!
//! Every variant except `BufferSize` and `Save` is raised while a vocabulary or
//! tokenizer is being constructed. Tokenizing a batch never fails: words that
//! cannot be matched show up as the `-1` sentinel in the output instead.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the tokenizer library.
#[derive(Error, Debug)]
pub enum TokenizerError {
    /// Error loading a vocabulary or a saved tokenizer
    #[error("Load error: {0}")]
    Load(String),

    /// Error saving a tokenizer
    #[error("Save error: {0}")]
    Save(String),

    /// I/O error with file context
    #[error("I/O error for {path}: {err}")]
    Io {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Vocabulary id outside the representable non-negative `i32` range
    #[error("Invalid id {id} for token {token:?}: ids must be in 0..={}", i32::MAX)]
    InvalidVocabId { token: String, id: i64 },

    /// Caller-provided output buffer has the wrong length
    #[error("Output buffer for {buffer} has length {actual}, expected {expected}")]
    BufferSize {
        buffer: &'static str,
        expected: usize,
        actual: usize,
    },
}

impl TokenizerError {
    /// Wrap an I/O error together with the path that caused it.
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            err,
        }
    }
}

/// Result type alias for tokenizer operations.
pub type Result<T> = std::result::Result<T, TokenizerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_vocab_id_message() {
        let err = TokenizerError::InvalidVocabId {
            token: "##ing".to_string(),
            id: -3,
        };
        let msg = err.to_string();
        assert!(msg.contains("-3"));
        assert!(msg.contains("##ing"));
    }

    #[test]
    fn test_json_error_conversion() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: TokenizerError = parse_err.into();
        assert!(matches!(err, TokenizerError::Json(_)));
    }
}
