//! Load functionality for vocabularies and saved tokenizers.

use super::format::{SerializedTokenizer, TokenizerAttributes};
use crate::tokenizer::TokenizerConfig;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use wordpiece_core::{Result, TokenizerError, Vocabulary, DEFAULT_MAX_INPUT_CHARS_PER_WORD};

/// Tokenizer loader - handles vocabularies and saved tokenizers.
pub struct TokenizerLoader;

impl TokenizerLoader {
    /// Load a tokenizer saved in a directory.
    ///
    /// Expects a `tokenizer.json` file in the given directory.
    pub fn load(path: &Path) -> Result<(Vocabulary, TokenizerConfig)> {
        let file_path = path.join("tokenizer.json");
        let file = File::open(&file_path).map_err(|e| TokenizerError::io(&file_path, e))?;

        let reader = BufReader::new(file);
        let serialized: SerializedTokenizer = serde_json::from_reader(reader)
            .map_err(|e| TokenizerError::Load(format!("Failed to deserialize tokenizer: {}", e)))?;

        Self::deserialize(serialized)
    }

    /// Load a vocabulary file, choosing the parser from the extension.
    ///
    /// - `.json`: object of `token -> id`
    /// - `.txt`: one token per line, id = line number
    pub fn load_vocab(path: &Path) -> Result<Vocabulary> {
        let content = std::fs::read_to_string(path).map_err(|e| TokenizerError::io(path, e))?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        let vocab = match extension.as_deref() {
            Some("json") => Vocabulary::from_json(&content)?,
            Some("txt") => Vocabulary::from_vocab_txt(&content)?,
            _ => {
                return Err(TokenizerError::Load(format!(
                    "Unsupported vocabulary file {}: expected .json or .txt",
                    path.display()
                )))
            }
        };

        tracing::debug!(
            path = %path.display(),
            vocab_size = vocab.len(),
            "vocabulary file loaded"
        );

        Ok(vocab)
    }

    /// Build a vocabulary and configuration from graph node attributes.
    pub fn from_attributes(
        attributes: &TokenizerAttributes,
    ) -> Result<(Vocabulary, TokenizerConfig)> {
        let max_input_chars_per_word = match attributes.max_input_chars_per_word {
            None => DEFAULT_MAX_INPUT_CHARS_PER_WORD,
            Some(max) if max > 0 => usize::try_from(max).map_err(|_| {
                TokenizerError::InvalidConfig(format!(
                    "max_input_chars_per_word {} does not fit in usize",
                    max
                ))
            })?,
            Some(max) => {
                return Err(TokenizerError::InvalidConfig(format!(
                    "max_input_chars_per_word must be positive, got {}",
                    max
                )))
            }
        };

        let vocab = Vocabulary::from_json(&attributes.vocab)?;
        let config = TokenizerConfig {
            suffix_indicator: attributes.suffix_indicator.clone(),
            max_input_chars_per_word,
            ..TokenizerConfig::default()
        };

        Ok((vocab, config))
    }

    /// Deserialize from a serialized structure.
    fn deserialize(data: SerializedTokenizer) -> Result<(Vocabulary, TokenizerConfig)> {
        let vocab = Vocabulary::from_entries(data.vocab)?;
        let config = TokenizerConfig {
            suffix_indicator: data.config.suffix_indicator,
            max_input_chars_per_word: data.config.max_input_chars_per_word,
            failure_policy: data.config.failure_policy,
        };
        config.validate()?;

        Ok((vocab, config))
    }
}
