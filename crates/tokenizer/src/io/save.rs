//! Save functionality for tokenizers.

use super::format::{SerializedConfig, SerializedTokenizer};
use crate::tokenizer::TokenizerConfig;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use wordpiece_core::{Result, TokenizerError, Vocabulary};

/// Tokenizer saver - handles writing tokenizers to disk.
pub struct TokenizerSaver<'a> {
    /// Vocabulary reference
    vocab: &'a Vocabulary,
    /// Configuration reference
    config: &'a TokenizerConfig,
}

impl<'a> TokenizerSaver<'a> {
    /// Create a new tokenizer saver.
    pub fn new(vocab: &'a Vocabulary, config: &'a TokenizerConfig) -> Self {
        Self { vocab, config }
    }

    /// Save the tokenizer to a directory as a single `tokenizer.json`.
    pub fn save(&self, path: &Path) -> Result<()> {
        let serialized = self.serialize();
        Self::write_json(path, "tokenizer.json", &serialized)
    }

    /// Save only the vocabulary to a directory as `vocab.json`.
    ///
    /// The file is a plain `token -> id` object, the same shape accepted by
    /// [`Vocabulary::from_json`].
    pub fn save_vocab_json(&self, path: &Path) -> Result<()> {
        Self::write_json(path, "vocab.json", &self.vocab_map())
    }

    fn write_json<T: serde::Serialize>(dir: &Path, file_name: &str, value: &T) -> Result<()> {
        std::fs::create_dir_all(dir).map_err(|e| {
            TokenizerError::Save(format!(
                "Failed to create directory {}: {}",
                dir.display(),
                e
            ))
        })?;

        let file_path = dir.join(file_name);
        let file = File::create(&file_path).map_err(|e| {
            TokenizerError::Save(format!(
                "Failed to create file {}: {}",
                file_path.display(),
                e
            ))
        })?;

        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, value)
            .map_err(|e| TokenizerError::Save(format!("Failed to serialize {}: {}", file_name, e)))?;

        tracing::debug!(path = %file_path.display(), "tokenizer file written");

        Ok(())
    }

    fn vocab_map(&self) -> BTreeMap<String, i64> {
        self.vocab
            .iter()
            .map(|(token, id)| (token.to_string(), i64::from(id)))
            .collect()
    }

    /// Serialize the tokenizer to a structure.
    fn serialize(&self) -> SerializedTokenizer {
        SerializedTokenizer {
            version: env!("CARGO_PKG_VERSION").to_string(),
            vocab: self.vocab_map(),
            config: SerializedConfig {
                suffix_indicator: self.config.suffix_indicator.clone(),
                max_input_chars_per_word: self.config.max_input_chars_per_word,
                failure_policy: self.config.failure_policy,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::load::TokenizerLoader;
    use wordpiece_core::FailurePolicy;

    #[test]
    fn test_serialize() {
        let vocab = Vocabulary::from_entries([("hello", 0), ("world", 1)]).unwrap();
        let config = TokenizerConfig::default();

        let saver = TokenizerSaver::new(&vocab, &config);
        let serialized = saver.serialize();

        assert_eq!(serialized.vocab.len(), 2);
        assert_eq!(serialized.vocab.get("world"), Some(&1));
        assert_eq!(serialized.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(serialized.config.max_input_chars_per_word, 200);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let temp_dir = std::env::temp_dir().join("wordpiece_test_save_roundtrip");

        let vocab = Vocabulary::from_entries([("un", 0), ("##aff", 1), ("##able", 2)]).unwrap();
        let config = TokenizerConfig {
            suffix_indicator: "##".to_string(),
            max_input_chars_per_word: 64,
            failure_policy: FailurePolicy::Discard,
        };

        TokenizerSaver::new(&vocab, &config).save(&temp_dir).unwrap();
        let (loaded_vocab, loaded_config) = TokenizerLoader::load(&temp_dir).unwrap();

        assert_eq!(loaded_vocab.len(), vocab.len());
        assert_eq!(loaded_vocab.find("##able"), Some(2));
        assert_eq!(loaded_config, config);

        std::fs::remove_dir_all(temp_dir).ok();
    }

    #[test]
    fn test_save_vocab_json() {
        let temp_dir = std::env::temp_dir().join("wordpiece_test_save_vocab_json");

        let vocab = Vocabulary::from_entries([("hello", 5), ("日本", 9)]).unwrap();
        let config = TokenizerConfig::default();
        TokenizerSaver::new(&vocab, &config)
            .save_vocab_json(&temp_dir)
            .unwrap();

        let loaded = TokenizerLoader::load_vocab(&temp_dir.join("vocab.json")).unwrap();
        assert_eq!(loaded.find("hello"), Some(5));
        assert_eq!(loaded.find("日本"), Some(9));

        std::fs::remove_dir_all(temp_dir).ok();
    }
}
