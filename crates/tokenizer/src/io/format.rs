//! Format definitions for tokenizer serialization.
//!
//! This module defines the data structures used for saving/loading
//! tokenizers and for the attribute bundle a model graph attaches to a
//! tokenizer node.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use wordpiece_core::FailurePolicy;

/// Attributes of a tokenizer node in a model graph.
///
/// The vocabulary arrives as JSON text rather than a nested object, exactly as
/// the graph stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizerAttributes {
    /// JSON object of `token -> id`
    pub vocab: String,
    /// Continuation prefix
    pub suffix_indicator: String,
    /// Word length limit; 200 when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_input_chars_per_word: Option<i64>,
}

/// Complete tokenizer serialization format (`tokenizer.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializedTokenizer {
    /// Format version
    pub version: String,
    /// Vocabulary (token -> ID mapping), sorted for stable output
    pub vocab: BTreeMap<String, i64>,
    /// Configuration
    pub config: SerializedConfig,
}

/// Tokenizer configuration in serialized format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedConfig {
    pub suffix_indicator: String,
    pub max_input_chars_per_word: usize,
    #[serde(default)]
    pub failure_policy: FailurePolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes_default_max_chars() {
        let attrs: TokenizerAttributes =
            serde_json::from_str(r###"{"vocab": "{\"a\": 0}", "suffix_indicator": "##"}"###)
                .unwrap();

        assert_eq!(attrs.vocab, r#"{"a": 0}"#);
        assert_eq!(attrs.suffix_indicator, "##");
        assert_eq!(attrs.max_input_chars_per_word, None);
    }

    #[test]
    fn test_attributes_missing_suffix() {
        let result = serde_json::from_str::<TokenizerAttributes>(r#"{"vocab": "{}"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_failure_policy_defaults() {
        let config: SerializedConfig = serde_json::from_str(
            r###"{"suffix_indicator": "##", "max_input_chars_per_word": 100}"###,
        )
        .unwrap();

        assert_eq!(config.failure_policy, FailurePolicy::KeepPartial);
        assert_eq!(config.max_input_chars_per_word, 100);
    }

    #[test]
    fn test_serialized_vocab_is_sorted() {
        let data = SerializedTokenizer {
            version: "0.1.0".to_string(),
            vocab: [("b".to_string(), 1), ("a".to_string(), 0)]
                .into_iter()
                .collect(),
            config: SerializedConfig {
                suffix_indicator: "##".to_string(),
                max_input_chars_per_word: 200,
                failure_policy: FailurePolicy::Discard,
            },
        };

        let json = serde_json::to_string(&data).unwrap();
        assert!(json.contains(r#""vocab":{"a":0,"b":1}"#));
        assert!(json.contains(r#""failure_policy":"Discard""#));
    }
}
