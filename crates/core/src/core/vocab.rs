//! Vocabulary storage and lookup.
//!
//! The vocabulary maps token text to a non-negative `i32` id. It is built once,
//! from a JSON object, a BERT `vocab.txt` listing or any iterator of entries,
//! and is never mutated afterwards. Keys are kept as `CompactString` in an
//! `AHashMap`, so lookups take a plain `&str` candidate.

use crate::error::{Result, TokenizerError};
use ahash::AHashMap;
use compact_str::CompactString;
use std::collections::HashMap;

/// Forward mapping: token string -> ID
pub type Vocab = AHashMap<CompactString, i32>;

/// Immutable token-to-id mapping.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    vocab: Vocab,
}

impl Vocabulary {
    /// Build a vocabulary from `(token, id)` entries.
    ///
    /// Ids must fit in `0..=i32::MAX`; `-1` is reserved for unrecognized words.
    /// A token that appears twice keeps the id of its last occurrence.
    pub fn from_entries<I, K>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, i64)>,
        K: AsRef<str>,
    {
        let entries = entries.into_iter();
        let mut vocab = Vocab::with_capacity(entries.size_hint().0);

        for (token, id) in entries {
            let token = token.as_ref();
            let id = i32::try_from(id)
                .ok()
                .filter(|id| *id >= 0)
                .ok_or_else(|| TokenizerError::InvalidVocabId {
                    token: token.to_string(),
                    id,
                })?;
            vocab.insert(CompactString::new(token), id);
        }

        tracing::debug!(vocab_size = vocab.len(), "vocabulary built");

        Ok(Self { vocab })
    }

    /// Parse a vocabulary from a JSON object of `token -> id` pairs.
    ///
    /// ```rust
    /// use wordpiece_core::Vocabulary;
    ///
    /// let vocab = Vocabulary::from_json(r###"{"un": 0, "##aff": 1}"###)?;
    /// assert_eq!(vocab.find("##aff"), Some(1));
    /// # Ok::<(), wordpiece_core::TokenizerError>(())
    /// ```
    pub fn from_json(text: &str) -> Result<Self> {
        let map: HashMap<String, i64> = serde_json::from_str(text)?;
        Self::from_entries(map)
    }

    /// Parse a BERT-style `vocab.txt`: one token per line, the id is the
    /// zero-based line number.
    ///
    /// A blank line still consumes its id and becomes the empty token `""`.
    /// Segmentation never yields an empty word, so that entry is never matched.
    pub fn from_vocab_txt(text: &str) -> Result<Self> {
        Self::from_entries(
            text.lines()
                .enumerate()
                .map(|(line, token)| (token, line as i64)),
        )
    }

    /// Look up the id for a token.
    #[inline]
    pub fn find(&self, token: &str) -> Option<i32> {
        self.vocab.get(token).copied()
    }

    /// Check whether a token is present.
    #[inline]
    pub fn contains(&self, token: &str) -> bool {
        self.vocab.contains_key(token)
    }

    /// Get the size of the vocabulary.
    #[inline]
    pub fn len(&self) -> usize {
        self.vocab.len()
    }

    /// Check if the vocabulary is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vocab.is_empty()
    }

    /// Iterate over `(token, id)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> + '_ {
        self.vocab.iter().map(|(token, &id)| (token.as_str(), id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_entries() {
        let vocab = Vocabulary::from_entries([("hello", 5), ("world", 6)]).unwrap();

        assert_eq!(vocab.len(), 2);
        assert_eq!(vocab.find("hello"), Some(5));
        assert_eq!(vocab.find("world"), Some(6));
        assert_eq!(vocab.find("foo"), None);
    }

    #[test]
    fn test_duplicate_token_keeps_last() {
        let vocab = Vocabulary::from_entries([("a", 1), ("a", 2)]).unwrap();

        assert_eq!(vocab.len(), 1);
        assert_eq!(vocab.find("a"), Some(2));
    }

    #[test]
    fn test_rejects_negative_id() {
        let err = Vocabulary::from_entries([("ok", 0), ("bad", -1)]).unwrap_err();
        match err {
            TokenizerError::InvalidVocabId { token, id } => {
                assert_eq!(token, "bad");
                assert_eq!(id, -1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_id_above_i32() {
        let err = Vocabulary::from_entries([("big", i64::from(i32::MAX) + 1)]).unwrap_err();
        assert!(matches!(err, TokenizerError::InvalidVocabId { .. }));

        let vocab = Vocabulary::from_entries([("max", i64::from(i32::MAX))]).unwrap();
        assert_eq!(vocab.find("max"), Some(i32::MAX));
    }

    #[test]
    fn test_from_json() {
        let vocab = Vocabulary::from_json(r###"{"un": 0, "##aff": 1, "##able": 2}"###).unwrap();

        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.find("un"), Some(0));
        assert_eq!(vocab.find("##able"), Some(2));
    }

    #[test]
    fn test_from_json_continuation_only() {
        let vocab = Vocabulary::from_json(r###"{"##ing": 7}"###).unwrap();

        assert_eq!(vocab.len(), 1);
        assert_eq!(vocab.find("##ing"), Some(7));
        assert_eq!(vocab.find("ing"), None);
    }

    #[test]
    fn test_from_json_unicode_keys() {
        let vocab = Vocabulary::from_json(r#"{"coördina": 3, "日本": 4}"#).unwrap();

        assert_eq!(vocab.find("coördina"), Some(3));
        assert_eq!(vocab.find("日本"), Some(4));
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(matches!(
            Vocabulary::from_json("{\"un\": 0,"),
            Err(TokenizerError::Json(_))
        ));
        assert!(matches!(
            Vocabulary::from_json("[\"un\"]"),
            Err(TokenizerError::Json(_))
        ));
        assert!(matches!(
            Vocabulary::from_json(r#"{"un": "zero"}"#),
            Err(TokenizerError::Json(_))
        ));
    }

    #[test]
    fn test_from_vocab_txt() {
        let vocab = Vocabulary::from_vocab_txt("[PAD]\n[UNK]\nhello\n##ing\n").unwrap();

        assert_eq!(vocab.len(), 4);
        assert_eq!(vocab.find("[PAD]"), Some(0));
        assert_eq!(vocab.find("hello"), Some(2));
        assert_eq!(vocab.find("##ing"), Some(3));
    }

    #[test]
    fn test_from_vocab_txt_crlf() {
        let vocab = Vocabulary::from_vocab_txt("a\r\nb\r\n").unwrap();
        assert_eq!(vocab.find("b"), Some(1));
        assert!(!vocab.contains("b\r"));
    }

    #[test]
    fn test_from_vocab_txt_blank_line_keeps_numbering() {
        let vocab = Vocabulary::from_vocab_txt("a\n\nb\n").unwrap();

        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.find(""), Some(1));
        assert_eq!(vocab.find("b"), Some(2));
    }

    #[test]
    fn test_iter() {
        let vocab = Vocabulary::from_entries([("x", 1), ("y", 2)]).unwrap();
        let mut entries: Vec<(&str, i32)> = vocab.iter().collect();
        entries.sort();
        assert_eq!(entries, vec![("x", 1), ("y", 2)]);
    }

    #[test]
    fn test_empty() {
        let vocab = Vocabulary::default();
        assert!(vocab.is_empty());
        assert_eq!(vocab.find(""), None);
    }
}
