//! PyO3 wrapper for the Tokenizer struct

use pyo3::prelude::*;
use std::collections::HashMap;
use std::path::PathBuf;
use wordpiece_tokenizer::{
    Tokenizer, TokenizerAttributes, TokenizerBuilder, Vocabulary,
    DEFAULT_MAX_INPUT_CHARS_PER_WORD, DEFAULT_SUFFIX_INDICATOR,
};

use crate::failure_policy::PyFailurePolicy;

// Import the trait for error conversion
use crate::error::IntoPyErr;

/// Python wrapper for the batched WordPiece Tokenizer
#[pyclass(name = "Tokenizer")]
pub struct PyTokenizer {
    inner: Tokenizer,
}

#[pymethods]
impl PyTokenizer {
    /// Build a tokenizer from a `token -> id` dict
    #[staticmethod]
    #[pyo3(signature = (
        vocab,
        suffix_indicator=DEFAULT_SUFFIX_INDICATOR,
        max_input_chars_per_word=DEFAULT_MAX_INPUT_CHARS_PER_WORD,
        failure_policy=None
    ))]
    fn from_vocab(
        vocab: HashMap<String, i64>,
        suffix_indicator: &str,
        max_input_chars_per_word: usize,
        failure_policy: Option<PyFailurePolicy>,
    ) -> PyResult<Self> {
        let vocab = Vocabulary::from_entries(vocab).map_err(|e| e.into_py_err())?;
        let inner = Tokenizer::builder()
            .suffix_indicator(suffix_indicator)
            .max_input_chars_per_word(max_input_chars_per_word)
            .failure_policy(failure_policy.map(Into::into).unwrap_or_default())
            .build(vocab)
            .map_err(|e| e.into_py_err())?;
        Ok(PyTokenizer { inner })
    }

    /// Build a tokenizer from a vocabulary serialized as JSON text
    #[staticmethod]
    #[pyo3(signature = (vocab, suffix_indicator=DEFAULT_SUFFIX_INDICATOR, max_input_chars_per_word=None))]
    fn from_json(
        vocab: &str,
        suffix_indicator: &str,
        max_input_chars_per_word: Option<i64>,
    ) -> PyResult<Self> {
        let attributes = TokenizerAttributes {
            vocab: vocab.to_string(),
            suffix_indicator: suffix_indicator.to_string(),
            max_input_chars_per_word,
        };
        let inner = Tokenizer::from_attributes(&attributes).map_err(|e| e.into_py_err())?;
        Ok(PyTokenizer { inner })
    }

    /// Load a tokenizer from a directory
    #[staticmethod]
    fn load(path: &str) -> PyResult<Self> {
        let path_buf = PathBuf::from(path);
        let inner = Tokenizer::load(&path_buf).map_err(|e| e.into_py_err())?;
        Ok(PyTokenizer { inner })
    }

    /// Create a builder with default configuration
    #[staticmethod]
    fn builder() -> PyTokenizerBuilder {
        PyTokenizerBuilder::new()
    }

    /// Tokenize a batch of texts into `(ids, row_offsets)`
    fn tokenize(&self, texts: Vec<String>) -> (Vec<i32>, Vec<i64>) {
        self.inner.tokenize(&texts).into_parts()
    }

    /// Tokenize a batch of texts using all cores; same result as `tokenize`
    fn tokenize_parallel(&self, py: Python<'_>, texts: Vec<String>) -> (Vec<i32>, Vec<i64>) {
        py.allow_threads(|| self.inner.tokenize_parallel(&texts).into_parts())
    }

    /// Run WordPiece matching on a single word
    fn encode_word(&self, word: &str) -> Vec<i32> {
        self.inner.encode_word(word)
    }

    /// Look up the id of a vocabulary entry
    fn find(&self, token: &str) -> Option<i32> {
        self.inner.vocab().find(token)
    }

    /// Get the vocabulary size
    fn vocab_size(&self) -> usize {
        self.inner.vocab_size()
    }

    /// Continuation prefix in use
    #[getter]
    fn suffix_indicator(&self) -> String {
        self.inner.config().suffix_indicator.clone()
    }

    /// Word length limit in code points
    #[getter]
    fn max_input_chars_per_word(&self) -> usize {
        self.inner.config().max_input_chars_per_word
    }

    /// Failure policy in use
    #[getter]
    fn failure_policy(&self) -> PyFailurePolicy {
        self.inner.config().failure_policy.into()
    }

    /// Save the tokenizer to a directory
    fn save(&self, path: &str) -> PyResult<()> {
        let path_buf = PathBuf::from(path);
        self.inner.save(&path_buf).map_err(|e| e.into_py_err())?;
        Ok(())
    }

    fn __repr__(&self) -> String {
        format!(
            "Tokenizer(vocab_size={}, suffix_indicator={:?}, max_input_chars_per_word={})",
            self.inner.vocab_size(),
            self.inner.config().suffix_indicator,
            self.inner.config().max_input_chars_per_word
        )
    }

    fn __str__(&self) -> String {
        self.__repr__()
    }
}

/// Builder for creating tokenizers with custom configuration
#[pyclass(name = "TokenizerBuilder")]
pub struct PyTokenizerBuilder {
    inner: TokenizerBuilder,
}

#[pymethods]
impl PyTokenizerBuilder {
    #[staticmethod]
    fn new() -> Self {
        Self {
            inner: Tokenizer::builder(),
        }
    }

    fn suffix_indicator(&self, suffix: &str) -> Self {
        Self {
            inner: self.inner.clone().suffix_indicator(suffix),
        }
    }

    fn max_input_chars_per_word(&self, max: usize) -> Self {
        Self {
            inner: self.inner.clone().max_input_chars_per_word(max),
        }
    }

    fn failure_policy(&self, policy: &PyFailurePolicy) -> Self {
        Self {
            inner: self.inner.clone().failure_policy(policy.inner),
        }
    }

    fn build(&self, vocab: HashMap<String, i64>) -> PyResult<PyTokenizer> {
        let vocab = Vocabulary::from_entries(vocab).map_err(|e| e.into_py_err())?;
        let inner = self
            .inner
            .clone()
            .build(vocab)
            .map_err(|e| e.into_py_err())?;
        Ok(PyTokenizer { inner })
    }
}
