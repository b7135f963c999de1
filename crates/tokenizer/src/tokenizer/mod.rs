//! Main tokenizer implementation.
//!
//! This module provides the high-level `Tokenizer` that splits every input of a
//! batch into words, runs WordPiece matching on each word and assembles the
//! flat id array with its row offsets.

mod output;

pub use output::TokenizedBatch;

use crate::io::{TokenizerAttributes, TokenizerLoader, TokenizerSaver};
use crate::pre_tokenizer::Splitter;
use rayon::prelude::*;
use std::ops::AddAssign;
use std::path::Path;
use std::sync::Arc;
use wordpiece_core::{
    FailurePolicy, MatchOutcome, Result, TokenizerError, Vocabulary, WordPieceEncoder,
    DEFAULT_MAX_INPUT_CHARS_PER_WORD, DEFAULT_SUFFIX_INDICATOR,
};

/// Configuration for building a tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizerConfig {
    /// Prefix of vocabulary entries that continue a word
    pub suffix_indicator: String,
    /// Words longer than this many code points become a single `-1`
    pub max_input_chars_per_word: usize,
    /// Handling of partial matches when a word fails
    pub failure_policy: FailurePolicy,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            suffix_indicator: DEFAULT_SUFFIX_INDICATOR.to_string(),
            max_input_chars_per_word: DEFAULT_MAX_INPUT_CHARS_PER_WORD,
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl TokenizerConfig {
    /// Check the configuration before a tokenizer is built from it.
    pub fn validate(&self) -> Result<()> {
        if self.max_input_chars_per_word == 0 {
            return Err(TokenizerError::InvalidConfig(
                "max_input_chars_per_word must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for creating a tokenizer.
#[derive(Debug, Clone, Default)]
pub struct TokenizerBuilder {
    config: TokenizerConfig,
}

impl TokenizerBuilder {
    /// Create a new tokenizer builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the continuation prefix.
    pub fn suffix_indicator(mut self, suffix: impl Into<String>) -> Self {
        self.config.suffix_indicator = suffix.into();
        self
    }

    /// Set the word length limit in code points.
    pub fn max_input_chars_per_word(mut self, max: usize) -> Self {
        self.config.max_input_chars_per_word = max;
        self
    }

    /// Set the failure policy.
    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.config.failure_policy = policy;
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: TokenizerConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the tokenizer around `vocab`.
    pub fn build(self, vocab: Vocabulary) -> Result<Tokenizer> {
        Tokenizer::new(vocab, self.config)
    }

    /// Build a tokenizer that shares an existing vocabulary.
    pub fn build_shared(self, vocab: Arc<Vocabulary>) -> Result<Tokenizer> {
        Tokenizer::with_shared_vocab(vocab, self.config)
    }
}

/// Word counts gathered while tokenizing a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    /// Words seen across all inputs
    pub words: usize,
    /// Words skipped for exceeding the length limit
    pub too_long: usize,
    /// Words with a position no vocabulary entry matched
    pub no_match: usize,
}

impl BatchStats {
    /// Words that produced a sentinel.
    pub fn unrecognized(&self) -> usize {
        self.too_long + self.no_match
    }

    fn record(&mut self, outcome: MatchOutcome) {
        self.words += 1;
        match outcome {
            MatchOutcome::Matched => {}
            MatchOutcome::TooLong => self.too_long += 1,
            MatchOutcome::NoMatch => self.no_match += 1,
        }
    }
}

impl AddAssign for BatchStats {
    fn add_assign(&mut self, other: Self) {
        self.words += other.words;
        self.too_long += other.too_long;
        self.no_match += other.no_match;
    }
}

fn trace_batch(batch: &TokenizedBatch, stats: &BatchStats) {
    tracing::trace!(
        rows = batch.num_rows(),
        ids = batch.ids_len(),
        unrecognized = stats.unrecognized(),
        "batch tokenized"
    );
}

/// Batched WordPiece tokenizer.
///
/// Cloning is cheap: clones share the vocabulary. `tokenize` only reads shared
/// state, so one tokenizer can serve many threads at once.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    /// WordPiece matcher holding the shared vocabulary
    encoder: WordPieceEncoder,
    /// Word segmenter
    splitter: Splitter,
    /// Configuration
    config: TokenizerConfig,
}

impl Tokenizer {
    /// Create a new tokenizer that owns `vocab`.
    pub fn new(vocab: Vocabulary, config: TokenizerConfig) -> Result<Self> {
        Self::with_shared_vocab(Arc::new(vocab), config)
    }

    /// Create a new tokenizer over a vocabulary shared with other tokenizers.
    pub fn with_shared_vocab(vocab: Arc<Vocabulary>, config: TokenizerConfig) -> Result<Self> {
        config.validate()?;

        tracing::debug!(
            vocab_size = vocab.len(),
            suffix_indicator = %config.suffix_indicator,
            max_input_chars_per_word = config.max_input_chars_per_word,
            failure_policy = ?config.failure_policy,
            "WordPiece tokenizer initialized"
        );

        let encoder = WordPieceEncoder::new(
            vocab,
            &config.suffix_indicator,
            config.max_input_chars_per_word,
        )
        .with_failure_policy(config.failure_policy);

        Ok(Self {
            encoder,
            splitter: Splitter::new(),
            config,
        })
    }

    /// Create a tokenizer builder.
    pub fn builder() -> TokenizerBuilder {
        TokenizerBuilder::new()
    }

    /// Build a tokenizer from the attribute bundle of a model graph node.
    ///
    /// `attributes.vocab` is a JSON object of `token -> id`; an absent
    /// `max_input_chars_per_word` defaults to 200.
    pub fn from_attributes(attributes: &TokenizerAttributes) -> Result<Self> {
        let (vocab, config) = TokenizerLoader::from_attributes(attributes)?;
        Self::new(vocab, config)
    }

    /// Load a vocabulary file (`.json` object or `.txt` listing) and build a
    /// tokenizer with `config`.
    pub fn from_vocab_file(path: &Path, config: TokenizerConfig) -> Result<Self> {
        let vocab = TokenizerLoader::load_vocab(path)?;
        Self::new(vocab, config)
    }

    /// Tokenize a batch of texts.
    ///
    /// ```rust
    /// use wordpiece_tokenizer::{Tokenizer, Vocabulary};
    ///
    /// let vocab = Vocabulary::from_entries([("hello", 5), ("world", 6), ("foo", 7)])?;
    /// let tokenizer = Tokenizer::builder().build(vocab)?;
    ///
    /// let batch = tokenizer.tokenize(&["hello world", "foo"]);
    /// assert_eq!(batch.ids(), &[5, 6, 7]);
    /// assert_eq!(batch.row_offsets(), &[0, 2, 3]);
    /// # Ok::<(), wordpiece_tokenizer::TokenizerError>(())
    /// ```
    pub fn tokenize<S: AsRef<str>>(&self, texts: &[S]) -> TokenizedBatch {
        self.tokenize_with_stats(texts).0
    }

    /// Tokenize a batch of texts and report how many words were unrecognized.
    pub fn tokenize_with_stats<S: AsRef<str>>(
        &self,
        texts: &[S],
    ) -> (TokenizedBatch, BatchStats) {
        let mut batch = TokenizedBatch::with_capacity(texts.len());
        let mut stats = BatchStats::default();
        let mut scratch = String::new();

        for text in texts {
            stats += self.tokenize_row(text.as_ref(), &mut scratch, batch.ids_mut());
            batch.end_row();
        }

        trace_batch(&batch, &stats);
        (batch, stats)
    }

    /// Tokenize a batch with rows spread over the rayon thread pool.
    ///
    /// The result is identical to [`Tokenizer::tokenize`].
    pub fn tokenize_parallel<S: AsRef<str> + Sync>(&self, texts: &[S]) -> TokenizedBatch {
        self.tokenize_parallel_with_stats(texts).0
    }

    /// Parallel counterpart of [`Tokenizer::tokenize_with_stats`].
    pub fn tokenize_parallel_with_stats<S: AsRef<str> + Sync>(
        &self,
        texts: &[S],
    ) -> (TokenizedBatch, BatchStats) {
        let rows: Vec<(Vec<i32>, BatchStats)> = texts
            .par_iter()
            .map_init(String::new, |scratch, text| {
                let mut ids = Vec::new();
                let stats = self.tokenize_row(text.as_ref(), scratch, &mut ids);
                (ids, stats)
            })
            .collect();

        let mut batch = TokenizedBatch::with_capacity(rows.len());
        let mut stats = BatchStats::default();
        for (ids, row_stats) in &rows {
            batch.push_row(ids);
            stats += *row_stats;
        }

        trace_batch(&batch, &stats);
        (batch, stats)
    }

    /// Append the ids of one input to `ids`.
    fn tokenize_row(&self, text: &str, scratch: &mut String, ids: &mut Vec<i32>) -> BatchStats {
        let mut stats = BatchStats::default();
        for word in self.splitter.split(text) {
            stats.record(self.encoder.encode_into(word, scratch, ids));
        }
        stats
    }

    /// Run WordPiece matching on a single, already segmented word.
    pub fn encode_word(&self, word: &str) -> Vec<i32> {
        self.encoder.encode(word)
    }

    /// Get the vocabulary size.
    pub fn vocab_size(&self) -> usize {
        self.encoder.vocab().len()
    }

    /// Get a reference to the vocabulary.
    pub fn vocab(&self) -> &Vocabulary {
        self.encoder.vocab()
    }

    /// Get the shared handle to the vocabulary.
    pub fn shared_vocab(&self) -> Arc<Vocabulary> {
        Arc::clone(self.encoder.vocab())
    }

    /// Get the configuration.
    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    /// Save the tokenizer to a directory as `tokenizer.json`.
    pub fn save(&self, path: &Path) -> Result<()> {
        TokenizerSaver::new(self.vocab(), &self.config).save(path)
    }

    /// Save only the vocabulary to a directory as `vocab.json`.
    pub fn save_vocab_json(&self, path: &Path) -> Result<()> {
        TokenizerSaver::new(self.vocab(), &self.config).save_vocab_json(path)
    }

    /// Load a tokenizer saved with [`Tokenizer::save`].
    pub fn load(path: &Path) -> Result<Self> {
        let (vocab, config) = TokenizerLoader::load(path)?;
        Self::new(vocab, config)
    }
}
