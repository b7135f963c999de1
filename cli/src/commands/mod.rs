//! CLI commands for the wordpiece tokenizer.

pub mod benchmark;
pub mod encode;
pub mod export;

pub use benchmark::BenchmarkCommand;
pub use encode::EncodeCommand;
pub use export::ExportCommand;

use anyhow::{Context, Result as AnyhowResult};
use clap::{Args, ValueEnum};
use std::path::PathBuf;
use wordpiece_tokenizer::{
    FailurePolicy, Tokenizer, TokenizerConfig, DEFAULT_MAX_INPUT_CHARS_PER_WORD,
    DEFAULT_SUFFIX_INDICATOR,
};

/// How a word that fails to match is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Keep the pieces matched before the failure, then -1
    KeepPartial,
    /// Emit a single -1 for the whole word
    Discard,
}

impl From<PolicyArg> for FailurePolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::KeepPartial => FailurePolicy::KeepPartial,
            PolicyArg::Discard => FailurePolicy::Discard,
        }
    }
}

/// Where the tokenizer comes from, shared by every command.
#[derive(Args, Debug)]
pub struct TokenizerArgs {
    /// Directory holding a saved `tokenizer.json`
    #[arg(short, long, conflicts_with = "vocab", required_unless_present = "vocab")]
    pub tokenizer: Option<PathBuf>,

    /// Vocabulary file (`.json` object or `.txt` with one token per line)
    #[arg(short, long)]
    pub vocab: Option<PathBuf>,

    /// Continuation prefix, used with --vocab
    #[arg(long, default_value = DEFAULT_SUFFIX_INDICATOR)]
    pub suffix_indicator: String,

    /// Word length limit in code points, used with --vocab
    #[arg(long, default_value_t = DEFAULT_MAX_INPUT_CHARS_PER_WORD)]
    pub max_input_chars_per_word: usize,

    /// Failure policy, used with --vocab
    #[arg(long, value_enum, default_value_t = PolicyArg::KeepPartial)]
    pub failure_policy: PolicyArg,
}

impl TokenizerArgs {
    /// Configuration assembled from the command-line options.
    pub fn config(&self) -> TokenizerConfig {
        TokenizerConfig {
            suffix_indicator: self.suffix_indicator.clone(),
            max_input_chars_per_word: self.max_input_chars_per_word,
            failure_policy: self.failure_policy.into(),
        }
    }

    /// Load the tokenizer from a saved directory or build it from a vocabulary file.
    pub fn load(&self) -> AnyhowResult<Tokenizer> {
        let tokenizer = match (&self.tokenizer, &self.vocab) {
            (Some(dir), _) => Tokenizer::load(dir)
                .with_context(|| format!("failed to load tokenizer from {}", dir.display()))?,
            (None, Some(path)) => Tokenizer::from_vocab_file(path, self.config())
                .with_context(|| format!("failed to load vocabulary {}", path.display()))?,
            (None, None) => anyhow::bail!("either --tokenizer or --vocab is required"),
        };

        tracing::info!(
            vocab_size = tokenizer.vocab_size(),
            suffix_indicator = %tokenizer.config().suffix_indicator,
            "tokenizer ready"
        );

        Ok(tokenizer)
    }
}

/// Read one batch row per line from `path`, or from stdin when `path` is `-`.
pub fn read_lines(path: &str) -> AnyhowResult<Vec<String>> {
    use std::io::BufRead;

    if path == "-" {
        let stdin = std::io::stdin();
        let lines = stdin
            .lock()
            .lines()
            .collect::<std::io::Result<Vec<_>>>()
            .context("failed to read stdin")?;
        return Ok(lines);
    }

    let text =
        std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path))?;
    Ok(text.lines().map(str::to_string).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        tokenizer: TokenizerArgs,
    }

    #[test]
    fn test_vocab_options_build_config() {
        let cli = TestCli::parse_from([
            "test",
            "--vocab",
            "vocab.txt",
            "--suffix-indicator",
            "@@",
            "--max-input-chars-per-word",
            "50",
            "--failure-policy",
            "discard",
        ]);

        let config = cli.tokenizer.config();
        assert_eq!(config.suffix_indicator, "@@");
        assert_eq!(config.max_input_chars_per_word, 50);
        assert_eq!(config.failure_policy, FailurePolicy::Discard);
    }

    #[test]
    fn test_defaults() {
        let cli = TestCli::parse_from(["test", "-v", "vocab.json"]);
        assert_eq!(cli.tokenizer.config(), TokenizerConfig::default());
    }

    #[test]
    fn test_source_is_required_and_exclusive() {
        assert!(TestCli::try_parse_from(["test"]).is_err());
        assert!(TestCli::try_parse_from(["test", "-t", "dir", "-v", "vocab.txt"]).is_err());
    }
}
