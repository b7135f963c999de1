//! Encode command implementation.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use super::TokenizerArgs;

/// Output rendering for the encode command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per input with space-separated ids
    Text,
    /// `{"ids": [...], "row_offsets": [...]}`
    Json,
}

/// Encode command arguments.
#[derive(Parser)]
pub struct EncodeCommand {
    #[command(flatten)]
    pub tokenizer: TokenizerArgs,

    /// Texts to encode, one batch row each (stdin lines if none are given)
    pub inputs: Vec<String>,

    /// Read the batch from a file, one row per line (`-` for stdin)
    #[arg(short, long, conflicts_with = "inputs")]
    pub file: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Tokenize rows on all cores
    #[arg(short, long, default_value_t = false)]
    pub parallel: bool,

    /// Write the ids as raw native-endian i32 values to this file
    #[arg(long, requires = "offsets_out")]
    pub ids_out: Option<PathBuf>,

    /// Write the row offsets as raw native-endian i64 values to this file
    #[arg(long, requires = "ids_out")]
    pub offsets_out: Option<PathBuf>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

use anyhow::{Context, Result as AnyhowResult};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use wordpiece_tokenizer::TokenizedBatch;

pub fn run(cmd: EncodeCommand) -> AnyhowResult<()> {
    let tokenizer = cmd.tokenizer.load()?;

    let texts = match &cmd.file {
        Some(path) => super::read_lines(path)?,
        None if cmd.inputs.is_empty() => super::read_lines("-")?,
        None => cmd.inputs.clone(),
    };

    let (batch, stats) = if cmd.parallel {
        tokenizer.tokenize_parallel_with_stats(&texts)
    } else {
        tokenizer.tokenize_with_stats(&texts)
    };

    tracing::info!(
        rows = batch.num_rows(),
        words = stats.words,
        ids = batch.ids_len(),
        too_long = stats.too_long,
        no_match = stats.no_match,
        "batch encoded"
    );

    if batch.is_empty() && !texts.is_empty() {
        tracing::warn!(rows = batch.num_rows(), "no words found in any input");
    }

    if let (Some(ids_path), Some(offsets_path)) = (&cmd.ids_out, &cmd.offsets_out) {
        write_buffers(&batch, ids_path, offsets_path)?;
    }

    let output = render(&batch, cmd.format)?;
    match &cmd.output {
        Some(path) => {
            std::fs::write(path, &output)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Encoded {} rows to {}", batch.num_rows(), path.display());
        }
        None => {
            print!("{}", output);
        }
    }

    Ok(())
}

fn render(batch: &TokenizedBatch, format: OutputFormat) -> AnyhowResult<String> {
    let output = match format {
        OutputFormat::Text => batch
            .rows()
            .map(|row| {
                let ids: Vec<String> = row.iter().map(|id| id.to_string()).collect();
                ids.join(" ") + "\n"
            })
            .collect(),
        OutputFormat::Json => serde_json::to_string(batch)? + "\n",
    };
    Ok(output)
}

fn write_buffers(
    batch: &TokenizedBatch,
    ids_path: &Path,
    offsets_path: &Path,
) -> AnyhowResult<()> {
    let ids_file = File::create(ids_path)
        .with_context(|| format!("failed to create {}", ids_path.display()))?;
    let offsets_file = File::create(offsets_path)
        .with_context(|| format!("failed to create {}", offsets_path.display()))?;

    batch
        .write_ne(BufWriter::new(ids_file), BufWriter::new(offsets_file))
        .context("failed to write id buffers")?;

    tracing::info!(
        ids = %ids_path.display(),
        offsets = %offsets_path.display(),
        "raw buffers written"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordpiece_tokenizer::{Tokenizer, Vocabulary};

    fn batch() -> TokenizedBatch {
        let vocab = Vocabulary::from_entries([("hello", 5), ("world", 6), ("foo", 7)]).unwrap();
        let tokenizer = Tokenizer::builder().build(vocab).unwrap();
        tokenizer.tokenize(&["hello world", "", "foo bar"])
    }

    #[test]
    fn test_render_text() {
        let output = render(&batch(), OutputFormat::Text).unwrap();
        assert_eq!(output, "5 6\n\n7 -1\n");
    }

    #[test]
    fn test_render_json() {
        let output = render(&batch(), OutputFormat::Json).unwrap();
        assert_eq!(output, "{\"ids\":[5,6,7,-1],\"row_offsets\":[0,2,2,4]}\n");
    }

    #[test]
    fn test_write_buffers() {
        let dir = std::env::temp_dir().join("wordpiece_cli_test_buffers");
        std::fs::create_dir_all(&dir).unwrap();
        let ids_path = dir.join("ids.bin");
        let offsets_path = dir.join("offsets.bin");

        let batch = batch();
        write_buffers(&batch, &ids_path, &offsets_path).unwrap();

        assert_eq!(std::fs::read(&ids_path).unwrap(), batch.ids_ne_bytes());
        assert_eq!(
            std::fs::read(&offsets_path).unwrap(),
            batch.row_offsets_ne_bytes()
        );

        std::fs::remove_dir_all(dir).ok();
    }
}
