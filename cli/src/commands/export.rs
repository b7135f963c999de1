//! Export command implementation.

use clap::Parser;
use std::path::PathBuf;

use super::TokenizerArgs;

/// Export command arguments.
#[derive(Parser)]
pub struct ExportCommand {
    #[command(flatten)]
    pub tokenizer: TokenizerArgs,

    /// Directory to write `tokenizer.json` into
    #[arg(short, long)]
    pub output: PathBuf,

    /// Also write the bare vocabulary as `vocab.json`
    #[arg(long, default_value_t = false)]
    pub vocab_json: bool,
}

use anyhow::{Context, Result as AnyhowResult};

pub fn run(cmd: ExportCommand) -> AnyhowResult<()> {
    let tokenizer = cmd.tokenizer.load()?;

    tokenizer
        .save(&cmd.output)
        .with_context(|| format!("failed to save tokenizer to {}", cmd.output.display()))?;

    if cmd.vocab_json {
        tokenizer
            .save_vocab_json(&cmd.output)
            .with_context(|| format!("failed to save vocabulary to {}", cmd.output.display()))?;
    }

    println!(
        "Saved tokenizer with {} tokens to {}",
        tokenizer.vocab_size(),
        cmd.output.display()
    );

    Ok(())
}
