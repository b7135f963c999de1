//! wordpiece CLI - Command-line interface for the batched WordPiece tokenizer.
//!
//! This is the main entry point for the `wordpiece` command-line tool.

mod commands;

use clap::{Parser, Subcommand};
use commands::{BenchmarkCommand, EncodeCommand, ExportCommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "wordpiece")]
#[command(about = "A batched WordPiece tokenizer", long_about = None)]
#[command(version)]
struct Cli {
    /// Log filter, e.g. `debug` or `wordpiece_tokenizer=trace` (overrides RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tokenize a batch of texts into ids and row offsets
    Encode(EncodeCommand),
    /// Benchmark batch tokenization throughput
    Benchmark(BenchmarkCommand),
    /// Save a tokenizer directory built from a vocabulary file
    Export(ExportCommand),
}

fn init_tracing(log_level: Option<&str>) -> anyhow::Result<()> {
    let filter = match log_level {
        Some(level) => EnvFilter::try_new(level)?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref())?;

    match cli.command {
        Commands::Encode(cmd) => commands::encode::run(cmd)?,
        Commands::Benchmark(cmd) => commands::benchmark::run(cmd)?,
        Commands::Export(cmd) => commands::export::run(cmd)?,
    }

    Ok(())
}
