//! Benchmark command implementation.

use clap::Parser;

use super::TokenizerArgs;

/// Benchmark command arguments.
#[derive(Parser)]
pub struct BenchmarkCommand {
    #[command(flatten)]
    pub tokenizer: TokenizerArgs,

    /// Path to input text file, one batch row per line
    #[arg(short, long)]
    pub input: String,

    /// Number of iterations to run
    #[arg(short = 'n', long, default_value_t = 100)]
    pub iterations: usize,

    /// Tokenize rows on all cores
    #[arg(short, long, default_value_t = false)]
    pub parallel: bool,
}

use anyhow::Result as AnyhowResult;
use std::time::Instant;
use wordpiece_tokenizer::{TokenizedBatch, Tokenizer};

pub fn run(cmd: BenchmarkCommand) -> AnyhowResult<()> {
    let tokenizer = cmd.tokenizer.load()?;
    let texts = super::read_lines(&cmd.input)?;
    let iterations = cmd.iterations.max(1);

    let bytes: usize = texts.iter().map(String::len).sum();

    println!("Benchmarking batch tokenization...");
    println!("  Rows: {}", texts.len());
    println!("  Text length: {} bytes", bytes);
    println!("  Iterations: {}", iterations);
    println!("  Mode: {}", if cmd.parallel { "parallel" } else { "sequential" });
    println!();

    let tokenize = |tokenizer: &Tokenizer, texts: &[String]| -> TokenizedBatch {
        if cmd.parallel {
            tokenizer.tokenize_parallel(texts)
        } else {
            tokenizer.tokenize(texts)
        }
    };

    // Warmup
    let warmup = tokenize(&tokenizer, &texts);
    let ids_per_batch = warmup.ids_len();

    let start = Instant::now();
    for _ in 0..iterations {
        let batch = tokenize(&tokenizer, &texts);
        std::hint::black_box(&batch);
    }
    let elapsed = start.elapsed();

    let avg_secs = elapsed.as_secs_f64() / iterations as f64;

    println!("Results:");
    println!("  Total time: {:.2}s", elapsed.as_secs_f64());
    println!("  Average time: {:.3}ms", avg_secs * 1000.0);
    println!("  Throughput: {:.0} ids/s", ids_per_batch as f64 / avg_secs);
    println!("  Throughput: {:.2} MB/s", bytes as f64 / avg_secs / 1_000_000.0);

    Ok(())
}
