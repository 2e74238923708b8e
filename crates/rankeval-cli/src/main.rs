//! Rankeval CLI - command-line evaluation of ranked retrieval runs.
//!
//! # Usage
//!
//! ```bash
//! # Evaluate a run against relevance judgments
//! rankeval qrels.txt run.txt
//!
//! # Show the per-query breakdown
//! rankeval qrels.txt run.txt --per-query
//!
//! # JSON for scripting
//! rankeval qrels.txt run.txt --json
//!
//! # Custom cutoffs for the @k metrics
//! rankeval qrels.txt run.txt --cutoffs 1,5,10
//! ```

mod output;

use anyhow::{Context, Result};
use clap::Parser;
use rankeval_core::config::DEFAULT_CUTOFFS;
use rankeval_core::evaluation::evaluate;
use rankeval_core::qrels::Qrels;
use rankeval_core::run::Run;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Rankeval retrieval evaluation CLI.
///
/// Scores a ranked run file against TREC-style relevance judgments and
/// reports per-query and corpus-level metrics.
#[derive(Parser)]
#[command(name = "rankeval", version, about)]
struct Cli {
    /// Relevance judgments file (qrels)
    qrels: PathBuf,

    /// Ranked results file (run)
    run: PathBuf,

    /// Show the per-query breakdown before the aggregate summary
    #[arg(short = 'q', long)]
    per_query: bool,

    /// Output results as JSON
    #[arg(long)]
    json: bool,

    /// Cutoffs for the @k metrics (comma-separated)
    #[arg(long, value_delimiter = ',')]
    cutoffs: Option<Vec<usize>>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let qrels = Qrels::from_path(&cli.qrels)
        .with_context(|| format!("Failed to load judgments from {}", cli.qrels.display()))?;
    let run = Run::from_path(&cli.run)
        .with_context(|| format!("Failed to load run from {}", cli.run.display()))?;

    let cutoffs = cli.cutoffs.unwrap_or_else(|| DEFAULT_CUTOFFS.to_vec());
    let evaluation = evaluate(&qrels, &run, &cutoffs)?;

    let output = if cli.json {
        output::format_json(&evaluation, cli.per_query)
    } else if cli.per_query {
        output::format_full(&evaluation)
    } else {
        output::format_aggregate(&evaluation)
    };

    println!("{}", output);

    Ok(())
}
