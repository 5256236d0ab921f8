//! voxcalc - Spoken Arithmetic Calculator
//!
//! Feeds transcripts from the command line or stdin through the parser and
//! evaluator and prints the results.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use voxcalc::config::{AdjacentNumerals, Config};
use voxcalc::{session, ProcessResult, Processor};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Transcripts to process (reads one per line from stdin when omitted)
    transcripts: Vec<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Print each result as a JSON line
    #[arg(long)]
    json: bool,

    /// Only translate, do not evaluate
    #[arg(long)]
    no_eval: bool,

    /// Glue numbers spoken back to back instead of rejecting them
    #[arg(long)]
    concat_numerals: bool,

    /// Config file (defaults to the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // Setup logging
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_lowercase()))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("🧮 voxcalc v{} starting...", env!("CARGO_PKG_VERSION"));

    if args.no_eval {
        config.evaluate = false;
    }
    if args.concat_numerals {
        config.adjacent_numerals = AdjacentNumerals::Concatenate;
    }
    let processor = Processor::from_config(&config)?;

    if !args.transcripts.is_empty() {
        for transcript in &args.transcripts {
            print_result(&processor.process(transcript), args.json)?;
        }
        return Ok(());
    }

    info!("✅ voxcalc ready - one transcript per line");
    let (tx, mut rx, handle) = session::spawn(processor);

    let json = args.json;
    let printer = tokio::spawn(async move {
        while let Some(result) = rx.recv().await {
            if let Err(e) = print_result(&result, json) {
                warn!("Could not print result: {}", e);
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if tx.send(line).await.is_err() {
            break;
        }
    }
    drop(tx);

    let processed = handle.await?;
    printer.await?;
    info!("👋 Processed {} transcripts", processed);
    Ok(())
}

fn print_result(result: &ProcessResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(result)?);
        return Ok(());
    }

    match result {
        ProcessResult::Computed {
            expression, result, ..
        } => println!("{} = {}", expression, result),
        ProcessResult::Parsed { expression, .. } => println!("{}", expression),
        failed => println!("error: {}", failed.message()),
    }
    Ok(())
}
