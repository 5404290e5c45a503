use anyhow::Result;
use clap::{Parser, Subcommand};
use sift_core::{DocumentId, DocumentStatus};
use tracing_subscriber::{fmt, EnvFilter};

use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sift")]
#[command(about = "Search a set of documents with TF-IDF ranking", long_about = None)]
struct Cli {
    /// Input path (.json/.jsonl file or a directory of them)
    #[arg(long)]
    input: PathBuf,
    /// Space-separated stop words
    #[arg(long, default_value = "")]
    stop_words: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the top documents for each query
    Search {
        #[arg(required = true)]
        queries: Vec<String>,
        /// Only documents with this status
        #[arg(long, default_value = "actual", conflicts_with = "batch")]
        status: DocumentStatus,
        #[arg(long, default_value_t = 2, conflicts_with = "batch")]
        page_size: usize,
        /// Run all queries in parallel and print JSON (status `actual` only, no paging)
        #[arg(long, default_value_t = false)]
        batch: bool,
    },
    /// Show which query words a document contains
    Match {
        query: String,
        #[arg(long)]
        id: DocumentId,
        #[arg(long, default_value_t = false)]
        parallel: bool,
    },
    /// Remove documents with the same word set as an earlier one
    Dedup,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();
    let server = sift_cli::build_server(&cli.input, &cli.stop_words)?;
    let mut out = io::stdout().lock();

    match cli.command {
        Commands::Search { queries, batch: true, .. } => sift_cli::search_batch(&server, &queries, &mut out),
        Commands::Search { queries, status, page_size, batch: false } => {
            sift_cli::search(&server, &queries, status, page_size, &mut out)
        }
        Commands::Match { query, id, parallel } => sift_cli::match_document(&server, &query, id, parallel, &mut out),
        Commands::Dedup => sift_cli::dedup(&server, &mut out),
    }
}
