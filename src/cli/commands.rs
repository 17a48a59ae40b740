use clap::builder::RangedU64ValueParser;
use clap::Parser;
use std::path::PathBuf;

/// With no arguments: ingest the built-in corpus and run the built-in queries.
#[derive(Parser, Debug)]
#[command(name = "semsearch", about = "Semantic search over a vector index")]
pub struct Cli {
    /// Matches to show per query
    #[arg(long, default_value = "2", value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub top_k: usize,
    /// Query to run instead of the built-in ones (repeatable)
    #[arg(long = "query")]
    pub queries: Vec<String>,
    /// JSON file with an array of {"id", "text"} documents
    #[arg(long)]
    pub documents: Option<PathBuf>,
    /// Delete the index after querying
    #[arg(long)]
    pub teardown: bool,
    /// Delete an existing index and create it again before ingesting
    #[arg(long)]
    pub recreate: bool,
}
