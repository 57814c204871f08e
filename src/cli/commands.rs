//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Folio pagination CLI
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Pagination config file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print one page of a JSON array of documents
    Page {
        /// File holding a JSON array of documents
        documents: PathBuf,

        /// File holding a JSON array of aggregation stages
        #[arg(long)]
        pipeline: Option<PathBuf>,

        /// Inline filter JSON (find queries only)
        #[arg(long, conflicts_with = "pipeline")]
        filter: Option<String>,

        /// 1-based page number
        #[arg(long)]
        page: Option<u64>,

        /// Items per page
        #[arg(long)]
        size: Option<u64>,

        /// Maximum number of items
        #[arg(long)]
        limit: Option<u64>,

        /// Number of items to skip
        #[arg(long)]
        offset: Option<u64>,

        /// Cursor token from a previous page
        #[arg(long)]
        cursor: Option<String>,

        /// Compute the total number of matches
        #[arg(long)]
        include_total: Option<bool>,

        /// Type of the key field
        #[arg(long, default_value = "object-id")]
        key_type: KeyType,
    },

    /// Print the effective pagination config
    Config,
}

/// Key field type
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum KeyType {
    /// 12-byte ObjectId
    ObjectId,
    /// 64-bit integer
    Int,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON
    Json,
    /// Indented JSON
    Pretty,
}
