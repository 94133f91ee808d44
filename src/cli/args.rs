//! Command line argument parsing for the docviews CLI using clap.

use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::view::ViewKey;

/// docviews - inspect derived views over a document store export
#[derive(Parser, Debug, Clone)]
#[command(name = "docviews")]
#[command(about = "Derived-index views for a channel-partitioned document store")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct DocviewsArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Configuration file (JSON)
    #[arg(short, long, env = "DOCVIEWS_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl DocviewsArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List registered views
    Views,

    /// Print the design document describing the registered views
    #[command(name = "design-doc")]
    DesignDoc,

    /// Show the entries each document emits
    Emit(EmitArgs),

    /// Build the views from a JSONL export and scan one of them
    Query(QueryArgs),

    /// List soft-deleted documents old enough to purge
    #[command(name = "purge-candidates")]
    PurgeCandidates(PurgeArgs),
}

/// Arguments for emitting entries
#[derive(Parser, Debug, Clone)]
pub struct EmitArgs {
    /// Documents file (JSONL)
    #[arg(value_name = "DOCUMENT_FILE")]
    pub input: PathBuf,

    /// Restrict output to one view
    #[arg(long)]
    pub view: Option<String>,

    /// Also list documents that emit nothing
    #[arg(long)]
    pub include_empty: bool,
}

/// Arguments for querying a view
#[derive(Parser, Debug, Clone)]
pub struct QueryArgs {
    /// Documents file (JSONL)
    #[arg(value_name = "DOCUMENT_FILE")]
    pub input: PathBuf,

    /// View to scan
    #[arg(value_name = "VIEW")]
    pub view: String,

    /// Exact key (JSON, or a bare string)
    #[arg(long)]
    pub key: Option<ViewKey>,

    /// Lowest key returned
    #[arg(long)]
    pub start_key: Option<ViewKey>,

    /// Highest key returned
    #[arg(long)]
    pub end_key: Option<ViewKey>,

    /// Leave `end_key` itself out
    #[arg(long)]
    pub exclusive_end: bool,

    /// Leading key components every row must share
    #[arg(long)]
    pub prefix: Option<ViewKey>,

    /// Return rows in descending key order
    #[arg(long)]
    pub descending: bool,

    /// Maximum number of rows
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for selecting purge candidates
#[derive(Parser, Debug, Clone)]
pub struct PurgeArgs {
    /// Documents file (JSONL)
    #[arg(value_name = "DOCUMENT_FILE")]
    pub input: PathBuf,

    /// Days a soft-deleted document is kept (overrides the config file)
    #[arg(long)]
    pub retention_days: Option<i64>,

    /// Reference time, RFC 3339 or YYYY-MM-DD (defaults to now)
    #[arg(long, value_parser = parse_now)]
    pub now: Option<DateTime<Utc>>,
}

/// Parse `--now` as an RFC 3339 timestamp or a plain UTC date.
pub fn parse_now(value: &str) -> std::result::Result<DateTime<Utc>, String> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("expected RFC 3339 timestamp or YYYY-MM-DD, got {value}"))
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
