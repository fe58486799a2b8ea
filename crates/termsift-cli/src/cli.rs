//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use termsift::MatchType;

/// termsift: collect negative keywords from a search-terms report
#[derive(Parser)]
#[command(name = "termsift")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the detected phrase column and the words of each row
    Inspect {
        /// Path to the report (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Number of rows to show
        #[arg(short, long, default_value = "20")]
        limit: usize,

        /// Field delimiter (default: auto-detect)
        #[arg(short, long, value_parser = parse_delimiter)]
        delimiter: Option<u8>,
    },

    /// Build a negative keyword list from a report and print it
    Export {
        /// Path to the report (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Add the whole phrase of this row (repeatable)
        #[arg(long = "row", value_name = "ROW_ID")]
        rows: Vec<u64>,

        /// Toggle a single word (repeatable)
        #[arg(long = "word", value_name = "WORD")]
        words: Vec<String>,

        /// Add a term as exact match (repeatable)
        #[arg(long, value_name = "TEXT")]
        exact: Vec<String>,

        /// Add a term as phrase match (repeatable)
        #[arg(long, value_name = "TEXT")]
        phrase: Vec<String>,

        /// Add a term as broad match (repeatable)
        #[arg(long, value_name = "TEXT")]
        broad: Vec<String>,

        /// Match type for whole-row phrases
        #[arg(long, default_value = "exact")]
        row_match: MatchType,

        /// Match type for toggled words
        #[arg(long, default_value = "broad")]
        word_match: MatchType,

        /// Write the list to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output the negative items as JSON
        #[arg(long)]
        json: bool,

        /// Field delimiter (default: auto-detect)
        #[arg(short, long, value_parser = parse_delimiter)]
        delimiter: Option<u8>,
    },

    /// Start the review API for interactive negative collection
    Review {
        /// Report to load at startup
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Port for web server
        #[arg(short, long, default_value = "3141")]
        port: u16,
    },
}

/// Parse a single-byte delimiter, accepting `tab` and `\t` for tabs.
fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        _ => match s.as_bytes() {
            [b] if b.is_ascii() => Ok(*b),
            _ => Err(format!("Delimiter must be a single ASCII character, got '{}'", s)),
        },
    }
}
