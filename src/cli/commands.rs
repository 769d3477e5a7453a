//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Paginated listing client for the telephony REST API
#[derive(Parser, Debug)]
#[command(name = "restpage")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// API base URL, overriding config and environment
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the notifications of a call
    Notifications {
        /// Account SID (defaults to the configured account)
        #[arg(long)]
        account_sid: Option<String>,

        /// Call SID
        #[arg(long)]
        call_sid: String,

        /// Only notifications with this log level (0 = error, 1 = warning)
        #[arg(long)]
        log: Option<i32>,

        /// Only notifications from this date (YYYY-MM-DD)
        #[arg(long)]
        message_date: Option<String>,

        /// Records per page
        #[arg(long)]
        page_size: Option<u32>,

        /// Maximum records to print
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Print the effective configuration
    Config,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one record per line)
    Json,
    /// Indented JSON
    Pretty,
}
