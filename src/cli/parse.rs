//! CLI parse: clap types for gcp-assist. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// gcp-assist CLI - natural-language front-end for gcloud and bq
#[derive(Debug, Parser)]
#[command(name = "gcp-assist")]
#[command(about = "Run Google Cloud operations from plain-English or CLI-style requests")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (searched for config/config.toml)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (when output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Answer one request (flags go before the request text)
    Ask {
        /// Print the structured reply as JSON
        #[arg(long)]
        json: bool,
        /// The request, e.g. "list instances in project alpha"
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        query: Vec<String>,
    },
    /// Show what a request would run without running it
    Plan {
        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
        /// The request to plan
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        query: Vec<String>,
    },
    /// List the supported operations
    Operations {
        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
    /// Show the resolved configuration (API key masked)
    Config {
        /// Output format (text, json or toml)
        #[arg(long, default_value = "text", value_parser = ["text", "json", "toml"])]
        format: String,
    },
    /// Answer requests read line by line from stdin
    Shell,
}
