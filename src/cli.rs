//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_PATH;

#[derive(Parser)]
#[command(name = "rangewarden")]
#[command(author, version, about = "Validated catalog of crawler IP ranges")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH, global = true)]
    pub config: PathBuf,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug output)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch all sources, validate, and write the catalog
    Update {
        /// Output catalog path (overrides config)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Allow set growth beyond the anti-poisoning thresholds
        #[arg(long)]
        allow_large_delta: bool,
    },

    /// Rebuild the catalog in memory and fail if the file on disk is stale
    Check {
        /// Catalog path to compare against (overrides config)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Allow set growth beyond the anti-poisoning thresholds
        #[arg(long)]
        allow_large_delta: bool,
    },

    /// List the trusted upstream sources
    Sources,

    /// Show version
    Version,
}
