//! Main CLI parser and top-level argument handling.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Inspect and dry-run a cache bootstrap.
#[derive(Parser)]
#[command(name = "cachegate")]
#[command(about = "Capability-gated cache bootstrap: security activation and managed indexes")]
#[command(version)]
pub struct Cli {
    /// Bootstrap configuration document (JSON)
    #[arg(short = 'c', long = "config", env = "CACHEGATE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
