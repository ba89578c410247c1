//! Available subcommands.

use clap::{Subcommand, ValueEnum};

/// Output encoding for commands that print structured data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `key=value` lines
    #[default]
    Properties,
    /// JSON document
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the engine properties the configuration produces
    Properties {
        #[arg(long, value_enum, default_value_t = OutputFormat::Properties)]
        format: OutputFormat,
    },

    /// Show which optional subsystems would activate
    Gates,

    /// Run the full bootstrap against the in-memory engine, then shut down
    Bootstrap {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}
