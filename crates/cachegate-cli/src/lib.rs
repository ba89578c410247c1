#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

//! Command-line adapter for cachegate.
//!
//! `main.rs` parses arguments and hands off to [`bootstrap::bootstrap`], the
//! composition root, then dispatches to [`handlers`].

// Used only by the binary target (and async tests)
use anyhow as _;
use dotenvy as _;
use tokio as _;
use tracing_subscriber as _;

#[cfg(test)]
use tempfile as _;

pub mod bootstrap;
pub mod commands;
pub mod config;
pub mod error;
pub mod handlers;
pub mod parser;

// Re-export primary types for convenient access
pub use bootstrap::{CliContext, bootstrap, compose};
pub use commands::{Commands, OutputFormat};
pub use config::{BootstrapConfig, IndexDeclaration};
pub use error::CliError;
pub use parser::Cli;
