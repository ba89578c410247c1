//! CLI-specific error types and mappings.
//!
//! Maps core errors to exit codes and user-facing messages.

use cachegate_core::{ActivationError, ConfigurationError, CoreError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Core domain error without a more specific category.
    #[error("{0}")]
    Core(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Security activation failed.
    #[error("Security activation failed: {0}")]
    Activation(String),

    /// The search engine rejected an index operation.
    #[error("Search engine error: {0}")]
    Search(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Core(_) => 1,
            Self::Search(_) => 69,     // EX_UNAVAILABLE
            Self::Activation(_) => 77, // EX_NOPERM
            Self::Io(_) => 74,         // EX_IOERR
            Self::Config(_) => 78,     // EX_CONFIG
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Configuration(err) => err.into(),
            CoreError::Activation(err) => err.into(),
            CoreError::Search(err) => Self::Search(err.to_string()),
        }
    }
}

impl From<ConfigurationError> for CliError {
    fn from(err: ConfigurationError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<ActivationError> for CliError {
    fn from(err: ActivationError) -> Self {
        Self::Activation(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            Self::Io(err.to_string())
        } else {
            Self::Config(err.to_string())
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
