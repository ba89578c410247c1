//! Error kinds surfaced by the bootstrap services.
//!
//! Lookup misses inside a resolution chain are deliberately absent here:
//! they are recovered locally (see [`crate::resolution::LookupMiss`]) and only
//! chain exhaustion is reported, as a [`ConfigurationError`].

use thiserror::Error;

use crate::ports::SearchError;

/// A required attribute is missing, blank, or could not be resolved.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    /// A required attribute was blank or never set.
    #[error("{field} was not properly initialized")]
    MissingField { field: &'static str },

    /// Neither a region reference nor a region path was configured.
    #[error("Either region or region_path must be specified")]
    MissingRegion,

    /// Every strategy of a resolution chain missed.
    #[error("No {what} could be resolved")]
    Unresolved { what: &'static str },
}

/// Security activation failed and bootstrap must abort.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ActivationError {
    /// A security manager was already registered in the registry.
    #[error("A security manager is already registered")]
    AlreadyRegistered,

    /// The manager was registered but the engine refused to enforce security.
    #[error("Failed to enable security enforcement in the cache engine")]
    EnforcementNotEnabled,

    /// A realm failed its lifecycle initialization.
    #[error("Realm {realm} failed to initialize: {reason}")]
    RealmInit { realm: String, reason: String },
}

/// Canonical error for the bootstrap pass.
///
/// Adapters map this to their own error types (CLI exit codes, etc.).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Required configuration was missing or unresolvable.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Security activation failed.
    #[error(transparent)]
    Activation(#[from] ActivationError),

    /// The search engine rejected an index operation.
    #[error(transparent)]
    Search(#[from] SearchError),
}
