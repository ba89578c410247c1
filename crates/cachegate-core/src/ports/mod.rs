//! Port definitions (trait abstractions) for the external engine.
//!
//! Ports define the interfaces that the core expects from the cache engine,
//! the search engine, the component registry and the environment. They
//! contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No engine-specific types in any signature
//! - Lookups that may legitimately miss return `Option`
//! - Probes never fail: absence is reported as `false`

pub mod cache;
pub mod capability;
pub mod enablement;
pub mod registry;
pub mod search;

use thiserror::Error;

pub use cache::{CachePort, RegionPort, RegionRef};
pub use capability::{CapabilityProbePort, NoCapabilities};
pub use enablement::SecurityEnablementPort;
pub use registry::{ComponentRegistry, ComponentRegistryExt};
#[cfg(test)]
pub use search::MockSearchServicePort;
pub use search::SearchServicePort;

/// Errors reported by the search engine adapter.
///
/// This error type abstracts away engine implementation details and is
/// propagated unchanged out of index creation and destruction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SearchError {
    /// The engine refused to create the index.
    #[error("Failed to create index {name}: {reason}")]
    CreateFailed { name: String, reason: String },

    /// An index with the same name already exists on the region.
    #[error("Index {name} already exists on {region_path}")]
    AlreadyExists { name: String, region_path: String },

    /// The index was created but the engine did not hand it back.
    #[error("Index {name} on {region_path} is not visible after creation")]
    NotVisible { name: String, region_path: String },

    /// The engine refused to destroy the index.
    #[error("Failed to destroy index {name}: {reason}")]
    DestroyFailed { name: String, reason: String },
}

/// Errors reported by a component registry lookup.
///
/// These never leave a resolution chain; strategies treat them as misses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// More than one component of the requested type is registered.
    #[error("Multiple components registered for {0}")]
    Ambiguous(String),

    /// The registered component could not be downcast to the requested type.
    #[error("Component registered for {0} has an unexpected type")]
    TypeMismatch(String),

    /// The registry itself is not available (closed, not yet refreshed).
    #[error("Component registry unavailable: {0}")]
    Unavailable(String),
}
