//! Cache engine port.
//!
//! The cache itself (regions, replication, eviction) is owned by the engine.
//! Core only needs to look regions up by path and reach the search service
//! the engine exposes.

use std::fmt;
use std::sync::Arc;

use super::SearchServicePort;

/// A region handle owned by the cache engine.
pub trait RegionPort: Send + Sync + fmt::Debug {
    /// Simple name of the region (last path segment).
    fn name(&self) -> &str;

    /// Canonical full path, e.g. `/Parent/Child`.
    fn full_path(&self) -> String;
}

/// Shared reference to an engine region.
pub type RegionRef = Arc<dyn RegionPort>;

/// Handle to a running cache.
pub trait CachePort: Send + Sync {
    /// Look up a region by path. A miss is `None`, never an error.
    fn region_by_path(&self, path: &str) -> Option<RegionRef>;

    /// The search service bound to this cache, if the engine provides one.
    fn search_service(&self) -> Option<Arc<dyn SearchServicePort>>;
}
