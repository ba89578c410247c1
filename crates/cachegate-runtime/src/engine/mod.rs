//! In-process cache and search engine.
//!
//! Regions live in a shared table so the search service can refuse indexes
//! on regions that do not exist. Every search call is counted.

mod cache;
mod search;

pub use cache::{InMemoryCache, InMemoryRegion};
pub use search::InMemorySearchService;

/// Canonical form of a region path: leading `/`, no trailing `/`, no empty
/// segments.
pub(crate) fn normalize_path(path: &str) -> Option<String> {
    let segments: Vec<&str> = path
        .split('/')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if segments.is_empty() {
        return None;
    }
    Some(format!("/{}", segments.join("/")))
}
