//! Search service port.
//!
//! The search engine owns index storage and analysis; core only governs the
//! create/lookup/destroy lifecycle of an index bound to a region.

use async_trait::async_trait;

use super::SearchError;
use crate::domain::{IndexFields, IndexHandle};

/// Port for the search engine bound to a cache.
///
/// All calls may block on the engine; timeouts are the engine's concern.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchServicePort: Send + Sync {
    /// Create an index named `name` on the region at `region_path`.
    async fn create_index(
        &self,
        name: &str,
        region_path: &str,
        fields: &IndexFields,
    ) -> Result<(), SearchError>;

    /// Fetch an existing index. A miss is `None`.
    async fn get_index(&self, name: &str, region_path: &str) -> Option<IndexHandle>;

    /// Destroy a previously created index.
    async fn destroy_index(&self, index: &IndexHandle) -> Result<(), SearchError>;
}
