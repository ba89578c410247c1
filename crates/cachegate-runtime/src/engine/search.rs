use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use cachegate_core::{IndexFields, IndexHandle, SearchError, SearchServicePort};
use tracing::{debug, info};

use super::cache::RegionTable;

type IndexKey = (String, String);

/// Search service keeping index definitions in memory.
///
/// When bound to a region table, creating an index on an unknown region
/// fails the way a real engine would.
#[derive(Debug, Default)]
pub struct InMemorySearchService {
    regions: Option<RegionTable>,
    indexes: RwLock<BTreeMap<IndexKey, IndexHandle>>,
    create_calls: AtomicUsize,
    get_calls: AtomicUsize,
    destroy_calls: AtomicUsize,
}

impl InMemorySearchService {
    /// A service that accepts indexes on any region path.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn bound_to(regions: RegionTable) -> Self {
        Self {
            regions: Some(regions),
            ..Self::default()
        }
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub fn destroy_calls(&self) -> usize {
        self.destroy_calls.load(Ordering::SeqCst)
    }

    /// Every index currently defined, ordered by name then region path.
    pub fn indexes(&self) -> Vec<IndexHandle> {
        self.indexes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect()
    }

    fn region_exists(&self, region_path: &str) -> bool {
        self.regions.as_ref().is_none_or(|regions| {
            regions
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .contains_key(region_path)
        })
    }
}

#[async_trait]
impl SearchServicePort for InMemorySearchService {
    async fn create_index(
        &self,
        name: &str,
        region_path: &str,
        fields: &IndexFields,
    ) -> Result<(), SearchError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);

        if fields.field_names().is_empty() {
            return Err(SearchError::CreateFailed {
                name: name.to_string(),
                reason: "no fields to index".to_string(),
            });
        }
        if !self.region_exists(region_path) {
            return Err(SearchError::CreateFailed {
                name: name.to_string(),
                reason: format!("region {region_path} does not exist"),
            });
        }

        let mut indexes = self.indexes.write().unwrap_or_else(PoisonError::into_inner);
        let key = (name.to_string(), region_path.to_string());
        if indexes.contains_key(&key) {
            return Err(SearchError::AlreadyExists {
                name: name.to_string(),
                region_path: region_path.to_string(),
            });
        }
        indexes.insert(
            key,
            IndexHandle {
                name: name.to_string(),
                region_path: region_path.to_string(),
                fields: fields.clone(),
            },
        );
        info!(index = name, region = region_path, fields = ?fields.field_names(), "Created index");
        Ok(())
    }

    async fn get_index(&self, name: &str, region_path: &str) -> Option<IndexHandle> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        let found = self
            .indexes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(name.to_string(), region_path.to_string()))
            .cloned();
        debug!(index = name, region = region_path, found = found.is_some(), "Index lookup");
        found
    }

    async fn destroy_index(&self, index: &IndexHandle) -> Result<(), SearchError> {
        self.destroy_calls.fetch_add(1, Ordering::SeqCst);
        self.indexes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&(index.name.clone(), index.region_path.clone()))
            .map(|_| ())
            .ok_or_else(|| SearchError::DestroyFailed {
                name: index.name.clone(),
                reason: format!("no such index on {}", index.region_path),
            })
    }
}
