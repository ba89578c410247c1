use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use cachegate_core::{CachePort, RegionPort, RegionRef, SearchServicePort};
use tracing::debug;

use super::{InMemorySearchService, normalize_path};

pub(crate) type RegionTable = Arc<RwLock<BTreeMap<String, Arc<InMemoryRegion>>>>;

#[derive(Debug)]
pub struct InMemoryRegion {
    name: String,
    full_path: String,
}

impl RegionPort for InMemoryRegion {
    fn name(&self) -> &str {
        &self.name
    }

    fn full_path(&self) -> String {
        self.full_path.clone()
    }
}

/// Region table plus an optional search service.
#[derive(Debug, Clone)]
pub struct InMemoryCache {
    regions: RegionTable,
    search: Option<Arc<InMemorySearchService>>,
}

impl InMemoryCache {
    /// A cache without a search service.
    pub fn new() -> Self {
        Self {
            regions: Arc::default(),
            search: None,
        }
    }

    /// A cache whose search service validates regions against this cache.
    pub fn with_search() -> Self {
        let regions = RegionTable::default();
        let search = Arc::new(InMemorySearchService::bound_to(Arc::clone(&regions)));
        Self {
            regions,
            search: Some(search),
        }
    }

    /// Create the region at `path` (and any missing parents).
    ///
    /// Returns `None` for a blank path. Creating an existing region returns it.
    pub fn create_region(&self, path: &str) -> Option<Arc<InMemoryRegion>> {
        let full_path = normalize_path(path)?;
        let mut regions = self.regions.write().unwrap_or_else(PoisonError::into_inner);

        let mut current = String::new();
        let mut region = None;
        for segment in full_path.trim_start_matches('/').split('/') {
            current.push('/');
            current.push_str(segment);
            let entry = regions.entry(current.clone()).or_insert_with(|| {
                debug!(region = %current, "Created region");
                Arc::new(InMemoryRegion {
                    name: segment.to_string(),
                    full_path: current.clone(),
                })
            });
            region = Some(Arc::clone(entry));
        }
        region
    }

    pub fn region_paths(&self) -> Vec<String> {
        self.regions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    /// The concrete search service, for call-count inspection.
    pub fn search(&self) -> Option<&Arc<InMemorySearchService>> {
        self.search.as_ref()
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl CachePort for InMemoryCache {
    fn region_by_path(&self, path: &str) -> Option<RegionRef> {
        let key = normalize_path(path)?;
        let region: RegionRef = self
            .regions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned()?;
        Some(region)
    }

    fn search_service(&self) -> Option<Arc<dyn SearchServicePort>> {
        self.search
            .clone()
            .map(|search| search as Arc<dyn SearchServicePort>)
    }
}
