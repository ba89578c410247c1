//! Hand-rolled collaborators shared by unit tests.

use std::any::{Any, TypeId};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::{IndexFields, IndexHandle};
use crate::ports::{
    CachePort, ComponentRegistry, RegionPort, RegionRef, RegistryError, SearchError,
    SearchServicePort,
};

#[derive(Debug)]
pub struct StubRegion {
    pub name: String,
    pub full_path: String,
}

impl StubRegion {
    pub fn at(full_path: &str) -> Arc<Self> {
        let name = full_path.rsplit('/').next().unwrap_or(full_path).to_string();
        Arc::new(Self {
            name,
            full_path: full_path.to_string(),
        })
    }
}

impl RegionPort for StubRegion {
    fn name(&self) -> &str {
        &self.name
    }

    fn full_path(&self) -> String {
        self.full_path.clone()
    }
}

/// Cache with a fixed region table and an optional bound search service.
#[derive(Default)]
pub struct StubCache {
    pub regions: HashMap<String, RegionRef>,
    pub search: Option<Arc<dyn SearchServicePort>>,
    pub region_lookups: AtomicUsize,
    pub service_lookups: AtomicUsize,
}

impl StubCache {
    pub fn with_region(mut self, region: RegionRef) -> Self {
        self.regions.insert(region.full_path(), region);
        self
    }

    pub fn with_search(mut self, search: Arc<dyn SearchServicePort>) -> Self {
        self.search = Some(search);
        self
    }
}

impl CachePort for StubCache {
    fn region_by_path(&self, path: &str) -> Option<RegionRef> {
        self.region_lookups.fetch_add(1, Ordering::SeqCst);
        self.regions.get(path).cloned()
    }

    fn search_service(&self) -> Option<Arc<dyn SearchServicePort>> {
        self.service_lookups.fetch_add(1, Ordering::SeqCst);
        self.search.clone()
    }
}

/// Type-keyed registry; `fail` makes every lookup error out.
#[derive(Default)]
pub struct MapRegistry {
    pub components: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
    pub fail: bool,
    pub lookups: AtomicUsize,
}

impl MapRegistry {
    pub fn with<T: Any + Send + Sync>(mut self, component: T) -> Self {
        self.components.insert(TypeId::of::<T>(), Arc::new(component));
        self
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

impl ComponentRegistry for MapRegistry {
    fn lookup_any(
        &self,
        type_id: TypeId,
        type_name: &'static str,
    ) -> Result<Option<Arc<dyn Any + Send + Sync>>, RegistryError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(RegistryError::Unavailable(format!("no bean of type {type_name}")));
        }
        Ok(self.components.get(&type_id).cloned())
    }
}

/// Search service that records every call.
#[derive(Default)]
pub struct RecordingSearch {
    pub indexes: Mutex<BTreeMap<(String, String), IndexHandle>>,
    pub created: Mutex<Vec<(String, String, IndexFields)>>,
    pub destroyed: Mutex<Vec<IndexHandle>>,
    pub gets: AtomicUsize,
    pub fail_create: bool,
}

impl RecordingSearch {
    pub fn create_calls(&self) -> usize {
        self.created.lock().unwrap().len()
    }

    pub fn destroy_calls(&self) -> usize {
        self.destroyed.lock().unwrap().len()
    }
}

#[async_trait]
impl SearchServicePort for RecordingSearch {
    async fn create_index(
        &self,
        name: &str,
        region_path: &str,
        fields: &IndexFields,
    ) -> Result<(), SearchError> {
        tokio::task::yield_now().await;
        self.created
            .lock()
            .unwrap()
            .push((name.to_string(), region_path.to_string(), fields.clone()));
        if self.fail_create {
            return Err(SearchError::CreateFailed {
                name: name.to_string(),
                reason: "engine refused".to_string(),
            });
        }
        self.indexes.lock().unwrap().insert(
            (name.to_string(), region_path.to_string()),
            IndexHandle {
                name: name.to_string(),
                region_path: region_path.to_string(),
                fields: fields.clone(),
            },
        );
        Ok(())
    }

    async fn get_index(&self, name: &str, region_path: &str) -> Option<IndexHandle> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        self.indexes
            .lock()
            .unwrap()
            .get(&(name.to_string(), region_path.to_string()))
            .cloned()
    }

    async fn destroy_index(&self, index: &IndexHandle) -> Result<(), SearchError> {
        self.destroyed.lock().unwrap().push(index.clone());
        self.indexes
            .lock()
            .unwrap()
            .remove(&(index.name.clone(), index.region_path.clone()));
        Ok(())
    }
}
