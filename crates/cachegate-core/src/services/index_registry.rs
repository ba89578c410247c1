//! Process-lifetime registry of managed index factories, keyed by name.

use std::sync::{Arc, Mutex, PoisonError};

use indexmap::IndexMap;
use tracing::warn;

use crate::domain::{IndexHandle, ManagedIndexSpec};
use crate::error::{ConfigurationError, CoreError};

use super::{Collaborators, IndexFactory};

/// Memoizes one [`IndexFactory`] per resolved index name.
///
/// Registering the same name twice returns the first factory, so a name is
/// created at most once no matter how many components declare it.
#[derive(Debug)]
pub struct IndexRegistry {
    collaborators: Arc<Collaborators>,
    factories: Mutex<IndexMap<String, Arc<IndexFactory>>>,
}

impl IndexRegistry {
    pub fn new(collaborators: Arc<Collaborators>) -> Self {
        Self {
            collaborators,
            factories: Mutex::new(IndexMap::new()),
        }
    }

    pub const fn collaborators(&self) -> &Arc<Collaborators> {
        &self.collaborators
    }

    /// Register `spec` under `component_name`.
    ///
    /// The index name is validated here so a blank name fails before any
    /// resolution happens.
    pub fn register(
        &self,
        component_name: &str,
        spec: ManagedIndexSpec,
    ) -> Result<Arc<IndexFactory>, ConfigurationError> {
        let factory = IndexFactory::new(spec, Arc::clone(&self.collaborators))
            .with_component_name(component_name);
        let name = factory.index_name()?;

        let mut factories = self.factories.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = factories.get(&name) {
            if !existing.spec().same_definition(factory.spec()) {
                warn!(
                    index = %name,
                    component = component_name,
                    "Index already declared with a different definition, keeping the first"
                );
            }
            return Ok(Arc::clone(existing));
        }
        let factory = Arc::new(factory);
        factories.insert(name, Arc::clone(&factory));
        Ok(factory)
    }

    pub fn get(&self, index_name: &str) -> Option<Arc<IndexFactory>> {
        self.factories
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(index_name)
            .cloned()
    }

    pub fn names(&self) -> Vec<String> {
        self.factories
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    fn snapshot(&self) -> Vec<Arc<IndexFactory>> {
        self.factories
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect()
    }

    /// Ensure every registered index in registration order.
    ///
    /// Stops at the first failure; indexes ensured so far stay bound.
    pub async fn ensure_all(&self) -> Result<Vec<IndexHandle>, CoreError> {
        let mut handles = Vec::new();
        for factory in self.snapshot() {
            handles.push(factory.ensure().await?);
        }
        Ok(handles)
    }

    /// Destroy every index in reverse registration order.
    ///
    /// Keeps going past failures and reports the first one.
    pub async fn destroy_all(&self) -> Result<(), CoreError> {
        let mut first_error = None;
        for factory in self.snapshot().into_iter().rev() {
            if let Err(err) = factory.destroy().await {
                warn!(index = %factory.display_name(), error = %err, "Failed to destroy index");
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}
