//! Resolution chains for the collaborators a managed index depends on.
//!
//! | collaborator   | strategies, in order                                        |
//! |----------------|-------------------------------------------------------------|
//! | cache          | explicit, registry                                          |
//! | search service | explicit, registry, cache accessor                          |
//! | region         | explicit reference, cache lookup by configured path         |
//! | region path    | resolved region's full path, configured path, else error    |
//!
//! Explicit values are set-once: after they are set every query returns
//! them. Without an explicit value each query re-runs the chain, because
//! registry contents may change between calls.

use std::any::Any;
use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::domain::ManagedIndexSpec;
use crate::error::ConfigurationError;
use crate::ports::{CachePort, ComponentRegistry, ComponentRegistryExt, RegionRef, SearchServicePort};
use crate::resolution::{LookupMiss, ResolutionChain, ResolutionSource, Resolved};

/// Shared resolver for the cache, search service and region of an index.
#[derive(Default)]
pub struct Collaborators {
    cache: OnceLock<Arc<dyn CachePort>>,
    search_service: OnceLock<Arc<dyn SearchServicePort>>,
    registry: Option<Arc<dyn ComponentRegistry>>,
}

impl Collaborators {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_registry(mut self, registry: Arc<dyn ComponentRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    #[must_use]
    pub fn with_cache(self, cache: Arc<dyn CachePort>) -> Self {
        self.set_cache(cache);
        self
    }

    #[must_use]
    pub fn with_search_service(self, service: Arc<dyn SearchServicePort>) -> Self {
        self.set_search_service(service);
        self
    }

    /// Inject the cache. Returns `false` if one was already injected.
    pub fn set_cache(&self, cache: Arc<dyn CachePort>) -> bool {
        self.cache.set(cache).is_ok()
    }

    /// Inject the search service. Returns `false` if one was already injected.
    pub fn set_search_service(&self, service: Arc<dyn SearchServicePort>) -> bool {
        self.search_service.set(service).is_ok()
    }

    pub fn resolve_cache(&self) -> Option<Resolved<Arc<dyn CachePort>>> {
        ResolutionChain::new("cache")
            .then_value(ResolutionSource::Explicit, self.cache.get().cloned())
            .then(ResolutionSource::Registry, || {
                self.lookup_registry::<Arc<dyn CachePort>>()
            })
            .resolve()
    }

    pub fn resolve_search_service(&self) -> Option<Resolved<Arc<dyn SearchServicePort>>> {
        ResolutionChain::new("search service")
            .then_value(ResolutionSource::Explicit, self.search_service.get().cloned())
            .then(ResolutionSource::Registry, || {
                self.lookup_registry::<Arc<dyn SearchServicePort>>()
            })
            .then(ResolutionSource::CacheAccessor, || {
                Ok(self
                    .resolve_cache()
                    .and_then(|cache| cache.value.search_service()))
            })
            .resolve()
    }

    /// The explicit region reference wins; otherwise look the configured
    /// path up in the resolved cache. A blank path or absent cache is a miss.
    pub fn resolve_region(&self, spec: &ManagedIndexSpec) -> Option<Resolved<RegionRef>> {
        ResolutionChain::new("region")
            .then_value(ResolutionSource::Explicit, spec.region.clone())
            .then(ResolutionSource::CacheLookup, || {
                let Some(path) = spec.configured_region_path() else {
                    return Ok(None);
                };
                Ok(self
                    .resolve_cache()
                    .and_then(|cache| cache.value.region_by_path(path)))
            })
            .resolve()
    }

    /// The resolved region's canonical path wins over the configured literal.
    pub fn resolve_region_path(
        &self,
        spec: &ManagedIndexSpec,
    ) -> Result<Resolved<String>, ConfigurationError> {
        ResolutionChain::new("region path")
            .then(ResolutionSource::RegionFullPath, || {
                Ok(self
                    .resolve_region(spec)
                    .map(|region| region.value.full_path()))
            })
            .then(ResolutionSource::ConfiguredPath, || {
                Ok(spec.configured_region_path().map(str::to_string))
            })
            .resolve_or(|| ConfigurationError::MissingRegion)
    }

    fn lookup_registry<T>(&self) -> Result<Option<T>, LookupMiss>
    where
        T: Any + Clone + Send + Sync,
    {
        let Some(registry) = &self.registry else {
            return Ok(None);
        };
        registry
            .lookup::<T>()
            .map_err(|err| LookupMiss::new(ResolutionSource::Registry, err))
    }
}

impl fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collaborators")
            .field("explicit_cache", &self.cache.get().is_some())
            .field("explicit_search_service", &self.search_service.get().is_some())
            .field("registry", &self.registry.is_some())
            .finish()
    }
}
