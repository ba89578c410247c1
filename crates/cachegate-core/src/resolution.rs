//! Ordered fallback resolution of required collaborators.
//!
//! A [`ResolutionChain`] holds strategies in priority order. The first
//! strategy that produces a value wins and later strategies never run.
//! Strategies report a plain miss as `Ok(None)` and a collaborator failure as
//! [`LookupMiss`]; both fall through to the next strategy, and neither is ever
//! surfaced to callers.

use std::fmt;

use thiserror::Error;
use tracing::debug;

use crate::error::ConfigurationError;

/// Which strategy produced a resolved value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionSource {
    /// A value injected explicitly by the composition root.
    Explicit,
    /// Lookup-by-type in the component registry.
    Registry,
    /// Derived from the resolved cache handle's built-in accessor.
    CacheAccessor,
    /// Looked up by path against the resolved cache.
    CacheLookup,
    /// Canonical full path of an already-resolved region.
    RegionFullPath,
    /// Literal path from configuration.
    ConfiguredPath,
}

impl fmt::Display for ResolutionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Explicit => "explicit",
            Self::Registry => "registry",
            Self::CacheAccessor => "cache-accessor",
            Self::CacheLookup => "cache-lookup",
            Self::RegionFullPath => "region-full-path",
            Self::ConfiguredPath => "configured-path",
        };
        f.write_str(label)
    }
}

/// A resolved collaborator tagged with the strategy that produced it.
#[derive(Debug, Clone)]
pub struct Resolved<T> {
    pub value: T,
    pub source: ResolutionSource,
}

impl<T> Resolved<T> {
    pub const fn new(value: T, source: ResolutionSource) -> Self {
        Self { value, source }
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

/// A strategy failed in a way the chain recovers from.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{strategy} lookup failed: {reason}")]
pub struct LookupMiss {
    pub strategy: ResolutionSource,
    pub reason: String,
}

impl LookupMiss {
    pub fn new(strategy: ResolutionSource, reason: impl fmt::Display) -> Self {
        Self {
            strategy,
            reason: reason.to_string(),
        }
    }
}

type Strategy<'a, T> = Box<dyn Fn() -> Result<Option<T>, LookupMiss> + 'a>;

/// Ordered list of lookup strategies for one collaborator.
pub struct ResolutionChain<'a, T> {
    what: &'static str,
    strategies: Vec<(ResolutionSource, Strategy<'a, T>)>,
}

impl<'a, T> ResolutionChain<'a, T> {
    /// Start an empty chain for the collaborator named `what`.
    pub fn new(what: &'static str) -> Self {
        Self {
            what,
            strategies: Vec::new(),
        }
    }

    /// Append a strategy. Strategies run in the order they were added.
    #[must_use]
    pub fn then<F>(mut self, source: ResolutionSource, strategy: F) -> Self
    where
        F: Fn() -> Result<Option<T>, LookupMiss> + 'a,
    {
        self.strategies.push((source, Box::new(strategy)));
        self
    }

    /// Append a strategy that always yields `value` when present.
    #[must_use]
    pub fn then_value(self, source: ResolutionSource, value: Option<T>) -> Self
    where
        T: Clone + 'a,
    {
        self.then(source, move || Ok(value.clone()))
    }

    /// Run the strategies in order and return the first hit.
    pub fn resolve(&self) -> Option<Resolved<T>> {
        for (source, strategy) in &self.strategies {
            match strategy() {
                Ok(Some(value)) => {
                    debug!(what = self.what, %source, "Resolved collaborator");
                    return Some(Resolved::new(value, *source));
                }
                Ok(None) => debug!(what = self.what, %source, "Strategy missed"),
                Err(miss) => debug!(what = self.what, error = %miss, "Strategy failed, trying next"),
            }
        }
        debug!(what = self.what, "Resolution chain exhausted");
        None
    }

    /// Like [`resolve`](Self::resolve), but exhaustion is a configuration error.
    pub fn resolve_or(
        &self,
        exhausted: impl FnOnce() -> ConfigurationError,
    ) -> Result<Resolved<T>, ConfigurationError> {
        self.resolve().ok_or_else(exhausted)
    }
}

impl<T> fmt::Debug for ResolutionChain<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolutionChain")
            .field("what", &self.what)
            .field(
                "strategies",
                &self.strategies.iter().map(|(source, _)| *source).collect::<Vec<_>>(),
            )
            .finish()
    }
}
