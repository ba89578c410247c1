//! CLI bootstrap - the composition root.
//!
//! This is the only place where concrete adapters are instantiated:
//! - In-memory cache and search engine (via cachegate-runtime)
//! - Environment capability probe, merged with the configured integrations
//! - Static realms from the configuration document
//! - The process-wide security manager registry
//!
//! Handlers receive the composed [`CliContext`].

use std::sync::Arc;

use cachegate_core::{
    Bootstrap, CachePort, Collaborators, ManagedIndexSpec, Realm, RealmSet,
    SecurityManagerRegistry, global_security_registry,
};
use cachegate_runtime::{
    EnvCapabilityProbe, INTEGRATIONS_ENV, InMemoryCache, IntegratedSecurityFlag, StaticRealm,
    TypeMapRegistry,
};
use tracing::debug;

use crate::config::BootstrapConfig;
use crate::error::CliError;

/// Fully composed context for CLI commands.
pub struct CliContext {
    pub config: BootstrapConfig,
    /// In-memory engine the dry run works against.
    pub cache: InMemoryCache,
    /// Enforcement switch of the in-memory engine.
    pub security_flag: Arc<IntegratedSecurityFlag>,
    pub bootstrap: Bootstrap,
}

/// Compose the bootstrap for `config` around the process-wide security
/// registry.
pub fn bootstrap(config: BootstrapConfig) -> Result<CliContext, CliError> {
    compose(config, global_security_registry())
}

/// Compose the bootstrap for `config` around `security_registry`.
///
/// Every region an index names by path is created in the in-memory engine
/// first, so the dry run exercises the full create path.
pub fn compose(
    config: BootstrapConfig,
    security_registry: Arc<SecurityManagerRegistry>,
) -> Result<CliContext, CliError> {
    let cache = InMemoryCache::with_search();
    for index in &config.indexes {
        if let Some(path) = index.spec.configured_region_path() {
            cache.create_region(path);
        }
    }

    let registry = TypeMapRegistry::new();
    registry.register(
        config.component_name.clone(),
        Arc::new(cache.clone()) as Arc<dyn CachePort>,
    );
    let collaborators = Arc::new(Collaborators::new().with_registry(Arc::new(registry)));

    let security_flag = Arc::new(IntegratedSecurityFlag::new());
    let bootstrap = Bootstrap::new(
        config.component_name.clone(),
        Arc::new(probe(&config.integrations)),
        security_flag.clone(),
        security_registry,
        collaborators,
    )
    .with_realms(realms(&config))
    .with_attributes(config.security.clone());

    for index in &config.indexes {
        let spec: ManagedIndexSpec = index.spec.clone();
        let factory = bootstrap.register_index(&index.component, spec)?;
        debug!(index = ?factory.index_name(), component = %index.component, "Declared index");
    }

    Ok(CliContext {
        config,
        cache,
        security_flag,
        bootstrap,
    })
}

fn realms(config: &BootstrapConfig) -> RealmSet {
    config
        .realms
        .iter()
        .cloned()
        .map(|realm| Arc::new(StaticRealm::from(realm)) as Arc<dyn Realm>)
        .collect()
}

/// Environment probe that also reports the configured integrations.
fn probe(configured: &[String]) -> EnvCapabilityProbe {
    let configured = configured.join(",");
    EnvCapabilityProbe::new().with_env_source(move |key| {
        let from_env = std::env::var(key).ok();
        if key != INTEGRATIONS_ENV || configured.is_empty() {
            return from_env;
        }
        Some(match from_env {
            Some(list) if !list.trim().is_empty() => format!("{list},{configured}"),
            _ => configured.clone(),
        })
    })
}
