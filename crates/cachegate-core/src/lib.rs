//! Core of cachegate: capability-gated collaborator resolution and
//! idempotent lifecycle management for engine-owned resources.
//!
//! The crate owns the domain types, the port traits implemented by engine
//! adapters, and the services that drive a single bootstrap pass:
//!
//! - [`services::ConditionGate`] decides which optional subsystems activate.
//! - [`resolution::ResolutionChain`] supplies collaborators in fallback order.
//! - [`services::IndexFactory`] creates or reuses a managed search index.
//! - [`properties::PropertyAssembler`] emits the engine property set.
//! - [`services::SecurityActivation`] registers the security manager.
//!
//! Concrete adapters live in `cachegate-runtime`.

pub mod domain;
pub mod error;
pub mod ports;
pub mod properties;
pub mod resolution;
pub mod security;
pub mod services;

#[cfg(test)]
mod test_support;

// Re-export commonly used types for convenience
pub use domain::{AnalyzerRef, IndexFields, IndexHandle, ManagedIndexSpec, REGION_VALUE_FIELD};
pub use error::{ActivationError, ConfigurationError, CoreError};
pub use ports::{
    CachePort, CapabilityProbePort, ComponentRegistry, ComponentRegistryExt, NoCapabilities,
    RegionPort, RegionRef, RegistryError, SearchError, SearchServicePort, SecurityEnablementPort,
};
pub use properties::{PropertyAssembler, PropertyConfigurer, PropertySet, SecurityAttributes, TypeRef};
pub use resolution::{LookupMiss, ResolutionChain, ResolutionSource, Resolved};
pub use security::{
    AuthError, Credentials, Principal, Realm, RealmSet, SecurityManager, SecurityManagerRegistry,
    global_security_registry,
};
pub use services::{
    Bootstrap, BootstrapReport, Collaborators, ConditionGate, GateDecision, IndexFactory,
    IndexRegistry, LifecycleProcessor, SECURITY_INTEGRATION, SecurityActivation,
};

