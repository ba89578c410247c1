//! Adapters implementing the `cachegate-core` ports.
//!
//! - [`probe::EnvCapabilityProbe`] detects optional integrations from the
//!   environment and `PATH`.
//! - [`engine`] is an in-process cache and search engine, used for dry runs
//!   and tests.
//! - [`registry::TypeMapRegistry`] is a type-keyed component registry.
//! - [`enablement::IntegratedSecurityFlag`] is the enforcement switch of the
//!   in-process engine.
//! - [`realm::StaticRealm`] authenticates against a fixed credential table.

#![deny(unsafe_code)]

pub mod enablement;
pub mod engine;
pub mod probe;
pub mod realm;
pub mod registry;

pub use enablement::IntegratedSecurityFlag;
pub use engine::{InMemoryCache, InMemoryRegion, InMemorySearchService};
pub use probe::{CapabilityDescriptor, Detection, EnvCapabilityProbe, INTEGRATIONS_ENV};
pub use realm::{StaticRealm, StaticRealmConfig};
pub use registry::TypeMapRegistry;
