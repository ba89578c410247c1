//! Core services - the bootstrap orchestration layer.
//!
//! Services here orchestrate between ports (trait interfaces) and domain
//! logic. They don't know about concrete engine implementations.

mod bootstrap;
mod collaborators;
mod gate;
mod index_factory;
mod index_registry;
mod lifecycle;
mod security_activation;

pub use bootstrap::{Bootstrap, BootstrapReport};
pub use collaborators::Collaborators;
pub use gate::{ConditionGate, GateDecision, SECURITY_INTEGRATION};
pub use index_factory::IndexFactory;
pub use index_registry::IndexRegistry;
pub use lifecycle::LifecycleProcessor;
pub use security_activation::SecurityActivation;
