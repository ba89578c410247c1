//! Security enforcement enablement port.
//!
//! Implemented by an engine-adapter collaborator. Core never touches engine
//! internals; it only asks the adapter to switch enforcement on.

/// Port that switches security enforcement on inside the engine.
pub trait SecurityEnablementPort: Send + Sync {
    /// Request enforcement. Returns `true` only if enforcement is now active.
    fn enable_enforcement(&self) -> bool;
}
