//! Capability probe port for optional integration detection.
//!
//! # Design Notes
//!
//! - Core owns the trait (pure)
//! - Runtime owns the implementation (environment and `PATH` probing)
//! - Implementations fail closed: any doubt means "absent"

/// Port answering "is optional integration X available here?".
pub trait CapabilityProbePort: Send + Sync {
    /// Best-effort detection of the named capability.
    ///
    /// Must never panic. Unknown capabilities and detection errors both
    /// report `false`.
    fn is_present(&self, capability: &str) -> bool;
}

/// Probe that reports every capability as absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCapabilities;

impl CapabilityProbePort for NoCapabilities {
    fn is_present(&self, _capability: &str) -> bool {
        false
    }
}
