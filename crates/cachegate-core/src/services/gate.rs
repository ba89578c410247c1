//! Activation gates for optional subsystems.

use std::sync::Arc;

use crate::ports::CapabilityProbePort;
use crate::security::RealmSet;

/// Capability that enables realm lifecycle hooks.
pub const SECURITY_INTEGRATION: &str = "security-integration";

/// Snapshot of both gates, taken once by the composition root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GateDecision {
    /// The optional security integration is available (lifecycle hooks).
    pub integration_present: bool,
    /// At least one realm is configured (security manager and property).
    pub realms_configured: bool,
}

/// Pure decision functions over environment and declarative state.
///
/// Nothing is cached: every query re-reads the probe and the realm set it is
/// given, since realms may be registered after the gate is built.
#[derive(Clone)]
pub struct ConditionGate {
    probe: Arc<dyn CapabilityProbePort>,
    capability: String,
}

impl ConditionGate {
    pub fn new(probe: Arc<dyn CapabilityProbePort>) -> Self {
        Self::for_capability(probe, SECURITY_INTEGRATION)
    }

    pub fn for_capability(probe: Arc<dyn CapabilityProbePort>, capability: impl Into<String>) -> Self {
        Self {
            probe,
            capability: capability.into(),
        }
    }

    pub fn capability(&self) -> &str {
        &self.capability
    }

    pub fn integration_present(&self) -> bool {
        self.probe.is_present(&self.capability)
    }

    pub fn realms_configured(&self, realms: &RealmSet) -> bool {
        !realms.is_empty()
    }

    pub fn evaluate(&self, realms: &RealmSet) -> GateDecision {
        GateDecision {
            integration_present: self.integration_present(),
            realms_configured: self.realms_configured(realms),
        }
    }
}

impl std::fmt::Debug for ConditionGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConditionGate")
            .field("capability", &self.capability)
            .finish_non_exhaustive()
    }
}
