//! Environment-backed capability probe.
//!
//! Detection is best-effort and fails closed: an unreadable variable, a
//! missing binary or an unknown capability name all report "absent".

use std::fmt;
use std::sync::Arc;

use cachegate_core::{CapabilityProbePort, SECURITY_INTEGRATION};
use tracing::debug;

/// Comma-separated list of integrations declared present.
pub const INTEGRATIONS_ENV: &str = "CACHEGATE_INTEGRATIONS";

/// How a capability is detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    /// Present when the named environment variable is set to a truthy value.
    EnvFlag(String),
    /// Present when the named executable is found on `PATH`.
    Binary(String),
}

/// A named capability and the ways it may be detected.
///
/// Any one detection succeeding is enough.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityDescriptor {
    pub name: String,
    pub detections: Vec<Detection>,
}

impl CapabilityDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            detections: Vec::new(),
        }
    }

    #[must_use]
    pub fn detected_by(mut self, detection: Detection) -> Self {
        self.detections.push(detection);
        self
    }
}

type EnvSource = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;
type BinaryLookup = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Probe over process environment and `PATH`.
///
/// A capability listed in [`INTEGRATIONS_ENV`] is always present. Otherwise
/// its descriptor, if registered, decides.
#[derive(Clone)]
pub struct EnvCapabilityProbe {
    descriptors: Vec<CapabilityDescriptor>,
    env: EnvSource,
    binaries: BinaryLookup,
}

impl EnvCapabilityProbe {
    /// Probe over the process environment with the built-in descriptors.
    pub fn new() -> Self {
        Self {
            descriptors: vec![
                CapabilityDescriptor::new(SECURITY_INTEGRATION)
                    .detected_by(Detection::EnvFlag("CACHEGATE_SECURITY_INTEGRATION".to_string()))
                    .detected_by(Detection::Binary("cachegate-security".to_string())),
            ],
            env: Arc::new(|key| std::env::var(key).ok()),
            binaries: Arc::new(|name| which::which(name).is_ok()),
        }
    }

    /// Replace the environment source.
    #[must_use]
    pub fn with_env_source<F>(mut self, env: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.env = Arc::new(env);
        self
    }

    /// Replace the `PATH` lookup.
    #[must_use]
    pub fn with_binary_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.binaries = Arc::new(lookup);
        self
    }

    #[must_use]
    pub fn with_descriptor(mut self, descriptor: CapabilityDescriptor) -> Self {
        self.descriptors.retain(|d| d.name != descriptor.name);
        self.descriptors.push(descriptor);
        self
    }

    pub fn descriptors(&self) -> &[CapabilityDescriptor] {
        &self.descriptors
    }

    fn declared(&self, capability: &str) -> bool {
        (self.env)(INTEGRATIONS_ENV).is_some_and(|list| {
            list.split(',')
                .map(str::trim)
                .any(|entry| !entry.is_empty() && entry == capability)
        })
    }

    fn detect(&self, detection: &Detection) -> bool {
        match detection {
            Detection::EnvFlag(key) => (self.env)(key).is_some_and(|value| is_truthy(&value)),
            Detection::Binary(name) => (self.binaries)(name),
        }
    }
}

impl Default for EnvCapabilityProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl CapabilityProbePort for EnvCapabilityProbe {
    fn is_present(&self, capability: &str) -> bool {
        if capability.trim().is_empty() {
            return false;
        }
        if self.declared(capability) {
            debug!(capability, source = INTEGRATIONS_ENV, "Capability present");
            return true;
        }
        let present = self
            .descriptors
            .iter()
            .filter(|d| d.name == capability)
            .flat_map(|d| d.detections.iter())
            .any(|detection| self.detect(detection));
        debug!(capability, present, "Capability probed");
        present
    }
}

impl fmt::Debug for EnvCapabilityProbe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvCapabilityProbe")
            .field("descriptors", &self.descriptors)
            .finish_non_exhaustive()
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
