//! Enforcement switch of the in-process engine.

use std::sync::atomic::{AtomicBool, Ordering};

use cachegate_core::SecurityEnablementPort;
use tracing::{info, warn};

/// Integrated-security flag owned by the engine.
///
/// An unavailable flag models an engine build without integrated security:
/// every enablement request is refused.
#[derive(Debug)]
pub struct IntegratedSecurityFlag {
    available: bool,
    enabled: AtomicBool,
}

impl IntegratedSecurityFlag {
    pub const fn new() -> Self {
        Self {
            available: true,
            enabled: AtomicBool::new(false),
        }
    }

    pub const fn unavailable() -> Self {
        Self {
            available: false,
            enabled: AtomicBool::new(false),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }
}

impl Default for IntegratedSecurityFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl SecurityEnablementPort for IntegratedSecurityFlag {
    fn enable_enforcement(&self) -> bool {
        if !self.available {
            warn!("Engine has no integrated security support");
            return false;
        }
        if !self.enabled.swap(true, Ordering::SeqCst) {
            info!("Integrated security enabled");
        }
        self.is_enabled()
    }
}
