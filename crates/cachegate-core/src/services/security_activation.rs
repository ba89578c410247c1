//! One-shot registration of the security manager and engine enforcement.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, error, info, warn};

use crate::error::ActivationError;
use crate::ports::SecurityEnablementPort;
use crate::security::{RealmSet, SecurityManager, SecurityManagerRegistry};

use super::ConditionGate;

/// Builds the security manager from realms, registers it, and asks the
/// engine adapter to enforce security.
///
/// Runs at most once per instance: after a successful activation further
/// calls return the same manager without touching the registry or port,
/// until [`deactivate`](Self::deactivate) rolls it back.
pub struct SecurityActivation {
    registry: Arc<SecurityManagerRegistry>,
    enablement: Arc<dyn SecurityEnablementPort>,
    activated: Mutex<Option<Arc<SecurityManager>>>,
}

impl SecurityActivation {
    pub fn new(
        registry: Arc<SecurityManagerRegistry>,
        enablement: Arc<dyn SecurityEnablementPort>,
    ) -> Self {
        Self {
            registry,
            enablement,
            activated: Mutex::new(None),
        }
    }

    pub fn registry(&self) -> &Arc<SecurityManagerRegistry> {
        &self.registry
    }

    /// Activate security if `gate` reports realms for `realms`.
    ///
    /// Returns `Ok(None)` when no realm is configured; in that case no
    /// manager is built. If the engine refuses enforcement after the manager
    /// was registered, the registration is rolled back and the activation
    /// fails.
    pub fn activate(
        &self,
        gate: &ConditionGate,
        realms: &RealmSet,
    ) -> Result<Option<Arc<SecurityManager>>, ActivationError> {
        let mut activated = self.activated.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(manager) = activated.as_ref() {
            debug!("Security already activated");
            return Ok(Some(Arc::clone(manager)));
        }
        if !gate.realms_configured(realms) {
            debug!("No realms configured, security stays inactive");
            return Ok(None);
        }
        let Some(manager) = SecurityManager::from_realms(realms) else {
            return Ok(None);
        };
        let manager = Arc::new(manager);

        self.registry.register(Arc::clone(&manager))?;

        if !self.enablement.enable_enforcement() {
            error!("Engine refused to enable security enforcement");
            self.registry.clear();
            return Err(ActivationError::EnforcementNotEnabled);
        }

        info!(realms = ?realms.names(), "Security manager registered and enforcement enabled");
        *activated = Some(Arc::clone(&manager));
        Ok(Some(manager))
    }

    /// Undo a successful activation.
    ///
    /// The registry is only cleared while it still holds the manager this
    /// instance registered. Returns `true` if there was anything to undo.
    pub fn deactivate(&self) -> bool {
        let Some(manager) = self
            .activated
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        else {
            return false;
        };
        if self
            .registry
            .current()
            .is_some_and(|current| Arc::ptr_eq(&current, &manager))
        {
            self.registry.clear();
        }
        warn!("Security activation rolled back");
        true
    }

    pub fn is_activated(&self) -> bool {
        self.activated
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl fmt::Debug for SecurityActivation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityActivation")
            .field("activated", &self.is_activated())
            .finish_non_exhaustive()
    }
}
