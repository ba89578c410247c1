//! Realm lifecycle hooks, installed only when the security integration is
//! present.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info};

use crate::error::ActivationError;
use crate::security::RealmSet;

/// Drives `init` on realms at bootstrap and `destroy` at shutdown.
///
/// Realms are destroyed in reverse order, and only those whose `init`
/// succeeded. Shutdown is idempotent.
#[derive(Debug, Default)]
pub struct LifecycleProcessor {
    initialized: Mutex<RealmSet>,
}

impl LifecycleProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initialize every realm in order. Stops at the first failure; realms
    /// already initialized are still destroyed by [`shutdown`](Self::shutdown).
    ///
    /// Realms initialized by an earlier call are skipped.
    pub fn initialize(&self, realms: &RealmSet) -> Result<(), ActivationError> {
        let mut initialized = self.initialized.lock().unwrap_or_else(PoisonError::into_inner);
        for realm in realms.iter() {
            let already = initialized
                .iter()
                .any(|done| std::ptr::addr_eq(Arc::as_ptr(done), Arc::as_ptr(realm)));
            if already {
                continue;
            }
            realm.init().map_err(|err| ActivationError::RealmInit {
                realm: realm.name().to_string(),
                reason: err.to_string(),
            })?;
            debug!(realm = realm.name(), "Realm initialized");
            initialized.push(realm.clone());
        }
        Ok(())
    }

    pub fn initialized_count(&self) -> usize {
        self.initialized
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn shutdown(&self) {
        let realms = std::mem::take(
            &mut *self.initialized.lock().unwrap_or_else(PoisonError::into_inner),
        );
        if realms.is_empty() {
            return;
        }
        let ordered: Vec<_> = realms.iter().collect();
        for realm in ordered.iter().rev() {
            realm.destroy();
        }
        info!(count = ordered.len(), "Realm lifecycle shut down");
    }
}
