//! Process-wide registration of the active security manager.
//!
//! The registry is an explicit object with a set-once lifecycle. A shared
//! instance is available through [`global_security_registry`], but services
//! receive it by injection so tests can use private instances or `clear` it.

use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use crate::error::ActivationError;

use super::SecurityManager;

static GLOBAL_REGISTRY: LazyLock<Arc<SecurityManagerRegistry>> =
    LazyLock::new(|| Arc::new(SecurityManagerRegistry::new()));

/// Get the process-wide security manager registry.
pub fn global_security_registry() -> Arc<SecurityManagerRegistry> {
    Arc::clone(&GLOBAL_REGISTRY)
}

/// Holds at most one registered [`SecurityManager`].
#[derive(Debug, Default)]
pub struct SecurityManagerRegistry {
    slot: RwLock<Option<Arc<SecurityManager>>>,
}

impl SecurityManagerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `manager`. Fails if a manager is already registered.
    pub fn register(&self, manager: Arc<SecurityManager>) -> Result<(), ActivationError> {
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        if slot.is_some() {
            return Err(ActivationError::AlreadyRegistered);
        }
        *slot = Some(manager);
        Ok(())
    }

    pub fn current(&self) -> Option<Arc<SecurityManager>> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_registered(&self) -> bool {
        self.current().is_some()
    }

    /// Remove and return the registered manager.
    pub fn clear(&self) -> Option<Arc<SecurityManager>> {
        self.slot
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}
