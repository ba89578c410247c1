//! Type-keyed component registry.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use cachegate_core::{ComponentRegistry, RegistryError};
use tracing::debug;

type Component = Arc<dyn Any + Send + Sync>;

/// Registry of named components, looked up by their concrete type.
///
/// Several components of one type may be registered; a typed lookup then
/// reports [`RegistryError::Ambiguous`] and the caller moves on.
#[derive(Debug, Default)]
pub struct TypeMapRegistry {
    components: RwLock<HashMap<TypeId, Vec<(String, Component)>>>,
}

impl TypeMapRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `component` under `name`. A second registration with the
    /// same name and type replaces the first.
    pub fn register<T: Any + Send + Sync>(&self, name: impl Into<String>, component: T) {
        let name = name.into();
        let mut components = self.components.write().unwrap_or_else(PoisonError::into_inner);
        let entries = components.entry(TypeId::of::<T>()).or_default();
        entries.retain(|(existing, _)| *existing != name);
        debug!(component = %name, component_type = std::any::type_name::<T>(), "Registered component");
        entries.push((name, Arc::new(component)));
    }

    /// Names registered for type `T`, in registration order.
    pub fn names_for<T: Any>(&self) -> Vec<String> {
        self.components
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&TypeId::of::<T>())
            .map(|entries| entries.iter().map(|(name, _)| name.clone()).collect())
            .unwrap_or_default()
    }
}

impl ComponentRegistry for TypeMapRegistry {
    fn lookup_any(
        &self,
        type_id: TypeId,
        type_name: &'static str,
    ) -> Result<Option<Component>, RegistryError> {
        let components = self.components.read().unwrap_or_else(PoisonError::into_inner);
        match components.get(&type_id).map(Vec::as_slice) {
            None | Some([]) => Ok(None),
            Some([(_, component)]) => Ok(Some(Arc::clone(component))),
            Some(_) => Err(RegistryError::Ambiguous(type_name.to_string())),
        }
    }
}
