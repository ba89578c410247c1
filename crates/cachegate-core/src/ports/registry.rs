//! Component registry port.
//!
//! The registry is the host container's lookup-by-type facility. A miss is
//! non-fatal; callers fall through to their next strategy.

use std::any::{Any, TypeId, type_name};
use std::sync::Arc;

use super::RegistryError;

/// Type-erased component registry.
pub trait ComponentRegistry: Send + Sync {
    /// Look up the component registered under `type_id`.
    ///
    /// `type_name` is only used for diagnostics.
    fn lookup_any(
        &self,
        type_id: TypeId,
        type_name: &'static str,
    ) -> Result<Option<Arc<dyn Any + Send + Sync>>, RegistryError>;
}

/// Typed lookups on top of [`ComponentRegistry`].
pub trait ComponentRegistryExt {
    /// Look up a component by its concrete type.
    fn lookup<T>(&self) -> Result<Option<T>, RegistryError>
    where
        T: Any + Clone + Send + Sync;
}

impl<R: ComponentRegistry + ?Sized> ComponentRegistryExt for R {
    fn lookup<T>(&self) -> Result<Option<T>, RegistryError>
    where
        T: Any + Clone + Send + Sync,
    {
        let Some(component) = self.lookup_any(TypeId::of::<T>(), type_name::<T>())? else {
            return Ok(None);
        };
        component
            .downcast_ref::<T>()
            .cloned()
            .map(Some)
            .ok_or_else(|| RegistryError::TypeMismatch(type_name::<T>().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Registry holding exactly one `String`, stored under the wrong key on demand.
    struct SingleValueRegistry {
        value: Arc<dyn Any + Send + Sync>,
        key: TypeId,
    }

    impl ComponentRegistry for SingleValueRegistry {
        fn lookup_any(
            &self,
            type_id: TypeId,
            _type_name: &'static str,
        ) -> Result<Option<Arc<dyn Any + Send + Sync>>, RegistryError> {
            Ok((type_id == self.key).then(|| Arc::clone(&self.value)))
        }
    }

    #[test]
    fn typed_lookup_downcasts() {
        let registry = SingleValueRegistry {
            value: Arc::new("engine".to_string()),
            key: TypeId::of::<String>(),
        };
        assert_eq!(registry.lookup::<String>().unwrap(), Some("engine".to_string()));
        assert_eq!(registry.lookup::<u32>().unwrap(), None);
    }

    #[test]
    fn mismatched_component_is_reported() {
        let registry = SingleValueRegistry {
            value: Arc::new(7_u64),
            key: TypeId::of::<String>(),
        };
        let err = registry.lookup::<String>().unwrap_err();
        assert!(matches!(err, RegistryError::TypeMismatch(_)));
    }

    #[test]
    fn lookup_through_trait_object() {
        let registry: Arc<dyn ComponentRegistry> = Arc::new(SingleValueRegistry {
            value: Arc::new(42_u32),
            key: TypeId::of::<u32>(),
        });
        assert_eq!(registry.lookup::<u32>().unwrap(), Some(42));
    }
}
