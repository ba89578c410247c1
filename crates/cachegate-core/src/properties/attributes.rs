//! Declarative security configuration.

use std::any::type_name;

use serde::{Deserialize, Serialize};

/// A reference to an implementation type, or the "unset" sentinel.
///
/// Deserializes from a type name string; `null` and blank strings are
/// [`TypeRef::Unset`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum TypeRef {
    #[default]
    Unset,
    Named(String),
}

impl TypeRef {
    /// Reference the Rust type `T` by its type name.
    pub fn of<T: ?Sized>() -> Self {
        Self::Named(type_name::<T>().to_string())
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self::from(Some(name.into()))
    }

    pub const fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Unset => None,
            Self::Named(name) => Some(name),
        }
    }
}

impl From<Option<String>> for TypeRef {
    fn from(name: Option<String>) -> Self {
        match name {
            Some(name) if !name.trim().is_empty() => Self::Named(name.trim().to_string()),
            _ => Self::Unset,
        }
    }
}

impl From<TypeRef> for Option<String> {
    fn from(type_ref: TypeRef) -> Self {
        match type_ref {
            TypeRef::Unset => None,
            TypeRef::Named(name) => Some(name),
        }
    }
}

/// Security attributes of a cache bootstrap.
///
/// Every field starts at its default sentinel (`""` or [`TypeRef::Unset`]);
/// attributes left at the sentinel never produce a property.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SecurityAttributes {
    pub client_authentication_initializer: String,
    pub peer_authentication_initializer: String,
    pub security_manager_class: TypeRef,
    pub security_manager_class_name: String,
    pub security_post_processor_class: TypeRef,
    pub security_post_processor_class_name: String,
    pub shiro_ini_file_location: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AuditingPostProcessor;

    #[test]
    fn type_ref_of_uses_type_name() {
        let type_ref = TypeRef::of::<AuditingPostProcessor>();
        assert!(type_ref.name().unwrap().ends_with("AuditingPostProcessor"));
        assert!(!type_ref.is_unset());
    }

    #[test]
    fn blank_type_name_is_unset() {
        assert!(TypeRef::named("   ").is_unset());
        assert_eq!(TypeRef::named(" app::Manager ").name(), Some("app::Manager"));
    }

    #[test]
    fn attributes_default_to_sentinels() {
        let attributes: SecurityAttributes = serde_json::from_str("{}").unwrap();
        assert_eq!(attributes, SecurityAttributes::default());
        assert!(attributes.security_manager_class.is_unset());
    }

    #[test]
    fn attributes_read_camel_case_keys() {
        let attributes: SecurityAttributes = serde_json::from_str(
            r#"{
                "securityManagerClass": "app::security::Manager",
                "securityPostProcessorClass": null,
                "shiroIniFileLocation": "classpath:shiro.ini"
            }"#,
        )
        .unwrap();

        assert_eq!(attributes.security_manager_class.name(), Some("app::security::Manager"));
        assert!(attributes.security_post_processor_class.is_unset());
        assert_eq!(attributes.shiro_ini_file_location, "classpath:shiro.ini");
    }
}
