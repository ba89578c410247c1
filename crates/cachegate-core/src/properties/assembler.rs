//! Maps [`SecurityAttributes`] to the engine's security properties.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::{PropertySet, SecurityAttributes};

pub const SECURITY_CLIENT_AUTH_INIT: &str = "security-client-auth-init";
pub const SECURITY_PEER_AUTH_INIT: &str = "security-peer-auth-init";
pub const SECURITY_MANAGER: &str = "security-manager";
pub const SECURITY_POST_PROCESSOR: &str = "security-post-processor";
pub const SECURITY_SHIRO_INIT: &str = "security-shiro-init";

/// Map security attributes to engine properties.
///
/// Attributes at their default sentinel are skipped. Class-valued attributes
/// write the class form first and the name form second, so the name wins when
/// both are set. The security-manager key is only considered when
/// `security_enabled` is true.
pub fn security_properties(attributes: &SecurityAttributes, security_enabled: bool) -> PropertySet {
    let mut props = PropertySet::new();

    props
        .set_if_present(SECURITY_CLIENT_AUTH_INIT, &attributes.client_authentication_initializer)
        .set_if_present(SECURITY_PEER_AUTH_INIT, &attributes.peer_authentication_initializer);

    if security_enabled {
        props
            .set_if_not_default(SECURITY_MANAGER, &attributes.security_manager_class)
            .set_if_present(SECURITY_MANAGER, &attributes.security_manager_class_name);
    }

    props
        .set_if_not_default(SECURITY_POST_PROCESSOR, &attributes.security_post_processor_class)
        .set_if_present(SECURITY_POST_PROCESSOR, &attributes.security_post_processor_class_name)
        .set_if_present(SECURITY_SHIRO_INIT, &attributes.shiro_ini_file_location);

    props
}

/// Callback that customizes the assembled property set before the engine
/// bootstraps with it.
pub trait PropertyConfigurer: Send + Sync {
    fn configure(&self, component_name: &str, properties: &mut PropertySet);
}

impl<F> PropertyConfigurer for F
where
    F: Fn(&str, &mut PropertySet) + Send + Sync,
{
    fn configure(&self, component_name: &str, properties: &mut PropertySet) {
        self(component_name, properties);
    }
}

/// Assembles the final property set for one named engine component.
#[derive(Clone)]
pub struct PropertyAssembler {
    component_name: String,
    configurers: Vec<Arc<dyn PropertyConfigurer>>,
}

impl PropertyAssembler {
    pub fn new(component_name: impl Into<String>) -> Self {
        Self {
            component_name: component_name.into(),
            configurers: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_configurer(mut self, configurer: Arc<dyn PropertyConfigurer>) -> Self {
        self.configurers.push(configurer);
        self
    }

    pub fn component_name(&self) -> &str {
        &self.component_name
    }

    /// Map `attributes` and run every configurer in registration order.
    pub fn assemble(&self, attributes: &SecurityAttributes, security_enabled: bool) -> PropertySet {
        let mut props = security_properties(attributes, security_enabled);
        for configurer in &self.configurers {
            configurer.configure(&self.component_name, &mut props);
        }
        debug!(
            component = %self.component_name,
            count = props.len(),
            security_enabled,
            "Assembled engine properties"
        );
        props
    }
}

impl fmt::Debug for PropertyAssembler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyAssembler")
            .field("component_name", &self.component_name)
            .field("configurers", &self.configurers.len())
            .finish()
    }
}
