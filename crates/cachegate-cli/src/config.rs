//! Bootstrap configuration document.
//!
//! ```json
//! {
//!   "componentName": "gemfireCache",
//!   "integrations": ["security-integration"],
//!   "security": { "securityManagerClassName": "app::Manager" },
//!   "realms": [{ "name": "local", "users": { "alice": "s3cret" } }],
//!   "indexes": [{ "component": "ordersIndex", "indexName": "OrdersIndex", "regionPath": "/Orders" }]
//! }
//! ```

use std::path::Path;

use cachegate_core::{ManagedIndexSpec, SecurityAttributes};
use cachegate_runtime::StaticRealmConfig;
use serde::Deserialize;

use crate::error::CliError;

/// Component name used when the document does not set one.
pub const DEFAULT_COMPONENT_NAME: &str = "cachegate";

/// One managed index and the component name it is registered under.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IndexDeclaration {
    /// Component name; also the index name when `indexName` is blank.
    pub component: String,
    #[serde(flatten)]
    pub spec: ManagedIndexSpec,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BootstrapConfig {
    pub component_name: String,
    /// Integrations declared present in addition to those detected.
    pub integrations: Vec<String>,
    pub security: SecurityAttributes,
    pub realms: Vec<StaticRealmConfig>,
    pub indexes: Vec<IndexDeclaration>,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            component_name: DEFAULT_COMPONENT_NAME.to_string(),
            integrations: Vec::new(),
            security: SecurityAttributes::default(),
            realms: Vec::new(),
            indexes: Vec::new(),
        }
    }
}

impl BootstrapConfig {
    /// Load from `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, CliError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = std::fs::read_to_string(path).map_err(|err| {
            CliError::Io(format!("cannot read {}: {err}", path.display()))
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, CliError> {
        let mut config: Self = serde_json::from_str(raw)?;
        if config.component_name.trim().is_empty() {
            config.component_name = DEFAULT_COMPONENT_NAME.to_string();
        }
        Ok(config)
    }
}
