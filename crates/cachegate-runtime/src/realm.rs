//! Realm backed by a fixed credential table.

use std::collections::BTreeMap;

use cachegate_core::{AuthError, Credentials, Principal, Realm};
use serde::Deserialize;
use tracing::debug;

/// Serialized form of a [`StaticRealm`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StaticRealmConfig {
    pub name: String,
    #[serde(default)]
    pub users: BTreeMap<String, String>,
}

/// Authenticates principals against an in-memory principal → secret table.
#[derive(Clone)]
pub struct StaticRealm {
    name: String,
    users: BTreeMap<String, String>,
}

impl StaticRealm {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            users: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_user(mut self, principal: impl Into<String>, secret: impl Into<String>) -> Self {
        self.users.insert(principal.into(), secret.into());
        self
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }
}

impl From<StaticRealmConfig> for StaticRealm {
    fn from(config: StaticRealmConfig) -> Self {
        Self {
            name: config.name,
            users: config.users,
        }
    }
}

impl std::fmt::Debug for StaticRealm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticRealm")
            .field("name", &self.name)
            .field("users", &self.users.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Realm for StaticRealm {
    fn name(&self) -> &str {
        &self.name
    }

    fn authenticate(&self, credentials: &Credentials) -> Result<Option<Principal>, AuthError> {
        let Some(secret) = self.users.get(&credentials.principal) else {
            return Ok(None);
        };
        if *secret != credentials.secret {
            return Err(AuthError::InvalidCredentials(credentials.principal.clone()));
        }
        Ok(Some(Principal {
            name: credentials.principal.clone(),
            realm: self.name.clone(),
        }))
    }

    fn init(&self) -> Result<(), AuthError> {
        if self.users.is_empty() {
            return Err(AuthError::Unavailable {
                realm: self.name.clone(),
                reason: "no users configured".to_string(),
            });
        }
        debug!(realm = %self.name, users = self.users.len(), "Static realm ready");
        Ok(())
    }
}
