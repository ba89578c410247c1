//! Security manager assembled from configured realms.

use tracing::debug;

use super::{AuthError, Credentials, Principal, RealmSet};

/// Authenticates credentials against an ordered set of realms.
///
/// Only constructible from a non-empty [`RealmSet`].
#[derive(Debug)]
pub struct SecurityManager {
    realms: RealmSet,
}

impl SecurityManager {
    /// Build a manager, or `None` when no realm is configured.
    pub fn from_realms(realms: &RealmSet) -> Option<Self> {
        if realms.is_empty() {
            return None;
        }
        Some(Self {
            realms: realms.clone(),
        })
    }

    pub const fn realms(&self) -> &RealmSet {
        &self.realms
    }

    /// Ask each supporting realm in order; the first principal returned wins.
    ///
    /// When no realm accepts, the last realm error is returned if there was
    /// one, otherwise [`AuthError::NoRealmAccepted`].
    pub fn authenticate(&self, credentials: &Credentials) -> Result<Principal, AuthError> {
        let mut last_error = None;

        for realm in self.realms.iter().filter(|realm| realm.supports(credentials)) {
            match realm.authenticate(credentials) {
                Ok(Some(principal)) => return Ok(principal),
                Ok(None) => {}
                Err(err) => {
                    debug!(realm = realm.name(), error = %err, "Realm rejected credentials");
                    last_error = Some(err);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| AuthError::NoRealmAccepted(credentials.principal.clone())))
    }
}
