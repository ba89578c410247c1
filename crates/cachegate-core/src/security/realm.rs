//! Pluggable authentication sources.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

/// Errors raised while authenticating against a realm.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// The realm knows the principal but the secret did not match.
    #[error("Invalid credentials for {0}")]
    InvalidCredentials(String),

    /// The realm is not ready to authenticate.
    #[error("Realm {realm} unavailable: {reason}")]
    Unavailable { realm: String, reason: String },

    /// No configured realm accepted the credentials.
    #[error("No realm accepted the credentials for {0}")]
    NoRealmAccepted(String),
}

/// A principal/secret pair presented for authentication.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub principal: String,
    pub secret: String,
}

impl Credentials {
    pub fn new(principal: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            principal: principal.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("principal", &self.principal)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// An authenticated identity and the realm that vouched for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub name: String,
    pub realm: String,
}

/// A pluggable authentication/authorization source.
///
/// `init` and `destroy` are lifecycle callbacks; they are only driven when
/// the security integration capability is present.
pub trait Realm: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Whether this realm can judge the given credentials at all.
    fn supports(&self, _credentials: &Credentials) -> bool {
        true
    }

    /// `Ok(None)` means the realm does not know the principal.
    fn authenticate(&self, credentials: &Credentials) -> Result<Option<Principal>, AuthError>;

    fn init(&self) -> Result<(), AuthError> {
        Ok(())
    }

    fn destroy(&self) {}
}

/// Ordered realm configurations. Empty is valid and means "security inactive".
#[derive(Debug, Clone, Default)]
pub struct RealmSet {
    realms: Vec<Arc<dyn Realm>>,
}

impl RealmSet {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, realm: Arc<dyn Realm>) -> Self {
        self.realms.push(realm);
        self
    }

    pub fn push(&mut self, realm: Arc<dyn Realm>) {
        self.realms.push(realm);
    }

    pub fn is_empty(&self) -> bool {
        self.realms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.realms.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Realm>> {
        self.realms.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.realms.iter().map(|realm| realm.name()).collect()
    }
}

impl FromIterator<Arc<dyn Realm>> for RealmSet {
    fn from_iter<I: IntoIterator<Item = Arc<dyn Realm>>>(iter: I) -> Self {
        Self {
            realms: iter.into_iter().collect(),
        }
    }
}
