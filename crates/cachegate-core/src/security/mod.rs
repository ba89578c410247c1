//! Realms, the security manager built from them, and the process-wide
//! registry the manager is published through.

mod manager;
mod realm;
mod registry;

pub use manager::SecurityManager;
pub use realm::{AuthError, Credentials, Principal, Realm, RealmSet};
pub use registry::{SecurityManagerRegistry, global_security_registry};
