//! Typed security attributes and their mapping to engine properties.

mod assembler;
mod attributes;
mod set;

pub use assembler::{
    PropertyAssembler, PropertyConfigurer, SECURITY_CLIENT_AUTH_INIT, SECURITY_MANAGER,
    SECURITY_PEER_AUTH_INIT, SECURITY_POST_PROCESSOR, SECURITY_SHIRO_INIT, security_properties,
};
pub use attributes::{SecurityAttributes, TypeRef};
pub use set::PropertySet;
