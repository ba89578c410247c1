//! Command handlers.
//!
//! Each handler renders into a `String` so output can be tested without
//! capturing stdout; `execute` prints it.

pub mod dry_run;
pub mod gates;
pub mod properties;
