//! Domain types for managed search indexes.
//!
//! These are pure data types with no engine dependencies beyond the
//! opaque region handle.

mod index;

pub use index::{AnalyzerRef, IndexFields, IndexHandle, ManagedIndexSpec, REGION_VALUE_FIELD};
