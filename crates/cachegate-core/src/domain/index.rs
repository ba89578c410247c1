//! Managed index specification and engine-facing index types.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::ports::RegionRef;

/// Field sentinel meaning "index the entire region value".
pub const REGION_VALUE_FIELD: &str = "__REGION_VALUE_FIELD";

/// Opaque reference to an analyzer known to the search engine.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalyzerRef(String);

impl AnalyzerRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnalyzerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What an index covers: a field list, or per-field analyzers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum IndexFields {
    /// Plain field names.
    Fields(Vec<String>),
    /// Field name to analyzer mapping.
    Analyzers(BTreeMap<String, AnalyzerRef>),
}

impl IndexFields {
    /// Field names covered by the index, in order.
    pub fn field_names(&self) -> Vec<&str> {
        match self {
            Self::Fields(fields) => fields.iter().map(String::as_str).collect(),
            Self::Analyzers(analyzers) => analyzers.keys().map(String::as_str).collect(),
        }
    }
}

/// An index handed back by the search engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexHandle {
    pub name: String,
    pub region_path: String,
    pub fields: IndexFields,
}

/// Declarative description of a managed search index.
///
/// The region can be given as a live reference or as a path; at least one is
/// required, and the reference always wins when both are present.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ManagedIndexSpec {
    /// Index name. Falls back to the component name when blank.
    pub index_name: String,
    /// Path of the region to index.
    pub region_path: Option<String>,
    /// Live region reference. Not configurable from a document.
    #[serde(skip)]
    pub region: Option<RegionRef>,
    /// Fields to index. Empty means the whole value.
    pub fields: Vec<String>,
    /// Per-field analyzers. Overrides `fields` when non-empty.
    pub field_analyzers: BTreeMap<String, AnalyzerRef>,
    /// Destroy the index when the owning process shuts down.
    pub destroy_on_shutdown: bool,
}

impl ManagedIndexSpec {
    pub fn new(index_name: impl Into<String>) -> Self {
        Self {
            index_name: index_name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_region_path(mut self, path: impl Into<String>) -> Self {
        self.region_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_region(mut self, region: RegionRef) -> Self {
        self.region = Some(region);
        self
    }

    #[must_use]
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_field_analyzer(mut self, field: impl Into<String>, analyzer: AnalyzerRef) -> Self {
        self.field_analyzers.insert(field.into(), analyzer);
        self
    }

    #[must_use]
    pub fn with_destroy_on_shutdown(mut self, destroy: bool) -> Self {
        self.destroy_on_shutdown = destroy;
        self
    }

    /// The effective index name.
    ///
    /// Uses `index_name` when it has text, otherwise the name this index spec was
    /// registered under.
    pub fn resolve_index_name(
        &self,
        component_name: Option<&str>,
    ) -> Result<String, ConfigurationError> {
        [Some(self.index_name.as_str()), component_name]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|name| !name.is_empty())
            .map(str::to_string)
            .ok_or(ConfigurationError::MissingField {
                field: "index_name",
            })
    }

    /// The configured region path, if it has text.
    pub fn configured_region_path(&self) -> Option<&str> {
        self.region_path
            .as_deref()
            .map(str::trim)
            .filter(|path| !path.is_empty())
    }

    /// Whether `other` describes the same index: same region, fields and
    /// shutdown behavior. The name is not compared.
    pub fn same_definition(&self, other: &Self) -> bool {
        let region = |spec: &Self| spec.region.as_ref().map(|region| region.full_path());
        region(self) == region(other)
            && self.configured_region_path() == other.configured_region_path()
            && self.resolve_fields() == other.resolve_fields()
            && self.destroy_on_shutdown == other.destroy_on_shutdown
    }

    /// The field specification handed to the search engine.
    pub fn resolve_fields(&self) -> IndexFields {
        if !self.field_analyzers.is_empty() {
            return IndexFields::Analyzers(self.field_analyzers.clone());
        }
        if self.fields.is_empty() {
            IndexFields::Fields(vec![REGION_VALUE_FIELD.to_string()])
        } else {
            IndexFields::Fields(self.fields.clone())
        }
    }
}
