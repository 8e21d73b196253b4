//! Canonical records: the wire-format shape of one resource.
//!
//! A [`CanonicalRecord`] serializes directly into one entry of a template's
//! `resources` array. Optional fields are skipped when unset, so an absent
//! field and an empty one never look alike to the deployment engine.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use crate::core::DependencyTarget;

/// One resource in wire format.
///
/// Required fields default to empty strings on deserialization so that a
/// partially written record can still be loaded and linted by
/// [`crate::validation::validate_record`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalRecord {
    /// Resource type identifier.
    #[serde(rename = "type", default)]
    pub resource_type: String,

    /// Resolved schema version.
    #[serde(default)]
    pub api_version: String,

    /// Resource name; hierarchical names use `parent/child`.
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<Value>,

    /// Resource subtype, distinct from the type identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<Value>,

    /// Cross-reference expressions, only ever set by the resolver.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<Vec<String>>,
}

impl CanonicalRecord {
    /// Graph key of this record.
    #[must_use]
    pub fn key(&self) -> NodeKey {
        NodeKey::of(self)
    }

    /// The serialized property bag, or an empty string when there is none.
    #[must_use]
    pub fn properties_text(&self) -> String {
        self.properties.as_ref().map(Value::to_string).unwrap_or_default()
    }
}

impl DependencyTarget for CanonicalRecord {
    fn resource_type(&self) -> &str {
        &self.resource_type
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }
}

/// Dependency graph node key: `type/name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey {
    /// Resource type identifier
    pub resource_type: String,
    /// Resource name
    pub name: String,
}

impl NodeKey {
    /// Create a key from parts.
    pub fn new(resource_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            name: name.into(),
        }
    }

    /// Key of any dependency target.
    pub fn of(target: &(impl DependencyTarget + ?Sized)) -> Self {
        Self::new(target.resource_type(), target.name())
    }
}

impl DependencyTarget for NodeKey {
    fn resource_type(&self) -> &str {
        &self.resource_type
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn location(&self) -> Option<&str> {
        None
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.resource_type, self.name)
    }
}
