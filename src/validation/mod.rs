//! Structural validation reported as data.
//!
//! Nothing in this module raises errors for invalid input. Every check returns
//! [`ValidationIssue`]s for the caller to display or to treat as fatal; the
//! intended use is linting records before a template is emitted.
//!
//! - [`validate_record`] / [`validate_records`] - required wire fields and
//!   name/type depth agreement
//! - [`validate_explicit_references`] - explicit construct links that point at
//!   no record
//! - [`fields`] - length, pattern, and allowed-value checks used by resource
//!   wrappers
//! - [`shapes`] - nested property block shapes, with paired assert forms

pub mod fields;
pub mod shapes;

use serde::Serialize;
use std::fmt;

use crate::construct::ConstructTree;
use crate::core::{ResourceType, name_segments};
use crate::record::{CanonicalRecord, NodeKey};
use crate::resolver::match_record;

/// One problem found by a structural check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    /// Short description of the problem
    pub message: String,
    /// What exactly was found
    pub detail: String,
    /// How to fix it
    pub suggestion: String,
    /// Dotted path to the offending field
    pub field_path: String,
}

impl ValidationIssue {
    /// Create an issue.
    pub fn new(
        message: impl Into<String>,
        detail: impl Into<String>,
        suggestion: impl Into<String>,
        field_path: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            detail: detail.into(),
            suggestion: suggestion.into(),
            field_path: field_path.into(),
        }
    }

    /// Prefix the field path, e.g. with `resources.3`.
    #[must_use]
    pub fn at(mut self, prefix: &str) -> Self {
        self.field_path = if self.field_path.is_empty() {
            prefix.to_string()
        } else {
            format!("{prefix}.{}", self.field_path)
        };
        self
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at '{}': {} ({})", self.message, self.field_path, self.detail, self.suggestion)
    }
}

/// Check one record's required fields.
///
/// Reports a missing or blank `type`, `apiVersion`, or `name`, and a name
/// whose segment count does not match the nesting depth of its type.
#[must_use]
pub fn validate_record(record: &CanonicalRecord) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    let required = [
        ("type", &record.resource_type, "Set the resource type, e.g. 'Microsoft.Web/sites'"),
        (
            "apiVersion",
            &record.api_version,
            "Pin an API version on the construct or add one to the synthesis configuration",
        ),
        ("name", &record.name, "Give the resource a non-empty name"),
    ];
    for (field, value, suggestion) in required {
        if value.trim().is_empty() {
            issues.push(ValidationIssue::new(
                format!("Missing required field '{field}'"),
                format!("Resource '{}' has no {field}", describe(record)),
                suggestion,
                field,
            ));
        }
    }

    if !record.resource_type.is_empty() && !record.name.is_empty() {
        let expected = ResourceType::new(&record.resource_type).depth();
        let actual = name_segments(&record.name).len();
        if expected != actual {
            issues.push(ValidationIssue::new(
                "Name does not match resource type nesting",
                format!(
                    "Type '{}' needs {expected} name segment(s) but '{}' has {actual}",
                    record.resource_type, record.name
                ),
                "Use one '/'-separated name segment per nesting level, e.g. 'parent/child'",
                "name",
            ));
        }
    }

    issues
}

/// Check every record; field paths are prefixed with `resources.<index>`.
#[must_use]
pub fn validate_records(records: &[CanonicalRecord]) -> Vec<ValidationIssue> {
    records
        .iter()
        .enumerate()
        .flat_map(|(idx, record)| {
            let prefix = format!("resources.{idx}");
            validate_record(record).into_iter().map(move |issue| issue.at(&prefix))
        })
        .collect()
}

/// Report explicit construct dependencies that resolve to no record.
///
/// A dependency on a nested child that was declared inline is fine as long
/// as its parent has a record. The suggestion names the closest record name
/// when one is similar.
#[must_use]
pub fn validate_explicit_references(
    records: &[CanonicalRecord],
    tree: &ConstructTree,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    for (id, construct) in tree.entries() {
        for (position, target) in tree.dependencies_of(id).enumerate() {
            if match_record(records, target).is_some() {
                continue;
            }
            let suggestion = closest_name(records, &target.name)
                .map(|name| format!("Did you mean '{name}'?"))
                .unwrap_or_else(|| "Add the target construct to the synthesized set".to_string());
            issues.push(ValidationIssue::new(
                "Explicit dependency references a missing resource",
                format!(
                    "'{}' depends on '{}', which produced no record",
                    NodeKey::of(construct),
                    NodeKey::of(target)
                ),
                suggestion,
                format!("{}.dependsOn.{position}", tree.path(id).unwrap_or_default()),
            ));
        }
    }
    issues
}

fn closest_name<'r>(records: &'r [CanonicalRecord], name: &str) -> Option<&'r str> {
    records
        .iter()
        .map(|r| (strsim::levenshtein(&r.name, name), r.name.as_str()))
        .filter(|(distance, _)| *distance <= 3)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, name)| name)
}

fn describe(record: &CanonicalRecord) -> String {
    if record.name.is_empty() {
        format!("<unnamed {}>", record.resource_type)
    } else {
        record.name.clone()
    }
}
