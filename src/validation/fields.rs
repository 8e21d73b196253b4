//! Field-level checks for resource wrappers.
//!
//! Each check returns `None` when the value passes, or a [`ValidationIssue`]
//! whose `field_path` is the field name given by the caller.

use regex::Regex;

use super::ValidationIssue;

/// Check that a string's length (in characters) is within `min..=max`.
#[must_use]
pub fn validate_length(field: &str, value: &str, min: usize, max: usize) -> Option<ValidationIssue> {
    let len = value.chars().count();
    if (min..=max).contains(&len) {
        return None;
    }
    Some(ValidationIssue::new(
        format!("Invalid length for '{field}'"),
        format!("'{value}' is {len} character(s) long"),
        format!("Use between {min} and {max} characters"),
        field,
    ))
}

/// Check that a string matches a regular expression.
///
/// An invalid pattern is itself reported as an issue.
#[must_use]
pub fn validate_pattern(field: &str, value: &str, pattern: &str) -> Option<ValidationIssue> {
    match Regex::new(pattern) {
        Ok(re) if re.is_match(value) => None,
        Ok(_) => Some(ValidationIssue::new(
            format!("Invalid format for '{field}'"),
            format!("'{value}' does not match {pattern}"),
            format!("Use a value matching {pattern}"),
            field,
        )),
        Err(e) => Some(ValidationIssue::new(
            format!("Invalid pattern for '{field}'"),
            e.to_string(),
            "Fix the validation pattern",
            field,
        )),
    }
}

/// Check that a value is one of the allowed values (case-sensitive).
#[must_use]
pub fn validate_allowed(field: &str, value: &str, allowed: &[&str]) -> Option<ValidationIssue> {
    if allowed.contains(&value) {
        return None;
    }
    Some(ValidationIssue::new(
        format!("Invalid value for '{field}'"),
        format!("'{value}' is not an allowed value"),
        format!("Use one of: {}", allowed.join(", ")),
        field,
    ))
}
