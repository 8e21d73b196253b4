//! Cross-reference expressions.
//!
//! A dependency is written into `dependsOn` as a `resourceId` call wrapped in
//! the template expression delimiters:
//!
//! ```text
//! [resourceId('Microsoft.Web/serverfarms', 'plan1')]
//! [resourceId('Microsoft.Network/virtualNetworks/subnets', 'vnet1', 'default')]
//! ```
//!
//! The first argument is the resource type; each remaining argument is one
//! segment of the (possibly hierarchical) name. Single quotes inside an
//! argument are escaped by doubling them.

use regex::Regex;
use std::sync::LazyLock;

use crate::constants::{PATH_SEPARATOR, RESOURCE_ID_FUNCTION};
use crate::core::{DependencyTarget, ResourceType, name_segments};
use crate::record::NodeKey;

// `None` only if a pattern fails to compile
static CALL_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\[\s*resourceId\((.*)\)\s*\]$").ok());
static ARG_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\s*'((?:[^']|'')*)'\s*(,|$)").ok());

/// Render the cross-reference expression for a dependency target.
///
/// ```rust
/// use armsynth::record::NodeKey;
/// use armsynth::resolver::expression::render_resource_id;
///
/// let key = NodeKey::new("Microsoft.Network/virtualNetworks/subnets", "vnet1/app");
/// assert_eq!(
///     render_resource_id(&key.resource_type, &key.name),
///     "[resourceId('Microsoft.Network/virtualNetworks/subnets', 'vnet1', 'app')]"
/// );
/// ```
#[must_use]
pub fn render_resource_id(resource_type: &str, name: &str) -> String {
    let mut args = Vec::with_capacity(2);
    args.push(quote(resource_type));
    args.extend(name_segments(name).into_iter().map(quote));
    format!("[{RESOURCE_ID_FUNCTION}({})]", args.join(", "))
}

/// Render the expression for anything implementing [`DependencyTarget`].
#[must_use]
pub fn render_target(target: &(impl DependencyTarget + ?Sized)) -> String {
    render_resource_id(target.resource_type(), target.name())
}

/// Parse an expression produced by [`render_resource_id`] back into a key.
///
/// Returns `None` for anything that is not a bracketed `resourceId` call with
/// a type and at least one name segment.
#[must_use]
pub fn parse_resource_id(expression: &str) -> Option<NodeKey> {
    let call = CALL_PATTERN.as_ref()?;
    let arg = ARG_PATTERN.as_ref()?;

    let inner = call.captures(expression.trim())?.get(1)?.as_str();

    let mut args = Vec::new();
    let mut consumed = 0;
    for cap in arg.captures_iter(inner) {
        let whole = cap.get(0)?;
        // Arguments must be contiguous; anything between them is not a plain literal
        if whole.start() != consumed {
            return None;
        }
        consumed = whole.end();
        args.push(cap.get(1)?.as_str().replace("''", "'"));
    }
    if consumed != inner.len() || args.len() < 2 {
        return None;
    }

    let resource_type = args.remove(0);
    let separator = PATH_SEPARATOR.to_string();
    let name = args.join(separator.as_str());
    Some(NodeKey::new(resource_type, name))
}

/// Whether an expression references a resource of `resource_type`.
#[must_use]
pub fn references_type(expression: &str, resource_type: &str) -> bool {
    parse_resource_id(expression)
        .is_some_and(|key| ResourceType::new(&key.resource_type).matches(resource_type))
}

/// Number of arguments a well-formed expression for this type carries.
#[must_use]
pub fn expected_arity(resource_type: &str) -> usize {
    1 + ResourceType::new(resource_type).depth()
}

pub(crate) fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
