//! Resource type abstractions shared by the transformer and the resolver.
//!
//! Resource types are slash-separated paths: a provider namespace followed by
//! one or more type segments (`Microsoft.Network/virtualNetworks/subnets`).
//! A type with three or more segments is *hierarchical*: its resources live
//! inside a parent resource of the type formed by dropping the last segment,
//! and their names carry one segment per nesting level (`vnet1/default`).
//!
//! # Core Types
//!
//! - [`ResourceType`] - Borrowed view over a type identifier with path helpers
//! - [`DependencyTarget`] - The narrow surface anything that can be depended on exposes

use std::fmt;

use crate::constants::PATH_SEPARATOR;

/// Borrowed view over a resource type identifier.
///
/// # Examples
///
/// ```rust
/// use armsynth::core::ResourceType;
///
/// let subnet = ResourceType::new("Microsoft.Network/virtualNetworks/subnets");
/// assert!(subnet.is_hierarchical());
/// assert_eq!(subnet.depth(), 2);
/// assert_eq!(
///     subnet.parent().map(|p| p.as_str()),
///     Some("Microsoft.Network/virtualNetworks")
/// );
///
/// let vnet = ResourceType::new("Microsoft.Network/virtualNetworks");
/// assert!(!vnet.is_hierarchical());
/// assert!(vnet.parent().is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceType<'a>(&'a str);

impl<'a> ResourceType<'a> {
    /// Wrap a type identifier.
    #[must_use]
    pub const fn new(value: &'a str) -> Self {
        Self(value)
    }

    /// The raw identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'a str {
        self.0
    }

    /// Number of path segments, including the provider namespace.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        if self.0.is_empty() {
            0
        } else {
            self.0.split(PATH_SEPARATOR).count()
        }
    }

    /// Number of name segments a resource of this type carries.
    ///
    /// A flat type (`provider/type`) has depth 1; each additional type segment
    /// adds one level of nesting.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.segment_count().saturating_sub(1)
    }

    /// Whether resources of this type are nested inside a parent resource.
    #[must_use]
    pub fn is_hierarchical(&self) -> bool {
        self.segment_count() >= 3
    }

    /// The parent type for a hierarchical type.
    #[must_use]
    pub fn parent(&self) -> Option<ResourceType<'a>> {
        if !self.is_hierarchical() {
            return None;
        }
        self.0.rfind(PATH_SEPARATOR).map(|idx| ResourceType(&self.0[..idx]))
    }

    /// Case-insensitive comparison; the platform treats type identifiers
    /// case-insensitively.
    #[must_use]
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}

impl fmt::Display for ResourceType<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Split a hierarchical resource name into its segments.
///
/// ```rust
/// use armsynth::core::name_segments;
///
/// assert_eq!(name_segments("vnet1/default"), vec!["vnet1", "default"]);
/// assert_eq!(name_segments("plan"), vec!["plan"]);
/// ```
#[must_use]
pub fn name_segments(name: &str) -> Vec<&str> {
    name.split(PATH_SEPARATOR).collect()
}

/// Everything before the last separator of a hierarchical name.
#[must_use]
pub fn parent_name(name: &str) -> Option<&str> {
    name.rfind(PATH_SEPARATOR).map(|idx| &name[..idx])
}

/// Anything that can be the target of a dependency.
///
/// Constructs and canonical records both implement this, so the resolver can
/// match an explicit construct-level link to a record and render a
/// cross-reference expression without probing for individual fields.
pub trait DependencyTarget {
    /// Resource type identifier.
    fn resource_type(&self) -> &str;

    /// Resource name, possibly hierarchical.
    fn name(&self) -> &str;

    /// Deployment location, when one is set.
    fn location(&self) -> Option<&str>;

    /// Graph node key: `type/name`.
    fn node_key(&self) -> String {
        format!("{}{}{}", self.resource_type(), PATH_SEPARATOR, self.name())
    }
}
