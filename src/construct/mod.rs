//! Constructs: the caller-owned, in-memory description of resources.
//!
//! A [`Construct`] describes one cloud resource. Constructs live in a
//! [`ConstructTree`], an arena that records the parent of each construct and
//! the explicit "depends on" links between constructs. The synthesis core
//! only ever reads a tree; it is built up front by user code (or by the
//! per-resource wrapper layer) and stays untouched for the duration of a run.
//!
//! # Examples
//!
//! ```rust
//! use armsynth::construct::{Construct, ConstructTree};
//! use serde_json::json;
//!
//! let mut tree = ConstructTree::new();
//! let plan = tree.add_root(Construct::new("plan", "Microsoft.Web/serverfarms", "plan1"));
//! let site = tree.add_root(
//!     Construct::new("site", "Microsoft.Web/sites", "site1")
//!         .with_location("westeurope")
//!         .with_properties(json!({"httpsOnly": true})),
//! );
//! tree.add_dependency(site, plan).unwrap();
//!
//! assert_eq!(tree.len(), 2);
//! assert_eq!(tree.dependencies_of(site).count(), 1);
//! ```

pub mod property;

pub use property::PropertyValue;

use std::collections::BTreeMap;

use crate::core::{DependencyTarget, SynthError};

/// Tag map as supplied by the construct layer; `None` values are unset tags.
pub type Tags = BTreeMap<String, Option<String>>;

/// Handle to a construct inside a [`ConstructTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstructId(usize);

impl ConstructId {
    /// Position of the construct in tree insertion order.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.0
    }
}

/// One resource as authored by the user.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Construct {
    /// Local identifier of this construct within its parent scope.
    pub id: String,
    /// Resource type identifier, e.g. `Microsoft.Network/virtualNetworks`.
    pub resource_type: String,
    /// Resource name; hierarchical names use `parent/child`.
    pub name: String,
    /// API version pinned by the construct itself.
    pub api_version: Option<String>,
    /// Deployment location.
    pub location: Option<String>,
    /// Resource tags.
    pub tags: Option<Tags>,
    /// Arbitrary property bag.
    pub properties: Option<PropertyValue>,
    /// SKU block.
    pub sku: Option<PropertyValue>,
    /// Resource subtype (the wire-format `kind` field).
    pub kind: Option<String>,
    /// Managed identity block.
    pub identity: Option<PropertyValue>,
    parent: Option<ConstructId>,
    depends_on: Vec<ConstructId>,
}

impl Construct {
    /// Create a construct with the always-required fields.
    pub fn new(
        id: impl Into<String>,
        resource_type: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            resource_type: resource_type.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Pin the API version.
    #[must_use]
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    /// Set the deployment location.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Add a tag.
    #[must_use]
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.get_or_insert_with(Tags::new).insert(key.into(), Some(value.into()));
        self
    }

    /// Replace the tag map.
    #[must_use]
    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = Some(tags);
        self
    }

    /// Set the property bag.
    #[must_use]
    pub fn with_properties(mut self, properties: impl Into<PropertyValue>) -> Self {
        self.properties = Some(properties.into());
        self
    }

    /// Set the SKU block.
    #[must_use]
    pub fn with_sku(mut self, sku: impl Into<PropertyValue>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    /// Set the resource subtype.
    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Set the identity block.
    #[must_use]
    pub fn with_identity(mut self, identity: impl Into<PropertyValue>) -> Self {
        self.identity = Some(identity.into());
        self
    }

    /// Parent construct, if this construct was added as a child.
    #[must_use]
    pub const fn parent(&self) -> Option<ConstructId> {
        self.parent
    }

    /// Explicitly declared dependencies, in declaration order.
    #[must_use]
    pub fn depends_on(&self) -> &[ConstructId] {
        &self.depends_on
    }
}

impl DependencyTarget for Construct {
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

/// Arena of constructs with parent links and explicit dependencies.
#[derive(Debug, Clone, Default)]
pub struct ConstructTree {
    nodes: Vec<Construct>,
}

impl ConstructTree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a construct with no parent.
    pub fn add_root(&mut self, mut construct: Construct) -> ConstructId {
        construct.parent = None;
        construct.depends_on.clear();
        self.push(construct)
    }

    /// Add a construct under `parent`.
    pub fn add_child(
        &mut self,
        parent: ConstructId,
        mut construct: Construct,
    ) -> Result<ConstructId, SynthError> {
        self.check(parent)?;
        construct.parent = Some(parent);
        construct.depends_on.clear();
        Ok(self.push(construct))
    }

    /// Declare that `from` depends on `to`. Repeated links are ignored.
    pub fn add_dependency(&mut self, from: ConstructId, to: ConstructId) -> Result<(), SynthError> {
        self.check(from)?;
        self.check(to)?;
        let links = &mut self.nodes[from.0].depends_on;
        if !links.contains(&to) {
            links.push(to);
        }
        Ok(())
    }

    /// Look up a construct.
    #[must_use]
    pub fn get(&self, id: ConstructId) -> Option<&Construct> {
        self.nodes.get(id.0)
    }

    /// Constructs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Construct> {
        self.nodes.iter()
    }

    /// Constructs with their ids, in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (ConstructId, &Construct)> {
        self.nodes.iter().enumerate().map(|(i, c)| (ConstructId(i), c))
    }

    /// Direct children of `id`.
    pub fn children(&self, id: ConstructId) -> impl Iterator<Item = &Construct> {
        self.nodes.iter().filter(move |c| c.parent == Some(id))
    }

    /// Explicit dependency targets of `id`.
    pub fn dependencies_of(&self, id: ConstructId) -> impl Iterator<Item = &Construct> {
        self.get(id)
            .map(|c| c.depends_on.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(|dep| self.get(*dep))
    }

    /// Slash-joined construct identifiers from the root down to `id`.
    #[must_use]
    pub fn path(&self, id: ConstructId) -> Option<String> {
        let mut segments = Vec::new();
        let mut current = Some(id);
        while let Some(cid) = current {
            let construct = self.get(cid)?;
            segments.push(construct.id.as_str());
            current = construct.parent;
        }
        segments.reverse();
        Some(segments.join("/"))
    }

    /// Number of constructs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds no constructs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, construct: Construct) -> ConstructId {
        self.nodes.push(construct);
        ConstructId(self.nodes.len() - 1)
    }

    fn check(&self, id: ConstructId) -> Result<(), SynthError> {
        if id.0 < self.nodes.len() {
            Ok(())
        } else {
            Err(SynthError::InvalidConstructReference {
                id: id.0,
            })
        }
    }
}
