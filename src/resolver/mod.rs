//! Dependency resolution for canonical records.
//!
//! The resolver takes every record of one synthesis run together with the
//! construct tree they came from. It works out which records have to be
//! deployed before which, refuses cycles, and writes the result into each
//! record's `dependsOn` as cross-reference expressions.
//!
//! # Edge sources
//!
//! Edges are unioned from every source that matches; there is no
//! "first match wins":
//!
//! 1. **References**: a record's serialized properties contain another
//!    record's name. Cheap and deliberately over-eager.
//! 2. **Parent/child names**: a record of a hierarchical type
//!    (`provider/parent/child`) depends on the record of the parent type
//!    whose name is the record's name minus its last segment.
//! 3. **Cross-type rules**: [`rules::CROSS_TYPE_RULES`]. An exclusive rule
//!    replaces the reference scan for its type pair, so a subnet only depends
//!    on a security group named in its `networkSecurityGroup` field.
//! 4. **Inline children**: when no separate record of a child type exists
//!    (the children are declared inline in their parent's properties), a
//!    record that mentions one of those inline children depends on the parent.
//!    The mention has to name the parent too (`vnet1/app`), unless only one
//!    parent in the run declares a child of that name.
//! 5. **Explicit links** declared on the construct tree. These are always
//!    honored and never filtered.
//!
//! With [`DetectionMode::ExplicitOnly`] only sources 2 and 5 are used.
//!
//! # Example
//!
//! ```rust
//! use armsynth::construct::{Construct, ConstructTree};
//! use armsynth::resolver::DependencyResolver;
//! use armsynth::transform::transform_all;
//! use serde_json::json;
//!
//! let mut tree = ConstructTree::new();
//! tree.add_root(Construct::new("plan", "Microsoft.Web/serverfarms", "plan1"));
//! tree.add_root(
//!     Construct::new("site", "Microsoft.Web/sites", "site1")
//!         .with_properties(json!({"serverFarmId": "[resourceId('Microsoft.Web/serverfarms', 'plan1')]"})),
//! );
//!
//! let records = transform_all(tree.iter());
//! let resolution = DependencyResolver::new().resolve(records, &tree).unwrap();
//! assert_eq!(
//!     resolution.records[1].depends_on,
//!     Some(vec!["[resourceId('Microsoft.Web/serverfarms', 'plan1')]".to_string()])
//! );
//! ```

pub mod dependency_graph;
pub mod expression;
pub mod rules;

pub use dependency_graph::{DependencyGraph, EdgeSource};

use std::collections::{HashMap, HashSet};

use crate::config::{DetectionMode, SynthConfig};
use crate::constants::PATH_SEPARATOR;
use crate::construct::ConstructTree;
use crate::core::{DependencyTarget, ResourceType, SynthError, parent_name};
use crate::record::{CanonicalRecord, NodeKey};

/// Records annotated with `dependsOn`, plus the graph they were resolved from.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Records in input order.
    pub records: Vec<CanonicalRecord>,
    /// The dependency graph built for this run.
    pub graph: DependencyGraph,
}

impl Resolution {
    /// Records in deployment order.
    #[must_use]
    pub fn topological_sort(&self) -> Vec<CanonicalRecord> {
        self.graph.order_records(&self.records)
    }
}

/// Resolves dependencies between the records of one synthesis run.
///
/// Holds configuration only; every call to [`Self::resolve`] starts from an
/// empty graph.
#[derive(Debug, Clone, Default)]
pub struct DependencyResolver {
    detection: DetectionMode,
}

impl DependencyResolver {
    /// Resolver using the heuristic detection mode.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver using the detection mode of `config`.
    #[must_use]
    pub fn with_config(config: &SynthConfig) -> Self {
        Self {
            detection: config.detection,
        }
    }

    /// Resolver with an explicit detection mode.
    #[must_use]
    pub const fn with_detection(detection: DetectionMode) -> Self {
        Self {
            detection,
        }
    }

    /// Build the dependency graph, reject cycles, and fill in `dependsOn`.
    ///
    /// Any `dependsOn` the records arrive with is replaced. A record with no
    /// dependencies leaves without the field at all.
    ///
    /// # Errors
    ///
    /// [`SynthError::CircularDependency`] when the records cannot be ordered.
    pub fn resolve(
        &self,
        mut records: Vec<CanonicalRecord>,
        tree: &ConstructTree,
    ) -> Result<Resolution, SynthError> {
        let graph = self.build_graph(&records, tree);
        tracing::debug!(
            "Built dependency graph with {} node(s) and {} edge(s)",
            graph.node_count(),
            graph.edge_count()
        );

        graph.detect_cycles()?;

        let present = TypeIndex::new(&records);
        for record in &mut records {
            let expressions: Vec<String> = graph
                .dependencies(&record.key())
                .into_iter()
                .map(|dep| expression::render_target(dep))
                .collect();
            let expressions = strip_inline_child_references(expressions, &present);
            record.depends_on = (!expressions.is_empty()).then_some(expressions);
        }

        Ok(Resolution {
            records,
            graph,
        })
    }

    fn build_graph(&self, records: &[CanonicalRecord], tree: &ConstructTree) -> DependencyGraph {
        let mut graph = DependencyGraph::new();
        for record in records {
            if !graph.add_node(record.key()) {
                tracing::warn!(
                    "Duplicate resource '{}'; occurrences share one dependency node",
                    record.key()
                );
            }
        }

        add_parent_edges(&mut graph, records);

        if self.detection == DetectionMode::Heuristic {
            add_reference_edges(&mut graph, records);
            add_inline_parent_edges(&mut graph, records);
        }

        add_explicit_edges(&mut graph, records, tree);
        graph
    }
}

/// Resolve with the default configuration.
pub fn resolve(
    records: Vec<CanonicalRecord>,
    tree: &ConstructTree,
) -> Result<Resolution, SynthError> {
    DependencyResolver::new().resolve(records, tree)
}

/// Order records so that each comes after everything it depends on.
///
/// Edges are read back from the records' `dependsOn` expressions, so this
/// works on records resolved earlier (or written by hand). Expressions
/// pointing outside the set are ignored. Cycles are not detected here; run
/// [`DependencyResolver::resolve`] first.
#[must_use]
pub fn topological_sort(records: &[CanonicalRecord]) -> Vec<CanonicalRecord> {
    let mut graph = DependencyGraph::new();
    for record in records {
        graph.add_node(record.key());
    }
    for record in records {
        let from = record.key();
        for expr in record.depends_on.iter().flatten() {
            if let Some(to) = expression::parse_resource_id(expr) {
                graph.add_dependency(&from, &to, EdgeSource::Explicit);
            }
        }
    }
    graph.order_records(records)
}

/// Lowercased set of the resource types present in a run.
struct TypeIndex(HashSet<String>);

impl TypeIndex {
    fn new(records: &[CanonicalRecord]) -> Self {
        Self(records.iter().map(|r| r.resource_type.to_ascii_lowercase()).collect())
    }

    fn contains(&self, resource_type: &str) -> bool {
        self.0.contains(&resource_type.to_ascii_lowercase())
    }
}

fn add_parent_edges(graph: &mut DependencyGraph, records: &[CanonicalRecord]) {
    for record in records {
        let ty = ResourceType::new(&record.resource_type);
        let (Some(parent_type), Some(parent)) = (ty.parent(), parent_name(&record.name)) else {
            continue;
        };
        for candidate in records {
            if parent_type.matches(&candidate.resource_type) && candidate.name == parent {
                graph.add_dependency(&record.key(), &candidate.key(), EdgeSource::Parent);
            }
        }
    }
}

fn add_reference_edges(graph: &mut DependencyGraph, records: &[CanonicalRecord]) {
    let texts: Vec<String> = records.iter().map(CanonicalRecord::properties_text).collect();

    for (i, record) in records.iter().enumerate() {
        let from = record.key();
        for (j, candidate) in records.iter().enumerate() {
            if i == j || candidate.name.is_empty() {
                continue;
            }

            let rule = rules::rule_for(&record.resource_type, &candidate.resource_type);
            if let Some(rule) = rule
                && rule.matches(record.properties.as_ref(), &candidate.name)
            {
                graph.add_dependency(&from, &candidate.key(), EdgeSource::Rule);
            }

            if rule.is_some_and(|r| r.exclusive) {
                continue;
            }
            if texts[i].contains(&candidate.name) {
                graph.add_dependency(&from, &candidate.key(), EdgeSource::Reference);
            }
        }
    }
}

fn add_inline_parent_edges(graph: &mut DependencyGraph, records: &[CanonicalRecord]) {
    let present = TypeIndex::new(records);

    let mut inline_children: Vec<InlineChild<'_>> = Vec::new();
    for (idx, record) in records.iter().enumerate() {
        if let Some(nesting) = rules::nesting_for_parent(&record.resource_type)
            && !present.contains(nesting.child)
        {
            for name in nesting.inline_names(record.properties.as_ref()) {
                inline_children.push(InlineChild {
                    parent: idx,
                    parent_name: &record.name,
                    child_type: nesting.child,
                    name,
                });
            }
        }
    }
    if inline_children.is_empty() {
        return;
    }
    tracing::debug!("{} inline child resource(s) eligible for parent redirection", inline_children.len());

    // Bare child names only count when a single parent declares them
    let mut declared: HashMap<(String, &str), HashSet<usize>> = HashMap::new();
    for child in &inline_children {
        declared
            .entry((child.child_type.to_ascii_lowercase(), child.name))
            .or_default()
            .insert(child.parent);
    }

    for (i, record) in records.iter().enumerate() {
        let text = record.properties_text();
        if text.is_empty() {
            continue;
        }
        for child in &inline_children {
            if child.parent == i {
                continue;
            }
            let unambiguous = declared
                .get(&(child.child_type.to_ascii_lowercase(), child.name))
                .is_some_and(|parents| parents.len() == 1);
            if child.is_referenced_by(&text, unambiguous) {
                let parent = &records[child.parent];
                graph.add_dependency(&record.key(), &parent.key(), EdgeSource::InlineParent);
            }
        }
    }
}

/// A child declared inline in its parent record's properties.
struct InlineChild<'r> {
    parent: usize,
    parent_name: &'r str,
    child_type: &'static str,
    name: &'r str,
}

impl InlineChild<'_> {
    /// Whether serialized properties refer to this child.
    ///
    /// A reference qualified by the parent (`vnet1/app`, or `'vnet1', 'app'`
    /// as `resourceId` arguments) always counts. The bare child name counts
    /// only when `unambiguous`, i.e. no other parent declares a child of the
    /// same name.
    fn is_referenced_by(&self, text: &str, unambiguous: bool) -> bool {
        let path = format!("{}{PATH_SEPARATOR}{}", self.parent_name, self.name);
        let args = format!("{}, {}", expression::quote(self.parent_name), expression::quote(self.name));
        contains_token(text, &path) || text.contains(&args) || (unambiguous && contains_token(text, self.name))
    }
}

// Substring match that refuses to start or end inside a longer identifier
fn contains_token(text: &str, needle: &str) -> bool {
    let is_ident = |c: char| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.');
    text.match_indices(needle).any(|(start, _)| {
        let before = text[..start].chars().next_back();
        let after = text[start + needle.len()..].chars().next();
        !before.is_some_and(is_ident) && !after.is_some_and(is_ident)
    })
}

fn add_explicit_edges(
    graph: &mut DependencyGraph,
    records: &[CanonicalRecord],
    tree: &ConstructTree,
) {
    for (id, construct) in tree.entries() {
        let from = NodeKey::of(construct);
        if !graph.contains(&from) {
            if !construct.depends_on().is_empty() {
                tracing::warn!(
                    "Construct '{}' has explicit dependencies but produced no record",
                    tree.path(id).unwrap_or_default()
                );
            }
            continue;
        }

        for target in tree.dependencies_of(id) {
            match match_record(records, target) {
                Some(key) => {
                    graph.add_dependency(&from, &key, EdgeSource::Explicit);
                }
                None => tracing::warn!(
                    "Explicit dependency of '{}' on '{}' matches no record",
                    from,
                    NodeKey::of(target)
                ),
            }
        }
    }
}

/// Find the record an explicit dependency points at.
///
/// Exact key first, then a record with the same name, then, for nested
/// children that were never materialized, the parent record.
pub(crate) fn match_record(
    records: &[CanonicalRecord],
    target: &(impl DependencyTarget + ?Sized),
) -> Option<NodeKey> {
    let wanted = NodeKey::of(target);
    if let Some(record) = records.iter().find(|r| r.key() == wanted) {
        return Some(record.key());
    }
    if let Some(record) = records.iter().find(|r| r.name == target.name()) {
        return Some(record.key());
    }

    let parent_type = ResourceType::new(target.resource_type()).parent()?;
    let parent = parent_name(target.name())?;
    records
        .iter()
        .find(|r| parent_type.matches(&r.resource_type) && r.name == parent)
        .map(CanonicalRecord::key)
}

// References to a separate-child type that has no record in the run point at
// nothing the engine can resolve; the parent-redirect edges cover them.
fn strip_inline_child_references(expressions: Vec<String>, present: &TypeIndex) -> Vec<String> {
    let mut seen = HashSet::new();
    expressions
        .into_iter()
        .filter(|expr| {
            !rules::INLINE_NESTINGS.iter().any(|nesting| {
                !present.contains(nesting.child) && expression::references_type(expr, nesting.child)
            })
        })
        .filter(|expr| seen.insert(expr.clone()))
        .collect()
}
