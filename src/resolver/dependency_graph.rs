//! Dependency graph over canonical records.
//!
//! One node per record key (`type/name`), one edge per "must be deployed
//! after" relationship. The graph is transient: the resolver builds a fresh
//! one on every run and hands it back with the resolved records. Node indices
//! follow the order in which keys were first added, and every traversal
//! visits neighbors in that order, which keeps output independent of hash
//! iteration.

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::core::SynthError;
use crate::record::{CanonicalRecord, NodeKey};

/// Why an edge was added. Only used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeSource {
    /// The dependent's properties mention the target's name.
    Reference,
    /// The dependent is a nested child of the target.
    Parent,
    /// A fixed cross-type rule matched.
    Rule,
    /// The reference points at a child declared inline in the target.
    InlineParent,
    /// Declared on the originating construct.
    Explicit,
}

impl fmt::Display for EdgeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Reference => "reference",
            Self::Parent => "parent",
            Self::Rule => "rule",
            Self::InlineParent => "inline-parent",
            Self::Explicit => "explicit",
        };
        f.write_str(label)
    }
}

/// Color states for cycle detection using DFS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    /// Node has not been visited.
    White,
    /// Node is on the current DFS path.
    Gray,
    /// Node and everything below it has been visited.
    Black,
}

/// Directed graph of record dependencies.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    graph: DiGraph<NodeKey, EdgeSource>,
    node_map: HashMap<NodeKey, NodeIndex>,
}

impl DependencyGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node if it doesn't already exist. Returns `true` when it was new.
    pub fn add_node(&mut self, key: NodeKey) -> bool {
        if self.node_map.contains_key(&key) {
            return false;
        }
        let index = self.graph.add_node(key.clone());
        self.node_map.insert(key, index);
        true
    }

    /// Add `from → to`, meaning `to` must be deployed before `from`.
    ///
    /// Self edges, edges to unknown nodes, and duplicates are ignored. Returns
    /// `true` when a new edge was added.
    pub fn add_dependency(&mut self, from: &NodeKey, to: &NodeKey, source: EdgeSource) -> bool {
        let (Some(&from_idx), Some(&to_idx)) = (self.node_map.get(from), self.node_map.get(to))
        else {
            return false;
        };
        if from_idx == to_idx || self.graph.contains_edge(from_idx, to_idx) {
            return false;
        }
        tracing::trace!("{from} depends on {to} ({source})");
        self.graph.add_edge(from_idx, to_idx, source);
        true
    }

    /// Whether a node exists for `key`.
    #[must_use]
    pub fn contains(&self, key: &NodeKey) -> bool {
        self.node_map.contains_key(key)
    }

    /// Whether `from → to` exists.
    #[must_use]
    pub fn has_dependency(&self, from: &NodeKey, to: &NodeKey) -> bool {
        match (self.node_map.get(from), self.node_map.get(to)) {
            (Some(&f), Some(&t)) => self.graph.contains_edge(f, t),
            _ => false,
        }
    }

    /// Direct dependencies of `key`, in node insertion order.
    #[must_use]
    pub fn dependencies(&self, key: &NodeKey) -> Vec<&NodeKey> {
        self.neighbors(key, Direction::Outgoing)
    }

    /// Direct dependents of `key` (reverse edges), in node insertion order.
    #[must_use]
    pub fn dependents(&self, key: &NodeKey) -> Vec<&NodeKey> {
        self.neighbors(key, Direction::Incoming)
    }

    /// Check the graph for cycles.
    ///
    /// The error carries every key from the first repeated node back to
    /// itself, in traversal order.
    ///
    /// The traversal recurses once per edge on the current path, so stack use
    /// grows with the longest dependency chain. Templates hold a few thousand
    /// resources at most, which stays well within the default stack.
    pub fn detect_cycles(&self) -> Result<(), SynthError> {
        let mut colors: HashMap<NodeIndex, Color> =
            self.graph.node_indices().map(|node| (node, Color::White)).collect();
        let mut path: Vec<NodeIndex> = Vec::new();

        for node in self.graph.node_indices() {
            if matches!(colors.get(&node), Some(Color::White))
                && let Some(cycle) = self.dfs_visit(node, &mut colors, &mut path)
            {
                let chain = cycle
                    .iter()
                    .map(|idx| self.graph[*idx].to_string())
                    .collect::<Vec<_>>()
                    .join(" → ");
                return Err(SynthError::CircularDependency {
                    chain,
                });
            }
        }

        Ok(())
    }

    fn dfs_visit(
        &self,
        node: NodeIndex,
        colors: &mut HashMap<NodeIndex, Color>,
        path: &mut Vec<NodeIndex>,
    ) -> Option<Vec<NodeIndex>> {
        colors.insert(node, Color::Gray);
        path.push(node);

        for neighbor in self.sorted_neighbors(node, Direction::Outgoing) {
            match colors.get(&neighbor) {
                Some(Color::Gray) => {
                    // The neighbor is on the current path; the cycle starts there
                    if let Some(start) = path.iter().position(|n| *n == neighbor) {
                        let mut cycle = path[start..].to_vec();
                        cycle.push(neighbor);
                        return Some(cycle);
                    }
                }
                Some(Color::White) => {
                    if let Some(cycle) = self.dfs_visit(neighbor, colors, path) {
                        return Some(cycle);
                    }
                }
                _ => {}
            }
        }

        path.pop();
        colors.insert(node, Color::Black);
        None
    }

    /// Keys ordered so that every node comes after all of its dependencies.
    ///
    /// Depth-first from each node in insertion order, emitting a node once
    /// its dependencies are out. Nodes with no path between them keep their
    /// relative insertion order unless one is pulled forward as a
    /// dependency. Cycles are not reported here; run [`Self::detect_cycles`]
    /// first. Recursion depth is bounded by the longest dependency chain, as
    /// in [`Self::detect_cycles`].
    #[must_use]
    pub fn topological_order(&self) -> Vec<&NodeKey> {
        let mut visited = HashSet::new();
        let mut order = Vec::with_capacity(self.graph.node_count());
        for node in self.graph.node_indices() {
            self.visit_post_order(node, &mut visited, &mut order);
        }
        order.into_iter().map(|idx| &self.graph[idx]).collect()
    }

    fn visit_post_order(
        &self,
        node: NodeIndex,
        visited: &mut HashSet<NodeIndex>,
        order: &mut Vec<NodeIndex>,
    ) {
        if !visited.insert(node) {
            return;
        }
        for dep in self.sorted_neighbors(node, Direction::Outgoing) {
            self.visit_post_order(dep, visited, order);
        }
        order.push(node);
    }

    /// Reorder records into deployment order.
    ///
    /// Records whose key has no node keep their relative position after all
    /// graph-ordered records. Records sharing a key stay together in input
    /// order.
    #[must_use]
    pub fn order_records(&self, records: &[CanonicalRecord]) -> Vec<CanonicalRecord> {
        let mut by_key: HashMap<NodeKey, Vec<&CanonicalRecord>> = HashMap::new();
        for record in records {
            by_key.entry(record.key()).or_default().push(record);
        }

        let mut ordered = Vec::with_capacity(records.len());
        for key in self.topological_order() {
            if let Some(group) = by_key.remove(key) {
                ordered.extend(group.into_iter().cloned());
            }
        }
        ordered.extend(records.iter().filter(|r| by_key.contains_key(&r.key())).cloned());
        ordered
    }

    /// Whether the graph is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// All node keys in insertion order.
    #[must_use]
    pub fn nodes(&self) -> Vec<&NodeKey> {
        self.graph.node_indices().map(|idx| &self.graph[idx]).collect()
    }

    fn neighbors(&self, key: &NodeKey, direction: Direction) -> Vec<&NodeKey> {
        match self.node_map.get(key) {
            Some(&idx) => self
                .sorted_neighbors(idx, direction)
                .into_iter()
                .map(|n| &self.graph[n])
                .collect(),
            None => Vec::new(),
        }
    }

    // petgraph yields neighbors newest-edge first; sort for insertion order
    fn sorted_neighbors(&self, node: NodeIndex, direction: Direction) -> Vec<NodeIndex> {
        let mut neighbors: Vec<NodeIndex> = self.graph.neighbors_directed(node, direction).collect();
        neighbors.sort();
        neighbors.dedup();
        neighbors
    }
}
