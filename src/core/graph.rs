//! core::graph
//!
//! Alias reference graph and cycle detection.
//!
//! # Architecture
//!
//! The reference graph is a directed graph where:
//! - Nodes are token paths
//! - Edges point from an aliasing token to the path it references
//!
//! Adjacency is kept in an ordered map so traversal order, and therefore the
//! order of reported cycles, is deterministic.
//!
//! # Invariants
//!
//! - Cycle detection terminates for any finite graph
//! - Every reported cycle is a closed walk along existing edges

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use super::types::TokenPath;

static REFERENCE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\{([^}]+)\}$").expect("reference pattern is valid"));

/// Extract the inner path of a reference string of the exact form `{a.b.c}`.
///
/// # Example
///
/// ```
/// use tokencheck::core::graph::extract_reference;
///
/// assert_eq!(extract_reference("{color.primary}"), Some("color.primary"));
/// assert_eq!(extract_reference("#ff0000"), None);
/// assert_eq!(extract_reference("calc({a} * 2)"), None);
/// ```
pub fn extract_reference(value: &str) -> Option<&str> {
    REFERENCE_PATTERN
        .captures(value)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Whether a string is exactly a reference.
pub fn is_reference(value: &str) -> bool {
    extract_reference(value).is_some()
}

/// A directed alias edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReferenceEdge {
    pub from: TokenPath,
    pub to: TokenPath,
}

/// A cycle found in the reference graph.
///
/// Stored without the closing repetition: `[a, b, c]` describes
/// `a -> b -> c -> a`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle(Vec<TokenPath>);

impl Cycle {
    /// Paths in traversal order.
    pub fn paths(&self) -> &[TokenPath] {
        &self.0
    }

    /// Human-readable trace, e.g. `"a -> b -> c -> a"`.
    pub fn trace(&self) -> String {
        let mut parts: Vec<&str> = self.0.iter().map(TokenPath::as_str).collect();
        if let Some(first) = self.0.first() {
            parts.push(first.as_str());
        }
        parts.join(" -> ")
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.trace())
    }
}

/// The alias graph of a document.
#[derive(Debug, Default)]
pub struct ReferenceGraph {
    edges: BTreeMap<TokenPath, Vec<TokenPath>>,
}

impl ReferenceGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an alias edge.
    pub fn add_edge(&mut self, from: TokenPath, to: TokenPath) {
        self.edges.entry(from).or_default().push(to);
    }

    /// Paths referenced by `from`.
    pub fn targets(&self, from: &TokenPath) -> &[TokenPath] {
        self.edges.get(from).map(Vec::as_slice).unwrap_or_default()
    }

    /// All edges in source order.
    pub fn edges(&self) -> impl Iterator<Item = ReferenceEdge> + '_ {
        self.edges.iter().flat_map(|(from, targets)| {
            targets.iter().map(move |to| ReferenceEdge {
                from: from.clone(),
                to: to.clone(),
            })
        })
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }

    /// Find cycles with a depth-first search over every source node.
    ///
    /// The search keeps its own frame stack, so alias chains of any length
    /// are handled without recursion.
    ///
    /// When the search reaches a node already on the current path, the
    /// slice of the path from that node's first occurrence to the current
    /// node is recorded as a cycle.
    ///
    /// # Example
    ///
    /// ```
    /// use tokencheck::core::graph::ReferenceGraph;
    /// use tokencheck::core::types::TokenPath;
    ///
    /// let a = TokenPath::new("a").unwrap();
    /// let b = TokenPath::new("b").unwrap();
    ///
    /// let mut graph = ReferenceGraph::new();
    /// graph.add_edge(a.clone(), b.clone());
    /// graph.add_edge(b.clone(), a.clone());
    ///
    /// let cycles = graph.find_cycles();
    /// assert_eq!(cycles.len(), 1);
    /// assert_eq!(cycles[0].trace(), "a -> b -> a");
    /// ```
    pub fn find_cycles(&self) -> Vec<Cycle> {
        let mut visited: HashSet<&TokenPath> = HashSet::new();
        let mut on_stack: HashSet<&TokenPath> = HashSet::new();
        // Current DFS path, each node paired with the index of its next target.
        let mut frames: Vec<(&TokenPath, usize)> = Vec::new();
        let mut cycles = Vec::new();

        for source in self.edges.keys() {
            if !visited.insert(source) {
                continue;
            }
            on_stack.insert(source);
            frames.push((source, 0));

            while let Some(frame) = frames.last_mut() {
                let (node, next) = *frame;
                let Some(target) = self.targets(node).get(next) else {
                    frames.pop();
                    on_stack.remove(node);
                    continue;
                };
                frame.1 += 1;

                if on_stack.contains(target) {
                    if let Some(start) = frames.iter().position(|(p, _)| *p == target) {
                        cycles.push(Cycle(
                            frames[start..].iter().map(|(p, _)| (*p).clone()).collect(),
                        ));
                    }
                } else if visited.insert(target) {
                    on_stack.insert(target);
                    frames.push((target, 0));
                }
            }
        }
        cycles
    }
}
