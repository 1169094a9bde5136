//! Graph data types.
//!
//! The link graph is an owned value passed explicitly between the builder,
//! the classifier, and the report emitter. Storage is a petgraph `DiGraph`
//! with a node-id index map; edge directionality is an explicit per-edge
//! attribute rather than a two-directed-edges convention, so undirected
//! table links and directed diagram arrows coexist without ambiguity.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

// ============================================================================
// Nodes and edges
// ============================================================================

/// A documentation subject: a repository, a service, or a broad domain.
///
/// Nodes are deduplicated by exact string equality after whitespace trim;
/// no case folding or other normalization is applied.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Component identifier.
    pub id: String,
    /// Whether this node is one of the configured major domains.
    pub major_domain: bool,
}

impl Node {
    /// Create a plain node.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            major_domain: false,
        }
    }
}

/// Directionality of an edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeKind {
    /// Bidirectional relation (table links, domain registration).
    Undirected,
    /// One-way relation (diagram arrows).
    Directed,
}

/// A relation between two components.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edge {
    /// Bidirectional relation between `a` and `b`.
    Undirected { a: String, b: String },
    /// One-way relation from `from` to `to`.
    Directed { from: String, to: String },
}

impl Edge {
    /// Create an undirected edge.
    pub fn undirected(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self::Undirected {
            a: a.into(),
            b: b.into(),
        }
    }

    /// Create a directed edge.
    pub fn directed(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::Directed {
            from: from.into(),
            to: to.into(),
        }
    }

    /// The edge's directionality.
    pub fn kind(&self) -> EdgeKind {
        match self {
            Self::Undirected { .. } => EdgeKind::Undirected,
            Self::Directed { .. } => EdgeKind::Directed,
        }
    }

    /// The edge's endpoints in storage order.
    pub fn endpoints(&self) -> (&str, &str) {
        match self {
            Self::Undirected { a, b } => (a.as_str(), b.as_str()),
            Self::Directed { from, to } => (from.as_str(), to.as_str()),
        }
    }
}

// ============================================================================
// GraphData
// ============================================================================

/// The link graph: nodes, edges, and the major-domain marking.
///
/// Built fresh per run, immutable once the builder finishes, and discarded
/// on exit. Multi-edges are permitted and never deduplicated at admission.
#[derive(Clone, Debug, Default)]
pub struct GraphData {
    graph: DiGraph<Node, EdgeKind>,
    indices: HashMap<String, NodeIndex>,
}

impl GraphData {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, trimming the identifier. Idempotent; an empty
    /// identifier is ignored.
    pub fn add_node(&mut self, id: &str) {
        let id = id.trim();
        if id.is_empty() {
            return;
        }
        if !self.indices.contains_key(id) {
            let idx = self.graph.add_node(Node::new(id));
            self.indices.insert(id.to_string(), idx);
        }
    }

    /// Add a node and mark it as a major domain.
    pub fn mark_major_domain(&mut self, id: &str) {
        self.add_node(id);
        if let Some(&idx) = self.indices.get(id.trim()) {
            if let Some(node) = self.graph.node_weight_mut(idx) {
                node.major_domain = true;
            }
        }
    }

    /// Whether the node exists.
    pub fn contains_node(&self, id: &str) -> bool {
        self.indices.contains_key(id.trim())
    }

    /// Whether the node is a major domain.
    pub fn is_major_domain(&self, id: &str) -> bool {
        self.indices
            .get(id.trim())
            .and_then(|&idx| self.graph.node_weight(idx))
            .is_some_and(|node| node.major_domain)
    }

    /// The major-domain identifiers, sorted.
    pub fn major_domains(&self) -> BTreeSet<String> {
        self.graph
            .node_weights()
            .filter(|node| node.major_domain)
            .map(|node| node.id.clone())
            .collect()
    }

    /// Add an edge, creating missing endpoints as plain nodes.
    ///
    /// Parallel edges are kept: the graph is conceptually a multigraph and
    /// duplicates are harmless to classification.
    pub fn add_edge(&mut self, edge: Edge) {
        let (left, right) = edge.endpoints();
        let (left, right) = (left.trim().to_string(), right.trim().to_string());
        if left.is_empty() || right.is_empty() {
            return;
        }

        self.add_node(&left);
        self.add_node(&right);

        // Safe lookups: both endpoints were just added.
        if let (Some(&a), Some(&b)) = (self.indices.get(&left), self.indices.get(&right)) {
            self.graph.add_edge(a, b, edge.kind());
        }
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges (each admission counted once, regardless of kind).
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Iterate over node identifiers.
    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.graph.node_weights().map(|node| node.id.as_str())
    }

    /// Iterate over edges as tagged [`Edge`] values.
    pub fn iter_edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.graph.edge_references().filter_map(|edge_ref| {
            let from = self.graph.node_weight(edge_ref.source())?;
            let to = self.graph.node_weight(edge_ref.target())?;
            Some(match edge_ref.weight() {
                EdgeKind::Undirected => Edge::undirected(&from.id, &to.id),
                EdgeKind::Directed => Edge::directed(&from.id, &to.id),
            })
        })
    }

    /// Adjacency set of a node: targets of all its edges, plus sources of
    /// incoming *undirected* edges. Directed edges are traversable only
    /// from source to target.
    pub fn neighbors(&self, id: &str) -> BTreeSet<String> {
        let mut result = BTreeSet::new();
        let Some(&idx) = self.indices.get(id.trim()) else {
            return result;
        };

        for edge_ref in self.graph.edges_directed(idx, Direction::Outgoing) {
            if let Some(node) = self.graph.node_weight(edge_ref.target()) {
                result.insert(node.id.clone());
            }
        }

        for edge_ref in self.graph.edges_directed(idx, Direction::Incoming) {
            if *edge_ref.weight() == EdgeKind::Undirected {
                if let Some(node) = self.graph.node_weight(edge_ref.source()) {
                    result.insert(node.id.clone());
                }
            }
        }

        result
    }
}

// ============================================================================
// Tests
// ============================================================================
