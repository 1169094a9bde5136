//! Graph integrity checking.
//!
//! Detects structural smells in a built link graph: orphan nodes,
//! self-loops, repeated edge admissions, and configured major domains that
//! no document mentions. None of these abort an analysis; they tell the
//! vault's maintainer where the documentation itself is thin.

use crate::types::{Edge, EdgeKind, GraphData};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ============================================================================
// Types
// ============================================================================

/// Result of graph integrity checking.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether the graph is clean (no warnings).
    pub clean: bool,
    /// Findings worth fixing in the vault.
    pub warnings: Vec<ValidationIssue>,
    /// Informational findings.
    pub info: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Create a new empty (clean) result.
    pub fn new() -> Self {
        Self {
            clean: true,
            warnings: Vec::new(),
            info: Vec::new(),
        }
    }

    /// Add a warning (marks the graph as not clean).
    pub fn add_warning(&mut self, issue: ValidationIssue) {
        self.clean = false;
        self.warnings.push(issue);
    }

    /// Add an informational finding.
    pub fn add_info(&mut self, issue: ValidationIssue) {
        self.info.push(issue);
    }

    /// Total finding count.
    pub fn total_issues(&self) -> usize {
        self.warnings.len() + self.info.len()
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

/// An integrity finding.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Issue code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Affected node IDs (if applicable).
    pub nodes: Vec<String>,
    /// Affected edge descriptions (if applicable).
    pub edges: Vec<String>,
}

impl ValidationIssue {
    /// Create a new issue.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Attach affected nodes.
    pub fn with_nodes(mut self, nodes: Vec<String>) -> Self {
        self.nodes = nodes;
        self
    }

    /// Attach affected edges.
    pub fn with_edges(mut self, edges: Vec<String>) -> Self {
        self.edges = edges;
        self
    }
}

// ============================================================================
// Validation functions
// ============================================================================

/// Check a graph for integrity findings.
pub fn validate_graph(graph: &GraphData) -> ValidationResult {
    let mut result = ValidationResult::new();

    check_orphans(graph, &mut result);
    check_self_loops(graph, &mut result);
    check_duplicate_edges(graph, &mut result);
    check_unseen_major_domains(graph, &mut result);

    result
}

/// Quick check that a graph has no warnings.
pub fn is_clean(graph: &GraphData) -> bool {
    validate_graph(graph).clean
}

// ============================================================================
// Individual checks
// ============================================================================

/// Orphan nodes: empty adjacency set and no incoming directed edge.
fn check_orphans(graph: &GraphData, result: &mut ValidationResult) {
    let mut touched: HashSet<String> = HashSet::new();
    for edge in graph.iter_edges() {
        let (a, b) = edge.endpoints();
        touched.insert(a.to_string());
        touched.insert(b.to_string());
    }

    let mut orphans: Vec<String> = graph
        .node_ids()
        .filter(|id| !touched.contains(*id))
        .map(String::from)
        .collect();
    orphans.sort();

    if !orphans.is_empty() {
        result.add_warning(
            ValidationIssue::new(
                "ORPHAN_NODES",
                format!("{} node(s) have no connections", orphans.len()),
            )
            .with_nodes(orphans),
        );
    }
}

/// Self-loops. A major domain's own coverage row produces one by
/// construction, so these are informational.
fn check_self_loops(graph: &GraphData, result: &mut ValidationResult) {
    let self_loops: Vec<String> = graph
        .iter_edges()
        .filter(|edge| {
            let (a, b) = edge.endpoints();
            a == b
        })
        .map(|edge| describe_edge(&edge))
        .collect();

    if !self_loops.is_empty() {
        result.add_info(
            ValidationIssue::new(
                "SELF_LOOPS",
                format!("{} edge(s) are self-relations", self_loops.len()),
            )
            .with_edges(self_loops),
        );
    }
}

/// Repeated admissions of the same relation. Multi-edges are legal and
/// harmless to classification, so these are informational.
fn check_duplicate_edges(graph: &GraphData, result: &mut ValidationResult) {
    let mut seen: HashSet<(String, String, EdgeKind)> = HashSet::new();
    let mut duplicates: Vec<String> = Vec::new();

    for edge in graph.iter_edges() {
        let (a, b) = edge.endpoints();
        // Undirected relations match in either endpoint order
        let key = match edge.kind() {
            EdgeKind::Undirected if b < a => (b.to_string(), a.to_string(), edge.kind()),
            _ => (a.to_string(), b.to_string(), edge.kind()),
        };
        if !seen.insert(key) {
            duplicates.push(describe_edge(&edge));
        }
    }

    if !duplicates.is_empty() {
        result.add_info(
            ValidationIssue::new(
                "DUPLICATE_EDGES",
                format!("{} repeated edge admission(s)", duplicates.len()),
            )
            .with_edges(duplicates),
        );
    }
}

/// Major domains whose only neighbors are other major domains: the
/// registration step asserted their edges, but no document mentions them.
fn check_unseen_major_domains(graph: &GraphData, result: &mut ValidationResult) {
    let majors = graph.major_domains();

    let unseen: Vec<String> = majors
        .iter()
        .filter(|domain| {
            graph
                .neighbors(domain)
                .iter()
                .all(|neighbor| majors.contains(neighbor))
        })
        .cloned()
        .collect();

    if !unseen.is_empty() {
        result.add_warning(
            ValidationIssue::new(
                "UNSEEN_MAJOR_DOMAINS",
                format!(
                    "{} major domain(s) have no documented components",
                    unseen.len()
                ),
            )
            .with_nodes(unseen),
        );
    }
}

/// Render an edge for issue listings.
fn describe_edge(edge: &Edge) -> String {
    let (a, b) = edge.endpoints();
    match edge.kind() {
        EdgeKind::Undirected => format!("{a} <-> {b}"),
        EdgeKind::Directed => format!("{a} -> {b}"),
    }
}

// ============================================================================
// Tests
// ============================================================================
