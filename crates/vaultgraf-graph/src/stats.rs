//! Graph statistics.
//!
//! Structural summaries of a built link graph: size, edge-kind breakdown,
//! degree distribution, and the best-connected components.

use crate::types::{EdgeKind, GraphData};
use serde::{Deserialize, Serialize};

// ============================================================================
// Types
// ============================================================================

/// Summary statistics about a link graph.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GraphStats {
    /// Total number of nodes.
    pub node_count: usize,
    /// Total number of edges (each admission counted once).
    pub edge_count: usize,
    /// Edges admitted as directed (diagram arrows).
    pub directed_edge_count: usize,
    /// Edges admitted as undirected (table links, domain registration).
    pub undirected_edge_count: usize,
    /// Number of major-domain nodes.
    pub major_domain_count: usize,
    /// Nodes with an empty adjacency set.
    pub orphan_count: usize,
    /// Average adjacency-set size.
    pub avg_degree: f32,
    /// Largest adjacency-set size.
    pub max_degree: usize,
    /// Node with the largest adjacency set (lexicographically smallest on
    /// ties, for determinism).
    pub most_connected: Option<String>,
}

// ============================================================================
// Functions
// ============================================================================

/// Compute statistics for a graph.
pub fn compute_stats(graph: &GraphData) -> GraphStats {
    let node_count = graph.node_count();
    let edge_count = graph.edge_count();

    let mut directed_edge_count = 0;
    let mut undirected_edge_count = 0;
    for edge in graph.iter_edges() {
        match edge.kind() {
            EdgeKind::Directed => directed_edge_count += 1,
            EdgeKind::Undirected => undirected_edge_count += 1,
        }
    }

    let mut degrees: Vec<(String, usize)> = graph
        .node_ids()
        .map(|id| (id.to_string(), graph.neighbors(id).len()))
        .collect();
    // Highest degree first, alphabetical within a degree
    degrees.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let orphan_count = degrees.iter().filter(|(_, d)| *d == 0).count();
    let total_degree: usize = degrees.iter().map(|(_, d)| d).sum();
    let avg_degree = if node_count > 0 {
        total_degree as f32 / node_count as f32
    } else {
        0.0
    };

    let (most_connected, max_degree) = degrees
        .first()
        .map(|(id, d)| (Some(id.clone()), *d))
        .unwrap_or((None, 0));

    GraphStats {
        node_count,
        edge_count,
        directed_edge_count,
        undirected_edge_count,
        major_domain_count: graph.major_domains().len(),
        orphan_count,
        avg_degree,
        max_degree,
        most_connected,
    }
}

/// Get a quick summary of graph size.
pub fn quick_summary(graph: &GraphData) -> String {
    format!("{} nodes, {} edges", graph.node_count(), graph.edge_count())
}

/// Get the top N nodes by adjacency-set size, ties broken alphabetically.
pub fn top_nodes_by_degree(graph: &GraphData, limit: usize) -> Vec<(String, usize)> {
    let mut scores: Vec<(String, usize)> = graph
        .node_ids()
        .map(|id| (id.to_string(), graph.neighbors(id).len()))
        .collect();

    scores.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    scores.truncate(limit);
    scores
}

// ============================================================================
// Tests
// ============================================================================
