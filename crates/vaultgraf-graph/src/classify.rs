//! Connectivity classification.
//!
//! Every node is labelled `core` (it lies on a discovered simple path
//! between two distinct major domains), `peripheral` (adjacent to a core
//! node but not core), or `disconnected` (neither). Labels are a pure
//! function of the finished graph and the major-domain set: buckets are
//! ordered sets and domain pairs are visited in sorted order, so results
//! do not depend on insertion order.
//!
//! Path enumeration is approximate by design. Simple-path enumeration is
//! combinatorially explosive on dense graphs, so the search is capped at a
//! fixed number of returned paths per domain pair and, as a safety margin
//! the cap alone cannot give, a total visitation budget. A node only
//! reachable via a path beyond the caps is misclassified as peripheral or
//! disconnected; exhausting the visitation budget is surfaced through
//! [`Classification::truncated`].

use crate::types::GraphData;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};

// ============================================================================
// Types
// ============================================================================

/// Tuning knobs for the path search.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ClassifyOptions {
    /// Maximum number of paths returned per major-domain pair.
    pub max_paths_per_pair: usize,
    /// Maximum queue pops per domain pair before the search gives up.
    pub max_visits: usize,
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self {
            max_paths_per_pair: 10,
            max_visits: 100_000,
        }
    }
}

/// The three-way partition of the node set.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Classification {
    /// Nodes on a discovered path between two distinct major domains.
    pub core: BTreeSet<String>,
    /// Nodes adjacent to a core node but not themselves core.
    pub peripheral: BTreeSet<String>,
    /// Nodes with no discovered connection to the core.
    pub disconnected: BTreeSet<String>,
    /// Whether any pair's search exhausted the visitation budget.
    pub truncated: bool,
}

impl Classification {
    /// Total number of classified nodes.
    pub fn total(&self) -> usize {
        self.core.len() + self.peripheral.len() + self.disconnected.len()
    }
}

/// Result of one pair's path search.
struct PathSearch {
    paths: Vec<Vec<String>>,
    truncated: bool,
}

// ============================================================================
// Classification
// ============================================================================

/// Classify every node of the graph.
pub fn classify(graph: &GraphData, options: &ClassifyOptions) -> Classification {
    let domains: Vec<String> = graph.major_domains().into_iter().collect();

    // 1. Core: nodes on discovered paths between distinct major domains.
    let mut core: BTreeSet<String> = BTreeSet::new();
    let mut truncated = false;

    for (i, d1) in domains.iter().enumerate() {
        for d2 in &domains[i + 1..] {
            let search = find_paths(graph, d1, d2, options);
            truncated |= search.truncated;
            for path in search.paths {
                core.extend(path);
            }
        }
    }

    // 2. Peripheral: direct neighbors of core nodes that are not core.
    let mut peripheral: BTreeSet<String> = BTreeSet::new();
    for node in &core {
        for neighbor in graph.neighbors(node) {
            if !core.contains(&neighbor) {
                peripheral.insert(neighbor);
            }
        }
    }

    // 3. Disconnected: everything else.
    let mut disconnected: BTreeSet<String> = BTreeSet::new();
    for id in graph.node_ids() {
        if !core.contains(id) && !peripheral.contains(id) {
            disconnected.insert(id.to_string());
        }
    }

    log::debug!(
        "classified {} core, {} peripheral, {} disconnected{}",
        core.len(),
        peripheral.len(),
        disconnected.len(),
        if truncated { " (truncated)" } else { "" }
    );

    Classification {
        core,
        peripheral,
        disconnected,
        truncated,
    }
}

/// Enumerate simple paths from `start` to `end` by breadth-first search.
///
/// A path is simple: no node repeats within it. The search returns at most
/// `max_paths_per_pair` paths (shortest first, by BFS order) and charges
/// every queue pop against `max_visits`. A missing endpoint yields no
/// paths; the pair participates vacuously.
fn find_paths(graph: &GraphData, start: &str, end: &str, options: &ClassifyOptions) -> PathSearch {
    let mut search = PathSearch {
        paths: Vec::new(),
        truncated: false,
    };

    if !graph.contains_node(start) || !graph.contains_node(end) {
        return search;
    }

    let mut queue: VecDeque<(String, Vec<String>)> = VecDeque::new();
    queue.push_back((start.to_string(), vec![start.to_string()]));

    let mut visits: usize = 0;

    while let Some((node, path)) = queue.pop_front() {
        if search.paths.len() >= options.max_paths_per_pair {
            break;
        }

        visits += 1;
        if visits > options.max_visits {
            log::warn!("path search {start} -> {end} exhausted the visitation budget");
            search.truncated = true;
            break;
        }

        if node == end {
            search.paths.push(path);
            continue;
        }

        for neighbor in graph.neighbors(&node) {
            if !path.contains(&neighbor) {
                let mut extended = path.clone();
                extended.push(neighbor.clone());
                queue.push_back((neighbor, extended));
            }
        }
    }

    search
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::GraphBuilder;
    use crate::types::Edge;

    fn majors(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    // ------------------------------------------------------------------------
    // Scenario: complete graph of three major domains
    // ------------------------------------------------------------------------

    #[test]
    fn test_three_domains_all_core() {
        let mut builder = GraphBuilder::new();
        builder.register_major_domains(&majors(&["chat", "video", "web"]));
        let (graph, _) = builder.finish();

        let result = classify(&graph, &ClassifyOptions::default());

        assert_eq!(result.core, set(&["chat", "video", "web"]));
        assert!(result.peripheral.is_empty());
        assert!(result.disconnected.is_empty());
        assert!(!result.truncated);
    }

    // ------------------------------------------------------------------------
    // Scenario: orphan row lands in disconnected
    // ------------------------------------------------------------------------

    #[test]
    fn test_orphan_is_disconnected() {
        let mut builder = GraphBuilder::new();
        builder.register_major_domains(&majors(&["chat", "video"]));
        builder.ingest_table_document(
            "| orphan-lib | repo | path/x | todo | 2024-01-01 | doc.md | |",
            "Coverage.md",
        );
        let (graph, _) = builder.finish();

        let result = classify(&graph, &ClassifyOptions::default());

        assert!(result.disconnected.contains("orphan-lib"));
        assert_eq!(result.core, set(&["chat", "video"]));
    }

    // ------------------------------------------------------------------------
    // Peripheral: one hop from core
    // ------------------------------------------------------------------------

    #[test]
    fn test_peripheral_is_one_hop_from_core() {
        let mut builder = GraphBuilder::new();
        builder.register_major_domains(&majors(&["chat", "video"]));
        let (mut graph, _) = builder.finish();

        // hangs off chat, but never lies between two domains
        graph.add_edge(Edge::undirected("chat", "chat-audit"));

        let result = classify(&graph, &ClassifyOptions::default());

        assert_eq!(result.core, set(&["chat", "video"]));
        assert_eq!(result.peripheral, set(&["chat-audit"]));
        assert!(result.disconnected.is_empty());
    }

    #[test]
    fn test_intermediate_node_is_core() {
        let mut graph = GraphData::new();
        graph.mark_major_domain("chat");
        graph.mark_major_domain("video");
        graph.add_edge(Edge::undirected("chat", "relay"));
        graph.add_edge(Edge::undirected("relay", "video"));

        let result = classify(&graph, &ClassifyOptions::default());

        assert!(result.core.contains("relay"));
        assert!(result.core.contains("chat"));
        assert!(result.core.contains("video"));
    }

    #[test]
    fn test_directed_edge_respected_in_paths() {
        let mut graph = GraphData::new();
        graph.mark_major_domain("chat");
        graph.mark_major_domain("video");
        // Only a directed path chat -> relay -> video exists
        graph.add_edge(Edge::directed("chat", "relay"));
        graph.add_edge(Edge::directed("relay", "video"));

        let result = classify(&graph, &ClassifyOptions::default());

        // The pair (chat, video) is searched in sorted order, and the
        // directed chain is traversable from chat
        assert!(result.core.contains("relay"));
    }

    #[test]
    fn test_directed_dead_end_not_core() {
        let mut graph = GraphData::new();
        graph.mark_major_domain("chat");
        graph.mark_major_domain("video");
        // Both arrows point *into* the middle: no path crosses it
        graph.add_edge(Edge::directed("chat", "sink"));
        graph.add_edge(Edge::directed("video", "sink"));

        let result = classify(&graph, &ClassifyOptions::default());

        assert!(!result.core.contains("sink"));
        // It is adjacent to the (vacuously empty) core set? No: with no
        // path between the domains, core is empty and sink is disconnected.
        assert!(result.disconnected.contains("sink"));
    }

    // ------------------------------------------------------------------------
    // Partition properties
    // ------------------------------------------------------------------------

    #[test]
    fn test_partition_is_exact() {
        let mut builder = GraphBuilder::new();
        builder.register_major_domains(&majors(&["chat", "video", "web"]));
        builder.ingest_table_document(
            "\
| Component | Type | Source Path | Status | Last Scanned | Doc File | Backlinks |
| pubsub-rust | repo | chat/pubsub | done | 2024-11-02 | p.md | [[edge-proxy]] |
| orphan-lib | repo | path/x | todo | 2024-01-01 | o.md | |
",
            "Coverage.md",
        );
        let (graph, _) = builder.finish();

        let result = classify(&graph, &ClassifyOptions::default());

        assert_eq!(result.total(), graph.node_count());
        assert!(result.core.intersection(&result.peripheral).next().is_none());
        assert!(result.core.intersection(&result.disconnected).next().is_none());
        assert!(result
            .peripheral
            .intersection(&result.disconnected)
            .next()
            .is_none());
    }

    #[test]
    fn test_every_peripheral_has_core_neighbor() {
        let mut builder = GraphBuilder::new();
        builder.register_major_domains(&majors(&["chat", "video"]));
        let (mut graph, _) = builder.finish();
        graph.add_edge(Edge::undirected("chat", "helper-a"));
        graph.add_edge(Edge::undirected("video", "helper-b"));
        graph.add_edge(Edge::undirected("helper-b", "far-away"));

        let result = classify(&graph, &ClassifyOptions::default());

        for node in &result.peripheral {
            let neighbors = graph.neighbors(node);
            let touches_core = result.core.iter().any(|c| neighbors.contains(c))
                || result
                    .core
                    .iter()
                    .any(|c| graph.neighbors(c).contains(node));
            assert!(touches_core, "{node} has no core neighbor");
        }
        // Two hops out is not peripheral
        assert!(result.disconnected.contains("far-away"));
    }

    #[test]
    fn test_order_independence() {
        // Same membership regardless of edge insertion order.
        let mut forward = GraphData::new();
        forward.mark_major_domain("chat");
        forward.mark_major_domain("video");
        forward.add_edge(Edge::undirected("chat", "video"));
        forward.add_edge(Edge::undirected("chat", "relay"));
        forward.add_edge(Edge::undirected("relay", "video"));
        forward.add_edge(Edge::undirected("relay", "spur"));

        let mut reversed = GraphData::new();
        reversed.mark_major_domain("video");
        reversed.mark_major_domain("chat");
        reversed.add_edge(Edge::undirected("relay", "spur"));
        reversed.add_edge(Edge::undirected("relay", "video"));
        reversed.add_edge(Edge::undirected("chat", "relay"));
        reversed.add_edge(Edge::undirected("chat", "video"));

        let options = ClassifyOptions::default();
        let a = classify(&forward, &options);
        let b = classify(&reversed, &options);

        assert_eq!(a.core, b.core);
        assert_eq!(a.peripheral, b.peripheral);
        assert_eq!(a.disconnected, b.disconnected);
    }

    // ------------------------------------------------------------------------
    // Degenerate major-domain sets
    // ------------------------------------------------------------------------

    #[test]
    fn test_single_domain_has_no_pairs() {
        let mut graph = GraphData::new();
        graph.mark_major_domain("chat");
        graph.add_edge(Edge::undirected("chat", "helper"));

        let result = classify(&graph, &ClassifyOptions::default());

        assert!(result.core.is_empty());
        assert!(result.peripheral.is_empty());
        assert_eq!(result.disconnected, set(&["chat", "helper"]));
    }

    #[test]
    fn test_unreached_domain_participates_vacuously() {
        let mut graph = GraphData::new();
        graph.mark_major_domain("chat");
        graph.mark_major_domain("video");
        graph.mark_major_domain("commerce");
        // Only chat and video are connected
        graph.add_edge(Edge::undirected("chat", "video"));

        let result = classify(&graph, &ClassifyOptions::default());

        assert_eq!(result.core, set(&["chat", "video"]));
        assert!(result.disconnected.contains("commerce"));
        assert!(!result.truncated);
    }

    #[test]
    fn test_empty_graph() {
        let graph = GraphData::new();
        let result = classify(&graph, &ClassifyOptions::default());

        assert_eq!(result.total(), 0);
        assert!(!result.truncated);
    }

    // ------------------------------------------------------------------------
    // Caps and budget
    // ------------------------------------------------------------------------

    #[test]
    fn test_path_cap_limits_enumeration() {
        let mut graph = GraphData::new();
        graph.mark_major_domain("a");
        graph.mark_major_domain("b");
        // Many parallel two-hop routes a - mid_i - b
        for i in 0..30 {
            let mid = format!("mid-{i:02}");
            graph.add_edge(Edge::undirected("a", &mid));
            graph.add_edge(Edge::undirected(&mid, "b"));
        }

        let options = ClassifyOptions {
            max_paths_per_pair: 5,
            ..Default::default()
        };
        let result = classify(&graph, &options);

        // Only the midpoints on discovered paths are core; the rest are
        // peripheral (adjacent to a and b). The cap bounds core size.
        let core_mids = result.core.iter().filter(|n| n.starts_with("mid-")).count();
        assert!(core_mids <= 5);
        assert!(!result.peripheral.is_empty());
    }

    #[test]
    fn test_visit_budget_sets_truncated() {
        let mut graph = GraphData::new();
        graph.mark_major_domain("a");
        graph.mark_major_domain("b");
        graph.add_edge(Edge::undirected("a", "x"));
        graph.add_edge(Edge::undirected("x", "y"));
        graph.add_edge(Edge::undirected("y", "b"));

        let options = ClassifyOptions {
            max_paths_per_pair: 10,
            max_visits: 2,
        };
        let result = classify(&graph, &options);

        assert!(result.truncated);
    }

    #[test]
    fn test_classification_serialization() {
        let mut graph = GraphData::new();
        graph.mark_major_domain("chat");
        graph.mark_major_domain("video");
        graph.add_edge(Edge::undirected("chat", "video"));

        let result = classify(&graph, &ClassifyOptions::default());
        let json = serde_json::to_string(&result).unwrap();
        let parsed: Classification = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.core, result.core);
        assert_eq!(parsed.truncated, result.truncated);
    }
}
