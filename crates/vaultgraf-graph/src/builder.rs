//! Graph construction from vault documents.
//!
//! The builder owns the graph while documents are ingested and hands it
//! off, together with the scan statistics, when the scan is complete. No
//! document or row failure aborts a build: unreadable documents are
//! recorded and skipped by the caller, malformed and rejected rows are
//! counted here.

use crate::types::{Edge, GraphData};
use serde::{Deserialize, Serialize};
use vaultgraf_content::{extract_diagram_edges, extract_wikilinks, is_valid_identifier, parse_table};

// ============================================================================
// Build statistics
// ============================================================================

/// Counters accumulated over one build, surfaced in the final report.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BuildStats {
    /// Documents successfully scanned.
    pub documents_scanned: usize,
    /// Documents skipped as unreadable or missing.
    pub documents_skipped: usize,
    /// Table rows that parsed and passed the validity filter.
    pub rows_parsed: usize,
    /// Pipe-delimited lines with too few cells.
    pub rows_malformed: usize,
    /// Rows rejected by the identifier validity filter.
    pub rows_rejected: usize,
    /// Backlink targets that contributed edges.
    pub backlinks_extracted: usize,
    /// Directed edges contributed by diagram blocks.
    pub diagram_edges: usize,
}

// ============================================================================
// GraphBuilder
// ============================================================================

/// Builds a [`GraphData`] from coverage tables and diagram documents.
///
/// Register the major domains before ingesting tables: rows are connected
/// to a domain when their source path mentions it.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: GraphData,
    majors: Vec<String>,
    stats: BuildStats,
}

impl GraphBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current build statistics.
    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }

    /// Register the major domains.
    ///
    /// Each name becomes a node marked as a major domain, and every pair
    /// of domains is connected with an undirected edge: the domains are
    /// asserted to interact regardless of textual evidence.
    pub fn register_major_domains(&mut self, names: &[String]) {
        for name in names {
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            self.graph.mark_major_domain(name);
            self.majors.push(name.to_string());
        }

        for i in 0..self.majors.len() {
            for j in (i + 1)..self.majors.len() {
                self.graph
                    .add_edge(Edge::undirected(&self.majors[i], &self.majors[j]));
            }
        }
    }

    /// Ingest a coverage-table document.
    ///
    /// Every valid row contributes its component as a node; every valid
    /// backlink target contributes a node and an undirected edge to the
    /// component; a row whose source path mentions a major domain (or
    /// whose type is `domain` for that domain) is connected to it.
    pub fn ingest_table_document(&mut self, content: &str, source: &str) {
        let scan = parse_table(content);

        self.stats.documents_scanned += 1;
        self.stats.rows_parsed += scan.rows.len();
        self.stats.rows_malformed += scan.malformed;
        self.stats.rows_rejected += scan.rejected;

        log::debug!(
            "{source}: {} rows, {} malformed, {} rejected",
            scan.rows.len(),
            scan.malformed,
            scan.rejected
        );

        for row in &scan.rows {
            self.graph.add_node(&row.component);

            for target in extract_wikilinks(&row.backlinks) {
                if is_valid_identifier(&target) {
                    self.graph
                        .add_edge(Edge::undirected(&row.component, &target));
                    self.stats.backlinks_extracted += 1;
                }
            }

            for domain in &self.majors {
                if row.source_path.contains(domain.as_str())
                    || (row.kind == "domain" && row.component == *domain)
                {
                    self.graph.add_edge(Edge::undirected(&row.component, domain));
                }
            }
        }
    }

    /// Ingest an index document containing diagram blocks.
    ///
    /// Each arrow contributes both endpoints and a directed edge; no
    /// reverse edge is added.
    pub fn ingest_diagram_document(&mut self, content: &str, source: &str) {
        let edges = extract_diagram_edges(content);

        self.stats.documents_scanned += 1;
        self.stats.diagram_edges += edges.len();

        log::debug!("{source}: {} diagram edges", edges.len());

        for edge in edges {
            self.graph.add_edge(Edge::directed(edge.from, edge.to));
        }
    }

    /// Record a document that could not be read.
    pub fn record_skipped_document(&mut self, source: &str) {
        self.stats.documents_skipped += 1;
        log::warn!("skipping unreadable document: {source}");
    }

    /// Finish the build, yielding the graph and the statistics.
    pub fn finish(self) -> (GraphData, BuildStats) {
        (self.graph, self.stats)
    }
}

// ============================================================================
// Tests
// ============================================================================
