//! Vaultgraf Graph — link-graph construction and connectivity analysis.
//!
//! The analysis runs as a straight pipeline: the [`builder`] turns parsed
//! documents into an owned [`GraphData`], the [`classify`] module labels
//! every node core, peripheral, or disconnected relative to the major
//! domains, and the [`report`] module projects the result back into the
//! coverage table and a standalone report. No stage mutates another
//! stage's output in place.

#![doc = include_str!("../README.md")]

pub mod builder;
pub mod classify;
pub mod report;
pub mod stats;
pub mod types;
pub mod validation;

// Re-export the types callers use most
pub use builder::{BuildStats, GraphBuilder};
pub use classify::{classify, Classification, ClassifyOptions};
pub use report::{render_report, rewrite_disconnected, RewriteOutcome, DISCONNECTED_STATUS};
pub use stats::{compute_stats, quick_summary, top_nodes_by_degree, GraphStats};
pub use types::{Edge, EdgeKind, GraphData, Node};
pub use validation::{is_clean, validate_graph, ValidationIssue, ValidationResult};
