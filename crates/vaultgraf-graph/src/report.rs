//! Report emission.
//!
//! Two artifacts come out of a classification: the coverage table itself,
//! rewritten in place so disconnected rows carry a `disconnected` status,
//! and a standalone connectivity report. Both are produced here as
//! strings; callers own the file writes.

use crate::builder::BuildStats;
use crate::classify::Classification;
use crate::types::GraphData;
use serde::{Deserialize, Serialize};

/// Status literal injected into disconnected rows.
pub const DISCONNECTED_STATUS: &str = "disconnected";

/// Index of the status segment in a pipe-split table line
/// (`["", comp, kind, path, status, ...]`).
const STATUS_SEGMENT: usize = 4;

/// Minimum pipe-split segments for a rewritable row: leading empty, seven
/// cells, trailing empty.
const MIN_SEGMENTS: usize = 9;

// ============================================================================
// Coverage rewrite
// ============================================================================

/// Result of rewriting a coverage document.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RewriteOutcome {
    /// The rewritten document.
    pub content: String,
    /// Number of rows whose status was replaced.
    pub rows_updated: usize,
}

/// Rewrite a coverage document, marking disconnected rows.
///
/// Every table row whose component is classified disconnected has its
/// status cell replaced with [`DISCONNECTED_STATUS`]. All other cells, all
/// other rows, row order, and line endings are preserved byte-for-byte.
pub fn rewrite_disconnected(content: &str, classification: &Classification) -> RewriteOutcome {
    let mut out = String::with_capacity(content.len());
    let mut rows_updated = 0;

    for line in content.split_inclusive('\n') {
        let (body, ending) = split_line_ending(line);

        match rewrite_row(body, classification) {
            Some(rewritten) => {
                rows_updated += 1;
                out.push_str(&rewritten);
            }
            None => out.push_str(body),
        }
        out.push_str(ending);
    }

    RewriteOutcome {
        content: out,
        rows_updated,
    }
}

/// Separate a line's body from its terminator.
fn split_line_ending(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}

/// Rewrite a single line, or `None` when it is left untouched.
fn rewrite_row(body: &str, classification: &Classification) -> Option<String> {
    if !body.trim_start().starts_with('|') {
        return None;
    }

    let segments: Vec<&str> = body.split('|').collect();
    if segments.len() < MIN_SEGMENTS {
        return None;
    }

    let component = segments[1].trim();
    if component.is_empty() || component.contains("Component") || component.contains("---") {
        return None;
    }

    if !classification.disconnected.contains(component) {
        return None;
    }

    let mut rewritten: Vec<String> = segments.iter().map(|s| (*s).to_string()).collect();
    rewritten[STATUS_SEGMENT] = format!(" {DISCONNECTED_STATUS} ");
    Some(rewritten.join("|"))
}

// ============================================================================
// Connectivity report
// ============================================================================

/// Render the connectivity report document.
pub fn render_report(
    graph: &GraphData,
    classification: &Classification,
    stats: &BuildStats,
) -> String {
    let mut out = String::new();

    out.push_str("# Connectivity Analysis Report\n\n");

    out.push_str("## Summary\n\n");
    out.push_str(&format!("- Total Components: {}\n", graph.node_count()));
    out.push_str(&format!(
        "- Core Components (on paths between major domains): {}\n",
        classification.core.len()
    ));
    out.push_str(&format!(
        "- Peripheral Components (one hop from core): {}\n",
        classification.peripheral.len()
    ));
    out.push_str(&format!(
        "- Disconnected Components (no path to core): {}\n",
        classification.disconnected.len()
    ));
    out.push_str(&format!(
        "- Documents skipped as unreadable: {}\n",
        stats.documents_skipped
    ));
    out.push_str(&format!(
        "- Malformed table rows skipped: {}\n",
        stats.rows_malformed
    ));
    out.push_str(&format!(
        "- Rows rejected by the validity filter: {}\n\n",
        stats.rows_rejected
    ));

    if classification.truncated {
        out.push_str(
            "> Path search was truncated by the visitation budget; \
             core membership may be incomplete.\n\n",
        );
    }

    out.push_str("## Major Domains\n\n");
    for domain in graph.major_domains() {
        out.push_str(&format!("- {domain}\n"));
    }
    out.push('\n');

    out.push_str("## Disconnected Components\n\n");
    for component in &classification.disconnected {
        out.push_str(&format!("- {component}\n"));
    }
    out.push('\n');

    out.push_str("## Core Components\n\n");
    for component in &classification.core {
        if graph.is_major_domain(component) {
            out.push_str(&format!("- {component} (major domain)\n"));
        } else {
            out.push_str(&format!("- {component}\n"));
        }
    }
    out.push('\n');

    out.push_str("## Peripheral Components\n\n");
    for component in &classification.peripheral {
        out.push_str(&format!("- {component}\n"));
    }
    out.push('\n');

    out.push_str("## Connectivity Visualization\n\n");
    out.push_str("```\n");
    out.push_str("MAJOR DOMAINS <--> CORE COMPONENTS <--> PERIPHERAL COMPONENTS\n");
    out.push('\n');
    out.push_str("DISCONNECTED COMPONENTS (isolated from graph)\n");
    out.push_str("```\n\n");

    out.push_str("_Generated by vaultgraf._\n");

    out
}

// ============================================================================
// Tests
// ============================================================================
