//! Coverage-table parsing.
//!
//! Coverage documents carry pipe-delimited tables with a fixed seven-column
//! schema. Rows are parsed positionally into named fields; rows with too
//! few cells are counted as malformed rather than silently dropped, so the
//! final report can say how much noise the scan encountered.

use crate::identifier::is_valid_identifier;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Minimum number of cells for a data row.
pub const MIN_CELLS: usize = 7;

/// Link targets that are navigation aids, never components.
const EXCLUDED_LINK_TARGETS: [&str; 3] = ["Index", "Tasks", "Coverage"];

/// Wikilink markers: `[[target]]` or `[[target|display]]`.
static WIKILINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[\[([^\]]+)\]\]").unwrap());

// ============================================================================
// Types
// ============================================================================

/// One data row of a coverage table, cells trimmed and named.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CoverageRow {
    /// Component identifier (first cell).
    pub component: String,
    /// Component type, e.g. `repo` or `domain`.
    pub kind: String,
    /// Source path the documentation describes.
    pub source_path: String,
    /// Documentation status.
    pub status: String,
    /// Last scan date.
    pub last_scanned: String,
    /// Documentation file name.
    pub doc_file: String,
    /// Raw backlinks cell, possibly containing wikilink markers.
    pub backlinks: String,
    /// Zero-based line number in the source document.
    pub line: usize,
}

/// Result of scanning one document for table rows.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TableScan {
    /// Rows that parsed and passed the validity filter.
    pub rows: Vec<CoverageRow>,
    /// Pipe-delimited lines with fewer than [`MIN_CELLS`] cells.
    pub malformed: usize,
    /// Rows whose component cell failed the validity filter.
    pub rejected: usize,
}

// ============================================================================
// Parsing
// ============================================================================

/// Split a line into table cells, or `None` if it is not a table line.
///
/// Leading and trailing pipes are stripped; interior cells keep their
/// original (untrimmed) text so rewriters can preserve them byte-for-byte.
pub fn split_cells(line: &str) -> Option<Vec<&str>> {
    let trimmed = line.trim();
    if !trimmed.starts_with('|') {
        return None;
    }

    let inner = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let inner = inner.strip_suffix('|').unwrap_or(inner);

    Some(inner.split('|').collect())
}

/// Parse every coverage-table row in a document.
pub fn parse_table(content: &str) -> TableScan {
    let mut scan = TableScan::default();

    for (line_no, line) in content.lines().enumerate() {
        let Some(cells) = split_cells(line) else {
            continue;
        };

        if cells.len() < MIN_CELLS {
            scan.malformed += 1;
            log::debug!("line {line_no}: table row with {} cells skipped", cells.len());
            continue;
        }

        let component = cells[0].trim();

        // Header and separator rows are structure, not data.
        if component.contains("Component") || component.contains("---") {
            continue;
        }

        if !is_valid_identifier(component) {
            scan.rejected += 1;
            continue;
        }

        scan.rows.push(CoverageRow {
            component: component.to_string(),
            kind: cells[1].trim().to_string(),
            source_path: cells[2].trim().to_string(),
            status: cells[3].trim().to_string(),
            last_scanned: cells[4].trim().to_string(),
            doc_file: cells[5].trim().to_string(),
            backlinks: cells[6].trim().to_string(),
            line: line_no,
        });
    }

    scan
}

/// Extract component link targets from a backlinks cell.
///
/// Handles `[[target]]` and `[[target|display]]`, strips a `Components/`
/// prefix, and drops navigation targets (`Index`, `Tasks`, `Coverage`).
/// Validity filtering of the surviving targets is the caller's concern.
pub fn extract_wikilinks(cell: &str) -> Vec<String> {
    let mut targets = Vec::new();

    for capture in WIKILINK.captures_iter(cell) {
        let inner = capture[1].split('|').next().unwrap_or("").trim();

        if EXCLUDED_LINK_TARGETS.contains(&inner) {
            continue;
        }

        let target = inner.strip_prefix("Components/").unwrap_or(inner);
        if !target.is_empty() {
            targets.push(target.to_string());
        }
    }

    targets
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# Coverage

| Component | Type | Source Path | Status | Last Scanned | Doc File | Backlinks |
|-----------|------|-------------|--------|--------------|----------|-----------|
| chat | domain | chat/ | done | 2024-11-02 | chat.md | [[Index]] |
| pubsub-rust | repo | chat/pubsub | todo | 2024-11-02 | pubsub.md | [[Components/chat]] |
| 2024-12-22 | repo | x | todo | 2024-11-02 | x.md | |
| short | row |
";

    // ------------------------------------------------------------------------
    // split_cells
    // ------------------------------------------------------------------------

    #[test]
    fn test_split_cells_basic() {
        let cells = split_cells("| a | b | c |").unwrap();
        assert_eq!(cells, vec![" a ", " b ", " c "]);
    }

    #[test]
    fn test_split_cells_preserves_cell_text() {
        let cells = split_cells("|  spaced  |x|").unwrap();
        assert_eq!(cells, vec!["  spaced  ", "x"]);
    }

    #[test]
    fn test_split_cells_non_table_line() {
        assert!(split_cells("just prose").is_none());
        assert!(split_cells("").is_none());
        assert!(split_cells("# heading").is_none());
    }

    // ------------------------------------------------------------------------
    // parse_table
    // ------------------------------------------------------------------------

    #[test]
    fn test_parse_table_extracts_valid_rows() {
        let scan = parse_table(SAMPLE);

        assert_eq!(scan.rows.len(), 2);
        assert_eq!(scan.rows[0].component, "chat");
        assert_eq!(scan.rows[0].kind, "domain");
        assert_eq!(scan.rows[1].component, "pubsub-rust");
        assert_eq!(scan.rows[1].source_path, "chat/pubsub");
        assert_eq!(scan.rows[1].status, "todo");
    }

    #[test]
    fn test_parse_table_counts_malformed() {
        let scan = parse_table(SAMPLE);
        // "| short | row |" has two cells
        assert_eq!(scan.malformed, 1);
    }

    #[test]
    fn test_parse_table_counts_rejected() {
        let scan = parse_table(SAMPLE);
        // The date row fails the validity filter
        assert_eq!(scan.rejected, 1);
    }

    #[test]
    fn test_parse_table_skips_header_and_separator_silently() {
        let scan = parse_table(SAMPLE);
        assert!(scan.rows.iter().all(|r| r.component != "Component"));
        // Header and separator are neither malformed nor rejected
        assert_eq!(scan.malformed + scan.rejected, 2);
    }

    #[test]
    fn test_parse_table_records_line_numbers() {
        let scan = parse_table(SAMPLE);
        assert_eq!(scan.rows[0].line, 4);
        assert_eq!(scan.rows[1].line, 5);
    }

    #[test]
    fn test_parse_table_empty_document() {
        let scan = parse_table("");
        assert!(scan.rows.is_empty());
        assert_eq!(scan.malformed, 0);
        assert_eq!(scan.rejected, 0);
    }

    #[test]
    fn test_parse_table_orphan_row() {
        let scan =
            parse_table("| orphan-lib | repo | path/x | todo | 2024-01-01 | doc.md | |");
        assert_eq!(scan.rows.len(), 1);
        assert_eq!(scan.rows[0].component, "orphan-lib");
        assert_eq!(scan.rows[0].backlinks, "");
    }

    // ------------------------------------------------------------------------
    // extract_wikilinks
    // ------------------------------------------------------------------------

    #[test]
    fn test_extract_wikilinks_basic() {
        let links = extract_wikilinks("[[foo]] [[bar]]");
        assert_eq!(links, vec!["foo", "bar"]);
    }

    #[test]
    fn test_extract_wikilinks_strips_components_prefix() {
        let links = extract_wikilinks("[[Components/foo]] [[Index]]");
        assert_eq!(links, vec!["foo"]);
    }

    #[test]
    fn test_extract_wikilinks_display_form() {
        let links = extract_wikilinks("[[Components/foo|The Foo Service]]");
        assert_eq!(links, vec!["foo"]);
    }

    #[test]
    fn test_extract_wikilinks_excludes_navigation() {
        let links = extract_wikilinks("[[Index]] [[Tasks]] [[Coverage]]");
        assert!(links.is_empty());
    }

    #[test]
    fn test_extract_wikilinks_empty_cell() {
        assert!(extract_wikilinks("").is_empty());
        assert!(extract_wikilinks("no links here").is_empty());
    }
}
