//! Component-identifier validity filtering.
//!
//! Coverage tables in a living vault accumulate noise: dates and
//! timestamps that drifted into the component column, file paths, heading
//! fragments, prose, and stray header rows. The filter decides which cell
//! values name an actual component.

use regex::Regex;
use std::sync::LazyLock;

/// Identifiers longer than this are treated as prose, not component names.
const MAX_IDENTIFIER_LEN: usize = 100;

/// Table-header labels that must never become component nodes.
const HEADER_LABELS: [&str; 7] = [
    "Component",
    "Type",
    "Source Path",
    "Status",
    "Last Scanned",
    "Doc File",
    "Backlinks",
];

/// Leading `YYYY-MM-DD` date, with or without a time component after it.
static DATE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}").unwrap());

/// Check whether a string is a valid component identifier.
///
/// Rejects empty strings, date/timestamp prefixes, `src/` paths, markdown
/// headings, over-long prose, and the known table-header labels. Every
/// other trimmed string is accepted.
pub fn is_valid_identifier(candidate: &str) -> bool {
    let candidate = candidate.trim();

    if candidate.is_empty() {
        return false;
    }

    if DATE_PREFIX.is_match(candidate) {
        return false;
    }

    if candidate.starts_with("src/") {
        return false;
    }

    if candidate.starts_with('#') {
        return false;
    }

    if candidate.len() > MAX_IDENTIFIER_LEN {
        return false;
    }

    if HEADER_LABELS.contains(&candidate) {
        return false;
    }

    true
}
