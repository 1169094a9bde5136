//! YAML frontmatter extraction and checking.
//!
//! Vault documents carry an optional leading `---` frontmatter block with
//! scan metadata. A document without frontmatter is acceptable; one with a
//! malformed block, unparseable YAML, or missing required fields is
//! reported by the frontmatter audit.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fields every frontmatter block is expected to carry.
pub const REQUIRED_FIELDS: [&str; 3] = ["status", "source_path", "last_scanned"];

// ============================================================================
// Types
// ============================================================================

/// Outcome of extracting a frontmatter block from a document.
#[derive(Clone, Debug, PartialEq)]
pub enum Frontmatter {
    /// The document does not begin with a frontmatter delimiter.
    Absent,
    /// A delimited block exists but contains nothing.
    Empty,
    /// The block is unclosed, not valid YAML, or not a mapping.
    Invalid { reason: String },
    /// Parsed frontmatter mapping.
    Parsed(yaml_serde::Value),
}

/// Result of checking one document's frontmatter.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FrontmatterReport {
    /// Whether the document passes the audit.
    pub ok: bool,
    /// Human-readable problems, empty when `ok`.
    pub problems: Vec<String>,
}

// ============================================================================
// Extraction
// ============================================================================

/// Extract the leading frontmatter block, if any.
pub fn extract(content: &str) -> Frontmatter {
    let Some(rest) = content.strip_prefix("---") else {
        return Frontmatter::Absent;
    };

    // The opening delimiter must be a line of its own.
    let rest = match rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n')) {
        Some(r) => r,
        None => return Frontmatter::Absent,
    };

    let mut yaml_lines: Vec<&str> = Vec::new();
    let mut closed = false;

    for line in rest.lines() {
        if line.trim_end() == "---" {
            closed = true;
            break;
        }
        yaml_lines.push(line);
    }

    if !closed {
        return Frontmatter::Invalid {
            reason: "unclosed frontmatter block".to_string(),
        };
    }

    let yaml_text = yaml_lines.join("\n");
    if yaml_text.trim().is_empty() {
        return Frontmatter::Empty;
    }

    match yaml_serde::from_str::<yaml_serde::Value>(&yaml_text) {
        Ok(value) if value.is_mapping() => Frontmatter::Parsed(value),
        Ok(_) => Frontmatter::Invalid {
            reason: "frontmatter is not a key/value mapping".to_string(),
        },
        Err(e) => Frontmatter::Invalid {
            reason: format!("invalid YAML: {e}"),
        },
    }
}

// ============================================================================
// Checking
// ============================================================================

/// Check a document's frontmatter against the audit rules.
pub fn check_document(content: &str) -> FrontmatterReport {
    let mut problems = Vec::new();

    match extract(content) {
        // Absence and emptiness are fine: not every vault page is scanned.
        Frontmatter::Absent | Frontmatter::Empty => {}
        Frontmatter::Invalid { reason } => problems.push(reason),
        Frontmatter::Parsed(value) => {
            for field in REQUIRED_FIELDS {
                if value.get(field).is_none() {
                    problems.push(format!("missing required field: {field}"));
                }
            }

            if let Some(date) = value.get("last_scanned").and_then(|v| v.as_str()) {
                if !valid_scan_date(date) {
                    problems.push(format!("last_scanned is not a date: {date}"));
                }
            }
        }
    }

    FrontmatterReport {
        ok: problems.is_empty(),
        problems,
    }
}

/// Whether a `last_scanned` value parses as a calendar date.
fn valid_scan_date(value: &str) -> bool {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
        || chrono::DateTime::parse_from_rfc3339(value).is_ok()
}

// ============================================================================
// Tests
// ============================================================================
