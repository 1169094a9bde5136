//! Vaultgraf Content — document parsing for markdown vaults.
//!
//! This crate turns vault documents into structured data for the graph
//! builder and the audits:
//!
//! - [`table`]: coverage-table rows and `[[wikilink]]` extraction
//! - [`diagram`]: mermaid flowchart/graph arrow extraction
//! - [`identifier`]: component-identifier validity filtering
//! - [`frontmatter`]: YAML frontmatter extraction and checking

#![doc = include_str!("../README.md")]

pub mod diagram;
pub mod frontmatter;
pub mod identifier;
pub mod table;

// Re-export the types callers use most
pub use diagram::{extract_diagram_edges, DiagramEdge};
pub use identifier::is_valid_identifier;
pub use table::{extract_wikilinks, parse_table, CoverageRow, TableScan};
