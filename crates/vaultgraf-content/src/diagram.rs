//! Mermaid diagram-block parsing.
//!
//! Index documents embed fenced ```` ```mermaid ```` blocks whose
//! `flowchart`/`graph` bodies record directed relations between
//! repositories. The fenced blocks are located with `pulldown-cmark`; the
//! arrow lines inside them are matched with a regex, since mermaid bodies
//! are not markdown.

use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag, TagEnd};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// A directed relation `from --> to` extracted from a diagram body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagramEdge {
    pub from: String,
    pub to: String,
}

/// Arrow relations between plain identifiers, arbitrary whitespace around
/// the arrow.
static ARROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Za-z0-9_\-]+)\s*-->\s*([A-Za-z0-9_\-]+)").unwrap()
});

/// Extract all directed diagram edges from a document.
///
/// Only fenced blocks with a `mermaid` info string whose body declares a
/// `flowchart` or `graph` diagram participate. Identifiers are stripped of
/// surrounding bracket decoration.
pub fn extract_diagram_edges(content: &str) -> Vec<DiagramEdge> {
    let mut edges = Vec::new();

    for block in fenced_mermaid_blocks(content) {
        if !is_flow_diagram(&block) {
            log::debug!("skipping non-flow mermaid block");
            continue;
        }

        for capture in ARROW.captures_iter(&block) {
            let from = clean_identifier(&capture[1]);
            let to = clean_identifier(&capture[2]);
            if !from.is_empty() && !to.is_empty() {
                edges.push(DiagramEdge { from, to });
            }
        }
    }

    edges
}

/// Collect the bodies of all fenced blocks tagged `mermaid`.
fn fenced_mermaid_blocks(content: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Option<String> = None;

    for event in Parser::new(content) {
        match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
                let tag = info.split_whitespace().next().unwrap_or("");
                if tag == "mermaid" {
                    current = Some(String::new());
                }
            }
            Event::Text(text) => {
                if let Some(ref mut body) = current {
                    body.push_str(&text);
                }
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some(body) = current.take() {
                    blocks.push(body);
                }
            }
            _ => {}
        }
    }

    blocks
}

/// Whether a mermaid body is a flowchart/graph diagram.
fn is_flow_diagram(body: &str) -> bool {
    body.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .is_some_and(|first| first.starts_with("flowchart") || first.starts_with("graph"))
}

/// Strip surrounding bracket decoration from a diagram identifier.
fn clean_identifier(name: &str) -> String {
    name.trim_matches(|c| c == '[' || c == ']').to_string()
}

// ============================================================================
// Tests
// ============================================================================
