//! Outline representation for YAML documents.
//!
//! The outline only shows containers: a mapping entry appears when its value is
//! a mapping or sequence, and a sequence item appears when it is one itself.
//! Scalar leaves are left out entirely, so a branch made only of scalars does
//! not show up at all. Every node keeps the byte span it was derived from so the
//! host can jump back into the source.

use crate::ast::{AstKind, AstNode};
use serde::Serialize;
use std::fmt::Write;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
/// Whether an outline entry can be expanded in the tree view.
pub enum NodeKind {
    /// Has children to show.
    Expandable,
    /// Rendered without an expander.
    Leaf,
}

impl NodeKind {
    #[must_use]
    /// Marker character used in the summary text format.
    pub fn marker(self) -> char {
        match self {
            Self::Expandable => '>',
            Self::Leaf => '-',
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// Labeled entry in the outline tree with the source span it navigates to.
pub struct OutlineNode {
    /// Text shown in the tree view.
    pub label: String,
    /// Expandable only when `children` is non-empty.
    pub kind: NodeKind,
    /// Byte offset where the span begins.
    pub start_offset: usize,
    /// Byte offset where the span ends (exclusive).
    pub end_offset: usize,
    /// Nested entries in source order.
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    #[must_use]
    /// Creates a node, deriving its kind from whether it has children.
    pub fn new(label: String, start_offset: usize, end_offset: usize, children: Vec<Self>) -> Self {
        let kind = if children.is_empty() {
            NodeKind::Leaf
        } else {
            NodeKind::Expandable
        };
        Self {
            label,
            kind,
            start_offset,
            end_offset,
            children,
        }
    }

    #[must_use]
    /// Whether the tree view should draw an expander for this node.
    pub fn is_expandable(&self) -> bool {
        self.kind == NodeKind::Expandable
    }
}

#[must_use]
/// Build the outline for a parsed document.
///
/// `None` (an empty document) yields an empty outline.
pub fn build_outline(root: Option<&AstNode>, source: &str) -> Vec<OutlineNode> {
    root.map_or_else(Vec::new, |node| outline_children(node, source))
}

/// Outline entries for the containers directly inside `node`.
fn outline_children(node: &AstNode, source: &str) -> Vec<OutlineNode> {
    match &node.kind {
        AstKind::Mapping(entries) => entries
            .iter()
            .filter_map(|entry| {
                let value = entry.value.as_ref().filter(|value| value.is_container())?;
                Some(OutlineNode::new(
                    format!("{}:", entry.key),
                    entry.start,
                    entry.end,
                    outline_children(value, source),
                ))
            })
            .collect(),
        AstKind::Sequence(items) => items
            .iter()
            .filter(|item| item.is_container())
            .map(|item| {
                OutlineNode::new(
                    item_label(item, source),
                    item.start,
                    item.end,
                    outline_children(item, source),
                )
            })
            .collect(),
        AstKind::Scalar(_) | AstKind::Null => Vec::new(),
    }
}

/// Label for a container sequence item.
///
/// Mappings are named after their first pair; anything else shows its source on one line.
fn item_label(item: &AstNode, source: &str) -> String {
    let Some(first) = item.entries().first() else {
        return single_line(item.text(source));
    };
    match &first.value {
        None => format!("{}:", first.key),
        Some(value) => match value.scalar() {
            Some(scalar) => format!("{}: {}", first.key, single_line(scalar)),
            None => format!("{}: {}", first.key, single_line(value.text(source))),
        },
    }
}

/// Trim raw source and fold its line breaks so the label fits on one row.
fn single_line(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[must_use]
/// Render an outline in the summary text format (`>` expandable, `-` leaf).
///
/// Children are indented two spaces per level, so the output parses back with
/// [`crate::summary::parse_summary`] into the same shape.
pub fn render_summary(nodes: &[OutlineNode]) -> String {
    let mut out = String::new();
    write_summary(&mut out, nodes, 0);
    out
}

fn write_summary(out: &mut String, nodes: &[OutlineNode], depth: usize) {
    for node in nodes {
        // Writing to a String cannot fail
        let _ = writeln!(
            out,
            "{:indent$}{} {}",
            "",
            node.kind.marker(),
            node.label,
            indent = depth * 2
        );
        write_summary(out, &node.children, depth + 1);
    }
}

#[cfg(test)]
#[path = "tests/outline.rs"]
mod tests;
