//! Summary text parsing and best-effort alignment onto the YAML AST.
//!
//! A summary is an indented listing of labels, one per line:
//!
//! ```text
//! > items
//!   - name: foo
//!   - name: bar
//! ```
//!
//! `>` marks an expandable entry, `-` a leaf, and a line with no marker is
//! expandable with its whole trimmed text as the label. Indentation is the raw
//! count of leading whitespace characters; tabs are not expanded.
//!
//! Alignment walks the summary alongside the AST and tries to pin each label to
//! a node by string comparison. When nothing matches, the node reuses the span
//! of the AST node it was being matched against, so a mismatch jumps to the
//! parent rather than failing.

use crate::ast::{AstKind, AstNode};
use crate::outline::{NodeKind, OutlineNode};

#[derive(Clone, Debug, PartialEq, Eq)]
/// One parsed summary line and the lines nested beneath it.
pub struct SummaryNode {
    /// `>` lines and unmarked lines are expandable, `-` lines are leaves.
    pub kind: NodeKind,
    /// Label text with the marker and surrounding whitespace removed.
    pub label: String,
    /// Leading whitespace character count.
    pub indent: usize,
    /// Lines indented further than this one, up to the next line that is not.
    pub children: Vec<SummaryNode>,
}

#[must_use]
/// Parse summary text into a forest of [`SummaryNode`]s.
///
/// A line closes every open ancestor whose indentation is greater than or equal
/// to its own, then becomes a child of whatever ancestor remains open.
pub fn parse_summary(text: &str) -> Vec<SummaryNode> {
    let mut roots = Vec::new();
    let mut open: Vec<SummaryNode> = Vec::new();

    for node in text.lines().filter_map(parse_line) {
        while open.last().is_some_and(|top| node.indent <= top.indent) {
            close_top(&mut open, &mut roots);
        }
        open.push(node);
    }
    while !open.is_empty() {
        close_top(&mut open, &mut roots);
    }

    roots
}

fn close_top(open: &mut Vec<SummaryNode>, roots: &mut Vec<SummaryNode>) {
    if let Some(done) = open.pop() {
        match open.last_mut() {
            Some(parent) => parent.children.push(done),
            None => roots.push(done),
        }
    }
}

fn parse_line(line: &str) -> Option<SummaryNode> {
    if line.trim().is_empty() {
        return None;
    }

    let body = line.trim_start();
    let indent = line[..line.len() - body.len()].chars().count();
    let (kind, label) = match body.chars().next() {
        Some('>') => (NodeKind::Expandable, &body[1..]),
        Some('-') => (NodeKind::Leaf, &body[1..]),
        _ => (NodeKind::Expandable, body),
    };

    Some(SummaryNode {
        kind,
        label: label.trim().to_string(),
        indent,
        children: Vec::new(),
    })
}

#[derive(Clone, Copy, Debug)]
/// AST node a summary label is being matched against, with the text it spans.
pub struct Scope<'a> {
    /// Candidate context node.
    pub node: &'a AstNode,
    /// Source text the node's offsets point into.
    pub source: &'a str,
}

impl<'a> Scope<'a> {
    #[must_use]
    /// The same source, narrowed to another node.
    pub fn with_node(self, node: &'a AstNode) -> Self {
        Self { node, ..self }
    }
}

#[derive(Clone, Copy, Debug)]
/// Outcome of matching one summary label.
pub enum Alignment<'a> {
    /// The label named this node.
    Matched(&'a AstNode),
    /// Nothing matched; the context node (if any) stands in for the label.
    Fallback(Option<&'a AstNode>),
}

impl<'a> Alignment<'a> {
    #[must_use]
    /// Node whose span and children the summary entry takes on.
    pub fn node(self) -> Option<&'a AstNode> {
        match self {
            Self::Matched(node) => Some(node),
            Self::Fallback(node) => node,
        }
    }
}

#[must_use]
/// Find the AST node a summary label refers to within `scope`.
///
/// In a mapping, the label (minus one trailing `:`) is compared against each key
/// and the match is that key's value. In a sequence, a mapping item matches
/// `name: <its name value>` and any other item matches `- <its trimmed source>`.
pub fn match_label<'a>(label: &str, scope: Scope<'a>) -> Option<&'a AstNode> {
    match &scope.node.kind {
        AstKind::Mapping(entries) => {
            let key = label.strip_suffix(':').unwrap_or(label);
            entries
                .iter()
                .find(|entry| entry.key == key)
                .and_then(|entry| entry.value.as_ref())
        }
        AstKind::Sequence(items) => items.iter().find(|item| match &item.kind {
            AstKind::Mapping(_) => item
                .entry("name")
                .and_then(|entry| entry.value.as_ref())
                .and_then(AstNode::scalar)
                .is_some_and(|name| label.strip_prefix("name: ") == Some(name)),
            _ => label.strip_prefix("- ") == Some(item.text(scope.source).trim()),
        }),
        AstKind::Scalar(_) | AstKind::Null => None,
    }
}

#[must_use]
/// Resolve a label to a matched node, or fall back to the scope's own node.
pub fn resolve<'a>(label: &str, scope: Option<Scope<'a>>) -> Alignment<'a> {
    match scope.and_then(|scope| match_label(label, scope)) {
        Some(node) => Alignment::Matched(node),
        None => Alignment::Fallback(scope.map(|scope| scope.node)),
    }
}

#[must_use]
/// Align a parsed summary against the AST rooted at `root`.
///
/// Spans come from the matched nodes. Without any AST to match against (an
/// empty document) entries get a `0..0` span and their nested lines are dropped.
pub fn align(summary: &[SummaryNode], root: Option<&AstNode>, source: &str) -> Vec<OutlineNode> {
    let scope = root.map(|node| Scope { node, source });
    align_level(summary, scope)
}

fn align_level(summary: &[SummaryNode], scope: Option<Scope<'_>>) -> Vec<OutlineNode> {
    summary
        .iter()
        .map(|entry| align_entry(entry, scope))
        .collect()
}

fn align_entry(entry: &SummaryNode, scope: Option<Scope<'_>>) -> OutlineNode {
    let alignment = resolve(&entry.label, scope);
    if let Alignment::Fallback(_) = alignment {
        log::debug!("no match for summary label {:?}, using parent span", entry.label);
    }

    let target = alignment.node();
    let children = match (target, scope) {
        (Some(node), Some(scope)) if !entry.children.is_empty() => {
            align_level(&entry.children, Some(scope.with_node(node)))
        }
        _ => Vec::new(),
    };

    let kind = if entry.kind == NodeKind::Expandable && !children.is_empty() {
        NodeKind::Expandable
    } else {
        NodeKind::Leaf
    };
    let (start_offset, end_offset) = target.map_or((0, 0), |node| (node.start, node.end));

    OutlineNode {
        label: entry.label.clone(),
        kind,
        start_offset,
        end_offset,
        children,
    }
}

#[cfg(test)]
#[path = "tests/summary.rs"]
mod tests;
