//! Owned YAML syntax tree with byte spans into the source text.
//!
//! Tree-sitter gives us a concrete syntax tree full of wrapper nodes
//! (`block_node`, `flow_node`, `block_sequence_item`), anchors, tags and
//! comments. The outline and alignment passes only care about mappings,
//! sequences and scalars, so the first document of the stream is lowered into
//! [`AstNode`] once per refresh and the tree-sitter tree is dropped.

use crate::error::{Error, Result};
use crate::formats::yaml::YamlFormat;
use crate::formats::Format;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Parser, Query, QueryCursor};

/// Nesting depth past which nodes are kept as opaque scalars instead of being descended into.
pub const MAX_DEPTH: usize = 256;

#[derive(Clone, Debug, PartialEq, Eq)]
/// A mapping, sequence or scalar together with its byte range in the source.
pub struct AstNode {
    /// What kind of YAML node this is, with its children.
    pub kind: AstKind,
    /// Byte offset where the node begins.
    pub start: usize,
    /// Byte offset where the node ends (exclusive).
    pub end: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Structural classification of an [`AstNode`].
pub enum AstKind {
    /// Key/value pairs in source order.
    Mapping(Vec<Entry>),
    /// Items in source order.
    Sequence(Vec<AstNode>),
    /// Scalar with quotes removed and escapes resolved.
    Scalar(String),
    /// A sequence item with no content (`-` on its own).
    Null,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// One key/value pair of a mapping.
pub struct Entry {
    /// Key text with quotes removed.
    pub key: String,
    /// Value node, absent when the key has no value.
    pub value: Option<AstNode>,
    /// Byte offset where the key begins.
    pub start: usize,
    /// Byte offset where the value (or key, when valueless) ends.
    pub end: usize,
}

impl AstNode {
    #[must_use]
    /// Whether this node is a mapping or a sequence.
    pub fn is_container(&self) -> bool {
        matches!(self.kind, AstKind::Mapping(_) | AstKind::Sequence(_))
    }

    #[must_use]
    /// Mapping entries, or an empty slice for any other kind.
    pub fn entries(&self) -> &[Entry] {
        match &self.kind {
            AstKind::Mapping(entries) => entries,
            _ => &[],
        }
    }

    #[must_use]
    /// Sequence items, or an empty slice for any other kind.
    pub fn items(&self) -> &[AstNode] {
        match &self.kind {
            AstKind::Sequence(items) => items,
            _ => &[],
        }
    }

    #[must_use]
    /// First mapping entry with the given key.
    pub fn entry(&self, key: &str) -> Option<&Entry> {
        self.entries().iter().find(|entry| entry.key == key)
    }

    #[must_use]
    /// Scalar value, if this node is a scalar.
    pub fn scalar(&self) -> Option<&str> {
        match &self.kind {
            AstKind::Scalar(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    /// Raw source text covered by this node, empty if the span no longer fits the source.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.start..self.end).unwrap_or("")
    }
}

/// Parse YAML text and lower the first document into an [`AstNode`].
///
/// Returns `Ok(None)` for a stream without any document content (empty text,
/// comments only, a bare `---`).
///
/// # Errors
///
/// Returns [`Error::Parse`] if the text contains a syntax error anywhere in the
/// stream, and a setup error if the grammar or query cannot be loaded.
pub fn parse(text: &str) -> Result<Option<AstNode>> {
    parse_with(&YamlFormat, text)
}

/// Parse text with an explicit format.
///
/// # Errors
///
/// See [`parse`].
pub fn parse_with(format: &impl Format, text: &str) -> Result<Option<AstNode>> {
    let language = format.language();
    let mut parser = Parser::new();
    parser.set_language(&language)?;

    let tree = parser.parse(text, None).ok_or_else(|| Error::Parse {
        message: "parser returned no tree".to_string(),
        line: 1,
        column: 1,
    })?;
    let root = tree.root_node();

    if root.has_error() {
        return Err(parse_failure(root, text));
    }

    let query = Query::new(&language, format.document_query())?;
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, root, text.as_bytes());
    let Some(document) = matches
        .next()
        .and_then(|m| m.captures.first())
        .map(|capture| capture.node)
    else {
        return Ok(None);
    };

    let mut doc_cursor = document.walk();
    let body = document
        .named_children(&mut doc_cursor)
        .find(|child| matches!(child.kind(), "block_node" | "flow_node"));

    let lowering = Lowering { source: text };
    Ok(body
        .and_then(content_of)
        .map(|node| lowering.node(node, 0)))
}

/// Locate the first ERROR or MISSING node and describe it.
fn parse_failure(root: Node<'_>, text: &str) -> Error {
    let Some(node) = first_error(root) else {
        return Error::Parse {
            message: "syntax error".to_string(),
            line: 1,
            column: 1,
        };
    };

    let message = if node.is_missing() {
        format!("missing `{}`", node.kind())
    } else {
        let snippet = text
            .get(node.start_byte()..node.end_byte())
            .and_then(|s| s.lines().map(str::trim).find(|line| !line.is_empty()))
            .unwrap_or("");
        if snippet.is_empty() {
            "unexpected end of input".to_string()
        } else {
            format!("unexpected `{}`", truncate(snippet, 24))
        }
    };

    let position = node.start_position();
    Error::Parse {
        message,
        line: position.row + 1,
        column: position.column + 1,
    }
}

fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.has_error() {
            if let Some(found) = first_error(child) {
                return Some(found);
            }
        }
    }
    None
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars).collect();
    out.push('…');
    out
}

fn is_decoration(kind: &str) -> bool {
    matches!(kind, "anchor" | "tag" | "comment")
}

/// Strip wrapper nodes down to the mapping, sequence or scalar they hold.
///
/// Returns `None` for a wrapper with nothing but anchors, tags or comments.
fn content_of(mut node: Node<'_>) -> Option<Node<'_>> {
    while matches!(
        node.kind(),
        "block_node" | "flow_node" | "block_sequence_item"
    ) {
        let mut cursor = node.walk();
        let inner = node
            .named_children(&mut cursor)
            .find(|child| !is_decoration(child.kind()));
        node = inner?;
    }
    Some(node)
}

struct Lowering<'s> {
    source: &'s str,
}

impl Lowering<'_> {
    fn raw(&self, node: Node<'_>) -> &str {
        self.source
            .get(node.start_byte()..node.end_byte())
            .unwrap_or("")
    }

    fn node(&self, node: Node<'_>, depth: usize) -> AstNode {
        let kind = if depth >= MAX_DEPTH {
            AstKind::Scalar(self.raw(node).trim().to_string())
        } else {
            match node.kind() {
                "block_mapping" | "flow_mapping" => AstKind::Mapping(self.entries(node, depth)),
                "block_sequence" | "flow_sequence" => AstKind::Sequence(self.items(node, depth)),
                _ => AstKind::Scalar(self.scalar_value(node)),
            }
        };

        AstNode {
            kind,
            start: node.start_byte(),
            end: self.content_end(node),
        }
    }

    /// End of the node's own content.
    ///
    /// tree-sitter-yaml stretches the last node of a block over the blank lines
    /// and comments that follow it, so the end is taken from the last
    /// non-comment token instead of the node itself.
    fn content_end(&self, mut node: Node<'_>) -> usize {
        loop {
            let mut cursor = node.walk();
            let last = node
                .children(&mut cursor)
                .filter(|child| child.kind() != "comment" && child.end_byte() > child.start_byte())
                .last();
            match last {
                Some(child) => node = child,
                None => break,
            }
        }
        node.start_byte() + self.raw(node).trim_end().len()
    }

    fn entries(&self, node: Node<'_>, depth: usize) -> Vec<Entry> {
        let mut cursor = node.walk();
        let entries = node
            .named_children(&mut cursor)
            .filter_map(|child| match child.kind() {
                "block_mapping_pair" | "flow_pair" => Some(self.pair(child, depth)),
                // `{a, b}`: keys with no values
                "flow_node" => Some(Entry {
                    key: self.key_text(child),
                    value: None,
                    start: child.start_byte(),
                    end: self.content_end(child),
                }),
                _ => None,
            })
            .collect();
        entries
    }

    fn pair(&self, pair: Node<'_>, depth: usize) -> Entry {
        let key = pair
            .child_by_field_name("key")
            .map(|key| self.key_text(key))
            .unwrap_or_default();
        let value = pair
            .child_by_field_name("value")
            .and_then(content_of)
            .map(|value| self.node(value, depth + 1));

        Entry {
            key,
            value,
            start: pair.start_byte(),
            end: self.content_end(pair),
        }
    }

    fn items(&self, node: Node<'_>, depth: usize) -> Vec<AstNode> {
        let mut cursor = node.walk();
        let items = node
            .named_children(&mut cursor)
            .filter(|child| !is_decoration(child.kind()))
            .map(|child| match child.kind() {
                // `[a: 1]` is a single-pair mapping inside a flow sequence
                "flow_pair" => AstNode {
                    kind: AstKind::Mapping(vec![self.pair(child, depth + 1)]),
                    start: child.start_byte(),
                    end: self.content_end(child),
                },
                _ => match content_of(child) {
                    Some(content) => self.node(content, depth + 1),
                    None => AstNode {
                        kind: AstKind::Null,
                        start: child.start_byte(),
                        end: self.content_end(child),
                    },
                },
            })
            .collect();
        items
    }

    fn key_text(&self, key: Node<'_>) -> String {
        match content_of(key) {
            Some(content) if content.kind().ends_with("scalar") => self.scalar_value(content),
            Some(content) => self.raw(content).trim().to_string(),
            None => String::new(),
        }
    }

    fn scalar_value(&self, node: Node<'_>) -> String {
        let raw = self.raw(node);
        match node.kind() {
            "plain_scalar" => fold_lines(raw),
            "single_quote_scalar" => fold_lines(strip_quotes(raw, '\'')).replace("''", "'"),
            "double_quote_scalar" => unescape(&fold_lines(strip_quotes(raw, '"'))),
            _ => raw.trim().to_string(),
        }
    }
}

fn strip_quotes(raw: &str, quote: char) -> &str {
    let raw = raw.trim();
    let raw = raw.strip_prefix(quote).unwrap_or(raw);
    raw.strip_suffix(quote).unwrap_or(raw)
}

/// Multi-line flow scalars fold their line breaks into single spaces.
fn fold_lines(raw: &str) -> String {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
#[path = "tests/ast.rs"]
mod tests;
