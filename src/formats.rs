//! Format trait and implementations for the document types yamltree can outline.
//!
//! This module defines the `Format` trait which abstracts over a tree-sitter
//! grammar and the query that locates the document body inside a parse tree.

pub mod yaml;

/// Grammar and queries needed to locate an outlineable document in a parse tree.
pub trait Format {
    /// Tree-sitter language used to parse the raw text.
    fn language(&self) -> tree_sitter::Language;
    /// Query whose first capture is the document node to outline.
    fn document_query(&self) -> &str;
}
