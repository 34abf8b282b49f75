//! YAML format implementation using tree-sitter-yaml.
//!
//! A YAML stream may hold several documents separated by `---`; the query
//! captures each of them and yamltree only ever outlines the first.

use crate::formats::Format;

/// Tree-sitter queries for YAML streams.
pub struct YamlFormat;

impl Format for YamlFormat {
    fn language(&self) -> tree_sitter::Language {
        tree_sitter_yaml::LANGUAGE.into()
    }

    fn document_query(&self) -> &'static str {
        "(document) @document"
    }
}
