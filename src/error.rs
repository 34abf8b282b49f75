//! Error types for yamltree.
//!
//! A malformed document is the only failure a user ever sees: it surfaces as
//! [`Error::Parse`] from the refresh cycle. The remaining variants cover setup
//! problems (grammar loading, query compilation) and file access.

use std::io;
use thiserror::Error;

/// Errors that can occur while loading or parsing YAML documents.
#[derive(Debug, Error)]
pub enum Error {
    /// The document text is not well-formed YAML.
    #[error("Failed to parse YAML: {message} (line {line}, column {column})")]
    Parse {
        /// What the parser tripped over.
        message: String,
        /// 1-based line of the first offending node.
        line: usize,
        /// 1-based column of the first offending node.
        column: usize,
    },
    /// The tree-sitter grammar could not be loaded into the parser.
    #[error("failed to load YAML grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),
    /// A format query failed to compile against its grammar.
    #[error("invalid document query: {0}")]
    Query(#[from] tree_sitter::QueryError),
    /// I/O error when reading or writing documents.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    #[must_use]
    /// Whether this is a malformed-document error rather than a setup or I/O failure.
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

/// Result type for yamltree operations.
pub type Result<T> = std::result::Result<T, Error>;
