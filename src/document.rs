//! Text snapshots handed to the outline provider by the host editor.
//!
//! A document is identified by its URI (the file path as given), carries the
//! language tag the host assigned it, and precomputes the byte offset of every
//! line start so offset-to-position lookups are a binary search.

use std::path::Path;
use std::{fs, io};

/// Language tag for documents yamltree will outline.
pub const YAML_LANGUAGE_ID: &str = "yaml";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
/// Zero-based line and column (in characters) within a document.
pub struct Position {
    /// Line index, starting at 0.
    pub line: usize,
    /// Character index within the line, starting at 0.
    pub column: usize,
}

impl Position {
    #[must_use]
    /// Creates a position from a line and column.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Immutable snapshot of an open text buffer.
pub struct Document {
    uri: String,
    language_id: String,
    text: String,
    line_starts: Vec<usize>,
}

impl Document {
    #[must_use]
    /// Snapshot `text` under the given URI and language tag.
    pub fn new(uri: impl Into<String>, language_id: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            uri: uri.into(),
            language_id: language_id.into(),
            text,
            line_starts,
        }
    }

    /// Read a document from disk, tagging it as YAML when its extension is listed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read as UTF-8 text.
    pub fn open(path: &Path, yaml_extensions: &[String]) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(Self::new(
            path.to_string_lossy(),
            language_for(path, yaml_extensions),
            text,
        ))
    }

    #[must_use]
    /// Identifier the host uses for this document.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    #[must_use]
    /// Language tag assigned by the host.
    pub fn language_id(&self) -> &str {
        &self.language_id
    }

    #[must_use]
    /// Whether the host identified this document as YAML.
    pub fn is_yaml(&self) -> bool {
        self.language_id == YAML_LANGUAGE_ID
    }

    #[must_use]
    /// Full text content.
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    /// Number of lines; an empty document has one (empty) line.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    #[must_use]
    /// Text of a single line without its terminator, empty if out of range.
    pub fn line(&self, index: usize) -> &str {
        let Some(&start) = self.line_starts.get(index) else {
            return "";
        };
        let end = self
            .line_starts
            .get(index + 1)
            .map_or(self.text.len(), |next| next - 1);
        self.text[start..end].trim_end_matches('\r')
    }

    #[must_use]
    /// Clamp an offset into the text and back onto a character boundary.
    pub fn clamp_offset(&self, offset: usize) -> usize {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        offset
    }

    #[must_use]
    /// Convert a byte offset to a line/column position.
    ///
    /// Offsets past the end (for instance from an outline built against an
    /// older snapshot) clamp to the end of the text rather than failing.
    pub fn position_at(&self, offset: usize) -> Position {
        let offset = self.clamp_offset(offset);
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let column = self.text[self.line_starts[line]..offset].chars().count();
        Position { line, column }
    }

    #[must_use]
    /// Start of the line containing `offset`.
    pub fn line_start_position(&self, offset: usize) -> Position {
        Position::new(self.position_at(offset).line, 0)
    }
}

/// Language tag for a path: `yaml` when its extension is one of `yaml_extensions`.
#[must_use]
pub fn language_for(path: &Path, yaml_extensions: &[String]) -> String {
    let ext = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    if yaml_extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext)) {
        YAML_LANGUAGE_ID.to_string()
    } else if ext.is_empty() {
        "plaintext".to_string()
    } else {
        ext
    }
}

#[cfg(test)]
#[path = "tests/document.rs"]
mod tests;
