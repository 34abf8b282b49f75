//! The terminal editor's side of the host boundary.
//!
//! The workbench owns the open documents, which one is focused, and where the
//! cursor sits. Changes the user makes through the TUI are queued as
//! [`HostEvent`]s rather than dispatched directly, so the outline core is never
//! re-entered while it is calling back into the workbench; the app drains the
//! queue after every action.

use crate::document::{Document, Position};
use crate::host::{Host, HostEvent};
use std::path::Path;

/// Open documents, focus, cursor and queued lifecycle events.
pub struct Workbench {
    documents: Vec<Document>,
    active: Option<usize>,
    /// Cursor in the active document.
    pub cursor: Position,
    /// Status feedback displayed in the help bar.
    pub message: Option<String>,
    yaml_extensions: Vec<String>,
    pending: Vec<HostEvent>,
    outline_changed: bool,
}

impl Workbench {
    #[must_use]
    /// Starts with the first document focused, if there is one.
    pub fn new(documents: Vec<Document>, yaml_extensions: Vec<String>) -> Self {
        let active = if documents.is_empty() { None } else { Some(0) };
        Self {
            documents,
            active,
            cursor: Position::default(),
            message: None,
            yaml_extensions,
            pending: Vec::new(),
            outline_changed: false,
        }
    }

    #[must_use]
    /// All open documents in the order they were opened.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    #[must_use]
    /// Index of the focused document.
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    #[must_use]
    /// The focused document.
    pub fn active(&self) -> Option<&Document> {
        self.active.and_then(|index| self.documents.get(index))
    }

    /// Focus another document, queueing an editor change if focus actually moved.
    pub fn focus(&mut self, index: usize) {
        if index >= self.documents.len() || self.active == Some(index) {
            return;
        }
        self.active = Some(index);
        self.cursor = Position::default();
        self.pending.push(HostEvent::ActiveEditorChanged);
    }

    /// Open a file (or reuse it if already open) and focus it.
    ///
    /// Returns the document's index, or `None` if it could not be read.
    pub fn open(&mut self, path: &Path) -> Option<usize> {
        let uri = path.to_string_lossy();
        let index = match self.index_of(&uri) {
            Some(index) => index,
            None => match Document::open(path, &self.yaml_extensions) {
                Ok(document) => {
                    self.pending
                        .push(HostEvent::DocumentOpened(document.uri().to_string()));
                    self.documents.push(document);
                    self.documents.len() - 1
                }
                Err(e) => {
                    self.message = Some(format!("Cannot open {}: {e}", path.display()));
                    return None;
                }
            },
        };
        self.focus(index);
        Some(index)
    }

    /// Close the focused document. Focus moves to its neighbour, if any.
    pub fn close_active(&mut self) {
        let Some(index) = self.active else {
            return;
        };
        let closed = self.documents.remove(index);
        self.pending
            .push(HostEvent::DocumentClosed(closed.uri().to_string()));

        self.active = if self.documents.is_empty() {
            None
        } else {
            Some(index.min(self.documents.len() - 1))
        };
        self.cursor = Position::default();
        self.pending.push(HostEvent::ActiveEditorChanged);
    }

    /// Replace the focused document's text with an edited buffer.
    pub fn commit(&mut self, text: String) {
        let Some(index) = self.active else {
            return;
        };
        let current = &self.documents[index];
        if current.text() == text {
            return;
        }
        let updated = Document::new(current.uri(), current.language_id(), text);
        let uri = updated.uri().to_string();
        self.documents[index] = updated;
        self.pending.push(HostEvent::DocumentChanged(uri));
    }

    /// Drain lifecycle events queued since the last call.
    pub fn take_events(&mut self) -> Vec<HostEvent> {
        std::mem::take(&mut self.pending)
    }

    /// Whether the outline was rebuilt since the last call.
    pub fn take_outline_changed(&mut self) -> bool {
        std::mem::take(&mut self.outline_changed)
    }

    fn index_of(&self, uri: &str) -> Option<usize> {
        self.documents.iter().position(|document| document.uri() == uri)
    }
}

impl Host for Workbench {
    fn active_document(&self) -> Option<Document> {
        self.active().cloned()
    }

    fn open_document(&mut self, uri: &str) -> Option<Document> {
        if let Some(index) = self.index_of(uri) {
            return self.documents.get(index).cloned();
        }
        let document = Document::open(Path::new(uri), &self.yaml_extensions).ok()?;
        self.pending
            .push(HostEvent::DocumentOpened(document.uri().to_string()));
        self.documents.push(document.clone());
        Some(document)
    }

    fn show_error(&mut self, message: &str) {
        self.message = Some(message.to_string());
    }

    fn outline_changed(&mut self) {
        self.outline_changed = true;
    }

    fn reveal(&mut self, uri: &str, position: Position) {
        if let Some(index) = self.index_of(uri) {
            self.focus(index);
        }
        self.cursor = position;
    }
}

#[cfg(test)]
#[path = "tests/workbench.rs"]
mod tests;
