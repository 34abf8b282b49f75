//! The boundary between the outline core and whatever editor is hosting it.
//!
//! The host owns the documents and the screen. It tells the core when editors
//! change or documents open and close ([`HostEvent`]), forwards user commands
//! ([`Command`]), and in return is asked to show errors, redraw the outline and
//! move its cursor ([`Host`]).

use crate::document::{Document, Position};

/// Editor services the outline core calls back into.
pub trait Host {
    /// Snapshot of the document in the focused editor, if any.
    fn active_document(&self) -> Option<Document>;

    /// Open (or find the already open) document with this URI.
    fn open_document(&mut self, uri: &str) -> Option<Document>;

    /// Show a one-line error message to the user.
    fn show_error(&mut self, message: &str);

    /// The outline was rebuilt and should be redrawn.
    fn outline_changed(&mut self);

    /// Focus the document, put the cursor at `position` and scroll it to the centre of the view.
    fn reveal(&mut self, uri: &str, position: Position);
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Lifecycle notifications from the host.
pub enum HostEvent {
    /// Focus moved to another editor, or away from all editors.
    ActiveEditorChanged,
    /// A document was opened.
    DocumentOpened(String),
    /// A document was closed.
    DocumentClosed(String),
    /// Edits to a document were committed.
    DocumentChanged(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// User-invoked commands.
pub enum Command {
    /// Rebuild the outline for the active document.
    ShowOutline,
    /// Move the cursor to the start of the line containing `start`.
    RevealRange {
        /// Byte offset of the span start.
        start: usize,
        /// Byte offset of the span end.
        end: usize,
        /// Document to reveal in; the active document when absent.
        uri: Option<String>,
    },
}

#[cfg(test)]
#[path = "tests/host.rs"]
pub(crate) mod recording;
