use crate::document::{Document, Position};
use crate::host::Host;

/// Host double that serves a fixed set of documents and records every callback.
#[derive(Default)]
pub(crate) struct RecordingHost {
    pub documents: Vec<Document>,
    pub active: Option<usize>,
    pub errors: Vec<String>,
    pub redraws: usize,
    pub reveals: Vec<(String, Position)>,
}

impl RecordingHost {
    pub fn with_active(document: Document) -> Self {
        Self {
            documents: vec![document],
            active: Some(0),
            ..Self::default()
        }
    }

    pub fn yaml(uri: &str, text: &str) -> Self {
        Self::with_active(Document::new(uri, "yaml", text))
    }

    /// Replace a document's text, as an edit in the host would.
    pub fn edit(&mut self, uri: &str, text: &str) {
        if let Some(document) = self.documents.iter_mut().find(|d| d.uri() == uri) {
            *document = Document::new(uri, document.language_id(), text);
        }
    }
}

impl Host for RecordingHost {
    fn active_document(&self) -> Option<Document> {
        self.active.and_then(|i| self.documents.get(i)).cloned()
    }

    fn open_document(&mut self, uri: &str) -> Option<Document> {
        self.documents.iter().find(|d| d.uri() == uri).cloned()
    }

    fn show_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    fn outline_changed(&mut self) {
        self.redraws += 1;
    }

    fn reveal(&mut self, uri: &str, position: Position) {
        self.reveals.push((uri.to_string(), position));
    }
}

#[test]
fn test_recording_host_serves_active_document() {
    let mut host = RecordingHost::yaml("a.yaml", "a: 1\n");
    assert_eq!(host.active_document().unwrap().uri(), "a.yaml");
    assert!(host.open_document("missing.yaml").is_none());

    host.edit("a.yaml", "b: 2\n");
    assert_eq!(host.active_document().unwrap().text(), "b: 2\n");
}
