//! The outline provider: the single bound document and the outline built from it.
//!
//! The provider is either unbound, in which case its outline is always empty, or
//! bound to one document snapshot. Every refresh throws the previous outline
//! away and rebuilds it from scratch; there is no diffing and no attempt to keep
//! a stale outline on screen when the document fails to parse.
//!
//! ```text
//! Unbound --bind(doc)--> Bound(doc) --unbind--> Unbound
//!                        ^        |
//!                        |________|
//!                  bind(doc) / refresh
//! ```

use crate::ast;
use crate::document::Document;
use crate::error::Result;
use crate::host::Host;
use crate::outline::{build_outline, render_summary, OutlineNode};
use crate::summary::{align, parse_summary};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Which document, if any, the outline is tracking.
pub enum Binding {
    #[default]
    /// No document; the outline is empty.
    Unbound,
    /// Tracking this document snapshot.
    Bound(Document),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Where the outline's labels come from.
pub enum OutlineSource {
    #[default]
    /// Built directly from the document's mappings and sequences.
    Syntax,
    /// Labels from summary text, aligned onto the document's AST.
    Summary(String),
}

#[derive(Debug, Default)]
/// Holds the current binding and the outline last built for it.
pub struct OutlineProvider {
    binding: Binding,
    source: OutlineSource,
    roots: Vec<OutlineNode>,
}

impl OutlineProvider {
    #[must_use]
    /// Unbound provider building outlines from document syntax.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    /// Unbound provider aligning the given summary text on every refresh.
    pub fn with_summary(summary: impl Into<String>) -> Self {
        Self {
            source: OutlineSource::Summary(summary.into()),
            ..Self::default()
        }
    }

    /// Track a document. The outline is not rebuilt until [`Self::refresh`].
    pub fn bind(&mut self, document: Document) {
        log::info!("outline bound to {}", document.uri());
        self.binding = Binding::Bound(document);
    }

    /// Stop tracking any document.
    pub fn unbind(&mut self) {
        if let Binding::Bound(document) = &self.binding {
            log::info!("outline unbound from {}", document.uri());
        }
        self.binding = Binding::Unbound;
    }

    #[must_use]
    /// Current binding state.
    pub fn binding(&self) -> &Binding {
        &self.binding
    }

    #[must_use]
    /// The bound document, if any.
    pub fn document(&self) -> Option<&Document> {
        match &self.binding {
            Binding::Bound(document) => Some(document),
            Binding::Unbound => None,
        }
    }

    #[must_use]
    /// Whether the provider is bound to the document with this URI.
    pub fn is_bound_to(&self, uri: &str) -> bool {
        self.document().is_some_and(|document| document.uri() == uri)
    }

    #[must_use]
    /// Top-level outline entries.
    pub fn roots(&self) -> &[OutlineNode] {
        &self.roots
    }

    #[must_use]
    /// Node reached by following child indices from the roots.
    pub fn node(&self, path: &[usize]) -> Option<&OutlineNode> {
        let (first, rest) = path.split_first()?;
        rest.iter()
            .try_fold(self.roots.get(*first)?, |node, &index| node.children.get(index))
    }

    #[must_use]
    /// Children shown under the node at `path`; the roots for an empty path.
    pub fn children(&self, path: &[usize]) -> &[OutlineNode] {
        if path.is_empty() {
            return &self.roots;
        }
        match self.node(path) {
            Some(node) => &node.children,
            None => &[],
        }
    }

    /// Build the outline for a document without touching provider state.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not well-formed YAML.
    pub fn build(&self, document: &Document) -> Result<Vec<OutlineNode>> {
        let text = document.text();
        let root = ast::parse(text)?;
        Ok(match &self.source {
            OutlineSource::Syntax => build_outline(root.as_ref(), text),
            OutlineSource::Summary(summary) => align(&parse_summary(summary), root.as_ref(), text),
        })
    }

    /// Rebuild the outline for the bound document and tell the host to redraw.
    ///
    /// A parse failure is reported to the host once and leaves the outline empty.
    pub fn refresh(&mut self, host: &mut impl Host) {
        self.roots.clear();

        if let Some(document) = self.document() {
            match self.build(document) {
                Ok(roots) => {
                    if log::log_enabled!(log::Level::Debug) {
                        log::debug!("outline for {}:\n{}", document.uri(), render_summary(&roots));
                    }
                    self.roots = roots;
                }
                Err(e) => {
                    log::warn!("{}: {e}", document.uri());
                    host.show_error(&e.to_string());
                }
            }
        }

        host.outline_changed();
    }
}

#[cfg(test)]
#[path = "tests/provider.rs"]
mod tests;
