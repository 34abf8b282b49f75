//! Wires host lifecycle events and commands to the outline provider.
//!
//! Everything here runs synchronously inside the host's event loop: an event
//! comes in, the provider is rebound and rebuilt, and the host is called back
//! before control returns. The `Extension` is the only owner of outline state
//! and is passed explicitly to whoever dispatches events.

use crate::host::{Command, Host, HostEvent};
use crate::provider::OutlineProvider;

#[derive(Debug, Default)]
/// Outline state plus the rules for reacting to the host.
pub struct Extension {
    provider: OutlineProvider,
}

impl Extension {
    #[must_use]
    /// Wraps a provider; nothing is bound until [`Self::activate`].
    pub fn new(provider: OutlineProvider) -> Self {
        Self { provider }
    }

    #[must_use]
    /// The outline provider, for drawing.
    pub fn provider(&self) -> &OutlineProvider {
        &self.provider
    }

    /// Initial outline load for whatever editor is focused at startup.
    pub fn activate(&mut self, host: &mut impl Host) {
        log::info!("yamltree activated");
        self.refresh_for_active_editor(host);
    }

    /// React to a lifecycle notification.
    pub fn handle_event(&mut self, event: &HostEvent, host: &mut impl Host) {
        match event {
            HostEvent::ActiveEditorChanged | HostEvent::DocumentOpened(_) => {
                self.refresh_for_active_editor(host);
            }
            HostEvent::DocumentClosed(uri) => {
                if self.provider.is_bound_to(uri) {
                    self.provider.unbind();
                    self.provider.refresh(host);
                }
            }
            HostEvent::DocumentChanged(uri) => {
                if self.provider.is_bound_to(uri) {
                    if let Some(document) = host.open_document(uri) {
                        self.provider.bind(document);
                    }
                    self.provider.refresh(host);
                }
            }
        }
    }

    /// Run a user command.
    pub fn execute(&mut self, command: &Command, host: &mut impl Host) {
        match command {
            Command::ShowOutline => self.refresh_for_active_editor(host),
            Command::RevealRange { start, end, uri } => {
                reveal_range(*start, *end, uri.as_deref(), host);
            }
        }
    }

    /// Bind to the focused document if it is YAML, otherwise unbind, then rebuild.
    fn refresh_for_active_editor(&mut self, host: &mut impl Host) {
        match host.active_document() {
            Some(document) if document.is_yaml() => self.provider.bind(document),
            _ => self.provider.unbind(),
        }
        self.provider.refresh(host);
    }
}

/// Put the cursor at the start of the line holding `start`.
///
/// Offsets are clamped to the document as it is now, which may differ from the
/// snapshot the outline was built from.
fn reveal_range(start: usize, end: usize, uri: Option<&str>, host: &mut impl Host) {
    let document = match uri {
        Some(uri) => host.open_document(uri),
        None => host.active_document(),
    };
    let Some(document) = document else {
        log::warn!("no document to reveal {start}..{end} in");
        return;
    };

    let position = document.line_start_position(start);
    log::debug!(
        "reveal {start}..{end} in {} at line {}",
        document.uri(),
        position.line
    );
    host.reveal(document.uri(), position);
}

#[cfg(test)]
#[path = "tests/extension.rs"]
mod tests;
