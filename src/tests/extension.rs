use super::Extension;
use crate::document::{Document, Position};
use crate::host::recording::RecordingHost;
use crate::host::{Command, HostEvent};
use crate::provider::Binding;

const CONFIG: &str = "server:\n  port: 80\n\nroutes:\n  - path: /\n";

#[test]
fn test_activate_binds_yaml_editor() {
    let mut extension = Extension::default();
    let mut host = RecordingHost::yaml("config.yaml", CONFIG);

    extension.activate(&mut host);

    assert!(extension.provider().is_bound_to("config.yaml"));
    assert_eq!(extension.provider().roots().len(), 2);
    assert_eq!(host.redraws, 1);
}

#[test]
fn test_non_yaml_editor_unbinds() {
    let mut extension = Extension::default();
    let mut host = RecordingHost::yaml("config.yaml", CONFIG);
    extension.activate(&mut host);

    host.documents
        .push(Document::new("notes.md", "markdown", "# notes\n"));
    host.active = Some(1);
    extension.handle_event(&HostEvent::ActiveEditorChanged, &mut host);

    assert_eq!(extension.provider().binding(), &Binding::Unbound);
    assert!(extension.provider().roots().is_empty());
}

#[test]
fn test_no_active_editor_unbinds() {
    let mut extension = Extension::default();
    let mut host = RecordingHost::yaml("config.yaml", CONFIG);
    extension.activate(&mut host);

    host.active = None;
    extension.handle_event(&HostEvent::ActiveEditorChanged, &mut host);

    assert_eq!(extension.provider().binding(), &Binding::Unbound);
}

#[test]
fn test_closing_bound_document_unbinds() {
    let mut extension = Extension::default();
    let mut host = RecordingHost::yaml("config.yaml", CONFIG);
    extension.activate(&mut host);

    extension.handle_event(&HostEvent::DocumentClosed("other.yaml".into()), &mut host);
    assert!(extension.provider().is_bound_to("config.yaml"));

    extension.handle_event(&HostEvent::DocumentClosed("config.yaml".into()), &mut host);
    assert_eq!(extension.provider().binding(), &Binding::Unbound);
    assert!(extension.provider().roots().is_empty());
}

#[test]
fn test_change_rebuilds_from_new_text() {
    let mut extension = Extension::default();
    let mut host = RecordingHost::yaml("config.yaml", CONFIG);
    extension.activate(&mut host);

    host.edit("config.yaml", "only:\n  - [1]\n");
    extension.handle_event(&HostEvent::DocumentChanged("config.yaml".into()), &mut host);

    let roots = extension.provider().roots();
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0].label, "only:");
}

#[test]
fn test_change_to_other_document_is_ignored() {
    let mut extension = Extension::default();
    let mut host = RecordingHost::yaml("config.yaml", CONFIG);
    extension.activate(&mut host);
    let redraws = host.redraws;

    extension.handle_event(&HostEvent::DocumentChanged("other.yaml".into()), &mut host);

    assert_eq!(host.redraws, redraws);
}

#[test]
fn test_show_outline_is_repeatable() {
    let mut extension = Extension::default();
    let mut host = RecordingHost::yaml("config.yaml", CONFIG);

    extension.execute(&Command::ShowOutline, &mut host);
    let first = extension.provider().roots().to_vec();
    extension.execute(&Command::ShowOutline, &mut host);

    assert_eq!(extension.provider().roots(), first.as_slice());
    assert_eq!(host.redraws, 2);
}

#[test]
fn test_reveal_resolves_to_line_start() {
    let mut extension = Extension::default();
    let mut host = RecordingHost::yaml("config.yaml", CONFIG);
    extension.activate(&mut host);

    let routes = extension.provider().roots()[1].clone();
    let command = Command::RevealRange {
        start: routes.start_offset,
        end: routes.end_offset,
        uri: None,
    };
    extension.execute(&command, &mut host);

    assert_eq!(
        host.reveals,
        [("config.yaml".to_string(), Position::new(3, 0))]
    );
}

#[test]
fn test_reveal_offset_zero() {
    let mut extension = Extension::default();
    let mut host = RecordingHost::yaml("config.yaml", CONFIG);

    let command = Command::RevealRange {
        start: 0,
        end: 4,
        uri: Some("config.yaml".into()),
    };
    extension.execute(&command, &mut host);

    assert_eq!(host.reveals[0].1, Position::new(0, 0));
}

#[test]
fn test_reveal_stale_offset_is_clamped() {
    let mut extension = Extension::default();
    let mut host = RecordingHost::yaml("config.yaml", CONFIG);

    let command = Command::RevealRange {
        start: 10_000,
        end: 10_010,
        uri: None,
    };
    extension.execute(&command, &mut host);

    // Last line of the text, the empty one after the final newline
    assert_eq!(host.reveals[0].1, Position::new(5, 0));
}

#[test]
fn test_reveal_in_unknown_document_does_nothing() {
    let mut extension = Extension::default();
    let mut host = RecordingHost::yaml("config.yaml", CONFIG);

    let command = Command::RevealRange {
        start: 0,
        end: 0,
        uri: Some("missing.yaml".into()),
    };
    extension.execute(&command, &mut host);

    assert!(host.reveals.is_empty());
}
