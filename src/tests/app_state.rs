use super::{AppState, FileMode, View};
use crate::document::{Document, Position};
use crate::extension::Extension;
use crate::workbench::Workbench;
use std::fs;
use std::io::Write;
use tempfile::NamedTempFile;

const COMPOSE: &str = "\
services:
  web:
    ports: [80]
  db:
    image: postgres
volumes:
  - name: data
";

fn exts() -> Vec<String> {
    vec!["yaml".to_string(), "yml".to_string()]
}

fn started(documents: Vec<Document>) -> AppState {
    let workbench = Workbench::new(documents, exts());
    let mut app = AppState::new(Extension::default(), workbench);
    app.start();
    app
}

fn compose() -> AppState {
    started(vec![Document::new("compose.yaml", "yaml", COMPOSE)])
}

fn labels(app: &AppState) -> Vec<&str> {
    app.rows.iter().map(|r| r.label.as_str()).collect()
}

#[test]
fn test_single_file_starts_on_collapsed_outline() {
    let app = compose();
    assert!(app.file_mode == FileMode::Single);
    assert_eq!(app.current_view, View::Outline);
    assert_eq!(labels(&app), ["services:", "volumes:"]);
    assert!(app.rows.iter().all(|r| r.expandable && !r.expanded));
}

#[test]
fn test_expand_and_collapse() {
    let mut app = compose();

    app.expand_or_descend();
    assert_eq!(labels(&app), ["services:", "web:", "db:", "volumes:"]);
    assert!(app.rows[0].expanded);
    assert_eq!(app.rows[1].depth(), 1);
    assert!(!app.rows[1].is_last);
    assert!(app.rows[2].is_last);

    // Already expanded: step into the first child
    app.expand_or_descend();
    assert_eq!(app.selected_row().unwrap().label, "web:");

    // Child is collapsed: step out to the parent
    app.collapse_or_ascend();
    assert_eq!(app.current_row, 0);

    app.collapse_or_ascend();
    assert_eq!(labels(&app), ["services:", "volumes:"]);
}

#[test]
fn test_leaf_rows_do_not_expand() {
    let mut app = compose();
    app.expand_or_descend();
    app.move_down();
    app.move_down();
    // `db:` has only scalars beneath it
    assert_eq!(app.selected_row().unwrap().label, "db:");
    assert!(!app.selected_row().unwrap().expandable);

    app.expand_or_descend();
    assert_eq!(app.rows.len(), 4);
}

#[test]
fn test_move_stays_in_bounds() {
    let mut app = compose();
    app.move_up();
    assert_eq!(app.current_row, 0);
    app.move_down();
    app.move_down();
    assert_eq!(app.current_row, 1);
}

#[test]
fn test_reveal_moves_cursor_to_entry_line() {
    let mut app = compose();
    app.move_down();
    app.reveal_selected();
    assert_eq!(app.workbench.cursor, Position::new(5, 0));
}

#[test]
fn test_breadcrumb_follows_selection() {
    let mut app = compose();
    app.expand_or_descend();
    app.expand_or_descend();
    assert_eq!(app.breadcrumb(), ["services:", "web:"]);
}

#[test]
fn test_malformed_document_shows_error_and_empty_outline() {
    let app = started(vec![Document::new("bad.yaml", "yaml", "a: [1, 2")]);
    assert!(app.rows.is_empty());
    assert!(app
        .workbench
        .message
        .as_deref()
        .unwrap()
        .starts_with("Failed to parse YAML"));
}

#[test]
fn test_multi_file_switching() {
    let mut app = started(vec![
        Document::new("compose.yaml", "yaml", COMPOSE),
        Document::new("notes.txt", "txt", "plain text\n"),
        Document::new("other.yaml", "yaml", "only:\n  - [1]\n"),
    ]);
    assert!(app.file_mode == FileMode::Multi);
    assert_eq!(app.current_view, View::FileList);
    assert_eq!(labels(&app), ["services:", "volumes:"]);

    app.current_file_index = 2;
    app.open_selected_file();
    assert_eq!(app.current_view, View::Outline);
    assert_eq!(labels(&app), ["only:"]);

    app.current_file_index = 1;
    app.open_selected_file();
    assert!(app.rows.is_empty(), "non-YAML documents have no outline");

    assert!(!app.quit_or_back());
    assert_eq!(app.current_view, View::FileList);
    assert_eq!(app.current_file_index, 1);
    assert!(app.quit_or_back());
}

#[test]
fn test_editor_edits_rebuild_outline() {
    let mut app = compose();
    app.move_down();
    app.reveal_selected();
    app.enter_editor();
    assert_eq!(app.current_view, View::Editor);
    assert_eq!(app.editor_state.as_ref().unwrap().cursor.row, 5);

    if let Some(ref mut editor_state) = app.editor_state {
        editor_state.lines = edtui::Lines::from("renamed:\n  - [1]");
    }
    app.exit_editor(false);

    assert_eq!(app.current_view, View::Outline);
    assert_eq!(labels(&app), ["renamed:"]);
    assert_eq!(app.workbench.active().unwrap().text(), "renamed:\n  - [1]\n");
}

#[test]
fn test_discarded_edits_leave_document_alone() {
    let mut app = compose();
    app.enter_editor();
    if let Some(ref mut editor_state) = app.editor_state {
        editor_state.lines = edtui::Lines::from("gone: {}");
    }
    app.exit_editor(true);

    assert_eq!(app.workbench.active().unwrap().text(), COMPOSE);
    assert_eq!(labels(&app), ["services:", "volumes:"]);
}

#[test]
fn test_save_writes_file_and_keeps_trailing_newline() {
    let mut file = NamedTempFile::with_suffix(".yaml").unwrap();
    writeln!(file, "a:\n  - 1").unwrap();
    let document = Document::open(file.path(), &exts()).unwrap();
    let mut app = started(vec![document]);

    app.enter_editor();
    if let Some(ref mut editor_state) = app.editor_state {
        editor_state.lines = edtui::Lines::from("a:\n  - 1\nb:\n  c: [2]");
    }
    app.save_editor().unwrap();

    let content = fs::read_to_string(file.path()).unwrap();
    assert_eq!(content, "a:\n  - 1\nb:\n  c: [2]\n");
    assert_eq!(app.workbench.message.as_deref(), Some("Saved"));
    assert_eq!(labels(&app), ["a:", "b:"]);
    assert_eq!(app.current_view, View::Editor, "save keeps the editor open");
}

#[test]
fn test_commands() {
    let mut app = compose();

    app.begin_command();
    assert_eq!(app.current_view, View::Command);
    app.command_buffer.push_str("bogus");
    assert!(!app.run_command());
    assert_eq!(app.current_view, View::Outline);
    assert_eq!(app.workbench.message.as_deref(), Some("Unknown command: bogus"));

    app.begin_command();
    app.command_buffer.push_str("outline");
    assert!(!app.run_command());
    assert_eq!(labels(&app), ["services:", "volumes:"]);

    app.begin_command();
    app.command_buffer.push_str("wq");
    app.cancel_command();
    assert_eq!(app.current_view, View::Outline);
    assert!(app.command_buffer.is_empty());

    app.begin_command();
    app.command_buffer.push('q');
    assert!(app.run_command(), "single-file mode quits");
}

#[test]
fn test_quit_in_editor_returns_to_outline() {
    let mut app = compose();
    app.enter_editor();
    app.begin_command();
    app.command_buffer.push_str("q!");
    assert!(!app.run_command());
    assert_eq!(app.current_view, View::Outline);
    assert!(app.editor_state.is_none());
}

#[test]
fn test_edit_command_opens_file() {
    let mut file = NamedTempFile::with_suffix(".yml").unwrap();
    writeln!(file, "extra:\n  - {{k: v}}").unwrap();

    let mut app = compose();
    app.begin_command();
    app.command_buffer = format!("e {}", file.path().display());
    assert!(!app.run_command());

    assert!(app.file_mode == FileMode::Multi);
    assert_eq!(app.current_file_index, 1);
    assert_eq!(labels(&app), ["extra:"]);
}

#[test]
fn test_close_command() {
    let mut app = started(vec![
        Document::new("compose.yaml", "yaml", COMPOSE),
        Document::new("other.yaml", "yaml", "only:\n  - [1]\n"),
    ]);
    app.open_selected_file();

    app.begin_command();
    app.command_buffer.push_str("close");
    assert!(!app.run_command());
    assert_eq!(app.workbench.documents().len(), 1);
    assert_eq!(labels(&app), ["only:"]);

    app.begin_command();
    app.command_buffer.push_str("close");
    assert!(app.run_command(), "closing the last document quits");
    assert!(app.rows.is_empty());
}

#[test]
fn test_close_from_file_list_stays_on_file_list() {
    let mut app = started(vec![
        Document::new("compose.yaml", "yaml", COMPOSE),
        Document::new("other.yaml", "yaml", "only:\n  - [1]\n"),
        Document::new("third.yaml", "yaml", "last:\n  - [2]\n"),
    ]);
    assert_eq!(app.current_view, View::FileList);

    app.begin_command();
    app.command_buffer.push_str("close");
    assert!(!app.run_command());
    assert_eq!(app.current_view, View::FileList);
    assert_eq!(app.workbench.documents().len(), 2);
    assert!(app.editor_state.is_none());
}

#[test]
fn test_save_keeps_crlf_line_endings() {
    let mut file = NamedTempFile::with_suffix(".yaml").unwrap();
    file.write_all(b"a:\r\n  - 1\r\n").unwrap();
    let document = Document::open(file.path(), &exts()).unwrap();
    let mut app = started(vec![document]);

    app.enter_editor();
    if let Some(ref mut editor_state) = app.editor_state {
        editor_state.lines = edtui::Lines::from("a:\n  - 2");
    }
    app.save_editor().unwrap();

    let content = fs::read_to_string(file.path()).unwrap();
    assert_eq!(content, "a:\r\n  - 2\r\n");
    assert_eq!(app.workbench.active().unwrap().text(), "a:\r\n  - 2\r\n");
}

#[test]
fn test_unedited_crlf_buffer_is_not_a_change() {
    let original = "a:\r\n  - 1\r\nb:\r\n  c: [2]\r\n";
    let mut app = started(vec![Document::new("crlf.yaml", "yaml", original)]);
    app.workbench.take_events();

    app.enter_editor();
    app.exit_editor(false);

    assert_eq!(app.workbench.active().unwrap().text(), original);
    assert!(app.workbench.take_events().is_empty());
}
