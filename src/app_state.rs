//! The core state machine bridging the outline and the interactive editor.
//!
//! A TUI needs a single source of truth that can be interrogated and mutated as the user
//! navigates and edits. The outline itself lives in the [`Extension`]; the documents, focus and
//! cursor live in the [`Workbench`]. This module holds what only the terminal front end cares
//! about: which view is showing, which outline rows are expanded and selected, and the editor
//! buffer while a document is being edited.

use crate::document::Position;
use crate::extension::Extension;
use crate::host::Command;
use crate::outline::OutlineNode;
use crate::workbench::Workbench;
use edtui::{EditorState, Lines};
use std::collections::HashSet;
use std::path::Path;
use std::{fs, io};

#[derive(PartialEq)]
/// Determines navigation scope and quit behavior based on project size.
pub enum FileMode {
    /// Single-file mode quits directly to shell.
    Single,
    /// Multi-file mode returns to file list before quitting.
    Multi,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
/// Determines which UI screen renders and how input is interpreted.
pub enum View {
    /// Displays open documents for multi-file sessions.
    FileList,
    /// Shows the outline beside a preview of the active document.
    Outline,
    /// Provides a vim-like editor over the whole active document.
    Editor,
    /// Captures vim-style command input after ':' is pressed.
    Command,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// One visible line of the outline panel.
pub struct OutlineRow {
    /// Child indices from the outline roots down to this node.
    pub path: Vec<usize>,
    /// Entry label.
    pub label: String,
    /// Whether the node has children to expand.
    pub expandable: bool,
    /// Whether its children are currently shown.
    pub expanded: bool,
    /// Whether this is the final child of its parent.
    pub is_last: bool,
    /// For each ancestor level, whether more siblings follow (a guide line is drawn).
    pub guides: Vec<bool>,
    /// Byte offset the entry navigates to.
    pub start_offset: usize,
    /// Byte offset where the entry's span ends.
    pub end_offset: usize,
}

impl OutlineRow {
    #[must_use]
    /// Nesting depth, 0 for top-level entries.
    pub fn depth(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Bridges the outline, the documents and the editor, maintaining session state.
pub struct AppState {
    /// Outline state and host event handling.
    pub extension: Extension,
    /// Documents, focus and cursor.
    pub workbench: Workbench,
    /// Controls whether the file list is shown.
    pub file_mode: FileMode,
    /// Active UI screen determining input handling.
    pub current_view: View,
    /// View to return to once a command line is finished.
    pub previous_view: View,
    /// Selected entry in the file list view.
    pub current_file_index: usize,
    /// Flattened visible outline.
    pub rows: Vec<OutlineRow>,
    /// Selected row in the outline panel.
    pub current_row: usize,
    /// Paths of expanded outline nodes; everything starts collapsed.
    pub expanded: HashSet<Vec<usize>>,
    /// Editor buffer content when the editor view is active.
    pub editor_state: Option<EditorState>,
    /// Accumulates vim-style command input after ':' is pressed.
    pub command_buffer: String,
}

impl AppState {
    #[must_use]
    /// Initialises application state and determines file mode.
    ///
    /// Single-file sessions skip the file list and quit directly to shell, while multi-file
    /// sessions show a file selector and return to it on 'q'.
    pub fn new(extension: Extension, workbench: Workbench) -> Self {
        let file_mode = if workbench.documents().len() > 1 {
            FileMode::Multi
        } else {
            FileMode::Single
        };
        let current_view = if file_mode == FileMode::Multi {
            View::FileList
        } else {
            View::Outline
        };

        Self {
            extension,
            workbench,
            file_mode,
            current_view,
            previous_view: current_view,
            current_file_index: 0,
            rows: Vec::new(),
            current_row: 0,
            expanded: HashSet::new(),
            editor_state: None,
            command_buffer: String::new(),
        }
    }

    /// Initial outline load for the focused document.
    pub fn start(&mut self) {
        self.extension.activate(&mut self.workbench);
        self.sync();
    }

    /// Run an outline command against the workbench.
    pub fn dispatch(&mut self, command: &Command) {
        self.extension.execute(command, &mut self.workbench);
        self.sync();
    }

    /// Deliver queued host events until none remain, then redraw the outline if it changed.
    pub fn sync(&mut self) {
        loop {
            let events = self.workbench.take_events();
            if events.is_empty() {
                break;
            }
            for event in &events {
                self.extension.handle_event(event, &mut self.workbench);
            }
        }

        if self.workbench.take_outline_changed() {
            self.rebuild_rows();
        }
    }

    /// Flatten the outline into visible rows, honouring the expanded set.
    pub fn rebuild_rows(&mut self) {
        let mut rows = Vec::new();
        let mut path = Vec::new();
        flatten(
            self.extension.provider().roots(),
            &self.expanded,
            &mut path,
            &[],
            &mut rows,
        );
        self.rows = rows;
        self.current_row = self.current_row.min(self.rows.len().saturating_sub(1));
    }

    #[must_use]
    /// The selected outline row.
    pub fn selected_row(&self) -> Option<&OutlineRow> {
        self.rows.get(self.current_row)
    }

    #[must_use]
    /// Labels from the outline root down to the selected row.
    pub fn breadcrumb(&self) -> Vec<String> {
        let Some(row) = self.selected_row() else {
            return Vec::new();
        };
        let provider = self.extension.provider();
        (1..=row.path.len())
            .filter_map(|len| provider.node(&row.path[..len]))
            .map(|node| node.label.clone())
            .collect()
    }

    // --- Outline navigation ---

    /// Select the row above.
    pub fn move_up(&mut self) {
        self.current_row = self.current_row.saturating_sub(1);
    }

    /// Select the row below.
    pub fn move_down(&mut self) {
        if self.current_row + 1 < self.rows.len() {
            self.current_row += 1;
        }
    }

    /// Expand the selected node, or step into its first child if already expanded.
    pub fn expand_or_descend(&mut self) {
        let Some(row) = self.selected_row() else {
            return;
        };
        if !row.expandable {
            return;
        }
        if row.expanded {
            self.move_down();
        } else {
            let path = row.path.clone();
            self.expanded.insert(path);
            self.rebuild_rows();
        }
    }

    /// Collapse the selected node, or step out to its parent if already collapsed.
    pub fn collapse_or_ascend(&mut self) {
        let Some(row) = self.selected_row() else {
            return;
        };
        if row.expanded {
            let path = row.path.clone();
            self.expanded.remove(&path);
            self.rebuild_rows();
        } else if let Some((_, parent)) = row.path.split_last() {
            if let Some(index) = self.rows.iter().position(|r| r.path == parent) {
                self.current_row = index;
            }
        }
    }

    /// Move the cursor to the selected entry.
    pub fn reveal_selected(&mut self) {
        let Some(row) = self.selected_row() else {
            return;
        };
        let command = Command::RevealRange {
            start: row.start_offset,
            end: row.end_offset,
            uri: None,
        };
        self.dispatch(&command);
    }

    // --- Files ---

    /// Focus the document highlighted in the file list and show its outline.
    pub fn open_selected_file(&mut self) {
        self.expanded.clear();
        self.current_row = 0;
        self.workbench.focus(self.current_file_index);
        self.sync();
        self.current_view = View::Outline;
    }

    /// Open a document from disk and focus it.
    pub fn open_path(&mut self, path: &Path) {
        if let Some(index) = self.workbench.open(path) {
            self.expanded.clear();
            self.current_row = 0;
            self.current_file_index = index;
            if self.workbench.documents().len() > 1 {
                self.file_mode = FileMode::Multi;
            }
        }
        self.sync();
    }

    /// Close the focused document.
    pub fn close_active(&mut self) {
        self.workbench.close_active();
        self.expanded.clear();
        self.current_row = 0;
        self.current_file_index = self.workbench.active_index().unwrap_or(0);
        self.sync();
    }

    // --- Editor ---

    /// Loads the active document into the editor buffer with the cursor at the revealed line.
    pub fn enter_editor(&mut self) {
        let Some(document) = self.workbench.active() else {
            return;
        };
        let mut state = EditorState::new(Lines::from(document.text()));
        let cursor = self.workbench.cursor;
        state.cursor.row = cursor.line.min(document.line_count().saturating_sub(1));
        state.cursor.col = cursor.column;
        self.editor_state = Some(state);
        self.current_view = View::Editor;
    }

    #[must_use]
    /// Current editor buffer as text.
    pub fn editor_text(&self) -> Option<String> {
        self.editor_state.as_ref().map(|state| {
            state
                .lines
                .iter_row()
                .map(|line| {
                    let row: String = line.iter().collect();
                    row.trim_end_matches('\r').to_string()
                })
                .collect::<Vec<_>>()
                .join("\n")
        })
    }

    /// Write the editor buffer to disk and refresh the outline from it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_editor(&mut self) -> io::Result<()> {
        let Some((uri, text)) = self.pending_edit() else {
            return Ok(());
        };
        fs::write(&uri, &text)?;
        self.commit_editor(text);
        self.workbench.message = Some("Saved".to_string());
        Ok(())
    }

    /// Return to the outline, keeping the buffer's edits in memory unless `discard` is set.
    pub fn exit_editor(&mut self, discard: bool) {
        if !discard {
            if let Some((_, text)) = self.pending_edit() {
                self.commit_editor(text);
            }
        }
        if let Some(state) = &self.editor_state {
            self.workbench.cursor = Position::new(state.cursor.row, state.cursor.col);
        }
        self.editor_state = None;
        self.current_view = View::Outline;
    }

    /// URI of the active document and the editor buffer that would replace its text.
    fn pending_edit(&self) -> Option<(String, String)> {
        let text = self.editor_text()?;
        let document = self.workbench.active()?;
        Some((
            document.uri().to_string(),
            match_line_endings(text, document.text()),
        ))
    }

    fn commit_editor(&mut self, text: String) {
        self.workbench.commit(text);
        self.sync();
    }

    // --- Command line ---

    /// Switch to command input, remembering where to return to.
    pub fn begin_command(&mut self) {
        self.previous_view = self.current_view;
        self.current_view = View::Command;
        self.command_buffer.clear();
        self.workbench.message = None;
    }

    /// Abandon command input.
    pub fn cancel_command(&mut self) {
        self.current_view = self.previous_view;
        self.command_buffer.clear();
    }

    /// Execute the typed command line. Returns `true` when the application should quit.
    pub fn run_command(&mut self) -> bool {
        let line = std::mem::take(&mut self.command_buffer);
        self.current_view = self.previous_view;
        let in_editor = self.editor_state.is_some();

        let (name, arg) = match line.trim().split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (line.trim(), ""),
        };

        match name {
            "w" if in_editor => {
                if let Err(e) = self.save_editor() {
                    self.workbench.message = Some(format!("Error saving: {e}"));
                }
            }
            "x" if in_editor => match self.save_editor() {
                Ok(()) => self.exit_editor(false),
                Err(e) => self.workbench.message = Some(format!("Error saving: {e}")),
            },
            "q" if in_editor => self.exit_editor(false),
            "q!" if in_editor => self.exit_editor(true),
            "q" | "q!" => return self.quit_or_back(),
            "outline" => self.dispatch(&Command::ShowOutline),
            "close" => {
                if in_editor {
                    self.exit_editor(true);
                }
                self.close_active();
                if self.workbench.documents().is_empty() {
                    return true;
                }
            }
            "e" if !arg.is_empty() => {
                self.exit_editor(false);
                self.open_path(Path::new(arg));
                self.current_view = View::Outline;
            }
            "" => {}
            _ => self.workbench.message = Some(format!("Unknown command: {line}")),
        }
        false
    }

    /// Leave the outline: back to the file list in multi-file mode, otherwise quit.
    pub fn quit_or_back(&mut self) -> bool {
        if self.file_mode == FileMode::Multi && self.current_view != View::FileList {
            self.current_file_index = self.workbench.active_index().unwrap_or(0);
            self.current_view = View::FileList;
            false
        } else {
            true
        }
    }
}

/// Keep the document's line endings and trailing newline; the editor buffer drops both.
fn match_line_endings(text: String, original: &str) -> String {
    let ending = if original.contains("\r\n") { "\r\n" } else { "\n" };
    let mut text = if ending == "\n" {
        text
    } else {
        text.replace('\n', ending)
    };
    if original.ends_with('\n') && !text.ends_with('\n') {
        text.push_str(ending);
    }
    text
}

fn flatten(
    nodes: &[OutlineNode],
    expanded: &HashSet<Vec<usize>>,
    path: &mut Vec<usize>,
    guides: &[bool],
    rows: &mut Vec<OutlineRow>,
) {
    for (index, node) in nodes.iter().enumerate() {
        path.push(index);
        let is_last = index + 1 == nodes.len();
        let expandable = node.is_expandable();
        let is_expanded = expandable && expanded.contains(path.as_slice());

        rows.push(OutlineRow {
            path: path.clone(),
            label: node.label.clone(),
            expandable,
            expanded: is_expanded,
            is_last,
            guides: guides.to_vec(),
            start_offset: node.start_offset,
            end_offset: node.end_offset,
        });

        if is_expanded {
            let mut child_guides = guides.to_vec();
            child_guides.push(!is_last);
            flatten(&node.children, expanded, path, &child_guides, rows);
        }
        path.pop();
    }
}

#[cfg(test)]
#[path = "tests/app_state.rs"]
mod tests;
