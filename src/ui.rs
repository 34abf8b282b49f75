//! The UI renders the application state into something visible and vim-able.
//!
//! The draw function dispatches based on the current view. The outline view shows the outline
//! tree with box-drawing characters beside a preview of the document, scrolled so the cursor
//! line sits in the middle of the panel.

use crate::app_state::{AppState, FileMode, OutlineRow, View};
use crate::config::Config;
use edtui::{EditorTheme, EditorView, SyntaxHighlighter};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Renders the active view based on current application state.
pub fn draw(f: &mut Frame, app: &mut AppState, cfg: &Config) {
    let view = if app.current_view == View::Command {
        app.previous_view
    } else {
        app.current_view
    };
    match view {
        View::FileList => draw_file_list(f, app),
        View::Outline | View::Command => draw_outline(f, app, cfg),
        View::Editor => draw_editor(f, app, cfg),
    }
}

/// Generate box-drawing prefix for tree structure
fn get_tree_prefix(row: &OutlineRow) -> String {
    if row.depth() == 0 {
        return String::new();
    }

    let mut prefix = String::new();

    // Draw vertical lines for ancestor levels below the roots
    for &has_more in row.guides.iter().skip(1) {
        if has_more {
            prefix.push_str("│   ");
        } else {
            prefix.push_str("    ");
        }
    }

    if row.is_last {
        prefix.push_str("└── ");
    } else {
        prefix.push_str("├── ");
    }

    prefix
}

fn expander(row: &OutlineRow) -> &'static str {
    match (row.expandable, row.expanded) {
        (true, true) => "▾ ",
        (true, false) => "▸ ",
        (false, _) => "  ",
    }
}

fn split_main(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);
    (chunks[0], chunks[1])
}

fn draw_file_list(f: &mut Frame, app: &AppState) {
    let (main, bottom) = split_main(f.area());
    let active = app.workbench.active_index();

    let items: Vec<ListItem> = app
        .workbench
        .documents()
        .iter()
        .enumerate()
        .map(|(i, document)| {
            let marker = if Some(i) == active { "● " } else { "  " };
            let color = if document.is_yaml() {
                Color::Cyan
            } else {
                Color::DarkGray
            };
            let line = Line::from(vec![
                Span::raw(marker),
                Span::styled(
                    format!("📄 {}", document.uri()),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  [{}]", document.language_id()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]);
            ListItem::new(line)
        })
        .collect();

    let title = format!("Files ({})", app.workbench.documents().len());
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default().with_selected(Some(app.current_file_index));
    f.render_stateful_widget(list, main, &mut state);

    draw_status(f, app, bottom, "↑/↓: Navigate | Enter: Open | :e PATH Open file | q: Quit");
}

fn draw_outline(f: &mut Frame, app: &AppState, cfg: &Config) {
    let (main, bottom) = split_main(f.area());
    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(cfg.outline_width),
            Constraint::Percentage(100 - cfg.outline_width),
        ])
        .split(main);

    let items: Vec<ListItem> = app
        .rows
        .iter()
        .map(|row| {
            let style = if row.expandable {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            };
            let line = Line::from(vec![
                Span::styled(get_tree_prefix(row), Style::default().fg(Color::DarkGray)),
                Span::raw(expander(row)),
                Span::styled(row.label.clone(), style),
            ]);
            ListItem::new(line)
        })
        .collect();

    let title = match app.workbench.active() {
        Some(document) if document.is_yaml() => format!("Outline ({} entries)", app.rows.len()),
        Some(_) => "Outline (not YAML)".to_string(),
        None => "Outline".to_string(),
    };
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default().with_selected(if app.rows.is_empty() {
        None
    } else {
        Some(app.current_row)
    });
    f.render_stateful_widget(list, panels[0], &mut state);

    draw_preview(f, app, panels[1]);

    let help = if app.file_mode == FileMode::Multi {
        "↑/↓: Navigate | ←/→: Collapse/Expand | Enter: Reveal | e: Edit | Tab: Files | q: Back"
    } else {
        "↑/↓: Navigate | ←/→: Collapse/Expand | Enter: Reveal | e: Edit | :outline Refresh | q: Quit"
    };
    draw_status(f, app, bottom, help);
}

/// First line to show so that `line` lands in the middle of a panel `height` rows tall.
fn centred_scroll(line: usize, height: usize, total: usize) -> usize {
    let max_scroll = total.saturating_sub(height);
    line.saturating_sub(height / 2).min(max_scroll)
}

fn draw_preview(f: &mut Frame, app: &AppState, area: Rect) {
    let block = Block::default().borders(Borders::ALL);
    let Some(document) = app.workbench.active() else {
        f.render_widget(Paragraph::new("No document").block(block), area);
        return;
    };

    let cursor_line = app.workbench.cursor.line;
    let height = usize::from(area.height.saturating_sub(2));
    let scroll = centred_scroll(cursor_line, height, document.line_count());
    let number_width = document.line_count().to_string().len();

    let lines: Vec<Line> = (scroll..document.line_count().min(scroll + height))
        .map(|i| {
            let number = Span::styled(
                format!("{:>number_width$} ", i + 1),
                Style::default().fg(Color::DarkGray),
            );
            let text = Span::raw(document.line(i).to_string());
            let line = Line::from(vec![number, text]);
            if i == cursor_line {
                line.style(Style::default().add_modifier(Modifier::REVERSED))
            } else {
                line
            }
        })
        .collect();

    let title = format!(
        "{} ({}:{})",
        document.uri(),
        cursor_line + 1,
        app.workbench.cursor.column + 1
    );
    f.render_widget(Paragraph::new(lines).block(block.title(title)), area);
}

fn draw_editor(f: &mut Frame, app: &mut AppState, cfg: &Config) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Breadcrumb
            Constraint::Min(0),    // Editor
            Constraint::Length(3), // Help
        ])
        .split(f.area());

    let breadcrumb = app.breadcrumb().join(" > ");
    let breadcrumb_widget =
        Paragraph::new(breadcrumb).block(Block::default().borders(Borders::ALL).title("Navigation"));
    f.render_widget(breadcrumb_widget, chunks[0]);

    let title = app
        .workbench
        .active()
        .map_or_else(String::new, |document| format!("Editing: {}", document.uri()));

    if let Some(ref mut editor_state) = app.editor_state {
        let block = Block::default().borders(Borders::ALL).title(title);
        let inner = block.inner(chunks[1]);
        f.render_widget(block, chunks[1]);

        let syntax_highlighter = SyntaxHighlighter::new(&cfg.theme, "yaml");
        let editor = EditorView::new(editor_state)
            .theme(EditorTheme::default())
            .syntax_highlighter(Some(syntax_highlighter))
            .wrap(true);

        f.render_widget(editor, inner);
    }

    draw_status(
        f,
        app,
        chunks[2],
        ":w Save | :x Save & Exit | :q Back (keep edits) | :q! Discard | Esc: Back",
    );
}

/// Help, message or command line at the bottom of the screen.
fn draw_status(f: &mut Frame, app: &AppState, area: Rect, help: &str) {
    let (text, title) = if app.current_view == View::Command {
        (format!(":{}", app.command_buffer), "Command")
    } else if let Some(ref msg) = app.workbench.message {
        (msg.clone(), "")
    } else {
        (help.to_string(), "")
    };

    let widget = Paragraph::new(text).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::centred_scroll;

    #[test]
    fn test_cursor_line_is_centred() {
        assert_eq!(centred_scroll(50, 20, 200), 40);
    }

    #[test]
    fn test_scroll_stops_at_document_edges() {
        assert_eq!(centred_scroll(2, 20, 200), 0);
        assert_eq!(centred_scroll(195, 20, 200), 180);
        assert_eq!(centred_scroll(3, 20, 5), 0);
    }
}
