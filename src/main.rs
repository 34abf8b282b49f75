//! yamltree: a navigable outline of YAML mappings and sequences.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use edtui::{EditorEventHandler, EditorMode};
use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use yamltree::app_state::{AppState, View};
use yamltree::config::Config;
use yamltree::document::{Document, Position};
use yamltree::extension::Extension;
use yamltree::host::Host;
use yamltree::outline::render_summary;
use yamltree::provider::OutlineProvider;
use yamltree::workbench::Workbench;
use yamltree::{input, ui};

#[derive(Parser)]
#[command(name = "yamltree")]
#[command(about = "Navigable outline of YAML mappings and sequences", long_about = None)]
struct Args {
    /// Files or directories to outline
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// File extensions to treat as YAML
    #[arg(long, short = 'e', value_name = "EXT")]
    ext: Vec<String>,

    /// Align the labels of an indented summary file onto each document
    #[arg(long, value_name = "FILE")]
    summary: Option<PathBuf>,

    /// Print each outline as an indented summary instead of starting the TUI
    #[arg(long, conflicts_with = "json")]
    print: bool,

    /// Print each outline as JSON instead of starting the TUI
    #[arg(long)]
    json: bool,

    /// Write log output to this file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    let batch = args.print || args.json;
    init_logging(args.log_file.as_deref(), batch)?;

    let mut cfg = Config::load();

    // Override config with command line args
    if !args.ext.is_empty() {
        cfg.file_extensions = args.ext;
    }

    let summary = match &args.summary {
        Some(path) => Some(fs::read_to_string(path)?),
        None => None,
    };
    let provider = || match &summary {
        Some(text) => OutlineProvider::with_summary(text.clone()),
        None => OutlineProvider::new(),
    };

    let paths = input::find_documents(args.paths, &cfg.file_extensions)?;
    let documents = input::load_documents(&paths, &cfg.file_extensions);

    if documents.is_empty() {
        eprintln!("No matching files found");
        return Ok(());
    }

    if batch {
        return print_outlines(documents, provider, args.json);
    }

    let workbench = Workbench::new(documents, cfg.file_extensions.clone());
    let mut app = AppState::new(Extension::new(provider()), workbench);
    app.start();
    run_tui(app, &cfg)
}

/// Logs go to `--log-file` when given. Without one they go to stderr in batch mode and are
/// dropped while the TUI owns the terminal.
fn init_logging(log_file: Option<&Path>, batch: bool) -> io::Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        None if batch => {
            builder.target(env_logger::Target::Stderr);
        }
        None => return Ok(()),
    }
    builder.init();
    Ok(())
}

/// A host with exactly one document focused, reporting errors on stderr.
struct ConsoleHost {
    document: Document,
}

impl Host for ConsoleHost {
    fn active_document(&self) -> Option<Document> {
        Some(self.document.clone())
    }

    fn open_document(&mut self, uri: &str) -> Option<Document> {
        (uri == self.document.uri()).then(|| self.document.clone())
    }

    fn show_error(&mut self, message: &str) {
        eprintln!("{}: {message}", self.document.uri());
    }

    fn outline_changed(&mut self) {}

    fn reveal(&mut self, _uri: &str, _position: Position) {}
}

fn print_outlines(
    documents: Vec<Document>,
    provider: impl Fn() -> OutlineProvider,
    json: bool,
) -> io::Result<()> {
    let mut outlines = Vec::new();
    // Headers only separate several outlines; a lone one stays valid summary input
    let headers = documents.len() > 1;

    for document in documents {
        let mut host = ConsoleHost { document };
        let mut extension = Extension::new(provider());
        extension.activate(&mut host);
        let roots = extension.provider().roots();

        if json {
            outlines.push(serde_json::json!({
                "uri": host.document.uri(),
                "outline": roots,
            }));
        } else {
            if headers {
                println!("# {}", host.document.uri());
            }
            print!("{}", render_summary(roots));
        }
    }

    if json {
        let json = serde_json::to_string_pretty(&outlines).map_err(io::Error::other)?;
        println!("{json}");
    }
    Ok(())
}

fn run_tui(mut app: AppState, cfg: &Config) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut editor_handler = EditorEventHandler::default();

    let result = run_app(&mut terminal, &mut app, cfg, &mut editor_handler);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    cfg: &Config,
    editor_handler: &mut EditorEventHandler,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app, cfg))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let quit = match app.current_view {
            View::FileList => file_list_key(app, key),
            View::Outline => outline_key(app, key),
            View::Editor => {
                editor_key(app, key, editor_handler);
                false
            }
            View::Command => command_key(app, key),
        };
        if quit {
            return Ok(());
        }
    }
}

fn file_list_key(app: &mut AppState, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Up | KeyCode::Char('k') => {
            app.current_file_index = app.current_file_index.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.current_file_index + 1 < app.workbench.documents().len() {
                app.current_file_index += 1;
            }
        }
        KeyCode::Enter => app.open_selected_file(),
        KeyCode::Char(':') => app.begin_command(),
        _ => {}
    }
    false
}

fn outline_key(app: &mut AppState, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') => return app.quit_or_back(),
        KeyCode::Up | KeyCode::Char('k') => app.move_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_down(),
        KeyCode::Right | KeyCode::Char('l') => app.expand_or_descend(),
        KeyCode::Left | KeyCode::Char('h') => app.collapse_or_ascend(),
        KeyCode::Enter => app.reveal_selected(),
        KeyCode::Char('e') => {
            app.reveal_selected();
            app.enter_editor();
        }
        KeyCode::Tab => {
            app.current_file_index = app.workbench.active_index().unwrap_or(0);
            app.current_view = View::FileList;
        }
        KeyCode::Char(':') => app.begin_command(),
        _ => {}
    }
    false
}

fn editor_key(app: &mut AppState, key: KeyEvent, editor_handler: &mut EditorEventHandler) {
    let normal = app
        .editor_state
        .as_ref()
        .is_some_and(|state| state.mode == EditorMode::Normal);

    match key.code {
        KeyCode::Char(':') if normal => app.begin_command(),
        KeyCode::Esc if normal => app.exit_editor(false),
        _ => {
            if let Some(ref mut editor_state) = app.editor_state {
                editor_handler.on_key_event(key, editor_state);
            }
        }
    }
}

fn command_key(app: &mut AppState, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c) => app.command_buffer.push(c),
        KeyCode::Backspace => {
            app.command_buffer.pop();
        }
        KeyCode::Enter => return app.run_command(),
        KeyCode::Esc => app.cancel_command(),
        _ => {}
    }
    false
}
