//! Event loop for the TUI.

use std::io::{self, Stdout};
use std::sync::mpsc;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use presswatch_sheets::SheetClient;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::runtime::Runtime as TokioRuntime;

use super::app::App;
use super::controller::State;
use super::fetch;
use super::ui;
use crate::cli::Cli;

/// Result type for TUI operations.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Initialize the terminal for TUI mode.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run the TUI.
///
/// `initial_project` opens that project's timeline as soon as the
/// directory has loaded.
pub fn run(cli: &Cli, initial_project: Option<String>) -> Result<()> {
    let client = SheetClient::new(cli.spreadsheet.clone())?;

    // The runtime must outlive the event loop; the fetch worker lives on it.
    let runtime = TokioRuntime::new()?;
    let (msg_tx, msg_rx) = mpsc::channel();
    let cmd_tx = fetch::spawn_worker(
        runtime.handle(),
        client,
        cli.directory_sheet.clone(),
        msg_tx,
    );

    let mut terminal = setup_terminal()?;
    let mut app = App::new(cmd_tx, msg_rx, initial_project);

    let result = run_loop(&mut terminal, &mut app);

    restore_terminal(&mut terminal)?;
    result
}

/// Main event loop.
fn run_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    let tick_rate = Duration::from_millis(100);

    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                handle_key(app, key);
            }
        }

        app.on_tick();

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Dispatches one key press based on the current state.
fn handle_key(app: &mut App, key: KeyEvent) {
    // Ctrl+C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.state() {
        State::Starting => {
            if key.code == KeyCode::Esc {
                app.should_quit = true;
            }
        }
        State::Selector => match key.code {
            KeyCode::Enter => app.pick_selected(),
            KeyCode::Up => app.move_selection(-1),
            KeyCode::Down => app.move_selection(1),
            KeyCode::PageUp => app.move_selection(-10),
            KeyCode::PageDown => app.move_selection(10),
            KeyCode::Backspace => app.pop_filter(),
            KeyCode::Esc => {
                // Esc clears an active filter first, then quits.
                if app.filter.is_empty() {
                    app.should_quit = true;
                } else {
                    app.filter.clear();
                    app.selected = 0;
                }
            }
            KeyCode::Char(c) => app.push_filter(c),
            _ => {}
        },
        State::Loading => {
            // Esc abandons the fetch; its result becomes stale.
            if key.code == KeyCode::Esc {
                app.deselect();
            }
        }
        State::Timeline => match key.code {
            KeyCode::Esc | KeyCode::Char('q') => app.deselect(),
            KeyCode::Left | KeyCode::Char('h') => app.timeline_state.scroll_left(),
            KeyCode::Right | KeyCode::Char('l') => app.timeline_state.scroll_right(),
            KeyCode::Up | KeyCode::Char('k') => {
                let total = app.controller.batch.items.len();
                app.timeline_state.select_prev(total);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let total = app.controller.batch.items.len();
                app.timeline_state.select_next(total);
            }
            KeyCode::Char('+') | KeyCode::Char('=') => app.timeline_state.zoom_in(),
            KeyCode::Char('-') => app.timeline_state.zoom_out(),
            KeyCode::Char('f') => app.pending_fit = true,
            _ => {}
        },
        State::Error => match key.code {
            KeyCode::Char('r') => app.retry(),
            KeyCode::Esc | KeyCode::Char('q') => app.deselect(),
            _ => {}
        },
    }
}
