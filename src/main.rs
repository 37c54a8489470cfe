//! DevQuiz - Terminal Quiz
//!
//! A terminal-based quiz application with single-choice, true/false,
//! and multi-select questions, a session timer, and persistent
//! best-score tracking.

use std::io;
use std::time::{Duration, Instant};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

mod domain;
mod application;
mod infrastructure;
mod presentation;

use application::{App, Screen};
use domain::QuestionBank;
use infrastructure::{load_question_bank, FileHighScoreStore};
use presentation::{render_ui, InputHandler};

/// Entry point for the DevQuiz terminal application.
///
/// Loads the question bank (from a file given as the first argument,
/// or the builtin dataset), sets up the terminal interface, and runs
/// the main event loop until the user quits from the home screen.
///
/// # Errors
///
/// Returns an error if the question bank is invalid, if terminal setup
/// fails, or if there are issues with the terminal interface during
/// runtime.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let bank = match std::env::args().nth(1) {
        Some(path) => load_question_bank(&path)?,
        None => QuestionBank::builtin()?,
    };
    let mut app = App::new(bank, Box::new(FileHighScoreStore::default()));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

/// Main application event loop.
///
/// Handles terminal rendering, keyboard input, and the one-second
/// timer tick. The tick is best-effort: `event::poll` wakes the loop
/// at least once per second, and the session counts whole seconds
/// while a quiz is active. Continues running until the user presses
/// 'q' on the home screen.
///
/// # Arguments
///
/// * `terminal` - Terminal interface for rendering
/// * `app` - Mutable reference to application state
///
/// # Errors
///
/// Returns an IO error if terminal operations fail.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let tick_rate = Duration::from_secs(1);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| render_ui(f, app))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') if app.screen == Screen::Home => return Ok(()),
                        _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }
    }
}
