use crate::application::{App, Screen};
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, _modifiers: KeyModifiers) {
        match app.screen {
            Screen::Home => Self::handle_home(app, key),
            Screen::Quiz => Self::handle_quiz(app, key),
            Screen::Results => Self::handle_results(app, key),
        }
    }

    fn handle_home(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter | KeyCode::Char('s') => app.start_quiz(),
            _ => {}
        }
    }

    fn handle_quiz(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => app.highlight_previous(),
            KeyCode::Down | KeyCode::Char('j') => app.highlight_next(),
            KeyCode::Enter | KeyCode::Char(' ') => app.select_highlighted(),
            KeyCode::Right | KeyCode::Char('n') => app.next_question(),
            KeyCode::Left | KeyCode::Char('p') => app.previous_question(),
            KeyCode::Esc => app.go_home(),
            // Remaining letters select the choice with that leading key
            KeyCode::Char(c) => app.select_choice_by_letter(c),
            _ => {}
        }
    }

    fn handle_results(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Char('s') => app.share_result(),
            KeyCode::Char('r') => app.start_quiz(),
            KeyCode::Char('h') | KeyCode::Esc => app.go_home(),
            _ => {}
        }
    }
}
