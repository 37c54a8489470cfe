//! Application state management for the terminal quiz.
//!
//! This module coordinates the quiz domain with the terminal UI:
//! which screen is shown, the in-progress session, the keyboard
//! cursor over choices, and transient status messages.

use crate::domain::{HighScoreStore, Question, QuestionBank, QuizResult, QuizSession, ResultService};

/// Which screen the application is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Landing screen with the best score and start hint
    Home,
    /// A quiz attempt is in progress
    Quiz,
    /// Result summary of the last completed attempt
    Results,
}

/// Main application state.
///
/// Holds the immutable question bank, the optional in-progress
/// session, the result of the last completed attempt, and the UI
/// bookkeeping the renderer reads each frame. All user intent flows
/// through the methods here; the domain session is never mutated
/// directly by the presentation layer.
pub struct App {
    /// The loaded question bank, immutable for the process lifetime
    pub bank: QuestionBank,
    /// Currently displayed screen
    pub screen: Screen,
    /// In-progress attempt, present only on the quiz screen
    pub session: Option<QuizSession>,
    /// Result of the last completed attempt
    pub result: Option<QuizResult>,
    /// Keyboard cursor over the current question's choices
    pub highlighted_choice: usize,
    /// Best score as last read from the store
    pub best_score: usize,
    /// Temporary status message to display
    pub status_message: Option<String>,
    store: Box<dyn HighScoreStore>,
}

impl App {
    /// Creates the application over a validated bank and an injected
    /// high-score store. A failing store read counts as no best score.
    pub fn new(bank: QuestionBank, store: Box<dyn HighScoreStore>) -> Self {
        let best_score = store.get().unwrap_or(0);
        Self {
            bank,
            screen: Screen::Home,
            session: None,
            result: None,
            highlighted_choice: 0,
            best_score,
            status_message: None,
            store,
        }
    }

    /// Starts a fresh attempt, discarding any previous session.
    pub fn start_quiz(&mut self) {
        self.session = Some(QuizSession::new(&self.bank));
        self.result = None;
        self.highlighted_choice = 0;
        self.status_message = None;
        self.screen = Screen::Quiz;
    }

    /// The question the quiz screen is showing, if a session is active.
    pub fn current_question(&self) -> Option<&Question> {
        let session = self.session.as_ref()?;
        self.bank.question(session.current_index).ok()
    }

    /// Whether the current question has a non-empty response. Gates
    /// the Next action.
    pub fn answered_current(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.has_answer(s.current_index))
    }

    /// True iff the given choice key is part of the recorded response
    /// for the current question.
    pub fn is_choice_selected(&self, key: &str) -> bool {
        self.session
            .as_ref()
            .and_then(|s| s.response(s.current_index))
            .is_some_and(|r| r.contains(key))
    }

    /// Moves the choice cursor down, wrapping around.
    pub fn highlight_next(&mut self) {
        let count = match self.current_question() {
            Some(q) => q.choices.len(),
            None => return,
        };
        self.highlighted_choice = (self.highlighted_choice + 1) % count;
    }

    /// Moves the choice cursor up, wrapping around.
    pub fn highlight_previous(&mut self) {
        let count = match self.current_question() {
            Some(q) => q.choices.len(),
            None => return,
        };
        self.highlighted_choice = (self.highlighted_choice + count - 1) % count;
    }

    /// Records the choice under the cursor for the current question.
    pub fn select_highlighted(&mut self) {
        let key = match self
            .current_question()
            .and_then(|q| q.choices.get(self.highlighted_choice))
        {
            Some(choice) => choice.key.clone(),
            None => return,
        };
        self.select_choice(&key);
    }

    /// Records the choice whose key starts with the typed letter
    /// (case-insensitive) and moves the cursor onto it.
    pub fn select_choice_by_letter(&mut self, letter: char) {
        let found = self.current_question().and_then(|q| {
            q.choices.iter().position(|c| {
                c.key
                    .chars()
                    .next()
                    .is_some_and(|first| first.eq_ignore_ascii_case(&letter))
            })
        });
        let Some(position) = found else { return };
        self.highlighted_choice = position;
        self.select_highlighted();
    }

    /// Records a selection for the current question.
    ///
    /// Domain contract errors (bad index, unknown key) can only come
    /// from a presentation bug; they are surfaced as status messages
    /// rather than crashing the attempt.
    pub fn select_choice(&mut self, key: &str) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let index = session.current_index;
        match session.select_answer(&self.bank, index, key) {
            Ok(()) => self.status_message = None,
            Err(e) => self.status_message = Some(e.to_string()),
        }
    }

    /// Moves to the next question, or completes the quiz from the last
    /// one. Refuses to move while the current question is unanswered;
    /// that gate is shell policy, the session itself does not enforce
    /// it.
    pub fn next_question(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if !session.has_answer(session.current_index) {
            self.status_message = Some("Select an answer to continue".to_string());
            return;
        }

        if session.advance() {
            let result = ResultService::complete(session, &self.bank, self.store.as_mut());
            self.best_score = result.best_score;
            self.result = Some(result);
            self.session = None;
            self.highlighted_choice = 0;
            self.status_message = None;
            self.screen = Screen::Results;
        } else {
            self.highlighted_choice = 0;
            self.status_message = None;
        }
    }

    /// Moves back one question; no-op on the first.
    pub fn previous_question(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.retreat();
        self.highlighted_choice = 0;
        self.status_message = None;
    }

    /// Forwards one elapsed second to the session. Called by the event
    /// loop roughly once per wall-clock second; the session ignores it
    /// once finished.
    pub fn tick(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.tick();
        }
    }

    /// Copies the share message for the last result to the clipboard.
    pub fn share_result(&mut self) {
        let Some(result) = self.result.as_ref() else {
            return;
        };
        let message = result.share_message();
        self.status_message = Some(match copy_to_clipboard(&message) {
            Ok(()) => format!("Copied to clipboard: {}", message),
            Err(e) => format!("Share failed: {}", e),
        });
    }

    /// Returns to the home screen, discarding session and result.
    pub fn go_home(&mut self) {
        self.best_score = self.store.get().unwrap_or(self.best_score);
        self.session = None;
        self.result = None;
        self.highlighted_choice = 0;
        self.status_message = None;
        self.screen = Screen::Home;
    }
}

fn copy_to_clipboard(text: &str) -> Result<(), String> {
    let mut clipboard = arboard::Clipboard::new().map_err(|e| e.to_string())?;
    clipboard.set_text(text.to_string()).map_err(|e| e.to_string())
}
