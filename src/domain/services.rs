//! Scoring and result services for the quiz.
//!
//! This module contains the pure scoring engine that tallies recorded
//! responses against answer keys, the storage capability used for the
//! persistent best score, and the result orchestration that runs once
//! when a session completes.

use std::collections::HashMap;

use super::models::{AnswerKey, QuestionBank, QuizSession, Response};

/// Storage capability for the single persisted best score.
///
/// Implementations are injected into result computation so the domain
/// never touches a concrete persistence mechanism. Both operations are
/// fallible; callers must degrade gracefully (a failed read counts as
/// no stored score, a failed write leaves the previous value in place).
pub trait HighScoreStore {
    fn get(&self) -> Result<usize, String>;
    fn set(&mut self, score: usize) -> Result<(), String>;
}

/// Pure scoring over a question bank and a set of recorded responses.
///
/// # Examples
///
/// ```
/// use devquiz::domain::{QuestionBank, ScoringEngine};
/// use std::collections::HashMap;
///
/// let bank = QuestionBank::builtin().unwrap();
/// assert_eq!(ScoringEngine::score(&bank, &HashMap::new()), 0);
/// ```
pub struct ScoringEngine;

impl ScoringEngine {
    /// Counts the questions whose recorded response exactly matches the
    /// answer key.
    ///
    /// Single-key questions compare keys case-sensitively; multi-select
    /// questions compare as sets, independent of the order keys were
    /// toggled in. A missing or empty response scores 0 for that
    /// question, never an error. The function has no side effects.
    pub fn score(bank: &QuestionBank, responses: &HashMap<usize, Response>) -> usize {
        let mut tally = 0;
        for index in 0..bank.len() {
            let question = match bank.question(index) {
                Ok(q) => q,
                Err(_) => continue,
            };
            let correct = match (&question.answer, responses.get(&index)) {
                (AnswerKey::Single(key), Some(Response::Single(recorded))) => recorded == key,
                (AnswerKey::Multi(keys), Some(Response::Multi(recorded))) => recorded == keys,
                _ => false,
            };
            if correct {
                tally += 1;
            }
        }
        tally
    }
}

/// Read-only summary of a completed session.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizResult {
    /// Number of correctly answered questions
    pub score: usize,
    /// Number of questions in the bank
    pub total: usize,
    /// Frozen timer value at completion
    pub elapsed_seconds: u64,
    /// Whether this score strictly beat the stored best
    pub is_new_high_score: bool,
    /// Best score after this session (max of stored and new)
    pub best_score: usize,
}

impl QuizResult {
    pub fn percentage(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.score as f64 / self.total as f64 * 100.0).round() as u32
    }

    pub fn is_perfect(&self) -> bool {
        self.score == self.total
    }

    /// Text handed to the share action.
    pub fn share_message(&self) -> String {
        format!("I scored {}/{} on DevQuiz!", self.score, self.total)
    }
}

/// Orchestrates session completion: scoring, best-score comparison,
/// and the single store write.
pub struct ResultService;

impl ResultService {
    /// Finishes the session and produces its result.
    ///
    /// Freezes the timer, tallies the score, and compares it against
    /// the stored best. The store is written at most once, only when
    /// the new score strictly exceeds the stored one. Storage failures
    /// never prevent the result from being returned: a failed read is
    /// treated as a stored score of 0, and a failed write leaves the
    /// old value behind.
    pub fn complete(
        session: &mut QuizSession,
        bank: &QuestionBank,
        store: &mut dyn HighScoreStore,
    ) -> QuizResult {
        session.finish();

        let score = ScoringEngine::score(bank, session.responses());
        let stored_best = store.get().unwrap_or(0);
        let is_new_high_score = score > stored_best;
        if is_new_high_score {
            // Write failure leaves the previous stored value in place;
            // the result is still returned.
            let _ = store.set(score);
        }

        QuizResult {
            score,
            total: bank.len(),
            elapsed_seconds: session.elapsed_seconds,
            is_new_high_score,
            best_score: stored_best.max(score),
        }
    }
}
