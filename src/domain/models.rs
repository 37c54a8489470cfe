use std::collections::{BTreeSet, HashMap};
use serde::{Deserialize, Serialize};

use super::errors::{DomainError, DomainResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionKind {
    SingleChoice,
    TrueFalse,
    MultiSelect,
}

impl QuestionKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            QuestionKind::SingleChoice => "Multiple Choice",
            QuestionKind::TrueFalse => "True/False",
            QuestionKind::MultiSelect => "Multiple Select",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub key: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerKey {
    Single(String),
    Multi(BTreeSet<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub prompt: String,
    pub choices: Vec<Choice>,
    pub answer: AnswerKey,
}

impl Question {
    pub fn has_choice(&self, key: &str) -> bool {
        self.choices.iter().any(|c| c.key == key)
    }
}

/// A recorded answer for one question. The variant mirrors the
/// question's kind: single-choice and true/false questions record one
/// key, multi-select questions record a set of keys.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Single(String),
    Multi(BTreeSet<String>),
}

impl Response {
    pub fn contains(&self, key: &str) -> bool {
        match self {
            Response::Single(k) => k == key,
            Response::Multi(keys) => keys.contains(key),
        }
    }
}

/// An immutable, ordered list of questions loaded once at startup.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Validates and wraps a list of questions.
    ///
    /// Fails with `InvalidQuestionData` on the first violation: an
    /// empty bank, a question without choices, an answer whose shape
    /// does not match the question kind, or an answer key that is not
    /// among that question's choices.
    pub fn new(questions: Vec<Question>) -> DomainResult<Self> {
        if questions.is_empty() {
            return Err(DomainError::InvalidQuestionData(
                "question bank is empty".to_string(),
            ));
        }

        for (index, question) in questions.iter().enumerate() {
            if question.choices.is_empty() {
                return Err(DomainError::InvalidQuestionData(format!(
                    "question {} has no choices",
                    index
                )));
            }

            let keys: Vec<&str> = match (&question.kind, &question.answer) {
                (QuestionKind::MultiSelect, AnswerKey::Multi(keys)) => {
                    keys.iter().map(|k| k.as_str()).collect()
                }
                (QuestionKind::SingleChoice | QuestionKind::TrueFalse, AnswerKey::Single(key)) => {
                    vec![key.as_str()]
                }
                (QuestionKind::MultiSelect, AnswerKey::Single(_)) => {
                    return Err(DomainError::InvalidQuestionData(format!(
                        "question {} is multi-select but its answer is a single key",
                        index
                    )));
                }
                (_, AnswerKey::Multi(_)) => {
                    return Err(DomainError::InvalidQuestionData(format!(
                        "question {} is {} but its answer is a key set",
                        index,
                        question.kind.display_name()
                    )));
                }
            };

            for key in keys {
                if !question.has_choice(key) {
                    return Err(DomainError::InvalidQuestionData(format!(
                        "question {}: answer key '{}' not among choices",
                        index, key
                    )));
                }
            }
        }

        Ok(Self { questions })
    }

    /// Parses and validates a bank from its JSON dataset format.
    pub fn from_json(json: &str) -> DomainResult<Self> {
        let questions: Vec<Question> = serde_json::from_str(json)
            .map_err(|e| DomainError::InvalidQuestionData(e.to_string()))?;
        Self::new(questions)
    }

    /// The dataset shipped with the application.
    pub fn builtin() -> DomainResult<Self> {
        Self::from_json(include_str!("../../data/questions.json"))
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn question(&self, index: usize) -> DomainResult<&Question> {
        self.questions.get(index).ok_or(DomainError::QuestionIndexOutOfRange {
            index,
            count: self.questions.len(),
        })
    }
}

/// Mutable state of one quiz attempt.
///
/// All mutation happens through methods in response to discrete
/// events (a selection, a navigation key, a timer tick); the session
/// itself never does I/O.
#[derive(Debug)]
pub struct QuizSession {
    question_count: usize,
    /// Currently displayed question (zero-based, always in bounds)
    pub current_index: usize,
    responses: HashMap<usize, Response>,
    /// Seconds counted while the session was active
    pub elapsed_seconds: u64,
    /// False once the session is finished; freezes the timer
    pub active: bool,
}

impl QuizSession {
    pub fn new(bank: &QuestionBank) -> Self {
        Self {
            question_count: bank.len(),
            current_index: 0,
            responses: HashMap::new(),
            elapsed_seconds: 0,
            active: true,
        }
    }

    /// Records a selection for the given question.
    ///
    /// Single-choice and true/false questions overwrite any prior key;
    /// multi-select questions toggle membership of the key in the
    /// recorded set. Toggling every key off leaves an empty set, which
    /// counts as unanswered.
    pub fn select_answer(&mut self, bank: &QuestionBank, index: usize, key: &str) -> DomainResult<()> {
        let question = bank.question(index)?;
        if !question.has_choice(key) {
            return Err(DomainError::InvalidChoiceKey {
                index,
                key: key.to_string(),
            });
        }

        match question.kind {
            QuestionKind::MultiSelect => {
                let entry = self
                    .responses
                    .entry(index)
                    .or_insert_with(|| Response::Multi(BTreeSet::new()));
                if let Response::Multi(keys) = entry {
                    if !keys.remove(key) {
                        keys.insert(key.to_string());
                    }
                }
            }
            QuestionKind::SingleChoice | QuestionKind::TrueFalse => {
                self.responses.insert(index, Response::Single(key.to_string()));
            }
        }

        Ok(())
    }

    /// True iff a non-empty response is recorded for the question.
    /// The caller uses this to gate forward navigation.
    pub fn has_answer(&self, index: usize) -> bool {
        match self.responses.get(&index) {
            Some(Response::Single(_)) => true,
            Some(Response::Multi(keys)) => !keys.is_empty(),
            None => false,
        }
    }

    pub fn response(&self, index: usize) -> Option<&Response> {
        self.responses.get(&index)
    }

    pub fn responses(&self) -> &HashMap<usize, Response> {
        &self.responses
    }

    /// Moves to the next question, or returns true when already on the
    /// last question to signal completion. The caller is expected to
    /// check `has_answer` for the current question first and then call
    /// `finish()` when completion is signaled; the session itself does
    /// not enforce either.
    pub fn advance(&mut self) -> bool {
        if self.current_index + 1 < self.question_count {
            self.current_index += 1;
            false
        } else {
            true
        }
    }

    /// Moves to the previous question; no-op on the first.
    pub fn retreat(&mut self) {
        if self.current_index > 0 {
            self.current_index -= 1;
        }
    }

    /// Counts one elapsed second. Driven by an external scheduler;
    /// no-op once the session is finished.
    pub fn tick(&mut self) {
        if self.active {
            self.elapsed_seconds += 1;
        }
    }

    /// Stops the timer. Idempotent.
    pub fn finish(&mut self) {
        self.active = false;
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 == self.question_count
    }

    /// Fraction of the quiz reached, in (0, 1].
    pub fn progress(&self) -> f64 {
        (self.current_index + 1) as f64 / self.question_count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(kind: QuestionKind, keys: &[&str], answer: AnswerKey) -> Question {
        Question {
            kind,
            prompt: "prompt".to_string(),
            choices: keys
                .iter()
                .map(|k| Choice {
                    key: k.to_string(),
                    text: format!("choice {}", k),
                })
                .collect(),
            answer,
        }
    }

    fn sample_bank() -> QuestionBank {
        QuestionBank::new(vec![
            question(
                QuestionKind::SingleChoice,
                &["A", "B", "C", "D"],
                AnswerKey::Single("B".to_string()),
            ),
            question(
                QuestionKind::TrueFalse,
                &["True", "False"],
                AnswerKey::Single("True".to_string()),
            ),
            question(
                QuestionKind::MultiSelect,
                &["A", "B", "C", "D"],
                AnswerKey::Multi(["A".to_string(), "C".to_string()].into()),
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_builtin_bank_loads_and_validates() {
        let bank = QuestionBank::builtin().unwrap();
        assert!(!bank.is_empty());
    }

    #[test]
    fn test_empty_bank_rejected() {
        let err = QuestionBank::new(vec![]).unwrap_err();
        assert!(matches!(err, DomainError::InvalidQuestionData(_)));
    }

    #[test]
    fn test_answer_key_must_exist_in_choices() {
        let err = QuestionBank::new(vec![question(
            QuestionKind::SingleChoice,
            &["A", "B"],
            AnswerKey::Single("Z".to_string()),
        )])
        .unwrap_err();
        assert!(matches!(err, DomainError::InvalidQuestionData(_)));
    }

    #[test]
    fn test_answer_shape_must_match_kind() {
        let err = QuestionBank::new(vec![question(
            QuestionKind::MultiSelect,
            &["A", "B"],
            AnswerKey::Single("A".to_string()),
        )])
        .unwrap_err();
        assert!(matches!(err, DomainError::InvalidQuestionData(_)));

        let err = QuestionBank::new(vec![question(
            QuestionKind::TrueFalse,
            &["True", "False"],
            AnswerKey::Multi(["True".to_string()].into()),
        )])
        .unwrap_err();
        assert!(matches!(err, DomainError::InvalidQuestionData(_)));
    }

    #[test]
    fn test_question_out_of_range() {
        let bank = sample_bank();
        let err = bank.question(3).unwrap_err();
        assert_eq!(err, DomainError::QuestionIndexOutOfRange { index: 3, count: 3 });
    }

    #[test]
    fn test_new_session_initial_state() {
        let bank = sample_bank();
        let session = QuizSession::new(&bank);
        assert_eq!(session.current_index, 0);
        assert_eq!(session.elapsed_seconds, 0);
        assert!(session.active);
        assert!(session.responses().is_empty());
    }

    #[test]
    fn test_index_stays_in_bounds_under_navigation() {
        let bank = sample_bank();
        let mut session = QuizSession::new(&bank);

        session.retreat();
        assert_eq!(session.current_index, 0);

        for _ in 0..10 {
            session.advance();
        }
        assert_eq!(session.current_index, 2);

        for _ in 0..10 {
            session.retreat();
        }
        assert_eq!(session.current_index, 0);
    }

    #[test]
    fn test_advance_on_last_question_signals_completion() {
        let bank = sample_bank();
        let mut session = QuizSession::new(&bank);
        assert!(!session.advance());
        assert!(!session.advance());
        assert_eq!(session.current_index, 2);
        assert!(session.is_last_question());
        assert!(session.advance());
        assert_eq!(session.current_index, 2);
    }

    #[test]
    fn test_single_choice_selection_overwrites() {
        let bank = sample_bank();
        let mut session = QuizSession::new(&bank);

        session.select_answer(&bank, 0, "A").unwrap();
        session.select_answer(&bank, 0, "B").unwrap();
        assert_eq!(session.response(0), Some(&Response::Single("B".to_string())));
    }

    #[test]
    fn test_multi_select_toggle_is_self_inverse() {
        let bank = sample_bank();
        let mut session = QuizSession::new(&bank);

        session.select_answer(&bank, 2, "A").unwrap();
        let before = session.response(2).cloned();
        session.select_answer(&bank, 2, "C").unwrap();
        session.select_answer(&bank, 2, "C").unwrap();
        assert_eq!(session.response(2).cloned(), before);
    }

    #[test]
    fn test_empty_multi_select_counts_as_unanswered() {
        let bank = sample_bank();
        let mut session = QuizSession::new(&bank);

        assert!(!session.has_answer(2));
        session.select_answer(&bank, 2, "A").unwrap();
        assert!(session.has_answer(2));
        session.select_answer(&bank, 2, "A").unwrap();
        assert!(!session.has_answer(2));
    }

    #[test]
    fn test_select_answer_invalid_index() {
        let bank = sample_bank();
        let mut session = QuizSession::new(&bank);
        let err = session.select_answer(&bank, 7, "A").unwrap_err();
        assert_eq!(err, DomainError::QuestionIndexOutOfRange { index: 7, count: 3 });
    }

    #[test]
    fn test_select_answer_invalid_key() {
        let bank = sample_bank();
        let mut session = QuizSession::new(&bank);
        let err = session.select_answer(&bank, 0, "Z").unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidChoiceKey { index: 0, key: "Z".to_string() }
        );
    }

    #[test]
    fn test_tick_counts_only_while_active() {
        let bank = sample_bank();
        let mut session = QuizSession::new(&bank);

        session.tick();
        session.tick();
        assert_eq!(session.elapsed_seconds, 2);

        session.finish();
        session.tick();
        assert_eq!(session.elapsed_seconds, 2);

        // finish is idempotent
        session.finish();
        assert!(!session.active);
    }

    #[test]
    fn test_progress_bounds() {
        let bank = sample_bank();
        let mut session = QuizSession::new(&bank);
        assert!((session.progress() - 1.0 / 3.0).abs() < 1e-9);
        session.advance();
        session.advance();
        assert!((session.progress() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_question_kind_serde_names() {
        let json = r#"{"type":"multi-select","prompt":"p","choices":[{"key":"A","text":"a"}],"answer":["A"]}"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.kind, QuestionKind::MultiSelect);
        assert_eq!(q.answer, AnswerKey::Multi(["A".to_string()].into()));
    }
}
