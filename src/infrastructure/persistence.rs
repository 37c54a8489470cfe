use crate::domain::{HighScoreStore, QuestionBank};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// On-disk shape of the high-score slot.
#[derive(Debug, Default, Serialize, Deserialize)]
struct HighScoreRecord {
    highest_score: usize,
}

/// High-score store backed by a small JSON file.
///
/// A missing file reads as 0; the file is created on first write.
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    pub const DEFAULT_FILENAME: &'static str = "devquiz_highscore.json";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for FileHighScoreStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FILENAME)
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn get(&self) -> Result<usize, String> {
        if !self.path.exists() {
            return Ok(0);
        }
        match fs::read_to_string(&self.path) {
            Ok(content) => match serde_json::from_str::<HighScoreRecord>(&content) {
                Ok(record) => Ok(record.highest_score),
                Err(e) => Err(format!("Invalid high score file - {}", e)),
            },
            Err(e) => Err(e.to_string()),
        }
    }

    fn set(&mut self, score: usize) -> Result<(), String> {
        let record = HighScoreRecord { highest_score: score };
        match serde_json::to_string_pretty(&record) {
            Ok(json) => fs::write(&self.path, json).map_err(|e| e.to_string()),
            Err(e) => Err(format!("Serialization failed: {}", e)),
        }
    }
}

/// High-score store that lives only for the process lifetime.
///
/// Used in tests and as a fallback when persistent storage is not
/// wanted; scores are lost on exit.
#[derive(Debug, Default)]
pub struct InMemoryHighScoreStore {
    score: usize,
}

impl HighScoreStore for InMemoryHighScoreStore {
    fn get(&self) -> Result<usize, String> {
        Ok(self.score)
    }

    fn set(&mut self, score: usize) -> Result<(), String> {
        self.score = score;
        Ok(())
    }
}

/// Loads and validates a question bank from a JSON file.
pub fn load_question_bank(filename: &str) -> Result<QuestionBank, String> {
    match fs::read_to_string(filename) {
        Ok(content) => QuestionBank::from_json(&content).map_err(|e| e.to_string()),
        Err(e) => Err(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("score.json");
        let mut store = FileHighScoreStore::new(&path);

        store.set(7).unwrap();
        assert_eq!(store.get().unwrap(), 7);

        // A fresh store over the same file sees the persisted value
        let store = FileHighScoreStore::new(&path);
        assert_eq!(store.get().unwrap(), 7);
    }

    #[test]
    fn test_missing_file_reads_as_zero() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileHighScoreStore::new(dir.path().join("absent.json"));
        assert_eq!(store.get().unwrap(), 0);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("score.json");
        fs::write(&path, "not json").unwrap();

        let store = FileHighScoreStore::new(&path);
        assert!(store.get().is_err());
    }

    #[test]
    fn test_in_memory_store_round_trip() {
        let mut store = InMemoryHighScoreStore::default();
        assert_eq!(store.get().unwrap(), 0);
        store.set(5).unwrap();
        assert_eq!(store.get().unwrap(), 5);
    }

    #[test]
    fn test_load_question_bank_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bank.json");
        fs::write(
            &path,
            r#"[{"type":"true-false","prompt":"p","choices":[{"key":"True","text":"True"},{"key":"False","text":"False"}],"answer":"True"}]"#,
        )
        .unwrap();

        let bank = load_question_bank(path.to_str().unwrap()).unwrap();
        assert_eq!(bank.len(), 1);
    }

    #[test]
    fn test_load_question_bank_rejects_bad_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bank.json");
        fs::write(
            &path,
            r#"[{"type":"true-false","prompt":"p","choices":[{"key":"True","text":"True"}],"answer":"False"}]"#,
        )
        .unwrap();

        assert!(load_question_bank(path.to_str().unwrap()).is_err());
        assert!(load_question_bank("no/such/file.json").is_err());
    }
}
