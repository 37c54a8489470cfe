#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    QuestionIndexOutOfRange { index: usize, count: usize },
    InvalidChoiceKey { index: usize, key: String },
    InvalidQuestionData(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::QuestionIndexOutOfRange { index, count } => {
                write!(f, "Question index {} out of range (bank has {} questions)", index, count)
            }
            DomainError::InvalidChoiceKey { index, key } => {
                write!(f, "Choice key '{}' does not exist on question {}", key, index)
            }
            DomainError::InvalidQuestionData(msg) => {
                write!(f, "Invalid question data: {}", msg)
            }
        }
    }
}

impl std::error::Error for DomainError {}

pub type DomainResult<T> = Result<T, DomainError>;
