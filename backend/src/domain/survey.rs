//! Survey question and answer values exchanged with the answering service.

use std::fmt;

/// Message returned when a question is missing or blank.
pub const INVALID_QUESTION_MESSAGE: &str = "Invalid question";

/// Raised when question text is blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Invalid question")]
pub struct QuestionValidationError;

/// Natural-language survey question.
///
/// ## Invariants
/// - Non-empty once trimmed. The text is forwarded as supplied.
///
/// # Examples
/// ```
/// use survey_backend::domain::Question;
///
/// assert!(Question::new("What is our scope 1 footprint?").is_ok());
/// assert!(Question::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question(String);

impl Question {
    /// Validate and wrap question text.
    pub fn new(text: impl Into<String>) -> Result<Self, QuestionValidationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(QuestionValidationError);
        }
        Ok(Self(text))
    }

    /// Question text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Answer produced by the external answering service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer(String);

impl Answer {
    /// Wrap answer text as returned upstream.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Answer text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<Answer> for String {
    fn from(value: Answer) -> Self {
        value.0
    }
}
