//! Error types for quiz play, resolution and export.
//!
//! Hard failures are represented by the `QuizError` enum. Soft document
//! problems (missing scores, unmatched result types, zero questions) are
//! not errors; they resolve through fallbacks and are reported by
//! [`QuizDocument::lint`](crate::model::QuizDocument::lint).

use crate::model::Mode;
use thiserror::Error;

/// Errors that can occur while playing, resolving or exporting a quiz.
///
/// # Examples
///
/// ```rust
/// use quizcore::{Mode, QuizError};
///
/// let err = QuizError::NoResultsAvailable { mode: Mode::Test };
/// assert_eq!(err.to_string(), "No results available for test quiz");
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum QuizError {
    /// The selected option index is outside the current question's range.
    ///
    /// Raised before any session state is touched.
    #[error("Invalid answer for question {question}: option {selected} (question has {available} options)")]
    InvalidAnswer {
        question: usize,
        selected: usize,
        available: usize,
    },

    /// The document has no result definitions, so nothing can be chosen.
    #[error("No results available for {mode} quiz")]
    NoResultsAvailable { mode: Mode },

    /// An answer was submitted before the session was started.
    #[error("Session has not been started")]
    NotStarted,

    /// An answer was submitted after the session was resolved.
    #[error("Session is already resolved")]
    AlreadyResolved,

    /// An answer sequence ended before the last question.
    #[error("Session incomplete: {answered} of {total} questions answered")]
    Incomplete { answered: usize, total: usize },

    /// The document JSON could not be parsed.
    #[error("Malformed quiz document: {0}")]
    DocumentParse(String),

    /// The artifact could not be produced.
    #[error("Export failed: {0}")]
    Export(String),

    /// An artifact's embedded data block is missing or unreadable.
    #[error("Artifact data unreadable: {0}")]
    ArtifactData(String),
}

impl From<serde_json::Error> for QuizError {
    fn from(err: serde_json::Error) -> Self {
        QuizError::DocumentParse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_answer_display() {
        let err = QuizError::InvalidAnswer {
            question: 2,
            selected: 7,
            available: 4,
        };
        let display = err.to_string();
        assert!(display.contains("question 2"));
        assert!(display.contains("option 7"));
        assert!(display.contains("4 options"));
    }

    #[test]
    fn test_no_results_display() {
        let err = QuizError::NoResultsAvailable {
            mode: Mode::Fortune,
        };
        assert!(err.to_string().contains("fortune"));
    }

    #[test]
    fn test_from_serde_error() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: QuizError = parse.into();
        assert!(matches!(err, QuizError::DocumentParse(_)));
    }
}
