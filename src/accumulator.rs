//! Answer accumulation.
//!
//! Folds selected options into a [`SessionState`]. Each step is a pure
//! transition: it reads the previous state and the selected option and
//! returns a new state, leaving the document untouched.

use crate::error::QuizError;
use crate::model::{AnswerOption, Mode, QuizDocument};
use crate::score::ScoreVector;
use serde::{Deserialize, Serialize};

/// Running tally of one session.
///
/// # Examples
///
/// ```rust
/// use quizcore::{AnswerOption, Mode, ScoreVector, SessionState};
///
/// let state = SessionState::new()
///     .apply(Mode::Test, &AnswerOption::new("right", ScoreVector::correct()))
///     .apply(Mode::Test, &AnswerOption::new("wrong", ScoreVector::ZERO));
///
/// assert_eq!(state.question_index, 2);
/// assert_eq!(state.correct_count, 1);
/// assert_eq!(state.scores, ScoreVector::new(1, 0, 0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionState {
    /// Index of the next question to answer.
    pub question_index: usize,
    /// Component-wise sum of every selected option's score.
    pub scores: ScoreVector,
    /// Correct answers so far. Only counted in test mode.
    pub correct_count: u32,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one selected option into the tally.
    ///
    /// Adds the option's score, counts it as correct in test mode when
    /// its `A` component is `1`, and advances the question index.
    pub fn apply(&self, mode: Mode, option: &AnswerOption) -> SessionState {
        let mut next = *self;
        next.scores += option.score();
        if mode == Mode::Test && option.is_correct() {
            next.correct_count = next.correct_count.saturating_add(1);
        }
        next.question_index += 1;
        next
    }
}

/// Validate `selected` against the state's current question, then apply it.
///
/// An out-of-range index (or a state already past the last question)
/// fails with [`QuizError::InvalidAnswer`] and produces no new state.
pub fn apply_answer(
    document: &QuizDocument,
    state: &SessionState,
    selected: usize,
) -> Result<SessionState, QuizError> {
    let index = state.question_index;
    let option = match document.questions.get(index) {
        Some(question) => question.option(index, selected)?,
        None => {
            return Err(QuizError::InvalidAnswer {
                question: index,
                selected,
                available: 0,
            })
        }
    };

    let next = state.apply(document.mode, option);
    tracing::trace!(
        "Accumulated answer: question={}, option={}, scores={:?}, correct={}",
        index,
        selected,
        next.scores,
        next.correct_count
    );
    Ok(next)
}

/// Apply a full answer sequence, one option index per question.
pub fn accumulate(document: &QuizDocument, answers: &[usize]) -> Result<SessionState, QuizError> {
    answers
        .iter()
        .try_fold(SessionState::new(), |state, &selected| {
            apply_answer(document, &state, selected)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::TypeLabel;

    fn diagnosis_doc() -> QuizDocument {
        QuizDocument::builder(Mode::Diagnosis)
            .question("q1", |q| {
                q.option("a", ScoreVector::of(TypeLabel::A, 2))
                    .option("b", ScoreVector::of(TypeLabel::B, 1))
            })
            .question("q2", |q| q.unscored("skip").option("c", ScoreVector::new(0, 1, 3)))
            .result("A", "a", "")
            .build()
    }

    #[test]
    fn test_apply_adds_scores() {
        let doc = diagnosis_doc();
        let state = accumulate(&doc, &[0, 1]).unwrap();
        assert_eq!(state.scores, ScoreVector::new(2, 1, 3));
        assert_eq!(state.question_index, 2);
    }

    #[test]
    fn test_missing_score_adds_nothing() {
        let doc = diagnosis_doc();
        let state = accumulate(&doc, &[1, 0]).unwrap();
        assert_eq!(state.scores, ScoreVector::new(0, 1, 0));
    }

    #[test]
    fn test_correct_count_only_in_test_mode() {
        let option = AnswerOption::new("x", ScoreVector::correct());
        let diagnosis = SessionState::new().apply(Mode::Diagnosis, &option);
        let test = SessionState::new().apply(Mode::Test, &option);
        let fortune = SessionState::new().apply(Mode::Fortune, &option);
        assert_eq!(diagnosis.correct_count, 0);
        assert_eq!(test.correct_count, 1);
        assert_eq!(fortune.correct_count, 0);
        assert_eq!(test.scores, diagnosis.scores);
    }

    #[test]
    fn test_only_exact_one_counts_as_correct() {
        let option = AnswerOption::new("x", ScoreVector::new(2, 0, 0));
        let state = SessionState::new().apply(Mode::Test, &option);
        assert_eq!(state.correct_count, 0);
        assert_eq!(state.scores.a, 2);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let doc = diagnosis_doc();
        let state = SessionState::new();
        let err = apply_answer(&doc, &state, 5).unwrap_err();
        assert_eq!(
            err,
            QuizError::InvalidAnswer {
                question: 0,
                selected: 5,
                available: 2,
            }
        );
        assert_eq!(state, SessionState::new());
    }

    #[test]
    fn test_past_last_question_rejected() {
        let doc = diagnosis_doc();
        let err = accumulate(&doc, &[0, 0, 0]).unwrap_err();
        assert!(matches!(
            err,
            QuizError::InvalidAnswer {
                question: 2,
                available: 0,
                ..
            }
        ));
    }

    #[test]
    fn test_apply_does_not_touch_input_state() {
        let start = SessionState::new();
        let option = AnswerOption::new("x", ScoreVector::new(1, 1, 1));
        let next = start.apply(Mode::Diagnosis, &option);
        assert_eq!(start, SessionState::new());
        assert_ne!(start, next);
    }
}
