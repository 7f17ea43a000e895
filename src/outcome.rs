//! Resolved outcome module.
//!
//! Contains the `Outcome` type, the record produced when a session is
//! resolved: the chosen result plus a breakdown of how it was chosen.

use crate::error::QuizError;
use crate::label::TypeLabel;
use crate::model::{Mode, ResultDefinition};
use crate::resolver::correct_ratio;
use crate::score::ScoreVector;
use serde::{Deserialize, Serialize};

/// A resolved session.
///
/// This is read-only and serializable. Two engines agree on a session
/// exactly when their outcomes serialize to the same JSON bytes. The
/// serialized form holds only integers, booleans and strings, so the
/// exported script's `JSON.stringify` writes the same bytes as
/// [`Outcome::to_json`].
///
/// # Examples
///
/// ```rust
/// use quizcore::{Basis, Mode, Outcome, ResultDefinition, ScoreVector, TypeLabel};
///
/// let outcome = Outcome {
///     mode: Mode::Diagnosis,
///     result_index: 0,
///     result: ResultDefinition::new("A", "Leader", ""),
///     scores: ScoreVector::new(3, 3, 0),
///     correct_count: 0,
///     total_questions: 3,
///     basis: Basis::Leader { label: TypeLabel::A, score: 3, matched: true },
/// };
///
/// assert_eq!(outcome.title(), "Leader");
/// assert!(!outcome.used_fallback());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    /// Mode the document was resolved under.
    pub mode: Mode,

    /// Position of `result` within the document's results.
    pub result_index: usize,

    /// The chosen result.
    pub result: ResultDefinition,

    /// Final accumulated scores.
    pub scores: ScoreVector,

    /// Final correct-answer count (always 0 outside test mode).
    pub correct_count: u32,

    /// Number of questions in the document.
    pub total_questions: usize,

    /// How the result was picked.
    pub basis: Basis,
}

/// Breakdown of a resolution, one variant per mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Basis {
    /// Diagnosis: the winning label and its score.
    ///
    /// `matched` is false when no result carries the label and the first
    /// result was used instead.
    Leader {
        label: TypeLabel,
        score: u64,
        matched: bool,
    },

    /// Test: the tier the correct ratio graded into. The ratio itself is
    /// [`Outcome::ratio`].
    ///
    /// `fell_back` is true when the tier had no result and the first
    /// result was used instead.
    Tier { tier: usize, fell_back: bool },

    /// Fortune: a uniform draw from `pool` results.
    Draw { pool: usize },
}

impl Outcome {
    pub fn title(&self) -> &str {
        &self.result.title
    }

    pub fn description(&self) -> &str {
        &self.result.description
    }

    /// The correct ratio a test was graded on; `None` in other modes.
    pub fn ratio(&self) -> Option<f64> {
        match self.basis {
            Basis::Tier { .. } => Some(correct_ratio(self.correct_count, self.total_questions)),
            _ => None,
        }
    }

    /// Whether a document fallback decided the result.
    pub fn used_fallback(&self) -> bool {
        match self.basis {
            Basis::Leader { matched, .. } => !matched,
            Basis::Tier { fell_back, .. } => fell_back,
            Basis::Draw { .. } => false,
        }
    }

    /// Canonical JSON form, used for byte-level comparison.
    pub fn to_json(&self) -> Result<String, QuizError> {
        serde_json::to_string(self).map_err(|e| QuizError::Export(e.to_string()))
    }
}
