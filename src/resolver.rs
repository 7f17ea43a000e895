//! Result resolver module.
//!
//! Maps a document and a finished [`SessionState`] to exactly one
//! result. Resolution is pure and dispatched on [`Mode`]:
//!
//! - **diagnosis**: the label with the highest score wins, visiting
//!   labels in `A, B, C` order with a strict `>` comparison, so ties go
//!   to the earliest label.
//! - **test**: the correct ratio grades into one of three tiers
//!   (`>= 0.8`, `>= 0.4`, below), indexing results positionally.
//! - **fortune**: a uniform draw over all results.
//!
//! An empty result list fails with [`QuizError::NoResultsAvailable`] in
//! every mode. Other document gaps resolve to the first result.

use crate::accumulator::SessionState;
use crate::error::QuizError;
use crate::label::TypeLabel;
use crate::model::{Mode, QuizDocument, ResultDefinition};
use crate::outcome::{Basis, Outcome};
use crate::score::ScoreVector;
use rand::Rng;

/// Ratio at or above which a test grades into tier 0.
pub const TOP_TIER_RATIO: f64 = 0.8;

/// Ratio at or above which a test grades into tier 1.
pub const MIDDLE_TIER_RATIO: f64 = 0.4;

/// Resolve a finished session, drawing fortunes from the thread RNG.
///
/// # Examples
///
/// ```rust
/// use quizcore::*;
///
/// let doc = QuizDocument::builder(Mode::Diagnosis)
///     .question("q", |q| q.option("x", ScoreVector::new(3, 3, 0)))
///     .result("A", "Type A", "")
///     .result("B", "Type B", "")
///     .build();
///
/// let state = accumulate(&doc, &[0]).unwrap();
/// let outcome = resolve(&doc, &state).unwrap();
/// assert_eq!(outcome.result.kind.as_deref(), Some("A"));
/// ```
pub fn resolve(document: &QuizDocument, state: &SessionState) -> Result<Outcome, QuizError> {
    resolve_with_rng(document, state, &mut rand::thread_rng())
}

/// Resolve a finished session with a caller-supplied RNG.
///
/// The RNG is only consulted in fortune mode.
pub fn resolve_with_rng<R: Rng + ?Sized>(
    document: &QuizDocument,
    state: &SessionState,
    rng: &mut R,
) -> Result<Outcome, QuizError> {
    let results = &document.results;
    if results.is_empty() {
        return Err(QuizError::NoResultsAvailable {
            mode: document.mode,
        });
    }

    let (result_index, basis) = match document.mode {
        Mode::Diagnosis => resolve_diagnosis(results, &state.scores),
        Mode::Test => resolve_test(results, state.correct_count, document.questions.len()),
        Mode::Fortune => (rng.gen_range(0..results.len()), Basis::Draw { pool: results.len() }),
    };

    let outcome = Outcome {
        mode: document.mode,
        result_index,
        result: results[result_index].clone(),
        scores: state.scores,
        correct_count: state.correct_count,
        total_questions: document.questions.len(),
        basis,
    };

    if outcome.used_fallback() {
        tracing::warn!(
            "Resolved {} quiz via first-result fallback: {:?}",
            document.mode,
            outcome.basis
        );
    }
    Ok(outcome)
}

/// Highest-scoring label, ties going to the earliest label in `A, B, C`.
///
/// # Examples
///
/// ```rust
/// use quizcore::{leading_label, ScoreVector, TypeLabel};
///
/// assert_eq!(leading_label(&ScoreVector::new(3, 3, 0)), (TypeLabel::A, 3));
/// assert_eq!(leading_label(&ScoreVector::new(0, 3, 3)), (TypeLabel::B, 3));
/// assert_eq!(leading_label(&ScoreVector::ZERO), (TypeLabel::A, 0));
/// ```
pub fn leading_label(scores: &ScoreVector) -> (TypeLabel, u64) {
    // Sentinel below any real score, so the first label always takes the lead.
    let mut best: i128 = -1;
    let mut leader = TypeLabel::A;
    for (label, score) in scores.iter() {
        if i128::from(score) > best {
            best = i128::from(score);
            leader = label;
        }
    }
    (leader, scores.get(leader))
}

/// Fraction of questions answered correctly; `0.0` for an empty quiz.
pub fn correct_ratio(correct_count: u32, total_questions: usize) -> f64 {
    if total_questions == 0 {
        return 0.0;
    }
    f64::from(correct_count) / total_questions as f64
}

/// Tier index for a correct ratio. Lower bounds are inclusive.
///
/// # Examples
///
/// ```rust
/// use quizcore::tier_for_ratio;
///
/// assert_eq!(tier_for_ratio(0.8), 0);
/// assert_eq!(tier_for_ratio(0.4), 1);
/// assert_eq!(tier_for_ratio(0.2), 2);
/// ```
pub fn tier_for_ratio(ratio: f64) -> usize {
    if ratio >= TOP_TIER_RATIO {
        0
    } else if ratio >= MIDDLE_TIER_RATIO {
        1
    } else {
        2
    }
}

fn resolve_diagnosis(results: &[ResultDefinition], scores: &ScoreVector) -> (usize, Basis) {
    let (label, score) = leading_label(scores);
    let matched = results.iter().position(|r| r.label() == Some(label));
    (
        matched.unwrap_or(0),
        Basis::Leader {
            label,
            score,
            matched: matched.is_some(),
        },
    )
}

fn resolve_test(
    results: &[ResultDefinition],
    correct_count: u32,
    total_questions: usize,
) -> (usize, Basis) {
    let tier = tier_for_ratio(correct_ratio(correct_count, total_questions));
    let fell_back = tier >= results.len();
    (if fell_back { 0 } else { tier }, Basis::Tier { tier, fell_back })
}
