//! Session controller.
//!
//! A [`Session`] drives one player through a document:
//!
//! ```text
//! NotStarted → Answering(0) → … → Answering(N-1) → Resolved
//! ```
//!
//! Each answered question moves forward exactly one step; there is no
//! way back short of [`Session::restart`]. The last answer invokes the
//! resolver, and `Resolved` accepts no further input.

use crate::accumulator::{apply_answer, SessionState};
use crate::error::QuizError;
use crate::model::{Question, QuizDocument};
use crate::outcome::Outcome;
use crate::resolver::resolve_with_rng;
use rand::Rng;

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    NotStarted,
    /// Waiting for an answer to the question at this index.
    Answering(usize),
    Resolved(Outcome),
}

/// One player's run through a document.
///
/// The session owns its [`SessionState`] and only borrows the document,
/// so any number of sessions can play the same document independently.
///
/// # Examples
///
/// ```rust
/// use quizcore::*;
///
/// let doc = QuizDocument::builder(Mode::Test)
///     .question("2 + 2?", |q| q.wrong("3").correct("4"))
///     .tier("Perfect", "")
///     .tier("Close", "")
///     .tier("Try again", "")
///     .build();
///
/// let mut session = Session::new(&doc);
/// session.begin().unwrap();
/// session.answer(1).unwrap();
///
/// assert_eq!(session.outcome().unwrap().title(), "Perfect");
/// assert_eq!(session.answer(0), Err(QuizError::AlreadyResolved));
/// ```
#[derive(Debug, Clone)]
pub struct Session<'a> {
    document: &'a QuizDocument,
    state: SessionState,
    phase: Phase,
}

impl<'a> Session<'a> {
    pub fn new(document: &'a QuizDocument) -> Self {
        Self {
            document,
            state: SessionState::new(),
            phase: Phase::NotStarted,
        }
    }

    pub fn document(&self) -> &QuizDocument {
        self.document
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Start answering. A document without questions resolves right away.
    pub fn begin(&mut self) -> Result<&Phase, QuizError> {
        self.begin_with_rng(&mut rand::thread_rng())
    }

    pub fn begin_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<&Phase, QuizError> {
        match self.phase {
            Phase::NotStarted => {}
            Phase::Answering(_) => return Ok(&self.phase),
            Phase::Resolved(_) => return Err(QuizError::AlreadyResolved),
        }

        let issues = self.document.lint();
        if !issues.is_empty() {
            tracing::warn!(
                "Starting {} session on document with {} issue(s): {:?}",
                self.document.mode,
                issues.len(),
                issues
            );
        }
        tracing::debug!(
            "Session started: mode={}, questions={}",
            self.document.mode,
            self.document.question_count()
        );

        if self.document.questions.is_empty() {
            let outcome = resolve_with_rng(self.document, &self.state, rng)?;
            self.phase = Phase::Resolved(outcome);
        } else {
            self.phase = Phase::Answering(0);
        }
        Ok(&self.phase)
    }

    /// Answer the current question with the option at `selected`.
    pub fn answer(&mut self, selected: usize) -> Result<&Phase, QuizError> {
        self.answer_with_rng(selected, &mut rand::thread_rng())
    }

    /// Answer the current question; `rng` is used if this answer resolves a fortune.
    ///
    /// Nothing changes when this fails: an invalid index, or a resolution
    /// error on the last question, leaves state and phase as they were.
    pub fn answer_with_rng<R: Rng + ?Sized>(
        &mut self,
        selected: usize,
        rng: &mut R,
    ) -> Result<&Phase, QuizError> {
        let index = match self.phase {
            Phase::NotStarted => return Err(QuizError::NotStarted),
            Phase::Answering(index) => index,
            Phase::Resolved(_) => return Err(QuizError::AlreadyResolved),
        };

        let next = apply_answer(self.document, &self.state, selected)?;
        let phase = if next.question_index >= self.document.questions.len() {
            let outcome = resolve_with_rng(self.document, &next, rng)?;
            tracing::debug!(
                "Session resolved: result={} ({:?})",
                outcome.result_index,
                outcome.basis
            );
            Phase::Resolved(outcome)
        } else {
            Phase::Answering(index + 1)
        };

        self.state = next;
        self.phase = phase;
        Ok(&self.phase)
    }

    /// The question awaiting an answer, if any.
    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            Phase::Answering(index) => self.document.questions.get(index),
            _ => None,
        }
    }

    /// `(answered, total)` question counts.
    pub fn progress(&self) -> (usize, usize) {
        (self.state.question_index, self.document.questions.len())
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        match &self.phase {
            Phase::Resolved(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.phase, Phase::Resolved(_))
    }

    /// Discard all progress and return to `NotStarted`.
    pub fn restart(&mut self) {
        tracing::debug!("Session restarted after {} answer(s)", self.state.question_index);
        self.state = SessionState::new();
        self.phase = Phase::NotStarted;
    }
}

/// Play a whole session, one option index per question.
///
/// # Examples
///
/// ```rust
/// use quizcore::*;
///
/// let doc = QuizDocument::builder(Mode::Diagnosis)
///     .question("q1", |q| q.option("a", ScoreVector::of(TypeLabel::A, 1)).option("c", ScoreVector::of(TypeLabel::C, 2)))
///     .question("q2", |q| q.option("a", ScoreVector::of(TypeLabel::A, 1)).option("b", ScoreVector::of(TypeLabel::B, 1)))
///     .result("A", "A type", "")
///     .result("C", "C type", "")
///     .build();
///
/// assert_eq!(play(&doc, &[1, 1]).unwrap().title(), "C type");
/// assert_eq!(play(&doc, &[0, 0]).unwrap().title(), "A type");
/// assert!(matches!(play(&doc, &[0]), Err(QuizError::Incomplete { answered: 1, total: 2 })));
/// ```
pub fn play(document: &QuizDocument, answers: &[usize]) -> Result<Outcome, QuizError> {
    play_with_rng(document, answers, &mut rand::thread_rng())
}

pub fn play_with_rng<R: Rng + ?Sized>(
    document: &QuizDocument,
    answers: &[usize],
    rng: &mut R,
) -> Result<Outcome, QuizError> {
    let mut session = Session::new(document);
    session.begin_with_rng(rng)?;
    for &selected in answers {
        session.answer_with_rng(selected, rng)?;
    }
    match session.phase {
        Phase::Resolved(outcome) => Ok(outcome),
        _ => Err(QuizError::Incomplete {
            answered: session.state.question_index,
            total: document.questions.len(),
        }),
    }
}
