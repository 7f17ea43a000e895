//! Quiz document model.
//!
//! The document is the data every other component consumes: a scoring
//! [`Mode`], an ordered list of [`Question`]s and an ordered list of
//! [`ResultDefinition`]s. It deserializes from the JSON shape produced by
//! the editor and is never mutated by play or resolution.

use crate::builder::QuizBuilder;
use crate::error::QuizError;
use crate::label::TypeLabel;
use crate::score::ScoreVector;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Scoring semantics of a document. Fixed at creation.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Point accumulation; the leading label picks the result.
    Diagnosis,
    /// Graded correctness; the correct ratio picks a tier.
    Test,
    /// Uniformly random result.
    Fortune,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Diagnosis => "diagnosis",
            Mode::Test => "test",
            Mode::Fortune => "fortune",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A selectable answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerOption {
    /// Display text.
    #[serde(default)]
    pub label: String,

    /// Score contribution. Absent means the zero vector.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<ScoreVector>,
}

impl AnswerOption {
    pub fn new(label: impl Into<String>, score: ScoreVector) -> Self {
        Self {
            label: label.into(),
            score: Some(score),
        }
    }

    /// An option that contributes nothing.
    pub fn unscored(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            score: None,
        }
    }

    /// The effective contribution, with absent scores read as zero.
    pub fn score(&self) -> ScoreVector {
        self.score.unwrap_or_default()
    }

    /// Test-mode correctness: an option is correct iff its `A` component is exactly `1`.
    pub fn is_correct(&self) -> bool {
        self.score().a == 1
    }
}

/// A question and its ordered options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub options: Vec<AnswerOption>,
}

impl Question {
    pub fn new(text: impl Into<String>, options: Vec<AnswerOption>) -> Self {
        Self {
            text: text.into(),
            options,
        }
    }

    /// Look up an option, rejecting out-of-range indices.
    ///
    /// `question_index` is only used for the error report.
    pub fn option(&self, question_index: usize, selected: usize) -> Result<&AnswerOption, QuizError> {
        self.options.get(selected).ok_or(QuizError::InvalidAnswer {
            question: question_index,
            selected,
            available: self.options.len(),
        })
    }
}

/// A possible outcome of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultDefinition {
    /// Result tag. In diagnosis mode it names the label this result belongs to.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl ResultDefinition {
    pub fn new(kind: impl Into<String>, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            title: title.into(),
            description: description.into(),
        }
    }

    /// A result with no `type` tag.
    pub fn untagged(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: None,
            title: title.into(),
            description: description.into(),
        }
    }

    /// The diagnosis label this result is keyed by, if its tag names one.
    pub fn label(&self) -> Option<TypeLabel> {
        self.kind.as_deref().and_then(TypeLabel::from_tag)
    }
}

/// A complete quiz definition.
///
/// # Examples
///
/// ```rust
/// use quizcore::{Mode, QuizDocument};
///
/// let doc = QuizDocument::from_json(r#"{
///     "mode": "diagnosis",
///     "questions": [
///         { "text": "Morning or night?", "options": [
///             { "label": "Morning", "score": { "A": 2 } },
///             { "label": "Night" }
///         ] }
///     ],
///     "results": [ { "type": "A", "title": "Early bird", "description": "" } ]
/// }"#).unwrap();
///
/// assert_eq!(doc.mode, Mode::Diagnosis);
/// assert_eq!(doc.questions[0].options[1].score().a, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizDocument {
    pub mode: Mode,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    #[serde(default)]
    pub questions: Vec<Question>,

    #[serde(default)]
    pub results: Vec<ResultDefinition>,
}

impl QuizDocument {
    /// Start building a document in code.
    pub fn builder(mode: Mode) -> QuizBuilder {
        QuizBuilder::new(mode)
    }

    /// Parse a document from its stored JSON form.
    pub fn from_json(json: &str) -> Result<Self, QuizError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to the stored JSON form.
    pub fn to_json(&self) -> Result<String, QuizError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Report soft problems that resolution will paper over with a fallback.
    ///
    /// An empty list means the document resolves without any fallback
    /// being reachable from document shape alone.
    pub fn lint(&self) -> Vec<DocumentIssue> {
        let mut issues = Vec::new();

        if self.questions.is_empty() {
            issues.push(DocumentIssue::NoQuestions);
        }
        for (index, question) in self.questions.iter().enumerate() {
            if question.options.is_empty() {
                issues.push(DocumentIssue::EmptyQuestion { question: index });
            }
        }
        if self.results.is_empty() {
            issues.push(DocumentIssue::NoResults);
            return issues;
        }

        match self.mode {
            Mode::Diagnosis => {
                for label in TypeLabel::ALL {
                    if !self.results.iter().any(|r| r.label() == Some(label)) {
                        issues.push(DocumentIssue::UnmatchedLabel { label });
                    }
                }
            }
            Mode::Test => {
                for (index, question) in self.questions.iter().enumerate() {
                    let correct = question.options.iter().filter(|o| o.is_correct()).count();
                    if correct != 1 {
                        issues.push(DocumentIssue::CorrectOptionCount {
                            question: index,
                            count: correct,
                        });
                    }
                }
                if self.results.len() < TIER_COUNT {
                    issues.push(DocumentIssue::MissingTiers {
                        found: self.results.len(),
                    });
                }
            }
            Mode::Fortune => {}
        }

        issues
    }
}

/// Number of result tiers test mode grades into.
pub const TIER_COUNT: usize = 3;

/// A soft document problem found by [`QuizDocument::lint`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentIssue {
    #[error("document has no questions")]
    NoQuestions,

    #[error("question {question} has no options")]
    EmptyQuestion { question: usize },

    #[error("document has no results")]
    NoResults,

    #[error("no result is tagged with label {label}")]
    UnmatchedLabel { label: TypeLabel },

    #[error("question {question} has {count} correct options")]
    CorrectOptionCount { question: usize, count: usize },

    #[error("test document has {found} result tiers, expected 3")]
    MissingTiers { found: usize },
}
