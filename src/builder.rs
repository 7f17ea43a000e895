//! Document builder module.
//!
//! Provides a declarative API for assembling a [`QuizDocument`] in code.
//! Hosts normally receive documents as JSON from the editor; the builder
//! covers documents generated programmatically, plus tests and demos.

use crate::label::TypeLabel;
use crate::model::{AnswerOption, Mode, Question, QuizDocument, ResultDefinition};
use crate::score::ScoreVector;

/// Builder for a whole document.
///
/// # Examples
///
/// ```rust
/// use quizcore::{Mode, QuizDocument, ScoreVector, TypeLabel};
///
/// let doc = QuizDocument::builder(Mode::Diagnosis)
///     .title("Which founder are you?")
///     .question("Pick a weekend plan", |q| {
///         q.option("Pitch deck", ScoreVector::of(TypeLabel::A, 2))
///             .option("Hackathon", ScoreVector::of(TypeLabel::B, 2))
///             .option("Hiking", ScoreVector::of(TypeLabel::C, 2))
///     })
///     .result("A", "Seller", "You close deals.")
///     .result("B", "Builder", "You ship.")
///     .result("C", "Steward", "You keep the team whole.")
///     .build();
///
/// assert_eq!(doc.questions.len(), 1);
/// assert_eq!(doc.results.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct QuizBuilder {
    document: QuizDocument,
}

/// Builder for one question's options.
#[derive(Debug, Clone, Default)]
pub struct QuestionBuilder {
    options: Vec<AnswerOption>,
}

impl QuizBuilder {
    pub fn new(mode: Mode) -> Self {
        Self {
            document: QuizDocument {
                mode,
                title: String::new(),
                description: String::new(),
                questions: Vec::new(),
                results: Vec::new(),
            },
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.document.title = title.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.document.description = description.into();
        self
    }

    /// Append a question; `options` fills in its answers in order.
    pub fn question<F>(mut self, text: impl Into<String>, options: F) -> Self
    where
        F: FnOnce(QuestionBuilder) -> QuestionBuilder,
    {
        let built = options(QuestionBuilder::default());
        self.document
            .questions
            .push(Question::new(text, built.options));
        self
    }

    /// Append a tagged result.
    pub fn result(
        mut self,
        kind: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.document
            .results
            .push(ResultDefinition::new(kind, title, description));
        self
    }

    /// Append a result tagged with a diagnosis label.
    pub fn result_for(
        self,
        label: TypeLabel,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.result(label.as_str(), title, description)
    }

    /// Append an untagged result. Test tiers and fortunes are positional,
    /// so the first call is tier 0 (best).
    pub fn tier(mut self, title: impl Into<String>, description: impl Into<String>) -> Self {
        self.document
            .results
            .push(ResultDefinition::untagged(title, description));
        self
    }

    pub fn build(self) -> QuizDocument {
        self.document
    }
}

impl QuestionBuilder {
    pub fn option(mut self, label: impl Into<String>, score: ScoreVector) -> Self {
        self.options.push(AnswerOption::new(label, score));
        self
    }

    /// An option without any `score` field.
    pub fn unscored(mut self, label: impl Into<String>) -> Self {
        self.options.push(AnswerOption::unscored(label));
        self
    }

    /// A test-mode correct option (`A = 1`).
    pub fn correct(self, label: impl Into<String>) -> Self {
        self.option(label, ScoreVector::correct())
    }

    /// A test-mode incorrect option (all zero).
    pub fn wrong(self, label: impl Into<String>) -> Self {
        self.option(label, ScoreVector::ZERO)
    }
}
