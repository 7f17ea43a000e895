//! # quizcore - Deterministic Quiz and Diagnosis Resolution Engine
//!
//! A resolution engine for short interactive quizzes that provides:
//! - **Three scoring modes** under one document shape: point-accumulation
//!   `diagnosis`, graded `test`, and random `fortune`
//! - **Deterministic** resolution (same document and answers → same result)
//!   for diagnosis and test
//! - **Portable export** to a single offline HTML page whose embedded
//!   engine resolves exactly like the hosted player
//!
//! ## Core Concepts
//!
//! ### Resolution Pipeline
//!
//! ```text
//! [QuizDocument] → [Session] → answers → [SessionState] → [resolve] → [Outcome]
//! ```
//!
//! 1. **Documents** hold questions, options with score vectors, and results
//! 2. **Sessions** accept one answer per question, in order
//! 3. **Accumulation** sums each selected option's `ScoreVector` (commutative)
//! 4. **Resolution** picks exactly one result, dispatched on `Mode`
//!
//! ### Key Features
//!
//! - **Fixed tie-break**: diagnosis ties go to the earliest label in `A, B, C`
//! - **Inclusive tiers**: test ratios `>= 0.8` and `>= 0.4` bound tiers 0 and 1
//! - **Total**: soft document gaps resolve via fallbacks; only an empty
//!   result list or an out-of-range answer is an error
//! - **Debug-Friendly**: every `Outcome` carries a `Basis` explaining the pick
//!
//! ## Example
//!
//! ```rust
//! use quizcore::*;
//!
//! let doc = QuizDocument::builder(Mode::Diagnosis)
//!     .question("How do you plan?", |q| {
//!         q.option("Spreadsheets", ScoreVector::of(TypeLabel::A, 2))
//!             .option("Gut feeling", ScoreVector::of(TypeLabel::B, 2))
//!     })
//!     .result("A", "Analyst", "")
//!     .result("B", "Visionary", "")
//!     .build();
//!
//! let outcome = play(&doc, &[1]).unwrap();
//! assert_eq!(outcome.title(), "Visionary");
//!
//! let artifact = Exporter::default().export(&doc).unwrap();
//! assert_eq!(artifact.replay(&[1]).unwrap(), outcome);
//! ```
//!
//! ## Modules
//!
//! - [`label`] - The closed `A`/`B`/`C` label set
//! - [`score`] - Score vectors
//! - [`model`] - Quiz document model
//! - [`builder`] - Declarative document builder
//! - [`accumulator`] - Per-answer accumulation
//! - [`resolver`] - Per-mode result resolution
//! - [`outcome`] - Resolved outcomes
//! - [`session`] - Session state machine
//! - [`exporter`] - Standalone HTML export
//! - [`portable`] - The exported engine's rules, runnable from Rust
//! - [`error`] - Error types

pub mod accumulator;
pub mod builder;
pub mod error;
pub mod exporter;
pub mod label;
pub mod model;
pub mod outcome;
pub mod portable;
pub mod resolver;
pub mod score;
pub mod session;

// Re-export main types for convenience
pub use accumulator::{accumulate, apply_answer, SessionState};
pub use builder::{QuestionBuilder, QuizBuilder};
pub use error::QuizError;
pub use exporter::{Artifact, ExportOptions, Exporter};
pub use label::TypeLabel;
pub use model::{AnswerOption, DocumentIssue, Mode, Question, QuizDocument, ResultDefinition};
pub use outcome::{Basis, Outcome};
pub use portable::PortableEngine;
pub use resolver::{correct_ratio, leading_label, resolve, resolve_with_rng, tier_for_ratio};
pub use score::{ScoreVector, MAX_SCORE};
pub use session::{play, play_with_rng, Phase, Session};
