//! Portable engine.
//!
//! The accumulation and resolution rules exactly as an exported artifact
//! runs them: directly over the raw embedded JSON, reading fields
//! loosely with no typed document in between. Absent or non-numeric
//! scores count as `0`, totals are doubles clamped at
//! [`MAX_SCORE`], a list that is not an array is empty, and a result
//! keeps only its string `type`, `title` and `description`.
//!
//! It is a second, independent implementation of the rules in
//! [`accumulator`](crate::accumulator) and [`resolver`](crate::resolver),
//! written against the same reads as the artifact's inline script, and
//! is what [`Artifact::replay`](crate::exporter::Artifact::replay) runs.

use crate::error::QuizError;
use crate::label::TypeLabel;
use crate::model::{Mode, ResultDefinition};
use crate::outcome::{Basis, Outcome};
use crate::score::{ScoreVector, MAX_SCORE};
use rand::Rng;
use serde_json::Value;

const LABELS: [&str; 3] = ["A", "B", "C"];
const TOP_TIER_RATIO: f64 = 0.8;
const MIDDLE_TIER_RATIO: f64 = 0.4;
const MAX_TOTAL: f64 = MAX_SCORE as f64;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Tally {
    question_index: usize,
    scores: [f64; 3],
    correct_count: u32,
}

/// Runs sessions against raw document data.
#[derive(Debug, Clone, Copy)]
pub struct PortableEngine<'a> {
    data: &'a Value,
    mode: Mode,
}

impl<'a> PortableEngine<'a> {
    /// Wrap embedded document data. Only `mode` has to be present.
    pub fn new(data: &'a Value) -> Result<Self, QuizError> {
        let mode = match data.get("mode").and_then(Value::as_str) {
            Some("diagnosis") => Mode::Diagnosis,
            Some("test") => Mode::Test,
            Some("fortune") => Mode::Fortune,
            other => {
                return Err(QuizError::ArtifactData(format!(
                    "unsupported mode {:?}",
                    other
                )))
            }
        };
        Ok(Self { data, mode })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    fn list(&self, key: &str) -> &'a [Value] {
        list_of(self.data, key)
    }

    /// Replay a full answer sequence and resolve it.
    ///
    /// Errors arise in the same order a hosted session raises them.
    pub fn run<R: Rng + ?Sized>(&self, answers: &[usize], rng: &mut R) -> Result<Outcome, QuizError> {
        let questions = self.list("questions");
        let mut tally = Tally::default();
        let mut outcome = if questions.is_empty() {
            Some(self.resolve(&tally, rng)?)
        } else {
            None
        };

        for &selected in answers {
            if outcome.is_some() {
                return Err(QuizError::AlreadyResolved);
            }
            let index = tally.question_index;
            let options = list_of(&questions[index], "options");
            let option = options.get(selected).ok_or(QuizError::InvalidAnswer {
                question: index,
                selected,
                available: options.len(),
            })?;

            let next = self.apply(&tally, option);
            if next.question_index >= questions.len() {
                outcome = Some(self.resolve(&next, rng)?);
            }
            tally = next;
        }

        outcome.ok_or(QuizError::Incomplete {
            answered: tally.question_index,
            total: questions.len(),
        })
    }

    fn apply(&self, tally: &Tally, option: &Value) -> Tally {
        let mut next = *tally;
        for (slot, label) in next.scores.iter_mut().zip(LABELS) {
            *slot = (*slot + score_of(option, label)).min(MAX_TOTAL);
        }
        if self.mode == Mode::Test && score_of(option, "A") == 1.0 {
            next.correct_count += 1;
        }
        next.question_index += 1;
        next
    }

    fn resolve<R: Rng + ?Sized>(&self, tally: &Tally, rng: &mut R) -> Result<Outcome, QuizError> {
        let results = self.list("results");
        let total = self.list("questions").len();
        if results.is_empty() {
            return Err(QuizError::NoResultsAvailable { mode: self.mode });
        }

        let (index, basis) = match self.mode {
            Mode::Diagnosis => {
                let mut best = -1.0;
                let mut leader = 0;
                for (i, &score) in tally.scores.iter().enumerate() {
                    if score > best {
                        best = score;
                        leader = i;
                    }
                }
                let matched = results
                    .iter()
                    .position(|r| r.get("type").and_then(Value::as_str) == Some(LABELS[leader]));
                (
                    matched.unwrap_or(0),
                    Basis::Leader {
                        label: TypeLabel::ALL[leader],
                        score: best as u64,
                        matched: matched.is_some(),
                    },
                )
            }
            Mode::Test => {
                let ratio = if total == 0 {
                    0.0
                } else {
                    f64::from(tally.correct_count) / total as f64
                };
                let tier = if ratio >= TOP_TIER_RATIO {
                    0
                } else if ratio >= MIDDLE_TIER_RATIO {
                    1
                } else {
                    2
                };
                let fell_back = tier >= results.len();
                (if fell_back { 0 } else { tier }, Basis::Tier { tier, fell_back })
            }
            Mode::Fortune => (
                rng.gen_range(0..results.len()),
                Basis::Draw {
                    pool: results.len(),
                },
            ),
        };

        Ok(Outcome {
            mode: self.mode,
            result_index: index,
            result: result_of(&results[index]),
            scores: ScoreVector::new(
                tally.scores[0] as u64,
                tally.scores[1] as u64,
                tally.scores[2] as u64,
            ),
            correct_count: tally.correct_count,
            total_questions: total,
            basis,
        })
    }
}

fn list_of<'v>(value: &'v Value, key: &str) -> &'v [Value] {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn text_of(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(String::from)
}

fn result_of(value: &Value) -> ResultDefinition {
    ResultDefinition {
        kind: text_of(value, "type"),
        title: text_of(value, "title").unwrap_or_default(),
        description: text_of(value, "description").unwrap_or_default(),
    }
}

fn score_of(option: &Value, label: &str) -> f64 {
    option
        .get("score")
        .and_then(|score| score.get(label))
        .and_then(Value::as_f64)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;

    fn run(data: &Value, answers: &[usize]) -> Result<Outcome, QuizError> {
        let mut rng = StdRng::seed_from_u64(1);
        PortableEngine::new(data)?.run(answers, &mut rng)
    }

    #[test]
    fn test_rejects_unknown_mode() {
        let data = json!({ "mode": "poll" });
        assert!(matches!(
            PortableEngine::new(&data),
            Err(QuizError::ArtifactData(_))
        ));
        assert!(PortableEngine::new(&json!({})).is_err());
    }

    #[test]
    fn test_loose_scores() {
        let data = json!({
            "mode": "diagnosis",
            "questions": [
                { "text": "q", "options": [ { "label": "x", "score": { "B": 2, "C": "junk" } } ] },
                { "text": "q", "options": [ { "label": "y" } ] }
            ],
            "results": [ { "type": "A", "title": "a" }, { "type": "B", "title": "b" } ]
        });
        let outcome = run(&data, &[0, 0]).unwrap();
        assert_eq!(outcome.scores, ScoreVector::new(0, 2, 0));
        assert_eq!(outcome.result.title, "b");
    }

    #[test]
    fn test_loose_questions_and_results() {
        let data = json!({
            "mode": "diagnosis",
            "questions": [ null, { "options": "none" } ],
            "results": [ { "type": 3, "title": ["x"] }, { "type": "A", "title": "a" } ]
        });
        assert_eq!(
            run(&data, &[0]),
            Err(QuizError::InvalidAnswer {
                question: 0,
                selected: 0,
                available: 0
            })
        );

        let data = json!({
            "mode": "diagnosis",
            "questions": [ { "options": [ {} ] } ],
            "results": [ { "type": 3, "title": ["x"] } ]
        });
        let outcome = run(&data, &[0]).unwrap();
        assert_eq!(outcome.result, ResultDefinition::untagged("", ""));
        assert!(outcome.used_fallback());
    }

    #[test]
    fn test_totals_clamp_like_the_player() {
        let max = u64::from(u32::MAX);
        let data = json!({
            "mode": "diagnosis",
            "questions": [
                { "options": [ { "score": { "A": max, "B": max - 1 } } ] },
                { "options": [ { "score": { "B": 10, "C": u64::MAX } } ] }
            ],
            "results": [ { "type": "A", "title": "a" }, { "type": "B", "title": "b" } ]
        });
        let outcome = run(&data, &[0, 0]).unwrap();
        assert_eq!(outcome.scores, ScoreVector::new(max, max + 9, MAX_SCORE));
        assert_eq!(
            outcome.basis,
            Basis::Leader {
                label: TypeLabel::C,
                score: MAX_SCORE,
                matched: false
            }
        );
    }

    #[test]
    fn test_tie_goes_to_first_label() {
        let data = json!({
            "mode": "diagnosis",
            "questions": [ { "options": [ { "score": { "A": 3, "B": 3 } } ] } ],
            "results": [ { "type": "B", "title": "b" }, { "type": "A", "title": "a" } ]
        });
        let outcome = run(&data, &[0]).unwrap();
        assert_eq!(outcome.result_index, 1);
    }

    #[test]
    fn test_test_mode_tiers() {
        let question = json!({ "options": [ { "score": { "A": 1 } }, { "score": {} } ] });
        let data = json!({
            "mode": "test",
            "questions": [question.clone(), question.clone(), question.clone(), question.clone(), question],
            "results": [ { "title": "top" }, { "title": "mid" }, { "title": "low" } ]
        });
        assert_eq!(run(&data, &[0, 0, 0, 0, 1]).unwrap().result.title, "top");
        assert_eq!(run(&data, &[0, 0, 1, 1, 1]).unwrap().result.title, "mid");
        assert_eq!(run(&data, &[0, 1, 1, 1, 1]).unwrap().result.title, "low");
    }

    #[test]
    fn test_error_order() {
        let data = json!({
            "mode": "test",
            "questions": [ { "options": [ { "label": "x" } ] } ],
            "results": []
        });
        assert_eq!(
            run(&data, &[3]),
            Err(QuizError::InvalidAnswer {
                question: 0,
                selected: 3,
                available: 1
            })
        );
        assert_eq!(
            run(&data, &[0]),
            Err(QuizError::NoResultsAvailable { mode: Mode::Test })
        );
        assert_eq!(
            run(&data, &[]),
            Err(QuizError::Incomplete {
                answered: 0,
                total: 1
            })
        );
    }

    #[test]
    fn test_fortune_zero_questions() {
        let data = json!({
            "mode": "fortune",
            "results": [ { "title": "lucky" }, { "title": "unlucky" } ]
        });
        let outcome = run(&data, &[]).unwrap();
        assert!(outcome.result_index < 2);
        assert_eq!(run(&data, &[0]), Err(QuizError::AlreadyResolved));
    }
}
