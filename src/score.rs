//! Score vectors.
//!
//! A `ScoreVector` is the per-option contribution toward the three
//! accumulators. Vectors are summed component-wise, so accumulation is
//! commutative: the order answers arrive in never changes the tally.
//!
//! Components clamp at [`MAX_SCORE`], the largest integer an IEEE-754
//! double holds exactly. The exported script tallies in doubles, so both
//! sides reach the same totals for any document.

use crate::label::TypeLabel;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};

/// Ceiling of every accumulated score component (`2^53 - 1`).
pub const MAX_SCORE: u64 = (1 << 53) - 1;

/// Fixed-field score contribution with default-zero semantics.
///
/// Missing keys in a stored document deserialize to `0`, and an option
/// with no `score` at all is treated as `ScoreVector::ZERO`.
///
/// # Examples
///
/// ```rust
/// use quizcore::{ScoreVector, TypeLabel};
///
/// let total = ScoreVector::new(2, 0, 1) + ScoreVector::of(TypeLabel::B, 3);
/// assert_eq!(total, ScoreVector::new(2, 3, 1));
/// assert_eq!(total.get(TypeLabel::B), 3);
///
/// let partial: ScoreVector = serde_json::from_str(r#"{"C": 4}"#).unwrap();
/// assert_eq!(partial, ScoreVector::new(0, 0, 4));
/// ```
#[derive(Debug, Clone, Copy, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreVector {
    #[serde(rename = "A", default)]
    pub a: u64,
    #[serde(rename = "B", default)]
    pub b: u64,
    #[serde(rename = "C", default)]
    pub c: u64,
}

impl ScoreVector {
    /// The all-zero vector.
    pub const ZERO: ScoreVector = ScoreVector { a: 0, b: 0, c: 0 };

    pub fn new(a: u64, b: u64, c: u64) -> Self {
        Self { a, b, c }
    }

    /// A vector contributing `points` to a single label.
    pub fn of(label: TypeLabel, points: u64) -> Self {
        let mut vector = Self::ZERO;
        *vector.get_mut(label) = points;
        vector
    }

    /// The conventional marker for a correct option in test mode.
    pub fn correct() -> Self {
        Self::of(TypeLabel::A, 1)
    }

    pub fn get(&self, label: TypeLabel) -> u64 {
        match label {
            TypeLabel::A => self.a,
            TypeLabel::B => self.b,
            TypeLabel::C => self.c,
        }
    }

    fn get_mut(&mut self, label: TypeLabel) -> &mut u64 {
        match label {
            TypeLabel::A => &mut self.a,
            TypeLabel::B => &mut self.b,
            TypeLabel::C => &mut self.c,
        }
    }

    /// Iterate `(label, score)` pairs in `A, B, C` order.
    pub fn iter(&self) -> impl Iterator<Item = (TypeLabel, u64)> + '_ {
        TypeLabel::ALL.into_iter().map(move |label| (label, self.get(label)))
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl Add for ScoreVector {
    type Output = ScoreVector;

    fn add(self, rhs: ScoreVector) -> ScoreVector {
        ScoreVector {
            a: clamped_add(self.a, rhs.a),
            b: clamped_add(self.b, rhs.b),
            c: clamped_add(self.c, rhs.c),
        }
    }
}

fn clamped_add(x: u64, y: u64) -> u64 {
    x.saturating_add(y).min(MAX_SCORE)
}

impl AddAssign for ScoreVector {
    fn add_assign(&mut self, rhs: ScoreVector) {
        *self = *self + rhs;
    }
}
