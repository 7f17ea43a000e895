//! Type label module.
//!
//! Provides the `TypeLabel` type, the closed set of accumulator labels
//! (`A`, `B`, `C`) that options score toward and diagnosis results are
//! keyed by.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three score accumulators.
///
/// The declaration order is significant: it is the order in which the
/// diagnosis resolver visits labels, and therefore decides ties.
///
/// # Examples
///
/// ```rust
/// use quizcore::TypeLabel;
///
/// assert_eq!(TypeLabel::ALL, [TypeLabel::A, TypeLabel::B, TypeLabel::C]);
/// assert_eq!(TypeLabel::from_tag("B"), Some(TypeLabel::B));
/// assert_eq!(TypeLabel::from_tag("D"), None);
/// ```
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TypeLabel {
    A,
    B,
    C,
}

impl TypeLabel {
    /// All labels in tie-break order.
    pub const ALL: [TypeLabel; 3] = [TypeLabel::A, TypeLabel::B, TypeLabel::C];

    /// Parse a result `type` tag. Matching is exact.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "A" => Some(TypeLabel::A),
            "B" => Some(TypeLabel::B),
            "C" => Some(TypeLabel::C),
            _ => None,
        }
    }

    /// The tag string used in documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeLabel::A => "A",
            TypeLabel::B => "B",
            TypeLabel::C => "C",
        }
    }
}

impl fmt::Display for TypeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
