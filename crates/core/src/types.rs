//! Shared value types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction in which generated values sort over time
///
/// `Decreasing` makes the most recent value the numerically smallest, so an
/// ascending range scan over the store returns newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Later values compare greater
    Increasing,
    /// Later values compare smaller
    #[default]
    Decreasing,
}

impl Orientation {
    /// Returns true for `Orientation::Increasing`
    #[inline]
    pub fn is_increasing(&self) -> bool {
        matches!(self, Orientation::Increasing)
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Increasing => write!(f, "increasing"),
            Orientation::Decreasing => write!(f, "decreasing"),
        }
    }
}
