//! Construction errors.
//!
//! Every variant is an "invalid argument" condition raised while building a
//! list. Selection itself never fails.

use std::fmt;

use thiserror::Error;

/// Which construction entry point received the rejected input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Map,
    Collection,
    Builder,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputKind::Map => write!(f, "map"),
            InputKind::Collection => write!(f, "collection"),
            InputKind::Builder => write!(f, "builder"),
        }
    }
}

/// Errors from building a weighted list.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeightedListError {
    #[error("invalid argument: empty {input}")]
    Empty { input: InputKind },
    #[error("invalid argument: negative weight {weight} at index {index}")]
    NegativeWeight { index: usize, weight: f64 },
    #[error("invalid argument: non-finite weight {weight} at index {index}")]
    NonFiniteWeight { index: usize, weight: f64 },
    #[error("invalid argument: total weight is zero")]
    ZeroTotalWeight,
    #[error("invalid argument: total weight {total} is not finite")]
    NonFiniteTotalWeight { total: f64 },
}

impl WeightedListError {
    /// Whether this error came from an empty input.
    pub fn is_empty_input(&self) -> bool {
        matches!(self, WeightedListError::Empty { .. })
    }
}
