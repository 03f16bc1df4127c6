//! Weighted element — an immutable `(value, weight)` pair.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// A payload paired with its relative selection weight.
///
/// Elements order by weight only; the payload is opaque to the list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightedElement<T> {
    value: T,
    weight: f64,
}

impl<T> WeightedElement<T> {
    pub fn new(value: T, weight: f64) -> Self {
        Self { value, weight }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn into_parts(self) -> (T, f64) {
        (self.value, self.weight)
    }

    /// Compare two elements by weight, ascending.
    ///
    /// Uses the IEEE 754 total order so sorting never panics, even on
    /// weights that construction later rejects.
    pub fn cmp_by_weight(&self, other: &Self) -> Ordering {
        self.weight.total_cmp(&other.weight)
    }
}

impl<T> From<(T, f64)> for WeightedElement<T> {
    fn from((value, weight): (T, f64)) -> Self {
        Self::new(value, weight)
    }
}
