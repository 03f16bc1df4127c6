//! Lookup strategies over a cumulative-weight array.
//!
//! Both searches answer the same question: the first index whose cumulative
//! weight is strictly greater than the drawn value `r`. An `r` sitting exactly
//! on a boundary therefore resolves to the *next* element. If no index
//! qualifies (floating-point rounding at the top of the range), the last
//! index is returned.

use serde::{Deserialize, Serialize};

/// Largest element count served by linear search. Lists longer than this
/// use binary search. Empirical crossover; may be re-tuned freely.
pub const LINEAR_SEARCH_MAX_LEN: usize = 300;

/// Which lookup a list uses to resolve a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    Linear,
    Binary,
}

impl SearchStrategy {
    /// Strategy the factory picks for a list of `len` elements.
    pub fn for_len(len: usize) -> Self {
        if len > LINEAR_SEARCH_MAX_LEN {
            SearchStrategy::Binary
        } else {
            SearchStrategy::Linear
        }
    }

    /// Resolve `r` against `cumulative` with this strategy.
    pub fn index(self, cumulative: &[f64], r: f64) -> usize {
        match self {
            SearchStrategy::Linear => linear_index(cumulative, r),
            SearchStrategy::Binary => binary_index(cumulative, r),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SearchStrategy::Linear => "linear",
            SearchStrategy::Binary => "binary",
        }
    }
}

/// Scan from the front for the first cumulative weight `> r`.
///
/// `cumulative` must be non-empty.
pub fn linear_index(cumulative: &[f64], r: f64) -> usize {
    cumulative
        .iter()
        .position(|&c| c > r)
        .unwrap_or(cumulative.len() - 1)
}

/// Binary search for the first cumulative weight `> r`.
///
/// `cumulative` must be non-empty and non-decreasing.
pub fn binary_index(cumulative: &[f64], r: f64) -> usize {
    // partition_point returns the first index where the predicate fails,
    // i.e. the upper-bound insertion point for r.
    let i = cumulative.partition_point(|&c| c <= r);
    i.min(cumulative.len() - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CUM: [f64; 3] = [1.0, 3.0, 6.0];

    #[test]
    fn threshold_switches_after_300() {
        assert_eq!(SearchStrategy::for_len(1), SearchStrategy::Linear);
        assert_eq!(SearchStrategy::for_len(300), SearchStrategy::Linear);
        assert_eq!(SearchStrategy::for_len(301), SearchStrategy::Binary);
    }

    #[test]
    fn boundary_resolves_to_next_element() {
        assert_eq!(linear_index(&CUM, 1.0), 1);
        assert_eq!(binary_index(&CUM, 1.0), 1);
        assert_eq!(linear_index(&CUM, 3.0), 2);
        assert_eq!(binary_index(&CUM, 3.0), 2);
    }

    #[test]
    fn just_below_boundary_stays() {
        let r = below(1.0);
        assert_eq!(linear_index(&CUM, r), 0);
        assert_eq!(binary_index(&CUM, r), 0);
    }

    #[test]
    fn zero_selects_first_positive_weight() {
        assert_eq!(linear_index(&CUM, 0.0), 0);
        assert_eq!(binary_index(&CUM, 0.0), 0);
        // Leading zero weights are skipped.
        let zeros = [0.0, 0.0, 2.0];
        assert_eq!(linear_index(&zeros, 0.0), 2);
        assert_eq!(binary_index(&zeros, 0.0), 2);
    }

    #[test]
    fn out_of_range_falls_back_to_last() {
        assert_eq!(linear_index(&CUM, 6.0), 2);
        assert_eq!(binary_index(&CUM, 6.0), 2);
        assert_eq!(linear_index(&CUM, 100.0), 2);
        assert_eq!(binary_index(&CUM, 100.0), 2);
    }

    #[test]
    fn strategies_agree_on_a_grid() {
        let cum: Vec<f64> = (1..=50).map(|i| (i * (i + 1) / 2) as f64).collect();
        let total = *cum.last().unwrap();
        let mut r = 0.0;
        while r < total {
            assert_eq!(
                SearchStrategy::Linear.index(&cum, r),
                SearchStrategy::Binary.index(&cum, r),
                "r = {r}"
            );
            r += 0.25;
        }
    }

    /// Largest f64 strictly below a positive `x`.
    fn below(x: f64) -> f64 {
        f64::from_bits(x.to_bits() - 1)
    }
}
