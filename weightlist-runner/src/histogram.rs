//! Selection histograms and goodness-of-fit checks.
//!
//! Counts how often each element is drawn under a fixed seed and compares the
//! counts to the expected `weight / total` shares with a chi-square statistic.

use std::sync::atomic::{AtomicU64, Ordering};

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use weightlist_core::Selector;

use crate::rng::SeedTree;

/// Upper 0.1% quantile of the standard normal distribution.
const Z_999: f64 = 3.090_232;

/// Per-element draw counts, in list order.
pub fn selection_counts<T, S: Selector<T>>(list: &S, seed: u64, runs: usize) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut counts = vec![0u64; list.size()];
    for _ in 0..runs {
        let r = list.draw(&mut rng);
        counts[list.index_at(r)] += 1;
    }
    counts
}

/// Draw `runs` times and bump each drawn element's own counter.
pub fn record_draws<S: Selector<AtomicU64>>(list: &S, seed: u64, runs: usize) {
    let mut rng = StdRng::seed_from_u64(seed);
    for _ in 0..runs {
        list.get(&mut rng).value().fetch_add(1, Ordering::Relaxed);
    }
}

/// Fan draws out over `workers` rayon tasks sharing one list. Each worker
/// gets its own RNG from `seeds`; counts are summed.
pub fn concurrent_counts<T, S>(
    list: &S,
    seeds: &SeedTree,
    workers: usize,
    runs_per_worker: usize,
) -> Vec<u64>
where
    S: Selector<T> + Sync,
{
    let n = list.size();
    (0..workers)
        .into_par_iter()
        .map(|worker| {
            let mut rng = seeds.rng_for(worker);
            let mut counts = vec![0u64; n];
            for _ in 0..runs_per_worker {
                let r = list.draw(&mut rng);
                counts[list.index_at(r)] += 1;
            }
            counts
        })
        .reduce(
            || vec![0u64; n],
            |mut acc, counts| {
                acc.iter_mut().zip(counts).for_each(|(a, c)| *a += c);
                acc
            },
        )
}

/// Result of a chi-square goodness-of-fit test.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ChiSquare {
    pub statistic: f64,
    pub dof: usize,
    /// Critical value at p = 0.001 for `dof` degrees of freedom.
    pub critical_999: f64,
}

impl ChiSquare {
    pub fn passes(&self) -> bool {
        self.statistic <= self.critical_999
    }
}

/// Chi-square statistic of `observed` counts against `weights`.
///
/// Zero-weight bins carry no degree of freedom; any draw landing in one
/// makes the statistic infinite.
///
/// # Panics
///
/// Panics if `observed` and `weights` differ in length.
pub fn chi_square(observed: &[u64], weights: &[f64]) -> ChiSquare {
    assert_eq!(observed.len(), weights.len(), "one count per weight");

    let total_weight: f64 = weights.iter().sum();
    let draws: u64 = observed.iter().sum();
    let mut statistic = 0.0;
    let mut bins = 0usize;

    for (&o, &w) in observed.iter().zip(weights) {
        let expected = draws as f64 * w / total_weight;
        if expected > 0.0 {
            let d = o as f64 - expected;
            statistic += d * d / expected;
            bins += 1;
        } else if o > 0 {
            statistic = f64::INFINITY;
        }
    }

    let dof = bins.saturating_sub(1);
    ChiSquare {
        statistic,
        dof,
        critical_999: critical_value(dof),
    }
}

/// Wilson–Hilferty approximation of the upper 0.1% chi-square quantile.
fn critical_value(dof: usize) -> f64 {
    if dof == 0 {
        return 0.0;
    }
    let k = dof as f64;
    let a = 2.0 / (9.0 * k);
    k * (1.0 - a + Z_999 * a.sqrt()).powi(3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{counters, descending_counters};
    use weightlist_core::{LinearSearch, WeightedList};

    #[test]
    fn critical_values_near_table() {
        // Tabulated: dof 1 → 10.828, dof 9 → 27.877, dof 100 → 149.449.
        assert!((critical_value(9) - 27.877).abs() < 0.3);
        assert!((critical_value(100) - 149.449).abs() < 0.3);
        assert!(critical_value(1) > 10.0);
    }

    #[test]
    fn exact_counts_have_zero_statistic() {
        let chi = chi_square(&[10, 20, 30], &[1.0, 2.0, 3.0]);
        assert_eq!(chi.statistic, 0.0);
        assert_eq!(chi.dof, 2);
        assert!(chi.passes());
    }

    #[test]
    fn skewed_counts_fail() {
        let chi = chi_square(&[600, 200, 200], &[1.0, 1.0, 1.0]);
        assert!(!chi.passes());
    }

    #[test]
    fn draws_in_zero_weight_bin_are_infinite() {
        let chi = chi_square(&[1, 9], &[0.0, 1.0]);
        assert!(chi.statistic.is_infinite());
        assert!(!chi.passes());
    }

    #[test]
    #[should_panic(expected = "one count per weight")]
    fn mismatched_lengths_panic() {
        chi_square(&[1, 2, 3], &[1.0, 1.0]);
    }

    #[test]
    fn seeded_counts_fit_weights() {
        let list = WeightedList::from_pairs((0..20).map(|i| (i, (20 - i) as f64))).unwrap();
        let counts = selection_counts(&list, 0, 50_000);
        assert_eq!(counts.iter().sum::<u64>(), 50_000);
        let weights: Vec<f64> = list.iter().map(|e| e.weight()).collect();
        assert!(chi_square(&counts, &weights).passes());
    }

    #[test]
    fn record_draws_matches_selection_counts() {
        let list = LinearSearch::new(descending_counters(12)).unwrap();
        record_draws(&list, 5, 2_000);
        assert_eq!(counters(&list), selection_counts(&list, 5, 2_000));
    }

    #[test]
    fn concurrent_counts_are_deterministic() {
        let list = WeightedList::from_pairs((0..400).map(|i| (i, 1.0 + (i % 7) as f64))).unwrap();
        let seeds = SeedTree::new(9);
        let a = concurrent_counts(&list, &seeds, 4, 2_500);
        let b = concurrent_counts(&list, &seeds, 4, 2_500);
        assert_eq!(a, b);
        assert_eq!(a.iter().sum::<u64>(), 10_000);
    }
}
