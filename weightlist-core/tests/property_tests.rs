//! Property tests for selection invariants.
//!
//! Uses proptest to verify:
//! 1. Lookup equivalence — linear and binary search pick the same index for every draw value
//! 2. Membership — every draw returns an element from the input
//! 3. Shape — sizes match, cumulative weights are non-decreasing, iteration has no duplicates

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use weightlist_core::{
    BinarySearch, LinearSearch, SearchStrategy, Selector, WeightedElement, WeightedList,
};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_weight() -> impl Strategy<Value = f64> {
    prop_oneof![
        1 => Just(0.0),
        8 => 0.001..1000.0_f64,
        1 => (1u32..20).prop_map(f64::from),
    ]
}

/// Weights with at least one positive entry.
fn arb_weights(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    (prop::collection::vec(arb_weight(), 0..max_len), 0.001..1000.0_f64).prop_map(
        |(mut weights, anchor)| {
            weights.push(anchor);
            weights
        },
    )
}

fn elements(weights: &[f64]) -> Vec<WeightedElement<usize>> {
    weights
        .iter()
        .enumerate()
        .map(|(i, &w)| WeightedElement::new(i, w))
        .collect()
}

// ── 1. Lookup equivalence ────────────────────────────────────────────

proptest! {
    /// Both variants resolve any fraction of the total to the same element.
    #[test]
    fn linear_and_binary_agree_on_random_draws(
        weights in arb_weights(600),
        fractions in prop::collection::vec(0.0..1.0_f64, 1..64),
    ) {
        let linear = LinearSearch::new(elements(&weights)).unwrap();
        let binary = BinarySearch::new(elements(&weights)).unwrap();
        prop_assert_eq!(linear.cumulative_weights(), binary.cumulative_weights());

        let total = linear.total_weight();
        for f in fractions {
            let r = f * total;
            prop_assert_eq!(linear.index_at(r), binary.index_at(r));
            prop_assert_eq!(linear.get_at(r).value(), binary.get_at(r).value());
        }
    }

    /// Exact cumulative boundaries (and their neighbours) resolve identically.
    #[test]
    fn linear_and_binary_agree_on_boundaries(weights in arb_weights(400)) {
        let linear = LinearSearch::new(elements(&weights)).unwrap();
        let binary = BinarySearch::new(elements(&weights)).unwrap();

        for &c in linear.cumulative_weights() {
            for r in [c, f64::from_bits(c.to_bits().saturating_sub(1)), 0.0] {
                prop_assert_eq!(linear.index_at(r), binary.index_at(r), "r = {}", r);
            }
        }
    }

    /// Seeded streams produce identical element sequences for both variants.
    #[test]
    fn seeded_streams_match(weights in arb_weights(100), seed in any::<u64>()) {
        let linear = LinearSearch::new(elements(&weights)).unwrap();
        let binary = BinarySearch::new(elements(&weights)).unwrap();
        let mut a = StdRng::seed_from_u64(seed);
        let mut b = StdRng::seed_from_u64(seed);
        for _ in 0..200 {
            prop_assert_eq!(linear.get(&mut a).value(), binary.get(&mut b).value());
        }
    }
}

// ── 2. Membership ────────────────────────────────────────────────────

proptest! {
    /// Every draw returns one of the input values, never a zero-weight one.
    #[test]
    fn draws_come_from_input(weights in arb_weights(500), seed in any::<u64>()) {
        let list = WeightedList::from_elements(elements(&weights)).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..200 {
            let e = list.get(&mut rng);
            prop_assert!(*e.value() < weights.len());
            prop_assert!(e.weight() > 0.0);
            prop_assert_eq!(weights[*e.value()], e.weight());
        }
    }
}

// ── 3. Shape ─────────────────────────────────────────────────────────

proptest! {
    /// Size, sort order, cumulative monotonicity and iteration completeness.
    #[test]
    fn list_shape_matches_input(weights in arb_weights(700)) {
        let list = WeightedList::from_elements(elements(&weights)).unwrap();
        prop_assert_eq!(list.size(), weights.len());
        prop_assert_eq!(list.cumulative_weights().len(), weights.len());
        prop_assert_eq!(list.strategy(), SearchStrategy::for_len(weights.len()));

        let sorted = list.elements().windows(2).all(|w| w[0].weight() <= w[1].weight());
        prop_assert!(sorted);
        let monotone = list.cumulative_weights().windows(2).all(|w| w[0] <= w[1]);
        prop_assert!(monotone);

        let mut seen: Vec<usize> = list.iter().map(|e| *e.value()).collect();
        seen.sort_unstable();
        let expected: Vec<usize> = (0..weights.len()).collect();
        prop_assert_eq!(seen, expected);
    }
}
