//! Counter-payload fixtures for driving lists.

use std::sync::atomic::{AtomicU64, Ordering};

use weightlist_core::{Selector, WeightedElement};

/// `size` elements with weights `size, size-1, ..., 1`, each carrying a
/// zeroed draw counter.
pub fn descending_counters(size: usize) -> Vec<WeightedElement<AtomicU64>> {
    (0..size)
        .map(|i| WeightedElement::new(AtomicU64::new(0), (size - i) as f64))
        .collect()
}

/// Counter values in list order.
pub fn counters<S: Selector<AtomicU64>>(list: &S) -> Vec<u64> {
    list.iter()
        .map(|e| e.value().load(Ordering::Relaxed))
        .collect()
}

pub fn reset_counters<S: Selector<AtomicU64>>(list: &S) {
    list.for_each(|e| e.value().store(0, Ordering::Relaxed));
}

#[cfg(test)]
mod tests {
    use super::*;
    use weightlist_core::LinearSearch;

    #[test]
    fn weights_descend_from_size() {
        let elements = descending_counters(4);
        let weights: Vec<f64> = elements.iter().map(|e| e.weight()).collect();
        assert_eq!(weights, vec![4.0, 3.0, 2.0, 1.0]);
    }

    #[test]
    fn counters_start_at_zero_and_reset() {
        let list = LinearSearch::new(descending_counters(3)).unwrap();
        list.elements()[1].value().fetch_add(5, Ordering::Relaxed);
        assert_eq!(counters(&list), vec![0, 5, 0]);
        reset_counters(&list);
        assert_eq!(counters(&list), vec![0, 0, 0]);
    }
}
