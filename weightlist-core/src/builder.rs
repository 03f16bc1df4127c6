//! Incremental accumulator for [`WeightedList`].

use crate::element::WeightedElement;
use crate::error::{InputKind, WeightedListError};
use crate::list::WeightedList;

/// Collects elements one at a time, then builds a list.
///
/// Holds no invariants of its own; [`WeightedListBuilder::build`] runs the
/// same validation as the direct constructors.
#[derive(Debug, Clone)]
pub struct WeightedListBuilder<T> {
    pending: Vec<WeightedElement<T>>,
}

impl<T> Default for WeightedListBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> WeightedListBuilder<T> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pending: Vec::with_capacity(capacity),
        }
    }

    pub fn add(&mut self, value: T, weight: f64) -> &mut Self {
        self.pending.push(WeightedElement::new(value, weight));
        self
    }

    pub fn add_element(&mut self, element: WeightedElement<T>) -> &mut Self {
        self.pending.push(element);
        self
    }

    /// Drop everything added so far.
    pub fn reset(&mut self) -> &mut Self {
        self.pending.clear();
        self
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn build(self) -> Result<WeightedList<T>, WeightedListError> {
        WeightedList::build(self.pending, InputKind::Builder)
    }
}

impl<T> Extend<(T, f64)> for WeightedListBuilder<T> {
    fn extend<I: IntoIterator<Item = (T, f64)>>(&mut self, iter: I) {
        self.pending
            .extend(iter.into_iter().map(WeightedElement::from));
    }
}

impl<T> Extend<WeightedElement<T>> for WeightedListBuilder<T> {
    fn extend<I: IntoIterator<Item = WeightedElement<T>>>(&mut self, iter: I) {
        self.pending.extend(iter);
    }
}
