//! Weighted lists — sorted elements plus precomputed cumulative weights.
//!
//! Construction validates the input, sorts it ascending by weight (stable)
//! and computes the running sum of weights. The result is immutable: every
//! draw only reads the two arrays, so a list can be shared across threads
//! as long as each thread brings its own random source.
//!
//! Two lookups resolve a draw, [`LinearSearch`] and [`BinarySearch`]. They
//! return the same element for the same drawn value, so [`WeightedList`]
//! picks one by size alone (see [`SearchStrategy::for_len`]).

use std::slice;

use rand::distributions::Distribution;
use rand::Rng;
use tracing::debug;

use crate::builder::WeightedListBuilder;
use crate::element::WeightedElement;
use crate::error::{InputKind, WeightedListError};
use crate::search::{binary_index, linear_index, SearchStrategy};

// ─── Shared contract ─────────────────────────────────────────────────

/// Read-only selection contract shared by every list variant.
pub trait Selector<T> {
    /// Elements in ascending weight order.
    fn elements(&self) -> &[WeightedElement<T>];

    /// Running sum of weights, same length as [`Selector::elements`].
    fn cumulative_weights(&self) -> &[f64];

    /// Lookup used by [`Selector::index_at`].
    fn strategy(&self) -> SearchStrategy;

    /// Index of the first element whose cumulative weight is `> r`.
    /// Falls back to the last index when none is.
    fn index_at(&self, r: f64) -> usize;

    fn size(&self) -> usize {
        self.elements().len()
    }

    fn total_weight(&self) -> f64 {
        // Construction guarantees at least one element.
        self.cumulative_weights()[self.size() - 1]
    }

    /// Element selected by the raw draw value `r` in `[0, total_weight)`.
    fn get_at(&self, r: f64) -> &WeightedElement<T> {
        &self.elements()[self.index_at(r)]
    }

    /// Draw one value in `[0, total_weight)` from `rng`.
    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        rng.gen::<f64>() * self.total_weight()
    }

    /// Draw a weighted random element.
    fn get<R: Rng + ?Sized>(&self, rng: &mut R) -> &WeightedElement<T> {
        let r = self.draw(rng);
        self.get_at(r)
    }

    fn iter(&self) -> slice::Iter<'_, WeightedElement<T>> {
        self.elements().iter()
    }

    fn for_each<F: FnMut(&WeightedElement<T>)>(&self, f: F) {
        self.iter().for_each(f);
    }

    /// Probability of drawing the element at `index`, or `None` when
    /// `index` is out of range.
    fn probability(&self, index: usize) -> Option<f64> {
        let element = self.elements().get(index)?;
        Some(element.weight() / self.total_weight())
    }
}

// ─── Storage ─────────────────────────────────────────────────────────

/// Sorted elements and their cumulative weights.
#[derive(Debug, Clone)]
struct Table<T> {
    elements: Vec<WeightedElement<T>>,
    cumulative: Vec<f64>,
}

impl<T> Table<T> {
    fn build(
        mut elements: Vec<WeightedElement<T>>,
        input: InputKind,
    ) -> Result<Self, WeightedListError> {
        if elements.is_empty() {
            return Err(WeightedListError::Empty { input });
        }

        for (index, e) in elements.iter().enumerate() {
            let weight = e.weight();
            if !weight.is_finite() {
                return Err(WeightedListError::NonFiniteWeight { index, weight });
            }
            if weight < 0.0 {
                return Err(WeightedListError::NegativeWeight { index, weight });
            }
        }

        // Stable: equal weights keep their input order.
        elements.sort_by(WeightedElement::cmp_by_weight);

        let mut sum = 0.0;
        let cumulative: Vec<f64> = elements
            .iter()
            .map(|e| {
                sum += e.weight();
                sum
            })
            .collect();

        if !sum.is_finite() {
            return Err(WeightedListError::NonFiniteTotalWeight { total: sum });
        }
        if sum <= 0.0 {
            return Err(WeightedListError::ZeroTotalWeight);
        }

        Ok(Self {
            elements,
            cumulative,
        })
    }
}

// ─── Variants ────────────────────────────────────────────────────────

/// Resolves draws by scanning cumulative weights front to back. O(n).
#[derive(Debug, Clone)]
pub struct LinearSearch<T> {
    table: Table<T>,
}

impl<T> LinearSearch<T> {
    /// Build a linear-search list regardless of size.
    pub fn new<I>(elements: I) -> Result<Self, WeightedListError>
    where
        I: IntoIterator<Item = WeightedElement<T>>,
    {
        let table = Table::build(elements.into_iter().collect(), InputKind::Collection)?;
        Ok(Self { table })
    }

    pub fn into_elements(self) -> Vec<WeightedElement<T>> {
        self.table.elements
    }
}

impl<T> Selector<T> for LinearSearch<T> {
    fn elements(&self) -> &[WeightedElement<T>] {
        &self.table.elements
    }

    fn cumulative_weights(&self) -> &[f64] {
        &self.table.cumulative
    }

    fn strategy(&self) -> SearchStrategy {
        SearchStrategy::Linear
    }

    fn index_at(&self, r: f64) -> usize {
        linear_index(&self.table.cumulative, r)
    }
}

/// Resolves draws by binary search over cumulative weights. O(log n).
#[derive(Debug, Clone)]
pub struct BinarySearch<T> {
    table: Table<T>,
}

impl<T> BinarySearch<T> {
    /// Build a binary-search list regardless of size.
    pub fn new<I>(elements: I) -> Result<Self, WeightedListError>
    where
        I: IntoIterator<Item = WeightedElement<T>>,
    {
        let table = Table::build(elements.into_iter().collect(), InputKind::Collection)?;
        Ok(Self { table })
    }

    pub fn into_elements(self) -> Vec<WeightedElement<T>> {
        self.table.elements
    }
}

impl<T> Selector<T> for BinarySearch<T> {
    fn elements(&self) -> &[WeightedElement<T>] {
        &self.table.elements
    }

    fn cumulative_weights(&self) -> &[f64] {
        &self.table.cumulative
    }

    fn strategy(&self) -> SearchStrategy {
        SearchStrategy::Binary
    }

    fn index_at(&self, r: f64) -> usize {
        binary_index(&self.table.cumulative, r)
    }
}

// ─── Size-selected list ──────────────────────────────────────────────

/// A weighted list whose lookup is chosen from its size.
#[derive(Debug, Clone)]
pub enum WeightedList<T> {
    Linear(LinearSearch<T>),
    Binary(BinarySearch<T>),
}

impl<T> WeightedList<T> {
    /// Build from a value → weight map (any map that iterates as
    /// `(value, weight)` pairs).
    ///
    /// Equal weights keep the map's iteration order, so seeded draws are
    /// only reproducible when that order is. A `BTreeMap` or a `HashMap`
    /// with a fixed hasher qualifies; a `HashMap` with the default
    /// `RandomState` iterates differently for every map instance.
    pub fn from_map<M>(map: M) -> Result<Self, WeightedListError>
    where
        M: IntoIterator<Item = (T, f64)>,
    {
        let elements = map
            .into_iter()
            .map(|(value, weight)| WeightedElement::new(value, weight))
            .collect();
        Self::build(elements, InputKind::Map)
    }

    /// Build from a collection of elements.
    pub fn from_elements<I>(elements: I) -> Result<Self, WeightedListError>
    where
        I: IntoIterator<Item = WeightedElement<T>>,
    {
        Self::build(elements.into_iter().collect(), InputKind::Collection)
    }

    /// Build from `(value, weight)` pairs.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, WeightedListError>
    where
        I: IntoIterator<Item = (T, f64)>,
    {
        Self::from_elements(pairs.into_iter().map(WeightedElement::from))
    }

    pub fn builder() -> WeightedListBuilder<T> {
        WeightedListBuilder::new()
    }

    pub(crate) fn build(
        elements: Vec<WeightedElement<T>>,
        input: InputKind,
    ) -> Result<Self, WeightedListError> {
        let table = Table::build(elements, input)?;
        let strategy = SearchStrategy::for_len(table.elements.len());

        debug!(
            len = table.elements.len(),
            strategy = strategy.name(),
            total_weight = table.cumulative[table.cumulative.len() - 1],
            %input,
            "built weighted list"
        );

        Ok(match strategy {
            SearchStrategy::Linear => WeightedList::Linear(LinearSearch { table }),
            SearchStrategy::Binary => WeightedList::Binary(BinarySearch { table }),
        })
    }

    pub fn into_elements(self) -> Vec<WeightedElement<T>> {
        match self {
            WeightedList::Linear(l) => l.into_elements(),
            WeightedList::Binary(b) => b.into_elements(),
        }
    }
}

impl<T> Selector<T> for WeightedList<T> {
    fn elements(&self) -> &[WeightedElement<T>] {
        match self {
            WeightedList::Linear(l) => l.elements(),
            WeightedList::Binary(b) => b.elements(),
        }
    }

    fn cumulative_weights(&self) -> &[f64] {
        match self {
            WeightedList::Linear(l) => l.cumulative_weights(),
            WeightedList::Binary(b) => b.cumulative_weights(),
        }
    }

    fn strategy(&self) -> SearchStrategy {
        match self {
            WeightedList::Linear(_) => SearchStrategy::Linear,
            WeightedList::Binary(_) => SearchStrategy::Binary,
        }
    }

    fn index_at(&self, r: f64) -> usize {
        match self {
            WeightedList::Linear(l) => l.index_at(r),
            WeightedList::Binary(b) => b.index_at(r),
        }
    }
}

// ─── rand / iteration glue ───────────────────────────────────────────

macro_rules! impl_list_traits {
    ($($ty:ident),*) => {$(
        /// Samples the index of the drawn element.
        impl<T> Distribution<usize> for $ty<T> {
            fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
                let r = self.draw(rng);
                self.index_at(r)
            }
        }

        impl<'a, T> IntoIterator for &'a $ty<T> {
            type Item = &'a WeightedElement<T>;
            type IntoIter = slice::Iter<'a, WeightedElement<T>>;

            fn into_iter(self) -> Self::IntoIter {
                self.iter()
            }
        }
    )*};
}

impl_list_traits!(LinearSearch, BinarySearch, WeightedList);
