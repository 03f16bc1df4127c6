//! Weightlist Core — weighted random selection over a fixed set of items.
//!
//! This crate contains the selection structure itself:
//! - Weighted elements (`(value, weight)` pairs ordered by weight)
//! - Sorted element storage with precomputed cumulative weights
//! - Linear-scan and binary-search lookups with identical results
//! - A size-based factory (linear up to 300 elements, binary above)
//! - An incremental builder
//!
//! ```
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use weightlist_core::{Selector, WeightedList};
//!
//! let list = WeightedList::from_pairs([("common", 8.0), ("rare", 1.0)]).unwrap();
//! let mut rng = StdRng::seed_from_u64(0);
//! let picked = list.get(&mut rng);
//! assert!(["common", "rare"].contains(picked.value()));
//! ```

pub mod builder;
pub mod element;
pub mod error;
pub mod list;
pub mod search;

pub use builder::WeightedListBuilder;
pub use element::WeightedElement;
pub use error::{InputKind, WeightedListError};
pub use list::{BinarySearch, LinearSearch, Selector, WeightedList};
pub use search::{binary_index, linear_index, SearchStrategy, LINEAR_SEARCH_MAX_LEN};
