//! Timed draw batches — linear vs binary lookup per list size.
//!
//! Every batch starts from `StdRng::seed_from_u64(seed)`, so both variants
//! consume the identical random stream and the only difference between their
//! timings is the lookup itself.

use std::hint::black_box;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};
use weightlist_core::{BinarySearch, LinearSearch, Selector, WeightedListError};

use crate::config::{MeasureConfig, SizeRange};
use crate::fixtures::descending_counters;
use crate::report::ReportError;

/// One report line: nanoseconds spent on `runs` draws for each variant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimingRow {
    pub size: usize,
    pub linear_ns: u64,
    pub binary_ns: u64,
}

impl TimingRow {
    pub fn binary_faster(&self) -> bool {
        self.binary_ns < self.linear_ns
    }
}

/// Destination for timing rows as they are produced.
pub trait RowSink {
    fn write_row(&mut self, row: &TimingRow) -> Result<(), ReportError>;
}

impl RowSink for Vec<TimingRow> {
    fn write_row(&mut self, row: &TimingRow) -> Result<(), ReportError> {
        self.push(*row);
        Ok(())
    }
}

/// Errors from a timing sweep.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    List(#[from] WeightedListError),
    #[error(transparent)]
    Report(#[from] ReportError),
}

/// Time `runs` draws from `list` with a fresh RNG seeded by `seed`.
pub fn time_draws<T, S: Selector<T>>(list: &S, seed: u64, runs: usize) -> Duration {
    let mut rng = StdRng::seed_from_u64(seed);
    let start = Instant::now();
    for _ in 0..runs {
        black_box(list.get(&mut rng));
    }
    start.elapsed()
}

fn as_nanos(d: Duration) -> u64 {
    u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)
}

/// Build both variants of the descending fixture at `size` and time each.
pub fn measure_size(size: usize, seed: u64, runs: usize) -> Result<TimingRow, WeightedListError> {
    let linear = LinearSearch::new(descending_counters(size))?;
    let linear_ns = as_nanos(time_draws(&linear, seed, runs));
    let binary = BinarySearch::new(descending_counters(size))?;
    let binary_ns = as_nanos(time_draws(&binary, seed, runs));

    Ok(TimingRow {
        size,
        linear_ns,
        binary_ns,
    })
}

/// Time every size in `range` and discard the results.
pub fn warmup(range: SizeRange, config: &MeasureConfig) -> Result<(), RunError> {
    info!(from = range.from, to = range.to, "warming up");
    for size in range.sizes() {
        measure_size(size, config.seed, config.runs)?;
    }
    Ok(())
}

/// Time every size in `range`, streaming each row to `sink`.
pub fn measure_range<K: RowSink + ?Sized>(
    range: SizeRange,
    config: &MeasureConfig,
    sink: &mut K,
) -> Result<Vec<TimingRow>, RunError> {
    info!(from = range.from, to = range.to, runs = config.runs, "measuring");
    let mut rows = Vec::new();
    for size in range.sizes() {
        let row = measure_size(size, config.seed, config.runs)?;
        debug!(size, linear_ns = row.linear_ns, binary_ns = row.binary_ns, "timed");
        sink.write_row(&row)?;
        rows.push(row);
    }
    Ok(rows)
}

/// Smallest size from which binary search wins a majority of every
/// remaining suffix of `rows` (sorted by size). `None` when linear search
/// still wins at the largest sizes.
pub fn estimate_crossover(rows: &[TimingRow]) -> Option<usize> {
    let mut wins = 0usize;
    let mut crossover = None;
    for (seen, row) in rows.iter().rev().enumerate() {
        if row.binary_faster() {
            wins += 1;
        }
        if wins * 2 > seen + 1 {
            crossover = Some(row.size);
        } else {
            break;
        }
    }
    crossover
}
