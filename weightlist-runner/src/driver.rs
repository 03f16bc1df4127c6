//! Session drivers behind the CLI modes: sample, measure, check.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;
use tracing::{info, warn};
use weightlist_core::{
    BinarySearch, LinearSearch, SearchStrategy, Selector, WeightedElement, WeightedList,
    WeightedListError,
};

use crate::config::MeasureConfig;
use crate::fixtures::{counters, descending_counters};
use crate::histogram::{chi_square, concurrent_counts, record_draws, selection_counts, ChiSquare};
use crate::report::{create_csv, export_summary_json, timestamped_path, TimingSummary};
use crate::rng::SeedTree;
use crate::timing::{measure_range, warmup, TimingRow};

// ─── Sample ─────────────────────────────────────────────────────────

/// Per-element draw counts for both variants over the descending fixture.
#[derive(Debug, Clone, Serialize)]
pub struct SampleReport {
    pub size: usize,
    pub runs: usize,
    pub linear: Vec<u64>,
    pub binary: Vec<u64>,
}

pub fn run_sample(size: usize, seed: u64, runs: usize) -> Result<SampleReport, WeightedListError> {
    let linear = LinearSearch::new(descending_counters(size))?;
    record_draws(&linear, seed, runs);
    let binary = BinarySearch::new(descending_counters(size))?;
    record_draws(&binary, seed, runs);

    Ok(SampleReport {
        size,
        runs,
        linear: counters(&linear),
        binary: counters(&binary),
    })
}

// ─── Measure ────────────────────────────────────────────────────────

/// Files and rows produced by a measurement session.
#[derive(Debug, Clone)]
pub struct MeasureOutcome {
    pub csv_path: PathBuf,
    pub json_path: PathBuf,
    pub rows: Vec<TimingRow>,
    pub summary: TimingSummary,
}

/// Optionally warm up, then time every configured size into a timestamped
/// CSV report with a JSON summary next to it.
pub fn run_measure(config: &MeasureConfig, with_warmup: bool) -> Result<MeasureOutcome> {
    config.validate()?;
    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "failed to create output directory {}",
            config.output_dir.display()
        )
    })?;

    if with_warmup {
        warmup(config.warmup, config)?;
    }

    let csv_path = timestamped_path(&config.output_dir, Local::now().naive_local(), "csv");
    let mut sink = create_csv(&csv_path)?;
    let rows = measure_range(config.measure, config, &mut sink)?;

    let summary = TimingSummary::from_rows(&rows, config);
    let json_path = csv_path.with_extension("json");
    std::fs::write(&json_path, export_summary_json(&summary)?)
        .with_context(|| format!("failed to write {}", json_path.display()))?;

    info!(
        csv = %csv_path.display(),
        rows = rows.len(),
        crossover = ?summary.observed_crossover,
        "measurement written"
    );

    Ok(MeasureOutcome {
        csv_path,
        json_path,
        rows,
        summary,
    })
}

// ─── Check ──────────────────────────────────────────────────────────

/// Goodness-of-fit results for one list size.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub size: usize,
    /// Strategy the factory picked for this size.
    pub strategy: SearchStrategy,
    pub linear: ChiSquare,
    pub binary: ChiSquare,
    /// Concurrent sweep over the factory-built list.
    pub concurrent: ChiSquare,
    /// Linear and binary produced identical counts for the same seed.
    pub variants_agree: bool,
}

impl CheckReport {
    pub fn passed(&self) -> bool {
        self.variants_agree
            && self.linear.passes()
            && self.binary.passes()
            && self.concurrent.passes()
    }
}

pub fn run_check(size: usize, config: &MeasureConfig) -> Result<CheckReport, WeightedListError> {
    let elements = || (0..size).map(move |i| WeightedElement::new(i, (size - i) as f64));
    let linear = LinearSearch::new(elements())?;
    let binary = BinarySearch::new(elements())?;
    let list = WeightedList::from_elements(elements())?;
    let weights: Vec<f64> = list.iter().map(|e| e.weight()).collect();

    let linear_counts = selection_counts(&linear, config.seed, config.runs);
    let binary_counts = selection_counts(&binary, config.seed, config.runs);
    let shared = concurrent_counts(
        &list,
        &SeedTree::new(config.seed),
        config.workers,
        config.runs,
    );

    let report = CheckReport {
        size,
        strategy: list.strategy(),
        linear: chi_square(&linear_counts, &weights),
        binary: chi_square(&binary_counts, &weights),
        concurrent: chi_square(&shared, &weights),
        variants_agree: linear_counts == binary_counts,
    };

    if report.passed() {
        info!(size, strategy = report.strategy.name(), "distribution check passed");
    } else {
        warn!(
            size,
            agree = report.variants_agree,
            linear = report.linear.statistic,
            binary = report.binary.statistic,
            concurrent = report.concurrent.statistic,
            critical = report.linear.critical_999,
            "distribution check failed"
        );
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_counts_sum_to_runs_and_match() {
        let report = run_sample(20, 0, 10_000).unwrap();
        assert_eq!(report.linear.len(), 20);
        assert_eq!(report.linear.iter().sum::<u64>(), 10_000);
        assert_eq!(report.linear, report.binary);
    }

    #[test]
    fn sample_of_zero_fails() {
        assert!(run_sample(0, 0, 10).is_err());
    }

    #[test]
    fn check_passes_on_both_sides_of_crossover() {
        let config = MeasureConfig {
            runs: 50_000,
            ..MeasureConfig::default()
        };
        for size in [20, 301] {
            let report = run_check(size, &config).unwrap();
            assert!(report.variants_agree);
            assert!(report.passed(), "{report:?}");
        }
        assert_eq!(run_check(300, &config).unwrap().strategy, SearchStrategy::Linear);
    }
}
