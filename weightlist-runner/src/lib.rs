//! Weightlist Runner — measurement and verification drivers for weighted lists.
//!
//! This crate builds on `weightlist-core` through its public API only:
//! - TOML measurement configuration
//! - Counter-payload fixtures
//! - Seeded timing batches for linear vs binary lookup, CSV streaming
//! - Selection histograms, chi-square checks, concurrent draw sweeps
//! - JSON session summaries with an observed crossover estimate

pub mod config;
pub mod driver;
pub mod fixtures;
pub mod histogram;
pub mod report;
pub mod rng;
pub mod timing;

pub use config::{ConfigError, MeasureConfig, SizeRange, MAX_LIST_SIZE};
pub use driver::{run_check, run_measure, run_sample, CheckReport, MeasureOutcome, SampleReport};
pub use histogram::{chi_square, concurrent_counts, selection_counts, ChiSquare};
pub use report::{CsvSink, ReportError, TimingSummary};
pub use rng::SeedTree;
pub use timing::{estimate_crossover, measure_size, time_draws, RowSink, RunError, TimingRow};
