//! Report export — CSV timing rows and a JSON session summary.
//!
//! The CSV keeps the column layout `size,linearTime,binaryTime` (nanoseconds
//! per batch). File names are local timestamps, `%Y-%m-%d_%H-%M-%S.csv`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::MeasureConfig;
use crate::timing::{estimate_crossover, RowSink, TimingRow};
use weightlist_core::LINEAR_SEARCH_MAX_LEN;

pub const CSV_HEADER: [&str; 3] = ["size", "linearTime", "binaryTime"];

const FILE_STAMP: &str = "%Y-%m-%d_%H-%M-%S";

/// Errors from writing report rows.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("csv write failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("report io failed: {0}")]
    Io(#[from] std::io::Error),
}

// ─── CSV ────────────────────────────────────────────────────────────

/// Streams timing rows as CSV, flushing after every row so a long sweep
/// leaves a usable file even if interrupted.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvSink<W> {
    pub fn new(inner: W) -> Result<Self, ReportError> {
        let mut writer = csv::Writer::from_writer(inner);
        writer.write_record(CSV_HEADER)?;
        writer.flush()?;
        Ok(Self { writer })
    }

    pub fn into_inner(self) -> Result<W, ReportError> {
        self.writer
            .into_inner()
            .map_err(|e| ReportError::Io(std::io::Error::new(e.error().kind(), e.error().to_string())))
    }
}

impl<W: Write> RowSink for CsvSink<W> {
    fn write_row(&mut self, row: &TimingRow) -> Result<(), ReportError> {
        self.writer.write_record([
            row.size.to_string(),
            row.linear_ns.to_string(),
            row.binary_ns.to_string(),
        ])?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Render rows to a CSV string.
pub fn timing_csv(rows: &[TimingRow]) -> Result<String> {
    let mut sink = CsvSink::new(Vec::new())?;
    for row in rows {
        sink.write_row(row)?;
    }
    let bytes = sink.into_inner()?;
    String::from_utf8(bytes).context("CSV output is not UTF-8")
}

/// Report path inside `dir` stamped with `at`.
pub fn timestamped_path(dir: &Path, at: NaiveDateTime, extension: &str) -> PathBuf {
    dir.join(format!("{}.{extension}", at.format(FILE_STAMP)))
}

/// Open a buffered CSV sink at `path`.
pub fn create_csv(path: &Path) -> Result<CsvSink<BufWriter<File>>> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    Ok(CsvSink::new(BufWriter::new(file))?)
}

// ─── JSON summary ───────────────────────────────────────────────────

/// Aggregate view of one measurement session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimingSummary {
    pub generated_at: NaiveDateTime,
    pub seed: u64,
    pub runs: usize,
    pub rows: usize,
    pub mean_linear_ns: f64,
    pub mean_binary_ns: f64,
    /// Size from which binary search consistently wins, if any.
    pub observed_crossover: Option<usize>,
    /// Threshold the factory actually uses.
    pub configured_crossover: usize,
}

impl TimingSummary {
    pub fn from_rows(rows: &[TimingRow], config: &MeasureConfig) -> Self {
        let mean = |f: fn(&TimingRow) -> u64| {
            if rows.is_empty() {
                0.0
            } else {
                rows.iter().map(|r| f(r) as f64).sum::<f64>() / rows.len() as f64
            }
        };
        Self {
            generated_at: Local::now().naive_local(),
            seed: config.seed,
            runs: config.runs,
            rows: rows.len(),
            mean_linear_ns: mean(|r| r.linear_ns),
            mean_binary_ns: mean(|r| r.binary_ns),
            observed_crossover: estimate_crossover(rows),
            configured_crossover: LINEAR_SEARCH_MAX_LEN + 1,
        }
    }
}

pub fn export_summary_json(summary: &TimingSummary) -> Result<String> {
    serde_json::to_string_pretty(summary).context("failed to serialize TimingSummary to JSON")
}

pub fn import_summary_json(json: &str) -> Result<TimingSummary> {
    serde_json::from_str(json).context("failed to deserialize TimingSummary from JSON")
}
