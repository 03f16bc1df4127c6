//! Serializable measurement configuration.
//!
//! Loaded from TOML; every field has a default, so a config file only needs
//! the values it overrides.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest list size a session may build. Every measured size allocates a
/// fixture of that many elements.
pub const MAX_LIST_SIZE: usize = 10_000_000;

/// Inclusive range of list sizes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SizeRange {
    pub from: usize,
    pub to: usize,
}

impl SizeRange {
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }

    pub fn sizes(&self) -> std::ops::RangeInclusive<usize> {
        self.from..=self.to
    }

    pub fn len(&self) -> usize {
        self.to
            .checked_sub(self.from)
            .map_or(0, |span| span.saturating_add(1))
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Configuration for a measurement session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MeasureConfig {
    /// Seed for every draw batch; each batch starts from a fresh RNG.
    pub seed: u64,
    /// Draws per timed batch.
    pub runs: usize,
    /// List size used by the `sample` and `check` modes.
    pub sample_size: usize,
    /// Directory for CSV and JSON reports.
    pub output_dir: PathBuf,
    /// Worker threads for concurrent draw sweeps.
    pub workers: usize,
    /// Sizes timed before measuring; results are discarded.
    pub warmup: SizeRange,
    /// Sizes written to the report.
    pub measure: SizeRange,
}

impl Default for MeasureConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            runs: 10_000,
            sample_size: 20,
            output_dir: PathBuf::from("reports"),
            workers: 4,
            warmup: SizeRange::new(1, 1_000),
            measure: SizeRange::new(1, 3_000),
        }
    }
}

/// Errors from loading or validating a config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config TOML: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid {name} range: from {from} to {to} (sizes start at 1 and must not be empty)")]
    InvalidRange {
        name: &'static str,
        from: usize,
        to: usize,
    },
    #[error("{name} range ends at {to}, above the largest list size {max}")]
    TooLarge {
        name: &'static str,
        to: usize,
        max: usize,
    },
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

impl MeasureConfig {
    /// Load and validate a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, range) in [("warmup", self.warmup), ("measure", self.measure)] {
            if range.from == 0 || range.is_empty() {
                return Err(ConfigError::InvalidRange {
                    name,
                    from: range.from,
                    to: range.to,
                });
            }
            if range.to > MAX_LIST_SIZE {
                return Err(ConfigError::TooLarge {
                    name,
                    to: range.to,
                    max: MAX_LIST_SIZE,
                });
            }
        }
        if self.runs == 0 {
            return Err(ConfigError::Zero("runs"));
        }
        if self.sample_size == 0 {
            return Err(ConfigError::Zero("sample_size"));
        }
        if self.workers == 0 {
            return Err(ConfigError::Zero("workers"));
        }
        Ok(())
    }
}
