//! Weightlist CLI — sample, measure and check weighted-list selection.
//!
//! Commands:
//! - `sample` — draw from both lookups over a descending fixture and print per-element counts
//! - `measure` — warm up, then time linear vs binary lookup per size into a CSV report
//! - `check` — chi-square goodness of fit for both lookups plus a concurrent sweep

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing::Level;
use weightlist_core::{SearchStrategy, LINEAR_SEARCH_MAX_LEN};
use weightlist_runner::{run_check, run_measure, run_sample, MeasureConfig, SizeRange};

#[derive(Parser)]
#[command(
    name = "weightlist",
    about = "Weightlist CLI — weighted random selection sampling and timing"
)]
struct Cli {
    /// Log at debug level.
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print per-element draw counts for both lookups.
    Sample {
        /// Number of elements (weights size, size-1, ..., 1).
        #[arg(long, default_value_t = 20)]
        size: usize,

        /// RNG seed shared by both lookups.
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Draws per lookup.
        #[arg(long, default_value_t = 10_000)]
        runs: usize,
    },
    /// Time linear vs binary lookup for a range of sizes.
    Measure {
        /// Path to a TOML config file. Flags below override it.
        #[arg(long)]
        config: Option<PathBuf>,

        /// First measured size.
        #[arg(long)]
        from: Option<usize>,

        /// Last measured size (inclusive).
        #[arg(long)]
        to: Option<usize>,

        /// Draws per timed batch.
        #[arg(long)]
        runs: Option<usize>,

        /// Output directory for CSV and JSON reports.
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Skip the warmup sweep.
        #[arg(long, default_value_t = false)]
        no_warmup: bool,
    },
    /// Chi-square check of both lookups at one size.
    Check {
        /// Number of elements.
        #[arg(long, default_value_t = LINEAR_SEARCH_MAX_LEN + 1)]
        size: usize,

        /// Path to a TOML config file (seed, runs, workers).
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Sample { size, seed, runs } => run_sample_cmd(size, seed, runs),
        Commands::Measure {
            config,
            from,
            to,
            runs,
            output_dir,
            no_warmup,
        } => run_measure_cmd(config, from, to, runs, output_dir, no_warmup),
        Commands::Check { size, config } => run_check_cmd(size, config),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber)
        .map_err(|_err| eprintln!("Unable to set global default subscriber"));
}

fn load_config(path: Option<PathBuf>) -> Result<MeasureConfig> {
    Ok(match path {
        Some(path) => MeasureConfig::from_file(&path)?,
        None => MeasureConfig::default(),
    })
}

fn run_sample_cmd(size: usize, seed: u64, runs: usize) -> Result<()> {
    let report = run_sample(size, seed, runs)?;
    let strategy = SearchStrategy::for_len(size);

    println!("Size {size}, {runs} draws, seed {seed} (factory would use {})", strategy.name());
    println!("Linear: {}", join_counts(&report.linear));
    println!("Binary: {}", join_counts(&report.binary));
    Ok(())
}

fn join_counts(counts: &[u64]) -> String {
    counts
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn run_measure_cmd(
    config: Option<PathBuf>,
    from: Option<usize>,
    to: Option<usize>,
    runs: Option<usize>,
    output_dir: Option<PathBuf>,
    no_warmup: bool,
) -> Result<()> {
    let mut config = load_config(config)?;
    config.measure = SizeRange::new(
        from.unwrap_or(config.measure.from),
        to.unwrap_or(config.measure.to),
    );
    if let Some(runs) = runs {
        config.runs = runs;
    }
    if let Some(dir) = output_dir {
        config.output_dir = dir;
    }

    println!("Measuring sizes {}..={} ...", config.measure.from, config.measure.to);
    let outcome = run_measure(&config, !no_warmup)?;

    println!("Wrote {} rows to {}", outcome.rows.len(), outcome.csv_path.display());
    println!("Summary: {}", outcome.json_path.display());
    match outcome.summary.observed_crossover {
        Some(size) => println!(
            "Binary search wins from size {size} (factory switches at {})",
            outcome.summary.configured_crossover
        ),
        None => println!("Linear search still wins at the largest measured size"),
    }
    Ok(())
}

fn run_check_cmd(size: usize, config: Option<PathBuf>) -> Result<()> {
    let config = load_config(config)?;
    let report = run_check(size, &config)?;

    println!(
        "Size {} ({}), {} draws per lookup, critical χ² {:.2} at dof {}",
        report.size,
        report.strategy.name(),
        config.runs,
        report.linear.critical_999,
        report.linear.dof
    );
    println!("  linear     χ² = {:.2}", report.linear.statistic);
    println!("  binary     χ² = {:.2}", report.binary.statistic);
    println!(
        "  concurrent χ² = {:.2} ({} workers)",
        report.concurrent.statistic, config.workers
    );
    println!("  lookups agree: {}", report.variants_agree);

    if !report.passed() {
        bail!("distribution check failed at size {size}");
    }
    println!("OK");
    Ok(())
}
