#![warn(missing_docs)]
//! PaceOff CLI Library
//!
//! Thin command layer over the harness: maps flags and `paceoff.toml`
//! settings onto a `RunConfig`, filters registered variants, drives a
//! progress bar from harness events, and hands the results to a renderer.
//!
//! # Example
//!
//! ```ignore
//! fn main() -> anyhow::Result<()> {
//!     let mut harness = paceoff_core::Harness::new();
//!     harness.register("clone", || my_record().clone())?;
//!     paceoff_cli::run(harness)
//! }
//! ```

pub mod config;
pub mod suite;

pub use config::{PaceConfig, parse_duration};

use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use paceoff_core::{Harness, Mode, RunConfig, RunEvent, TimeUnit};
use paceoff_report::{OutputFormat, build_report, format_human_output};
use regex::Regex;
use std::io::Write;
use std::path::PathBuf;

/// PaceOff CLI arguments. Every run-protocol flag maps directly onto a
/// `RunConfig` field; unset flags fall back to `paceoff.toml`, then to the
/// built-in defaults.
#[derive(Parser, Debug)]
#[command(name = "paceoff")]
#[command(author, version, about = "PaceOff - compare variant implementations under one protocol")]
pub struct Cli {
    /// Filter variants by regex pattern
    #[arg(default_value = ".*")]
    pub filter: String,

    /// Untimed warmup iterations per worker
    #[arg(long)]
    pub warmup: Option<u64>,

    /// Timed measurement iterations per worker
    #[arg(long, short = 'n')]
    pub iterations: Option<u64>,

    /// Concurrent worker threads per variant
    #[arg(long, short = 't')]
    pub threads: Option<u32>,

    /// Independent execution contexts per variant
    #[arg(long)]
    pub forks: Option<u32>,

    /// Reporting time unit: ns, us, ms, s
    #[arg(long)]
    pub time_unit: Option<String>,

    /// Aggregation mode: average-time, throughput, sample-time
    #[arg(long)]
    pub mode: Option<String>,

    /// Wall-clock budget for the whole run (e.g. "30s", "2m")
    #[arg(long)]
    pub deadline: Option<String>,

    /// Output format: human, json, csv
    #[arg(long)]
    pub format: Option<String>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// List registered variants without executing
    #[arg(long)]
    pub list: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Run the PaceOff CLI against a pre-registered harness.
pub fn run(harness: Harness) -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(harness, cli)
}

/// Run the CLI with pre-parsed arguments.
pub fn run_with_cli(mut harness: Harness, cli: Cli) -> anyhow::Result<()> {
    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("paceoff=debug")
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("paceoff=info")
            .init();
    }

    // Discover paceoff.toml configuration (CLI flags override)
    let file_config = PaceConfig::discover().unwrap_or_default();
    let run_config = build_run_config(&cli, &file_config)?;

    let format: OutputFormat = cli
        .format
        .as_deref()
        .unwrap_or(&file_config.output.format)
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    // Filter variants
    let filter_re = Regex::new(&cli.filter)
        .with_context(|| format!("invalid filter pattern: {}", cli.filter))?;
    harness.retain_variants(|name| filter_re.is_match(name));

    if cli.list {
        return list_variants(&harness);
    }

    if harness.variant_names().is_empty() {
        anyhow::bail!("no variants match filter '{}'", cli.filter);
    }

    harness
        .configure(run_config.clone())
        .context("invalid run configuration")?;

    tracing::debug!(?run_config, "starting run");

    let total = harness.variant_names().len();
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    let run = harness.run_with_observer(|event| match event {
        RunEvent::VariantStarted { name, .. } => {
            pb.set_message(name.to_string());
        }
        RunEvent::VariantFinished { .. } => {
            pb.inc(1);
        }
    });
    pb.finish_with_message("Complete");

    let report = build_report(run, run_config);

    let rendered = match format {
        OutputFormat::Human => format_human_output(&report),
        OutputFormat::Json => paceoff_report::generate_json_report(&report)?,
        OutputFormat::Csv => paceoff_report::generate_csv_report(&report),
    };

    match cli.output {
        Some(path) => {
            let mut file = std::fs::File::create(&path)
                .with_context(|| format!("cannot create {}", path.display()))?;
            file.write_all(rendered.as_bytes())?;
            tracing::info!(path = %path.display(), "report written");
        }
        None => {
            println!("{}", rendered);
        }
    }

    Ok(())
}

/// Layer the run configuration: built-in defaults → paceoff.toml → flags.
fn build_run_config(cli: &Cli, file_config: &PaceConfig) -> anyhow::Result<RunConfig> {
    let mut config = file_config.to_run_config()?;

    if let Some(warmup) = cli.warmup {
        config.warmup_iterations = warmup;
    }
    if let Some(iterations) = cli.iterations {
        config.measurement_iterations = iterations;
    }
    if let Some(threads) = cli.threads {
        config.threads = threads;
    }
    if let Some(forks) = cli.forks {
        config.forks = forks;
    }
    if let Some(ref unit) = cli.time_unit {
        config.time_unit = unit
            .parse::<TimeUnit>()
            .map_err(|e| anyhow::anyhow!(e))?;
    }
    if let Some(ref mode) = cli.mode {
        config.mode = mode.parse::<Mode>().map_err(|e| anyhow::anyhow!(e))?;
    }
    if let Some(ref deadline) = cli.deadline {
        config.deadline = Some(parse_duration(deadline)?);
    }

    Ok(config)
}

fn list_variants(harness: &Harness) -> anyhow::Result<()> {
    let names = harness.variant_names();
    println!("PaceOff Plan:");
    for name in &names {
        println!("├── {}", name);
    }
    println!("{} variants found.", names.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("paceoff").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_flags_override_file_config() {
        let cli = parse(&["--warmup", "2", "-n", "30", "-t", "4", "--forks", "3"]);
        let config = build_run_config(&cli, &PaceConfig::default()).unwrap();
        assert_eq!(config.warmup_iterations, 2);
        assert_eq!(config.measurement_iterations, 30);
        assert_eq!(config.threads, 4);
        assert_eq!(config.forks, 3);
    }

    #[test]
    fn test_unset_flags_fall_back_to_file_config() {
        let cli = parse(&[]);
        let mut file_config = PaceConfig::default();
        file_config.run.measurement_iterations = 77;
        file_config.run.time_unit = "ms".to_string();

        let config = build_run_config(&cli, &file_config).unwrap();
        assert_eq!(config.measurement_iterations, 77);
        assert_eq!(config.time_unit, TimeUnit::Millis);
    }

    #[test]
    fn test_deadline_flag_parsed() {
        let cli = parse(&["--deadline", "10s"]);
        let config = build_run_config(&cli, &PaceConfig::default()).unwrap();
        assert_eq!(config.deadline, Some(std::time::Duration::from_secs(10)));
    }

    #[test]
    fn test_mode_and_unit_flags() {
        let cli = parse(&["--mode", "throughput", "--time-unit", "ms"]);
        let config = build_run_config(&cli, &PaceConfig::default()).unwrap();
        assert_eq!(config.mode, Mode::Throughput);
        assert_eq!(config.time_unit, TimeUnit::Millis);
    }

    #[test]
    fn test_bad_time_unit_rejected() {
        let cli = parse(&["--time-unit", "fortnights"]);
        assert!(build_run_config(&cli, &PaceConfig::default()).is_err());
    }
}
