//! Configuration loading from paceoff.toml
//!
//! Harness defaults can be specified in a `paceoff.toml` file in the project
//! root. The file is discovered by walking up from the current directory;
//! CLI flags override anything it sets.

use paceoff_core::{Mode, RunConfig, TimeUnit};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// PaceOff file configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PaceConfig {
    /// Run protocol defaults.
    #[serde(default)]
    pub run: RunSection,
    /// Output defaults.
    #[serde(default)]
    pub output: OutputSection,
}

/// `[run]` section: defaults for the measurement protocol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSection {
    /// Untimed iterations per worker before measurement.
    #[serde(default = "default_warmup")]
    pub warmup_iterations: u64,
    /// Timed iterations per worker.
    #[serde(default = "default_iterations")]
    pub measurement_iterations: u64,
    /// Concurrent workers per variant.
    #[serde(default = "default_threads")]
    pub threads: u32,
    /// Independent execution contexts per variant.
    #[serde(default = "default_forks")]
    pub forks: u32,
    /// Reporting time unit: "ns", "us", "ms", or "s".
    #[serde(default = "default_time_unit")]
    pub time_unit: String,
    /// Aggregation mode: "average-time", "throughput", or "sample-time".
    #[serde(default = "default_mode")]
    pub mode: String,
    /// Wall-clock budget for the whole run (e.g. "30s", "2m").
    #[serde(default)]
    pub deadline: Option<String>,
}

impl Default for RunSection {
    fn default() -> Self {
        Self {
            warmup_iterations: default_warmup(),
            measurement_iterations: default_iterations(),
            threads: default_threads(),
            forks: default_forks(),
            time_unit: default_time_unit(),
            mode: default_mode(),
            deadline: None,
        }
    }
}

fn default_warmup() -> u64 {
    5
}
fn default_iterations() -> u64 {
    50
}
fn default_threads() -> u32 {
    1
}
fn default_forks() -> u32 {
    1
}
fn default_time_unit() -> String {
    "us".to_string()
}
fn default_mode() -> String {
    "average-time".to_string()
}

/// `[output]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSection {
    /// Default output format: "human", "json", "csv".
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

fn default_format() -> String {
    "human".to_string()
}

impl PaceConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from the
    /// current directory.
    pub fn discover() -> Option<Self> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join("paceoff.toml");
            if config_path.exists() {
                return Self::load(&config_path).ok();
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Build a `RunConfig` from the `[run]` section.
    pub fn to_run_config(&self) -> anyhow::Result<RunConfig> {
        let time_unit: TimeUnit = self
            .run
            .time_unit
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e))?;
        let mode: Mode = self.run.mode.parse().map_err(|e: String| anyhow::anyhow!(e))?;
        let deadline = self
            .run
            .deadline
            .as_deref()
            .map(parse_duration)
            .transpose()?;

        Ok(RunConfig {
            warmup_iterations: self.run.warmup_iterations,
            measurement_iterations: self.run.measurement_iterations,
            threads: self.run.threads,
            forks: self.run.forks,
            time_unit,
            mode,
            deadline,
        })
    }
}

/// Parse a duration string (e.g. "3s", "500ms", "2m").
pub fn parse_duration(s: &str) -> anyhow::Result<Duration> {
    let s = s.trim();
    if s.is_empty() {
        return Err(anyhow::anyhow!("Empty duration string"));
    }

    // Find where the number ends and unit begins
    let (num_part, unit_part) = s
        .char_indices()
        .find(|(_, c)| c.is_alphabetic())
        .map(|(i, _)| s.split_at(i))
        .unwrap_or((s, "s"));

    let value: f64 = num_part
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid duration number: {}", num_part))?;

    let multiplier_ns: u64 = match unit_part.to_lowercase().as_str() {
        "ns" => 1,
        "us" => 1_000,
        "ms" => 1_000_000,
        "s" | "" => 1_000_000_000,
        "m" | "min" => 60_000_000_000,
        _ => return Err(anyhow::anyhow!("Unknown duration unit: {}", unit_part)),
    };

    Ok(Duration::from_nanos((value * multiplier_ns as f64) as u64))
}
