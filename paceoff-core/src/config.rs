//! Run Configuration
//!
//! A `RunConfig` describes the measurement protocol applied identically to
//! every registered variant: warmup and measurement iteration counts, worker
//! thread count, fork count, the reporting time unit, and the aggregation
//! mode. Validation collects every offending field rather than stopping at
//! the first, so a caller can fix the whole configuration in one pass.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Time unit used when reporting scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    /// Nanoseconds
    #[default]
    Nanos,
    /// Microseconds
    Micros,
    /// Milliseconds
    Millis,
    /// Seconds
    Secs,
}

impl TimeUnit {
    /// Nanoseconds per one of this unit.
    pub fn nanos_per_unit(self) -> f64 {
        match self {
            TimeUnit::Nanos => 1.0,
            TimeUnit::Micros => 1e3,
            TimeUnit::Millis => 1e6,
            TimeUnit::Secs => 1e9,
        }
    }

    /// Short suffix for display ("ns", "us", "ms", "s").
    pub fn suffix(self) -> &'static str {
        match self {
            TimeUnit::Nanos => "ns",
            TimeUnit::Micros => "us",
            TimeUnit::Millis => "ms",
            TimeUnit::Secs => "s",
        }
    }
}

impl std::str::FromStr for TimeUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ns" | "nanos" | "nanoseconds" => Ok(TimeUnit::Nanos),
            "us" | "micros" | "microseconds" => Ok(TimeUnit::Micros),
            "ms" | "millis" | "milliseconds" => Ok(TimeUnit::Millis),
            "s" | "sec" | "secs" | "seconds" => Ok(TimeUnit::Secs),
            other => Err(format!("Unknown time unit: {}", other)),
        }
    }
}

/// The statistic reported as each variant's primary score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Mean duration per invocation, in the configured time unit.
    #[default]
    AverageTime,
    /// Invocations per one configured time unit.
    Throughput,
    /// Full distribution: raw samples are retained on the result.
    SampleTime,
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "avg" | "average" | "average-time" | "avgt" => Ok(Mode::AverageTime),
            "thrpt" | "throughput" => Ok(Mode::Throughput),
            "sample" | "sample-time" => Ok(Mode::SampleTime),
            other => Err(format!("Unknown aggregation mode: {}", other)),
        }
    }
}

/// Configuration for a full harness run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Untimed iterations per worker before measurement starts.
    #[serde(default = "default_warmup_iterations")]
    pub warmup_iterations: u64,
    /// Timed iterations per worker. Must be at least 1.
    #[serde(default = "default_measurement_iterations")]
    pub measurement_iterations: u64,
    /// Independent execution contexts per variant. Must be at least 1.
    #[serde(default = "default_forks")]
    pub forks: u32,
    /// Concurrent workers per variant phase. Must be at least 1.
    #[serde(default = "default_threads")]
    pub threads: u32,
    /// Time unit for reported scores.
    #[serde(default)]
    pub time_unit: TimeUnit,
    /// Aggregation mode for reported scores.
    #[serde(default)]
    pub mode: Mode,
    /// Optional wall-clock budget for the whole run. Once exceeded, no new
    /// iterations are launched; in-flight invocations complete and the run is
    /// marked incomplete.
    #[serde(default)]
    pub deadline: Option<Duration>,
}

fn default_warmup_iterations() -> u64 {
    5
}
fn default_measurement_iterations() -> u64 {
    50
}
fn default_forks() -> u32 {
    1
}
fn default_threads() -> u32 {
    1
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            warmup_iterations: default_warmup_iterations(),
            measurement_iterations: default_measurement_iterations(),
            forks: default_forks(),
            threads: default_threads(),
            time_unit: TimeUnit::default(),
            mode: Mode::default(),
            deadline: None,
        }
    }
}

impl RunConfig {
    /// Validate all fields, returning every violation found.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut violations = Vec::new();

        if self.measurement_iterations == 0 {
            violations.push("measurement_iterations must be >= 1".to_string());
        }
        if self.threads == 0 {
            violations.push("threads must be >= 1".to_string());
        }
        if self.forks == 0 {
            violations.push("forks must be >= 1".to_string());
        }
        if let Some(deadline) = self.deadline {
            if deadline.is_zero() {
                violations.push("deadline must be non-zero when set".to_string());
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }

    /// Measurements expected per variant when nothing fails.
    pub fn expected_sample_count(&self) -> u64 {
        self.measurement_iterations * self.threads as u64 * self.forks as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(RunConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_measurement_iterations_rejected() {
        let config = RunConfig {
            measurement_iterations: 0,
            ..Default::default()
        };
        let violations = config.validate().unwrap_err();
        assert_eq!(violations.len(), 1);
        assert!(violations[0].contains("measurement_iterations"));
    }

    #[test]
    fn test_all_violations_reported() {
        let config = RunConfig {
            measurement_iterations: 0,
            threads: 0,
            forks: 0,
            ..Default::default()
        };
        let violations = config.validate().unwrap_err();
        assert_eq!(violations.len(), 3);
    }

    #[test]
    fn test_zero_warmup_is_valid() {
        let config = RunConfig {
            warmup_iterations: 0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_expected_sample_count() {
        let config = RunConfig {
            measurement_iterations: 10,
            threads: 3,
            forks: 2,
            ..Default::default()
        };
        assert_eq!(config.expected_sample_count(), 60);
    }

    #[test]
    fn test_time_unit_parsing() {
        assert_eq!("ns".parse::<TimeUnit>().unwrap(), TimeUnit::Nanos);
        assert_eq!("us".parse::<TimeUnit>().unwrap(), TimeUnit::Micros);
        assert_eq!("millis".parse::<TimeUnit>().unwrap(), TimeUnit::Millis);
        assert_eq!("seconds".parse::<TimeUnit>().unwrap(), TimeUnit::Secs);
        assert!("fortnights".parse::<TimeUnit>().is_err());
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("avgt".parse::<Mode>().unwrap(), Mode::AverageTime);
        assert_eq!("throughput".parse::<Mode>().unwrap(), Mode::Throughput);
        assert_eq!("sample".parse::<Mode>().unwrap(), Mode::SampleTime);
        assert!("median".parse::<Mode>().is_err());
    }

    #[test]
    fn test_time_unit_conversion() {
        assert!((TimeUnit::Micros.nanos_per_unit() - 1e3).abs() < f64::EPSILON);
        assert_eq!(TimeUnit::Millis.suffix(), "ms");
    }
}
