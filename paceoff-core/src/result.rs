//! Run Results
//!
//! A `Measurement` is one timed invocation. A `VariantResult` is the
//! immutable per-variant aggregate handed back to the caller; results are
//! returned in registration order, one per registered variant, including
//! failed and skipped variants. The harness owns the raw measurements for
//! the duration of the run; ownership of the results transfers to the
//! caller when `run()` returns.

use crate::config::{Mode, TimeUnit};
use paceoff_stats::Summary;
use serde::{Deserialize, Serialize};

/// One timed invocation of one variant.
///
/// The variant name is the key under which measurements are collected, so it
/// is not repeated per record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measurement {
    /// Fork (execution context) index, 0-based.
    pub fork: u32,
    /// Worker thread index within the fork, 0-based.
    pub thread: u32,
    /// Iteration index within the worker's measurement phase, 0-based.
    pub iteration: u64,
    /// Elapsed wall-clock time for this invocation, in nanoseconds.
    pub duration_nanos: u64,
}

/// Execution status of one variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantStatus {
    /// Measured successfully.
    Passed,
    /// The variant panicked during warmup or measurement.
    Failed,
    /// Never started because the run deadline had already passed.
    Skipped,
}

/// A variant execution failure, captured rather than propagated so sibling
/// variants still run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantFailure {
    /// Name of the failed variant.
    pub variant: String,
    /// Panic payload rendered as text.
    pub message: String,
}

/// Aggregated statistics for one variant, in the configured unit and mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantMetrics {
    /// Primary score: mean time per invocation (AverageTime / SampleTime) or
    /// invocations per time unit (Throughput).
    pub score: f64,
    /// Unit label for the score, e.g. "us/op" or "ops/ms".
    pub score_unit: String,
    /// Mean duration per invocation in nanoseconds.
    pub mean_ns: f64,
    /// Sample standard deviation in nanoseconds.
    pub std_dev_ns: f64,
    /// Fastest invocation in nanoseconds.
    pub min_ns: f64,
    /// Slowest invocation in nanoseconds.
    pub max_ns: f64,
    /// Median in nanoseconds.
    pub p50_ns: f64,
    /// 90th percentile in nanoseconds.
    pub p90_ns: f64,
    /// 99th percentile in nanoseconds.
    pub p99_ns: f64,
    /// Number of measurements aggregated.
    pub sample_count: usize,
}

impl VariantMetrics {
    /// Build metrics from a statistical summary under the given unit/mode.
    pub fn from_summary(summary: &Summary, unit: TimeUnit, mode: Mode) -> Self {
        let per_unit = unit.nanos_per_unit();
        let (score, score_unit) = match mode {
            Mode::AverageTime | Mode::SampleTime => {
                (summary.mean / per_unit, format!("{}/op", unit.suffix()))
            }
            Mode::Throughput => {
                let ops = if summary.mean > 0.0 {
                    per_unit / summary.mean
                } else {
                    0.0
                };
                (ops, format!("ops/{}", unit.suffix()))
            }
        };

        Self {
            score,
            score_unit,
            mean_ns: summary.mean,
            std_dev_ns: summary.std_dev,
            min_ns: summary.min,
            max_ns: summary.max,
            p50_ns: summary.p50,
            p90_ns: summary.p90,
            p99_ns: summary.p99,
            sample_count: summary.sample_count,
        }
    }
}

/// Final, immutable result for one variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantResult {
    /// Variant name, unique within the run.
    pub name: String,
    /// Execution status.
    pub status: VariantStatus,
    /// Aggregated metrics; `None` when no measurement completed.
    pub metrics: Option<VariantMetrics>,
    /// Failure details when `status` is `Failed`.
    pub failure: Option<VariantFailure>,
    /// Raw measurement durations in nanoseconds; retained only in
    /// `Mode::SampleTime`.
    pub raw_samples_ns: Option<Vec<f64>>,
}

/// Whether the run observed its full measurement protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// Every variant ran its full protocol (failures included; a failed
    /// variant still counts as having been given its chance).
    Complete,
    /// The deadline expired: collected measurements are valid but partial.
    Incomplete,
}

/// Everything `run()` hands back: per-variant results in registration order
/// plus the overall run status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Overall status of the run.
    pub status: RunStatus,
    /// One entry per registered variant, in registration order.
    pub results: Vec<VariantResult>,
}
