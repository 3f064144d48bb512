#![warn(missing_docs)]
//! PaceOff Statistical Engine
//!
//! Provides the statistics behind variant comparison:
//! - Percentile calculation preserving tail latency signals
//! - Summary statistics (mean, stddev, min/max, percentiles)

mod percentiles;
mod summary;

pub use percentiles::{Percentiles, compute_percentile, compute_percentiles};
pub use summary::{Summary, compute_summary};
