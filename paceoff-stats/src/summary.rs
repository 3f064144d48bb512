//! Summary Statistics
//!
//! All statistics are computed over the raw samples, with no outlier
//! cleaning: the average-time score is defined as the plain mean per
//! invocation, and percentiles carry the tail signal.

use crate::percentiles::compute_percentile;
use serde::{Deserialize, Serialize};

/// Summary statistics over one variant's raw samples.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    /// Arithmetic mean.
    pub mean: f64,
    /// Median.
    pub median: f64,
    /// Sample standard deviation (n-1 denominator).
    pub std_dev: f64,
    /// Smallest sample.
    pub min: f64,
    /// Largest sample.
    pub max: f64,
    /// 50th percentile.
    pub p50: f64,
    /// 90th percentile.
    pub p90: f64,
    /// 95th percentile.
    pub p95: f64,
    /// 99th percentile.
    pub p99: f64,
    /// 99.9th percentile.
    pub p999: f64,
    /// Number of samples.
    pub sample_count: usize,
}

/// Compute summary statistics for a set of samples.
pub fn compute_summary(samples: &[f64]) -> Summary {
    if samples.is_empty() {
        return Summary {
            mean: 0.0,
            median: 0.0,
            std_dev: 0.0,
            min: 0.0,
            max: 0.0,
            p50: 0.0,
            p90: 0.0,
            p95: 0.0,
            p99: 0.0,
            p999: 0.0,
            sample_count: 0,
        };
    }

    let mean = samples.iter().sum::<f64>() / samples.len() as f64;

    let std_dev = if samples.len() < 2 {
        0.0
    } else {
        let variance =
            samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (samples.len() - 1) as f64;
        variance.sqrt()
    };

    let min = samples
        .iter()
        .cloned()
        .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .unwrap_or(0.0);
    let max = samples
        .iter()
        .cloned()
        .max_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .unwrap_or(0.0);

    let p50 = compute_percentile(samples, 50.0);
    let p90 = compute_percentile(samples, 90.0);
    let p95 = compute_percentile(samples, 95.0);
    let p99 = compute_percentile(samples, 99.0);
    let p999 = compute_percentile(samples, 99.9);

    Summary {
        mean,
        median: p50,
        std_dev,
        min,
        max,
        p50,
        p90,
        p95,
        p99,
        p999,
        sample_count: samples.len(),
    }
}

impl Summary {
    /// Coefficient of variation as a percentage (relative stddev).
    pub fn coefficient_of_variation(&self) -> f64 {
        if self.mean == 0.0 {
            0.0
        } else {
            (self.std_dev / self.mean) * 100.0
        }
    }

    /// Check if the distribution appears stable (low CV).
    pub fn is_stable(&self, cv_threshold: f64) -> bool {
        self.coefficient_of_variation() < cv_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_summary() {
        let samples = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let summary = compute_summary(&samples);

        assert!((summary.mean - 3.0).abs() < 0.01);
        assert!((summary.median - 3.0).abs() < 0.01);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 5.0);
        assert_eq!(summary.sample_count, 5);
    }

    #[test]
    fn test_std_dev() {
        let samples = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let summary = compute_summary(&samples);
        // Sample stddev of this classic set is ~2.138
        assert!((summary.std_dev - 2.138).abs() < 0.01);
    }

    #[test]
    fn test_mean_includes_outliers() {
        // The average-time score is a plain mean: outliers count.
        let samples = vec![1.0, 2.0, 3.0, 4.0, 5.0, 100.0];
        let summary = compute_summary(&samples);
        assert!((summary.mean - (115.0 / 6.0)).abs() < 0.01);
        assert_eq!(summary.max, 100.0);
        assert!(summary.p99 > 50.0);
    }

    #[test]
    fn test_single_sample_has_zero_std_dev() {
        let summary = compute_summary(&[42.0]);
        assert!((summary.std_dev - 0.0).abs() < f64::EPSILON);
        assert_eq!(summary.sample_count, 1);
    }

    #[test]
    fn test_coefficient_of_variation() {
        let samples = vec![100.0, 100.0, 100.0, 100.0, 100.0];
        let summary = compute_summary(&samples);
        assert!((summary.coefficient_of_variation() - 0.0).abs() < f64::EPSILON);
        assert!(summary.is_stable(1.0));
    }

    #[test]
    fn test_empty_samples() {
        let samples: Vec<f64> = Vec::new();
        let summary = compute_summary(&samples);

        assert_eq!(summary.sample_count, 0);
        assert!((summary.mean - 0.0).abs() < f64::EPSILON);
    }
}
