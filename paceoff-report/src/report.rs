//! Report Data Structures
//!
//! The report is plain data with serde derives; rendering lives in the
//! sibling modules. The harness hands over a `RunReport` and the reporter
//! decorates it with metadata, a comparison table, and summary counts.

use chrono::{DateTime, Utc};
use paceoff_core::{RunConfig, RunReport, RunStatus, VariantResult, VariantStatus};
use serde::{Deserialize, Serialize};

/// Complete comparison report for one harness run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Run metadata: timestamp, configuration, host facts.
    pub meta: ReportMeta,
    /// Overall run status (complete / incomplete).
    pub status: RunStatus,
    /// Per-variant results in registration order.
    pub results: Vec<VariantResult>,
    /// Speedup table against the baseline variant, when computable.
    pub comparison: Option<Comparison>,
    /// Aggregate counts.
    pub summary: ReportSummary,
}

/// Report metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    /// Report schema version.
    pub schema_version: u32,
    /// Harness version that produced the report.
    pub version: String,
    /// When the run finished.
    pub timestamp: DateTime<Utc>,
    /// The configuration the run executed under.
    pub config: RunConfig,
    /// Host facts.
    pub system: SystemInfo,
}

/// Host facts captured in report metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    /// Operating system family.
    pub os: String,
    /// Target architecture.
    pub arch: String,
    /// Logical CPU count.
    pub cpu_cores: u32,
}

impl SystemInfo {
    /// Capture facts about the current host.
    pub fn capture() -> Self {
        Self {
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            cpu_cores: std::thread::available_parallelism()
                .map(|p| p.get() as u32)
                .unwrap_or(1),
        }
    }
}

/// Speedup table of all measured variants against a baseline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comparison {
    /// Baseline variant name (the first registered, measured variant).
    pub baseline: String,
    /// One entry per measured variant.
    pub entries: Vec<ComparisonEntry>,
}

/// Single entry in the comparison table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonEntry {
    /// Variant name.
    pub variant: String,
    /// Mean time per invocation in nanoseconds.
    pub mean_ns: f64,
    /// Speedup vs baseline (1.0 = same, >1.0 = faster, <1.0 = slower).
    pub speedup: f64,
    /// Whether this is the baseline.
    pub is_baseline: bool,
}

/// Aggregate counts over the run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Total registered variants.
    pub total_variants: usize,
    /// Variants measured successfully.
    pub passed: usize,
    /// Variants that panicked.
    pub failed: usize,
    /// Variants never started (deadline).
    pub skipped: usize,
}

/// Assemble a full report from the harness output.
pub fn build_report(run: RunReport, config: RunConfig) -> Report {
    let summary = summarize(&run.results);
    let comparison = build_comparison(&run.results);

    Report {
        meta: ReportMeta {
            schema_version: 1,
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
            config,
            system: SystemInfo::capture(),
        },
        status: run.status,
        results: run.results,
        comparison,
        summary,
    }
}

fn summarize(results: &[VariantResult]) -> ReportSummary {
    let mut summary = ReportSummary {
        total_variants: results.len(),
        ..Default::default()
    };
    for result in results {
        match result.status {
            VariantStatus::Passed => summary.passed += 1,
            VariantStatus::Failed => summary.failed += 1,
            VariantStatus::Skipped => summary.skipped += 1,
        }
    }
    summary
}

/// Build the speedup table. The baseline is the first registered variant
/// that produced metrics; variants without metrics are left out.
fn build_comparison(results: &[VariantResult]) -> Option<Comparison> {
    let measured: Vec<(&str, f64)> = results
        .iter()
        .filter_map(|r| r.metrics.as_ref().map(|m| (r.name.as_str(), m.mean_ns)))
        .collect();

    let (baseline_name, baseline_mean) = *measured.first()?;
    if measured.len() < 2 {
        return None;
    }

    let entries = measured
        .iter()
        .map(|&(variant, mean_ns)| ComparisonEntry {
            variant: variant.to_string(),
            mean_ns,
            speedup: if mean_ns > 0.0 {
                baseline_mean / mean_ns
            } else {
                0.0
            },
            is_baseline: variant == baseline_name,
        })
        .collect();

    Some(Comparison {
        baseline: baseline_name.to_string(),
        entries,
    })
}
