//! Human-Readable Output
//!
//! Terminal-friendly rendering of a comparison report:
//! - Per-variant status lines with timing metrics
//! - Speedup table against the baseline, fastest first
//! - Summary counts and run status

use crate::report::Report;
use paceoff_core::{RunStatus, VariantStatus};

/// Format a report for human-readable terminal display.
pub fn format_human_output(report: &Report) -> String {
    let mut output = String::new();

    output.push('\n');
    output.push_str("PaceOff Results\n");
    output.push_str(&"=".repeat(60));
    output.push_str("\n\n");

    for result in &report.results {
        let status_icon = match result.status {
            VariantStatus::Passed => "✓",
            VariantStatus::Failed => "✗",
            VariantStatus::Skipped => "⊘",
        };

        output.push_str(&format!("  {} {}\n", status_icon, result.name));

        if let Some(metrics) = &result.metrics {
            output.push_str(&format!(
                "      score: {:.3} {}  ({} samples)\n",
                metrics.score, metrics.score_unit, metrics.sample_count
            ));
            output.push_str(&format!(
                "      mean: {:.2} ns  stddev: {:.2} ns\n",
                metrics.mean_ns, metrics.std_dev_ns
            ));
            output.push_str(&format!(
                "      min: {:.2} ns  p50: {:.2} ns  p90: {:.2} ns  p99: {:.2} ns  max: {:.2} ns\n",
                metrics.min_ns, metrics.p50_ns, metrics.p90_ns, metrics.p99_ns, metrics.max_ns
            ));
        }

        if let Some(failure) = &result.failure {
            output.push_str(&format!("      error: {}\n", failure.message));
        }

        output.push('\n');
    }

    if let Some(cmp) = &report.comparison {
        output.push_str("Comparison\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');

        let max_name_len = cmp
            .entries
            .iter()
            .map(|e| e.variant.len())
            .max()
            .unwrap_or(20);

        output.push_str(&format!(
            "  {:<width$}  {:>14}  {:>10}\n",
            "Variant",
            "mean (ns)",
            "Speedup",
            width = max_name_len
        ));
        output.push_str(&format!("  {}\n", "-".repeat(max_name_len + 28)));

        // Fastest first
        let mut sorted_entries: Vec<_> = cmp.entries.iter().collect();
        sorted_entries.sort_by(|a, b| {
            b.speedup
                .partial_cmp(&a.speedup)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        for entry in sorted_entries {
            let baseline_marker = if entry.is_baseline { " (baseline)" } else { "" };
            output.push_str(&format!(
                "  {:<width$}  {:>14.2}  {:>9.2}x{}\n",
                entry.variant,
                entry.mean_ns,
                entry.speedup,
                baseline_marker,
                width = max_name_len
            ));
        }
        output.push('\n');
    }

    output.push_str("Summary\n");
    output.push_str(&"-".repeat(60));
    output.push('\n');
    output.push_str(&format!(
        "  Total: {}  Passed: {}  Failed: {}  Skipped: {}\n",
        report.summary.total_variants,
        report.summary.passed,
        report.summary.failed,
        report.summary.skipped
    ));
    if report.status == RunStatus::Incomplete {
        output.push_str("  Run hit its deadline: results are valid but partial.\n");
    }

    output
}
