//! CSV Output
//!
//! One row per variant, spreadsheet-compatible. Fields that do not apply
//! (failed or skipped variants) are left empty.

use crate::report::Report;

/// Generate a CSV report with a header row.
pub fn generate_csv_report(report: &Report) -> String {
    let mut output = String::new();
    output.push_str(
        "variant,status,score,score_unit,mean_ns,std_dev_ns,min_ns,p50_ns,p90_ns,p99_ns,max_ns,samples\n",
    );

    for result in &report.results {
        let status = match result.status {
            paceoff_core::VariantStatus::Passed => "passed",
            paceoff_core::VariantStatus::Failed => "failed",
            paceoff_core::VariantStatus::Skipped => "skipped",
        };

        match &result.metrics {
            Some(m) => {
                output.push_str(&format!(
                    "{},{},{:.4},{},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{}\n",
                    escape_field(&result.name),
                    status,
                    m.score,
                    m.score_unit,
                    m.mean_ns,
                    m.std_dev_ns,
                    m.min_ns,
                    m.p50_ns,
                    m.p90_ns,
                    m.p99_ns,
                    m.max_ns,
                    m.sample_count
                ));
            }
            None => {
                output.push_str(&format!(
                    "{},{},,,,,,,,,,\n",
                    escape_field(&result.name),
                    status
                ));
            }
        }
    }

    output
}

/// Quote a field if it contains CSV metacharacters.
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
