#![warn(missing_docs)]
//! # PaceOff
//!
//! A micro-benchmark comparator: register named interchangeable
//! implementations ("variants") of the same operation, execute each under
//! identical warmup/measurement/concurrency conditions, and get directly
//! comparable latency and throughput statistics.
//!
//! - **Explicit registration**: variants are (name, closure) pairs; no
//!   discovery magic, no global state
//! - **Fair protocol**: per-worker warmup and measurement iteration counts,
//!   configurable thread and fork counts, applied identically to every variant
//! - **Failure isolation**: a panicking variant is reported as failed while
//!   its siblings are still measured
//! - **Deadline aware**: a run past its wall-clock budget keeps collected
//!   data and is flagged incomplete rather than discarded
//! - **Plain-data results**: reporting (human / JSON / CSV) is layered on
//!   top, never baked into the harness
//!
//! ## Quick Start
//!
//! ```
//! use paceoff::{Harness, RunConfig};
//!
//! # fn main() -> Result<(), paceoff::HarnessError> {
//! let mut harness = Harness::new();
//! harness.register("sum", || (0..1000u64).sum::<u64>())?;
//! harness.register("fold", || (0..1000u64).fold(0, |a, b| a + b))?;
//!
//! harness.configure(RunConfig {
//!     warmup_iterations: 5,
//!     measurement_iterations: 100,
//!     ..Default::default()
//! })?;
//!
//! let report = harness.run();
//! for result in &report.results {
//!     println!("{}: {:?}", result.name, result.metrics);
//! }
//! # Ok(())
//! # }
//! ```

// Re-export core types
pub use paceoff_core::{
    Harness, HarnessError, Measurement, Mode, RunConfig, RunEvent, RunReport, RunStatus, TimeUnit,
    Timer, Variant, VariantFailure, VariantMetrics, VariantResult, VariantStatus,
};

// Re-export stats
pub use paceoff_stats::{Summary, compute_percentile, compute_summary};

// Re-export report types
pub use paceoff_report::{
    OutputFormat, Report, build_report, format_human_output, generate_csv_report,
    generate_json_report,
};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Harness, Mode, RunConfig, RunStatus, TimeUnit, VariantStatus};
}

/// Run the PaceOff CLI harness.
///
/// Call this from your comparison binary's `main()` after registering your
/// variants:
/// ```ignore
/// fn main() -> anyhow::Result<()> {
///     let mut harness = paceoff::Harness::new();
///     harness.register("clone", || my_record().clone())?;
///     paceoff::run(harness)
/// }
/// ```
pub use paceoff_cli::run;
