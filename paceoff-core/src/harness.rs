//! Benchmark Harness
//!
//! Executes registered variants under identical warmup/measurement
//! conditions and produces directly comparable statistics.
//!
//! ## Execution protocol
//!
//! ```text
//! Variant (registration order)
//!      │
//!      ▼  per fork (fresh execution context)
//! ┌─────────────────────────────────────┐
//! │ worker 0..threads (std::thread)     │  warmup (untimed)
//! │   each worker times its own         │  → measurement (timed)
//! │   invocations independently         │  → local Measurement buffer
//! └──────────────────┬──────────────────┘
//!                    ▼
//!            merge + aggregate → VariantResult
//! ```
//!
//! No two variants' measurement phases overlap in time. Within a variant's
//! phase, workers run concurrently but share no mutable state inside timed
//! sections; each worker owns its local timing buffer. A panic in any worker
//! marks the variant failed without aborting sibling variants.

use crate::config::{Mode, RunConfig};
use crate::error::HarnessError;
use crate::measure::Timer;
use crate::result::{
    Measurement, RunReport, RunStatus, VariantFailure, VariantMetrics, VariantResult,
    VariantStatus,
};
use crate::variant::Variant;
use fxhash::FxHashSet;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

/// Progress events emitted while a run executes, so a caller can drive a
/// progress display without the harness doing any formatting itself.
#[derive(Debug, Clone, Copy)]
pub enum RunEvent<'a> {
    /// A variant's warmup phase is about to begin.
    VariantStarted {
        /// Variant name.
        name: &'a str,
        /// 0-based position in registration order.
        index: usize,
        /// Total number of registered variants.
        total: usize,
    },
    /// A variant finished (measured, failed, or skipped).
    VariantFinished {
        /// Variant name.
        name: &'a str,
        /// Final status of the variant.
        status: VariantStatus,
    },
}

/// Raw outcome of executing one variant, before aggregation.
struct VariantRun {
    name: String,
    measurements: Vec<Measurement>,
    failure: Option<String>,
    skipped: bool,
    truncated: bool,
}

/// The benchmark harness: a registry of variants plus a run configuration.
pub struct Harness {
    variants: Vec<Variant>,
    names: FxHashSet<String>,
    config: RunConfig,
}

impl Harness {
    /// Create an empty harness with the default configuration.
    pub fn new() -> Self {
        Self {
            variants: Vec::new(),
            names: FxHashSet::default(),
            config: RunConfig::default(),
        }
    }

    /// Register a named variant. Fails if the name is already taken; the
    /// existing variant is never overwritten.
    pub fn register<T, F>(&mut self, name: impl Into<String>, op: F) -> Result<(), HarnessError>
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.register_variant(Variant::new(name, op))
    }

    /// Register a pre-built variant.
    pub fn register_variant(&mut self, variant: Variant) -> Result<(), HarnessError> {
        if !self.names.insert(variant.name().to_string()) {
            return Err(HarnessError::DuplicateVariant {
                name: variant.name().to_string(),
            });
        }
        self.variants.push(variant);
        Ok(())
    }

    /// Validate and install a run configuration.
    pub fn configure(&mut self, config: RunConfig) -> Result<(), HarnessError> {
        config
            .validate()
            .map_err(|violations| HarnessError::InvalidConfig { violations })?;
        self.config = config;
        Ok(())
    }

    /// The currently installed configuration.
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Registered variant names, in registration order.
    pub fn variant_names(&self) -> Vec<&str> {
        self.variants.iter().map(|v| v.name()).collect()
    }

    /// Drop registered variants whose name does not satisfy the predicate.
    /// Registration order of the survivors is preserved.
    pub fn retain_variants(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.variants.retain(|v| keep(v.name()));
        let remaining: FxHashSet<String> = self
            .variants
            .iter()
            .map(|v| v.name().to_string())
            .collect();
        self.names = remaining;
    }

    /// Execute all registered variants and return one result per variant, in
    /// registration order.
    pub fn run(&mut self) -> RunReport {
        self.run_with_observer(|_| {})
    }

    /// Execute like [`run`](Self::run), emitting [`RunEvent`]s to the
    /// observer as variants start and finish.
    pub fn run_with_observer(&mut self, mut observer: impl FnMut(RunEvent<'_>)) -> RunReport {
        let deadline = self.config.deadline.map(|d| Instant::now() + d);
        let total = self.variants.len();

        let mut runs: Vec<VariantRun> = Vec::with_capacity(total);
        for (index, variant) in self.variants.iter().enumerate() {
            // Deadline already passed: stop launching variants entirely.
            if deadline.is_some_and(|d| Instant::now() >= d) {
                runs.push(VariantRun {
                    name: variant.name().to_string(),
                    measurements: Vec::new(),
                    failure: None,
                    skipped: true,
                    truncated: false,
                });
                observer(RunEvent::VariantFinished {
                    name: variant.name(),
                    status: VariantStatus::Skipped,
                });
                continue;
            }

            observer(RunEvent::VariantStarted {
                name: variant.name(),
                index,
                total,
            });
            let run = self.run_variant(variant, deadline);
            observer(RunEvent::VariantFinished {
                name: variant.name(),
                status: if run.failure.is_some() {
                    VariantStatus::Failed
                } else {
                    VariantStatus::Passed
                },
            });
            runs.push(run);
        }

        self.aggregate(runs)
    }

    /// Run every fork of one variant, merging measurements across forks.
    fn run_variant(&self, variant: &Variant, deadline: Option<Instant>) -> VariantRun {
        let cfg = &self.config;
        let mut merged: Vec<Measurement> =
            Vec::with_capacity(cfg.expected_sample_count() as usize);
        let mut failure: Option<String> = None;
        let mut truncated = false;

        for fork in 0..cfg.forks {
            if deadline.is_some_and(|d| Instant::now() >= d) {
                truncated = true;
                break;
            }

            let outcome = run_fork(variant, cfg, fork, deadline);
            match outcome {
                ForkOutcome::Measured {
                    measurements,
                    hit_deadline,
                } => {
                    merged.extend(measurements);
                    if hit_deadline {
                        truncated = true;
                        break;
                    }
                }
                ForkOutcome::Panicked { message } => {
                    failure = Some(message);
                    break;
                }
            }
        }

        VariantRun {
            name: variant.name().to_string(),
            measurements: merged,
            failure,
            skipped: false,
            truncated,
        }
    }

    /// Aggregate raw runs into final results. Per-variant summary
    /// computation is independent, so it parallelizes cleanly.
    fn aggregate(&self, runs: Vec<VariantRun>) -> RunReport {
        let unit = self.config.time_unit;
        let mode = self.config.mode;
        let incomplete = runs.iter().any(|r| r.skipped || r.truncated);

        let results: Vec<VariantResult> = runs
            .par_iter()
            .map(|run| {
                let status = if run.skipped {
                    VariantStatus::Skipped
                } else if run.failure.is_some() {
                    VariantStatus::Failed
                } else {
                    VariantStatus::Passed
                };

                let samples: Vec<f64> = run
                    .measurements
                    .iter()
                    .map(|m| m.duration_nanos as f64)
                    .collect();

                let metrics = if samples.is_empty() {
                    None
                } else {
                    let summary = paceoff_stats::compute_summary(&samples);
                    Some(VariantMetrics::from_summary(&summary, unit, mode))
                };

                let raw_samples_ns = match mode {
                    Mode::SampleTime if !samples.is_empty() => Some(samples),
                    _ => None,
                };

                VariantResult {
                    name: run.name.clone(),
                    status,
                    metrics,
                    failure: run.failure.as_ref().map(|message| VariantFailure {
                        variant: run.name.clone(),
                        message: message.clone(),
                    }),
                    raw_samples_ns,
                }
            })
            .collect();

        RunReport {
            status: if incomplete {
                RunStatus::Incomplete
            } else {
                RunStatus::Complete
            },
            results,
        }
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

/// What one fork produced.
enum ForkOutcome {
    Measured {
        measurements: Vec<Measurement>,
        hit_deadline: bool,
    },
    Panicked {
        message: String,
    },
}

/// One isolated execution context: fresh worker threads, fresh buffers,
/// warmup repeated from scratch.
fn run_fork(
    variant: &Variant,
    cfg: &RunConfig,
    fork: u32,
    deadline: Option<Instant>,
) -> ForkOutcome {
    // Set when any worker panics or hits the deadline, so siblings stop
    // launching iterations. Checked between invocations only, never inside a
    // timed section.
    let stop = AtomicBool::new(false);
    let hit_deadline = AtomicBool::new(false);

    let worker_results: Vec<Result<Vec<Measurement>, String>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..cfg.threads)
            .map(|thread| {
                let op = variant.op();
                let stop = &stop;
                let hit_deadline = &hit_deadline;
                scope.spawn(move || {
                    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                        let mut buf: Vec<Measurement> =
                            Vec::with_capacity(cfg.measurement_iterations as usize);

                        // Warmup phase: untimed, discarded.
                        for _ in 0..cfg.warmup_iterations {
                            if stop.load(Ordering::Relaxed) {
                                return buf;
                            }
                            if deadline.is_some_and(|d| Instant::now() >= d) {
                                hit_deadline.store(true, Ordering::Relaxed);
                                stop.store(true, Ordering::Relaxed);
                                return buf;
                            }
                            op();
                        }

                        // Measurement phase: each worker times its own
                        // invocations independently.
                        for iteration in 0..cfg.measurement_iterations {
                            if stop.load(Ordering::Relaxed) {
                                return buf;
                            }
                            if deadline.is_some_and(|d| Instant::now() >= d) {
                                hit_deadline.store(true, Ordering::Relaxed);
                                stop.store(true, Ordering::Relaxed);
                                return buf;
                            }

                            let timer = Timer::start();
                            op();
                            let duration_nanos = timer.stop();

                            buf.push(Measurement {
                                fork,
                                thread,
                                iteration,
                                duration_nanos,
                            });
                        }

                        buf
                    }));

                    match outcome {
                        Ok(buf) => Ok(buf),
                        Err(panic) => {
                            stop.store(true, Ordering::Relaxed);
                            Err(panic_message(panic))
                        }
                    }
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|h| match h.join() {
                Ok(result) => result,
                Err(panic) => Err(panic_message(panic)),
            })
            .collect()
    });

    let mut measurements = Vec::new();
    let mut failure: Option<String> = None;
    for result in worker_results {
        match result {
            Ok(buf) => measurements.extend(buf),
            Err(message) => failure = Some(failure.unwrap_or(message)),
        }
    }

    match failure {
        Some(message) => ForkOutcome::Panicked { message },
        None => ForkOutcome::Measured {
            measurements,
            hit_deadline: hit_deadline.load(Ordering::Relaxed),
        },
    }
}

/// Render a caught panic payload as text.
fn panic_message(panic: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimeUnit;
    use std::sync::Arc;
    use std::sync::atomic::AtomicU64;
    use std::time::Duration;

    fn quick_config(warmup: u64, iters: u64, threads: u32, forks: u32) -> RunConfig {
        RunConfig {
            warmup_iterations: warmup,
            measurement_iterations: iters,
            threads,
            forks,
            ..Default::default()
        }
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut harness = Harness::new();
        harness.register("clone", || 1u64).unwrap();
        let err = harness.register("clone", || 2u64).unwrap_err();
        assert!(matches!(err, HarnessError::DuplicateVariant { ref name } if name == "clone"));
        // The first registration survives.
        assert_eq!(harness.variant_names(), vec!["clone"]);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut harness = Harness::new();
        let err = harness.configure(quick_config(0, 0, 0, 1)).unwrap_err();
        match err {
            HarnessError::InvalidConfig { violations } => {
                assert_eq!(violations.len(), 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_results_in_registration_order() {
        let mut harness = Harness::new();
        harness.register("zulu", || 1u64).unwrap();
        harness.register("alpha", || 2u64).unwrap();
        harness.register("mike", || 3u64).unwrap();
        harness.configure(quick_config(0, 3, 1, 1)).unwrap();

        let report = harness.run();
        let names: Vec<&str> = report.results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["zulu", "alpha", "mike"]);
        assert_eq!(report.status, RunStatus::Complete);
    }

    #[test]
    fn test_measurement_count() {
        let mut harness = Harness::new();
        harness.register("sum", || (0..100u64).sum::<u64>()).unwrap();
        harness.configure(quick_config(2, 10, 3, 2)).unwrap();

        let report = harness.run();
        let metrics = report.results[0].metrics.as_ref().unwrap();
        assert_eq!(metrics.sample_count, 10 * 3 * 2);
    }

    #[test]
    fn test_single_iteration_single_thread() {
        let mut harness = Harness::new();
        harness.register("one", || 42u64).unwrap();
        harness.configure(quick_config(0, 1, 1, 1)).unwrap();

        let report = harness.run();
        let metrics = report.results[0].metrics.as_ref().unwrap();
        assert_eq!(metrics.sample_count, 1);
    }

    #[test]
    fn test_warmup_invocations_not_measured() {
        let calls = Arc::new(AtomicU64::new(0));
        let c = Arc::clone(&calls);

        let mut harness = Harness::new();
        harness
            .register("warm", move || c.fetch_add(1, Ordering::Relaxed))
            .unwrap();
        harness.configure(quick_config(5, 10, 1, 1)).unwrap();

        let report = harness.run();
        // 5 warmup + 10 measured invocations happened...
        assert_eq!(calls.load(Ordering::Relaxed), 15);
        // ...but only 10 measurements were recorded.
        let metrics = report.results[0].metrics.as_ref().unwrap();
        assert_eq!(metrics.sample_count, 10);
    }

    #[test]
    fn test_warmup_excluded_from_mean() {
        // Artificially slow only on the first invocation: with warmup >= 1
        // the reported mean must reflect only post-warmup cost.
        let first = Arc::new(AtomicBool::new(true));
        let f = Arc::clone(&first);

        let mut harness = Harness::new();
        harness
            .register("cold-start", move || {
                if f.swap(false, Ordering::Relaxed) {
                    std::thread::sleep(Duration::from_millis(50));
                }
            })
            .unwrap();
        harness.configure(quick_config(1, 10, 1, 1)).unwrap();

        let report = harness.run();
        let metrics = report.results[0].metrics.as_ref().unwrap();
        // Mean far below the 50ms cold-start cost.
        assert!(metrics.mean_ns < 10_000_000.0, "mean {} ns", metrics.mean_ns);
    }

    #[test]
    fn test_failing_variant_isolated() {
        let mut harness = Harness::new();
        harness
            .register("broken", || -> u64 { panic!("variant exploded") })
            .unwrap();
        harness.register("healthy", || 7u64).unwrap();
        harness.configure(quick_config(0, 5, 1, 1)).unwrap();

        let report = harness.run();
        assert_eq!(report.results.len(), 2);

        let broken = &report.results[0];
        assert_eq!(broken.status, VariantStatus::Failed);
        let failure = broken.failure.as_ref().unwrap();
        assert_eq!(failure.variant, "broken");
        assert!(failure.message.contains("variant exploded"));

        let healthy = &report.results[1];
        assert_eq!(healthy.status, VariantStatus::Passed);
        assert_eq!(healthy.metrics.as_ref().unwrap().sample_count, 5);
        // A failed variant does not make the run incomplete.
        assert_eq!(report.status, RunStatus::Complete);
    }

    #[test]
    fn test_fast_vs_slow_ordering() {
        let mut harness = Harness::new();
        harness.register("fast", || 1u64).unwrap();
        harness
            .register("slow", || {
                // Busy-wait ~10ms to keep the timing deterministic.
                let t = Instant::now();
                while t.elapsed() < Duration::from_millis(10) {
                    std::hint::spin_loop();
                }
            })
            .unwrap();
        harness.configure(quick_config(0, 10, 1, 1)).unwrap();

        let report = harness.run();
        let fast = report.results[0].metrics.as_ref().unwrap();
        let slow = report.results[1].metrics.as_ref().unwrap();

        assert!(slow.mean_ns >= 9_000_000.0, "slow mean {} ns", slow.mean_ns);
        assert!(fast.mean_ns < 1_000_000.0, "fast mean {} ns", fast.mean_ns);
    }

    #[test]
    fn test_deadline_marks_run_incomplete() {
        let mut harness = Harness::new();
        harness
            .register("slow", || std::thread::sleep(Duration::from_millis(5)))
            .unwrap();
        harness.register("never-started", || 1u64).unwrap();
        harness
            .configure(RunConfig {
                warmup_iterations: 0,
                measurement_iterations: 1_000,
                deadline: Some(Duration::from_millis(20)),
                ..Default::default()
            })
            .unwrap();

        let report = harness.run();
        assert_eq!(report.status, RunStatus::Incomplete);

        // The first variant kept whatever it managed to collect.
        let slow = &report.results[0];
        assert_eq!(slow.status, VariantStatus::Passed);
        let collected = slow.metrics.as_ref().unwrap().sample_count;
        assert!(collected >= 1 && collected < 1_000);

        // The second never got a chance.
        assert_eq!(report.results[1].status, VariantStatus::Skipped);
        assert!(report.results[1].metrics.is_none());
    }

    #[test]
    fn test_sample_time_retains_raw_samples() {
        let mut harness = Harness::new();
        harness.register("sum", || (0..50u64).sum::<u64>()).unwrap();
        harness
            .configure(RunConfig {
                warmup_iterations: 0,
                measurement_iterations: 8,
                mode: Mode::SampleTime,
                ..Default::default()
            })
            .unwrap();

        let report = harness.run();
        let raw = report.results[0].raw_samples_ns.as_ref().unwrap();
        assert_eq!(raw.len(), 8);
    }

    #[test]
    fn test_observer_sees_every_variant() {
        let mut harness = Harness::new();
        harness.register("a", || 1u64).unwrap();
        harness.register("b", || 2u64).unwrap();
        harness.configure(quick_config(0, 1, 1, 1)).unwrap();

        let mut started = Vec::new();
        let mut finished = Vec::new();
        harness.run_with_observer(|event| match event {
            RunEvent::VariantStarted { name, .. } => started.push(name.to_string()),
            RunEvent::VariantFinished { name, .. } => finished.push(name.to_string()),
        });

        assert_eq!(started, vec!["a", "b"]);
        assert_eq!(finished, vec!["a", "b"]);
    }

    #[test]
    fn test_retain_variants() {
        let mut harness = Harness::new();
        harness.register("json", || 1u64).unwrap();
        harness.register("clone", || 2u64).unwrap();
        harness.retain_variants(|name| name == "clone");
        assert_eq!(harness.variant_names(), vec!["clone"]);
        // The dropped name is registrable again.
        harness.register("json", || 3u64).unwrap();
    }

    #[test]
    fn test_concurrent_workers_measure_independently() {
        let mut harness = Harness::new();
        harness
            .register("spin", || {
                let t = Instant::now();
                while t.elapsed() < Duration::from_micros(200) {
                    std::hint::spin_loop();
                }
            })
            .unwrap();
        harness.configure(quick_config(1, 20, 4, 1)).unwrap();

        let report = harness.run();
        let metrics = report.results[0].metrics.as_ref().unwrap();
        assert_eq!(metrics.sample_count, 80);
        assert!(metrics.min_ns >= 200_000.0 * 0.9);
    }

    #[test]
    fn test_average_time_unit_conversion() {
        let mut harness = Harness::new();
        harness
            .register("sleepy", || std::thread::sleep(Duration::from_millis(2)))
            .unwrap();
        harness
            .configure(RunConfig {
                warmup_iterations: 0,
                measurement_iterations: 5,
                time_unit: TimeUnit::Millis,
                ..Default::default()
            })
            .unwrap();

        let report = harness.run();
        let metrics = report.results[0].metrics.as_ref().unwrap();
        assert_eq!(metrics.score_unit, "ms/op");
        assert!(metrics.score >= 2.0 && metrics.score < 50.0);
    }
}
