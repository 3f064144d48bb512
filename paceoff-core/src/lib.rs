#![warn(missing_docs)]
//! PaceOff Core - Harness Engine
//!
//! This crate provides the execution environment for variant comparison:
//! - `Harness` for explicit variant registration and execution
//! - `RunConfig` with the warmup/measurement/threads/forks protocol
//! - Monotonic per-invocation timing
//! - Per-variant failure capture and run-level deadline handling

mod config;
mod error;
mod harness;
mod measure;
mod result;
mod variant;

pub use config::{Mode, RunConfig, TimeUnit};
pub use error::HarnessError;
pub use harness::{Harness, RunEvent};
pub use measure::Timer;
pub use result::{
    Measurement, RunReport, RunStatus, VariantFailure, VariantMetrics, VariantResult,
    VariantStatus,
};
pub use variant::Variant;
