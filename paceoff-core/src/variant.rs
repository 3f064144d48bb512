//! Variant Definition
//!
//! A variant is one candidate implementation under comparison: a unique name
//! plus a zero-argument callable. The callable's return value is opaque to
//! the harness; it is routed through `std::hint::black_box` inside the timed
//! section so the optimizer cannot elide the work being measured.

use std::sync::Arc;

/// Type-erased variant operation, callable concurrently from worker threads.
pub(crate) type ErasedOp = Arc<dyn Fn() + Send + Sync + 'static>;

/// A named candidate implementation under comparison.
#[derive(Clone)]
pub struct Variant {
    name: String,
    op: ErasedOp,
}

impl Variant {
    /// Wrap a user closure, erasing its return type. The value it produces
    /// is observed via `black_box` before timing stops.
    pub fn new<T, F>(name: impl Into<String>, op: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            op: Arc::new(move || {
                let _ = std::hint::black_box(op());
            }),
        }
    }

    /// The variant's unique name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Clone a handle to the erased operation for a worker thread.
    pub(crate) fn op(&self) -> ErasedOp {
        Arc::clone(&self.op)
    }
}

impl std::fmt::Debug for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Variant").field("name", &self.name).finish()
    }
}
