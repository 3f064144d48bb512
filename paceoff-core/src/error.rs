//! Error Taxonomy
//!
//! Registration and configuration errors surface synchronously from the
//! harness API. Variant execution failures are not in this enum: they are
//! captured per variant and reported as failed results, so one broken
//! variant never prevents measuring the others.

use thiserror::Error;

/// Errors returned synchronously by harness registration and configuration.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// A variant with this name is already registered. The existing variant
    /// is left untouched.
    #[error("variant '{name}' is already registered")]
    DuplicateVariant {
        /// The offending variant name.
        name: String,
    },

    /// The configuration violated one or more field constraints.
    #[error("invalid run configuration: {}", violations.join("; "))]
    InvalidConfig {
        /// One entry per offending field.
        violations: Vec<String>,
    },
}
