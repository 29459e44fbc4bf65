//! Error types for the evident audit trail.
//!
//! Only construction-time validation ever fails in this system. Integrity
//! findings — tampering, broken linkage — are deliberately NOT errors:
//! they are returned as booleans from the verify operations so detection
//! stays a security observation, never a program fault.

use thiserror::Error;

/// The unified error type for the evident crates.
#[derive(Debug, Error)]
pub enum EvidentError {
    /// A required event field was empty at construction.
    #[error("missing required event field: {field}")]
    MissingField { field: &'static str },

    /// The trail was constructed with a block capacity of zero.
    #[error("invalid block capacity {capacity}: must be at least 1")]
    InvalidCapacity { capacity: usize },

    /// An event payload contained a NaN or infinite float, which has no
    /// JSON representation and would make the chain unexportable.
    #[error("non-finite number in event {field}: values must be JSON-representable")]
    NonFiniteNumber { field: &'static str },

    /// The shared handle could not append because its lock was poisoned.
    #[error("trail write failed: {reason}")]
    TrailWriteFailed { reason: String },
}

/// Convenience alias used throughout the evident crates.
pub type EvidentResult<T> = Result<T, EvidentError>;
