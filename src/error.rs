//! Error types for Meterline
//!
//! Construction is the only fallible operation: amounts are unsigned, so
//! the negative-delta and negative-total contract violations are rejected
//! by the type system, and rendering is best-effort (a broken output
//! stream must never fail the job being reported on).

use thiserror::Error;

/// Main error type for Meterline operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeterError {
    /// A reporter was configured without a display label
    #[error("reporter label must not be empty")]
    EmptyLabel,
}

/// Result type alias for Meterline operations
pub type Result<T> = std::result::Result<T, MeterError>;
