//! # Meterline - Single-Line Terminal Progress
//!
//! Meterline renders one evolving status line for a long-running job:
//! label, state, formatted progress and total, percentage, a fixed-width
//! bar, and an optional time estimate. The line overwrites itself in place
//! using plain carriage returns, so it works on any terminal without ANSI
//! cursor control.
//!
//! ## Features
//!
//! - **Self-Correcting Totals**: if observed progress overshoots the
//!   configured total, the total grows to match instead of reporting a
//!   negative remainder
//! - **Blended-Rate Estimation**: remaining time is derived from the
//!   equal-weight average of the latest throughput sample and the lifetime
//!   average, smoothing bursty producers
//! - **Pluggable Amount Formatters**: byte sizes, bare counts, or
//!   unit-suffixed counts
//! - **Terminal States**: once finished or aborted, the line is frozen and
//!   straggling updates become no-ops
//!
//! ## Quick Start
//!
//! ```no_run
//! use meterline::ReporterOptions;
//! use meterline::format::binary_size;
//! use std::time::Instant;
//!
//! let mut reporter = ReporterOptions::new("archive.zip", 48 * 1024 * 1024)
//!     .formatter(binary_size)
//!     .time_tracking(true)
//!     .build()
//!     .expect("label is non-empty");
//!
//! reporter.advance_at(1024 * 1024, Instant::now());
//! reporter.close();
//! ```
//!
//! ## Counting Items Instead of Bytes
//!
//! ```no_run
//! use meterline::ReporterOptions;
//! use meterline::format::with_unit;
//!
//! let mut reporter = ReporterOptions::new("gallery", 12)
//!     .formatter(with_unit("pages"))
//!     .build()
//!     .unwrap();
//!
//! for _ in 0..12 {
//!     reporter.advance(1);
//! }
//! // The reporter finished itself when progress reached the total.
//! assert!(reporter.is_terminal());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod format;
pub mod reporter;

// Re-export commonly used types
pub use error::{MeterError, Result};
pub use reporter::{AmountFormatter, ProgressReporter, ProgressSummary, ReporterOptions, ReporterState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    //! Convenient re-exports for common usage
    //!
    //! ```no_run
    //! use meterline::prelude::*;
    //! ```

    pub use crate::error::{MeterError, Result};
    pub use crate::format::{binary_size, duration_str, plain, with_unit};
    pub use crate::reporter::{ProgressReporter, ProgressSummary, ReporterOptions, ReporterState};
}
