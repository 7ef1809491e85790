//! Progress reporter implementation
//!
//! A single self-overwriting status line with:
//! - Cumulative progress against a self-correcting total
//! - Formatted progress/total amounts and a fixed-width bar
//! - Blended-rate remaining-time estimation
//! - Terminal Finished/Aborted states that freeze the line
//!
//! The reporter is single-producer by construction: every mutation takes
//! `&mut self`, so callers feeding it from several workers must serialize
//! updates (for example through one consumer draining a channel).

use crate::error::{MeterError, Result};
use crate::format::{duration_str, plain};
use console::measure_text_width;
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// Number of cells in the rendered bar
const BAR_WIDTH: usize = 20;

/// Marker for a filled bar cell
const BAR_FILL: &str = "=";

/// Renders an amount (bytes, pages, items) for display
pub type AmountFormatter = Box<dyn Fn(u64) -> String + Send + Sync>;

/// Lifecycle state of a reporter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReporterState {
    /// Accepting `advance` calls
    Running,
    /// Completed normally; all further calls are no-ops
    Finished,
    /// Closed with an abnormal status; all further calls are no-ops
    Aborted,
}

impl ReporterState {
    /// Whether the reporter refuses further mutation
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Running)
    }
}

/// Configuration for a [`ProgressReporter`]
///
/// The option set is closed: every knob is a named field with a default,
/// not an open-ended map.
pub struct ReporterOptions {
    label: String,
    total: u64,
    formatter: AmountFormatter,
    initial_progress: u64,
    running_label: String,
    finished_label: String,
    time_tracking: bool,
}

impl ReporterOptions {
    /// Start configuring a reporter with a display label and total capacity
    pub fn new(label: impl Into<String>, total: u64) -> Self {
        Self {
            label: label.into(),
            total,
            formatter: Box::new(plain),
            initial_progress: 0,
            running_label: "running".to_string(),
            finished_label: "done".to_string(),
            time_tracking: false,
        }
    }

    /// Set the amount formatter (default: bare integers)
    pub fn formatter(mut self, formatter: impl Fn(u64) -> String + Send + Sync + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    /// Start from an already-completed amount instead of zero
    pub fn initial_progress(mut self, amount: u64) -> Self {
        self.initial_progress = amount;
        self
    }

    /// Override the status text shown while running (default: "running")
    pub fn running_label(mut self, label: impl Into<String>) -> Self {
        self.running_label = label.into();
        self
    }

    /// Override the status text shown after a normal finish (default: "done")
    pub fn finished_label(mut self, label: impl Into<String>) -> Self {
        self.finished_label = label.into();
        self
    }

    /// Enable remaining-time estimation for timestamped advances
    pub fn time_tracking(mut self, enabled: bool) -> Self {
        self.time_tracking = enabled;
        self
    }

    /// Build a reporter that renders to standard output
    pub fn build(self) -> Result<ProgressReporter> {
        self.build_inner(Some(Box::new(io::stdout())))
    }

    /// Build a reporter that renders nowhere (quiet mode)
    ///
    /// State still updates normally, so [`ProgressReporter::summary`] keeps
    /// working without a terminal.
    pub fn build_hidden(self) -> Result<ProgressReporter> {
        self.build_inner(None)
    }

    /// Build a reporter that renders into the given writer
    pub fn build_with_writer(self, out: impl Write + Send + 'static) -> Result<ProgressReporter> {
        self.build_inner(Some(Box::new(out)))
    }

    fn build_inner(self, out: Option<Box<dyn Write + Send>>) -> Result<ProgressReporter> {
        if self.label.is_empty() {
            return Err(MeterError::EmptyLabel);
        }

        // An initial value past the capacity is the same self-correction
        // case as an overshooting advance.
        let total = self.total.max(self.initial_progress);
        let total_str = (self.formatter)(total);
        let now = Instant::now();

        let mut reporter = ProgressReporter {
            label: self.label,
            total,
            progress: self.initial_progress,
            state: ReporterState::Running,
            status: self.running_label,
            finished_label: self.finished_label,
            formatter: self.formatter,
            time_tracking: self.time_tracking,
            started: now,
            last_sample: now,
            total_str,
            last_width: 0,
            out,
        };

        if reporter.progress >= reporter.total {
            // Covers `total == 0`: render once at 100% and finish without
            // ever dividing by the capacity.
            reporter.finish_with(None);
        } else {
            reporter.repaint("", false);
        }

        Ok(reporter)
    }
}

/// Progress reporter for a single long-running operation
///
/// Construct through [`ReporterOptions`] or [`ProgressReporter::new`].
/// Constructing emits the initial render; [`ProgressReporter::advance`]
/// repaints the line in place; reaching the total, [`ProgressReporter::close`]
/// or [`ProgressReporter::abort`] freezes it with a trailing newline.
pub struct ProgressReporter {
    /// Display name, immutable after construction
    label: String,
    /// Capacity; raised to match progress on overshoot
    total: u64,
    /// Running sum of advance deltas
    progress: u64,
    /// Lifecycle state
    state: ReporterState,
    /// Status text currently shown on the line
    status: String,
    /// Status text to switch to on a normal finish
    finished_label: String,
    /// Injected amount renderer
    formatter: AmountFormatter,
    /// Whether timestamped advances produce remaining-time estimates
    time_tracking: bool,
    /// Construction time, for lifetime rate and elapsed suffixes
    started: Instant,
    /// Time of the most recent timestamped advance
    last_sample: Instant,
    /// Cached formatted total, recomputed when the total changes
    total_str: String,
    /// Display width of the previously painted line
    last_width: usize,
    /// Output sink; `None` renders nothing
    out: Option<Box<dyn Write + Send>>,
}

impl ProgressReporter {
    /// Create a reporter on standard output with default options
    pub fn new(label: impl Into<String>, total: u64) -> Result<Self> {
        ReporterOptions::new(label, total).build()
    }

    /// Record newly completed work
    ///
    /// Adds `delta` to the cumulative progress and repaints the line. When
    /// progress overshoots the total, the total is raised to match and the
    /// render reports the remaining time as unknown. When progress reaches
    /// the total exactly, the reporter finishes itself. No-op once terminal.
    pub fn advance(&mut self, delta: u64) {
        self.advance_inner(delta, None);
    }

    /// Record newly completed work with a timestamp for rate estimation
    ///
    /// Same as [`ProgressReporter::advance`], and additionally feeds the
    /// remaining-time estimator when time tracking is enabled: the latest
    /// throughput sample and the lifetime average are blended with equal
    /// weight, and a zero blended rate renders no estimate at all.
    pub fn advance_at(&mut self, delta: u64, now: Instant) {
        self.advance_inner(delta, Some(now));
    }

    /// Finish normally
    ///
    /// Switches to the finished status, appends the total elapsed time and
    /// a trailing newline. No-op once terminal.
    pub fn close(&mut self) {
        if self.state.is_terminal() {
            tracing::trace!(label = %self.label, "ignoring close on terminal reporter");
            return;
        }
        self.finish_with(None);
    }

    /// Finish abnormally with the given status text
    ///
    /// Like [`ProgressReporter::close`], but the final line shows `status`
    /// instead of the configured finished label and the reporter ends in
    /// [`ReporterState::Aborted`]. No-op once terminal.
    pub fn abort(&mut self, status: impl Into<String>) {
        if self.state.is_terminal() {
            tracing::trace!(label = %self.label, "ignoring abort on terminal reporter");
            return;
        }
        let status = status.into();
        self.finish_with(Some(status));
    }

    /// Display label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Amount completed so far
    pub fn progress(&self) -> u64 {
        self.progress
    }

    /// Current capacity (may have grown since construction)
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Lifecycle state
    pub fn state(&self) -> ReporterState {
        self.state
    }

    /// Whether the reporter refuses further mutation
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Whether renders reach an output sink
    pub fn is_enabled(&self) -> bool {
        self.out.is_some()
    }

    /// Wall-clock time since construction
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Completion percentage, 100 when the total is zero
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.progress as f64 / self.total as f64) * 100.0
        }
    }

    /// Get a point-in-time summary
    pub fn summary(&self) -> ProgressSummary {
        ProgressSummary {
            progress: self.progress,
            total: self.total,
            state: self.state,
            elapsed: self.elapsed(),
        }
    }

    fn advance_inner(&mut self, delta: u64, sample: Option<Instant>) {
        if self.state.is_terminal() {
            tracing::trace!(label = %self.label, delta, "ignoring advance on terminal reporter");
            return;
        }

        self.progress = self.progress.saturating_add(delta);

        let overshoot = self.progress > self.total;
        if overshoot {
            tracing::debug!(
                label = %self.label,
                total = self.progress,
                "raising total to match observed progress"
            );
            self.total = self.progress;
            self.total_str = (self.formatter)(self.total);
        }

        let suffix = if overshoot {
            // The work turned out larger than estimated; the raised total
            // is provisional, so no estimate can be trusted this render.
            " remaining: unknown".to_string()
        } else if self.time_tracking {
            sample
                .map(|now| self.remaining_suffix(delta, now))
                .unwrap_or_default()
        } else {
            String::new()
        };

        if let Some(now) = sample {
            self.last_sample = now;
        }

        if !overshoot && self.progress >= self.total {
            self.finish_with(None);
            return;
        }

        self.repaint(&suffix, false);
    }

    /// Blended-rate remaining-time suffix, or empty when no rate exists
    fn remaining_suffix(&self, delta: u64, now: Instant) -> String {
        let sample_secs = now.saturating_duration_since(self.last_sample).as_secs_f64();
        let lifetime_secs = now.saturating_duration_since(self.started).as_secs_f64();

        let instantaneous = if sample_secs > 0.0 {
            delta as f64 / sample_secs
        } else {
            0.0
        };
        let lifetime = if lifetime_secs > 0.0 {
            self.progress as f64 / lifetime_secs
        } else {
            0.0
        };

        let blended = (instantaneous + lifetime) / 2.0;
        if blended > 0.0 {
            let remaining = (self.total - self.progress) as f64 / blended;
            format!(" remaining: {}", duration_str(remaining as u64))
        } else {
            String::new()
        }
    }

    fn finish_with(&mut self, abnormal: Option<String>) {
        let elapsed = self.started.elapsed();
        match abnormal {
            Some(status) => {
                self.state = ReporterState::Aborted;
                self.status = status;
            }
            None => {
                self.state = ReporterState::Finished;
                self.status = self.finished_label.clone();
            }
        }
        tracing::debug!(label = %self.label, state = ?self.state, ?elapsed, "reporter closed");

        let suffix = format!(" total elapsed: {}", duration_str(elapsed.as_secs()));
        self.repaint(&suffix, true);
    }

    /// Erase the previous line's footprint and paint the current state
    fn repaint(&mut self, suffix: &str, newline: bool) {
        let filled = ((self.percentage() / 100.0) * BAR_WIDTH as f64) as usize;
        let filled = filled.min(BAR_WIDTH);
        let line = format!(
            "[{}] {} {} | {} {:5.1}% [{}{}]{}",
            self.label,
            self.status,
            (self.formatter)(self.progress),
            self.total_str,
            self.percentage(),
            BAR_FILL.repeat(filled),
            " ".repeat(BAR_WIDTH - filled),
            suffix
        );

        if let Some(out) = self.out.as_mut() {
            let _ = write!(out, "\r{}\r{}", " ".repeat(self.last_width), line);
            if newline {
                let _ = writeln!(out);
            }
            let _ = out.flush();
        }

        // Labels and formatted amounts may contain wide glyphs; track the
        // display width, not the byte length, so erasure covers the line.
        self.last_width = measure_text_width(&line);
    }
}

impl std::fmt::Debug for ProgressReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressReporter")
            .field("label", &self.label)
            .field("progress", &self.progress)
            .field("total", &self.total)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Point-in-time view of a reporter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSummary {
    /// Amount completed so far
    pub progress: u64,
    /// Capacity at snapshot time
    pub total: u64,
    /// Lifecycle state at snapshot time
    pub state: ReporterState,
    /// Wall-clock time since construction
    pub elapsed: Duration,
}

impl ProgressSummary {
    /// Completion percentage, 100 when the total is zero
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.progress as f64 / self.total as f64) * 100.0
        }
    }
}
