// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for comprehension run lifecycle events.
//!
//! This module contains message types for logging events related to:
//! * Run start, completion and failure
//! * Steps discarded by the filter stage
//! * Short-circuiting drivers (all/any/first)
//! * Lazy sequences running dry

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A run started.
///
/// # Log Level
/// `debug!` - Run lifecycle event
///
/// # Example
/// ```
/// use comps::observability::messages::engine::RunStarted;
///
/// let msg = RunStarted {
///     strategy: "exhaustive",
///     mode: "by_position",
///     accumulator_count: 2,
///     source_count: 3,
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct RunStarted<'a> {
    pub strategy: &'a str,
    pub mode: &'a str,
    pub accumulator_count: usize,
    pub source_count: usize,
}

impl Display for RunStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Starting {} run ({}): {} accumulators, {} sources",
            self.strategy, self.mode, self.accumulator_count, self.source_count
        )
    }
}

impl StructuredLog for RunStarted<'_> {
    fn log(&self) {
        tracing::debug!(
            strategy = self.strategy,
            mode = self.mode,
            accumulator_count = self.accumulator_count,
            source_count = self.source_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "run",
            span_name = name,
            strategy = self.strategy,
            mode = self.mode,
            accumulator_count = self.accumulator_count,
            source_count = self.source_count,
        )
    }
}

/// A run finished and its terminal environment was projected.
///
/// # Log Level
/// `debug!`
pub struct RunCompleted<'a> {
    pub strategy: &'a str,
    pub steps: usize,
    pub contributing: usize,
    pub duration: std::time::Duration,
}

impl Display for RunCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} run completed: {} steps, {} contributing, in {:?}",
            self.strategy, self.steps, self.contributing, self.duration
        )
    }
}

impl StructuredLog for RunCompleted<'_> {
    fn log(&self) {
        tracing::debug!(
            strategy = self.strategy,
            steps = self.steps,
            contributing = self.contributing,
            duration_us = self.duration.as_micros() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "run_completed",
            span_name = name,
            strategy = self.strategy,
            steps = self.steps,
            contributing = self.contributing,
            duration = ?self.duration,
        )
    }
}

/// A run failed. No result is produced.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use comps::errors::EngineError;
/// use comps::observability::messages::engine::RunFailed;
///
/// let error = EngineError::ArityMismatch { expected: 2, actual: 1 };
/// let msg = RunFailed {
///     strategy: "synchronized",
///     error: &error,
/// };
///
/// assert!(msg.to_string().contains("Expected 2"));
/// ```
pub struct RunFailed<'a> {
    pub strategy: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for RunFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{} run failed: {}", self.strategy, self.error)
    }
}

impl StructuredLog for RunFailed<'_> {
    fn log(&self) {
        tracing::error!(
            strategy = self.strategy,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "run_failed",
            span_name = name,
            strategy = self.strategy,
            error = %self.error,
        )
    }
}

/// The filter rejected a step.
///
/// # Log Level
/// `trace!` - Emitted once per discarded step
pub struct StepFiltered {
    pub step: usize,
}

impl Display for StepFiltered {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Step {} filtered out", self.step)
    }
}

impl StructuredLog for StepFiltered {
    fn log(&self) {
        tracing::trace!(step = self.step, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::trace_span!("step_filtered", span_name = name, step = self.step)
    }
}

/// A search stopped before exhausting its traversal.
///
/// # Log Level
/// `debug!`
pub struct ShortCircuited<'a> {
    pub strategy: &'a str,
    pub step: usize,
}

impl Display for ShortCircuited<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} search decided at step {}; remaining steps skipped",
            self.strategy, self.step
        )
    }
}

impl StructuredLog for ShortCircuited<'_> {
    fn log(&self) {
        tracing::debug!(strategy = self.strategy, step = self.step, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "short_circuited",
            span_name = name,
            strategy = self.strategy,
            step = self.step,
        )
    }
}

/// A lazy sequence reached the end of its traversal.
///
/// # Log Level
/// `debug!`
pub struct GeneratorExhausted<'a> {
    pub strategy: &'a str,
    pub yielded: usize,
}

impl Display for GeneratorExhausted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} generator exhausted after yielding {} items",
            self.strategy, self.yielded
        )
    }
}

impl StructuredLog for GeneratorExhausted<'_> {
    fn log(&self) {
        tracing::debug!(strategy = self.strategy, yielded = self.yielded, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "generator_exhausted",
            span_name = name,
            strategy = self.strategy,
            yielded = self.yielded,
        )
    }
}
