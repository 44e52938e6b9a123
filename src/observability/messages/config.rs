// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for run definition loading and validation.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A run definition was loaded and validated.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ConfigLoaded<'a> {
    pub path: &'a str,
    pub kind: &'a str,
    pub strategy: &'a str,
    pub source_count: usize,
}

impl Display for ConfigLoaded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Loaded '{}' run from {} ({} strategy, {} sources)",
            self.kind, self.path, self.strategy, self.source_count
        )
    }
}

impl StructuredLog for ConfigLoaded<'_> {
    fn log(&self) {
        tracing::info!(
            path = self.path,
            kind = self.kind,
            strategy = self.strategy,
            source_count = self.source_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "config_loaded",
            span_name = name,
            path = self.path,
            kind = self.kind,
            strategy = self.strategy,
        )
    }
}

/// A run definition failed validation.
///
/// # Log Level
/// `warn!` - The definition is rejected before any step runs
pub struct ValidationFailed<'a> {
    pub error: &'a dyn std::error::Error,
}

impl Display for ValidationFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Run definition rejected: {}", self.error)
    }
}

impl StructuredLog for ValidationFailed<'_> {
    fn log(&self) {
        tracing::warn!(error = %self.error, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("validation_failed", span_name = name, error = %self.error)
    }
}
