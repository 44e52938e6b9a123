// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! * `engine` - comprehension run lifecycle events
//! * `config` - run definition loading and validation events

use tracing::Span;

pub mod config;
pub mod engine;

/// A log message that knows its own level and structured fields.
pub trait StructuredLog {
    /// Emit the message at its level with structured fields attached.
    fn log(&self);

    /// Build a span carrying the message's fields.
    fn span(&self, name: &str) -> Span;
}
