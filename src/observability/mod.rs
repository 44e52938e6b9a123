// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! Diagnostic output is expressed as message structs that implement `Display`
//! and [`messages::StructuredLog`], so the wording of every log line lives in
//! one place and each event carries its fields as structured `tracing` data.
//!
//! Messages are organized by subsystem:
//! * `messages::engine` - run lifecycle, short-circuits and lazy sequences
//! * `messages::config` - run definition loading and validation
//!
//! # Usage
//!
//! ```rust
//! use comps::observability::messages::engine::RunFailed;
//! use comps::observability::messages::StructuredLog;
//! use comps::errors::EngineError;
//!
//! let error = EngineError::MissingBody;
//! RunFailed {
//!     strategy: "synchronized",
//!     error: &error,
//! }
//! .log();
//! ```

pub mod messages;
