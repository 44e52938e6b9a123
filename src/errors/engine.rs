// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised while driving a comprehension.
//!
//! Every variant is fatal to the `run()` that produced it: the engine never
//! retries, never recovers, and never returns a partial result. Errors raised
//! by caller-supplied filters, bodies or projectors are propagated unchanged.

use thiserror::Error;

/// Failure of a single engine run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// `run()` was invoked before any body transform was configured.
    #[error("Body must be set before running the comprehension")]
    MissingBody,

    /// A by-name update named a key that is not a declared accumulator.
    #[error("Invalid accumulator name in updates: '{key}'")]
    UnknownAccumulatorKey { key: String },

    /// A by-position body has a different number of transforms than there are accumulators.
    #[error("Expected {expected} positional transforms (one per accumulator), got {actual}")]
    ArityMismatch { expected: usize, actual: usize },

    /// A transform returned an update whose shape does not match the body's mode.
    #[error("Transform #{transform} returned a malformed update: expected {expected}")]
    MalformedUpdate {
        transform: usize,
        expected: &'static str,
    },

    /// A filter, body or projector read a name that is not bound.
    #[error("Unbound variable: '{name}'")]
    UnboundVariable { name: String },

    /// A first/last selection finished without any step passing the filter.
    #[error("No step passed the filter")]
    NoContributingStep,

    /// The same name was declared twice across accumulators and sources.
    #[error("Duplicate variable name: '{name}'")]
    DuplicateName { name: String },

    /// A dynamic value was not of the expected kind.
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: String,
    },

    /// An arithmetic operator was applied to incompatible operands.
    #[error("Unsupported operands for {op}: {left} and {right}")]
    InvalidOperands {
        op: &'static str,
        left: String,
        right: String,
    },

    /// Integer arithmetic overflowed.
    #[error("Integer overflow in {op}")]
    Overflow { op: &'static str },
}
