// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use thiserror::Error;

/// Problems found while validating a run definition.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A name is declared more than once across sources and accumulators
    DuplicateName {
        /// The repeated name
        name: String,
    },
    /// A function name is not present in the built-in registry
    UnknownFunction {
        /// Where the function was referenced (`body`, `filter`, `updates[1]`, ...)
        location: String,
        /// The unresolved function name
        name: String,
    },
    /// A function is given the wrong number of arguments
    WrongArgumentCount {
        /// Where the function was referenced
        location: String,
        /// The function name
        name: String,
        /// Human-readable accepted count (`1`, `at least 1`, ...)
        expected: String,
        /// Number of arguments given
        actual: usize,
    },
    /// The run kind requires a body (or fold updates) but none was given
    MissingBody {
        /// The run kind as written in the definition
        kind: String,
    },
    /// A map run needs a key function
    MissingKey,
    /// A fold run needs at least one accumulator
    MissingAccumulators,
    /// A fold run names a result accumulator that is not declared
    UnknownResult {
        /// The requested accumulator name
        name: String,
    },
    /// A source definition is malformed
    InvalidSource {
        /// The source name
        name: String,
        /// Why the source was rejected
        reason: String,
    },
    /// An eager run kind would never terminate over this source
    UnboundedSource {
        /// The source name
        name: String,
        /// The run kind as written in the definition
        kind: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::DuplicateName { name } => {
                write!(f, "Duplicate variable name: '{}'", name)
            }
            ValidationError::UnknownFunction { location, name } => {
                write!(f, "Unknown function '{}' in {}", name, location)
            }
            ValidationError::WrongArgumentCount {
                location,
                name,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Function '{}' in {} takes {} argument(s), got {}",
                    name, location, expected, actual
                )
            }
            ValidationError::MissingBody { kind } => {
                write!(f, "A '{}' run requires a body", kind)
            }
            ValidationError::MissingKey => {
                write!(f, "A 'map' run requires a key function")
            }
            ValidationError::MissingAccumulators => {
                write!(f, "A 'fold' run requires at least one accumulator")
            }
            ValidationError::UnknownResult { name } => {
                write!(f, "Result '{}' is not a declared accumulator", name)
            }
            ValidationError::InvalidSource { name, reason } => {
                write!(f, "Source '{}' is invalid: {}", name, reason)
            }
            ValidationError::UnboundedSource { name, kind } => {
                write!(
                    f,
                    "Source '{}' is unbounded, which only a 'generate' run with 'take' can consume (kind is '{}')",
                    name, kind
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors from loading or executing a run definition.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The definition file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The definition is not valid YAML for a `Config`.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The definition parsed but failed validation.
    #[error("Configuration validation failed:\n{}", join_lines(.0))]
    Invalid(Vec<ValidationError>),

    /// The definition was valid but the run itself failed.
    #[error("Run failed: {0}")]
    Run(#[from] crate::errors::EngineError),
}

fn join_lines(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
