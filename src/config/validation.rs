// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Run definition validation.
//!
//! Checks run in a fixed order and every problem found is collected, so a
//! definition with several mistakes is reported in one pass:
//!
//! 1. **Names**: source and accumulator names are unique
//! 2. **Sources**: each has exactly one of `values` or `range`, ranges have a
//!    non-zero step, and unbounded sources only appear where the run can stop
//! 3. **Functions**: every referenced function is a builtin and is given an
//!    accepted number of arguments
//! 4. **Kind**: the fields the run kind needs are present
//!
//! Variable names inside `args` are not checked here; a misspelled one fails
//! the run with an unbound-variable error.
//!
//! # Example
//!
//! ```rust
//! use comps::config::{validate_config, Config};
//! use comps::errors::ValidationError;
//!
//! let config: Config = serde_yaml::from_str(
//!     "kind: map\nsources: [{ name: n, values: [1, 2] }]\nbody: { name: square, args: [n] }\n",
//! )
//! .unwrap();
//!
//! assert_eq!(validate_config(&config), Err(vec![ValidationError::MissingKey]));
//! ```

use std::collections::HashSet;

use crate::config::{Builtin, Config, FunctionConfig, Kind};
use crate::engine::Strategy;
use crate::errors::ValidationError;

/// Validate a run definition against the builtin registry.
///
/// # Returns
///
/// * `Ok(())` - The definition can be executed
/// * `Err(Vec<ValidationError>)` - Every problem found
pub fn validate_config(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    validate_unique_names(config, &mut errors);
    validate_sources(config, &mut errors);
    validate_functions(config, &mut errors);
    validate_kind(config, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_unique_names(config: &Config, errors: &mut Vec<ValidationError>) {
    let mut seen = HashSet::new();
    let names = config
        .sources
        .iter()
        .map(|source| &source.name)
        .chain(config.accumulators.iter().map(|acc| &acc.name));

    for name in names {
        if !seen.insert(name.as_str()) {
            errors.push(ValidationError::DuplicateName { name: name.clone() });
        }
    }
}

fn validate_sources(config: &Config, errors: &mut Vec<ValidationError>) {
    for (position, source) in config.sources.iter().enumerate() {
        let invalid = |reason: &str| ValidationError::InvalidSource {
            name: source.name.clone(),
            reason: reason.to_string(),
        };

        match (&source.values, &source.range) {
            (Some(_), Some(_)) | (None, None) => {
                errors.push(invalid("exactly one of 'values' or 'range' is required"));
                continue;
            }
            (None, Some(range)) if range.step == 0 => {
                errors.push(invalid("range step must not be zero"));
                continue;
            }
            _ => {}
        }

        if !source.is_unbounded() {
            continue;
        }
        if config.kind != Kind::Generate || config.take.is_none() {
            errors.push(ValidationError::UnboundedSource {
                name: source.name.clone(),
                kind: config.kind.as_str().to_string(),
            });
        } else if config.strategy == Strategy::Exhaustive && position > 0 {
            errors.push(invalid(
                "only the first source of an exhaustive run may be unbounded",
            ));
        }
    }
}

fn referenced_functions(config: &Config) -> Vec<(String, &FunctionConfig)> {
    let mut functions = Vec::new();
    if let Some(filter) = &config.filter {
        functions.push(("filter".to_string(), filter));
    }
    if let Some(body) = &config.body {
        functions.push(("body".to_string(), body));
    }
    if let Some(key) = &config.key {
        functions.push(("key".to_string(), key));
    }
    for (position, update) in config.updates.iter().enumerate() {
        functions.push((format!("updates[{}]", position), update));
    }
    functions
}

fn validate_functions(config: &Config, errors: &mut Vec<ValidationError>) {
    for (location, function) in referenced_functions(config) {
        match Builtin::from_name(&function.name) {
            None => errors.push(ValidationError::UnknownFunction {
                location,
                name: function.name.clone(),
            }),
            Some(builtin) if !builtin.arity().accepts(function.args.len()) => {
                errors.push(ValidationError::WrongArgumentCount {
                    location,
                    name: function.name.clone(),
                    expected: builtin.arity().describe(),
                    actual: function.args.len(),
                })
            }
            Some(_) => {}
        }
    }
}

fn validate_kind(config: &Config, errors: &mut Vec<ValidationError>) {
    let kind = config.kind.as_str().to_string();
    match config.kind {
        Kind::Fold => {
            if config.accumulators.is_empty() {
                errors.push(ValidationError::MissingAccumulators);
            }
            if config.updates.is_empty() {
                errors.push(ValidationError::MissingBody { kind });
            }
            if let Some(result) = &config.result {
                if !config.accumulators.iter().any(|acc| &acc.name == result) {
                    errors.push(ValidationError::UnknownResult {
                        name: result.clone(),
                    });
                }
            }
        }
        Kind::Map => {
            if config.body.is_none() {
                errors.push(ValidationError::MissingBody { kind });
            }
            if config.key.is_none() {
                errors.push(ValidationError::MissingKey);
            }
        }
        _ => {
            if config.body.is_none() {
                errors.push(ValidationError::MissingBody { kind });
            }
        }
    }
}
