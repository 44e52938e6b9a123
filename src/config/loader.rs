// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::engine::Strategy;
use crate::errors::ConfigError;
use crate::observability::messages::config::{ConfigLoaded, ValidationFailed};
use crate::observability::messages::StructuredLog;
use crate::traits::Source;
use crate::value::Value;

/// A YAML run definition: one comprehension, its sources and the named
/// built-in functions that make up its filter and body.
///
/// # Fields
/// * `kind` - Which comprehension to run
/// * `strategy` - How sources are combined into steps (defaults to `synchronized`)
/// * `sources` - Named sources, in declaration order
/// * `filter` - Optional predicate gating each step
/// * `body` - Per-step function (the predicate for `all`/`any`)
/// * `key` - Key function for `map` runs
/// * `accumulators` / `updates` / `result` - Accumulators, one positional update per
///   accumulator, and an optional single accumulator to return, for `fold` runs
/// * `take` - Maximum number of items to pull from a `generate` run
///
/// # Example
/// ```yaml
/// kind: fold
/// strategy: exhaustive
/// sources:
///   - name: x
///     values: [1, 2, 3]
///   - name: y
///     range: { start: 0, end: 6, step: 2 }
/// filter: { name: positive, args: [y] }
/// accumulators:
///   - { name: total, initial: 0 }
/// updates:
///   - { name: add, args: [total, x, y] }
/// result: total
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    pub kind: Kind,
    #[serde(default)]
    pub strategy: Strategy,
    #[serde(default)]
    pub sources: Vec<SourceConfig>,
    pub filter: Option<FunctionConfig>,
    pub body: Option<FunctionConfig>,
    pub key: Option<FunctionConfig>,
    #[serde(default)]
    pub accumulators: Vec<AccumulatorConfig>,
    #[serde(default)]
    pub updates: Vec<FunctionConfig>,
    pub result: Option<String>,
    pub take: Option<usize>,
}

/// Which comprehension a definition runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Fold,
    Sum,
    Product,
    List,
    Tuple,
    Set,
    Map,
    All,
    Any,
    First,
    Last,
    Generate,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Fold => "fold",
            Kind::Sum => "sum",
            Kind::Product => "product",
            Kind::List => "list",
            Kind::Tuple => "tuple",
            Kind::Set => "set",
            Kind::Map => "map",
            Kind::All => "all",
            Kind::Any => "any",
            Kind::First => "first",
            Kind::Last => "last",
            Kind::Generate => "generate",
        }
    }
}

/// A named source: either literal `values` or an integer `range`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SourceConfig {
    pub name: String,
    pub values: Option<Vec<Value>>,
    pub range: Option<RangeConfig>,
}

impl SourceConfig {
    /// Whether the source never runs out.
    pub fn is_unbounded(&self) -> bool {
        self.values.is_none() && self.range.is_some_and(|range| range.end.is_none())
    }

    /// A fresh stream over the source's values.
    pub fn open(&self) -> Source<'static, Value> {
        match (&self.values, &self.range) {
            (Some(values), _) => Box::new(values.clone().into_iter()),
            (None, Some(range)) => range.iter(),
            (None, None) => Box::new(std::iter::empty()),
        }
    }
}

/// Integers from `start` towards `end` (exclusive) in increments of `step`.
/// Without `end` the range is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RangeConfig {
    pub start: i64,
    pub end: Option<i64>,
    #[serde(default = "default_step")]
    pub step: i64,
}

fn default_step() -> i64 {
    1
}

impl RangeConfig {
    pub fn iter(&self) -> Source<'static, Value> {
        let RangeConfig { start, end, step } = *self;
        let values = std::iter::successors(Some(start), move |n| n.checked_add(step))
            .take_while(move |n| match end {
                Some(end) if step > 0 => *n < end,
                Some(end) => *n > end,
                None => true,
            });
        Box::new(values.map(Value::Int))
    }
}

/// A reference to a built-in function, applied to the named variables in `args`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FunctionConfig {
    pub name: String,
    #[serde(default)]
    pub args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AccumulatorConfig {
    pub name: String,
    pub initial: Value,
}

/// Load a run definition from a YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path)?;
    let cfg: Config = serde_yaml::from_str(&content)?;
    Ok(cfg)
}

/// Load a run definition and check it against the built-in registry.
///
/// Every problem found is reported at once in [`ConfigError::Invalid`].
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let cfg = load_config(path)?;

    if let Err(validation_errors) = crate::config::validate_config(&cfg) {
        let error = ConfigError::Invalid(validation_errors);
        ValidationFailed { error: &error }.log();
        return Err(error);
    }

    ConfigLoaded {
        path: &path.display().to_string(),
        kind: cfg.kind.as_str(),
        strategy: cfg.strategy.as_str(),
        source_count: cfg.sources.len(),
    }
    .log();

    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_basic_config() {
        let yaml = r#"
kind: sum
sources:
  - name: n
    values: [1, 2, 3]
  - name: k
    range: { start: 0 }
body: { name: square, args: [n] }
"#;

        let cfg: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.kind, Kind::Sum);
        assert_eq!(cfg.strategy, Strategy::Synchronized);
        assert_eq!(cfg.sources.len(), 2);
        assert!(!cfg.sources[0].is_unbounded());
        assert!(cfg.sources[1].is_unbounded());
        assert_eq!(cfg.sources[1].range.unwrap().step, 1);
        assert_eq!(cfg.body.unwrap().args, vec!["n"]);
    }

    #[test]
    fn test_unknown_kind_is_a_parse_error() {
        let result: Result<Config, _> = serde_yaml::from_str("kind: average\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_range_counts_up_and_down() {
        let up = RangeConfig {
            start: 0,
            end: Some(7),
            step: 3,
        };
        assert_eq!(
            up.iter().collect::<Vec<_>>(),
            vec![Value::Int(0), Value::Int(3), Value::Int(6)]
        );

        let down = RangeConfig {
            start: 3,
            end: Some(0),
            step: -1,
        };
        assert_eq!(
            down.iter().collect::<Vec<_>>(),
            vec![Value::Int(3), Value::Int(2), Value::Int(1)]
        );
    }

    #[test]
    fn test_unbounded_range_stops_at_overflow() {
        let near_max = RangeConfig {
            start: i64::MAX - 1,
            end: None,
            step: 1,
        };
        assert_eq!(near_max.iter().count(), 2);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = load_config("/definitely/not/here.yaml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
