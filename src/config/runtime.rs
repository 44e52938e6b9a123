// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::comprehensions::For;
use crate::config::{validate_config, Config, Function, FunctionConfig, FunctionRegistry, Kind};
use crate::engine::{transform, Bindings, Body, Update};
use crate::errors::{ConfigError, ValidationError};
use crate::value::Value;

/// Executes run definitions.
///
/// The definition is validated first, then turned into the matching
/// comprehension and driven to a single [`Value`]:
///
/// * `fold` gives the `result` accumulator, or a `Map` of accumulator name to value
/// * `all` / `any` give a `Bool`
/// * `generate` gives a `List` of at most `take` items
/// * every other kind gives what its comprehension returns
///
/// # Example
///
/// ```
/// use comps::config::{Config, Runtime};
/// use comps::Value;
///
/// let config: Config = serde_yaml::from_str(r#"
/// kind: sum
/// sources: [{ name: n, values: [1, 2, 3, 4] }]
/// filter: { name: even, args: [n] }
/// body: { name: identity, args: [n] }
/// "#).unwrap();
///
/// assert_eq!(Runtime::execute(&config).unwrap(), Value::Int(6));
/// ```
pub struct Runtime;

impl Runtime {
    pub fn execute(config: &Config) -> Result<Value, ConfigError> {
        validate_config(config).map_err(ConfigError::Invalid)?;

        let mut comprehension = For::new(config.strategy);
        for source in &config.sources {
            comprehension = comprehension.boxed_source(source.name.clone(), source.open());
        }
        if let Some(filter) = &config.filter {
            let filter = resolve("filter", filter)?;
            comprehension = comprehension.when(move |b| filter(b)?.as_bool());
        }

        let value = match config.kind {
            Kind::Fold => return Self::fold(comprehension, config),
            Kind::Sum => comprehension.sum(body(config)?)?,
            Kind::Product => comprehension.product(body(config)?)?,
            Kind::List => comprehension.list(body(config)?)?,
            Kind::Tuple => comprehension.tuple(body(config)?)?,
            Kind::Set => comprehension.set(body(config)?)?,
            Kind::Map => {
                let key = match &config.key {
                    Some(key) => resolve("key", key)?,
                    None => return Err(ConfigError::Invalid(vec![ValidationError::MissingKey])),
                };
                let value = body(config)?;
                comprehension.map(move |b| Ok((key(b)?, value(b)?)))?
            }
            Kind::All => {
                let predicate = body(config)?;
                Value::Bool(comprehension.all(|b| predicate(b)?.as_bool())?)
            }
            Kind::Any => {
                let predicate = body(config)?;
                Value::Bool(comprehension.any(|b| predicate(b)?.as_bool())?)
            }
            Kind::First => comprehension.first(body(config)?)?,
            Kind::Last => comprehension.last(body(config)?)?,
            Kind::Generate => {
                let items = comprehension.generate(body(config)?)?;
                let items = match config.take {
                    Some(limit) => items.take(limit).collect::<Result<Vec<_>, _>>()?,
                    None => items.collect::<Result<Vec<_>, _>>()?,
                };
                Value::List(items)
            }
        };
        Ok(value)
    }

    fn fold(comprehension: For<'_>, config: &Config) -> Result<Value, ConfigError> {
        let mut transforms = Vec::with_capacity(config.updates.len());
        for (position, update) in config.updates.iter().enumerate() {
            let update = resolve(&format!("updates[{}]", position), update)?;
            transforms.push(transform(move |b: &Bindings<Value>| Ok(Update::value(update(b)?))));
        }

        let mut fold = comprehension.fold();
        for accumulator in &config.accumulators {
            fold = fold.accumulator(accumulator.name.clone(), accumulator.initial.clone());
        }
        let fold = fold.body(Body::by_position(transforms));

        let value = match &config.result {
            Some(name) => fold.select(name.clone()).run()?,
            None => Value::Map(
                fold.run()?
                    .into_vec()
                    .into_iter()
                    .map(|(name, value)| (Value::Str(name), value))
                    .collect(),
            ),
        };
        Ok(value)
    }
}

fn resolve(location: &str, function: &FunctionConfig) -> Result<Function, ConfigError> {
    FunctionRegistry::create_function(function).ok_or_else(|| {
        ConfigError::Invalid(vec![ValidationError::UnknownFunction {
            location: location.to_string(),
            name: function.name.clone(),
        }])
    })
}

fn body(config: &Config) -> Result<Function, ConfigError> {
    match &config.body {
        Some(body) => resolve("body", body),
        None => Err(ConfigError::Invalid(vec![ValidationError::MissingBody {
            kind: config.kind.as_str().to_string(),
        }])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::EngineError;

    fn run(yaml: &str) -> Result<Value, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        Runtime::execute(&config)
    }

    #[test]
    fn test_fold_with_default_projection() {
        let value = run(
            r#"
kind: fold
sources: [{ name: n, values: [1, 2, 3, 4] }]
accumulators: [{ name: sum, initial: 0 }, { name: product, initial: 1 }]
updates: [{ name: add, args: [sum, n] }, { name: multiply, args: [product, n] }]
"#,
        )
        .unwrap();
        assert_eq!(value.to_string(), r#"{"product": 24, "sum": 10}"#);
    }

    #[test]
    fn test_fold_arity_mismatch_surfaces_engine_error() {
        let result = run(
            r#"
kind: fold
sources: [{ name: n, values: [1] }]
accumulators: [{ name: sum, initial: 0 }, { name: product, initial: 1 }]
updates: [{ name: add, args: [sum, n] }]
"#,
        );
        assert!(matches!(
            result,
            Err(ConfigError::Run(EngineError::ArityMismatch {
                expected: 2,
                actual: 1
            }))
        ));
    }

    #[test]
    fn test_invalid_definition_is_not_run() {
        let result = run("kind: sum\nsources: [{ name: n, values: [1] }]\n");
        assert!(matches!(result, Err(ConfigError::Invalid(errors)) if errors.len() == 1));
    }

    #[test]
    fn test_misspelled_argument_fails_the_run() {
        let result = run(
            r#"
kind: list
sources: [{ name: n, values: [1] }]
body: { name: square, args: [m] }
"#,
        );
        assert!(matches!(
            result,
            Err(ConfigError::Run(EngineError::UnboundVariable { name })) if name == "m"
        ));
    }

    #[test]
    fn test_filter_must_return_bool() {
        let result = run(
            r#"
kind: list
sources: [{ name: n, values: [1] }]
filter: { name: square, args: [n] }
body: { name: identity, args: [n] }
"#,
        );
        assert!(matches!(
            result,
            Err(ConfigError::Run(EngineError::TypeMismatch { expected: "bool", .. }))
        ));
    }
}
