// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Accumulator update protocol.
//!
//! A body is one or more transforms plus the mode that interprets their
//! results. On a step that passes the filter every transform is evaluated
//! against the same pre-update environment, and only then are all of the
//! resulting updates applied together. No transform ever observes another
//! transform's update from the same step.

use std::fmt;

use crate::engine::bindings::Bindings;
use crate::errors::{EngineError, Result};

/// What a single transform produced for one step.
#[derive(Debug, Clone, PartialEq)]
pub enum Update<V> {
    /// Partial mapping of accumulator name to new value (by-name mode).
    Named(Vec<(String, V)>),
    /// New value for the accumulator at the transform's own position (by-position mode).
    Value(V),
}

impl<V> Update<V> {
    /// Update a single accumulator by name.
    pub fn set(name: impl Into<String>, value: V) -> Self {
        Update::Named(vec![(name.into(), value)])
    }

    /// Update several accumulators by name.
    pub fn named<K: Into<String>>(pairs: impl IntoIterator<Item = (K, V)>) -> Self {
        Update::Named(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Positional update.
    pub fn value(value: V) -> Self {
        Update::Value(value)
    }
}

/// How a body's transform results are mapped onto accumulators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    /// Each transform returns a partial name → value mapping; unnamed accumulators keep their value.
    ByName,
    /// Exactly one transform per accumulator, each returning that accumulator's next value.
    ByPosition,
}

impl UpdateMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateMode::ByName => "by_name",
            UpdateMode::ByPosition => "by_position",
        }
    }
}

/// A body transform: reads the step's bindings and proposes accumulator updates.
pub type Transform<'a, V> = Box<dyn Fn(&Bindings<V>) -> Result<Update<V>> + 'a>;

/// Box a closure as a [`Transform`], pinning down the closure's argument type.
pub fn transform<'a, V, F>(f: F) -> Transform<'a, V>
where
    F: Fn(&Bindings<V>) -> Result<Update<V>> + 'a,
{
    Box::new(f)
}

/// The transforms of a run together with their update mode.
pub struct Body<'a, V> {
    mode: UpdateMode,
    transforms: Vec<Transform<'a, V>>,
}

impl<'a, V> Body<'a, V> {
    /// A single by-name transform.
    pub fn by_name<F>(f: F) -> Self
    where
        F: Fn(&Bindings<V>) -> Result<Update<V>> + 'a,
    {
        Self {
            mode: UpdateMode::ByName,
            transforms: vec![Box::new(f)],
        }
    }

    /// Several by-name transforms; when two write the same key the later one wins.
    pub fn by_name_all(transforms: Vec<Transform<'a, V>>) -> Self {
        Self {
            mode: UpdateMode::ByName,
            transforms,
        }
    }

    /// One transform per accumulator, in declared accumulator order.
    pub fn by_position(transforms: Vec<Transform<'a, V>>) -> Self {
        Self {
            mode: UpdateMode::ByPosition,
            transforms,
        }
    }

    pub fn mode(&self) -> UpdateMode {
        self.mode
    }

    /// Check the body against the declared accumulators before any step runs.
    pub fn validate(&self, accumulator_count: usize) -> Result<()> {
        if self.transforms.is_empty() {
            return Err(EngineError::MissingBody);
        }
        if self.mode == UpdateMode::ByPosition && self.transforms.len() != accumulator_count {
            return Err(EngineError::ArityMismatch {
                expected: accumulator_count,
                actual: self.transforms.len(),
            });
        }
        Ok(())
    }

    /// Evaluate every transform against `env` and resolve the results to
    /// `(accumulator position, new value)` pairs, in application order.
    pub fn compute(&self, env: &Bindings<V>) -> Result<Vec<(usize, V)>> {
        match self.mode {
            UpdateMode::ByName => {
                let mut updates = Vec::new();
                for (position, transform) in self.transforms.iter().enumerate() {
                    let pairs = match transform(env)? {
                        Update::Named(pairs) => pairs,
                        Update::Value(_) => {
                            return Err(EngineError::MalformedUpdate {
                                transform: position,
                                expected: "a name to value mapping",
                            })
                        }
                    };
                    for (key, value) in pairs {
                        let target = env
                            .accumulator_index(&key)
                            .ok_or(EngineError::UnknownAccumulatorKey { key })?;
                        updates.push((target, value));
                    }
                }
                Ok(updates)
            }
            UpdateMode::ByPosition => self
                .transforms
                .iter()
                .enumerate()
                .map(|(position, transform)| match transform(env)? {
                    Update::Value(value) => Ok((position, value)),
                    Update::Named(_) => Err(EngineError::MalformedUpdate {
                        transform: position,
                        expected: "a single positional value",
                    }),
                })
                .collect(),
        }
    }
}

impl<V> fmt::Debug for Body<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Body")
            .field("mode", &self.mode)
            .field("transform_count", &self.transforms.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(a: i64, b: i64, n: i64) -> Bindings<i64> {
        let mut env = Bindings::initialize(
            vec![("a".to_string(), a), ("b".to_string(), b)],
            vec!["n".to_string()],
        )
        .unwrap();
        env.merge_step(vec![n]);
        env
    }

    #[test]
    fn test_by_name_updates_only_named_keys() {
        let body = Body::by_name(|b: &Bindings<i64>| Ok(Update::set("b", b.get("b")? + b.get("n")?)));
        assert_eq!(body.compute(&env(1, 2, 10)), Ok(vec![(1, 12)]));
    }

    #[test]
    fn test_by_name_unknown_key_is_an_error() {
        let body = Body::by_name(|_: &Bindings<i64>| Ok(Update::set("c", 0)));
        assert_eq!(
            body.compute(&env(0, 0, 0)),
            Err(EngineError::UnknownAccumulatorKey {
                key: "c".to_string()
            })
        );
    }

    #[test]
    fn test_transforms_share_the_pre_update_snapshot() {
        let body = Body::by_name_all(vec![
            transform(|b: &Bindings<i64>| Ok(Update::set("a", b.get("a")? + 1))),
            transform(|b: &Bindings<i64>| Ok(Update::set("b", *b.get("a")?))),
        ]);
        // `b` sees a == 5, not the 6 the first transform proposes.
        assert_eq!(body.compute(&env(5, 0, 0)), Ok(vec![(0, 6), (1, 5)]));
    }

    #[test]
    fn test_by_position_maps_transforms_to_declared_order() {
        let body = Body::by_position(vec![
            transform(|b: &Bindings<i64>| Ok(Update::value(b.get("a")? + b.get("n")?))),
            transform(|b: &Bindings<i64>| Ok(Update::value(b.get("b")? * b.get("n")?))),
        ]);
        assert!(body.validate(2).is_ok());
        assert_eq!(body.compute(&env(1, 2, 3)), Ok(vec![(0, 4), (1, 6)]));
    }

    #[test]
    fn test_by_position_arity_is_checked() {
        let body = Body::by_position(vec![transform(|_: &Bindings<i64>| Ok(Update::value(0)))]);
        assert_eq!(
            body.validate(2),
            Err(EngineError::ArityMismatch {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_empty_body_is_missing() {
        let body: Body<i64> = Body::by_name_all(vec![]);
        assert_eq!(body.validate(1), Err(EngineError::MissingBody));
    }

    #[test]
    fn test_shape_must_match_mode() {
        let named_in_positional =
            Body::by_position(vec![transform(|_: &Bindings<i64>| Ok(Update::set("a", 1)))]);
        assert!(matches!(
            named_in_positional.compute(&env(0, 0, 0)),
            Err(EngineError::MalformedUpdate { transform: 0, .. })
        ));

        let value_in_named = Body::by_name(|_: &Bindings<i64>| Ok(Update::value(1)));
        assert!(matches!(
            value_in_named.compute(&env(0, 0, 0)),
            Err(EngineError::MalformedUpdate { transform: 0, .. })
        ));
    }
}
