// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The binding environment: every name visible to a filter, body or projector.
//!
//! During a run the environment holds each declared accumulator (its current
//! value) and, while a step is being evaluated, the current value of each
//! source. The accumulator set is fixed when the environment is created; only
//! values change afterwards. Caller functions receive a shared reference and
//! read the names they need through [`Bindings::get`].

use std::collections::HashMap;
use std::fmt;

use crate::errors::{EngineError, Result};
use crate::traits::Step;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Slot {
    Accumulator(usize),
    Source(usize),
}

/// Name → value mapping for one engine run.
#[derive(Clone, PartialEq)]
pub struct Bindings<V> {
    index: HashMap<String, Slot>,
    accumulator_names: Vec<String>,
    accumulators: Vec<V>,
    source_names: Vec<String>,
    step: Vec<V>,
}

impl<V> Bindings<V> {
    /// Create the environment from accumulator declarations and the names of the sources.
    ///
    /// Names must be unique across accumulators and sources; a repeat is rejected
    /// with [`EngineError::DuplicateName`].
    pub fn initialize(accumulators: Vec<(String, V)>, source_names: Vec<String>) -> Result<Self> {
        let mut index = HashMap::with_capacity(accumulators.len() + source_names.len());
        let mut accumulator_names = Vec::with_capacity(accumulators.len());
        let mut values = Vec::with_capacity(accumulators.len());

        for (position, (name, initial)) in accumulators.into_iter().enumerate() {
            if index.insert(name.clone(), Slot::Accumulator(position)).is_some() {
                return Err(EngineError::DuplicateName { name });
            }
            accumulator_names.push(name);
            values.push(initial);
        }

        for (position, name) in source_names.iter().enumerate() {
            if index.insert(name.clone(), Slot::Source(position)).is_some() {
                return Err(EngineError::DuplicateName { name: name.clone() });
            }
        }

        Ok(Self {
            index,
            accumulator_names,
            accumulators: values,
            source_names,
            step: Vec::new(),
        })
    }

    /// Look up a bound name.
    ///
    /// Source names are only bound while a step is in progress.
    pub fn get(&self, name: &str) -> Result<&V> {
        let value = match self.index.get(name) {
            Some(Slot::Accumulator(i)) => self.accumulators.get(*i),
            Some(Slot::Source(i)) => self.step.get(*i),
            None => None,
        };
        value.ok_or_else(|| EngineError::UnboundVariable {
            name: name.to_string(),
        })
    }

    /// Whether `name` currently resolves to a value.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_ok()
    }

    /// Declared position of an accumulator.
    pub fn accumulator_index(&self, name: &str) -> Option<usize> {
        match self.index.get(name) {
            Some(Slot::Accumulator(i)) => Some(*i),
            _ => None,
        }
    }

    pub fn accumulator_count(&self) -> usize {
        self.accumulators.len()
    }

    /// Accumulators in declared order.
    pub fn accumulators(&self) -> impl Iterator<Item = (&str, &V)> {
        self.accumulator_names
            .iter()
            .map(String::as_str)
            .zip(self.accumulators.iter())
    }

    /// Source bindings of the step in progress, in declared order. Empty between steps.
    pub fn sources(&self) -> impl Iterator<Item = (&str, &V)> {
        self.source_names
            .iter()
            .map(String::as_str)
            .zip(self.step.iter())
    }

    /// Bind one step's source values, replacing the previous step's.
    /// Accumulator bindings are untouched.
    pub(crate) fn merge_step(&mut self, step: Step<V>) {
        debug_assert_eq!(step.len(), self.source_names.len());
        self.step = step;
    }

    /// Replace accumulator values by declared position. Applied in order, so a
    /// later entry for the same position wins.
    pub(crate) fn apply_updates(&mut self, updates: Vec<(usize, V)>) {
        for (position, value) in updates {
            self.accumulators[position] = value;
        }
    }

    /// Drop source bindings, leaving accumulators at their final values.
    pub(crate) fn into_terminal(mut self) -> Self {
        self.step.clear();
        self.source_names.clear();
        self.index
            .retain(|_, slot| matches!(slot, Slot::Accumulator(_)));
        self
    }

    /// Move one accumulator's value out of the environment.
    pub fn take(mut self, name: &str) -> Result<V> {
        match self.accumulator_index(name) {
            Some(position) => Ok(self.accumulators.swap_remove(position)),
            None => Err(EngineError::UnboundVariable {
                name: name.to_string(),
            }),
        }
    }

    /// Accumulators in declared order.
    pub fn into_vec(self) -> Vec<(String, V)> {
        self.accumulator_names
            .into_iter()
            .zip(self.accumulators)
            .collect()
    }

    pub fn into_map(self) -> HashMap<String, V> {
        self.accumulator_names
            .into_iter()
            .zip(self.accumulators)
            .collect()
    }
}

impl<V: fmt::Debug> fmt::Debug for Bindings<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.accumulators())
            .entries(self.sources())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env() -> Bindings<i64> {
        Bindings::initialize(
            vec![("sum".to_string(), 0), ("product".to_string(), 1)],
            vec!["n".to_string()],
        )
        .unwrap()
    }

    #[test]
    fn test_initialize_binds_accumulators_only() {
        let env = env();
        assert_eq!(env.get("sum"), Ok(&0));
        assert_eq!(env.get("product"), Ok(&1));
        assert_eq!(
            env.get("n"),
            Err(EngineError::UnboundVariable {
                name: "n".to_string()
            })
        );
        assert_eq!(env.accumulator_count(), 2);
    }

    #[test]
    fn test_merge_step_binds_sources_without_touching_accumulators() {
        let mut env = env();
        env.merge_step(vec![7]);
        assert_eq!(env.get("n"), Ok(&7));
        assert_eq!(env.get("sum"), Ok(&0));

        env.merge_step(vec![8]);
        assert_eq!(env.get("n"), Ok(&8));
        assert_eq!(env.sources().collect::<Vec<_>>(), vec![("n", &8)]);
    }

    #[test]
    fn test_apply_updates_keeps_accumulator_membership() {
        let mut env = env();
        env.apply_updates(vec![(1, 24), (0, 10)]);
        let names: Vec<&str> = env.accumulators().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["sum", "product"]);
        assert_eq!(env.get("sum"), Ok(&10));
        assert_eq!(env.get("product"), Ok(&24));
    }

    #[test]
    fn test_terminal_environment_has_no_source_bindings() {
        let mut env = env();
        env.merge_step(vec![3]);
        let terminal = env.into_terminal();
        assert!(!terminal.contains("n"));
        assert_eq!(terminal.sources().count(), 0);
        assert_eq!(
            terminal.into_vec(),
            vec![("sum".to_string(), 0), ("product".to_string(), 1)]
        );
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let err = Bindings::initialize(
            vec![("x".to_string(), 0), ("x".to_string(), 1)],
            vec![],
        )
        .unwrap_err();
        assert_eq!(err, EngineError::DuplicateName { name: "x".to_string() });

        let err = Bindings::initialize(vec![("x".to_string(), 0)], vec!["x".to_string()])
            .unwrap_err();
        assert_eq!(err, EngineError::DuplicateName { name: "x".to_string() });
    }

    #[test]
    fn test_take_moves_a_single_accumulator() {
        assert_eq!(env().take("product"), Ok(1));
        assert!(env().take("missing").is_err());
    }
}
