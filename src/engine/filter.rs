// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;

use crate::engine::bindings::Bindings;
use crate::errors::Result;

/// A filter predicate over the current bindings (sources and accumulators).
pub type Predicate<'a, V> = Box<dyn Fn(&Bindings<V>) -> Result<bool> + 'a>;

/// Gate deciding whether a step contributes. Without a predicate every step passes.
pub struct Filter<'a, V> {
    predicate: Option<Predicate<'a, V>>,
}

impl<'a, V> Filter<'a, V> {
    /// The always-true filter.
    pub fn always() -> Self {
        Self { predicate: None }
    }

    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Bindings<V>) -> Result<bool> + 'a,
    {
        Self {
            predicate: Some(Box::new(predicate)),
        }
    }

    /// Evaluate against the current bindings. Errors raised by the predicate
    /// (an unbound name, for one) are returned as-is.
    pub fn evaluate(&self, env: &Bindings<V>) -> Result<bool> {
        match &self.predicate {
            Some(predicate) => predicate(env),
            None => Ok(true),
        }
    }
}

impl<V> Default for Filter<'_, V> {
    fn default() -> Self {
        Self::always()
    }
}

impl<V> fmt::Debug for Filter<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("always", &self.predicate.is_none())
            .finish()
    }
}
