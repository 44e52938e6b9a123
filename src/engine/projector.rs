// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;

use crate::engine::bindings::Bindings;
use crate::errors::Result;

/// Maps the terminal environment (accumulators only) to the caller-visible result.
pub struct Projector<'a, V, R> {
    kind: &'static str,
    project: Box<dyn FnOnce(Bindings<V>) -> Result<R> + 'a>,
}

impl<'a, V: 'a> Projector<'a, V, Bindings<V>> {
    /// The default projector: every accumulator, in declared order.
    pub fn accumulators() -> Self {
        Self {
            kind: "accumulators",
            project: Box::new(|terminal: Bindings<V>| Ok(terminal)),
        }
    }
}

impl<'a, V: 'a> Projector<'a, V, V> {
    /// The final value of one accumulator.
    pub fn select(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            kind: "select",
            project: Box::new(move |terminal: Bindings<V>| terminal.take(&name)),
        }
    }
}

impl<'a, V: 'a, R> Projector<'a, V, R> {
    /// A custom projection over the terminal bindings.
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce(&Bindings<V>) -> Result<R> + 'a,
    {
        Self {
            kind: "custom",
            project: Box::new(move |terminal: Bindings<V>| f(&terminal)),
        }
    }

    pub fn project(self, terminal: Bindings<V>) -> Result<R> {
        (self.project)(terminal)
    }
}

impl<'a, V: 'a> From<&str> for Projector<'a, V, V> {
    fn from(name: &str) -> Self {
        Projector::select(name)
    }
}

impl<V, R> fmt::Debug for Projector<'_, V, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Projector").field("kind", &self.kind).finish()
    }
}
