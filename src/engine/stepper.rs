// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::engine::bindings::Bindings;
use crate::engine::factory::{Strategy, TraversalFactory};
use crate::engine::filter::Filter;
use crate::errors::Result;
use crate::observability::messages::{engine::StepFiltered, StructuredLog};
use crate::traits::{Source, Traversal};

/// Walks a traversal, merging each step into the environment and gating it
/// through the filter. Shared by the run-to-completion, search and lazy drivers.
pub(crate) struct Stepper<'a, V> {
    strategy: Strategy,
    bindings: Bindings<V>,
    traversal: Box<dyn Traversal<V> + 'a>,
    filter: Filter<'a, V>,
    steps: usize,
    contributing: usize,
}

impl<'a, V: Clone + 'a> Stepper<'a, V> {
    pub(crate) fn new(
        strategy: Strategy,
        accumulators: Vec<(String, V)>,
        sources: Vec<(String, Source<'a, V>)>,
        filter: Filter<'a, V>,
    ) -> Result<Self> {
        let (names, sources): (Vec<String>, Vec<Source<'a, V>>) = sources.into_iter().unzip();
        let bindings = Bindings::initialize(accumulators, names)?;
        let traversal = TraversalFactory::build(strategy, sources);
        Ok(Self {
            strategy,
            bindings,
            traversal,
            filter,
            steps: 0,
            contributing: 0,
        })
    }
}

impl<V> Stepper<'_, V> {
    /// Move to the next step that passes the filter.
    ///
    /// Returns `Ok(true)` with that step bound, or `Ok(false)` once the
    /// traversal is exhausted.
    pub(crate) fn advance(&mut self) -> Result<bool> {
        while let Some(step) = self.traversal.next() {
            self.steps += 1;
            self.bindings.merge_step(step);
            if self.filter.evaluate(&self.bindings)? {
                self.contributing += 1;
                return Ok(true);
            }
            StepFiltered { step: self.steps }.log();
        }
        Ok(false)
    }

    pub(crate) fn bindings(&self) -> &Bindings<V> {
        &self.bindings
    }

    pub(crate) fn apply(&mut self, updates: Vec<(usize, V)>) {
        self.bindings.apply_updates(updates);
    }

    pub(crate) fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Steps pulled from the traversal so far.
    pub(crate) fn steps(&self) -> usize {
        self.steps
    }

    /// Steps that passed the filter so far.
    pub(crate) fn contributing(&self) -> usize {
        self.contributing
    }

    pub(crate) fn finish(self) -> Bindings<V> {
        self.bindings.into_terminal()
    }
}
