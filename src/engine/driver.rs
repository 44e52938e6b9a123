// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The engine driver.
//!
//! A [`Comprehension`] is configured through a closed set of [`Operation`]s
//! and then driven in one of three ways:
//!
//! * [`Comprehension::run`] walks every step, applies body updates on steps
//!   that pass the filter, and projects the terminal environment.
//! * [`Comprehension::search`] visits passing steps and stops at the first
//!   decisive one without pulling any further step.
//! * [`Comprehension::generate`] returns a lazy [`Generator`] of per-step results.
//!
//! # Example
//!
//! ```
//! use comps::engine::{Bindings, Body, Comprehension, Update};
//!
//! let sum_and_product = Comprehension::synchronized()
//!     .accumulator("sum", 0)
//!     .accumulator("product", 1)
//!     .source("n", vec![1, 2, 3, 4])
//!     .body(Body::by_name(|b: &Bindings<i64>| {
//!         let n = *b.get("n")?;
//!         Ok(Update::named([
//!             ("sum", b.get("sum")? + n),
//!             ("product", b.get("product")? * n),
//!         ]))
//!     }))
//!     .run()
//!     .unwrap();
//!
//! assert_eq!(
//!     sum_and_product.into_vec(),
//!     vec![("sum".to_string(), 10), ("product".to_string(), 24)]
//! );
//! ```

use std::ops::ControlFlow;
use std::time::Instant;

use crate::engine::bindings::Bindings;
use crate::engine::factory::Strategy;
use crate::engine::filter::Filter;
use crate::engine::generator::Generator;
use crate::engine::projector::Projector;
use crate::engine::stepper::Stepper;
use crate::engine::update::Body;
use crate::errors::{EngineError, Result};
use crate::observability::messages::engine::{RunCompleted, RunFailed, RunStarted, ShortCircuited};
use crate::observability::messages::StructuredLog;
use crate::traits::Source;

/// The builder operations a comprehension accepts.
pub enum Operation<'a, V, R> {
    /// Declare an accumulator and its initial value.
    AddAccumulator { name: String, initial: V },
    /// Declare a named source.
    AddSource { name: String, source: Source<'a, V> },
    /// Replace the filter.
    SetFilter(Filter<'a, V>),
    /// Replace the body.
    SetBody(Body<'a, V>),
    /// Replace the result projector.
    SetResult(Projector<'a, V, R>),
}

/// A configured iteration-and-accumulation run.
///
/// The traversal strategy is fixed at construction. Without a result
/// projector the run returns the terminal [`Bindings`] (every accumulator, in
/// declared order).
pub struct Comprehension<'a, V, R = Bindings<V>> {
    strategy: Strategy,
    accumulators: Vec<(String, V)>,
    sources: Vec<(String, Source<'a, V>)>,
    filter: Filter<'a, V>,
    body: Option<Body<'a, V>>,
    projector: Projector<'a, V, R>,
}

impl<'a, V: Clone + 'a> Comprehension<'a, V> {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            accumulators: Vec::new(),
            sources: Vec::new(),
            filter: Filter::always(),
            body: None,
            projector: Projector::accumulators(),
        }
    }

    /// Lock-step iteration, bounded by the shortest source.
    pub fn synchronized() -> Self {
        Self::new(Strategy::Synchronized)
    }

    /// Cross-product iteration, last-declared source innermost.
    pub fn exhaustive() -> Self {
        Self::new(Strategy::Exhaustive)
    }
}

impl<'a, V: Clone + 'a, R> Comprehension<'a, V, R> {
    /// Apply one builder operation.
    pub fn apply(&mut self, operation: Operation<'a, V, R>) -> &mut Self {
        match operation {
            Operation::AddAccumulator { name, initial } => self.accumulators.push((name, initial)),
            Operation::AddSource { name, source } => self.sources.push((name, source)),
            Operation::SetFilter(filter) => self.filter = filter,
            Operation::SetBody(body) => self.body = Some(body),
            Operation::SetResult(projector) => self.projector = projector,
        }
        self
    }

    pub fn accumulator(mut self, name: impl Into<String>, initial: V) -> Self {
        self.apply(Operation::AddAccumulator {
            name: name.into(),
            initial,
        });
        self
    }

    pub fn source<I>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        I::IntoIter: 'a,
    {
        self.apply(Operation::AddSource {
            name: name.into(),
            source: Box::new(values.into_iter()),
        });
        self
    }

    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Bindings<V>) -> Result<bool> + 'a,
    {
        self.apply(Operation::SetFilter(Filter::new(predicate)));
        self
    }

    pub fn body(mut self, body: Body<'a, V>) -> Self {
        self.apply(Operation::SetBody(body));
        self
    }

    /// Replace the projector, changing the result type.
    pub fn result<R2>(self, projector: Projector<'a, V, R2>) -> Comprehension<'a, V, R2> {
        Comprehension {
            strategy: self.strategy,
            accumulators: self.accumulators,
            sources: self.sources,
            filter: self.filter,
            body: self.body,
            projector,
        }
    }

    /// Return only the final value of the named accumulator.
    pub fn select(self, name: impl Into<String>) -> Comprehension<'a, V, V> {
        self.result(Projector::select(name))
    }

    /// Drive the traversal to completion and project the terminal environment.
    ///
    /// Fails before the first step with [`EngineError::MissingBody`],
    /// [`EngineError::DuplicateName`] or [`EngineError::ArityMismatch`];
    /// fails mid-run on the first error from the update protocol or from a
    /// caller-supplied function. A failed run yields no result.
    pub fn run(self) -> Result<R> {
        let strategy = self.strategy;
        let result = self.drive();
        if let Err(error) = &result {
            RunFailed {
                strategy: strategy.as_str(),
                error,
            }
            .log();
        }
        result
    }

    fn drive(self) -> Result<R> {
        let Comprehension {
            strategy,
            accumulators,
            sources,
            filter,
            body,
            projector,
        } = self;

        let body = body.ok_or(EngineError::MissingBody)?;
        body.validate(accumulators.len())?;

        let started = RunStarted {
            strategy: strategy.as_str(),
            mode: body.mode().as_str(),
            accumulator_count: accumulators.len(),
            source_count: sources.len(),
        };
        let span = started.span("run");
        let _guard = span.enter();
        started.log();

        let start_time = Instant::now();
        let mut stepper = Stepper::new(strategy, accumulators, sources, filter)?;
        while stepper.advance()? {
            let updates = body.compute(stepper.bindings())?;
            stepper.apply(updates);
        }

        RunCompleted {
            strategy: strategy.as_str(),
            steps: stepper.steps(),
            contributing: stepper.contributing(),
            duration: start_time.elapsed(),
        }
        .log();

        projector.project(stepper.finish())
    }

    /// Visit each step that passes the filter until `visit` breaks.
    ///
    /// Returns the break value, or `None` if the traversal ran out first. No
    /// step after the deciding one is pulled from the sources. Accumulators
    /// are bound at their initial values; the body and projector are not used.
    pub fn search<T, F>(self, mut visit: F) -> Result<Option<T>>
    where
        F: FnMut(&Bindings<V>) -> Result<ControlFlow<T>>,
    {
        let strategy = self.strategy;
        let result = Stepper::new(strategy, self.accumulators, self.sources, self.filter)
            .and_then(|mut stepper| {
                while stepper.advance()? {
                    if let ControlFlow::Break(found) = visit(stepper.bindings())? {
                        ShortCircuited {
                            strategy: strategy.as_str(),
                            step: stepper.steps(),
                        }
                        .log();
                        return Ok(Some(found));
                    }
                }
                Ok(None)
            });

        if let Err(error) = &result {
            RunFailed {
                strategy: strategy.as_str(),
                error,
            }
            .log();
        }
        result
    }

    /// A lazy sequence of `body` results, one per step that passes the filter.
    ///
    /// Name clashes are reported here; everything else surfaces as items.
    pub fn generate<T, F>(self, body: F) -> Result<Generator<'a, V, T>>
    where
        F: FnMut(&Bindings<V>) -> Result<T> + 'a,
    {
        let stepper = Stepper::new(self.strategy, self.accumulators, self.sources, self.filter)?;
        Ok(Generator::new(stepper, Box::new(body)))
    }
}
