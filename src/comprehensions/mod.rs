// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Ready-made comprehensions over [`Value`].
//!
//! [`For`] gathers the named sources and an optional filter, then a finishing
//! method picks the accumulation:
//!
//! | method        | result                                              |
//! |---------------|-----------------------------------------------------|
//! | `fold`        | the engine builder, for custom accumulators          |
//! | `sum`         | `0` plus the body of every passing step              |
//! | `product`     | `1` times the body of every passing step             |
//! | `list`        | `List` of body results                               |
//! | `tuple`       | `Tuple` of body results                              |
//! | `set`         | `Set` of body results                                |
//! | `map`         | `Map` from `(key, value)` body results, last wins    |
//! | `all` / `any` | `bool`, stopping at the first deciding step          |
//! | `first`       | body of the first passing step                       |
//! | `last`        | body of the last passing step                        |
//! | `generate`    | lazy [`Generator`](crate::engine::Generator) of body results |
//!
//! Collectors are folds over one hidden accumulator whose name is not a valid
//! identifier, so it never collides with a source name.
//!
//! # Example
//!
//! ```
//! use comps::comprehensions::For;
//!
//! let squares = For::synchronized()
//!     .source("n", 1..=6i64)
//!     .when(|b| Ok(b.get("n")?.as_int()? % 2 == 0))
//!     .list(|b| b.get("n")?.mul(b.get("n")?))
//!     .unwrap();
//!
//! assert_eq!(squares.to_string(), "[4, 16, 36]");
//! ```

mod arithmetic;
mod collect;
mod generate;
mod quantify;
mod select;

use crate::engine::{transform, Bindings, Body, Comprehension, Filter, Operation, Strategy, Update};
use crate::errors::Result;
use crate::traits::Source;
use crate::value::Value;

/// Name of the accumulator behind every collector.
const RESULT: &str = "#result";

/// Sources and filter shared by every specialization.
pub struct For<'a> {
    strategy: Strategy,
    sources: Vec<(String, Source<'a, Value>)>,
    filter: Filter<'a, Value>,
}

impl<'a> For<'a> {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            sources: Vec::new(),
            filter: Filter::always(),
        }
    }

    pub fn synchronized() -> Self {
        Self::new(Strategy::Synchronized)
    }

    pub fn exhaustive() -> Self {
        Self::new(Strategy::Exhaustive)
    }

    pub fn source<I>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value> + 'a,
        I::IntoIter: 'a,
    {
        self.sources
            .push((name.into(), Box::new(values.into_iter().map(Into::into))));
        self
    }

    /// Declare a source that is already a boxed stream of values.
    pub fn boxed_source(mut self, name: impl Into<String>, source: Source<'a, Value>) -> Self {
        self.sources.push((name.into(), source));
        self
    }

    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Bindings<Value>) -> Result<bool> + 'a,
    {
        self.filter = Filter::new(predicate);
        self
    }

    /// The engine builder with these sources and filter already applied.
    ///
    /// Declare accumulators and a body on the returned builder.
    pub fn fold(self) -> Comprehension<'a, Value> {
        let mut comprehension = Comprehension::new(self.strategy);
        for (name, source) in self.sources {
            comprehension.apply(Operation::AddSource { name, source });
        }
        comprehension.apply(Operation::SetFilter(self.filter));
        comprehension
    }

    /// Fold each passing step into the hidden accumulator.
    fn collect<F>(self, initial: Value, step: F) -> Result<Value>
    where
        F: Fn(&Value, &Bindings<Value>) -> Result<Value> + 'a,
    {
        self.fold()
            .accumulator(RESULT, initial)
            .body(Body::by_position(vec![transform(
                move |b: &Bindings<Value>| Ok(Update::value(step(b.get(RESULT)?, b)?)),
            )]))
            .select(RESULT)
            .run()
    }
}
