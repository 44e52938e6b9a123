// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::iter::FusedIterator;

use crate::engine::bindings::Bindings;
use crate::engine::stepper::Stepper;
use crate::errors::Result;
use crate::observability::messages::{engine::GeneratorExhausted, StructuredLog};

/// Per-step body of a lazy sequence.
pub type Yield<'a, V, T> = Box<dyn FnMut(&Bindings<V>) -> Result<T> + 'a>;

/// A deferred, single-pass sequence of body results, one per step that passes the filter.
///
/// Nothing is pulled from the sources until the consumer asks for an item,
/// and each pull resumes the traversal where the previous one stopped, so
/// infinite sources are fine. Dropping the generator releases the sources.
/// The first error ends the sequence.
pub struct Generator<'a, V, T> {
    stepper: Option<Stepper<'a, V>>,
    body: Yield<'a, V, T>,
    yielded: usize,
}

impl<'a, V, T> Generator<'a, V, T> {
    pub(crate) fn new(stepper: Stepper<'a, V>, body: Yield<'a, V, T>) -> Self {
        Self {
            stepper: Some(stepper),
            body,
            yielded: 0,
        }
    }
}

impl<V, T> Iterator for Generator<'_, V, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Result<T>> {
        let stepper = self.stepper.as_mut()?;
        match stepper.advance() {
            Ok(true) => {
                let item = (self.body)(stepper.bindings());
                match item {
                    Ok(_) => self.yielded += 1,
                    Err(_) => self.stepper = None,
                }
                Some(item)
            }
            Ok(false) => {
                GeneratorExhausted {
                    strategy: stepper.strategy().as_str(),
                    yielded: self.yielded,
                }
                .log();
                self.stepper = None;
                None
            }
            Err(error) => {
                self.stepper = None;
                Some(Err(error))
            }
        }
    }
}

impl<V, T> FusedIterator for Generator<'_, V, T> {}
