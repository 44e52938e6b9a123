// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::traits::{Source, Step, Traversal};

enum State {
    Fresh,
    Running,
    Done,
}

/// Cross-product traversal, equivalent to nested loops in declared order.
///
/// The first-declared source is the outermost loop and varies slowest; the
/// last-declared source is the innermost loop and varies fastest.
///
/// The outermost source is streamed, so it may be infinite. Every inner
/// source has to be replayed once per outer value, so inner sources are
/// buffered in full on the first pull. With no sources there is exactly one
/// (empty) step; if any source is empty there are none.
pub struct Exhaustive<'a, V> {
    outer: Option<Source<'a, V>>,
    inner: Vec<Source<'a, V>>,
    pools: Vec<Vec<V>>,
    head: Option<V>,
    odometer: Vec<usize>,
    state: State,
}

impl<'a, V: Clone> Exhaustive<'a, V> {
    pub fn new(sources: Vec<Source<'a, V>>) -> Self {
        let mut sources = sources.into_iter();
        let outer = sources.next();
        Self {
            outer,
            inner: sources.collect(),
            pools: Vec::new(),
            head: None,
            odometer: Vec::new(),
            state: State::Fresh,
        }
    }

    fn start(&mut self) -> Option<Step<V>> {
        if self.outer.is_none() {
            self.state = State::Done;
            return Some(Vec::new());
        }

        self.pools = self.inner.drain(..).map(|source| source.collect()).collect();
        if self.pools.iter().any(Vec::is_empty) {
            self.state = State::Done;
            return None;
        }
        self.odometer = vec![0; self.pools.len()];
        self.state = State::Running;
        self.advance_outer()
    }

    /// Move the outermost source forward and restart the inner loops.
    fn advance_outer(&mut self) -> Option<Step<V>> {
        match self.outer.as_mut().and_then(|outer| outer.next()) {
            Some(value) => {
                self.head = Some(value);
                self.odometer.iter_mut().for_each(|i| *i = 0);
                self.current()
            }
            None => {
                self.state = State::Done;
                self.head = None;
                None
            }
        }
    }

    /// Tick the innermost position, carrying into outer positions on wrap.
    fn advance_inner(&mut self) -> Option<Step<V>> {
        for position in (0..self.odometer.len()).rev() {
            self.odometer[position] += 1;
            if self.odometer[position] < self.pools[position].len() {
                return self.current();
            }
            self.odometer[position] = 0;
        }
        self.advance_outer()
    }

    fn current(&self) -> Option<Step<V>> {
        let head = self.head.clone()?;
        let mut step = Vec::with_capacity(self.pools.len() + 1);
        step.push(head);
        step.extend(
            self.odometer
                .iter()
                .zip(self.pools.iter())
                .map(|(i, pool)| pool[*i].clone()),
        );
        Some(step)
    }
}

impl<V: Clone> Iterator for Exhaustive<'_, V> {
    type Item = Step<V>;

    fn next(&mut self) -> Option<Step<V>> {
        match self.state {
            State::Fresh => self.start(),
            State::Running => self.advance_inner(),
            State::Done => None,
        }
    }
}

impl<V: Clone> Traversal<V> for Exhaustive<'_, V> {
    fn name(&self) -> &'static str {
        "exhaustive"
    }
}
