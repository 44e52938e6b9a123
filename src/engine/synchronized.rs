// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::traits::{Source, Step, Traversal};

/// Lock-step traversal: one step per position, ending when any source runs out.
///
/// Sources need not have equal lengths; the shortest one decides how many
/// steps are produced and no error is raised for the mismatch. With no
/// sources at all there are no steps.
pub struct Synchronized<'a, V> {
    sources: Vec<Source<'a, V>>,
    done: bool,
}

impl<'a, V> Synchronized<'a, V> {
    pub fn new(sources: Vec<Source<'a, V>>) -> Self {
        let done = sources.is_empty();
        Self { sources, done }
    }
}

impl<V> Iterator for Synchronized<'_, V> {
    type Item = Step<V>;

    fn next(&mut self) -> Option<Step<V>> {
        if self.done {
            return None;
        }

        let mut step = Vec::with_capacity(self.sources.len());
        for source in self.sources.iter_mut() {
            match source.next() {
                Some(value) => step.push(value),
                None => {
                    self.done = true;
                    return None;
                }
            }
        }
        Some(step)
    }
}

impl<V> Traversal<V> for Synchronized<'_, V> {
    fn name(&self) -> &'static str {
        "synchronized"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxed<'a>(values: Vec<i32>) -> Source<'a, i32> {
        Box::new(values.into_iter())
    }

    #[test]
    fn test_lock_step_pairs_values_by_position() {
        let steps: Vec<_> =
            Synchronized::new(vec![boxed(vec![1, 2, 3]), boxed(vec![10, 20, 30])]).collect();
        assert_eq!(steps, vec![vec![1, 10], vec![2, 20], vec![3, 30]]);
    }

    #[test]
    fn test_shortest_source_wins() {
        let steps: Vec<_> =
            Synchronized::new(vec![boxed(vec![1, 2, 3, 4]), boxed(vec![10, 20])]).collect();
        assert_eq!(steps, vec![vec![1, 10], vec![2, 20]]);
    }

    #[test]
    fn test_no_sources_means_no_steps() {
        assert_eq!(Synchronized::<i32>::new(vec![]).count(), 0);
    }

    #[test]
    fn test_infinite_source_is_bounded_by_finite_partner() {
        let steps: Vec<_> =
            Synchronized::new(vec![Box::new(0..) as Source<i32>, boxed(vec![5, 6])]).collect();
        assert_eq!(steps, vec![vec![0, 5], vec![1, 6]]);
    }

    #[test]
    fn test_is_fused_after_exhaustion() {
        let mut traversal = Synchronized::new(vec![boxed(vec![1])]);
        assert_eq!(traversal.next(), Some(vec![1]));
        assert_eq!(traversal.next(), None);
        assert_eq!(traversal.next(), None);
    }
}
