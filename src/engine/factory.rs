// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;
use std::fmt;

use crate::engine::exhaustive::Exhaustive;
use crate::engine::synchronized::Synchronized;
use crate::traits::{Source, Traversal};

/// How the sources of a run are walked.
///
/// # Variants
/// * `Synchronized` - Lock-step across sources, bounded by the shortest
/// * `Exhaustive` - Full cross product, last-declared source innermost
#[derive(Debug, Default, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    #[default]
    Synchronized,
    Exhaustive,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Synchronized => "synchronized",
            Strategy::Exhaustive => "exhaustive",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Factory for creating traversals from a strategy
pub struct TraversalFactory;

impl TraversalFactory {
    /// Create a traversal over `sources` (in declared order) for the given strategy
    pub fn build<'a, V: Clone + 'a>(
        strategy: Strategy,
        sources: Vec<Source<'a, V>>,
    ) -> Box<dyn Traversal<V> + 'a> {
        match strategy {
            Strategy::Synchronized => Box::new(Synchronized::new(sources)),
            Strategy::Exhaustive => Box::new(Exhaustive::new(sources)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sources<'a>() -> Vec<Source<'a, i32>> {
        vec![Box::new(vec![1, 2, 3].into_iter()), Box::new(vec![4, 5].into_iter())]
    }

    #[test]
    fn test_factory_selects_strategy() {
        let sync = TraversalFactory::build(Strategy::Synchronized, sources());
        assert_eq!(sync.name(), "synchronized");
        assert_eq!(sync.count(), 2);

        let nested = TraversalFactory::build(Strategy::Exhaustive, sources());
        assert_eq!(nested.name(), "exhaustive");
        assert_eq!(nested.count(), 6);
    }

    #[test]
    fn test_strategy_deserializes_snake_case() {
        let strategy: Strategy = serde_yaml::from_str("exhaustive").unwrap();
        assert_eq!(strategy, Strategy::Exhaustive);
        assert_eq!(Strategy::default(), Strategy::Synchronized);
    }
}
