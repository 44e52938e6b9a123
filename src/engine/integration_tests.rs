use std::cell::Cell;

use proptest::prelude::*;

use crate::engine::{transform, Bindings, Body, Comprehension, Projector, Strategy, Update};
use crate::errors::EngineError;

/// End-to-end runs of the engine through its public builder.
#[cfg(test)]
mod tests {
    use super::*;

    fn counting<'a>() -> Body<'a, i64> {
        Body::by_position(vec![transform(|b: &Bindings<i64>| {
            Ok(Update::value(b.get("count")? + 1))
        })])
    }

    fn count_steps(strategy: Strategy, sources: Vec<Vec<i64>>) -> i64 {
        let mut comprehension = Comprehension::new(strategy).accumulator("count", 0);
        for (i, values) in sources.into_iter().enumerate() {
            comprehension = comprehension.source(format!("s{}", i), values);
        }
        comprehension.body(counting()).select("count").run().unwrap()
    }

    #[test]
    fn test_sum_of_evens() {
        let total = Comprehension::synchronized()
            .accumulator("total", 0)
            .source("n", vec![1, 2, 3, 4])
            .when(|b: &Bindings<i64>| Ok(b.get("n")? % 2 == 0))
            .body(Body::by_name(|b: &Bindings<i64>| {
                Ok(Update::set("total", b.get("total")? + b.get("n")?))
            }))
            .select("total")
            .run();
        assert_eq!(total, Ok(6));
    }

    #[test]
    fn test_two_accumulators_by_position() {
        let result = Comprehension::synchronized()
            .accumulator("sum", 0)
            .accumulator("product", 1)
            .source("n", vec![3, 4, 5])
            .body(Body::by_position(vec![
                transform(|b: &Bindings<i64>| Ok(Update::value(b.get("sum")? + b.get("n")?))),
                transform(|b: &Bindings<i64>| Ok(Update::value(b.get("product")? * b.get("n")?))),
            ]))
            .result(Projector::new(|b: &Bindings<i64>| {
                Ok((*b.get("sum")?, *b.get("product")?))
            }))
            .run();
        assert_eq!(result, Ok((12, 60)));
    }

    #[test]
    fn test_by_position_over_two_sources() {
        let result = Comprehension::synchronized()
            .accumulator("sum1", 0)
            .accumulator("sum2", 0)
            .source("a", vec![1, 2, 3])
            .source("b", vec![10, 20, 30])
            .body(Body::by_position(vec![
                transform(|b: &Bindings<i64>| Ok(Update::value(b.get("sum1")? + b.get("a")?))),
                transform(|b: &Bindings<i64>| Ok(Update::value(b.get("sum2")? + b.get("b")?))),
            ]))
            .result(Projector::new(|b: &Bindings<i64>| {
                Ok((*b.get("sum1")?, *b.get("sum2")?))
            }))
            .run();
        assert_eq!(result, Ok((6, 60)));
    }

    #[test]
    fn test_default_projection_is_every_accumulator() {
        let terminal = Comprehension::synchronized()
            .accumulator("sum", 0)
            .accumulator("product", 1)
            .source("n", 1..=4)
            .body(Body::by_name(|b: &Bindings<i64>| {
                let n = *b.get("n")?;
                Ok(Update::named([
                    ("sum", b.get("sum")? + n),
                    ("product", b.get("product")? * n),
                ]))
            }))
            .run()
            .unwrap();
        let map = terminal.into_map();
        assert_eq!(map.len(), 2);
        assert_eq!(map["sum"], 10);
        assert_eq!(map["product"], 24);
    }

    #[test]
    fn test_updates_are_simultaneous() {
        let terminal = Comprehension::synchronized()
            .accumulator("a", 1)
            .accumulator("b", 2)
            .source("n", vec![0])
            .body(Body::by_name_all(vec![
                transform(|b: &Bindings<i64>| Ok(Update::set("a", *b.get("b")?))),
                transform(|b: &Bindings<i64>| Ok(Update::set("b", *b.get("a")?))),
            ]))
            .run()
            .unwrap();
        assert_eq!(
            terminal.into_vec(),
            vec![("a".to_string(), 2), ("b".to_string(), 1)]
        );
    }

    #[test]
    fn test_exhaustive_pairs_reach_the_body_in_order() {
        let pairs = Comprehension::exhaustive()
            .accumulator("seen", Vec::new())
            .source("x", vec![vec![1], vec![2]])
            .source("y", vec![vec![10], vec![20], vec![30]])
            .body(Body::by_position(vec![transform(|b: &Bindings<Vec<i64>>| {
                let mut seen = b.get("seen")?.clone();
                seen.push(b.get("x")?[0] + b.get("y")?[0]);
                Ok(Update::value(seen))
            })]))
            .select("seen")
            .run();
        assert_eq!(pairs, Ok(vec![11, 21, 31, 12, 22, 32]));
    }

    #[test]
    fn test_step_counts_per_strategy() {
        let sources = vec![vec![1, 2, 3], vec![1, 2], vec![1, 2, 3, 4]];
        assert_eq!(count_steps(Strategy::Synchronized, sources.clone()), 2);
        assert_eq!(count_steps(Strategy::Exhaustive, sources), 24);
    }

    #[test]
    fn test_empty_sources_leave_initial_values() {
        assert_eq!(count_steps(Strategy::Synchronized, vec![vec![]]), 0);
        assert_eq!(count_steps(Strategy::Exhaustive, vec![vec![1, 2], vec![]]), 0);
        assert_eq!(count_steps(Strategy::Synchronized, vec![]), 0);
        assert_eq!(count_steps(Strategy::Exhaustive, vec![]), 1);
    }

    #[test]
    fn test_unbound_name_in_body_aborts_the_run() {
        let result = Comprehension::synchronized()
            .accumulator("total", 0)
            .source("n", vec![1, 2, 3])
            .body(Body::by_name(|b: &Bindings<i64>| {
                Ok(Update::set("total", b.get("total")? + b.get("m")?))
            }))
            .run();
        assert_eq!(
            result.unwrap_err(),
            EngineError::UnboundVariable {
                name: "m".to_string()
            }
        );
    }

    #[test]
    fn test_filter_error_aborts_before_the_body() {
        let calls = Cell::new(0);
        let result = Comprehension::synchronized()
            .accumulator("total", 0)
            .source("n", vec![1, 2, 3])
            .when(|b: &Bindings<i64>| Ok(*b.get("missing")? > 0))
            .body(Body::by_name(|b: &Bindings<i64>| {
                calls.set(calls.get() + 1);
                Ok(Update::set("total", *b.get("n")?))
            }))
            .run();
        assert!(matches!(result, Err(EngineError::UnboundVariable { .. })));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_unknown_key_aborts_the_run() {
        let result = Comprehension::synchronized()
            .accumulator("total", 0)
            .source("n", vec![1])
            .body(Body::by_name(|b: &Bindings<i64>| Ok(Update::set("totl", *b.get("n")?))))
            .run();
        assert_eq!(
            result.unwrap_err(),
            EngineError::UnknownAccumulatorKey {
                key: "totl".to_string()
            }
        );
    }

    #[test]
    fn test_sources_are_pulled_lazily_in_lock_step() {
        let pulled = Cell::new(0);
        let total = Comprehension::synchronized()
            .accumulator("total", 0)
            .source("n", (1..).inspect(|_| pulled.set(pulled.get() + 1)))
            .source("m", vec![1, 1, 1])
            .body(Body::by_name(|b: &Bindings<i64>| {
                Ok(Update::set("total", b.get("total")? + b.get("n")? * b.get("m")?))
            }))
            .select("total")
            .run();
        assert_eq!(total, Ok(6));
        assert_eq!(pulled.get(), 4);
    }

    proptest! {
        #[test]
        fn prop_synchronized_steps_match_shortest_source(
            sources in prop::collection::vec(prop::collection::vec(any::<i64>(), 0..8), 1..4)
        ) {
            let shortest = sources.iter().map(Vec::len).min().unwrap_or(0) as i64;
            prop_assert_eq!(count_steps(Strategy::Synchronized, sources), shortest);
        }

        #[test]
        fn prop_exhaustive_steps_match_length_product(
            sources in prop::collection::vec(prop::collection::vec(any::<i64>(), 0..5), 1..4)
        ) {
            let product: usize = sources.iter().map(Vec::len).product();
            prop_assert_eq!(count_steps(Strategy::Exhaustive, sources), product as i64);
        }

        #[test]
        fn prop_filtered_sum_matches_iterator(values in prop::collection::vec(-1000i64..1000, 0..32)) {
            let expected: i64 = values.iter().filter(|n| *n % 3 == 0).sum();
            let total = Comprehension::synchronized()
                .accumulator("total", 0)
                .source("n", values)
                .when(|b: &Bindings<i64>| Ok(b.get("n")? % 3 == 0))
                .body(Body::by_name(|b: &Bindings<i64>| {
                    Ok(Update::set("total", b.get("total")? + b.get("n")?))
                }))
                .select("total")
                .run();
            prop_assert_eq!(total, Ok(expected));
        }

        #[test]
        fn prop_runs_are_repeatable(values in prop::collection::vec(-50i64..50, 0..16)) {
            let run = |values: Vec<i64>| {
                Comprehension::exhaustive()
                    .accumulator("acc", 0)
                    .source("x", values.clone())
                    .source("y", values)
                    .body(Body::by_position(vec![transform(|b: &Bindings<i64>| {
                        let step = b.get("x")? - b.get("y")?;
                        Ok(Update::value(b.get("acc")?.wrapping_mul(3).wrapping_add(step)))
                    })]))
                    .select("acc")
                    .run()
            };
            prop_assert_eq!(run(values.clone()), run(values));
        }
    }
}
