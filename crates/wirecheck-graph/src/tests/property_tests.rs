//! Property-based tests for wirecheck-graph using proptest.
//!
//! Run with: cargo test --features proptest --package wirecheck-graph property_tests

#![cfg(feature = "proptest")]

use crate::{ProviderDescriptor, TypeKey, build_graph, categorize};
use proptest::prelude::*;
use std::collections::HashMap;

fn type_name(index: usize) -> String {
    format!("T{index}")
}

/// Arbitrary providers over a small type alphabet: cycles, runtime inputs and
/// shared return types all occur.
fn providers_strategy() -> impl Strategy<Value = Vec<ProviderDescriptor>> {
    prop::collection::vec((0usize..8, prop::collection::vec(0usize..12, 0..4)), 0..12).prop_map(
        |specs| {
            specs
                .into_iter()
                .enumerate()
                .map(|(i, (returns, params))| {
                    ProviderDescriptor::new(format!("p{i}"), type_name(returns))
                        .with_parameters(params.into_iter().map(type_name))
                })
                .collect()
        },
    )
}

/// Providers where provider `i` returns `T{i}` and only depends on lower
/// indices (or on types nobody produces), so a valid order always exists.
fn dag_strategy() -> impl Strategy<Value = Vec<ProviderDescriptor>> {
    (1usize..12)
        .prop_flat_map(|count| {
            prop::collection::vec(prop::collection::vec(0usize..100, 0..4), count)
        })
        .prop_map(|param_seeds| {
            param_seeds
                .into_iter()
                .enumerate()
                .map(|(i, seeds)| {
                    let mut params: Vec<String> = Vec::new();
                    for seed in seeds {
                        let dependency = if i > 0 && seed % 3 != 0 {
                            type_name(seed % i)
                        } else {
                            format!("Runtime{seed}")
                        };
                        if !params.contains(&dependency) {
                            params.push(dependency);
                        }
                    }
                    ProviderDescriptor::new(format!("p{i}"), type_name(i)).with_parameters(params)
                })
                .collect()
        })
}

fn counts(keys: impl IntoIterator<Item = TypeKey>) -> HashMap<TypeKey, usize> {
    let mut map = HashMap::new();
    for key in keys {
        *map.entry(key).or_insert(0) += 1;
    }
    map
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Property: provided ⊎ runtime == parameters, as multisets.
    #[test]
    fn prop_partition_is_total(descriptors in providers_strategy()) {
        for node in categorize(descriptors) {
            let partitioned = counts(
                node.provided_dependency_types()
                    .iter()
                    .chain(node.runtime_dependency_types())
                    .cloned(),
            );
            prop_assert_eq!(partitioned, counts(node.parameter_types().iter().cloned()));
        }
    }

    /// Property: categorizing twice yields identical edge sets.
    #[test]
    fn prop_categorization_is_idempotent(descriptors in providers_strategy()) {
        prop_assert_eq!(categorize(descriptors.clone()), categorize(descriptors));
    }

    /// Property: a node's edge sets do not depend on input order.
    #[test]
    fn prop_categorization_ignores_input_order(descriptors in providers_strategy()) {
        let forward = categorize(descriptors.clone());
        let mut reversed = categorize(descriptors.into_iter().rev());
        reversed.reverse();
        prop_assert_eq!(forward, reversed);
    }

    /// Property: in a successful graph every internal dependency of a node is
    /// produced by an earlier node.
    #[test]
    fn prop_valid_order(descriptors in dag_strategy()) {
        let categorized = categorize(descriptors.clone());
        let graph = build_graph(descriptors).expect("dag always sorts");
        prop_assert_eq!(graph.len(), categorized.len());

        for (position, node) in graph.iter().enumerate() {
            let original = categorized
                .iter()
                .find(|candidate| candidate.name() == node.name())
                .expect("node came from input");
            for dependency in original.provided_dependency_types() {
                prop_assert!(
                    graph.nodes()[..position]
                        .iter()
                        .any(|earlier| earlier.return_type() == dependency),
                    "{} placed before a producer of {}",
                    node.name(),
                    dependency
                );
            }
        }
    }

    /// Property: every outcome is deterministic for identical input.
    #[test]
    fn prop_build_is_deterministic(descriptors in providers_strategy()) {
        prop_assert_eq!(build_graph(descriptors.clone()), build_graph(descriptors));
    }
}
