//! Kahn-style topological sort over categorized provider nodes.
//!
//! Nodes live in an arena owned by one call; edges are consumed in place.
//! The ready worklist is a stack, so when several nodes become ready at once
//! the most recently readied one is emitted first.

use tracing::{debug, trace};

use crate::{DependencyNode, GraphError, UnresolvedProvider};

/// Order `nodes` so that every provider follows the providers it internally
/// depends on.
///
/// Ties among simultaneously ready nodes are broken last-in first-out. Each
/// completed producer removes one matching edge from every dependent, so a
/// node listing the same internal type twice is never drained and is
/// reported in [`GraphError::CycleDetected`].
pub fn topological_sort(nodes: Vec<DependencyNode>) -> Result<Vec<DependencyNode>, GraphError> {
    let mut arena = nodes;

    let mut ready: Vec<usize> = arena
        .iter()
        .enumerate()
        .filter(|(_, node)| node.has_no_incoming_edges())
        .map(|(index, _)| index)
        .collect();

    if ready.is_empty() {
        return Err(GraphError::NoStartNode {
            providers: arena.iter().map(|node| node.name().to_string()).collect(),
        });
    }

    let mut order = Vec::with_capacity(arena.len());
    while let Some(index) = ready.pop() {
        order.push(index);
        let produced = arena[index].return_type().clone();

        for (candidate, node) in arena.iter_mut().enumerate() {
            if !node.has_incoming_edge_on(&produced) {
                continue;
            }
            node.remove_incoming_edge_on(&produced);
            if node.has_no_incoming_edges() {
                trace!(provider = node.name(), after = %produced, "provider ready");
                ready.push(candidate);
            }
        }
    }

    let unresolved: Vec<UnresolvedProvider> = arena
        .iter()
        .filter(|node| !node.has_no_incoming_edges())
        .map(|node| UnresolvedProvider {
            name: node.name().to_string(),
            waiting_on: node.provided_dependency_types().to_vec(),
        })
        .collect();
    if !unresolved.is_empty() {
        return Err(GraphError::CycleDetected { unresolved });
    }

    debug!(providers = order.len(), "sorted provider graph");

    let mut slots: Vec<Option<DependencyNode>> = arena.into_iter().map(Some).collect();
    Ok(order
        .into_iter()
        .filter_map(|index| slots[index].take())
        .collect())
}
