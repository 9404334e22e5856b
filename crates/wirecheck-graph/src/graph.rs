use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::categorize::categorize;
use crate::sort::topological_sort;
use crate::{DependencyNode, GraphError, ProviderDescriptor, TypeKey};

/// Providers in a valid construction order.
///
/// Every provider appears after all providers it internally depends on.
/// The nodes are fully drained: their `provided_dependency_types` are empty,
/// their `runtime_dependency_types` still list what the caller must supply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyGraph {
    nodes: Vec<DependencyNode>,
}

impl DependencyGraph {
    /// Categorize the descriptors and sort them into a build order.
    pub fn build(descriptors: Vec<ProviderDescriptor>) -> Result<Self, GraphError> {
        let nodes = topological_sort(categorize(descriptors))?;
        Ok(Self { nodes })
    }

    /// Nodes in build order.
    pub fn nodes(&self) -> &[DependencyNode] {
        &self.nodes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DependencyNode> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Provider names in build order.
    pub fn build_order(&self) -> Vec<&str> {
        self.nodes.iter().map(DependencyNode::name).collect()
    }

    /// Position of the first provider with the given name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.nodes.iter().position(|node| node.name() == name)
    }

    /// Distinct types that must be supplied at run time, in first-seen order.
    pub fn runtime_dependency_types(&self) -> Vec<&TypeKey> {
        let mut seen = FxHashSet::default();
        self.nodes
            .iter()
            .flat_map(|node| node.runtime_dependency_types())
            .filter(|ty| seen.insert(*ty))
            .collect()
    }

    pub fn into_nodes(self) -> Vec<DependencyNode> {
        self.nodes
    }
}

impl<'a> IntoIterator for &'a DependencyGraph {
    type Item = &'a DependencyNode;
    type IntoIter = std::slice::Iter<'a, DependencyNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

/// Run categorization then the topological sort over `descriptors`.
pub fn build_graph(descriptors: Vec<ProviderDescriptor>) -> Result<DependencyGraph, GraphError> {
    DependencyGraph::build(descriptors)
}
