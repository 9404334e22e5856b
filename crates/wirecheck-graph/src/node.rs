use serde::Serialize;

use crate::{ProviderDescriptor, TypeKey};

/// A provider wrapped with the edge sets the sort works on.
///
/// `provided_dependency_types` holds the inputs some other provider in the
/// same graph produces; it shrinks as the sort completes producers.
/// `runtime_dependency_types` holds the inputs nobody produces and which
/// must be supplied by the caller; it never changes after categorization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyNode {
    #[serde(flatten)]
    descriptor: ProviderDescriptor,
    provided_dependency_types: Vec<TypeKey>,
    runtime_dependency_types: Vec<TypeKey>,
}

impl DependencyNode {
    /// Wrap a descriptor with both edge sets empty (not yet categorized).
    pub fn new(descriptor: ProviderDescriptor) -> Self {
        Self {
            descriptor,
            provided_dependency_types: Vec::new(),
            runtime_dependency_types: Vec::new(),
        }
    }

    pub(crate) fn with_edges(
        descriptor: ProviderDescriptor,
        provided_dependency_types: Vec<TypeKey>,
        runtime_dependency_types: Vec<TypeKey>,
    ) -> Self {
        Self {
            descriptor,
            provided_dependency_types,
            runtime_dependency_types,
        }
    }

    pub fn descriptor(&self) -> &ProviderDescriptor {
        &self.descriptor
    }

    pub fn name(&self) -> &str {
        self.descriptor.name()
    }

    /// The type this node produces; the value other nodes' edges point at.
    pub fn return_type(&self) -> &TypeKey {
        self.descriptor.return_type()
    }

    pub fn parameter_types(&self) -> &[TypeKey] {
        self.descriptor.parameter_types()
    }

    /// Internal prerequisites not yet satisfied.
    pub fn provided_dependency_types(&self) -> &[TypeKey] {
        &self.provided_dependency_types
    }

    /// Inputs that must be supplied from outside the graph.
    pub fn runtime_dependency_types(&self) -> &[TypeKey] {
        &self.runtime_dependency_types
    }

    /// A node is ready once every internal prerequisite has been satisfied.
    pub fn has_no_incoming_edges(&self) -> bool {
        self.provided_dependency_types.is_empty()
    }

    pub fn has_incoming_edge_on(&self, produced: &TypeKey) -> bool {
        self.provided_dependency_types.contains(produced)
    }

    /// Remove one occurrence of `produced` from the pending prerequisites.
    ///
    /// Returns `false` if the node was not waiting on that type. Only the first
    /// occurrence is removed, so a node listing the same type twice stays
    /// blocked after a single producer completes.
    pub fn remove_incoming_edge_on(&mut self, produced: &TypeKey) -> bool {
        match self
            .provided_dependency_types
            .iter()
            .position(|pending| pending == produced)
        {
            Some(index) => {
                self.provided_dependency_types.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn into_descriptor(self) -> ProviderDescriptor {
        self.descriptor
    }
}
