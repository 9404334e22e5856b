//! Split each provider's inputs into internally provided and runtime-supplied types.

use rustc_hash::FxHashSet;

use crate::{DependencyNode, ProviderDescriptor, TypeKey};

/// The set of distinct types produced by at least one provider.
pub fn provided_type_universe<'a, I>(descriptors: I) -> FxHashSet<TypeKey>
where
    I: IntoIterator<Item = &'a ProviderDescriptor>,
{
    descriptors
        .into_iter()
        .map(|descriptor| descriptor.return_type().clone())
        .collect()
}

/// Wrap descriptors into nodes with their edge sets computed.
///
/// Parameter order is preserved inside each partition and duplicates are kept.
/// The result for any one descriptor depends only on the set of return types,
/// never on the position of descriptors in the input.
pub fn categorize<I>(descriptors: I) -> Vec<DependencyNode>
where
    I: IntoIterator<Item = ProviderDescriptor>,
{
    let descriptors: Vec<ProviderDescriptor> = descriptors.into_iter().collect();
    let universe = provided_type_universe(&descriptors);

    descriptors
        .into_iter()
        .map(|descriptor| {
            let (provided, runtime): (Vec<TypeKey>, Vec<TypeKey>) = descriptor
                .parameter_types()
                .iter()
                .cloned()
                .partition(|dependency| universe.contains(dependency));
            DependencyNode::with_edges(descriptor, provided, runtime)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_are_partitioned_twice() {
        let nodes = categorize([
            ProviderDescriptor::new("foo", "Foo"),
            ProviderDescriptor::new("bar", "Bar").with_parameters(["Foo", "Env", "Foo", "Env"]),
        ]);
        let bar = &nodes[1];
        assert_eq!(
            bar.provided_dependency_types(),
            &[TypeKey::new("Foo"), TypeKey::new("Foo")]
        );
        assert_eq!(
            bar.runtime_dependency_types(),
            &[TypeKey::new("Env"), TypeKey::new("Env")]
        );
    }

    #[test]
    fn self_dependency_counts_as_provided() {
        let nodes = categorize([ProviderDescriptor::new("foo", "Foo").with_parameters(["Foo"])]);
        assert_eq!(nodes[0].provided_dependency_types(), &[TypeKey::new("Foo")]);
    }
}
