//! The contract between the graph engine and a source-language frontend.
//!
//! A frontend walks its program representation and answers classification
//! queries about declarations. The engine only ever talks to this trait.
//!
//! Recognition happens in two phases. During a single walk, declarations that
//! merely *look like* providers or builders are collected as candidates, and
//! the marker declarations are resolved wherever they appear. After the walk,
//! candidates are confirmed against the exact marker identity. This keeps the
//! walk single-pass even when a candidate is visited before the marker it
//! refers to.

mod collect;

pub use collect::{Discovery, discover, discover_providers};

use crate::{BuilderDescriptor, DescribeError, ProviderDescriptor};

/// Traversal and classification over one analyzed program.
///
/// Implementations must be deterministic: identical input yields identical
/// visit order and answers. None of the methods may fail for a node the
/// implementation itself handed out.
pub trait DiscoveryProtocol {
    /// A declaration handle.
    type Node: Clone;

    /// The resolved identity of a marker type.
    type Type;

    /// Visit every top-level declaration of every non-library source file.
    fn for_each_file(&self, visit: &mut dyn FnMut(&Self::Node));

    /// Visit every immediate child of `node`.
    fn for_each_child(&self, node: &Self::Node, visit: &mut dyn FnMut(&Self::Node));

    /// Cheap shape/name pre-filter for provider declarations.
    ///
    /// May yield false positives, must not yield false negatives.
    fn as_potential_provider(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Cheap shape/name pre-filter for builder declarations.
    fn as_potential_builder(&self, node: &Self::Node) -> Option<Self::Node>;

    /// The identity of the provider marker, if `node` is that declaration.
    fn as_provider_marker(&self, node: &Self::Node) -> Option<Self::Type>;

    /// The identity of the builder marker, if `node` is that declaration.
    fn as_builder_marker(&self, node: &Self::Node) -> Option<Self::Type>;

    /// True iff `node`'s supertypes include a type identical to `marker`.
    fn is_provider(&self, node: &Self::Node, marker: &Self::Type) -> bool;

    /// True iff `node`'s supertypes include a type identical to `marker`.
    fn is_builder(&self, node: &Self::Node, marker: &Self::Type) -> bool;

    /// Extract the descriptor of a confirmed provider.
    fn describe_provider(&self, node: &Self::Node) -> Result<ProviderDescriptor, DescribeError>;

    /// Extract the descriptor of a confirmed builder.
    fn describe_builder(&self, node: &Self::Node) -> Result<BuilderDescriptor, DescribeError>;
}
