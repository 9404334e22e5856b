//! # wirecheck-graph
//!
//! Dependency-injection wiring validation for provider declarations.
//!
//! A *provider* is a declaration that constructs a value of one type from zero
//! or more typed inputs. This crate decides whether a set of providers can be
//! assembled: each input is either produced by another provider (an internal
//! edge) or has to be supplied from outside at run time. The result is a
//! deterministic construction order, or a typed reason why none exists.
//!
//! ## Overview
//!
//! ```text
//! DiscoveryProtocol walk ──► candidates ──► marker confirmation
//!                                                  │
//!                                                  ▼
//!                                        ProviderDescriptor[]
//!                                                  │
//!                                     categorize   ▼
//!                                        DependencyNode[] ──► topological sort
//!                                                                   │
//!                                                                   ▼
//!                                                   DependencyGraph | GraphError
//! ```
//!
//! The crate never parses source code. A frontend implements
//! [`DiscoveryProtocol`] for its own program representation and the engine
//! works purely on the descriptors it extracts.
//!
//! ## Quick Start
//!
//! ```rust
//! use wirecheck_graph::{ProviderDescriptor, build_graph};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let graph = build_graph(vec![
//!     ProviderDescriptor::new("bar", "Bar").with_parameters(["Foo", "Config"]),
//!     ProviderDescriptor::new("foo", "Foo"),
//! ])?;
//!
//! assert_eq!(graph.build_order(), vec!["foo", "bar"]);
//! assert_eq!(graph.runtime_dependency_types()[0].as_str(), "Config");
//! # Ok(())
//! # }
//! ```
//!
//! ## Thread Safety
//!
//! Everything here is synchronous. Each build owns its node list exclusively;
//! analyzing several programs concurrently just means running independent
//! builds.

pub mod categorize;
pub mod descriptor;
pub mod discovery;
pub mod error;
pub mod graph;
pub mod node;
pub mod sort;
pub mod type_key;

pub use categorize::{categorize, provided_type_universe};
pub use descriptor::{BuilderDescriptor, ProviderDescriptor};
pub use discovery::{Discovery, DiscoveryProtocol, discover, discover_providers};
pub use error::{DescribeError, DiscoveryError, GraphError, UnresolvedProvider};
pub use graph::{DependencyGraph, build_graph};
pub use node::DependencyNode;
pub use sort::topological_sort;
pub use type_key::TypeKey;

/// Error types for a full discovery-then-build run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The program could not be turned into provider descriptors.
    #[error("discovery failed: {0}")]
    Discovery(#[from] DiscoveryError),

    /// The providers cannot be ordered.
    #[error("invalid provider graph: {0}")]
    Graph(#[from] GraphError),
}

/// Result type alias for wirecheck operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Discover the providers of `program` and build their dependency graph.
pub fn analyze<P: DiscoveryProtocol>(program: &P) -> Result<DependencyGraph> {
    let providers = discover_providers(program)?;
    Ok(build_graph(providers)?)
}

#[cfg(test)]
mod tests;
