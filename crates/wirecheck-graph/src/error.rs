use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::TypeKey;

/// A provider left with internal prerequisites when the sort stopped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedProvider {
    pub name: String,
    /// Internal types the provider was still waiting on.
    pub waiting_on: Vec<TypeKey>,
}

impl fmt::Display for UnresolvedProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let waiting = self
            .waiting_on
            .iter()
            .map(TypeKey::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{} (waiting on {waiting})", self.name)
    }
}

/// Why no construction order exists for a set of providers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// No provider is satisfiable before any edge is removed: the input was
    /// empty, or every provider depends on another provider's output.
    #[error("could not find start nodes: {}", describe_start(.providers))]
    NoStartNode {
        /// Names of all providers, in input order.
        providers: Vec<String>,
    },

    /// The worklist drained while some providers still had internal
    /// prerequisites.
    #[error("cycle identified among providers: {}", join_unresolved(.unresolved))]
    CycleDetected {
        /// Undrained providers, in input order.
        unresolved: Vec<UnresolvedProvider>,
    },
}

/// A confirmed declaration the frontend could not turn into a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot describe '{declaration}': {reason}")]
pub struct DescribeError {
    pub declaration: String,
    pub reason: String,
}

impl DescribeError {
    pub fn new(declaration: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            declaration: declaration.into(),
            reason: reason.into(),
        }
    }
}

/// Failures of the discovery walk.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscoveryError {
    #[error("did not locate the Provider marker type; import and extend the Provider marker")]
    MissingProviderMarker,

    #[error("did not locate the Builder marker type; import and extend the Builder marker")]
    MissingBuilderMarker,

    #[error(transparent)]
    Describe(#[from] DescribeError),
}

fn describe_start(providers: &[String]) -> String {
    if providers.is_empty() {
        "no providers were given".to_string()
    } else {
        format!(
            "every provider has an unresolved internal dependency ({})",
            providers.join(", ")
        )
    }
}

fn join_unresolved(unresolved: &[UnresolvedProvider]) -> String {
    unresolved
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
