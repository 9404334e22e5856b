use serde::Serialize;
use tracing::{debug, trace, warn};

use super::DiscoveryProtocol;
use crate::{BuilderDescriptor, DiscoveryError, ProviderDescriptor};

/// Everything a discovery walk confirmed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Discovery {
    pub providers: Vec<ProviderDescriptor>,
    pub builders: Vec<BuilderDescriptor>,
}

/// State gathered during the single walk.
struct Collector<P: DiscoveryProtocol> {
    potential_providers: Vec<P::Node>,
    potential_builders: Vec<P::Node>,
    provider_marker: Option<P::Type>,
    builder_marker: Option<P::Type>,
}

impl<P: DiscoveryProtocol> Collector<P> {
    fn new() -> Self {
        Self {
            potential_providers: Vec::new(),
            potential_builders: Vec::new(),
            provider_marker: None,
            builder_marker: None,
        }
    }

    fn visit(&mut self, program: &P, node: &P::Node) {
        if let Some(candidate) = program.as_potential_provider(node) {
            self.potential_providers.push(candidate);
        }
        if let Some(candidate) = program.as_potential_builder(node) {
            self.potential_builders.push(candidate);
        }
        if let Some(marker) = program.as_builder_marker(node) {
            if self.builder_marker.replace(marker).is_some() {
                warn!("Builder marker declared more than once; the last declaration wins");
            }
        }
        if let Some(marker) = program.as_provider_marker(node) {
            if self.provider_marker.replace(marker).is_some() {
                warn!("Provider marker declared more than once; the last declaration wins");
            }
        }
        program.for_each_child(node, &mut |child| self.visit(program, child));
    }
}

/// Walk `program` once, then confirm and describe providers and builders.
///
/// Fails if either marker type was never declared; the builder marker is
/// required even though only providers feed the graph.
pub fn discover<P: DiscoveryProtocol>(program: &P) -> Result<Discovery, DiscoveryError> {
    let mut collector = Collector::<P>::new();
    program.for_each_file(&mut |node| collector.visit(program, node));

    debug!(
        potential_providers = collector.potential_providers.len(),
        potential_builders = collector.potential_builders.len(),
        provider_marker = collector.provider_marker.is_some(),
        builder_marker = collector.builder_marker.is_some(),
        "discovery walk finished"
    );

    let provider_marker = collector
        .provider_marker
        .ok_or(DiscoveryError::MissingProviderMarker)?;
    let builder_marker = collector
        .builder_marker
        .ok_or(DiscoveryError::MissingBuilderMarker)?;

    let mut providers = Vec::new();
    for candidate in &collector.potential_providers {
        if !program.is_provider(candidate, &provider_marker) {
            trace!("discarding provider candidate that does not extend the marker");
            continue;
        }
        let descriptor = program.describe_provider(candidate)?;
        trace!(provider = descriptor.name(), returns = %descriptor.return_type(), "confirmed provider");
        providers.push(descriptor);
    }

    let mut builders = Vec::new();
    for candidate in &collector.potential_builders {
        if !program.is_builder(candidate, &builder_marker) {
            trace!("discarding builder candidate that does not extend the marker");
            continue;
        }
        let descriptor = program.describe_builder(candidate)?;
        trace!(builder = %descriptor.name, "confirmed builder");
        builders.push(descriptor);
    }

    Ok(Discovery {
        providers,
        builders,
    })
}

/// Discover only the provider descriptors.
pub fn discover_providers<P: DiscoveryProtocol>(
    program: &P,
) -> Result<Vec<ProviderDescriptor>, DiscoveryError> {
    discover(program).map(|discovery| discovery.providers)
}
