//! [`DiscoveryProtocol`] over a [`TsProgram`].
//!
//! Providers are classes (or interfaces) extending the provider marker, with
//! their signature on a static `provide` method:
//!
//! ```typescript
//! import { Provider } from "./inject"
//!
//! export class FooProvider extends Provider {
//!     static provide(bar: Bar): Foo { ... }
//! }
//! ```
//!
//! Builders extend the builder marker and list the types they request as
//! properties.
//!
//! With [`DiscoveryOptions::provider_function_prefix`] set, free functions
//! whose name starts with the prefix (`provideFoo`) are providers as well,
//! described by their own signature.
//!
//! [`DiscoveryOptions::provider_function_prefix`]: crate::DiscoveryOptions::provider_function_prefix

use tracing::trace;
use wirecheck_graph::{
    BuilderDescriptor, DescribeError, DiscoveryProtocol, ProviderDescriptor, TypeKey,
};

use crate::decl::{Decl, DeclId, DeclKind, MethodSig};
use crate::program::TsProgram;

impl TsProgram {
    fn is_heritable(decl: &Decl) -> bool {
        matches!(decl.kind, DeclKind::Class | DeclKind::Interface)
    }

    fn names_in_heritage(&self, node: DeclId, marker_name: &str) -> bool {
        let decl = self.decl(node);
        Self::is_heritable(decl)
            && decl
                .heritage
                .iter()
                .any(|entry| self.apparent_name(self.scope_of(node), entry) == Some(marker_name))
    }

    fn marker(&self, node: DeclId, marker_name: &str) -> Option<TypeKey> {
        let decl = self.decl(node);
        (Self::is_heritable(decl) && decl.name == marker_name && decl.member_count == 0)
            .then(|| self.key_of(node))
    }

    fn is_function_provider(&self, decl: &Decl) -> bool {
        decl.kind == DeclKind::Function
            && self
                .options
                .provider_function_prefix
                .as_deref()
                .is_some_and(|prefix| decl.name.starts_with(prefix))
    }

    fn inherits(&self, node: DeclId, marker: &TypeKey) -> bool {
        let scope = self.scope_of(node);
        self.decl(node)
            .heritage
            .iter()
            .any(|entry| &self.type_key(scope, entry) == marker)
    }

    fn provide_method<'d>(&self, decl: &'d Decl) -> Option<&'d MethodSig> {
        if decl.kind == DeclKind::Function {
            return decl.signature.as_ref();
        }
        let name = self.options.provide_method.as_str();
        decl.methods
            .iter()
            .find(|method| method.name == name && (method.is_static || decl.kind == DeclKind::Interface))
    }
}

impl DiscoveryProtocol for TsProgram {
    type Node = DeclId;
    type Type = TypeKey;

    fn for_each_file(&self, visit: &mut dyn FnMut(&DeclId)) {
        for file in self.walked_files() {
            for id in &file.top_level {
                visit(id);
            }
        }
    }

    fn for_each_child(&self, node: &DeclId, visit: &mut dyn FnMut(&DeclId)) {
        for child in &self.decl(*node).children {
            visit(child);
        }
    }

    fn as_potential_provider(&self, node: &DeclId) -> Option<DeclId> {
        (self.names_in_heritage(*node, &self.options.provider_marker)
            || self.is_function_provider(self.decl(*node)))
        .then_some(*node)
    }

    fn as_potential_builder(&self, node: &DeclId) -> Option<DeclId> {
        self.names_in_heritage(*node, &self.options.builder_marker)
            .then_some(*node)
    }

    fn as_provider_marker(&self, node: &DeclId) -> Option<TypeKey> {
        self.marker(*node, &self.options.provider_marker)
    }

    fn as_builder_marker(&self, node: &DeclId) -> Option<TypeKey> {
        self.marker(*node, &self.options.builder_marker)
    }

    fn is_provider(&self, node: &DeclId, marker: &TypeKey) -> bool {
        self.inherits(*node, marker) || self.is_function_provider(self.decl(*node))
    }

    fn is_builder(&self, node: &DeclId, marker: &TypeKey) -> bool {
        self.inherits(*node, marker)
    }

    fn describe_provider(&self, node: &DeclId) -> Result<ProviderDescriptor, DescribeError> {
        let decl = self.decl(*node);
        let scope = self.scope_of(*node);
        let method_name = match decl.kind {
            DeclKind::Function => decl.name.as_str(),
            _ => self.options.provide_method.as_str(),
        };

        let method = self.provide_method(decl).ok_or_else(|| {
            DescribeError::new(&decl.name, format!("no static `{method_name}` method"))
        })?;
        let written_return = method.return_type.as_ref().ok_or_else(|| {
            DescribeError::new(
                &decl.name,
                format!("`{method_name}` has no return type annotation"),
            )
        })?;

        let mut parameter_types = Vec::with_capacity(method.params.len());
        let mut rendered = Vec::with_capacity(method.params.len());
        for param in &method.params {
            let ty = param.ty.as_ref().ok_or_else(|| {
                DescribeError::new(
                    &decl.name,
                    format!("parameter `{}` of `{method_name}` has no type annotation", param.name),
                )
            })?;
            parameter_types.push(self.type_key(scope, ty));
            rendered.push(param.render());
        }

        let promised = self
            .options
            .unwrap_promises
            .then(|| self.promise_argument(scope, written_return))
            .flatten();
        let return_type = self.type_key(scope, promised.unwrap_or(written_return));
        let is_async = method.is_async || promised.is_some();

        trace!(provider = %decl.name, %return_type, is_async, "described provider");
        Ok(ProviderDescriptor::new(&decl.name, return_type)
            .with_parameters(parameter_types)
            .with_function_type(format!("({}) => {}", rendered.join(", "), written_return.text))
            .with_async(is_async))
    }

    fn describe_builder(&self, node: &DeclId) -> Result<BuilderDescriptor, DescribeError> {
        let decl = self.decl(*node);
        let scope = self.scope_of(*node);
        let requested = decl
            .properties
            .iter()
            .map(|property| {
                property
                    .ty
                    .as_ref()
                    .map(|ty| self.type_key(scope, ty))
                    .ok_or_else(|| {
                        DescribeError::new(
                            &decl.name,
                            format!("property `{}` has no type annotation", property.name),
                        )
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(BuilderDescriptor::new(&decl.name, requested))
    }
}
