//! Host-independent records extracted from confirmed declarations.
//!
//! A frontend turns each confirmed provider declaration into a
//! [`ProviderDescriptor`] and each confirmed builder into a
//! [`BuilderDescriptor`]. Descriptors are immutable once built.

use serde::{Deserialize, Serialize};

use crate::TypeKey;

/// A provider: a factory producing one typed value from zero or more typed inputs.
///
/// `name` is diagnostic only. Several descriptors may share a return type;
/// the graph treats each of them as satisfying that type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
    name: String,
    function_type: String,
    parameter_types: Vec<TypeKey>,
    return_type: TypeKey,
    is_async: bool,
}

impl ProviderDescriptor {
    /// Create a descriptor for a provider with no declared parameters.
    pub fn new(name: impl Into<String>, return_type: impl Into<TypeKey>) -> Self {
        let name = name.into();
        let return_type = return_type.into();
        Self {
            function_type: format!("() => {return_type}"),
            name,
            parameter_types: Vec::new(),
            return_type,
            is_async: false,
        }
    }

    /// Set the declared parameter types, in declaration order.
    pub fn with_parameters<I, T>(mut self, parameter_types: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TypeKey>,
    {
        self.parameter_types = parameter_types.into_iter().map(Into::into).collect();
        let params = self
            .parameter_types
            .iter()
            .map(TypeKey::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        self.function_type = format!("({params}) => {}", self.return_type);
        self
    }

    /// Override the rendered function type with the frontend's own text.
    pub fn with_function_type(mut self, function_type: impl Into<String>) -> Self {
        self.function_type = function_type.into();
        self
    }

    /// Mark the provider as producing its value asynchronously.
    pub fn with_async(mut self, is_async: bool) -> Self {
        self.is_async = is_async;
        self
    }

    /// The provider's declared name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The provider's declared function type, as rendered by the frontend.
    pub fn function_type(&self) -> &str {
        &self.function_type
    }

    /// The provider's inputs, in declaration order.
    pub fn parameter_types(&self) -> &[TypeKey] {
        &self.parameter_types
    }

    /// The type this provider constructs.
    pub fn return_type(&self) -> &TypeKey {
        &self.return_type
    }

    /// Whether the provider's declared result was a promise of `return_type`.
    pub fn is_async(&self) -> bool {
        self.is_async
    }
}

/// An entry point requesting a fully wired value.
///
/// Builders are validated to exist but are not wired into the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderDescriptor {
    pub name: String,
    /// Types the builder asks for, in declaration order.
    pub requested_types: Vec<TypeKey>,
}

impl BuilderDescriptor {
    pub fn new<I, T>(name: impl Into<String>, requested_types: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TypeKey>,
    {
        Self {
            name: name.into(),
            requested_types: requested_types.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_default_function_type() {
        let descriptor = ProviderDescriptor::new("quux", "Quux").with_parameters(["Bar", "Baz"]);
        assert_eq!(descriptor.function_type(), "(Bar, Baz) => Quux");
        assert_eq!(
            descriptor.parameter_types(),
            &[TypeKey::new("Bar"), TypeKey::new("Baz")]
        );
        assert!(!descriptor.is_async());
    }

    #[test]
    fn zero_parameters_yield_empty_sequence() {
        let descriptor = ProviderDescriptor::new("foo", "Foo");
        assert!(descriptor.parameter_types().is_empty());
        assert_eq!(descriptor.function_type(), "() => Foo");
    }
}
