//! Configuration for TypeScript provider discovery.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, TsError};

/// Options controlling how declarations are recognized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DiscoveryOptions {
    /// Name of the zero-member provider marker declaration.
    pub provider_marker: String,
    /// Name of the zero-member builder marker declaration.
    pub builder_marker: String,
    /// Method carrying a provider's signature.
    pub provide_method: String,
    /// Walk `.d.ts` files as well. They are always used for type resolution.
    pub include_declaration_files: bool,
    /// Record a `Promise<T>` result as `T` and flag the provider async.
    pub unwrap_promises: bool,
    /// Also treat free functions whose name starts with this prefix as
    /// providers, e.g. `"provide"` for `function provideFoo(): Foo`.
    pub provider_function_prefix: Option<String>,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            provider_marker: "Provider".to_string(),
            builder_marker: "Builder".to_string(),
            provide_method: "provide".to_string(),
            include_declaration_files: false,
            unwrap_promises: true,
            provider_function_prefix: None,
        }
    }
}

impl DiscoveryOptions {
    /// Create from serde_json::Value (for programmatic config from a host tool).
    ///
    /// # Example
    ///
    /// ```
    /// use wirecheck_ts::DiscoveryOptions;
    /// use serde_json::json;
    ///
    /// let options = DiscoveryOptions::from_value(json!({ "provideMethod": "create" })).unwrap();
    /// assert_eq!(options.provide_method, "create");
    /// assert_eq!(options.provider_marker, "Provider");
    /// ```
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| TsError::InvalidOptions(e.to_string()))
    }
}
