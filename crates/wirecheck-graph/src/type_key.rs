use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Opaque identity of a type in the analyzed program.
///
/// In practice this is a fully-qualified type name produced by a frontend
/// (for example `"src/services".Database`). Two keys denote the same type
/// if and only if they compare equal; the graph never performs structural or
/// subtyping comparison.
///
/// The text is reference counted because the same key is cloned into every
/// node that depends on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeKey(Arc<str>);

impl TypeKey {
    /// Create a key from its textual form.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// Borrow the key as a string for logging/serialization.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TypeKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for TypeKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TypeKey {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for TypeKey {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

impl From<&String> for TypeKey {
    fn from(name: &String) -> Self {
        Self::new(name)
    }
}

impl Serialize for TypeKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TypeKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn keys_compare_by_identity_text() {
        assert_eq!(TypeKey::new("\"src/a\".Foo"), TypeKey::from("\"src/a\".Foo"));
        assert_ne!(TypeKey::new("\"src/a\".Foo"), TypeKey::new("\"src/b\".Foo"));
    }

    #[test]
    fn set_lookup_by_str() {
        let mut set = FxHashSet::default();
        set.insert(TypeKey::new("Foo"));
        assert!(set.contains("Foo"));
        assert!(!set.contains("Bar"));
    }

    #[test]
    fn serializes_as_plain_string() {
        let key = TypeKey::new("quux.Corge");
        let json = serde_json::to_string(&key).expect("serialize");
        assert_eq!(json, "\"quux.Corge\"");
        let back: TypeKey = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, key);
    }
}
