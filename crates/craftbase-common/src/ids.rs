//! Identifier types for items and entities.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Separator between a namespace and a local name (`minecraft:stick`).
pub const NAMESPACE_SEPARATOR: char = ':';

/// Identifier of a game item or entity, with its namespace stripped.
///
/// `minecraft:oak_planks` and `oak_planks` both become `oak_planks`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Creates an item ID from an already-local name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Creates an item ID from a namespaced identifier, dropping the namespace.
    ///
    /// Identifiers without a namespace are taken as-is.
    #[must_use]
    pub fn from_namespaced(id: &str) -> Self {
        Self(strip_namespace(id).to_string())
    }

    /// Returns the local name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the ID and returns the local name.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Returns the part of `id` after the first namespace separator.
#[must_use]
pub fn strip_namespace(id: &str) -> &str {
    id.split_once(NAMESPACE_SEPARATOR)
        .map_or(id, |(_, local)| local)
}
