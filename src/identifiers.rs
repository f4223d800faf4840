//! Type-safe identifiers for radar entities.
//!
//! Newtype wrappers keep player identities and loot identities from being
//! mixed up when the reducer filters and the command layer addresses items.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// EntityId
// ============================================================================

/// Identity of a player or NPC, unique within one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Creates a new entity ID.
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the ID is empty (no identity was reported).
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

// ============================================================================
// LootId
// ============================================================================

/// Identity of a loot item, used when asking the server to hide it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LootId(String);

impl LootId {
    /// Creates a new loot ID.
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LootId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LootId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for LootId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_display() {
        let id = EntityId::new("player-7");
        assert_eq!(id.to_string(), "player-7");
        assert_eq!(id.as_str(), "player-7");
        assert!(!id.is_empty());
        assert!(EntityId::default().is_empty());
    }

    #[test]
    fn test_ids_serialize_transparent() {
        let json = serde_json::to_string(&LootId::from("abc")).unwrap();
        assert_eq!(json, "\"abc\"");

        let id: EntityId = serde_json::from_str("\"xyz\"").unwrap();
        assert_eq!(id, EntityId::from("xyz"));
    }
}
