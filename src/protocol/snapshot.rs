//! Snapshot wire types.
//!
//! The radar server pushes one snapshot per update. Every key is optional on
//! the wire: absence decodes to `None` and the reducer substitutes defaults,
//! so a half-filled frame still produces a view model instead of an error.
//!
//! # Format
//!
//! ```json
//! {
//!   "type": "SNAPSHOT",
//!   "self": { "id": "me", "group": "A", "isObscured": false },
//!   "players": [ { "id": "p1", "distance": 42.0, "isAlive": true } ],
//!   "loot": [ { "id": "l1", "name": "LEDX", "totalPrice": 90000, "distance": 12.0 } ],
//!   "exits": { "ZB-1011": "open" }
//! }
//! ```

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// Types
// ============================================================================

/// Exit name to status (e.g. `"open"`, `"closed"`, `"pending"`), in the
/// order the server sent them.
pub type Exits = Map<String, Value>;

/// Keys whose presence marks a frame as a snapshot.
pub const SNAPSHOT_KEYS: [&str; 4] = ["self", "players", "loot", "exits"];

// ============================================================================
// Position
// ============================================================================

/// World position of an entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// X coordinate.
    #[serde(default)]
    pub x: f64,
    /// Y coordinate.
    #[serde(default)]
    pub y: f64,
    /// Z coordinate.
    #[serde(default)]
    pub z: f64,
}

// ============================================================================
// RawEntity
// ============================================================================

/// A player or NPC as reported by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawEntity {
    /// Unique identity within the snapshot.
    pub id: Option<String>,
    /// Display name. Used as identity when `id` is absent.
    pub name: Option<String>,
    /// World position.
    pub position: Option<Position>,
    /// Horizontal distance to self.
    pub distance: Option<f64>,
    /// Vertical distance to self.
    pub vertical_distance: Option<f64>,
    /// Bearing relative to self, in degrees.
    pub angle: Option<f64>,
    /// Alive flag.
    pub is_alive: Option<bool>,
    /// Server-controlled bot.
    pub is_npc: Option<bool>,
    /// Scavenger faction.
    pub is_scavenger: Option<bool>,
    /// Marked as wanted.
    pub wanted: Option<bool>,
    /// Group identifier, `null` for solo entities.
    pub group: Option<String>,
    /// Tactical details withheld by the data source.
    #[serde(alias = "isEncrypted")]
    pub is_obscured: Option<bool>,
    /// Staleness in deciseconds.
    pub seconds_since_update: Option<f64>,
    /// Value of the carried inventory.
    pub loot_value: Option<f64>,
}

// ============================================================================
// RawLoot
// ============================================================================

/// A loot item as reported by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawLoot {
    /// Item identity.
    pub id: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Horizontal distance to self.
    pub distance: Option<f64>,
    /// Vertical distance to self.
    pub vertical_distance: Option<f64>,
    /// Bearing relative to self, in degrees.
    pub angle: Option<f64>,
    /// Price of the item including its contents.
    pub total_price: Option<f64>,
    /// Marked as wanted.
    pub wanted: Option<bool>,
}

// ============================================================================
// Snapshot
// ============================================================================

/// One atomic update of all tracked entities and exits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    /// The local player, `None` when absent or `null`.
    #[serde(rename = "self")]
    pub me: Option<RawEntity>,
    /// Other players and NPCs in server order.
    pub players: Option<Vec<RawEntity>>,
    /// Loot items in server order.
    pub loot: Option<Vec<RawLoot>>,
    /// Exit statuses; `None` keeps the previous exits.
    pub exits: Option<Exits>,
}

impl Snapshot {
    /// Returns the players, empty when the key was absent.
    #[inline]
    #[must_use]
    pub fn players(&self) -> &[RawEntity] {
        self.players.as_deref().unwrap_or_default()
    }

    /// Returns the loot items, empty when the key was absent.
    #[inline]
    #[must_use]
    pub fn loot(&self) -> &[RawLoot] {
        self.loot.as_deref().unwrap_or_default()
    }
}

// ============================================================================
// Tests
// ============================================================================
