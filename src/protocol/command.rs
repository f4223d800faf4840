//! Outbound commands.
//!
//! Commands are dispatched as `MSG_TO_SERVER` actions; their payload is
//! serialized verbatim and sent if the socket is connected.
//!
//! # Format
//!
//! ```json
//! { "type": "hide_loot", "id": "5c0e874186f7745dc7616606" }
//! ```

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::identifiers::LootId;

// ============================================================================
// Constants
// ============================================================================

/// Action tag marking a payload bound for the server.
pub const MSG_TO_SERVER: &str = "MSG_TO_SERVER";

// ============================================================================
// ServerCommand
// ============================================================================

/// Typed commands understood by the radar server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerCommand {
    /// Stop reporting a loot item.
    HideLoot {
        /// The item to hide.
        id: LootId,
    },
}

impl ServerCommand {
    /// Creates a hide-loot command.
    #[inline]
    #[must_use]
    pub fn hide_loot(id: impl Into<LootId>) -> Self {
        Self::HideLoot { id: id.into() }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_hide_loot_format() {
        let value = serde_json::to_value(ServerCommand::hide_loot("abc")).unwrap();
        assert_eq!(value, json!({"type": "hide_loot", "id": "abc"}));
    }
}
