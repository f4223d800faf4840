//! Typed actions flowing through the dispatch pipeline.
//!
//! # Action Tags
//!
//! | Action | Tag | Source |
//! |--------|-----|--------|
//! | `SnapshotReceived` | `SNAPSHOT_RECEIVED` | inbound snapshot frame |
//! | `Connected` | `WS_CONNECTED` | connection state |
//! | `Disconnected` | `WS_DISCONNECTED` | connection state |
//! | `MsgToServer` | `MSG_TO_SERVER` | presentation |
//! | `Server` | frame `type` or `UNKNOWN` | other inbound frames |

// ============================================================================
// Imports
// ============================================================================

use serde::Serialize;
use serde_json::Value;

use crate::error::Result;
use crate::identifiers::LootId;
use crate::protocol::{MSG_TO_SERVER, ServerCommand, Snapshot};

// ============================================================================
// Action
// ============================================================================

/// An event or command in the dispatch pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A snapshot arrived from the server.
    SnapshotReceived(Snapshot),

    /// The socket opened.
    Connected,

    /// The socket closed or the connection stopped.
    Disconnected,

    /// A payload to send to the server verbatim.
    MsgToServer(Value),

    /// Any other server frame.
    Server {
        /// The frame's `type`.
        frame_type: Option<String>,
        /// The whole frame.
        payload: Value,
    },
}

impl Action {
    /// Creates a server-bound action from any serializable payload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`](crate::Error::Json) if the payload cannot be
    /// represented as JSON.
    pub fn to_server<T: Serialize + ?Sized>(payload: &T) -> Result<Self> {
        Ok(Self::MsgToServer(serde_json::to_value(payload)?))
    }

    /// Creates a server-bound action from a typed command.
    #[must_use]
    pub fn command(command: &ServerCommand) -> Self {
        // String tag and string fields only; serialization cannot fail.
        Self::MsgToServer(serde_json::to_value(command).unwrap_or(Value::Null))
    }

    /// Creates a hide-loot command action.
    #[inline]
    #[must_use]
    pub fn hide_loot(id: impl Into<LootId>) -> Self {
        Self::command(&ServerCommand::hide_loot(id))
    }

    /// Returns the action's tag.
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            Self::SnapshotReceived(_) => "SNAPSHOT_RECEIVED",
            Self::Connected => "WS_CONNECTED",
            Self::Disconnected => "WS_DISCONNECTED",
            Self::MsgToServer(_) => MSG_TO_SERVER,
            Self::Server { frame_type, .. } => frame_type.as_deref().unwrap_or("UNKNOWN"),
        }
    }

    /// Returns the payload if this action is bound for the server.
    #[inline]
    #[must_use]
    pub fn server_payload(&self) -> Option<&Value> {
        match self {
            Self::MsgToServer(payload) => Some(payload),
            _ => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
