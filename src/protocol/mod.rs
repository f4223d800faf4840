//! WebSocket protocol message types.
//!
//! This module defines the message format for communication between the
//! radar server and this client.
//!
//! # Protocol Overview
//!
//! | Message Type | Direction | Purpose |
//! |--------------|-----------|---------|
//! | `Snapshot` | Server → Client | Players, loot and exits update |
//! | other frames | Server → Client | Passed through to the dispatch pipeline |
//! | `ServerCommand` | Client → Server | User command (e.g. hide loot) |
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `command` | Outbound command definitions |
//! | `frame` | Raw frames and inbound frame parsing |
//! | `snapshot` | Snapshot wire types |

// ============================================================================
// Submodules
// ============================================================================

/// Outbound command definitions.
pub mod command;

/// Raw frames and inbound frame parsing.
pub mod frame;

/// Snapshot wire types.
pub mod snapshot;

// ============================================================================
// Re-exports
// ============================================================================

pub use command::{MSG_TO_SERVER, ServerCommand};
pub use frame::{InboundFrame, RawMessage, SNAPSHOT_TYPE};
pub use snapshot::{Exits, Position, RawEntity, RawLoot, Snapshot};
