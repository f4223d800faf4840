//! WebSocket transport layer.
//!
//! This module keeps one logical connection to the radar server alive.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐                          ┌─────────────────┐
//! │  ConnectionManager   │                          │  Radar server   │
//! │                      │        WebSocket         │                 │
//! │  Supervisor (tick)   │◄────────────────────────►│  ws://host/ws   │
//! │  → Socket task       │     reconnects forever   │                 │
//! └──────────────────────┘                          └─────────────────┘
//! ```
//!
//! # Connection Lifecycle
//!
//! 1. `ConnectionManager::start` - Spawn the supervisor
//! 2. Each tick without a live socket - Handshake attempt
//! 3. Socket task - Forward inbound frames, write outbound frames
//! 4. Socket closes for any reason - Back to `Disconnected`, retry next tick
//! 5. `ConnectionManager::stop` - Terminal `Closing`
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `connection` | Supervisor, socket task and handle |
//! | `options` | Poll interval, handshake timeout, queue capacity |

// ============================================================================
// Submodules
// ============================================================================

/// Supervisor, socket task and handle.
pub mod connection;

/// Connection tuning options.
pub mod options;

// ============================================================================
// Re-exports
// ============================================================================

pub use connection::{ConnectionManager, ConnectionState, Inbound};
pub use options::ConnectionOptions;
