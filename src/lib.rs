//! Radar Client - Realtime radar core over WebSocket.
//!
//! This library keeps a self-healing connection to a radar server, turns
//! each world snapshot into a classified, sorted and filtered view, and
//! sends player commands back.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────┐   frames   ┌───────────────┐  actions  ┌─────────┐
//! │ ConnectionManager │──────────►│ ActionChannel │─────────►│  Store  │
//! │  (reconnect tick) │◄──────────│  (forwarders) │          │ reduce  │
//! └───────────────────┘  payloads  └───────────────┘          └────┬────┘
//!                                          ▲                       │
//!                                          │ dispatch              ▼
//!                                     RadarClient ◄──── watch<Arc<RadarState>>
//! ```
//!
//! Key properties:
//!
//! - One logical connection, retried on a fixed tick, never backing off
//! - Inbound frames are reduced strictly in arrival order
//! - Commands are fire-and-forget; they are dropped while disconnected
//! - The store always publishes complete states
//!
//! # Quick Start
//!
//! ```no_run
//! use radar_client::{RadarClient, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = RadarClient::builder()
//!         .url("ws://localhost:7999/ws")
//!         .start()?;
//!
//!     let mut states = client.subscribe();
//!     while states.changed().await.is_ok() {
//!         let state = states.borrow_and_update().clone();
//!         for player in &state.view.alive_players {
//!             println!("{} {}", player.category.class_name(), player.id);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | [`RadarClient`] facade and configuration |
//! | [`dispatch`] | Actions, codec and forwarding tasks |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`identifiers`] | Type-safe ID wrappers |
//! | [`protocol`] | Wire frames and snapshot types |
//! | [`radar`] | Classification, reduction and the store |
//! | [`transport`] | Reconnecting WebSocket connection |

// ============================================================================
// Modules
// ============================================================================

/// Client facade and configuration.
///
/// Use [`RadarClient::builder()`] to configure and start a client.
pub mod client;

/// Dispatch pipeline.
///
/// Typed [`Action`]s, frame decoding and the forwarding tasks between the
/// transport and the store.
pub mod dispatch;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Type-safe identifiers for radar entities.
///
/// Newtype wrappers prevent mixing entity and loot IDs at compile time.
pub mod identifiers;

/// Wire protocol types.
///
/// Inbound frame routing, snapshot payloads and server commands.
pub mod protocol;

/// Classification, reduction and the store.
pub mod radar;

/// WebSocket transport layer.
///
/// Connection supervisor with fixed-interval reconnects.
pub mod transport;

// ============================================================================
// Re-exports
// ============================================================================

// Client types
pub use client::{ClientBuilder, RadarClient, RadarOptions};

// Dispatch types
pub use dispatch::{Action, ActionChannel, Dispatcher};

// Error types
pub use error::{Error, Result};

// Identifier types
pub use identifiers::{EntityId, LootId};

// Protocol types
pub use protocol::{InboundFrame, RawMessage, ServerCommand, Snapshot};

// Radar types
pub use radar::{Category, Entity, LootItem, RadarState, Tag, Thresholds, ViewModel};

// Transport types
pub use transport::{ConnectionManager, ConnectionOptions, ConnectionState};
