//! Dispatch pipeline.
//!
//! Connects the transport to the store. Inbound frames become typed
//! [`Action`]s; server-bound actions become outbound frames.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `action` | The [`Action`] enum |
//! | `channel` | Forwarding tasks ([`ActionChannel`]) |
//! | `codec` | Frame decode / encode |
//! | `dispatcher` | Pipeline entry point ([`Dispatcher`]) |

// ============================================================================
// Submodules
// ============================================================================

/// Typed actions.
pub mod action;

/// Forwarding tasks.
pub mod channel;

/// Frame decode / encode.
pub mod codec;

/// Pipeline entry point.
pub mod dispatcher;

// ============================================================================
// Re-exports
// ============================================================================

pub use action::Action;
pub use channel::ActionChannel;
pub use codec::{decode, encode};
pub use dispatcher::{ActionReceiver, Dispatcher, OutboundReceiver};
