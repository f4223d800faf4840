//! Radar client entry point.
//!
//! # Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`RadarClient`] | Owns the connection, pipeline and store |
//! | [`ClientBuilder`] | Fluent configuration builder |
//! | [`RadarOptions`] | Transport, threshold and queue options |

// ============================================================================
// Submodules
// ============================================================================

/// Fluent builder for client configuration.
pub mod builder;

/// Client facade.
pub mod core;

/// Client options.
pub mod options;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::ClientBuilder;
pub use self::core::RadarClient;
pub use options::{DEFAULT_DISPATCH_CAPACITY, DEFAULT_URL, RadarOptions};
