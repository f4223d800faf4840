//! Error types for the radar client.
//!
//! This module defines all error types used throughout the crate.
//!
//! Most of the realtime path is deliberately infallible: connection drops,
//! malformed frames and sends while disconnected are absorbed by the
//! transport and never reach the caller. The variants below cover the
//! remaining surface: building a client and feeding the dispatch pipeline.
//!
//! # Usage
//!
//! ```ignore
//! use radar_client::{RadarClient, Result};
//!
//! async fn example() -> Result<()> {
//!     let client = RadarClient::builder()
//!         .url("ws://localhost:7999/ws")
//!         .start()?;
//!     client.hide_loot("5c0e874186f7745dc7616606").await?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Configuration | [`Error::Config`], [`Error::InvalidUrl`] |
//! | Pipeline | [`Error::ChannelClosed`] |
//! | External | [`Error::Json`] |

// ============================================================================
// Imports
// ============================================================================

use std::result::Result as StdResult;

use thiserror::Error;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned when client options fail validation.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// Endpoint URL could not be parsed or uses an unsupported scheme.
    #[error("Invalid endpoint URL {url:?}: {message}")]
    InvalidUrl {
        /// The rejected URL.
        url: String,
        /// Why it was rejected.
        message: String,
    },

    // ========================================================================
    // Pipeline Errors
    // ========================================================================
    /// The dispatch pipeline has shut down.
    ///
    /// Returned when an action is dispatched after the store task exited.
    #[error("Channel closed: {channel}")]
    ChannelClosed {
        /// Name of the closed channel.
        channel: &'static str,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates an invalid URL error.
    #[inline]
    pub fn invalid_url(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates a channel closed error.
    #[inline]
    pub fn channel_closed(channel: &'static str) -> Self {
        Self::ChannelClosed { channel }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a configuration error.
    #[inline]
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::Config { .. } | Self::InvalidUrl { .. })
    }

    /// Returns `true` if the dispatch pipeline is gone.
    #[inline]
    #[must_use]
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::ChannelClosed { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = Error::config("poll interval must be non-zero");
        assert_eq!(
            err.to_string(),
            "Configuration error: poll interval must be non-zero"
        );
        assert!(err.is_config_error());
    }

    #[test]
    fn test_invalid_url_display() {
        let err = Error::invalid_url("http://x", "expected ws");
        assert!(err.to_string().contains("http://x"));
        assert!(err.is_config_error());
    }

    #[test]
    fn test_channel_closed() {
        let err = Error::channel_closed("dispatch");
        assert_eq!(err.to_string(), "Channel closed: dispatch");
        assert!(err.is_closed());
        assert!(!err.is_config_error());
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
