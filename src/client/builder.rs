//! Builder pattern for client configuration.
//!
//! Provides a fluent API for configuring and starting [`RadarClient`]
//! instances.
//!
//! # Example
//!
//! ```no_run
//! use radar_client::RadarClient;
//!
//! # async fn example() -> radar_client::Result<()> {
//! let client = RadarClient::builder()
//!     .url("ws://192.168.1.10:7999/ws")
//!     .start()?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use url::Url;

use crate::error::{Error, Result};

use super::core::RadarClient;
use super::options::{DEFAULT_URL, RadarOptions};

// ============================================================================
// ClientBuilder
// ============================================================================

/// Builder for configuring a [`RadarClient`] instance.
///
/// Use [`RadarClient::builder()`] to create a new builder.
#[derive(Debug, Default, Clone)]
pub struct ClientBuilder {
    /// Server endpoint. Falls back to [`DEFAULT_URL`].
    url: Option<String>,
    /// Client options.
    options: RadarOptions,
}

// ============================================================================
// ClientBuilder Implementation
// ============================================================================

impl ClientBuilder {
    /// Creates a new builder with default configuration.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the server endpoint.
    ///
    /// # Arguments
    ///
    /// * `url` - WebSocket URL (e.g., "ws://localhost:7999/ws")
    #[inline]
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Replaces the client options.
    #[inline]
    #[must_use]
    pub fn options(mut self, options: RadarOptions) -> Self {
        self.options = options;
        self
    }

    /// Validates the configuration and starts the client.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidUrl`] if the URL does not parse or is not `ws://`
    /// - [`Error::Config`] if an option is out of range
    pub fn start(self) -> Result<RadarClient> {
        let url = self.validate_url()?;
        self.options.validate().map_err(Error::config)?;

        Ok(RadarClient::start(url, self.options))
    }
}

// ============================================================================
// Validation
// ============================================================================

impl ClientBuilder {
    /// Parses the configured endpoint.
    fn validate_url(&self) -> Result<Url> {
        let raw = self.url.as_deref().unwrap_or(DEFAULT_URL);
        let url = Url::parse(raw).map_err(|e| Error::invalid_url(raw, e.to_string()))?;

        match url.scheme() {
            "ws" => {}
            "wss" => {
                return Err(Error::invalid_url(
                    raw,
                    "TLS endpoints are not supported; use ws://",
                ));
            }
            other => {
                return Err(Error::invalid_url(
                    raw,
                    format!("unsupported scheme '{other}', expected ws"),
                ));
            }
        }

        if url.host_str().is_none() {
            return Err(Error::invalid_url(raw, "missing host"));
        }

        Ok(url)
    }
}

// ============================================================================
// Tests
// ============================================================================
