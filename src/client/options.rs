//! Client options.
//!
//! Bundles the transport options, classification thresholds and the
//! dispatch queue size.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use radar_client::RadarOptions;
//!
//! let options = RadarOptions::new()
//!     .with_poll_interval(Duration::from_millis(500))
//!     .with_dispatch_capacity(64);
//!
//! assert!(options.validate().is_ok());
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use crate::radar::Thresholds;
use crate::transport::ConnectionOptions;

// ============================================================================
// Constants
// ============================================================================

/// Default server endpoint.
pub const DEFAULT_URL: &str = "ws://localhost:7999/ws";

/// Actions buffered before `dispatch` waits on the store.
pub const DEFAULT_DISPATCH_CAPACITY: usize = 1024;

// ============================================================================
// RadarOptions
// ============================================================================

/// Options for a [`RadarClient`](super::RadarClient).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadarOptions {
    /// Transport options.
    pub connection: ConnectionOptions,

    /// Classification thresholds.
    pub thresholds: Thresholds,

    /// Capacity of the store queue.
    pub dispatch_capacity: usize,
}

// ============================================================================
// RadarOptions Implementation
// ============================================================================

impl RadarOptions {
    /// Creates options with default settings.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            connection: ConnectionOptions::new(),
            thresholds: Thresholds::new(),
            dispatch_capacity: DEFAULT_DISPATCH_CAPACITY,
        }
    }

    /// Sets the reconnect poll interval.
    #[inline]
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.connection.poll_interval = interval;
        self
    }

    /// Sets the handshake timeout.
    #[inline]
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connection.connect_timeout = timeout;
        self
    }

    /// Sets the inbound frame queue capacity.
    #[inline]
    #[must_use]
    pub const fn with_inbound_capacity(mut self, capacity: usize) -> Self {
        self.connection.inbound_capacity = capacity;
        self
    }

    /// Sets the store queue capacity.
    #[inline]
    #[must_use]
    pub const fn with_dispatch_capacity(mut self, capacity: usize) -> Self {
        self.dispatch_capacity = capacity;
        self
    }

    /// Replaces the classification thresholds.
    #[inline]
    #[must_use]
    pub const fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Validates every option group.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure message.
    pub fn validate(&self) -> Result<(), String> {
        self.connection.validate()?;
        self.thresholds.validate()?;

        if self.dispatch_capacity == 0 {
            return Err("dispatch_capacity must be greater than zero".to_string());
        }

        Ok(())
    }
}

impl Default for RadarOptions {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let options = RadarOptions::default();
        assert_eq!(options.dispatch_capacity, 1024);
        assert_eq!(options.connection, ConnectionOptions::new());
        assert_eq!(options.thresholds, Thresholds::new());
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_with_methods() {
        let options = RadarOptions::new()
            .with_poll_interval(Duration::from_millis(20))
            .with_connect_timeout(Duration::from_secs(1))
            .with_inbound_capacity(4)
            .with_dispatch_capacity(8);

        assert_eq!(options.connection.poll_interval, Duration::from_millis(20));
        assert_eq!(options.connection.connect_timeout, Duration::from_secs(1));
        assert_eq!(options.connection.inbound_capacity, 4);
        assert_eq!(options.dispatch_capacity, 8);
    }

    #[test]
    fn test_validate_zero_dispatch_capacity() {
        let err = RadarOptions::new()
            .with_dispatch_capacity(0)
            .validate()
            .unwrap_err();
        assert!(err.contains("dispatch_capacity"));
    }

    #[test]
    fn test_validate_bad_thresholds() {
        let thresholds = Thresholds {
            brawl_distance: 200.0,
            ..Thresholds::new()
        };
        let options = RadarOptions::new().with_thresholds(thresholds);
        assert!(options.validate().is_err());
    }
}
