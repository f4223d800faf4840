//! Connection tuning options.

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

// ============================================================================
// Constants
// ============================================================================

/// Fixed delay between supervisor ticks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Upper bound for one WebSocket handshake.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Inbound frames buffered before the socket stops reading.
pub const DEFAULT_INBOUND_CAPACITY: usize = 256;

// ============================================================================
// ConnectionOptions
// ============================================================================

/// Options for the [`ConnectionManager`](super::ConnectionManager).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionOptions {
    /// Delay between reconnect checks. Retries never back off.
    pub poll_interval: Duration,

    /// Maximum time a single handshake may take.
    pub connect_timeout: Duration,

    /// Capacity of the inbound frame queue.
    pub inbound_capacity: usize,
}

impl ConnectionOptions {
    /// Creates options with default settings.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            inbound_capacity: DEFAULT_INBOUND_CAPACITY,
        }
    }

    /// Validates the options.
    ///
    /// # Errors
    ///
    /// Returns error message if a duration or the capacity is zero.
    pub fn validate(&self) -> Result<(), String> {
        if self.poll_interval.is_zero() {
            return Err("poll_interval must be greater than zero".to_string());
        }
        if self.connect_timeout.is_zero() {
            return Err("connect_timeout must be greater than zero".to_string());
        }
        if self.inbound_capacity == 0 {
            return Err("inbound_capacity must be greater than zero".to_string());
        }
        Ok(())
    }
}

impl Default for ConnectionOptions {
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
    fn test_defaults() {
        let options = ConnectionOptions::default();
        assert_eq!(options.poll_interval.as_millis(), 1000);
        assert_eq!(options.connect_timeout.as_secs(), 10);
        assert_eq!(options.inbound_capacity, 256);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_interval() {
        let options = ConnectionOptions {
            poll_interval: Duration::ZERO,
            ..ConnectionOptions::new()
        };
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_validate_zero_capacity() {
        let options = ConnectionOptions {
            inbound_capacity: 0,
            ..ConnectionOptions::new()
        };
        assert!(options.validate().is_err());
    }
}
