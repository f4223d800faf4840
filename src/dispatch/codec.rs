//! Frame <-> action conversion.
//!
//! Decoding is lenient by contract: a frame that is not a JSON object is
//! dropped with a debug log, and a snapshot frame with missing keys is
//! passed on with those keys absent.

// ============================================================================
// Imports
// ============================================================================

use serde_json::Value;
use tracing::{debug, trace};

use crate::error::Result;
use crate::protocol::{InboundFrame, RawMessage};

use super::action::Action;

// ============================================================================
// Decode
// ============================================================================

/// Decodes an inbound frame into an action, or `None` if malformed.
#[must_use]
pub fn decode(message: &RawMessage) -> Option<Action> {
    match InboundFrame::try_from(message) {
        Ok(InboundFrame::Snapshot(snapshot)) => {
            trace!(
                players = snapshot.players().len(),
                loot = snapshot.loot().len(),
                "Snapshot frame decoded"
            );
            Some(Action::SnapshotReceived(snapshot))
        }
        Ok(InboundFrame::Other {
            frame_type,
            payload,
        }) => Some(Action::Server {
            frame_type,
            payload,
        }),
        Err(e) => {
            debug!(error = %e, len = message.as_str().len(), "Dropping malformed frame");
            None
        }
    }
}

// ============================================================================
// Encode
// ============================================================================

/// Encodes a server-bound payload into a frame.
///
/// # Errors
///
/// Returns [`Error::Json`](crate::Error::Json) if serialization fails.
pub fn encode(payload: &Value) -> Result<RawMessage> {
    RawMessage::from_json(payload)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_snapshot() {
        let raw = RawMessage::new(r#"{"type": "SNAPSHOT", "players": [{"id": "a"}]}"#);
        let Some(Action::SnapshotReceived(snapshot)) = decode(&raw) else {
            panic!("Expected snapshot action");
        };
        assert_eq!(snapshot.players()[0].id.as_deref(), Some("a"));
        assert!(snapshot.players()[0].distance.is_none());
        assert!(snapshot.me.is_none());
    }

    #[test]
    fn test_decode_other() {
        let raw = RawMessage::new(r#"{"type": "HELLO"}"#);
        let action = decode(&raw).unwrap();
        assert_eq!(action.tag(), "HELLO");
    }

    #[test]
    fn test_decode_malformed_is_dropped() {
        assert!(decode(&RawMessage::new("not json")).is_none());
        assert!(decode(&RawMessage::new("")).is_none());
        assert!(decode(&RawMessage::new(r#"{"players": 5}"#)).is_none());
    }

    #[test]
    fn test_encode_verbatim() {
        let raw = encode(&json!({"type": "hide_loot", "id": "x"})).unwrap();
        let back: Value = serde_json::from_str(raw.as_str()).unwrap();
        assert_eq!(back, json!({"type": "hide_loot", "id": "x"}));
    }
}
