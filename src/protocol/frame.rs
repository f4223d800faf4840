//! Raw frames and inbound frame parsing.
//!
//! A [`RawMessage`] is the unit the transport moves: one WebSocket text
//! frame. [`InboundFrame::parse`] turns it into a typed frame without any
//! schema validation beyond "is a JSON object".
//!
//! # Frame Types
//!
//! | Frame | Condition |
//! |-------|-----------|
//! | [`InboundFrame::Snapshot`] | `type` is `SNAPSHOT`, or any of `self`/`players`/`loot`/`exits` present |
//! | [`InboundFrame::Other`] | anything else |

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value, from_str, from_value, to_string};

use crate::error::{Error, Result};

use super::snapshot::{SNAPSHOT_KEYS, Snapshot};

// ============================================================================
// Constants
// ============================================================================

/// Frame `type` announcing a snapshot.
pub const SNAPSHOT_TYPE: &str = "SNAPSHOT";

// ============================================================================
// RawMessage
// ============================================================================

/// One text frame as sent or received on the socket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMessage(String);

impl RawMessage {
    /// Wraps a text frame.
    #[inline]
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Serializes a payload verbatim into a frame.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if the payload cannot be serialized.
    pub fn from_json<T: Serialize + ?Sized>(payload: &T) -> Result<Self> {
        Ok(Self(to_string(payload)?))
    }

    /// Returns the frame text.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the frame, returning its text.
    #[inline]
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RawMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// InboundFrame
// ============================================================================

/// A parsed inbound frame.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundFrame {
    /// A snapshot update.
    Snapshot(Snapshot),

    /// Any other server frame, kept verbatim.
    Other {
        /// The frame's `type`, if present and a string.
        frame_type: Option<String>,
        /// The whole frame object.
        payload: Value,
    },
}

impl InboundFrame {
    /// Parses a text frame.
    ///
    /// Keys missing from a snapshot frame are not an error; they surface as
    /// `None` in [`Snapshot`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if the text is not a JSON object, or if a
    /// snapshot key carries a value of the wrong type.
    pub fn parse(text: &str) -> Result<Self> {
        let object: Map<String, Value> = from_str(text)?;

        let frame_type = object
            .get("type")
            .and_then(Value::as_str)
            .map(str::to_owned);

        let is_snapshot = frame_type.as_deref() == Some(SNAPSHOT_TYPE)
            || SNAPSHOT_KEYS.iter().any(|key| object.contains_key(*key));

        if is_snapshot {
            let snapshot: Snapshot = from_value(Value::Object(object))?;
            return Ok(Self::Snapshot(snapshot));
        }

        Ok(Self::Other {
            frame_type,
            payload: Value::Object(object),
        })
    }

    /// Returns `true` for snapshot frames.
    #[inline]
    #[must_use]
    pub fn is_snapshot(&self) -> bool {
        matches!(self, Self::Snapshot(_))
    }
}

impl TryFrom<&RawMessage> for InboundFrame {
    type Error = Error;

    fn try_from(message: &RawMessage) -> Result<Self> {
        Self::parse(message.as_str())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_snapshot_by_type() {
        let frame = InboundFrame::parse(r#"{"type": "SNAPSHOT"}"#).unwrap();
        assert_eq!(frame, InboundFrame::Snapshot(Snapshot::default()));
    }

    #[test]
    fn test_parse_snapshot_by_keys() {
        let frame = InboundFrame::parse(r#"{"type": "DRAW", "exits": {"A": "open"}}"#).unwrap();
        let InboundFrame::Snapshot(snapshot) = frame else {
            panic!("Expected snapshot frame");
        };
        assert_eq!(snapshot.exits.unwrap()["A"], "open");
    }

    #[test]
    fn test_parse_other_frame() {
        let frame = InboundFrame::parse(r#"{"type": "PING", "n": 1}"#).unwrap();
        assert!(!frame.is_snapshot());
        if let InboundFrame::Other {
            frame_type,
            payload,
        } = frame
        {
            assert_eq!(frame_type.as_deref(), Some("PING"));
            assert_eq!(payload, json!({"type": "PING", "n": 1}));
        } else {
            panic!("Expected Other frame");
        }
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(matches!(InboundFrame::parse("{nope"), Err(Error::Json(_))));
    }

    #[test]
    fn test_parse_non_object() {
        assert!(InboundFrame::parse("[1, 2, 3]").is_err());
        assert!(InboundFrame::parse("42").is_err());
    }

    #[test]
    fn test_raw_message_from_json() {
        let raw = RawMessage::from_json(&json!({"type": "hide_loot", "id": "x"})).unwrap();
        let back: Value = from_str(raw.as_str()).unwrap();
        assert_eq!(back["id"], "x");
    }
}
