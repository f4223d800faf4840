//! Entry point of the dispatch pipeline.

// ============================================================================
// Imports
// ============================================================================

use serde_json::Value;
use tokio::sync::mpsc;
use tracing::trace;

use crate::error::{Error, Result};

use super::action::Action;

// ============================================================================
// Types
// ============================================================================

/// Receiving end of the store queue.
pub type ActionReceiver = mpsc::Receiver<Action>;

/// Receiving end of the server-bound payload queue.
pub type OutboundReceiver = mpsc::UnboundedReceiver<Value>;

// ============================================================================
// Dispatcher
// ============================================================================

/// Cloneable handle that feeds actions into the pipeline.
///
/// Every action goes to the store queue, in dispatch order. Actions tagged
/// `MSG_TO_SERVER` additionally have their payload routed to the outbound
/// forwarder.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    store_tx: mpsc::Sender<Action>,
    outbound_tx: mpsc::UnboundedSender<Value>,
}

impl Dispatcher {
    /// Creates a dispatcher with a bounded store queue.
    #[must_use]
    pub fn new(capacity: usize) -> (Self, ActionReceiver, OutboundReceiver) {
        let (store_tx, store_rx) = mpsc::channel(capacity.max(1));
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        (
            Self {
                store_tx,
                outbound_tx,
            },
            store_rx,
            outbound_rx,
        )
    }

    /// Dispatches an action, waiting for room in the store queue.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ChannelClosed`] if the store has shut down.
    pub async fn dispatch(&self, action: Action) -> Result<()> {
        trace!(tag = action.tag(), "Dispatch");

        if let Some(payload) = action.server_payload() {
            // The outbound forwarder may be gone after stop; that is a drop,
            // not an error.
            let _ = self.outbound_tx.send(payload.clone());
        }

        self.store_tx
            .send(action)
            .await
            .map_err(|_| Error::channel_closed("store"))
    }

    /// Returns `true` once the store queue is closed.
    #[inline]
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.store_tx.is_closed()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_actions_keep_order() {
        let (dispatcher, mut store_rx, _outbound_rx) = Dispatcher::new(8);

        dispatcher.dispatch(Action::Connected).await.unwrap();
        dispatcher.dispatch(Action::Disconnected).await.unwrap();

        assert_eq!(store_rx.recv().await, Some(Action::Connected));
        assert_eq!(store_rx.recv().await, Some(Action::Disconnected));
    }

    #[tokio::test]
    async fn test_server_bound_payload_is_routed() {
        let (dispatcher, mut store_rx, mut outbound_rx) = Dispatcher::new(8);

        dispatcher.dispatch(Action::hide_loot("l1")).await.unwrap();
        dispatcher.dispatch(Action::Connected).await.unwrap();

        assert_eq!(
            outbound_rx.recv().await,
            Some(json!({"type": "hide_loot", "id": "l1"}))
        );
        assert!(outbound_rx.try_recv().is_err());
        assert_eq!(store_rx.recv().await.unwrap().tag(), "MSG_TO_SERVER");
    }

    #[tokio::test]
    async fn test_dispatch_after_store_closed() {
        let (dispatcher, store_rx, _outbound_rx) = Dispatcher::new(8);
        drop(store_rx);

        let err = dispatcher.dispatch(Action::Connected).await.unwrap_err();
        assert!(err.is_closed());
        assert!(dispatcher.is_closed());
    }
}
