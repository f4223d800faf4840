//! Forwarding tasks between the transport and the dispatch pipeline.
//!
//! # Tasks
//!
//! | Task | From | To |
//! |------|------|----|
//! | inbound | transport frames | `Dispatcher::dispatch` |
//! | outbound | `MSG_TO_SERVER` payloads | `ConnectionManager::send` |
//! | state | connection state changes | `Connected` / `Disconnected` actions |
//!
//! The tasks are independent; no ordering holds between directions.

// ============================================================================
// Imports
// ============================================================================

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::transport::{ConnectionManager, ConnectionState, Inbound};

use super::action::Action;
use super::codec::{decode, encode};
use super::dispatcher::{Dispatcher, OutboundReceiver};

// ============================================================================
// ActionChannel
// ============================================================================

/// Bridges the connection and the dispatch pipeline.
///
/// Owns the three forwarding tasks. They end on their own once their
/// source closes; [`ActionChannel::abort`] ends them immediately.
#[derive(Debug)]
pub struct ActionChannel {
    inbound_task: JoinHandle<()>,
    outbound_task: JoinHandle<()>,
    state_task: JoinHandle<()>,
}

impl ActionChannel {
    /// Spawns the forwarding tasks.
    #[must_use]
    pub fn spawn(
        connection: ConnectionManager,
        inbound: Inbound,
        dispatcher: Dispatcher,
        outbound: OutboundReceiver,
    ) -> Self {
        let state_rx = connection.subscribe_state();

        Self {
            inbound_task: tokio::spawn(forward_inbound(inbound, dispatcher.clone())),
            outbound_task: tokio::spawn(forward_outbound(outbound, connection)),
            state_task: tokio::spawn(forward_state(state_rx, dispatcher)),
        }
    }

    /// Returns `true` once every forwarding task has ended.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.inbound_task.is_finished()
            && self.outbound_task.is_finished()
            && self.state_task.is_finished()
    }

    /// Aborts the forwarding tasks.
    pub fn abort(&self) {
        self.inbound_task.abort();
        self.outbound_task.abort();
        self.state_task.abort();
    }
}

// ============================================================================
// Forwarders
// ============================================================================

/// Decodes every inbound frame and dispatches it, in arrival order.
async fn forward_inbound(mut inbound: Inbound, dispatcher: Dispatcher) {
    while let Some(message) = inbound.recv().await {
        let Some(action) = decode(&message) else {
            continue;
        };

        if dispatcher.dispatch(action).await.is_err() {
            debug!("Store closed, inbound forwarder exiting");
            return;
        }
    }

    debug!("Inbound stream ended");
}

/// Sends every server-bound payload through the connection.
async fn forward_outbound(mut outbound: OutboundReceiver, connection: ConnectionManager) {
    while let Some(payload) = outbound.recv().await {
        match encode(&payload) {
            Ok(message) => connection.send(message),
            Err(e) => warn!(error = %e, "Failed to encode outbound payload"),
        }
    }

    debug!("Outbound queue closed");
}

/// Turns connection state changes into `Connected` / `Disconnected` actions.
async fn forward_state(mut state_rx: watch::Receiver<ConnectionState>, dispatcher: Dispatcher) {
    let mut connected = false;

    loop {
        let now_connected = state_rx.borrow_and_update().is_connected();

        if now_connected != connected {
            connected = now_connected;
            let action = if connected {
                Action::Connected
            } else {
                Action::Disconnected
            };
            if dispatcher.dispatch(action).await.is_err() {
                return;
            }
        }

        if state_rx.changed().await.is_err() {
            break;
        }
    }

    if connected {
        let _ = dispatcher.dispatch(Action::Disconnected).await;
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::RawMessage;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_inbound_forwarder_skips_malformed() {
        let (dispatcher, mut store_rx, _outbound_rx) = Dispatcher::new(8);
        let (tx, rx) = mpsc::channel(8);

        let task = tokio::spawn(forward_inbound(rx, dispatcher));

        tx.send(RawMessage::new(r#"{"type": "A"}"#)).await.unwrap();
        tx.send(RawMessage::new("garbage")).await.unwrap();
        tx.send(RawMessage::new(r#"{"type": "SNAPSHOT"}"#)).await.unwrap();
        drop(tx);
        task.await.unwrap();

        assert_eq!(store_rx.recv().await.unwrap().tag(), "A");
        assert_eq!(store_rx.recv().await.unwrap().tag(), "SNAPSHOT_RECEIVED");
        assert!(store_rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_state_forwarder_emits_transitions() {
        let (dispatcher, mut store_rx, _outbound_rx) = Dispatcher::new(8);
        let (state_tx, state_rx) = watch::channel(ConnectionState::Disconnected);

        let task = tokio::spawn(forward_state(state_rx, dispatcher));

        state_tx.send_replace(ConnectionState::Connected);
        assert_eq!(store_rx.recv().await, Some(Action::Connected));

        state_tx.send_replace(ConnectionState::Disconnected);
        assert_eq!(store_rx.recv().await, Some(Action::Disconnected));

        drop(state_tx);
        task.await.unwrap();
        assert!(store_rx.recv().await.is_none());
    }
}
