//! Latest-state store.
//!
//! Applies actions one at a time and publishes the resulting state
//! through a `watch` channel. Readers always see a complete state; there
//! is no partially reduced view.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, trace};

use crate::dispatch::{Action, ActionReceiver};

use super::model::ViewModel;
use super::reducer::reduce;
use super::thresholds::Thresholds;

// ============================================================================
// RadarState
// ============================================================================

/// Application state held by the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarState {
    /// Presentation view of the latest snapshot.
    pub view: ViewModel,

    /// Whether the socket is currently open.
    pub connected: bool,

    /// Number of snapshots reduced so far.
    pub snapshots: u64,
}

impl RadarState {
    /// Applies an action, returning the new state if anything changed.
    #[must_use]
    pub fn apply(&self, action: &Action, thresholds: &Thresholds) -> Option<Self> {
        match action {
            Action::SnapshotReceived(snapshot) => Some(Self {
                view: reduce(&self.view, snapshot, thresholds),
                connected: self.connected,
                snapshots: self.snapshots + 1,
            }),
            Action::Connected if !self.connected => Some(Self {
                connected: true,
                ..self.clone()
            }),
            Action::Disconnected if self.connected => Some(Self {
                connected: false,
                ..self.clone()
            }),
            _ => None,
        }
    }
}

// ============================================================================
// Store
// ============================================================================

/// Sequential reducer over the action queue.
#[derive(Debug)]
pub struct Store {
    thresholds: Thresholds,
    state_tx: watch::Sender<Arc<RadarState>>,
}

impl Store {
    /// Creates a store and a receiver for its published state.
    #[must_use]
    pub fn new(thresholds: Thresholds) -> (Self, watch::Receiver<Arc<RadarState>>) {
        let (state_tx, state_rx) = watch::channel(Arc::new(RadarState::default()));
        (
            Self {
                thresholds,
                state_tx,
            },
            state_rx,
        )
    }

    /// Returns the current state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> Arc<RadarState> {
        Arc::clone(&self.state_tx.borrow())
    }

    /// Applies a single action and publishes the result if it changed.
    pub fn apply(&self, action: &Action) {
        let current = self.state();

        if let Some(next) = current.apply(action, &self.thresholds) {
            trace!(tag = action.tag(), snapshots = next.snapshots, "State updated");
            self.state_tx.send_replace(Arc::new(next));
        }
    }

    /// Applies actions until every dispatcher is dropped.
    pub async fn run(self, mut actions: ActionReceiver) {
        while let Some(action) = actions.recv().await {
            self.apply(&action);
        }

        debug!("Action queue closed, store exiting");
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::Dispatcher;
    use crate::protocol::{RawEntity, Snapshot};

    fn snapshot_with(ids: &[&str]) -> Snapshot {
        Snapshot {
            players: Some(
                ids.iter()
                    .map(|id| RawEntity {
                        id: Some((*id).to_string()),
                        distance: Some(10.0),
                        is_alive: Some(true),
                        ..RawEntity::default()
                    })
                    .collect(),
            ),
            ..Snapshot::default()
        }
    }

    #[test]
    fn test_connected_flag() {
        let thresholds = Thresholds::default();
        let state = RadarState::default();

        let state = state.apply(&Action::Connected, &thresholds).unwrap();
        assert!(state.connected);
        assert!(state.apply(&Action::Connected, &thresholds).is_none());

        let state = state.apply(&Action::Disconnected, &thresholds).unwrap();
        assert!(!state.connected);
        assert!(state.apply(&Action::Disconnected, &thresholds).is_none());
    }

    #[test]
    fn test_snapshot_replaces_view() {
        let thresholds = Thresholds::default();
        let state = RadarState::default()
            .apply(&Action::SnapshotReceived(snapshot_with(&["a", "b"])), &thresholds)
            .unwrap();
        assert_eq!(state.snapshots, 1);
        assert_eq!(state.view.alive_players.len(), 2);

        let state = state
            .apply(&Action::SnapshotReceived(snapshot_with(&["c"])), &thresholds)
            .unwrap();
        assert_eq!(state.snapshots, 2);
        assert_eq!(state.view.alive_players.len(), 1);
        assert!(state.view.player("c").is_some());
    }

    #[test]
    fn test_other_actions_are_ignored() {
        let thresholds = Thresholds::default();
        let state = RadarState::default();
        assert!(state.apply(&Action::hide_loot("x"), &thresholds).is_none());
    }

    #[tokio::test]
    async fn test_run_publishes_in_order() {
        let (store, mut state_rx) = Store::new(Thresholds::default());
        let (dispatcher, actions, _outbound) = Dispatcher::new(8);

        let task = tokio::spawn(store.run(actions));

        dispatcher.dispatch(Action::Connected).await.unwrap();
        dispatcher
            .dispatch(Action::SnapshotReceived(snapshot_with(&["a"])))
            .await
            .unwrap();
        drop(dispatcher);
        task.await.unwrap();

        let state = state_rx.borrow_and_update().clone();
        assert!(state.connected);
        assert_eq!(state.snapshots, 1);
        assert!(state.view.player("a").is_some());
    }
}
