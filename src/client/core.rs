//! Radar client facade.
//!
//! The [`RadarClient`] wires the connection, the dispatch pipeline and the
//! store together and owns their tasks.
//!
//! # Example
//!
//! ```no_run
//! use radar_client::RadarClient;
//!
//! # async fn example() -> radar_client::Result<()> {
//! let client = RadarClient::builder().start()?;
//! let mut states = client.subscribe();
//!
//! while states.changed().await.is_ok() {
//!     let state = states.borrow_and_update().clone();
//!     println!("{} players alive", state.view.alive_players.len());
//! }
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::info;
use url::Url;

use crate::dispatch::{Action, ActionChannel, Dispatcher};
use crate::error::Result;
use crate::identifiers::LootId;
use crate::radar::{RadarState, Store};
use crate::transport::{ConnectionManager, ConnectionState};

use super::builder::ClientBuilder;
use super::options::RadarOptions;

// ============================================================================
// RadarClient
// ============================================================================

/// Realtime radar client.
///
/// Keeps a connection to the radar server, reduces every snapshot into a
/// [`RadarState`] and sends commands back. Dropping the client stops it.
pub struct RadarClient {
    /// Endpoint the client connects to.
    url: Url,

    /// Connection handle.
    connection: ConnectionManager,

    /// Pipeline entry point.
    dispatcher: Dispatcher,

    /// Published store state.
    state_rx: watch::Receiver<Arc<RadarState>>,

    /// Forwarding tasks.
    channel: ActionChannel,

    /// Store task.
    store_task: JoinHandle<()>,
}

// ============================================================================
// RadarClient - Lifecycle
// ============================================================================

impl RadarClient {
    /// Creates a configuration builder.
    #[inline]
    #[must_use]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Spawns every task. Options must already be validated.
    pub(crate) fn start(url: Url, options: RadarOptions) -> Self {
        let (connection, inbound) = ConnectionManager::start(url.clone(), &options.connection);
        let (dispatcher, actions, outbound) = Dispatcher::new(options.dispatch_capacity);
        let (store, state_rx) = Store::new(options.thresholds);

        let store_task = tokio::spawn(store.run(actions));
        let channel = ActionChannel::spawn(connection.clone(), inbound, dispatcher.clone(), outbound);

        info!(url = %url, "Radar client started");

        Self {
            url,
            connection,
            dispatcher,
            state_rx,
            channel,
            store_task,
        }
    }

    /// Stops the connection for good.
    ///
    /// The store keeps its last state and `dispatch` keeps working; only
    /// the socket is closed and reconnects are suppressed. Idempotent.
    pub fn stop(&self) {
        self.connection.stop();
    }
}

// ============================================================================
// RadarClient - Accessors
// ============================================================================

impl RadarClient {
    /// Returns the endpoint URL.
    #[inline]
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Returns the latest published state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> Arc<RadarState> {
        Arc::clone(&self.state_rx.borrow())
    }

    /// Subscribes to state updates.
    #[inline]
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Arc<RadarState>> {
        self.state_rx.clone()
    }

    /// Returns the transport state.
    #[inline]
    #[must_use]
    pub fn connection_state(&self) -> ConnectionState {
        self.connection.state()
    }

    /// Returns the connection handle.
    #[inline]
    #[must_use]
    pub fn connection(&self) -> &ConnectionManager {
        &self.connection
    }

    /// Returns a dispatcher clone for feeding actions from elsewhere.
    #[inline]
    #[must_use]
    pub fn dispatcher(&self) -> Dispatcher {
        self.dispatcher.clone()
    }
}

// ============================================================================
// RadarClient - Commands
// ============================================================================

impl RadarClient {
    /// Dispatches an action into the pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ChannelClosed`](crate::Error::ChannelClosed) if the
    /// store task has exited.
    pub async fn dispatch(&self, action: Action) -> Result<()> {
        self.dispatcher.dispatch(action).await
    }

    /// Asks the server to hide a loot item.
    ///
    /// Fire-and-forget: dropped if the connection is not open.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ChannelClosed`](crate::Error::ChannelClosed) if the
    /// store task has exited.
    pub async fn hide_loot(&self, id: impl Into<LootId>) -> Result<()> {
        self.dispatch(Action::hide_loot(id)).await
    }

    /// Sends an arbitrary payload to the server verbatim.
    ///
    /// # Errors
    ///
    /// - [`Error::Json`](crate::Error::Json) if the payload does not serialize
    /// - [`Error::ChannelClosed`](crate::Error::ChannelClosed) if the store
    ///   task has exited
    pub async fn send_to_server<T: Serialize + ?Sized>(&self, payload: &T) -> Result<()> {
        self.dispatch(Action::to_server(payload)?).await
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl fmt::Debug for RadarClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RadarClient")
            .field("url", &self.url.as_str())
            .field("connection", &self.connection)
            .field("snapshots", &self.state_rx.borrow().snapshots)
            .finish_non_exhaustive()
    }
}

impl Drop for RadarClient {
    fn drop(&mut self) {
        self.connection.stop();
        self.channel.abort();
        self.store_task.abort();
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn unreachable_client() -> RadarClient {
        let options = RadarOptions::new()
            .with_poll_interval(Duration::from_millis(10))
            .with_connect_timeout(Duration::from_millis(200));

        RadarClient::builder()
            .url("ws://127.0.0.1:9/ws")
            .options(options)
            .start()
            .unwrap()
    }

    #[tokio::test]
    async fn test_initial_state() {
        let client = unreachable_client();
        let state = client.state();
        assert!(!state.connected);
        assert_eq!(state.snapshots, 0);
        assert!(state.view.me.is_none());
        assert_eq!(client.url().port(), Some(9));
    }

    #[tokio::test]
    async fn test_hide_loot_while_disconnected_is_accepted() {
        let client = unreachable_client();
        client.hide_loot("l1").await.unwrap();
        client.send_to_server(&serde_json::json!({"ping": 1})).await.unwrap();
        assert!(!client.state().connected);
    }

    #[tokio::test]
    async fn test_stop_keeps_store() {
        let client = unreachable_client();
        client.stop();
        client.stop();

        assert_eq!(client.connection_state(), ConnectionState::Closing);
        client.dispatch(Action::Connected).await.unwrap();

        let mut states = client.subscribe();
        let connected = tokio::time::timeout(
            Duration::from_secs(5),
            states.wait_for(|s| s.connected),
        )
        .await
        .is_ok();
        assert!(connected);
    }
}
