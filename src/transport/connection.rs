//! Self-healing WebSocket connection.
//!
//! This module owns the lifecycle of one logical connection to the radar
//! server: a supervisor task that reconnects on a fixed tick, and one socket
//! task per live WebSocket that moves frames in both directions.
//!
//! # State Machine
//!
//! ```text
//! Disconnected --(tick, no live socket)--> Connecting
//! Connecting   --(handshake ok)----------> Connected
//! Connecting   --(error / timeout)-------> Disconnected
//! Connected    --(close / error)---------> Disconnected
//! any          --(stop)------------------> Closing (terminal)
//! ```
//!
//! # Delivery
//!
//! Inbound frames are forwarded in arrival order, at most once per socket.
//! Nothing is replayed across a reconnect. Outbound frames are only written
//! while `Connected`; otherwise they are dropped without notice.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use parking_lot::Mutex;
use tokio::net::TcpStream;
use tokio::sync::{Notify, mpsc, watch};
use tokio::time::{MissedTickBehavior, interval, timeout};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, info, trace, warn};
use url::Url;

use crate::protocol::RawMessage;

use super::options::ConnectionOptions;

// ============================================================================
// Types
// ============================================================================

/// Client-side WebSocket stream.
type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Sequence number of a socket, unique per supervisor.
type SocketId = u64;

/// Receiving end of the inbound frame stream.
pub type Inbound = mpsc::Receiver<RawMessage>;

// ============================================================================
// ConnectionState
// ============================================================================

/// Lifecycle state of the connection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ConnectionState {
    /// No live socket; the next tick will try to connect.
    #[default]
    Disconnected,
    /// Handshake in progress.
    Connecting,
    /// Socket open, frames flowing.
    Connected,
    /// Stopped for good.
    Closing,
}

impl ConnectionState {
    /// Returns `true` when frames can be sent.
    #[inline]
    #[must_use]
    pub const fn is_connected(self) -> bool {
        matches!(self, Self::Connected)
    }
}

// ============================================================================
// SocketCommand
// ============================================================================

/// Commands for a live socket task.
enum SocketCommand {
    /// Write a text frame.
    Send(String),
    /// Close the socket.
    Close,
}

// ============================================================================
// Shared
// ============================================================================

/// State shared between the handle and the supervisor.
///
/// Only the supervisor writes `writer` and the state channel.
struct Shared {
    /// Set once by `stop()`.
    closing: AtomicBool,
    /// Wakes the supervisor on `stop()`.
    shutdown: Notify,
    /// Command queue of the live socket, if any.
    writer: Mutex<Option<mpsc::UnboundedSender<SocketCommand>>>,
    /// Latest state published by the supervisor.
    state_rx: watch::Receiver<ConnectionState>,
    /// Handshakes started so far.
    attempts: AtomicU64,
}

impl Shared {
    #[inline]
    fn is_closing(&self) -> bool {
        self.closing.load(Ordering::Acquire)
    }
}

// ============================================================================
// ConnectionManager
// ============================================================================

/// Handle to a self-healing WebSocket connection.
///
/// Cloning the handle is cheap; all clones control the same connection.
///
/// # Example
///
/// ```ignore
/// let url = Url::parse("ws://localhost:7999/ws")?;
/// let (connection, mut inbound) = ConnectionManager::start(url, &ConnectionOptions::new());
///
/// while let Some(frame) = inbound.recv().await {
///     println!("{frame}");
/// }
/// ```
#[derive(Clone)]
pub struct ConnectionManager {
    shared: Arc<Shared>,
}

impl ConnectionManager {
    /// Spawns the supervisor task and returns the handle and inbound stream.
    ///
    /// The first connection attempt happens on the first tick, immediately
    /// after start. Must be called from within a Tokio runtime.
    #[must_use]
    pub fn start(url: Url, options: &ConnectionOptions) -> (Self, Inbound) {
        let (inbound_tx, inbound_rx) = mpsc::channel(options.inbound_capacity.max(1));
        let (state_tx, state_rx) = watch::channel(ConnectionState::Disconnected);

        let shared = Arc::new(Shared {
            closing: AtomicBool::new(false),
            shutdown: Notify::new(),
            writer: Mutex::new(None),
            state_rx,
            attempts: AtomicU64::new(0),
        });

        let supervisor = Supervisor {
            url,
            poll_interval: options.poll_interval,
            connect_timeout: options.connect_timeout,
            shared: Arc::clone(&shared),
            inbound_tx,
            state_tx,
        };
        tokio::spawn(supervisor.run());

        (Self { shared }, inbound_rx)
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        if self.shared.is_closing() {
            return ConnectionState::Closing;
        }
        *self.shared.state_rx.borrow()
    }

    /// Subscribes to state transitions.
    #[inline]
    #[must_use]
    pub fn subscribe_state(&self) -> watch::Receiver<ConnectionState> {
        self.shared.state_rx.clone()
    }

    /// Returns `true` while a socket is open and `stop()` was not called.
    #[inline]
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.state().is_connected()
    }

    /// Returns `true` once `stop()` was called.
    #[inline]
    #[must_use]
    pub fn is_closing(&self) -> bool {
        self.shared.is_closing()
    }

    /// Returns the number of handshakes started so far.
    #[inline]
    #[must_use]
    pub fn connection_attempts(&self) -> u64 {
        self.shared.attempts.load(Ordering::Acquire)
    }

    /// Sends a frame if connected.
    ///
    /// Fire-and-forget: while disconnected, connecting or closing the frame
    /// is dropped and the caller is not told.
    pub fn send(&self, message: RawMessage) {
        if !self.is_connected() {
            trace!("Dropping outbound frame, not connected");
            return;
        }

        let writer = self.shared.writer.lock();
        match writer.as_ref() {
            Some(tx) => {
                if tx.send(SocketCommand::Send(message.into_string())).is_err() {
                    trace!("Dropping outbound frame, socket already gone");
                }
            }
            None => trace!("Dropping outbound frame, no live socket"),
        }
    }

    /// Stops the connection for good.
    ///
    /// Closes the live socket, if any, and suppresses every future attempt.
    /// Calling it again has no effect.
    pub fn stop(&self) {
        if self.shared.closing.swap(true, Ordering::AcqRel) {
            return;
        }

        info!("Connection stop requested");

        if let Some(tx) = self.shared.writer.lock().as_ref() {
            let _ = tx.send(SocketCommand::Close);
        }
        self.shared.shutdown.notify_one();
    }
}

impl std::fmt::Debug for ConnectionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("state", &self.state())
            .field("attempts", &self.connection_attempts())
            .finish()
    }
}

// ============================================================================
// Supervisor
// ============================================================================

/// Reconnect loop. Owns the state channel and the writer slot.
struct Supervisor {
    url: Url,
    poll_interval: Duration,
    connect_timeout: Duration,
    shared: Arc<Shared>,
    inbound_tx: mpsc::Sender<RawMessage>,
    state_tx: watch::Sender<ConnectionState>,
}

impl Supervisor {
    /// Runs until `stop()` or until the inbound receiver is dropped.
    async fn run(self) {
        let (ended_tx, mut ended_rx) = mpsc::unbounded_channel::<SocketId>();
        let mut ticker = interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut live: Option<SocketId> = None;
        let mut next_id: SocketId = 0;

        debug!(url = %self.url, "Connection supervisor started");

        loop {
            tokio::select! {
                _ = self.shared.shutdown.notified() => break,

                Some(socket_id) = ended_rx.recv() => {
                    if live == Some(socket_id) {
                        live = None;
                        self.shared.writer.lock().take();
                        self.set_state(ConnectionState::Disconnected);
                        info!(socket_id, "Disconnected");
                    }
                }

                _ = ticker.tick() => {
                    if self.shared.is_closing() {
                        break;
                    }
                    if self.inbound_tx.is_closed() {
                        debug!("Inbound receiver dropped, stopping supervisor");
                        self.shared.closing.store(true, Ordering::Release);
                        break;
                    }
                    if live.is_some() {
                        continue;
                    }

                    next_id += 1;
                    if self.connect(next_id, &ended_tx).await {
                        live = Some(next_id);
                    }
                }
            }
        }

        if let Some(tx) = self.shared.writer.lock().take() {
            let _ = tx.send(SocketCommand::Close);
        }
        self.set_state(ConnectionState::Closing);

        debug!("Connection supervisor stopped");
    }

    /// Makes one connection attempt. Returns `true` if a socket task was spawned.
    async fn connect(&self, socket_id: SocketId, ended_tx: &mpsc::UnboundedSender<SocketId>) -> bool {
        self.set_state(ConnectionState::Connecting);
        self.shared.attempts.fetch_add(1, Ordering::AcqRel);
        debug!(socket_id, url = %self.url, "Trying connect");

        let handshake = timeout(self.connect_timeout, connect_async(self.url.as_str()));

        let result = tokio::select! {
            result = handshake => result,
            _ = self.shared.shutdown.notified() => {
                // Re-arm so the main loop observes the stop as well.
                self.shared.shutdown.notify_one();
                self.set_state(ConnectionState::Disconnected);
                return false;
            }
        };

        let mut ws = match result {
            Ok(Ok((ws, _response))) => ws,
            Ok(Err(e)) => {
                debug!(socket_id, error = %e, "Connection attempt failed");
                self.set_state(ConnectionState::Disconnected);
                return false;
            }
            Err(_) => {
                debug!(
                    socket_id,
                    timeout = ?self.connect_timeout,
                    "Connection attempt timed out"
                );
                self.set_state(ConnectionState::Disconnected);
                return false;
            }
        };

        if self.shared.is_closing() {
            let _ = ws.close(None).await;
            self.set_state(ConnectionState::Disconnected);
            return false;
        }

        let (writer_tx, writer_rx) = mpsc::unbounded_channel();
        *self.shared.writer.lock() = Some(writer_tx);
        self.set_state(ConnectionState::Connected);

        info!(socket_id, url = %self.url, "Connected");

        tokio::spawn(run_socket(
            socket_id,
            ws,
            writer_rx,
            self.inbound_tx.clone(),
            ended_tx.clone(),
        ));

        true
    }

    #[inline]
    fn set_state(&self, state: ConnectionState) {
        self.state_tx.send_replace(state);
    }
}

// ============================================================================
// Socket Task
// ============================================================================

/// Moves frames for one live socket until it closes.
///
/// While the inbound queue is full, reading pauses on the one frame already
/// read; commands, `Close` included, are still served. Reports its id on
/// `ended_tx` when done, whatever the cause.
async fn run_socket(
    socket_id: SocketId,
    ws: WsStream,
    mut commands: mpsc::UnboundedReceiver<SocketCommand>,
    inbound_tx: mpsc::Sender<RawMessage>,
    ended_tx: mpsc::UnboundedSender<SocketId>,
) {
    let (mut ws_write, mut ws_read) = ws.split();
    let mut pending: Option<RawMessage> = None;

    loop {
        tokio::select! {
            permit = inbound_tx.reserve(), if pending.is_some() => {
                match permit {
                    Ok(permit) => {
                        if let Some(message) = pending.take() {
                            permit.send(message);
                        }
                    }
                    Err(_) => {
                        debug!(socket_id, "Inbound receiver dropped");
                        let _ = ws_write.close().await;
                        break;
                    }
                }
            }

            frame = ws_read.next(), if pending.is_none() => {
                match frame {
                    Some(Ok(Message::Text(text))) => {
                        pending = Some(RawMessage::new(text.as_str()));
                    }

                    Some(Ok(Message::Close(_))) => {
                        debug!(socket_id, "WebSocket closed by remote");
                        break;
                    }

                    Some(Err(e)) => {
                        debug!(socket_id, error = %e, "WebSocket error");
                        break;
                    }

                    None => {
                        debug!(socket_id, "WebSocket stream ended");
                        break;
                    }

                    // Ignore Binary, Ping, Pong
                    _ => {}
                }
            }

            command = commands.recv() => {
                match command {
                    Some(SocketCommand::Send(text)) => {
                        if let Err(e) = ws_write.send(Message::Text(text.into())).await {
                            warn!(socket_id, error = %e, "Failed to send frame");
                            break;
                        }
                        trace!(socket_id, "Frame sent");
                    }

                    Some(SocketCommand::Close) | None => {
                        debug!(socket_id, "Closing socket");
                        let _ = ws_write.close().await;
                        break;
                    }
                }
            }
        }
    }

    let _ = ended_tx.send(socket_id);
}

// ============================================================================
// Tests
// ============================================================================
