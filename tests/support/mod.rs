// Local radar server for integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{WebSocketStream, accept_async};

/// Server-side socket handed to the test.
pub type ServerSocket = WebSocketStream<TcpStream>;

/// Upper bound for anything a test waits on.
pub const WAIT: Duration = Duration::from_secs(5);

/// Poll interval used by test clients.
pub const FAST_POLL: Duration = Duration::from_millis(20);

// Route client logs to the test writer; RUST_LOG picks the level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// WebSocket server on an ephemeral port.
///
/// Every accepted socket is passed to the test through `next_socket`, so the
/// test decides what to send and when to hang up.
pub struct MockServer {
    url: String,
    accepts: Arc<AtomicUsize>,
    sockets: mpsc::UnboundedReceiver<ServerSocket>,
}

impl MockServer {
    pub async fn start() -> anyhow::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let accepts = Arc::new(AtomicUsize::new(0));
        let (tx, sockets) = mpsc::unbounded_channel();

        let counter = Arc::clone(&accepts);
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                counter.fetch_add(1, Ordering::SeqCst);
                let Ok(ws) = accept_async(stream).await else {
                    continue;
                };
                if tx.send(ws).is_err() {
                    break;
                }
            }
        });

        Ok(Self {
            url: format!("ws://{addr}/ws"),
            accepts,
            sockets,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Number of TCP connections accepted so far.
    pub fn accepts(&self) -> usize {
        self.accepts.load(Ordering::SeqCst)
    }

    /// Waits for the next client socket.
    pub async fn next_socket(&mut self) -> anyhow::Result<ServerSocket> {
        timeout(WAIT, self.sockets.recv())
            .await?
            .ok_or_else(|| anyhow::anyhow!("accept loop ended"))
    }
}

/// Returns a `ws://` URL nothing listens on.
pub async fn dead_url() -> anyhow::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("ws://{addr}/ws"))
}

pub async fn send_text(socket: &mut ServerSocket, text: &str) -> anyhow::Result<()> {
    socket.send(Message::Text(text.into())).await?;
    Ok(())
}

/// Reads until the next text frame.
pub async fn next_text(socket: &mut ServerSocket) -> anyhow::Result<String> {
    timeout(WAIT, read_text(socket)).await?
}

/// Reads until the client closes, failing on any text frame.
pub async fn expect_closed(socket: &mut ServerSocket) -> anyhow::Result<()> {
    timeout(WAIT, read_until_closed(socket)).await?
}

async fn read_text(socket: &mut ServerSocket) -> anyhow::Result<String> {
    while let Some(frame) = socket.next().await {
        if let Message::Text(text) = frame? {
            return Ok(text.as_str().to_owned());
        }
    }
    anyhow::bail!("socket closed before a text frame")
}

async fn read_until_closed(socket: &mut ServerSocket) -> anyhow::Result<()> {
    while let Some(frame) = socket.next().await {
        match frame {
            Ok(Message::Text(text)) => anyhow::bail!("unexpected frame: {text}"),
            Ok(Message::Close(_)) | Err(_) => return Ok(()),
            Ok(_) => {}
        }
    }
    Ok(())
}
