use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::ws::Message;
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

use atelier_core::types::{DbId, Timestamp};

/// Outbound half of a connection's message channel.
pub type WsSender = mpsc::UnboundedSender<Message>;

/// One live socket.
///
/// Every connection belongs to an authenticated account; the token is
/// checked before the upgrade completes, so there is no anonymous state.
pub struct WsConnection {
    /// The connected account's id.
    pub user_id: DbId,
    /// Where to queue frames destined for this socket.
    pub sender: WsSender,
    /// When this connection was established.
    pub connected_at: Timestamp,
}

/// Registry of live WebSocket connections, keyed by a per-socket id.
///
/// Shared as `Arc<WsManager>`; the `RwLock` keeps delivery (reads) cheap
/// while connect/disconnect take the write lock briefly. A user with several
/// open tabs holds several entries, one per socket.
pub struct WsManager {
    connections: RwLock<HashMap<Uuid, WsConnection>>,
}

impl WsManager {
    /// Create a new, empty connection manager.
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
        }
    }

    /// Register a socket for `user_id` and hand back the receiver half that
    /// the socket task drains into the WebSocket sink.
    pub async fn add(&self, conn_id: Uuid, user_id: DbId) -> mpsc::UnboundedReceiver<Message> {
        let (tx, rx) = mpsc::unbounded_channel();
        let conn = WsConnection {
            user_id,
            sender: tx,
            connected_at: chrono::Utc::now(),
        };
        self.connections.write().await.insert(conn_id, conn);
        rx
    }

    /// Forget a socket. Called from the socket task's teardown path.
    pub async fn remove(&self, conn_id: Uuid) {
        self.connections.write().await.remove(&conn_id);
    }

    /// Queue a frame on every live socket.
    ///
    /// A send into a closed channel is ignored; that socket's task is
    /// already tearing down and will call [`remove`](Self::remove) itself.
    pub async fn broadcast(&self, message: Message) {
        let conns = self.connections.read().await;
        for conn in conns.values() {
            let _ = conn.sender.send(message.clone());
        }
    }

    /// Queue a frame on every socket `user_id` has open.
    ///
    /// Returns how many sockets were targeted, which callers use to decide
    /// whether the user saw the push at all.
    pub async fn send_to_user(&self, user_id: DbId, message: Message) -> usize {
        let conns = self.connections.read().await;
        let mut delivered = 0;
        for conn in conns.values().filter(|conn| conn.user_id == user_id) {
            let _ = conn.sender.send(message.clone());
            delivered += 1;
        }
        delivered
    }

    /// Number of live sockets right now.
    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Graceful-shutdown sweep: queue a Close frame on every socket and
    /// empty the registry in one pass.
    pub async fn shutdown_all(&self) {
        let mut conns = self.connections.write().await;
        let count = conns.len();
        for (_, conn) in conns.drain() {
            let _ = conn.sender.send(Message::Close(None));
        }
        tracing::info!(count, "Closed all WebSocket connections");
    }

    /// Queue a Ping frame on every socket; the heartbeat task calls this so
    /// idle connections keep traffic flowing through proxies.
    pub async fn ping_all(&self) {
        let conns = self.connections.read().await;
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Ping(Bytes::new()));
        }
    }
}

impl Default for WsManager {
    fn default() -> Self {
        Self::new()
    }
}
