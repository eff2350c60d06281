use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::ws::Message;
use tokio::sync::{mpsc, RwLock};

/// Channel sender half for pushing messages to a WebSocket connection.
pub type WsSender = mpsc::UnboundedSender<Message>;

/// Metadata for a single WebSocket connection.
struct Connection {
    /// Channel sender for outbound messages to this connection.
    sender: WsSender,
}

/// Manages all active WebSocket connections and the correlation routes from
/// request identifiers to the connection that should receive the response.
///
/// The routes map is the typed replacement for string-concatenated channel
/// names: dispatch registers `uuid -> conn_id` when a request arrives, and
/// the correlator resolves it when the matching result shows up, however
/// much later.
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// shared across the application.
pub struct ClientHub {
    connections: RwLock<HashMap<String, Connection>>,
    routes: RwLock<HashMap<String, String>>,
}

impl ClientHub {
    /// Create a new, empty hub.
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
            routes: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new connection.
    ///
    /// Returns the receiver half of the message channel so the caller can
    /// forward messages to the WebSocket sink.
    pub async fn add(&self, conn_id: String) -> mpsc::UnboundedReceiver<Message> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.connections
            .write()
            .await
            .insert(conn_id, Connection { sender: tx });
        rx
    }

    /// Remove a connection and all correlation routes pointing at it.
    pub async fn remove(&self, conn_id: &str) {
        self.connections.write().await.remove(conn_id);
        self.routes
            .write()
            .await
            .retain(|_, target| target != conn_id);
    }

    /// Route responses for `uuid` to `conn_id`.
    ///
    /// A later registration for the same uuid overwrites the earlier one
    /// (the client reissued the request on a new connection).
    pub async fn register_route(&self, uuid: impl Into<String>, conn_id: impl Into<String>) {
        self.routes.write().await.insert(uuid.into(), conn_id.into());
    }

    /// Best-effort publish of a message to the connection waiting on `uuid`.
    ///
    /// Returns `true` when a live connection received the message. No
    /// listener is not an error: the result stays in cache for the client's
    /// next attempt. The route is kept so transport-level redeliveries of
    /// the same result still find their destination.
    pub async fn deliver(&self, uuid: &str, message: Message) -> bool {
        let conn_id = match self.routes.read().await.get(uuid) {
            Some(conn_id) => conn_id.clone(),
            None => {
                tracing::debug!(uuid, "No delivery route registered, dropping message");
                return false;
            }
        };

        let connections = self.connections.read().await;
        match connections.get(&conn_id) {
            Some(conn) => conn.sender.send(message).is_ok(),
            None => false,
        }
    }

    /// Return the current number of active connections.
    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Send a Ping frame to every connected client.
    ///
    /// Used by the heartbeat task to keep connections alive and detect
    /// stale ones.
    pub async fn ping_all(&self) {
        let connections = self.connections.read().await;
        for conn in connections.values() {
            let _ = conn.sender.send(Message::Ping(Bytes::new()));
        }
    }

    /// Send a Close frame to every connection, then clear the maps.
    ///
    /// Used during graceful shutdown to notify all clients before the
    /// server stops accepting new connections.
    pub async fn shutdown_all(&self) {
        let mut connections = self.connections.write().await;
        let count = connections.len();
        for conn in connections.values() {
            let _ = conn.sender.send(Message::Close(None));
        }
        connections.clear();
        self.routes.write().await.clear();
        tracing::info!(count, "Closed all WebSocket connections");
    }
}

impl Default for ClientHub {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn delivers_to_the_routed_connection() {
        let hub = ClientHub::new();
        let mut rx = hub.add("c1".to_string()).await;
        hub.register_route("r1", "c1").await;

        assert!(hub.deliver("r1", Message::Text("hello".into())).await);
        assert!(matches!(rx.recv().await, Some(Message::Text(_))));
    }

    #[tokio::test]
    async fn delivery_without_route_is_dropped_not_an_error() {
        let hub = ClientHub::new();
        let _rx = hub.add("c1".to_string()).await;

        assert!(!hub.deliver("unknown", Message::Text("x".into())).await);
    }

    #[tokio::test]
    async fn removing_a_connection_clears_its_routes() {
        let hub = ClientHub::new();
        let _rx = hub.add("c1".to_string()).await;
        hub.register_route("r1", "c1").await;

        hub.remove("c1").await;

        assert_eq!(hub.connection_count().await, 0);
        assert!(!hub.deliver("r1", Message::Text("x".into())).await);
    }

    #[tokio::test]
    async fn reregistering_a_route_points_at_the_new_connection() {
        let hub = ClientHub::new();
        let mut rx1 = hub.add("c1".to_string()).await;
        let mut rx2 = hub.add("c2".to_string()).await;
        hub.register_route("r1", "c1").await;
        hub.register_route("r1", "c2").await;

        assert!(hub.deliver("r1", Message::Text("x".into())).await);
        assert!(rx2.recv().await.is_some());
        assert!(rx1.try_recv().is_err());
    }

    #[tokio::test]
    async fn duplicate_delivery_is_tolerated() {
        let hub = ClientHub::new();
        let mut rx = hub.add("c1".to_string()).await;
        hub.register_route("r1", "c1").await;

        assert!(hub.deliver("r1", Message::Text("once".into())).await);
        assert!(hub.deliver("r1", Message::Text("twice".into())).await);
        assert!(rx.recv().await.is_some());
        assert!(rx.recv().await.is_some());
    }
}
