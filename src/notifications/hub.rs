use std::collections::HashMap;
use tokio::sync::{RwLock, mpsc};
use uuid::Uuid;

use crate::notifications::protocol::Notification;

/// Manages all active notification sockets, keyed by recipient user id.
///
/// A user may hold several connections (multiple tabs); a published event
/// fans out to all of them. Publishing to a user with no live connection is
/// a silent drop: delivery is best-effort, at-most-once, never persisted.
pub struct NotificationHub {
    /// user_id -> senders for that user's open connections
    connections: RwLock<HashMap<Uuid, Vec<mpsc::UnboundedSender<Notification>>>>,
}

impl NotificationHub {
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new connection for a user.
    /// Returns a receiver that the WebSocket session should listen on.
    pub async fn subscribe(&self, user_id: Uuid) -> mpsc::UnboundedReceiver<Notification> {
        let (tx, rx) = mpsc::unbounded_channel();

        let mut connections = self.connections.write().await;
        connections.entry(user_id).or_default().push(tx);

        rx
    }

    /// Remove a user's closed connections and prune empty entries.
    ///
    /// Only senders whose receiver is gone are evicted; the session must
    /// drop its receiver before calling this. Live connections of the same
    /// user are never touched.
    pub async fn unsubscribe(&self, user_id: Uuid) {
        let mut connections = self.connections.write().await;

        if let Some(senders) = connections.get_mut(&user_id) {
            senders.retain(|tx| !tx.is_closed());

            if senders.is_empty() {
                connections.remove(&user_id);
            }
        }
    }

    /// Publish an event to every open connection of `user_id`.
    pub async fn notify(&self, user_id: Uuid, event: Notification) {
        let connections = self.connections.read().await;

        match connections.get(&user_id) {
            Some(senders) => {
                for tx in senders {
                    // A failed send means the receiver disconnected; the
                    // session cleanup removes it.
                    let _ = tx.send(event.clone());
                }
            }
            None => {
                tracing::debug!(%user_id, "no live notification socket, event dropped");
            }
        }
    }
}

impl Default for NotificationHub {
    fn default() -> Self {
        Self::new()
    }
}
