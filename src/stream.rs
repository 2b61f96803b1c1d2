//! Keep-alive event stream
//!
//! One long-lived connection per client: a comment line first (defeats
//! intermediary buffering), a single ready event, then periodic ping
//! comments until the client disconnects. Each connection owns exactly one
//! ticker; a drop guard releases it and the registry entry on every exit
//! path.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::response::sse::Event;
use chrono::{DateTime, Utc};
use futures::stream::{self, Stream, StreamExt};
use parking_lot::RwLock;
use tokio_stream::wrappers::IntervalStream;
use uuid::Uuid;

/// Events emitted on a keep-alive connection, in strict creation order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamEvent {
    /// Initial no-op comment sent on connect
    Connected,
    /// Handshake event signaling the server is ready for tool calls
    Ready,
    /// Periodic keep-alive comment
    Ping,
}

impl StreamEvent {
    /// Render as an SSE wire event
    pub fn into_sse(self) -> Event {
        match self {
            StreamEvent::Connected => Event::default().comment("connected"),
            StreamEvent::Ready => Event::default().event("mcp.ready").data("{}"),
            StreamEvent::Ping => Event::default().comment("ping"),
        }
    }
}

/// Tracks open keep-alive connections
#[derive(Clone)]
pub struct StreamManager {
    clients: Arc<RwLock<HashMap<Uuid, DateTime<Utc>>>>,
}

impl StreamManager {
    pub fn new() -> Self {
        Self {
            clients: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Register a new connection; the returned guard unregisters it on drop
    pub fn register(&self) -> ConnectionGuard {
        let id = Uuid::new_v4();
        self.clients.write().insert(id, Utc::now());
        tracing::info!("stream client connected: {}", id);
        ConnectionGuard {
            id,
            manager: self.clone(),
        }
    }

    /// Number of currently connected clients
    pub fn client_count(&self) -> usize {
        self.clients.read().len()
    }

    fn unregister(&self, id: &Uuid) {
        self.clients.write().remove(id);
    }
}

impl Default for StreamManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Releases the connection's registry entry when dropped, whichever way
/// the stream ends
pub struct ConnectionGuard {
    id: Uuid,
    manager: StreamManager,
}

impl ConnectionGuard {
    pub fn id(&self) -> Uuid {
        self.id
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.manager.unregister(&self.id);
        tracing::info!("stream client disconnected: {}", self.id);
    }
}

/// Build the event sequence for one connection. The ticker lives inside
/// the returned stream, so dropping the stream (client disconnect or
/// server shutdown) cancels it; no writes can happen after that.
pub fn keep_alive_events(
    ping_interval: Duration,
    guard: ConnectionGuard,
) -> impl Stream<Item = StreamEvent> {
    let handshake = stream::iter([StreamEvent::Connected, StreamEvent::Ready]);

    // First ping fires one full interval after connect, not immediately.
    let start = tokio::time::Instant::now() + ping_interval;
    let pings = IntervalStream::new(tokio::time::interval_at(start, ping_interval)).map(
        move |_| {
            tracing::trace!("ping -> {}", guard.id());
            StreamEvent::Ping
        },
    );

    handshake.chain(pings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_manager_tracks_connections() {
        let manager = StreamManager::new();
        assert_eq!(manager.client_count(), 0);

        let guard = manager.register();
        assert_eq!(manager.client_count(), 1);

        drop(guard);
        assert_eq!(manager.client_count(), 0);
    }

    #[test]
    fn test_guard_releases_on_any_drop_path() {
        let manager = StreamManager::new();
        {
            let _a = manager.register();
            let _b = manager.register();
            assert_eq!(manager.client_count(), 2);
        }
        assert_eq!(manager.client_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ready_precedes_any_ping() {
        let manager = StreamManager::new();
        let mut events = Box::pin(keep_alive_events(
            Duration::from_secs(10),
            manager.register(),
        ));

        assert_eq!(events.next().await, Some(StreamEvent::Connected));
        assert_eq!(events.next().await, Some(StreamEvent::Ready));

        tokio::time::advance(Duration::from_secs(10)).await;
        assert_eq!(events.next().await, Some(StreamEvent::Ping));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pings_repeat_at_interval() {
        let manager = StreamManager::new();
        let mut events = Box::pin(keep_alive_events(
            Duration::from_secs(10),
            manager.register(),
        ));

        // consume handshake
        events.next().await;
        events.next().await;

        for _ in 0..3 {
            tokio::time::advance(Duration::from_secs(10)).await;
            assert_eq!(events.next().await, Some(StreamEvent::Ping));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_disconnect_releases_ticker_and_registration() {
        let manager = StreamManager::new();
        let mut events = Box::pin(keep_alive_events(
            Duration::from_secs(10),
            manager.register(),
        ));

        events.next().await;
        events.next().await;
        assert_eq!(manager.client_count(), 1);

        // Client disconnect drops the stream, and with it the ticker and
        // the registry entry.
        drop(events);
        assert_eq!(manager.client_count(), 0);

        // Nothing observable happens within a tick interval post-disconnect.
        tokio::time::advance(Duration::from_secs(20)).await;
        assert_eq!(manager.client_count(), 0);
    }
}
