use async_trait::async_trait;
use std::sync::Arc;
use tandem_core::{ConnectionId, ServerEvent};
use tandem_server::SignalingOutput;
use tokio::sync::{Mutex, mpsc};

/// One event handed to the signaling layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivered {
    pub to: ConnectionId,
    pub event: ServerEvent,
}

/// Mock SignalingOutput that captures all outgoing events.
#[derive(Clone)]
pub struct MockSignalingOutput {
    /// Channel to send captured events.
    tx: mpsc::UnboundedSender<Delivered>,
    /// All captured events (for verification).
    delivered: Arc<Mutex<Vec<Delivered>>>,
}

impl MockSignalingOutput {
    /// Create a new MockSignalingOutput and its receiver channel.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Delivered>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let signaling = Self {
            tx,
            delivered: Arc::new(Mutex::new(Vec::new())),
        };
        (signaling, rx)
    }

    /// All events delivered to a specific connection, in order.
    pub async fn events_for(&self, connection_id: &ConnectionId) -> Vec<ServerEvent> {
        self.delivered
            .lock()
            .await
            .iter()
            .filter(|d| &d.to == connection_id)
            .map(|d| d.event.clone())
            .collect()
    }

    /// Number of events delivered so far, to anyone.
    pub async fn total(&self) -> usize {
        self.delivered.lock().await.len()
    }
}

#[async_trait]
impl SignalingOutput for MockSignalingOutput {
    async fn deliver(&self, to: ConnectionId, event: ServerEvent) {
        tracing::debug!("[MockSignaling] deliver {:?} to {}", event, to);

        let msg = Delivered { to, event };
        self.delivered.lock().await.push(msg.clone());
        let _ = self.tx.send(msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_signaling_captures_events() {
        let (signaling, mut rx) = MockSignalingOutput::new();
        let connection_id = ConnectionId::new();

        signaling.deliver(connection_id, ServerEvent::Created).await;

        let msg = rx.recv().await.unwrap();
        assert_eq!(msg.to, connection_id);
        assert_eq!(
            signaling.events_for(&connection_id).await,
            vec![ServerEvent::Created]
        );
        assert_eq!(signaling.total().await, 1);
    }
}
