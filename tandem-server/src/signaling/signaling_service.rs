use crate::room::RoomCommand;
use crate::signaling::SignalingOutput;
use async_trait::async_trait;
use axum::extract::ws::Message;
use dashmap::DashMap;
use std::sync::Arc;
use tandem_core::{ConnectionId, IceServerConfig, ServerEvent};
use tokio::sync::mpsc;
use tracing::{error, warn};

struct SignalingInner {
    connections: DashMap<ConnectionId, mpsc::UnboundedSender<Message>>,
    ice_servers: Vec<IceServerConfig>,
}

/// Registry of live sockets plus the command queue into the room manager.
#[derive(Clone)]
pub struct SignalingService {
    inner: Arc<SignalingInner>,
    pub(crate) room_cmd_tx: mpsc::Sender<RoomCommand>,
}

impl SignalingService {
    pub fn new(
        room_cmd_tx: mpsc::Sender<RoomCommand>,
        ice_servers: Vec<IceServerConfig>,
    ) -> Self {
        Self {
            inner: Arc::new(SignalingInner {
                connections: DashMap::new(),
                ice_servers,
            }),
            room_cmd_tx,
        }
    }

    pub fn ice_servers(&self) -> Vec<IceServerConfig> {
        self.inner.ice_servers.clone()
    }

    /// Number of sockets currently registered.
    pub fn connection_count(&self) -> usize {
        self.inner.connections.len()
    }

    pub fn add_connection(
        &self,
        connection_id: ConnectionId,
        tx: mpsc::UnboundedSender<Message>,
    ) {
        self.inner.connections.insert(connection_id, tx);
    }

    pub fn remove_connection(&self, connection_id: &ConnectionId) {
        self.inner.connections.remove(connection_id);
    }

    /// Queues a command for the room manager. Returns `false` once the manager has stopped.
    pub async fn submit(&self, cmd: RoomCommand) -> bool {
        match self.room_cmd_tx.send(cmd).await {
            Ok(()) => true,
            Err(e) => {
                error!("Room manager is gone, dropping {:?}", e.0);
                false
            }
        }
    }

    pub fn send_event(&self, connection_id: &ConnectionId, event: &ServerEvent) {
        let Some(connection) = self.inner.connections.get(connection_id) else {
            warn!(
                "Attempted to send {:?} to disconnected connection {}",
                event, connection_id
            );
            return;
        };

        match serde_json::to_string(event) {
            Ok(json) => {
                if let Err(e) = connection.send(Message::Text(json.into())) {
                    error!("Failed to send WS message to {}: {:?}", connection_id, e);
                }
            }
            Err(e) => error!("Failed to serialize server event: {}", e),
        }
    }
}

#[async_trait]
impl SignalingOutput for SignalingService {
    async fn deliver(&self, to: ConnectionId, event: ServerEvent) {
        self.send_event(&to, &event);
    }
}
