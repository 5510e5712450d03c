use async_trait::async_trait;
use tandem_core::{ConnectionId, ServerEvent};

/// Whatever owns the client sockets implements this so the room manager can reach them.
#[async_trait]
pub trait SignalingOutput: Send + Sync {
    /// Hand `event` to the connection. Connections that are already gone are skipped.
    async fn deliver(&self, to: ConnectionId, event: ServerEvent);
}
