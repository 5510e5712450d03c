use serde_json::Value;
use tandem_core::{ConnectionId, ServerEvent, SignalKind};

/// Commands the socket handlers send to the room manager.
#[derive(Debug, Clone)]
pub enum RoomCommand {
    /// Client asked to enter a room. The name is validated by the registry.
    Join {
        connection_id: ConnectionId,
        room: String,
    },

    /// Offer, answer or candidate addressed to the rest of `room`.
    Signal {
        connection_id: ConnectionId,
        room: String,
        kind: SignalKind,
        payload: Value,
    },

    /// The socket is gone.
    Disconnect { connection_id: ConnectionId },
}

/// An event addressed to one connection, produced by handling a [`RoomCommand`].
#[derive(Debug, Clone, PartialEq)]
pub struct Outbound {
    pub to: ConnectionId,
    pub event: ServerEvent,
}

impl Outbound {
    pub fn new(to: ConnectionId, event: ServerEvent) -> Self {
        Self { to, event }
    }
}
