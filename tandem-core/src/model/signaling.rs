use crate::model::connection::ConnectionId;
use crate::model::room::RoomName;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IceServerConfig {
    pub urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential: Option<String>,
}

impl IceServerConfig {
    pub fn stun(url: impl Into<String>) -> Self {
        Self {
            urls: vec![url.into()],
            username: None,
            credential: None,
        }
    }
}

/// Negotiation payloads the relay forwards between room members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    Offer,
    Answer,
    Candidate,
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SignalKind::Offer => "offer",
            SignalKind::Answer => "answer",
            SignalKind::Candidate => "candidate",
        };
        f.write_str(name)
    }
}

/// Frames a browser sends to the server.
///
/// Room names arrive unvalidated; the registry decides whether they are usable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "d", rename_all = "snake_case")]
pub enum ClientEvent {
    Join(String),
    Offer { room: String, offer: Value },
    Answer { room: String, answer: Value },
    Candidate { room: String, candidate: Value },
}

impl ClientEvent {
    /// Splits a negotiation frame into its room, kind and opaque payload.
    pub fn into_signal(self) -> Option<(String, SignalKind, Value)> {
        match self {
            ClientEvent::Join(_) => None,
            ClientEvent::Offer { room, offer } => Some((room, SignalKind::Offer, offer)),
            ClientEvent::Answer { room, answer } => Some((room, SignalKind::Answer, answer)),
            ClientEvent::Candidate { room, candidate } => {
                Some((room, SignalKind::Candidate, candidate))
            }
        }
    }
}

/// Frames the server sends to a browser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "d", rename_all = "snake_case")]
pub enum ServerEvent {
    Welcome { connection_id: ConnectionId },
    IceConfig { ice_servers: Vec<IceServerConfig> },
    /// First member of the room.
    Created,
    /// Second member of the room.
    Joined,
    /// Sent to the first member once the second one arrives. The receiver makes the offer.
    Ready,
    Full { room: RoomName },
    Error { message: String },
    Offer(Value),
    Answer(Value),
    Candidate(Value),
}

impl ServerEvent {
    pub fn signal(kind: SignalKind, payload: Value) -> Self {
        match kind {
            SignalKind::Offer => ServerEvent::Offer(payload),
            SignalKind::Answer => ServerEvent::Answer(payload),
            SignalKind::Candidate => ServerEvent::Candidate(payload),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ServerEvent::Error {
            message: message.into(),
        }
    }
}
