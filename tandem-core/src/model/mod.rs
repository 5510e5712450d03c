mod connection;
mod room;
mod signaling;

pub use connection::ConnectionId;
pub use room::RoomName;
pub use signaling::{ClientEvent, IceServerConfig, ServerEvent, SignalKind};
