use tandem_core::RoomName;
use thiserror::Error;

/// Reasons a join is refused. Reported back to the requesting connection only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinError {
    #[error("room '{room}' already has two participants")]
    RoomFull { room: RoomName },

    #[error("join request is missing a room name")]
    MissingRoomName,
}

/// Reasons a signal is dropped. Expected during disconnect races, never sent to the client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForwardError {
    #[error("room '{0}' has no members")]
    UnknownRoom(String),

    #[error("sender is not a member of room '{0}'")]
    NotAMember(RoomName),
}
