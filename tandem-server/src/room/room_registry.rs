use crate::error::{ForwardError, JoinError};
use crate::room::Room;
use std::collections::HashMap;
use tandem_core::{ConnectionId, RoomName};
use tracing::info;

/// Role handed out on a successful join, decided purely by arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleAssignment {
    /// First occupant. Makes the offer once a peer shows up.
    Created,
    /// Second occupant. `peer` is the first occupant, who must be told the room is ready.
    JoinedReady { peer: ConnectionId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    pub room: RoomName,
    pub remaining: usize,
}

/// Room membership bookkeeping. Holds connection ids, never the connections themselves.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: HashMap<RoomName, Room>,
    memberships: HashMap<ConnectionId, RoomName>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admits `connection_id` into `room`, creating the room on first use.
    ///
    /// A connection already sitting in another room leaves it first, but only
    /// once the new room is known to have space.
    pub fn join(
        &mut self,
        connection_id: ConnectionId,
        room: &str,
    ) -> Result<(RoomName, RoleAssignment), JoinError> {
        let name = RoomName::parse(room).ok_or(JoinError::MissingRoomName)?;

        let rejoining = self.memberships.get(&connection_id) == Some(&name);
        if !rejoining && self.rooms.get(&name).is_some_and(Room::is_full) {
            return Err(JoinError::RoomFull { room: name });
        }

        self.leave(&connection_id);

        let room = self.rooms.entry(name.clone()).or_insert_with(|| {
            info!("Creating new room: {}", name);
            Room::new(name.clone())
        });
        room.admit(connection_id);

        let role = match room.members() {
            [first, _] => RoleAssignment::JoinedReady { peer: *first },
            _ => RoleAssignment::Created,
        };

        self.memberships.insert(connection_id, name.clone());
        Ok((name, role))
    }

    /// Removes the connection from its room. The room is dropped once empty.
    pub fn leave(&mut self, connection_id: &ConnectionId) -> Option<Departure> {
        let name = self.memberships.remove(connection_id)?;
        let room = self.rooms.get_mut(&name)?;
        room.remove(connection_id);

        let remaining = room.len();
        if room.is_empty() {
            self.rooms.remove(&name);
            info!("Room {} is empty, removing it", name);
        }

        Some(Departure {
            room: name,
            remaining,
        })
    }

    /// Everyone in `room` besides the sender, provided the sender is a member.
    pub fn recipients(
        &self,
        sender: &ConnectionId,
        room: &str,
    ) -> Result<Vec<ConnectionId>, ForwardError> {
        let target = RoomName::parse(room)
            .and_then(|name| self.rooms.get(&name))
            .ok_or_else(|| ForwardError::UnknownRoom(room.to_owned()))?;

        if !target.contains(sender) {
            return Err(ForwardError::NotAMember(target.name().clone()));
        }

        Ok(target.others(sender).collect())
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn member_count(&self, room: &str) -> usize {
        self.members(room).len()
    }

    /// Members in join order. Empty for rooms that do not exist.
    pub fn members(&self, room: &str) -> &[ConnectionId] {
        RoomName::parse(room)
            .and_then(|name| self.rooms.get(&name))
            .map(Room::members)
            .unwrap_or_default()
    }

    pub fn room_of(&self, connection_id: &ConnectionId) -> Option<&RoomName> {
        self.memberships.get(connection_id)
    }
}
