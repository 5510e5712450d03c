use tandem_core::{ConnectionId, RoomName};

/// A call has exactly two ends.
pub const ROOM_CAPACITY: usize = 2;

/// Members of a single room in arrival order. The order decides roles.
#[derive(Debug, Clone)]
pub struct Room {
    name: RoomName,
    members: Vec<ConnectionId>,
}

impl Room {
    pub fn new(name: RoomName) -> Self {
        Self {
            name,
            members: Vec::with_capacity(ROOM_CAPACITY),
        }
    }

    pub fn name(&self) -> &RoomName {
        &self.name
    }

    pub fn members(&self) -> &[ConnectionId] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= ROOM_CAPACITY
    }

    pub fn contains(&self, connection_id: &ConnectionId) -> bool {
        self.members.contains(connection_id)
    }

    /// Caller checks capacity first.
    pub(crate) fn admit(&mut self, connection_id: ConnectionId) {
        debug_assert!(!self.is_full());
        self.members.push(connection_id);
    }

    pub(crate) fn remove(&mut self, connection_id: &ConnectionId) -> bool {
        let before = self.members.len();
        self.members.retain(|id| id != connection_id);
        self.members.len() != before
    }

    /// Everyone in the room except `connection_id`.
    pub fn others<'a>(
        &'a self,
        connection_id: &'a ConnectionId,
    ) -> impl Iterator<Item = ConnectionId> + 'a {
        self.members
            .iter()
            .copied()
            .filter(move |id| id != connection_id)
    }
}
