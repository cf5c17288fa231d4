//! Per-connection lifecycle state.
//!
//! ```text
//! Connected ──join──▶ Joined(room) ──disconnect──▶ Disconnected
//!     └───────────────disconnect─────────────────────▲
//! ```

use super::RoomId;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Connected,
    Joined(RoomId),
    Disconnected,
}

impl ConnectionState {
    pub fn joined_room(&self) -> Option<&RoomId> {
        match self {
            Self::Joined(room_id) => Some(room_id),
            _ => None,
        }
    }

    /// Only a connection that has not joined yet may join.
    pub fn can_join(&self) -> bool {
        matches!(self, Self::Connected)
    }

    pub fn join(&mut self, room_id: RoomId) {
        if self.can_join() {
            *self = Self::Joined(room_id);
        }
    }

    /// Drop a room that no longer lists this connection (swept while the
    /// socket stayed open), so the connection may join again.
    pub fn release(&mut self) -> Option<RoomId> {
        match self {
            Self::Joined(_) => match std::mem::replace(self, Self::Connected) {
                Self::Joined(room_id) => Some(room_id),
                _ => None,
            },
            _ => None,
        }
    }

    /// Move to the terminal state, returning the room that was left, if any.
    pub fn disconnect(&mut self) -> Option<RoomId> {
        match std::mem::replace(self, Self::Disconnected) {
            Self::Joined(room_id) => Some(room_id),
            _ => None,
        }
    }
}
