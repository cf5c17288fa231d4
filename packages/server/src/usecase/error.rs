//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::{RoomError, ValueObjectError};

/// Reasons a join is refused. The `Display` text is what the client sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinError {
    /// Wrong password. Worded so it does not reveal whether the room exists.
    #[error("Invalid room or password")]
    InvalidCredentials,

    #[error("Room is full ({capacity} participants maximum)")]
    RoomFull { capacity: usize },

    #[error("Already joined a room")]
    AlreadyJoined,

    #[error("Invalid join request: {0}")]
    InvalidInput(#[from] ValueObjectError),
}

impl From<RoomError> for JoinError {
    fn from(error: RoomError) -> Self {
        match error {
            RoomError::RoomFull { capacity } => Self::RoomFull { capacity },
            RoomError::ParticipantAlreadyJoined(_) => Self::AlreadyJoined,
        }
    }
}
