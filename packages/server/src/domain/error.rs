//! Domain error types.

use thiserror::Error;

/// Validation failure when constructing a value object
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("invalid connection id: '{0}'")]
    InvalidConnectionId(String),
}

/// Room invariant violations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    #[error("Room is full ({capacity} participants maximum)")]
    RoomFull { capacity: usize },

    #[error("Connection '{0}' is already a participant")]
    ParticipantAlreadyJoined(String),
}

/// Outbound delivery failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("Client '{0}' is not connected")]
    ClientNotFound(String),

    #[error("Failed to push message: {0}")]
    PushFailed(String),
}
