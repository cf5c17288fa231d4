//! Events pushed from the coordinator to client connections.

use serde_json::Value;

use super::{ChatMessage, ConnectionId, Participant, RoomId};

/// Opaque WebRTC negotiation payload (offer, answer or ICE candidate).
///
/// The server forwards it verbatim and never looks inside.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalPayload(Value);

impl SignalPayload {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ServerEvent {
    /// Sent to the joiner only, with the roster and the history snapshot
    RoomJoined {
        room_id: RoomId,
        connection_id: ConnectionId,
        participants: Vec<Participant>,
        history: Vec<ChatMessage>,
    },
    /// Sent to the joiner only
    JoinRejected { reason: String },
    ParticipantJoined {
        participant: Participant,
        participants: Vec<Participant>,
    },
    ParticipantUpdated {
        participant: Participant,
        participants: Vec<Participant>,
    },
    ParticipantLeft {
        connection_id: ConnectionId,
        participants: Vec<Participant>,
    },
    ParticipantReady { connection_id: ConnectionId },
    ChatMessage(ChatMessage),
    Signal {
        from: ConnectionId,
        payload: SignalPayload,
    },
}
