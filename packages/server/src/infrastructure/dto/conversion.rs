//! Conversion logic between DTOs and domain types.

use roomcast_shared::time::timestamp_to_rfc3339;

use crate::domain::{ChatMessage, MessageKind, Participant, ServerEvent, StatusPatch};
use crate::infrastructure::dto::websocket as dto;

// ========================================
// DTO → Domain
// ========================================

impl From<dto::StatusPatchDto> for StatusPatch {
    fn from(dto: dto::StatusPatchDto) -> Self {
        Self {
            is_muted: dto.is_muted,
            is_video_on: dto.is_video_on,
            is_screen_sharing: dto.is_screen_sharing,
        }
    }
}

// ========================================
// Domain → DTO
// ========================================

impl From<&Participant> for dto::ParticipantDto {
    fn from(model: &Participant) -> Self {
        Self {
            connection_id: model.connection_id.to_string(),
            username: model.username.to_string(),
            is_muted: model.is_muted,
            is_video_on: model.is_video_on,
            is_screen_sharing: model.is_screen_sharing,
            joined_at: timestamp_to_rfc3339(model.joined_at.value()),
        }
    }
}

impl From<MessageKind> for dto::MessageKindDto {
    fn from(kind: MessageKind) -> Self {
        match kind {
            MessageKind::Text => Self::Text,
            MessageKind::System => Self::System,
        }
    }
}

impl From<&ChatMessage> for dto::ChatMessageDto {
    fn from(model: &ChatMessage) -> Self {
        Self {
            id: model.id,
            sender: model.sender.clone(),
            sender_id: model.sender_id.as_ref().map(ToString::to_string),
            content: model.content.as_str().to_string(),
            kind: model.kind.into(),
            timestamp: timestamp_to_rfc3339(model.timestamp.value()),
        }
    }
}

fn roster(participants: &[Participant]) -> Vec<dto::ParticipantDto> {
    participants.iter().map(Into::into).collect()
}

impl From<&ServerEvent> for dto::ServerMessage {
    fn from(event: &ServerEvent) -> Self {
        match event {
            ServerEvent::RoomJoined {
                room_id,
                connection_id,
                participants,
                history,
            } => Self::RoomJoined {
                room_id: room_id.to_string(),
                connection_id: connection_id.to_string(),
                participants: roster(participants),
                history: history.iter().map(Into::into).collect(),
            },
            ServerEvent::JoinRejected { reason } => Self::RoomError {
                message: reason.clone(),
            },
            ServerEvent::ParticipantJoined {
                participant,
                participants,
            } => Self::ParticipantJoined {
                participant: participant.into(),
                participants: roster(participants),
            },
            ServerEvent::ParticipantUpdated {
                participant,
                participants,
            } => Self::ParticipantUpdated {
                participant: participant.into(),
                participants: roster(participants),
            },
            ServerEvent::ParticipantLeft {
                connection_id,
                participants,
            } => Self::ParticipantLeft {
                connection_id: connection_id.to_string(),
                participants: roster(participants),
            },
            ServerEvent::ParticipantReady { connection_id } => Self::ParticipantReady {
                connection_id: connection_id.to_string(),
            },
            ServerEvent::ChatMessage(message) => Self::ChatMessage {
                message: message.into(),
            },
            ServerEvent::Signal { from, payload } => Self::Signal {
                from_id: from.to_string(),
                signal: payload.as_value().clone(),
            },
        }
    }
}
