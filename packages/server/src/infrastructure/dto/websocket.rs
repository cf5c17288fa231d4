//! WebSocket frame DTOs.
//!
//! Every frame is a JSON object tagged by a kebab-case `type` field.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Frames sent by clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientMessage {
    JoinRoom {
        room_id: String,
        username: String,
        password: String,
    },
    SendMessage {
        content: String,
    },
    Signal {
        target_id: String,
        signal: Value,
    },
    MediaStatus {
        status: StatusPatchDto,
    },
    Ready,
    LeaveRoom,
}

/// Partial media status. Unknown keys reject the whole frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatusPatchDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_muted: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_video_on: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_screen_sharing: Option<bool>,
}

/// Frames sent by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerMessage {
    RoomJoined {
        room_id: String,
        connection_id: String,
        participants: Vec<ParticipantDto>,
        history: Vec<ChatMessageDto>,
    },
    RoomError {
        message: String,
    },
    ParticipantJoined {
        participant: ParticipantDto,
        participants: Vec<ParticipantDto>,
    },
    ParticipantUpdated {
        participant: ParticipantDto,
        participants: Vec<ParticipantDto>,
    },
    ParticipantLeft {
        connection_id: String,
        participants: Vec<ParticipantDto>,
    },
    ParticipantReady {
        connection_id: String,
    },
    ChatMessage {
        message: ChatMessageDto,
    },
    Signal {
        from_id: String,
        signal: Value,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantDto {
    pub connection_id: String,
    pub username: String,
    pub is_muted: bool,
    pub is_video_on: bool,
    pub is_screen_sharing: bool,
    /// RFC 3339
    pub joined_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKindDto {
    Text,
    System,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessageDto {
    pub id: u64,
    pub sender: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_id: Option<String>,
    pub content: String,
    pub kind: MessageKindDto,
    /// RFC 3339, set by the server
    pub timestamp: String,
}
