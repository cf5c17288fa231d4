//! Domain layer: room model, value objects and the interfaces the use cases
//! depend on.

pub mod connection;
pub mod entity;
pub mod error;
pub mod event;
pub mod message_pusher;
pub mod repository;
pub mod topic;
pub mod value_object;

pub use connection::ConnectionState;
pub use entity::{
    ChatMessage, DEFAULT_HISTORY_LIMIT, DEFAULT_PARTICIPANT_CAPACITY, MessageAuthor, MessageKind,
    Participant, Room, SYSTEM_SENDER, StatusPatch,
};
pub use error::{MessagePushError, RoomError, ValueObjectError};
pub use event::{ServerEvent, SignalPayload};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::{RoomRepository, SharedRoom};
pub use topic::Topic;
pub use value_object::{
    ConnectionId, MessageContent, RoomId, RoomPassword, RoomSecret, Timestamp, Username,
};

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
