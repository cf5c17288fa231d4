//! System notices appended to a room's history and published to its members.

use crate::domain::{MessageAuthor, MessageContent, MessagePusher, Room, ServerEvent, Timestamp};

pub(crate) async fn announce(
    room: &mut Room,
    message_pusher: &dyn MessagePusher,
    text: String,
    now: Timestamp,
) {
    let content = match MessageContent::new(text) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!("Skipping system notice for room '{}': {}", room.id, e);
            return;
        }
    };

    let message = room.append_message(MessageAuthor::System, content, now);
    if let Err(e) = message_pusher
        .publish(room.topic(), &ServerEvent::ChatMessage(message))
        .await
    {
        tracing::warn!("Failed to publish system notice to room '{}': {}", room.id, e);
    }
}

pub(crate) fn joined_notice(username: &str) -> String {
    format!("{} has joined the room", username)
}

pub(crate) fn left_notice(username: &str) -> String {
    format!("{} has left the room", username)
}
