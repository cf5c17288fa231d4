//! UseCase: メディア準備完了の通知
//!
//! A joined participant announces that its camera and microphone are
//! available, so the others can start WebRTC offers towards it.

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, RoomId, RoomRepository, ServerEvent};

pub struct AnnounceReadyUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl AnnounceReadyUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// Tell every other member of the room that `connection_id` is ready.
    pub async fn execute(&self, room_id: &RoomId, connection_id: &ConnectionId) -> bool {
        let Some(shared) = self.repository.find(room_id).await else {
            return false;
        };
        let room = shared.lock().await;
        if room.participant(connection_id).is_none() {
            tracing::debug!(
                "Ignoring ready from '{}': not a member of '{}'",
                connection_id,
                room_id
            );
            return false;
        }

        let others = room.topic().members_except(connection_id);
        let event = ServerEvent::ParticipantReady {
            connection_id: connection_id.clone(),
        };
        if let Err(e) = self.message_pusher.broadcast(others, &event).await {
            tracing::warn!("Failed to announce ready in room '{}': {}", room_id, e);
        }
        true
    }
}
