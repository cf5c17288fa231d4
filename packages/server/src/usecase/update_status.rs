//! UseCase: メディア状態（ミュート・カメラ・画面共有）の更新

use std::sync::Arc;

use roomcast_shared::time::Clock;

use crate::domain::{
    ConnectionId, MessagePusher, Participant, RoomId, RoomRepository, ServerEvent, StatusPatch,
    Timestamp,
};

pub struct UpdateStatusUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl UpdateStatusUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            clock,
        }
    }

    /// Apply `patch` and broadcast the updated participant with the roster.
    ///
    /// Only the fields present in the patch change. An empty patch or a
    /// connection that is not in the room is a no-op.
    pub async fn execute(
        &self,
        room_id: &RoomId,
        connection_id: &ConnectionId,
        patch: StatusPatch,
    ) -> Option<Participant> {
        if patch.is_empty() {
            return None;
        }

        let shared = self.repository.find(room_id).await?;
        let mut room = shared.lock().await;

        let now = Timestamp::new(self.clock.now_millis());
        let Some(participant) = room.update_status(connection_id, &patch, now) else {
            tracing::debug!(
                "Ignoring status update from '{}': not a member of '{}'",
                connection_id,
                room_id
            );
            return None;
        };

        let event = ServerEvent::ParticipantUpdated {
            participant: participant.clone(),
            participants: room.roster(),
        };
        if let Err(e) = self.message_pusher.publish(room.topic(), &event).await {
            tracing::warn!("Failed to broadcast status in room '{}': {}", room_id, e);
        }

        Some(participant)
    }
}
