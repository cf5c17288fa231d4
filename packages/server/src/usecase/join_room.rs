//! UseCase: ルームへの参加
//!
//! ## 処理の流れ
//!
//! 1. ルームを取得（なければ作成）
//! 2. パスワードを検証
//! 3. 定員を確認して参加者を追加
//! 4. 参加者本人に名簿と履歴を送信し、他の参加者に通知
//! 5. 参加のシステムメッセージを履歴に追加して全員に配信
//!
//! ## テスト実装の作業記録
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規ルームの作成と既存ルームへの参加
//! - 異常系：パスワード違い、定員超過
//! - エッジケース：回収待ちのルームへの再参加、同時参加での定員超過

use std::sync::Arc;

use roomcast_shared::time::Clock;

use crate::domain::{
    ConnectionId, MessagePusher, Participant, RoomId, RoomPassword, RoomRepository, ServerEvent,
    Timestamp, Username,
};

use super::{error::JoinError, notice};

/// Validated join request
#[derive(Debug, Clone)]
pub struct JoinRequest {
    pub room_id: RoomId,
    pub username: Username,
    pub password: RoomPassword,
}

impl JoinRequest {
    pub fn parse(room_id: String, username: String, password: String) -> Result<Self, JoinError> {
        Ok(Self {
            room_id: RoomId::try_from(room_id)?,
            username: Username::try_from(username)?,
            password: RoomPassword::try_from(password)?,
        })
    }
}

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl JoinRoomUseCase {
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

    /// 参加を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Participant)` - 参加した参加者
    /// * `Err(JoinError)` - 参加拒否（ルームの状態は変わらない）
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        request: JoinRequest,
    ) -> Result<Participant, JoinError> {
        loop {
            let now = Timestamp::new(self.clock.now_millis());
            let (shared, created) = self
                .repository
                .get_or_create(request.room_id.clone(), &request.password, now)
                .await;
            let mut room = shared.lock().await;

            // The registry dropped this room between lookup and lock.
            if room.is_evicted() {
                tracing::debug!("Room '{}' was evicted during join, retrying", room.id);
                continue;
            }

            if !room.authenticate(&request.password) {
                tracing::warn!(
                    "Connection '{}' failed to authenticate for room '{}'",
                    connection_id,
                    room.id
                );
                return Err(JoinError::InvalidCredentials);
            }

            let participant =
                Participant::new(connection_id.clone(), request.username.clone(), now);
            let participants = room.admit(participant.clone(), now).map_err(|e| {
                tracing::warn!(
                    "Connection '{}' refused by room '{}': {}",
                    connection_id,
                    room.id,
                    e
                );
                JoinError::from(e)
            })?;

            if room.cancel_eviction() {
                tracing::info!("Room '{}' is active again, eviction cancelled", room.id);
            }

            let joined = ServerEvent::RoomJoined {
                room_id: room.id.clone(),
                connection_id: connection_id.clone(),
                participants: participants.clone(),
                history: room.history(),
            };
            if let Err(e) = self.message_pusher.push_to(&connection_id, &joined).await {
                tracing::warn!("Failed to acknowledge join to '{}': {}", connection_id, e);
            }

            let announcement = ServerEvent::ParticipantJoined {
                participant: participant.clone(),
                participants,
            };
            if let Err(e) = self
                .message_pusher
                .broadcast(room.topic().members_except(&connection_id), &announcement)
                .await
            {
                tracing::warn!("Failed to broadcast participant-joined: {}", e);
            }

            notice::announce(
                &mut room,
                self.message_pusher.as_ref(),
                notice::joined_notice(participant.username.as_str()),
                now,
            )
            .await;

            tracing::info!(
                "'{}' ({}) joined room '{}'{} ({} participants)",
                participant.username,
                connection_id,
                room.id,
                if created { " [created]" } else { "" },
                room.participant_count()
            );

            return Ok(participant);
        }
    }

    /// Whether `connection_id` is still a participant of `room_id`. False once
    /// the room has been evicted, even if the connection never left it.
    pub async fn is_member(&self, room_id: &RoomId, connection_id: &ConnectionId) -> bool {
        match self.repository.find(room_id).await {
            Some(shared) => shared.lock().await.participant(connection_id).is_some(),
            None => false,
        }
    }

    /// Tell only the refused connection why its join failed.
    pub async fn reject(&self, connection_id: &ConnectionId, error: &JoinError) {
        let event = ServerEvent::JoinRejected {
            reason: error.to_string(),
        };
        if let Err(e) = self.message_pusher.push_to(connection_id, &event).await {
            tracing::debug!("Could not deliver join rejection to '{}': {}", connection_id, e);
        }
    }
}
