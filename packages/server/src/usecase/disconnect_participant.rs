//! UseCase: 参加者切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - 退室通知、参加者一覧の再配信、空室時の回収予約
//!
//! ### なぜこのテストが必要か
//! - 切断時に残りの参加者へ正しい一覧が届くことを保証
//! - 同じ接続の切断が二重に処理されても副作用が一度だけであることを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加者の退室と通知
//! - エッジケース：最後の参加者の退室（回収予約）、二重の切断
//! - 異常系：ルームに参加していない接続の切断

use std::sync::Arc;

use roomcast_shared::time::Clock;

use super::{RoomEvictionScheduler, notice};
use crate::domain::{
    ConnectionId, MessagePusher, Participant, RoomId, RoomRepository, ServerEvent, Timestamp,
};

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
    eviction_scheduler: Arc<RoomEvictionScheduler>,
}

impl DisconnectParticipantUseCase {
    /// 新しい DisconnectParticipantUseCase を作成
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
        eviction_scheduler: Arc<RoomEvictionScheduler>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            clock,
            eviction_scheduler,
        }
    }

    /// 参加者切断を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 切断する接続の ID
    /// * `room_id` - 接続が参加していたルーム（未参加なら `None`）
    ///
    /// # Returns
    ///
    /// 実際にルームから取り除かれた参加者。二回目以降の呼び出しや、
    /// どのルームにも参加していなかった場合は `None`。
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        room_id: Option<RoomId>,
    ) -> Option<Participant> {
        // 1. 送信チャンネルを先に外し、退室後の配信が届かないようにする
        self.message_pusher.unregister_client(connection_id).await;

        let room_id = room_id?;
        let Some(shared) = self.repository.find(&room_id).await else {
            tracing::debug!(
                "Room '{}' already gone when '{}' disconnected",
                room_id,
                connection_id
            );
            return None;
        };

        // 2. ルームのロックを保持したまま削除と通知を行う
        let mut room = shared.lock().await;
        let participant = room.remove_participant(connection_id)?;

        let now = Timestamp::new(self.clock.now_millis());
        notice::announce(
            &mut room,
            self.message_pusher.as_ref(),
            notice::left_notice(participant.username.as_str()),
            now,
        )
        .await;

        let event = ServerEvent::ParticipantLeft {
            connection_id: connection_id.clone(),
            participants: room.roster(),
        };
        if let Err(e) = self.message_pusher.publish(room.topic(), &event).await {
            tracing::warn!("Failed to broadcast participant-left: {}", e);
        }

        tracing::info!(
            "'{}' ({}) left room '{}' ({} participants)",
            participant.username,
            connection_id,
            room_id,
            room.participant_count()
        );

        // 3. 空室になったら猶予付きで回収を予約
        if room.is_empty() {
            self.eviction_scheduler.schedule(&mut room);
        }

        Some(participant)
    }
}
