//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - 履歴への追加と、送信者を含む全員への配信
//!
//! ### どのような状況を想定しているか
//! - 正常系：メッセージ送信とブロードキャスト
//! - エッジケース：履歴上限を超えた場合、参加していない接続からの送信

use std::sync::Arc;

use roomcast_shared::time::Clock;

use crate::domain::{
    ChatMessage, ConnectionId, MessageAuthor, MessageContent, MessagePusher, RoomId,
    RoomRepository, ServerEvent, Timestamp,
};

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
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

    /// メッセージ送信を実行
    ///
    /// Returns `None` without side effects when the sender is not a member
    /// of the room (for example a frame that raced its own disconnect).
    pub async fn execute(
        &self,
        room_id: &RoomId,
        from: &ConnectionId,
        content: MessageContent,
    ) -> Option<ChatMessage> {
        let Some(shared) = self.repository.find(room_id).await else {
            tracing::debug!("Dropping message from '{}': room '{}' is gone", from, room_id);
            return None;
        };
        let mut room = shared.lock().await;

        let Some(username) = room.participant(from).map(|p| p.username.clone()) else {
            tracing::debug!("Dropping message from '{}': not a member of '{}'", from, room_id);
            return None;
        };

        let now = Timestamp::new(self.clock.now_millis());
        let message = room.append_message(
            MessageAuthor::Participant {
                connection_id: from.clone(),
                username,
            },
            content,
            now,
        );

        if let Err(e) = self
            .message_pusher
            .publish(room.topic(), &ServerEvent::ChatMessage(message.clone()))
            .await
        {
            tracing::warn!("Failed to broadcast message in room '{}': {}", room_id, e);
        }

        Some(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::dto::websocket::{MessageKindDto, ServerMessage};
    use crate::usecase::test_support::{Fixture, room_id};

    fn content(value: &str) -> MessageContent {
        MessageContent::new(value.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_send_message_reaches_everyone_including_sender() {
        // テスト項目: メッセージは送信者を含む全員に届き、送信者名はサーバー側で付与される
        // given (前提条件):
        let fixture = Fixture::new();
        let mut alice = fixture.join("standup", "alice", "p1").await;
        let mut bob = fixture.join("standup", "bob", "p1").await;
        alice.drain();
        bob.drain();

        // when (操作):
        let result = fixture
            .send
            .execute(&room_id("standup"), &alice.connection_id, content("hello"))
            .await;

        // then (期待する結果):
        assert!(result.is_some());
        for client in [&mut alice, &mut bob] {
            let frames = client.drain();
            assert_eq!(frames.len(), 1);
            let ServerMessage::ChatMessage { message } = &frames[0] else {
                panic!("expected chat-message");
            };
            assert_eq!(message.sender, "alice");
            assert_eq!(message.content, "hello");
            assert_eq!(message.kind, MessageKindDto::Text);
        }
    }

    #[tokio::test]
    async fn test_send_message_timestamp_comes_from_server_clock() {
        // テスト項目: タイムスタンプはサーバーの時計で決まる
        // given (前提条件):
        let fixture = Fixture::new();
        let alice = fixture.join("standup", "alice", "p1").await;
        fixture.clock.advance(5_000);

        // when (操作):
        let message = fixture
            .send
            .execute(&room_id("standup"), &alice.connection_id, content("hello"))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(message.timestamp, Timestamp::new(1_700_000_005_000));
    }

    #[tokio::test]
    async fn test_send_message_from_non_member_is_ignored() {
        // テスト項目: 参加していない接続からの送信は黙って捨てられる
        // given (前提条件):
        let fixture = Fixture::new();
        let mut alice = fixture.join("standup", "alice", "p1").await;
        alice.drain();
        let stranger = fixture.connect().await;

        // when (操作):
        let result = fixture
            .send
            .execute(&room_id("standup"), &stranger.connection_id, content("spam"))
            .await;

        // then (期待する結果):
        assert!(result.is_none());
        assert!(alice.drain().is_empty());
    }

    #[tokio::test]
    async fn test_send_message_to_missing_room_is_ignored() {
        // テスト項目: 存在しないルームへの送信は黙って捨てられる
        // given (前提条件):
        let fixture = Fixture::new();
        let alice = fixture.connect().await;

        // when (操作):
        let result = fixture
            .send
            .execute(&room_id("ghost"), &alice.connection_id, content("hello"))
            .await;

        // then (期待する結果):
        assert!(result.is_none());
        assert!(!fixture.room_exists("ghost").await);
    }

    #[tokio::test]
    async fn test_history_is_capped_to_most_recent() {
        // テスト項目: 履歴は上限件数の最新メッセージだけが追加順に残る
        // given (前提条件):
        let fixture = Fixture::with_limits(10, 5);
        let alice = fixture.join("standup", "alice", "p1").await;

        // when (操作):
        for i in 0..12 {
            fixture
                .send
                .execute(
                    &room_id("standup"),
                    &alice.connection_id,
                    content(&format!("m{}", i)),
                )
                .await;
        }

        // then (期待する結果):
        let room = fixture.repository.find(&room_id("standup")).await.unwrap();
        let history = room.lock().await.history();
        let contents: Vec<&str> = history.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["m7", "m8", "m9", "m10", "m11"]);
    }
}
