//! UseCase: WebRTC シグナリングの中継
//!
//! Negotiation payloads go to exactly one connection, addressed by its
//! connection id. The payload is forwarded untouched, and room membership
//! is not checked: a peer that just left may still need the last answer.

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePushError, MessagePusher, ServerEvent, SignalPayload};

pub struct RelaySignalUseCase {
    message_pusher: Arc<dyn MessagePusher>,
}

impl RelaySignalUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// Forward `payload` to `target`, tagged with the sender's id.
    ///
    /// Returns whether it was handed to a live connection. A missing
    /// target or a self-addressed signal is dropped silently.
    pub async fn execute(
        &self,
        from: &ConnectionId,
        target: &ConnectionId,
        payload: SignalPayload,
    ) -> bool {
        if from == target {
            tracing::debug!("Dropping self-addressed signal from '{}'", from);
            return false;
        }

        let event = ServerEvent::Signal {
            from: from.clone(),
            payload,
        };
        match self.message_pusher.push_to(target, &event).await {
            Ok(()) => {
                tracing::debug!("Relayed signal '{}' -> '{}'", from, target);
                true
            }
            Err(MessagePushError::ClientNotFound(_)) => {
                tracing::debug!("Signal target '{}' is gone, dropping", target);
                false
            }
            Err(e) => {
                tracing::debug!("Signal to '{}' dropped: {}", target, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MockMessagePusher;
    use crate::infrastructure::dto::websocket::ServerMessage;
    use crate::usecase::test_support::Fixture;
    use serde_json::json;

    #[tokio::test]
    async fn test_relay_reaches_only_target() {
        // テスト項目: シグナルは宛先の接続にだけ届き、送信者には返らない
        // given (前提条件):
        let fixture = Fixture::new();
        let mut alice = fixture.join("standup", "alice", "p1").await;
        let mut bob = fixture.join("standup", "bob", "p1").await;
        let mut carol = fixture.join("standup", "carol", "p1").await;
        for client in [&mut alice, &mut bob, &mut carol] {
            client.drain();
        }
        let offer = json!({"type": "offer", "sdp": "v=0\r\n"});

        // when (操作):
        let delivered = fixture
            .relay
            .execute(
                &alice.connection_id,
                &bob.connection_id,
                SignalPayload::new(offer.clone()),
            )
            .await;

        // then (期待する結果):
        assert!(delivered);
        assert_eq!(
            bob.drain(),
            vec![ServerMessage::Signal {
                from_id: alice.connection_id.to_string(),
                signal: offer,
            }]
        );
        assert!(alice.drain().is_empty());
        assert!(carol.drain().is_empty());
    }

    #[tokio::test]
    async fn test_relay_works_across_rooms() {
        // テスト項目: 同じルームにいない接続にも中継される
        // given (前提条件):
        let fixture = Fixture::new();
        let alice = fixture.join("standup", "alice", "p1").await;
        let mut bob = fixture.connect().await;

        // when (操作):
        let delivered = fixture
            .relay
            .execute(
                &alice.connection_id,
                &bob.connection_id,
                SignalPayload::new(json!({"candidate": "a"})),
            )
            .await;

        // then (期待する結果):
        assert!(delivered);
        assert_eq!(bob.drain().len(), 1);
    }

    #[tokio::test]
    async fn test_relay_to_gone_target_is_dropped() {
        // テスト項目: 切断済みの宛先へのシグナルは黙って捨てられる
        // given (前提条件):
        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_push_to()
            .times(1)
            .returning(|target, _| Err(MessagePushError::ClientNotFound(target.to_string())));
        let usecase = RelaySignalUseCase::new(Arc::new(pusher));

        // when (操作):
        let delivered = usecase
            .execute(
                &ConnectionId::generate(),
                &ConnectionId::generate(),
                SignalPayload::new(json!({})),
            )
            .await;

        // then (期待する結果):
        assert!(!delivered);
    }

    #[tokio::test]
    async fn test_relay_to_self_is_dropped() {
        // テスト項目: 自分宛てのシグナルは送信されない
        // given (前提条件):
        let mut pusher = MockMessagePusher::new();
        pusher.expect_push_to().times(0);
        let usecase = RelaySignalUseCase::new(Arc::new(pusher));
        let alice = ConnectionId::generate();

        // when (操作):
        let delivered = usecase
            .execute(&alice, &alice, SignalPayload::new(json!({"type": "offer"})))
            .await;

        // then (期待する結果):
        assert!(!delivered);
    }
}
