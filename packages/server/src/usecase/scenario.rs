//! End-to-end room lifecycle across use cases: create, join, chat, leave,
//! go empty and come back within the grace period.

use std::time::Duration;

use crate::domain::{MessageContent, RoomPassword, RoomRepository};
use crate::infrastructure::dto::websocket::ServerMessage;
use crate::usecase::JoinError;
use crate::usecase::test_support::{Fixture, request, room_id};

fn chat_contents(frames: &[ServerMessage]) -> Vec<String> {
    frames
        .iter()
        .filter_map(|frame| match frame {
            ServerMessage::ChatMessage { message } => Some(message.content.clone()),
            _ => None,
        })
        .collect()
}

#[tokio::test(start_paused = true)]
async fn test_standup_lifecycle() {
    // テスト項目: ルーム作成から空室、猶予時間内の再参加までの一連の流れ
    // given (前提条件): alice が standup を作成
    let fixture = Fixture::new();
    let mut alice = fixture.join("standup", "alice", "p1").await;
    alice.drain();
    {
        let shared = fixture.repository.find(&room_id("standup")).await.unwrap();
        let room = shared.lock().await;
        assert!(room.authenticate(&RoomPassword::new("p1".to_string()).unwrap()));
        assert!(!room.authenticate(&RoomPassword::new("wrong".to_string()).unwrap()));
    }
    let mallory = fixture.connect().await;
    let refused = fixture
        .join
        .execute(mallory.connection_id.clone(), request("standup", "mallory", "wrong"))
        .await;
    assert_eq!(refused, Err(JoinError::InvalidCredentials));

    // when (操作): bob が参加
    let mut bob = fixture.join("standup", "bob", "p1").await;

    // then (期待する結果): 両者が 2 人の名簿を受け取り、bob は alice の入室通知を履歴で受け取る
    let bob_frames = bob.drain();
    let ServerMessage::RoomJoined {
        participants,
        history,
        ..
    } = &bob_frames[0]
    else {
        panic!("expected room-joined");
    };
    assert_eq!(participants.len(), 2);
    assert_eq!(history[0].content, "alice has joined the room");
    let alice_frames = alice.drain();
    assert!(alice_frames.iter().any(|frame| matches!(
        frame,
        ServerMessage::ParticipantJoined { participants, .. } if participants.len() == 2
    )));

    // when (操作): alice が発言
    fixture
        .send
        .execute(
            &room_id("standup"),
            &alice.connection_id,
            MessageContent::new("hello".to_string()).unwrap(),
        )
        .await;

    // then (期待する結果): 両者が同じメッセージを受け取る
    for client in [&mut alice, &mut bob] {
        let frames = client.drain();
        assert!(frames.iter().any(|frame| matches!(
            frame,
            ServerMessage::ChatMessage { message }
                if message.sender == "alice" && message.content == "hello"
        )));
    }

    // when (操作): bob が切断
    fixture
        .disconnect
        .execute(&bob.connection_id, Some(room_id("standup")))
        .await;

    // then (期待する結果): alice には 1 人の名簿と退室通知、回収は予約されない
    let frames = alice.drain();
    assert_eq!(chat_contents(&frames), vec!["bob has left the room"]);
    assert!(frames.iter().any(|frame| matches!(
        frame,
        ServerMessage::ParticipantLeft { participants, .. } if participants.len() == 1
    )));
    let shared = fixture.repository.find(&room_id("standup")).await.unwrap();
    assert!(!shared.lock().await.has_pending_eviction());

    // when (操作): alice も切断し、4 分後に carol が参加
    fixture
        .disconnect
        .execute(&alice.connection_id, Some(room_id("standup")))
        .await;
    assert!(shared.lock().await.has_pending_eviction());
    tokio::time::sleep(Duration::from_secs(4 * 60)).await;
    let mut carol = fixture.connect().await;
    fixture
        .join
        .execute(carol.connection_id.clone(), request("standup", "carol", "p1"))
        .await
        .unwrap();

    // then (期待する結果): carol は過去の履歴をすべて受け取り、ルームはその後も回収されない
    let frames = carol.drain();
    let ServerMessage::RoomJoined { history, .. } = &frames[0] else {
        panic!("expected room-joined");
    };
    let contents: Vec<&str> = history.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(
        contents,
        vec![
            "alice has joined the room",
            "bob has joined the room",
            "hello",
            "bob has left the room",
            "alice has left the room",
        ]
    );
    tokio::time::sleep(Duration::from_secs(10 * 60)).await;
    assert!(fixture.room_exists("standup").await);
}
