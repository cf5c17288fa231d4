//! Shared fixtures for the use case tests.

use std::{sync::Arc, time::Duration};

use roomcast_shared::time::ManualClock;
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, MessagePusher, RoomId, RoomRepository},
    infrastructure::{
        dto::websocket::ServerMessage, message_pusher::WebSocketMessagePusher,
        repository::InMemoryRoomRepository,
    },
};

use super::{
    AnnounceReadyUseCase, ConnectParticipantUseCase, DisconnectParticipantUseCase, JoinRequest,
    JoinRoomUseCase, RelaySignalUseCase, RoomEvictionScheduler, SendMessageUseCase,
    SweepIdleRoomsUseCase, UpdateStatusUseCase,
};

pub const GRACE: Duration = Duration::from_secs(300);
pub const MAX_IDLE: Duration = Duration::from_secs(24 * 60 * 60);

/// A connected test client and the frames pushed to it.
pub struct TestClient {
    pub connection_id: ConnectionId,
    rx: mpsc::UnboundedReceiver<String>,
}

impl TestClient {
    /// Drain every frame received so far.
    pub fn drain(&mut self) -> Vec<ServerMessage> {
        let mut frames = Vec::new();
        while let Ok(json) = self.rx.try_recv() {
            frames.push(serde_json::from_str(&json).unwrap());
        }
        frames
    }
}

/// Every use case wired to a real in-memory repository and pusher.
pub struct Fixture {
    pub repository: Arc<InMemoryRoomRepository>,
    pub clock: Arc<ManualClock>,
    pub connect: ConnectParticipantUseCase,
    pub join: JoinRoomUseCase,
    pub send: SendMessageUseCase,
    pub relay: RelaySignalUseCase,
    pub update_status: UpdateStatusUseCase,
    pub ready: AnnounceReadyUseCase,
    pub disconnect: DisconnectParticipantUseCase,
    pub sweep: SweepIdleRoomsUseCase,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_limits(10, 100)
    }

    pub fn with_limits(participant_capacity: usize, history_limit: usize) -> Self {
        let repository = Arc::new(InMemoryRoomRepository::with_limits(
            participant_capacity,
            history_limit,
        ));
        let pusher: Arc<dyn MessagePusher> = Arc::new(WebSocketMessagePusher::default());
        let clock = Arc::new(ManualClock::new(1_700_000_000_000));
        let scheduler = Arc::new(RoomEvictionScheduler::new(repository.clone(), GRACE));

        Self {
            connect: ConnectParticipantUseCase::new(pusher.clone()),
            join: JoinRoomUseCase::new(repository.clone(), pusher.clone(), clock.clone()),
            send: SendMessageUseCase::new(repository.clone(), pusher.clone(), clock.clone()),
            relay: RelaySignalUseCase::new(pusher.clone()),
            update_status: UpdateStatusUseCase::new(
                repository.clone(),
                pusher.clone(),
                clock.clone(),
            ),
            ready: AnnounceReadyUseCase::new(repository.clone(), pusher.clone()),
            disconnect: DisconnectParticipantUseCase::new(
                repository.clone(),
                pusher.clone(),
                clock.clone(),
                scheduler,
            ),
            sweep: SweepIdleRoomsUseCase::new(repository.clone(), clock.clone(), MAX_IDLE),
            repository,
            clock,
        }
    }

    pub async fn connect(&self) -> TestClient {
        let (tx, rx) = mpsc::unbounded_channel();
        let connection_id = self.connect.execute(tx).await;
        TestClient { connection_id, rx }
    }

    /// Connect and join, panicking if the join is refused.
    pub async fn join(&self, room: &str, username: &str, password: &str) -> TestClient {
        let client = self.connect().await;
        self.join
            .execute(client.connection_id.clone(), request(room, username, password))
            .await
            .unwrap();
        client
    }

    pub async fn room_exists(&self, room: &str) -> bool {
        self.repository.find(&room_id(room)).await.is_some()
    }
}

pub fn room_id(value: &str) -> RoomId {
    RoomId::new(value.to_string()).unwrap()
}

pub fn request(room: &str, username: &str, password: &str) -> JoinRequest {
    JoinRequest::parse(
        room.to_string(),
        username.to_string(),
        password.to_string(),
    )
    .unwrap()
}
