//! Composition root: wires repository, pusher and use cases into a server.

use std::sync::Arc;

use roomcast_shared::time::Clock;

use crate::{
    config::ServerConfig,
    domain::{MessagePusher, RoomRepository},
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryRoomRepository},
    ui::{Server, state::AppState},
    usecase::{
        AnnounceReadyUseCase, ConnectParticipantUseCase, DisconnectParticipantUseCase,
        GetServerStatsUseCase, JoinRoomUseCase, RelaySignalUseCase, RoomEvictionScheduler,
        SendMessageUseCase, SweepIdleRoomsUseCase, UpdateStatusUseCase,
    },
};

/// Build a server from `config`, reading time from `clock`.
pub fn build_server(config: &ServerConfig, clock: Arc<dyn Clock>) -> Server {
    // 1. Repository (in-memory room registry)
    let repository: Arc<dyn RoomRepository> = Arc::new(InMemoryRoomRepository::with_limits(
        config.room_capacity,
        config.history_limit,
    ));

    // 2. MessagePusher (WebSocket implementation)
    let message_pusher: Arc<dyn MessagePusher> = Arc::new(WebSocketMessagePusher::default());

    // 3. UseCases
    let eviction_scheduler = Arc::new(RoomEvictionScheduler::new(
        repository.clone(),
        config.empty_room_grace(),
    ));
    let state = AppState {
        connect_participant_usecase: Arc::new(ConnectParticipantUseCase::new(
            message_pusher.clone(),
        )),
        join_room_usecase: Arc::new(JoinRoomUseCase::new(
            repository.clone(),
            message_pusher.clone(),
            clock.clone(),
        )),
        send_message_usecase: Arc::new(SendMessageUseCase::new(
            repository.clone(),
            message_pusher.clone(),
            clock.clone(),
        )),
        relay_signal_usecase: Arc::new(RelaySignalUseCase::new(message_pusher.clone())),
        update_status_usecase: Arc::new(UpdateStatusUseCase::new(
            repository.clone(),
            message_pusher.clone(),
            clock.clone(),
        )),
        announce_ready_usecase: Arc::new(AnnounceReadyUseCase::new(
            repository.clone(),
            message_pusher.clone(),
        )),
        disconnect_participant_usecase: Arc::new(DisconnectParticipantUseCase::new(
            repository.clone(),
            message_pusher.clone(),
            clock.clone(),
            eviction_scheduler,
        )),
        get_server_stats_usecase: Arc::new(GetServerStatsUseCase::new(repository.clone())),
    };
    let sweeper = Arc::new(SweepIdleRoomsUseCase::new(
        repository,
        clock,
        config.idle_room_timeout(),
    ));

    // 4. Server
    Server::new(state, sweeper, config.sweep_interval())
}
