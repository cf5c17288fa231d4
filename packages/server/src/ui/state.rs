//! Shared application state.

use std::sync::Arc;

use crate::usecase::{
    AnnounceReadyUseCase, ConnectParticipantUseCase, DisconnectParticipantUseCase,
    GetServerStatsUseCase, JoinRoomUseCase, RelaySignalUseCase, SendMessageUseCase,
    UpdateStatusUseCase,
};

/// One handle per use case, shared by every connection.
pub struct AppState {
    /// ConnectParticipantUseCase（接続受付のユースケース）
    pub connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    /// JoinRoomUseCase（入室のユースケース）
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    pub send_message_usecase: Arc<SendMessageUseCase>,
    pub relay_signal_usecase: Arc<RelaySignalUseCase>,
    pub update_status_usecase: Arc<UpdateStatusUseCase>,
    pub announce_ready_usecase: Arc<AnnounceReadyUseCase>,
    /// DisconnectParticipantUseCase（参加者切断のユースケース）
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    pub get_server_stats_usecase: Arc<GetServerStatsUseCase>,
}
