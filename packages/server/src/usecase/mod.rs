//! UseCase layer: one struct per client-visible operation.
//!
//! Every use case that touches a room locks it once and keeps the lock
//! across the state change and the resulting pushes, so clients never see
//! a broadcast that disagrees with the stored state.

mod announce_ready;
mod connect_participant;
mod disconnect_participant;
mod error;
mod evict_room;
mod get_server_stats;
mod join_room;
mod notice;
mod relay_signal;
mod send_message;
mod sweep_idle_rooms;
mod update_status;

#[cfg(test)]
mod scenario;
#[cfg(test)]
mod test_support;

pub use announce_ready::AnnounceReadyUseCase;
pub use connect_participant::ConnectParticipantUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::JoinError;
pub use evict_room::RoomEvictionScheduler;
pub use get_server_stats::{GetServerStatsUseCase, ServerStats};
pub use join_room::{JoinRequest, JoinRoomUseCase};
pub use relay_signal::RelaySignalUseCase;
pub use send_message::SendMessageUseCase;
pub use sweep_idle_rooms::SweepIdleRoomsUseCase;
pub use update_status::UpdateStatusUseCase;
