//! UseCase: サーバー統計の取得
//!
//! Aggregate counts only; room names are never listed.

use std::sync::Arc;

use crate::domain::RoomRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerStats {
    pub rooms: usize,
    pub participants: usize,
}

pub struct GetServerStatsUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl GetServerStatsUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> ServerStats {
        ServerStats {
            rooms: self.repository.room_count().await,
            participants: self.repository.participant_count().await,
        }
    }
}
