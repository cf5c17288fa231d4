//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! HashMap をインメモリのルームレジストリとして使用します。
//!
//! Each room sits behind its own `Mutex`, so operations on different rooms
//! never contend. The outer map lock is only taken to insert, look up or
//! remove rooms.

use std::{collections::HashMap, sync::Arc, time::Duration};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    DEFAULT_HISTORY_LIMIT, DEFAULT_PARTICIPANT_CAPACITY, Room, RoomId, RoomPassword,
    RoomRepository, SharedRoom, Timestamp,
};

/// インメモリ Room Repository 実装
pub struct InMemoryRoomRepository {
    rooms: Mutex<HashMap<RoomId, SharedRoom>>,
    participant_capacity: usize,
    history_limit: usize,
}

impl InMemoryRoomRepository {
    /// 既定の定員と履歴上限で作成
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_PARTICIPANT_CAPACITY, DEFAULT_HISTORY_LIMIT)
    }

    /// 新しく作られるルームに適用する定員と履歴上限を指定して作成
    pub fn with_limits(participant_capacity: usize, history_limit: usize) -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
            participant_capacity,
            history_limit,
        }
    }
}

impl Default for InMemoryRoomRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn get_or_create(
        &self,
        room_id: RoomId,
        password: &RoomPassword,
        now: Timestamp,
    ) -> (SharedRoom, bool) {
        let mut rooms = self.rooms.lock().await;

        if let Some(room) = rooms.get(&room_id) {
            return (room.clone(), false);
        }

        let room = Arc::new(Mutex::new(Room::with_capacity(
            room_id.clone(),
            password,
            now,
            self.participant_capacity,
            self.history_limit,
        )));
        rooms.insert(room_id.clone(), room.clone());
        tracing::info!("Room '{}' created ({} rooms live)", room_id, rooms.len());

        (room, true)
    }

    async fn find(&self, room_id: &RoomId) -> Option<SharedRoom> {
        let rooms = self.rooms.lock().await;
        rooms.get(room_id).cloned()
    }

    async fn delete(&self, room_id: &RoomId) {
        let mut rooms = self.rooms.lock().await;
        if let Some(room) = rooms.remove(room_id) {
            let mut room = room.lock().await;
            room.cancel_eviction();
            room.mark_evicted();
            tracing::info!("Room '{}' deleted", room_id);
        }
    }

    async fn evict_if_vacant(&self, room_id: &RoomId) -> bool {
        let mut rooms = self.rooms.lock().await;
        let Some(shared) = rooms.get(room_id).cloned() else {
            return false;
        };

        let mut room = shared.lock().await;
        if !room.is_empty() {
            tracing::debug!(
                "Room '{}' has {} participants, skipping eviction",
                room_id,
                room.participant_count()
            );
            return false;
        }

        room.mark_evicted();
        rooms.remove(room_id);
        tracing::info!("Room '{}' evicted after staying empty", room_id);
        true
    }

    async fn evict_idle(&self, now: Timestamp, max_idle: Duration) -> Vec<RoomId> {
        let max_idle_millis = u64::try_from(max_idle.as_millis()).unwrap_or(u64::MAX);
        let mut rooms = self.rooms.lock().await;

        let mut evicted = Vec::new();
        for (room_id, shared) in rooms.iter() {
            let mut room = shared.lock().await;
            if now.millis_since(room.last_activity_at) > max_idle_millis {
                room.cancel_eviction();
                room.mark_evicted();
                evicted.push(room_id.clone());
            }
        }

        for room_id in &evicted {
            rooms.remove(room_id);
            tracing::info!("Room '{}' evicted after inactivity", room_id);
        }

        evicted
    }

    async fn room_count(&self) -> usize {
        let rooms = self.rooms.lock().await;
        rooms.len()
    }

    async fn participant_count(&self) -> usize {
        let rooms: Vec<SharedRoom> = {
            let rooms = self.rooms.lock().await;
            rooms.values().cloned().collect()
        };

        let mut total = 0;
        for room in rooms {
            total += room.lock().await.participant_count();
        }
        total
    }
}
