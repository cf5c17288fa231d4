//! UseCase: 空室になったルームの回収予約
//!
//! An empty room is kept for a grace period so participants can reload and
//! rejoin with their history intact. The timer is a spawned task whose
//! abort handle lives in the room; a join aborts it, and the task re-checks
//! vacancy when it fires.

use std::{sync::Arc, time::Duration};

use crate::domain::{Room, RoomRepository};

pub struct RoomEvictionScheduler {
    repository: Arc<dyn RoomRepository>,
    grace: Duration,
}

impl RoomEvictionScheduler {
    pub fn new(repository: Arc<dyn RoomRepository>, grace: Duration) -> Self {
        Self { repository, grace }
    }

    /// Arm (or re-arm) eviction of `room`. The caller holds the room lock.
    pub fn schedule(&self, room: &mut Room) {
        let repository = self.repository.clone();
        let room_id = room.id.clone();
        let grace = self.grace;

        let task = tokio::spawn(async move {
            tokio::time::sleep(grace).await;
            repository.evict_if_vacant(&room_id).await;
        });
        room.arm_eviction(task.abort_handle());

        tracing::debug!(
            "Room '{}' is empty, eviction in {}s",
            room.id,
            grace.as_secs()
        );
    }
}
