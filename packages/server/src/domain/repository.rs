//! Repository trait 定義
//!
//! ドメイン層が必要とするルームレジストリのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{Room, RoomId, RoomPassword, Timestamp};

/// A room behind its own lock. All in-room mutations go through this lock.
pub type SharedRoom = Arc<Mutex<Room>>;

/// Room Repository trait
///
/// Lock order is always registry map first, then a single room. The map is
/// held only for lookup, insert and delete.
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Fetch the room, creating it with `password` if it does not exist.
    ///
    /// An existing room is never replaced. The returned flag tells whether
    /// the room was created by this call; it must not reach clients.
    async fn get_or_create(
        &self,
        room_id: RoomId,
        password: &RoomPassword,
        now: Timestamp,
    ) -> (SharedRoom, bool);

    async fn find(&self, room_id: &RoomId) -> Option<SharedRoom>;

    /// Remove the room and its history. Unknown ids are a no-op.
    async fn delete(&self, room_id: &RoomId);

    /// Remove the room only if it still exists and has no participants.
    async fn evict_if_vacant(&self, room_id: &RoomId) -> bool;

    /// Remove every room inactive for longer than `max_idle`.
    async fn evict_idle(&self, now: Timestamp, max_idle: Duration) -> Vec<RoomId>;

    async fn room_count(&self) -> usize;

    async fn participant_count(&self) -> usize;
}
