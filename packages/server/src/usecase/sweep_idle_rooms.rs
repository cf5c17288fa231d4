//! UseCase: 長時間操作のないルームの定期回収

use std::{sync::Arc, time::Duration};

use roomcast_shared::time::Clock;
use tokio::{task::JoinHandle, time::MissedTickBehavior};

use crate::domain::{RoomId, RoomRepository, Timestamp};

pub struct SweepIdleRoomsUseCase {
    repository: Arc<dyn RoomRepository>,
    clock: Arc<dyn Clock>,
    max_idle: Duration,
}

impl SweepIdleRoomsUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        clock: Arc<dyn Clock>,
        max_idle: Duration,
    ) -> Self {
        Self {
            repository,
            clock,
            max_idle,
        }
    }

    /// Drop every room whose last activity is older than `max_idle`,
    /// whether or not anyone is still connected to it.
    pub async fn execute(&self) -> Vec<RoomId> {
        let now = Timestamp::new(self.clock.now_millis());
        let evicted = self.repository.evict_idle(now, self.max_idle).await;
        if !evicted.is_empty() {
            tracing::info!("Idle sweep evicted {} room(s)", evicted.len());
        }
        evicted
    }

    /// Run [`execute`](Self::execute) every `every`, starting one period from now.
    pub fn spawn(self: Arc<Self>, every: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // the first tick completes immediately
            interval.tick().await;
            loop {
                interval.tick().await;
                self.execute().await;
            }
        })
    }
}
