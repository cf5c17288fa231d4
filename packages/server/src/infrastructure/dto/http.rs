//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Aggregate counters. Room names are never exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsDto {
    pub rooms: usize,
    pub participants: usize,
}
