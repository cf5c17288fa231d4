//! Server configuration.
//!
//! Every option can be given on the command line or through the environment;
//! command-line flags win.

use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use crate::domain::{DEFAULT_HISTORY_LIMIT, DEFAULT_PARTICIPANT_CAPACITY};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
/// How long an empty room keeps its password and history.
pub const DEFAULT_EMPTY_ROOM_GRACE_SECS: u64 = 5 * 60;
pub const DEFAULT_IDLE_ROOM_TIMEOUT_SECS: u64 = 24 * 60 * 60;
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 6 * 60 * 60;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "roomcast-server")]
#[command(about = "Room coordinator for group video calls: chat history and WebRTC signaling", long_about = None)]
pub struct ServerConfig {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "ROOMCAST_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Maximum participants per room
    #[arg(long, env = "ROOMCAST_ROOM_CAPACITY", default_value_t = DEFAULT_PARTICIPANT_CAPACITY)]
    pub room_capacity: usize,

    /// Chat messages kept per room
    #[arg(long, env = "ROOMCAST_HISTORY_LIMIT", default_value_t = DEFAULT_HISTORY_LIMIT)]
    pub history_limit: usize,

    /// Seconds an empty room survives before it is evicted
    #[arg(long, env = "ROOMCAST_EMPTY_ROOM_GRACE_SECS", default_value_t = DEFAULT_EMPTY_ROOM_GRACE_SECS)]
    pub empty_room_grace_secs: u64,

    /// Seconds without activity after which any room is evicted
    #[arg(long, env = "ROOMCAST_IDLE_ROOM_TIMEOUT_SECS", default_value_t = DEFAULT_IDLE_ROOM_TIMEOUT_SECS)]
    pub idle_room_timeout_secs: u64,

    /// Seconds between idle-room sweeps
    #[arg(long, env = "ROOMCAST_SWEEP_INTERVAL_SECS", default_value_t = DEFAULT_SWEEP_INTERVAL_SECS)]
    pub sweep_interval_secs: u64,

    /// Default log level when RUST_LOG is unset
    #[arg(long, env = "ROOMCAST_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn empty_room_grace(&self) -> Duration {
        Duration::from_secs(self.empty_room_grace_secs)
    }

    pub fn idle_room_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_room_timeout_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.room_capacity == 0 {
            return Err(ConfigError::Zero("room capacity"));
        }
        if self.history_limit == 0 {
            return Err(ConfigError::Zero("history limit"));
        }
        if self.sweep_interval_secs == 0 {
            return Err(ConfigError::Zero("sweep interval"));
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            room_capacity: DEFAULT_PARTICIPANT_CAPACITY,
            history_limit: DEFAULT_HISTORY_LIMIT,
            empty_room_grace_secs: DEFAULT_EMPTY_ROOM_GRACE_SECS,
            idle_room_timeout_secs: DEFAULT_IDLE_ROOM_TIMEOUT_SECS,
            sweep_interval_secs: DEFAULT_SWEEP_INTERVAL_SECS,
            log_level: "info".to_string(),
        }
    }
}
