//! roomcast room coordinator.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin roomcast-server
//! cargo run --bin roomcast-server -- --host 0.0.0.0 --port 3000
//! PORT=3000 ROOMCAST_ROOM_CAPACITY=6 cargo run --bin roomcast-server
//! ```

use std::sync::Arc;

use clap::Parser;
use roomcast_server::{bootstrap::build_server, config::ServerConfig};
use roomcast_shared::{logger::setup_logger, time::SystemClock};

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();

    // Initialize tracing
    setup_logger("roomcast_server", env!("CARGO_BIN_NAME"), &config.log_level);

    if let Err(e) = config.validate() {
        tracing::error!("Invalid configuration: {}", e);
        std::process::exit(2);
    }
    tracing::debug!("{:?}", config);

    let server = build_server(&config, Arc::new(SystemClock));
    if let Err(e) = server.run(&config.bind_address()).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
