//! Server execution logic.

use std::{future::Future, sync::Arc, time::Duration};

use axum::{Router, routing::get};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::usecase::SweepIdleRoomsUseCase;

use super::{
    handler::{get_stats, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Room coordinator server
///
/// Owns the shared state and the idle-room sweeper, which runs for as long
/// as the server is serving.
///
/// # Example
///
/// ```ignore
/// let server = build_server(&config, Arc::new(SystemClock));
/// server.run(&config.bind_address()).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
    sweeper: Arc<SweepIdleRoomsUseCase>,
    sweep_interval: Duration,
}

impl Server {
    pub fn new(
        state: AppState,
        sweeper: Arc<SweepIdleRoomsUseCase>,
        sweep_interval: Duration,
    ) -> Self {
        Self {
            state: Arc::new(state),
            sweeper,
            sweep_interval,
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/stats", get(get_stats))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.router();
        let sweeper = self.sweeper.clone().spawn(self.sweep_interval);

        let result = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await;

        sweeper.abort();
        tracing::info!("Server shutdown complete");
        result.map_err(ServerError::from)
    }

    /// Bind `addr` (`host:port`) and serve until SIGINT or SIGTERM.
    pub async fn run(self, addr: &str) -> Result<(), ServerError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: addr.to_string(),
                source,
            })?;

        tracing::info!("roomcast server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await
    }
}
