//! Server implementation
//!
//! HTTP server startup and graceful shutdown.

use crate::api;
use crate::core::{tasks, Config, ServerState};
use crate::utils::AppError;

pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create server with an existing state (shared with tests)
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    pub async fn run(&self) -> Result<(), AppError> {
        api::health::record_start();

        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config).await,
        };

        tasks::start_background_tasks(&state);

        let app = api::build_app().with_state(state);

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        tracing::info!(environment = %self.config.environment, "quote server starting on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| AppError::internal(format!("failed to bind {}: {}", addr, e)))?;

        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("shutting down...");
            })
            .await
            .map_err(|e| AppError::internal(format!("server error: {}", e)))?;

        Ok(())
    }
}
