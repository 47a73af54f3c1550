use quote_server::{init_logger_with_file, Config, Server, ServerState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Environment (dotenv is optional; real env vars win)
    let _ = dotenv::dotenv();
    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    tracing::info!("quote server starting...");

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Initialize state (store, repositories, services)
    let state = ServerState::initialize(&config).await;

    // 4. Run the HTTP server (background tasks start inside run)
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
