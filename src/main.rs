use callboard::application::{BroadcastGateway, CallBoardService, DEFAULT_CHANNEL_CAPACITY};
use callboard::config::Config;
use callboard::domain::call::CallHistoryStore;
use callboard::infrastructure::media::MediaLibrary;
use callboard::interface::api::{build_router, init_metrics, AppState};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing; RUST_LOG takes precedence over DEBUG
    let default_level = if config.server.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    info!("Starting call board");
    info!(
        "Configuration loaded: bind={}, debug={}, max_calls={}, media_folder={}, cors_origins={:?}",
        config.server.bind_address(),
        config.server.debug,
        config.board.max_calls,
        config.board.media_folder.display(),
        config.server.cors_origins
    );

    if config.server.uses_default_secret() {
        warn!("SECRET_KEY is not set, using the built-in default");
    }

    // Board state
    let store = Arc::new(CallHistoryStore::new(config.board.max_calls));
    let gateway = Arc::new(BroadcastGateway::new(store.clone(), DEFAULT_CHANNEL_CAPACITY));
    let board = Arc::new(CallBoardService::new(store, gateway));
    info!("Call history holds {} calls", config.board.max_calls);

    // Media list is scanned once
    let media = Arc::new(MediaLibrary::load_or_empty(&config.board.media_folder));

    info!("Initializing Prometheus metrics exporter");
    let prometheus = init_metrics()?;

    let state = AppState::new(board, media, prometheus);
    let app = build_router(state, &config.server);

    let listener = TcpListener::bind(config.server.bind_address()).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down...");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
