use std::net::SocketAddr;

use axum::{Router, routing::get, routing::post};
use tokio::net::TcpListener;
use tower_http::decompression::RequestDecompressionLayer;
use tracing::info;

use super::{
    services::{create_snippet, get_snippet, health, list_latest},
    state::AppState,
};
use crate::config::Config;
use crate::store::FjallSnippetStore;

type AnyError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Build the application router. Shared with the integration tests so
/// they exercise the same routes and middleware as the real server.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/snippets", post(create_snippet))
        .route("/api/snippets/latest", get(list_latest))
        .route("/api/snippets/{id}", get(get_snippet))
        .route("/health", get(health))
        .with_state(state)
        // Transparently decompress gzip-encoded create payloads.
        .layer(RequestDecompressionLayer::new())
}

/// Run the HTTP server. A bind address given on the command line wins
/// over the configured one.
pub async fn run(address: Option<SocketAddr>) -> Result<(), AnyError> {
    info!("Loading configuration");
    let config = Config::load().map_err(|e| format!("Failed to load config: {}", e))?;

    let address = address.unwrap_or(config.server.bind_addr);

    info!(path = %config.server.store_path.display(), "Opening snippet store");
    let store = FjallSnippetStore::open(&config.server.store_path)
        .map_err(|e| format!("Failed to open snippet store: {}", e))?;
    let store_handle = store.clone();

    let state = AppState::new(config, store);
    let app = router(state);

    let listener = TcpListener::bind(address).await?;
    info!(%address, "snipbin API listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Flush pending writes before the process exits.
    store_handle.persist()?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        let mut sigterm = signal(SignalKind::terminate()).expect("failed to install signal handler");
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
