//! Server setup and lifecycle.

use crate::api::router;
use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::service::GameService;
use lingo_core::{Dictionary, Engine};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, instrument, warn};

/// Loads the dictionary, starts the reaper and serves until Ctrl+C.
///
/// # Errors
///
/// Returns [`ServerError`] if the dictionary cannot be loaded or the
/// listener cannot be bound.
#[instrument(skip(config), fields(host = %config.host(), port = config.port()))]
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let dictionary = Dictionary::load(config.dictionary())?;
    let service = GameService::new(Arc::new(dictionary), Engine::new(*config.rules()));

    let reaper = service
        .store()
        .spawn_reaper(config.reap_interval(), config.session_ttl());

    let app = router(service);
    let listener = TcpListener::bind((config.host().as_str(), *config.port())).await?;
    info!("Lingo server listening on http://{}:{}", config.host(), config.port());

    let result = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    reaper.abort();
    info!("Lingo server shut down");
    result.map_err(ServerError::from)
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C, initiating graceful shutdown"),
        Err(e) => {
            warn!(error = %e, "Failed to listen for Ctrl+C, serving until the process is killed");
            std::future::pending::<()>().await;
        }
    }
}
