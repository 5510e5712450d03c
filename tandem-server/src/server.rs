use crate::config::ServerConfig;
use crate::room::RoomManager;
use crate::signaling::{SignalingService, ws_handler};
use anyhow::Context;
use axum::{Router, routing::get};
use std::future::Future;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Wires a signaling service to a freshly spawned room manager.
///
/// Must be called from within a tokio runtime.
pub fn spawn_signaling(config: &ServerConfig) -> anyhow::Result<SignalingService> {
    let ice_servers = config.ice_servers.clone();
    let (_, service, _) = RoomManager::spawn(config.command_buffer, |cmd_tx| {
        SignalingService::new(cmd_tx, ice_servers)
    })
    .context("Invalid server configuration")?;

    Ok(service)
}

pub fn router(service: SignalingService) -> Router {
    // The UI may be served from anywhere.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/ws", get(ws_handler))
        .layer(cors)
        .with_state(service)
}

/// Serves signaling on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(
    listener: TcpListener,
    config: &ServerConfig,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(spawn_signaling(config)?);

    let addr = listener.local_addr().context("Listener has no local address")?;
    info!("Signaling server listening on ws://{}/ws", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("Signaling server terminated unexpectedly")
}

pub async fn run<F>(config: ServerConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if config.command_buffer == 0 {
        anyhow::bail!("command buffer must be at least 1");
    }

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    serve(listener, &config, shutdown).await
}
