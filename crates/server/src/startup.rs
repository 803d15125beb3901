use std::net::SocketAddr;

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    let raw = format!("{}:{}", cfg.server.host, cfg.server.port);
    raw.parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address {raw}: {e}")))
}

/// Build the application router from a validated configuration.
pub fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let state = ServerState::from_config(cfg)?;
    Ok(routes::build_router(state, build_cors()))
}

/// Public entry: build the app and run the HTTP server until Ctrl+C
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    common::env::warn_missing(&["API_URL", "NODE_ENV"]);

    let app = build_app(&cfg)?;
    let addr = bind_addr(&cfg)?;
    info!(
        %addr,
        api_url = %cfg.api.url,
        node_env = %cfg.api.node_env,
        "starting portal server"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received, draining connections");
        })
        .await?;
    Ok(())
}
