use anyhow::{Context, Result};
use axum::{middleware, routing::get, Router};
use tracing::info;

use super::legacy_routes::legacy_routes;
use super::sdvx_routes::sdvx_routes;
use super::{log_requests, state::ServerState, ServerConfig};
use crate::legacy::LegacyLibrary;
use crate::sdvx::SdvxManager;

pub const HOME_TEXT: &str = "MaoMaNi - Finder Service Living...";

async fn home() -> &'static str {
    HOME_TEXT
}

pub fn make_app(config: ServerConfig, sdvx: SdvxManager, legacy: LegacyLibrary) -> Router {
    let state = ServerState::new(config, sdvx, legacy);

    let legacy_router: Router = Router::new()
        .route("/", get(home))
        .merge(legacy_routes())
        .with_state(state.clone());

    let sdvx_router: Router = sdvx_routes().with_state(state.clone());

    legacy_router
        .nest("/sdvx", sdvx_router)
        .layer(middleware::from_fn_with_state(state, log_requests))
}

pub async fn run_server(
    config: ServerConfig,
    sdvx: SdvxManager,
    legacy: LegacyLibrary,
) -> Result<()> {
    let address = format!("{}:{}", config.address, config.port);
    let app = make_app(config, sdvx, legacy);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!("server listen on {}", address);

    Ok(axum::serve(listener, app).await?)
}
