use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use glowcheck_orchestrator::Orchestrator;

use crate::routes;
use crate::ui;

/// Application state shared across routes.
#[derive(Clone)]
pub struct GatewayState {
    pub orchestrator: Arc<Orchestrator>,
}

/// Build the router with all routes and middleware.
pub fn build_router(state: GatewayState) -> Router {
    Router::new()
        .route("/", get(ui::index))
        .route("/api/health", get(routes::health))
        .route("/api/preview", post(routes::preview))
        .route("/api/analyze", post(routes::analyze))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the HTTP server.
pub async fn start_server(addr: SocketAddr, state: GatewayState) -> Result<()> {
    let app = build_router(state);

    info!("glowcheck gateway listening on http://{}", addr);
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
