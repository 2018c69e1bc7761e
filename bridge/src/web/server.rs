// File: bridge/src/web/server.rs
use crate::config::BridgeConfig;
use crate::constants::server::BIND_HOST;
use crate::registry::RequestRegistry;
use crate::web::{handlers, AppState};
use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub async fn start_web_server(config: Arc<BridgeConfig>, registry: Arc<RequestRegistry>) -> Result<()> {
    let state = AppState::new(registry, config.static_dir.clone());

    let app = create_router(state);
    let addr = format!("{}:{}", BIND_HOST, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Wallet bridge listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn create_router(state: AppState) -> Router {
    let spa_fallback = get(handlers::spa_fallback).with_state(state.clone());

    Router::new()
        // === REGISTRY ROUTES ===
        .route("/api/pending/{id}", get(handlers::get_pending_request))
        .route("/api/complete/{id}", post(handlers::complete_request))
        .route("/api/health", get(handlers::health))
        // === STATIC UI BUNDLE ===
        .fallback_service(ServeDir::new(&state.static_dir).not_found_service(spa_fallback))
        // Add middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
