// File: bridge/src/web/handlers.rs
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Json, Response},
};
use serde_json::json;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::constants::server::INDEX_FILE;
use crate::types::CompleteRequest;
use crate::web::AppState;

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Request not found" })),
    )
        .into_response()
}

fn invalid_body() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": "Invalid request body" })),
    )
        .into_response()
}

// The id space is UUID-shaped; anything else cannot name an entry
fn parse_request_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw).ok()
}

// === REGISTRY ENDPOINTS ===

/// `GET /api/pending/{id}` — read-only lookup of a pending request.
pub async fn get_pending_request(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Response {
    let Some(id) = parse_request_id(&id) else {
        return not_found();
    };

    match state.registry.get(id).await {
        Some(request) => (StatusCode::OK, Json(json!({ "request": request }))).into_response(),
        None => not_found(),
    }
}

/// `POST /api/complete/{id}` — deliver the browser's outcome.
///
/// Check order matters: an unknown id is 404 before the body is looked at,
/// and a malformed body is 400 with the registry untouched. A `complete`
/// that loses the race against the timeout is answered 404, same as any
/// entry that no longer exists.
pub async fn complete_request(
    Path(id): Path<String>,
    State(state): State<AppState>,
    body: Bytes,
) -> Response {
    let Some(id) = parse_request_id(&id) else {
        return not_found();
    };

    if !state.registry.has(id).await {
        return not_found();
    }

    let payload: CompleteRequest = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            debug!("Rejected completion body for {}: {}", id, e);
            return invalid_body();
        }
    };

    if state.registry.complete(id, payload.into_result()).await {
        (StatusCode::OK, Json(json!({ "ok": true }))).into_response()
    } else {
        // Raced by the timeout between the existence check and here
        warn!("Request {} vanished before completion was applied", id);
        not_found()
    }
}

/// `GET /api/health` — liveness probe with the current pending count.
pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "pendingRequests": state.registry.size().await,
    }))
}

// === STATIC / SPA FALLBACK ===

/// Serves the SPA entry document for extension-less paths the asset
/// directory could not resolve. Paths that look like assets (they carry an
/// extension) stay 404, as do unmatched `/api/*` paths.
pub async fn spa_fallback(State(state): State<AppState>, uri: Uri) -> Response {
    let path = uri.path();

    if path.starts_with("/api/") {
        return not_found();
    }

    let last_segment = path.rsplit('/').next().unwrap_or("");
    if last_segment.contains('.') {
        return StatusCode::NOT_FOUND.into_response();
    }

    let index_path = std::path::Path::new(&state.static_dir).join(INDEX_FILE);
    match tokio::fs::read_to_string(&index_path).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            warn!("UI bundle missing at {}: {}", index_path.display(), e);
            StatusCode::NOT_FOUND.into_response()
        }
    }
}
