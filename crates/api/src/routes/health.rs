use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Payload for the liveness probe.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `"ok"` when every probe passes, `"degraded"` otherwise.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether `SELECT 1` succeeded against the pool.
    pub db_healthy: bool,
    /// Live WebSocket connections at the time of the probe.
    pub ws_connections: usize,
}

/// GET /health -- service, database, and push-channel health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = atelier_db::health_check(&state.pool).await.is_ok();
    let ws_connections = state.ws_manager.connection_count().await;

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        ws_connections,
    })
}

/// Health routes; mounted at the root, not under `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
