use std::sync::Arc;

use atelier_service::storage::FileStorage;

use crate::config::ServerConfig;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: atelier_db::DbPool,
    /// Server configuration (JWT secrets, CORS origins, upload root).
    pub config: Arc<ServerConfig>,
    /// WebSocket connection manager (browser clients).
    pub ws_manager: Arc<WsManager>,
    /// Event bus carrying stored notifications to the push fanout.
    pub event_bus: Arc<atelier_events::EventBus>,
    /// Writes image uploads below the configured root.
    pub storage: FileStorage,
}
