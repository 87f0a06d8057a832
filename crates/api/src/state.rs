use std::sync::Arc;

use crate::config::ServerConfig;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: civiclink_db::DbPool,
    /// Server configuration (JWT secrets, CORS, admin signup code).
    pub config: Arc<ServerConfig>,
    /// WebSocket connection manager (dashboard clients).
    pub ws_manager: Arc<WsManager>,
    /// Centralized event bus for publishing complaint feed events.
    pub event_bus: Arc<civiclink_events::EventBus>,
}
