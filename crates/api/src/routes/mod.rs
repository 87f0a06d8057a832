pub mod admin;
pub mod auth;
pub mod complaints;
pub mod health;
pub mod profiles;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                                WebSocket event feed (JWT via query)
///
/// /auth/signup                       signup (public)
/// /auth/login                        login (public)
/// /auth/refresh                      refresh (public)
/// /auth/logout                       logout (requires auth)
///
/// /profiles/me                       caller's own profile + score
///
/// /admin/employees                   list, provision (admin only)
///
/// /complaints                        submit (citizen), role-scoped list
/// /complaints/stats                  dashboard counters (admin only)
/// /complaints/{id}                   role-scoped read, delete (admin)
/// /complaints/{id}/assign            assign to employee (admin)
/// /complaints/{id}/priority          set priority (admin)
/// /complaints/{id}/resolve           resolve (assigned employee)
/// /complaints/{id}/events            durable event history
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Real-time event feed.
        .route("/ws", get(ws::ws_handler))
        // Authentication.
        .nest("/auth", auth::router())
        // Profile self-service.
        .nest("/profiles", profiles::router())
        // Admin: employee provisioning.
        .nest("/admin", admin::router())
        // Complaint lifecycle.
        .nest("/complaints", complaints::router())
}
