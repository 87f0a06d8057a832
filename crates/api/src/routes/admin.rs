//! Route definitions for the `/admin` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`. All handlers enforce the admin role.
///
/// ```text
/// GET  /employees  -> list employee accounts
/// POST /employees  -> provision an employee account
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/employees",
        get(admin::list_employees).post(admin::create_employee),
    )
}
