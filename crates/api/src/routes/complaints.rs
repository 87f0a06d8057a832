//! Route definitions for the `/complaints` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::complaints;
use crate::state::AppState;

/// Routes mounted at `/complaints`.
///
/// ```text
/// POST   /               -> submit (citizen only)
/// GET    /               -> role-scoped list with filters
/// GET    /stats          -> dashboard counters (admin only)
/// GET    /{id}           -> role-scoped read
/// DELETE /{id}           -> delete (admin only)
/// PUT    /{id}/assign    -> assign to employee (admin only)
/// PUT    /{id}/priority  -> set priority (admin only)
/// PUT    /{id}/resolve   -> resolve (assigned employee only)
/// GET    /{id}/events    -> durable event history
/// ```
///
/// `/stats` is registered before `/{id}` so Axum does not try to parse
/// the literal segment as a complaint id.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(complaints::list_complaints).post(complaints::submit_complaint),
        )
        .route("/stats", get(complaints::complaint_stats))
        .route(
            "/{id}",
            get(complaints::get_complaint).delete(complaints::delete_complaint),
        )
        .route("/{id}/assign", put(complaints::assign_complaint))
        .route("/{id}/priority", put(complaints::set_complaint_priority))
        .route("/{id}/resolve", put(complaints::resolve_complaint))
        .route("/{id}/events", get(complaints::list_complaint_events))
}
