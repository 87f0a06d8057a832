//! Route definitions for the `/profiles` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::profiles;
use crate::state::AppState;

/// Routes mounted at `/profiles`.
///
/// ```text
/// GET /me  -> caller's own profile, including score
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/me", get(profiles::me))
}
