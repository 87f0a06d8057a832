//! Handlers for the `/profiles` resource.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use civiclink_core::error::CoreError;
use civiclink_db::models::profile::ProfileResponse;
use civiclink_db::repositories::ProfileRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/profiles/me
///
/// The caller's own profile, including the citizen gamification score.
pub async fn me(auth: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let profile = ProfileRepo::find_by_id(&state.pool, auth.profile_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id: auth.profile_id,
        }))?;

    Ok(Json(DataResponse {
        data: ProfileResponse::from(profile),
    }))
}
