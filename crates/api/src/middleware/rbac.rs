//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does not
//! meet the minimum requirement. These provide the coarse role gate; the
//! per-complaint ownership rules live in `civiclink_core::policy` and are
//! evaluated inside the handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use civiclink_core::error::CoreError;
use civiclink_core::roles::{ROLE_ADMIN, ROLE_CITIZEN, ROLE_EMPLOYEE};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     // user is guaranteed to be an admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Requires the `employee` role. Rejects with 403 Forbidden otherwise.
///
/// Resolution is an employee action by policy: admins do not pass this gate.
pub struct RequireEmployee(pub AuthUser);

impl FromRequestParts<AppState> for RequireEmployee {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_EMPLOYEE {
            return Err(AppError::Core(CoreError::Forbidden(
                "Employee role required".into(),
            )));
        }
        Ok(RequireEmployee(user))
    }
}

/// Requires the `citizen` role. Rejects with 403 Forbidden otherwise.
///
/// Submission is a citizen action: officials report through their citizen
/// accounts like everyone else.
pub struct RequireCitizen(pub AuthUser);

impl FromRequestParts<AppState> for RequireCitizen {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_CITIZEN {
            return Err(AppError::Core(CoreError::Forbidden(
                "Citizen role required".into(),
            )));
        }
        Ok(RequireCitizen(user))
    }
}
