//! Admin-only handlers: employee provisioning.
//!
//! Employees cannot self-register; an admin creates their account and
//! hands them the credentials. Assignment then works by employee email.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use civiclink_core::error::CoreError;
use civiclink_core::roles::ROLE_EMPLOYEE;
use civiclink_db::models::profile::{CreateProfile, ProfileResponse};
use civiclink_db::repositories::ProfileRepo;
use serde::Deserialize;

use crate::auth::password::{hash_password, validate_password};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /admin/employees`.
#[derive(Debug, Deserialize)]
pub struct CreateEmployeeRequest {
    pub email: String,
    pub password: String,
}

/// POST /api/v1/admin/employees
///
/// Provision an employee account. Admin only.
pub async fn create_employee(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateEmployeeRequest>,
) -> AppResult<impl IntoResponse> {
    let email = input.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::Core(CoreError::Validation(
            "A valid email address is required".into(),
        )));
    }

    validate_password(&input.password)?;

    if ProfileRepo::find_by_email(&state.pool, email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "An account with this email already exists".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::Internal(format!("Password hashing error: {e}")))?;

    let profile = ProfileRepo::create(
        &state.pool,
        &CreateProfile {
            email: email.to_string(),
            password_hash,
            role: ROLE_EMPLOYEE.to_string(),
        },
    )
    .await?;

    tracing::info!(
        employee_id = profile.id,
        admin_id = admin.profile_id,
        "Employee account provisioned",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: ProfileResponse::from(profile),
        }),
    ))
}

/// GET /api/v1/admin/employees
///
/// List all employee accounts (for the assignment picker). Admin only.
pub async fn list_employees(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let employees = ProfileRepo::list_by_role(&state.pool, ROLE_EMPLOYEE).await?;
    let data: Vec<ProfileResponse> = employees.into_iter().map(ProfileResponse::from).collect();
    Ok(Json(DataResponse { data }))
}
