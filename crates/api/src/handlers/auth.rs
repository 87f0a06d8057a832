//! Handlers for the `/auth` resource (signup, login, refresh, logout).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use civiclink_core::error::CoreError;
use civiclink_core::roles::{ROLE_ADMIN, ROLE_CITIZEN};
use civiclink_db::models::profile::{CreateProfile, ProfileResponse};
use civiclink_db::models::session::CreateSession;
use civiclink_db::repositories::{ProfileRepo, SessionRepo};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{hash_password, validate_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/signup`.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    /// Requested role: `citizen` (default) or `admin`.
    /// Admin signups must carry the correct `admin_code`.
    pub role: Option<String>,
    pub admin_code: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Successful authentication response returned by login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub profile: ProfileResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/signup
///
/// Create a citizen or admin profile. Admin signups are gated behind the
/// `ADMIN_SIGNUP_CODE` secret; employees are provisioned by admins via the
/// admin routes and cannot self-register.
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<ProfileResponse>>)> {
    let email = input.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::Core(CoreError::Validation(
            "A valid email address is required".into(),
        )));
    }

    validate_password(&input.password)?;

    let role = match input.role.as_deref() {
        None | Some(ROLE_CITIZEN) => ROLE_CITIZEN,
        Some(ROLE_ADMIN) => {
            let expected = state.config.admin_signup_code.as_deref().ok_or_else(|| {
                AppError::Core(CoreError::Forbidden("Admin signup is disabled".into()))
            })?;
            if input.admin_code.as_deref() != Some(expected) {
                return Err(AppError::Core(CoreError::Forbidden(
                    "Incorrect admin signup code".into(),
                )));
            }
            ROLE_ADMIN
        }
        Some(other) => {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Cannot sign up with role '{other}'"
            ))))
        }
    };

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
            role: role.to_string(),
        },
    )
    .await?;

    tracing::info!(profile_id = profile.id, role = %profile.role, "Profile created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: profile.into(),
        }),
    ))
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Returns access and refresh tokens.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let profile = ProfileRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
        })?;

    if !profile.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let password_valid = verify_password(&input.password, &profile.password_hash)
        .map_err(|e| AppError::Internal(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid email or password".into(),
        )));
    }

    let response = create_auth_response(&state, profile).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token for new access + refresh tokens.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let token_hash = hash_refresh_token(&input.refresh_token);

    let session = SessionRepo::find_by_refresh_token_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    // Token rotation: the old session dies with this exchange.
    SessionRepo::revoke(&state.pool, session.id).await?;

    let profile = ProfileRepo::find_by_id(&state.pool, session.profile_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Profile no longer exists".into()))
        })?;

    if !profile.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let response = create_auth_response(&state, profile).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/logout
///
/// Revoke all sessions for the authenticated profile. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> AppResult<StatusCode> {
    SessionRepo::revoke_all_for_profile(&state.pool, auth.profile_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Generate access + refresh tokens, persist a session row, and build the response.
async fn create_auth_response(
    state: &AppState,
    profile: civiclink_db::models::profile::Profile,
) -> AppResult<AuthResponse> {
    let access_token =
        generate_access_token(profile.id, &profile.email, &profile.role, &state.config.jwt)
            .map_err(|e| AppError::Internal(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();

    let expires_at =
        Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days);

    SessionRepo::create(
        &state.pool,
        &CreateSession {
            profile_id: profile.id,
            refresh_token_hash: refresh_hash,
            expires_at,
        },
    )
    .await?;

    let expires_in = state.config.jwt.access_token_expiry_mins * 60;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        expires_in,
        profile: profile.into(),
    })
}
