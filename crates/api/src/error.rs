//! HTTP error mapping for the complaint API.
//!
//! Handlers return [`AppError`]; the [`IntoResponse`] impl turns it into a
//! `{"error", "code"}` JSON body. Domain errors ([`CoreError`]) carry their
//! own HTTP meaning (validation 400, lifecycle conflicts 409, policy
//! denials 403); database errors are classified by Postgres error code so
//! the schema's named constraints surface as useful client errors instead
//! of opaque 500s.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use civiclink_core::error::CoreError;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `civiclink_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// An unexpected failure (crypto, token generation) that must not leak
    /// detail to the client.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal_response()
                }
            },

            AppError::Database(err) => classify_sqlx_error(err),

            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal_response()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal_response() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

/// Map a sqlx error onto an HTTP status, error code, and client message.
///
/// Constraint violations from this schema are translated into the client
/// errors the handlers would have produced had they caught the condition
/// first, so races between the pre-check and the write still fail cleanly:
///
/// - `23505` unique violations: duplicate account email or refresh token
///   hash → 409.
/// - `23514` check violations: the complaints table's lifecycle CHECKs
///   (status/category/priority sets, resolution-note-on-resolved,
///   assignee-implies-started) → 409.
/// - `RowNotFound` → 404.
///
/// Anything else is a real server fault and maps to a sanitized 500.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
            Some("23505") => {
                let message = match db_err.constraint() {
                    Some("uq_profiles_email") => {
                        "An account with this email already exists".to_string()
                    }
                    Some(name) if name.starts_with("uq_") => {
                        format!("Duplicate value violates unique constraint: {name}")
                    }
                    _ => {
                        tracing::error!(error = %db_err, "Unique violation on unnamed constraint");
                        return internal_response();
                    }
                };
                (StatusCode::CONFLICT, "CONFLICT", message)
            }
            Some("23514") => (
                StatusCode::CONFLICT,
                "CONFLICT",
                "The complaint's current state does not admit this change".to_string(),
            ),
            _ => {
                tracing::error!(error = %db_err, "Database error");
                internal_response()
            }
        },
        other => {
            tracing::error!(error = %other, "Database error");
            internal_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn core_errors_map_to_their_http_status() {
        assert_eq!(
            status_of(AppError::Core(CoreError::NotFound {
                entity: "Complaint",
                id: 7,
            })),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Core(CoreError::Validation("bad title".into()))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::Core(CoreError::Conflict(
                "already resolved".into()
            ))),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(AppError::Core(CoreError::Unauthorized("no token".into()))),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AppError::Core(CoreError::Forbidden("not yours".into()))),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn internal_detail_never_reaches_the_client() {
        // The response must be a sanitized 500 regardless of the message.
        let status = status_of(AppError::Internal("argon2 parameter error".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn row_not_found_maps_to_404() {
        assert_eq!(
            status_of(AppError::Database(sqlx::Error::RowNotFound)),
            StatusCode::NOT_FOUND
        );
    }
}
