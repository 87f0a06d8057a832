//! Profile entity model and DTOs.

use civiclink_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full profile row from the `profiles` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`ProfileResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct Profile {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub score: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe profile representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub id: DbId,
    pub email: String,
    pub role: String,
    pub score: i32,
    pub created_at: Timestamp,
}

impl From<Profile> for ProfileResponse {
    fn from(p: Profile) -> Self {
        Self {
            id: p.id,
            email: p.email,
            role: p.role,
            score: p.score,
            created_at: p.created_at,
        }
    }
}

/// DTO for creating a new profile.
#[derive(Debug, Deserialize)]
pub struct CreateProfile {
    pub email: String,
    pub password_hash: String,
    pub role: String,
}
