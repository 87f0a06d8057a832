//! Repository for the `profiles` table.

use civiclink_core::types::DbId;
use sqlx::PgPool;

use crate::models::profile::{CreateProfile, Profile};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, email, password_hash, role, score, is_active, created_at, updated_at";

/// Provides CRUD operations for profiles.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Insert a new profile, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProfile) -> Result<Profile, sqlx::Error> {
        let query = format!(
            "INSERT INTO profiles (email, password_hash, role) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(input.email.trim())
            .bind(&input.password_hash)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    /// Find a profile by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a profile by email (case-insensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE lower(email) = lower($1)");
        sqlx::query_as::<_, Profile>(&query)
            .bind(email.trim())
            .fetch_optional(pool)
            .await
    }

    /// List all profiles with a given role, ordered by email.
    pub async fn list_by_role(pool: &PgPool, role: &str) -> Result<Vec<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE role = $1 ORDER BY email");
        sqlx::query_as::<_, Profile>(&query)
            .bind(role)
            .fetch_all(pool)
            .await
    }

    /// Credit points to a profile's score. Returns the updated row if found.
    pub async fn add_score(
        pool: &PgPool,
        id: DbId,
        points: i32,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!(
            "UPDATE profiles SET score = score + $1, updated_at = now() \
             WHERE id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(points)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
