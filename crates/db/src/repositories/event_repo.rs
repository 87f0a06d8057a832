//! Repository for the `events` table.

use civiclink_core::types::DbId;
use sqlx::PgPool;

use crate::models::event::EventRow;

const COLUMNS: &str = "id, event_type, complaint_id, actor_id, payload, created_at";

/// Provides insert/query operations for persisted feed events.
pub struct EventRepo;

impl EventRepo {
    /// Insert a single event row, returning its id.
    pub async fn insert(
        pool: &PgPool,
        event_type: &str,
        complaint_id: Option<DbId>,
        actor_id: Option<DbId>,
        payload: &serde_json::Value,
    ) -> Result<DbId, sqlx::Error> {
        let (id,): (DbId,) = sqlx::query_as(
            "INSERT INTO events (event_type, complaint_id, actor_id, payload) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id",
        )
        .bind(event_type)
        .bind(complaint_id)
        .bind(actor_id)
        .bind(payload)
        .fetch_one(pool)
        .await?;
        Ok(id)
    }

    /// List the most recent events for a complaint, newest-first.
    pub async fn list_for_complaint(
        pool: &PgPool,
        complaint_id: DbId,
        limit: i64,
    ) -> Result<Vec<EventRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM events \
             WHERE complaint_id = $1 \
             ORDER BY created_at DESC \
             LIMIT $2"
        );
        sqlx::query_as::<_, EventRow>(&query)
            .bind(complaint_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
