//! Event entity model.

use civiclink_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EventRow {
    pub id: DbId,
    pub event_type: String,
    pub complaint_id: Option<DbId>,
    pub actor_id: Option<DbId>,
    pub payload: serde_json::Value,
    pub created_at: Timestamp,
}
