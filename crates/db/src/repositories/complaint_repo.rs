//! Repository for the `complaints` table.
//!
//! Lifecycle mutations (`assign`, `set_priority`, `resolve`) are single
//! guarded `UPDATE ... WHERE` statements: the status predicate rides along
//! in the WHERE clause, so concurrent mutations on the same row serialize
//! at the database and an invalid transition simply matches zero rows.

use civiclink_core::types::DbId;
use sqlx::PgPool;

use crate::models::complaint::{Complaint, ComplaintStats, CreateComplaint};

/// Column list for `complaints` queries.
const COLUMNS: &str = "\
    id, reporter_id, title, description, category, location, evidence_url, \
    status, priority, assignee_email, resolution_note, resolution_evidence_url, \
    created_at, updated_at";

/// Provides CRUD and lifecycle operations for complaints.
pub struct ComplaintRepo;

impl ComplaintRepo {
    /// Create a new complaint with status `pending` and priority `normal`,
    /// returning the full row.
    ///
    /// `evidence_url` must already be normalized by the caller.
    pub async fn create(
        pool: &PgPool,
        reporter_id: DbId,
        input: &CreateComplaint,
        evidence_url: Option<&str>,
    ) -> Result<Complaint, sqlx::Error> {
        let query = format!(
            "INSERT INTO complaints \
                (reporter_id, title, description, category, location, evidence_url) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Complaint>(&query)
            .bind(reporter_id)
            .bind(input.title.trim())
            .bind(input.description.trim())
            .bind(&input.category)
            .bind(input.location.trim())
            .bind(evidence_url)
            .fetch_one(pool)
            .await
    }

    /// Find a complaint by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Complaint>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM complaints WHERE id = $1");
        sqlx::query_as::<_, Complaint>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List complaints with optional filters.
    ///
    /// `reporter_id` and `assignee_email` scope the result set per role
    /// (citizens see their own, employees their assignments; admins pass
    /// neither). `search` is an escaped `ILIKE` pattern matched against
    /// title, category, and description. Results are ordered newest-first.
    #[allow(clippy::too_many_arguments)]
    pub async fn list_filtered(
        pool: &PgPool,
        reporter_id: Option<DbId>,
        assignee_email: Option<&str>,
        status: Option<&str>,
        search_pattern: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Complaint>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut param_idx: usize = 1;

        if reporter_id.is_some() {
            conditions.push(format!("reporter_id = ${param_idx}"));
            param_idx += 1;
        }
        if assignee_email.is_some() {
            conditions.push(format!("assignee_email = ${param_idx}"));
            param_idx += 1;
        }
        if status.is_some() {
            conditions.push(format!("status = ${param_idx}"));
            param_idx += 1;
        }
        if search_pattern.is_some() {
            conditions.push(format!(
                "(title ILIKE ${param_idx} OR category ILIKE ${param_idx} \
                 OR description ILIKE ${param_idx})"
            ));
            param_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {COLUMNS} FROM complaints {where_clause} \
             ORDER BY created_at DESC \
             LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut q = sqlx::query_as::<_, Complaint>(&query);

        if let Some(rid) = reporter_id {
            q = q.bind(rid);
        }
        if let Some(email) = assignee_email {
            q = q.bind(email);
        }
        if let Some(s) = status {
            q = q.bind(s);
        }
        if let Some(pattern) = search_pattern {
            q = q.bind(pattern);
        }
        q = q.bind(limit).bind(offset);

        q.fetch_all(pool).await
    }

    /// Assign a complaint to an employee and move it to `in_progress`.
    ///
    /// Matches only non-resolved rows, so assignment after resolution is
    /// impossible at the database level. Re-assigning the same email is a
    /// harmless overwrite. Returns `None` when the row is missing or
    /// already resolved; the caller distinguishes via `find_by_id`.
    pub async fn assign(
        pool: &PgPool,
        id: DbId,
        assignee_email: &str,
    ) -> Result<Option<Complaint>, sqlx::Error> {
        let query = format!(
            "UPDATE complaints \
             SET assignee_email = $1, status = 'in_progress', updated_at = now() \
             WHERE id = $2 AND status IN ('pending', 'in_progress') \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Complaint>(&query)
            .bind(assignee_email)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Set a complaint's priority. No status change; idempotent.
    ///
    /// Matches only non-resolved rows (resolved is terminal).
    pub async fn set_priority(
        pool: &PgPool,
        id: DbId,
        priority: &str,
    ) -> Result<Option<Complaint>, sqlx::Error> {
        let query = format!(
            "UPDATE complaints \
             SET priority = $1, updated_at = now() \
             WHERE id = $2 AND status <> 'resolved' \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Complaint>(&query)
            .bind(priority)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Resolve a complaint: record the note and optional proof, move to
    /// `resolved`.
    ///
    /// The WHERE clause demands `in_progress` AND a matching assignee, so
    /// a retry after success (or a race with a concurrent resolve) matches
    /// zero rows instead of double-applying.
    pub async fn resolve(
        pool: &PgPool,
        id: DbId,
        assignee_email: &str,
        resolution_note: &str,
        resolution_evidence_url: Option<&str>,
    ) -> Result<Option<Complaint>, sqlx::Error> {
        let query = format!(
            "UPDATE complaints \
             SET status = 'resolved', resolution_note = $1, \
                 resolution_evidence_url = $2, updated_at = now() \
             WHERE id = $3 AND status = 'in_progress' AND assignee_email = $4 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Complaint>(&query)
            .bind(resolution_note.trim())
            .bind(resolution_evidence_url)
            .bind(id)
            .bind(assignee_email)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a complaint. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM complaints WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Dashboard counters: total / pending / in_progress / resolved.
    pub async fn stats(pool: &PgPool) -> Result<ComplaintStats, sqlx::Error> {
        sqlx::query_as::<_, ComplaintStats>(
            "SELECT \
                COUNT(*) AS total, \
                COUNT(*) FILTER (WHERE status = 'pending') AS pending, \
                COUNT(*) FILTER (WHERE status = 'in_progress') AS in_progress, \
                COUNT(*) FILTER (WHERE status = 'resolved') AS resolved \
             FROM complaints",
        )
        .fetch_one(pool)
        .await
    }
}
