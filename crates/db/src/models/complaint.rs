//! Complaint entity model and DTOs.

use civiclink_core::policy::ComplaintAccess;
use civiclink_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `complaints` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Complaint {
    pub id: DbId,
    pub reporter_id: DbId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub evidence_url: Option<String>,
    pub status: String,
    pub priority: String,
    pub assignee_email: Option<String>,
    pub resolution_note: Option<String>,
    pub resolution_evidence_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Complaint {
    /// The minimal view the authorization policy operates on.
    pub fn access_view(&self) -> ComplaintAccess {
        ComplaintAccess {
            reporter_id: self.reporter_id,
            assignee_email: self.assignee_email.clone(),
        }
    }
}

/// DTO for creating a new complaint.
///
/// `evidence_url` is the reference returned by the external object store;
/// it is validated and normalized before the insert.
#[derive(Debug, Deserialize)]
pub struct CreateComplaint {
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub location: String,
    pub evidence_url: Option<String>,
}

/// DTO for assigning a complaint to an employee.
#[derive(Debug, Deserialize)]
pub struct AssignComplaint {
    pub assignee_email: String,
}

/// DTO for changing a complaint's priority.
#[derive(Debug, Deserialize)]
pub struct SetComplaintPriority {
    pub priority: String,
}

/// DTO for resolving a complaint.
#[derive(Debug, Deserialize)]
pub struct ResolveComplaint {
    pub resolution_note: String,
    pub resolution_evidence_url: Option<String>,
}

/// Query parameters for listing complaints.
#[derive(Debug, Default, Deserialize)]
pub struct ComplaintListParams {
    pub status: Option<String>,
    /// Case-insensitive substring match over title, category, description.
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Dashboard counters for the admin overview.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ComplaintStats {
    pub total: i64,
    pub pending: i64,
    pub in_progress: i64,
    pub resolved: i64,
}
