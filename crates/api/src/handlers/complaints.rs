//! Handlers for the `/complaints` resource: the complaint lifecycle.
//!
//! Every entry point follows the same shape: authenticate, evaluate the
//! authorization policy, validate input, mutate the store with a guarded
//! update, then publish a feed event. Policy denial raises `ForbiddenError`
//! before any mutation, so denied calls have no partial side effects.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use civiclink_core::complaint::{self, STATUS_RESOLVED};
use civiclink_core::error::CoreError;
use civiclink_core::media::normalize_media_ref;
use civiclink_core::policy::{can_perform, Operation};
use civiclink_core::roles::{ROLE_ADMIN, ROLE_CITIZEN, ROLE_EMPLOYEE};
use civiclink_core::search::{build_like_pattern, clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use civiclink_core::types::DbId;
use civiclink_db::models::complaint::{
    AssignComplaint, Complaint, ComplaintListParams, CreateComplaint, ResolveComplaint,
    SetComplaintPriority,
};
use civiclink_db::repositories::{ComplaintRepo, EventRepo};
use civiclink_events::bus::{
    ComplaintEvent, EVENT_ASSIGNED, EVENT_CREATED, EVENT_DELETED, EVENT_PRIORITIZED,
    EVENT_RESOLVED,
};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireCitizen, RequireEmployee};
use crate::response::DataResponse;
use crate::state::AppState;

/// Fetch a complaint or fail with a typed 404.
async fn fetch_complaint(state: &AppState, id: DbId) -> AppResult<Complaint> {
    ComplaintRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Complaint",
            id,
        }))
}

// ---------------------------------------------------------------------------
// POST /complaints
// ---------------------------------------------------------------------------

/// Submit a new complaint. Citizen only.
///
/// The evidence reference is validated before the insert: a malformed
/// upload reference aborts the submit with no row created.
pub async fn submit_complaint(
    RequireCitizen(auth): RequireCitizen,
    State(state): State<AppState>,
    Json(input): Json<CreateComplaint>,
) -> AppResult<impl IntoResponse> {
    complaint::validate_submission(&input.title, &input.description, &input.category)?;
    let evidence_url = normalize_media_ref(input.evidence_url.as_deref())?;

    let created =
        ComplaintRepo::create(&state.pool, auth.profile_id, &input, evidence_url.as_deref())
            .await?;

    tracing::info!(
        complaint_id = created.id,
        reporter_id = auth.profile_id,
        category = %created.category,
        "Complaint submitted",
    );

    state.event_bus.publish(
        ComplaintEvent::new(EVENT_CREATED, created.id, created.reporter_id)
            .with_actor(auth.profile_id)
            .with_payload(json!({
                "title": created.title,
                "category": created.category,
                "status": created.status,
            })),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

// ---------------------------------------------------------------------------
// GET /complaints
// ---------------------------------------------------------------------------

/// List complaints, scoped by role.
///
/// Citizens see their own reports, employees their assignments, admins
/// everything. Optional `status` and case-insensitive `search` filters.
pub async fn list_complaints(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ComplaintListParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref s) = params.status {
        complaint::validate_status(s)?;
    }

    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(params.offset);
    let search_pattern = params.search.as_deref().and_then(build_like_pattern);

    // Role-based scoping mirrors the read rules in the policy module.
    let (reporter_id, assignee_email) = match auth.role.as_str() {
        ROLE_CITIZEN => (Some(auth.profile_id), None),
        ROLE_EMPLOYEE => (None, Some(auth.email.as_str())),
        ROLE_ADMIN => (None, None),
        _ => {
            return Err(AppError::Core(CoreError::Forbidden(
                "Unknown role".into(),
            )))
        }
    };

    let complaints = ComplaintRepo::list_filtered(
        &state.pool,
        reporter_id,
        assignee_email,
        params.status.as_deref(),
        search_pattern.as_deref(),
        limit,
        offset,
    )
    .await?;

    Ok(Json(DataResponse { data: complaints }))
}

// ---------------------------------------------------------------------------
// GET /complaints/stats
// ---------------------------------------------------------------------------

/// Dashboard counters. Admin only.
pub async fn complaint_stats(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let stats = ComplaintRepo::stats(&state.pool).await?;
    Ok(Json(DataResponse { data: stats }))
}

// ---------------------------------------------------------------------------
// GET /complaints/:id
// ---------------------------------------------------------------------------

/// Get a single complaint by ID, subject to the read policy.
pub async fn get_complaint(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let found = fetch_complaint(&state, id).await?;

    if !can_perform(&auth.actor(), Operation::Read, &found.access_view()) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not have access to this complaint".into(),
        )));
    }

    Ok(Json(DataResponse { data: found }))
}

// ---------------------------------------------------------------------------
// PUT /complaints/:id/assign
// ---------------------------------------------------------------------------

/// Assign a complaint to an employee. Admin only.
///
/// Transitions `pending | in_progress -> in_progress`. Re-assigning the
/// same email is idempotent in effect: both calls succeed and leave the
/// same final state.
pub async fn assign_complaint(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AssignComplaint>,
) -> AppResult<impl IntoResponse> {
    complaint::validate_assignee_email(&input.assignee_email)?;
    let assignee = input.assignee_email.trim();

    let current = fetch_complaint(&state, id).await?;

    if !can_perform(&admin.actor(), Operation::Assign, &current.access_view()) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only admins may assign complaints".into(),
        )));
    }

    // Resolved is terminal: assignment can no longer change anything.
    if complaint::is_terminal(&current.status) {
        return Err(AppError::Core(CoreError::Conflict(
            "Complaint is already resolved".into(),
        )));
    }

    let updated = ComplaintRepo::assign(&state.pool, id, assignee)
        .await?
        // The guarded UPDATE matched zero rows: the complaint was resolved
        // (or deleted) between the read above and the write.
        .ok_or(AppError::Core(CoreError::Conflict(
            "Complaint is no longer assignable".into(),
        )))?;

    tracing::info!(
        complaint_id = id,
        assignee = %assignee,
        admin_id = admin.profile_id,
        "Complaint assigned",
    );

    state.event_bus.publish(
        ComplaintEvent::new(EVENT_ASSIGNED, updated.id, updated.reporter_id)
            .with_actor(admin.profile_id)
            .with_assignee(Some(assignee))
            .with_payload(json!({ "status": updated.status })),
    );

    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// PUT /complaints/:id/priority
// ---------------------------------------------------------------------------

/// Set a complaint's priority. Admin only; no status change; idempotent.
pub async fn set_complaint_priority(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SetComplaintPriority>,
) -> AppResult<impl IntoResponse> {
    complaint::validate_priority(&input.priority)?;

    let current = fetch_complaint(&state, id).await?;

    if !can_perform(&admin.actor(), Operation::SetPriority, &current.access_view()) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only admins may change priority".into(),
        )));
    }

    if complaint::is_terminal(&current.status) {
        return Err(AppError::Core(CoreError::Conflict(
            "Complaint is already resolved".into(),
        )));
    }

    // Same target value is a no-op: skip the write and the feed event.
    if current.priority == input.priority {
        return Ok(Json(DataResponse { data: current }));
    }

    let updated = ComplaintRepo::set_priority(&state.pool, id, &input.priority)
        .await?
        .ok_or(AppError::Core(CoreError::Conflict(
            "Complaint is no longer mutable".into(),
        )))?;

    tracing::info!(
        complaint_id = id,
        priority = %input.priority,
        admin_id = admin.profile_id,
        "Complaint priority changed",
    );

    state.event_bus.publish(
        ComplaintEvent::new(EVENT_PRIORITIZED, updated.id, updated.reporter_id)
            .with_actor(admin.profile_id)
            .with_assignee(updated.assignee_email.as_deref())
            .with_payload(json!({ "priority": updated.priority })),
    );

    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// PUT /complaints/:id/resolve
// ---------------------------------------------------------------------------

/// Resolve a complaint. Assigned employee only.
///
/// Requires a non-empty resolution note; proof image is optional. The
/// resulting `complaint.resolved` event triggers the reporter's score
/// credit via the scoring handler.
pub async fn resolve_complaint(
    RequireEmployee(employee): RequireEmployee,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ResolveComplaint>,
) -> AppResult<impl IntoResponse> {
    complaint::validate_resolution_note(&input.resolution_note)?;
    let proof_url = normalize_media_ref(input.resolution_evidence_url.as_deref())?;

    let current = fetch_complaint(&state, id).await?;

    // A second resolve attempt is a conflict, not a forbidden: report the
    // state problem before the ownership problem so retries are diagnosable.
    if current.status == STATUS_RESOLVED {
        return Err(AppError::Core(CoreError::Conflict(
            "Complaint is already resolved".into(),
        )));
    }

    if !can_perform(&employee.actor(), Operation::Resolve, &current.access_view()) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the assigned employee may resolve this complaint".into(),
        )));
    }

    // Still pending means assignment never happened; the policy check above
    // already rejects this (no assignee), so reaching here implies
    // in_progress. Validate the transition anyway to keep the state machine
    // authoritative.
    complaint::validate_transition(&current.status, STATUS_RESOLVED)?;

    let updated = ComplaintRepo::resolve(
        &state.pool,
        id,
        &employee.email,
        &input.resolution_note,
        proof_url.as_deref(),
    )
    .await?
    // Zero rows matched: lost a race with a concurrent resolve/re-assign.
    .ok_or(AppError::Core(CoreError::Conflict(
        "Complaint was modified concurrently and can no longer be resolved".into(),
    )))?;

    tracing::info!(
        complaint_id = id,
        employee_id = employee.profile_id,
        "Complaint resolved",
    );

    state.event_bus.publish(
        ComplaintEvent::new(EVENT_RESOLVED, updated.id, updated.reporter_id)
            .with_actor(employee.profile_id)
            .with_assignee(Some(&employee.email))
            .with_payload(json!({
                "resolution_note": updated.resolution_note,
                "resolution_evidence_url": updated.resolution_evidence_url,
            })),
    );

    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// DELETE /complaints/:id
// ---------------------------------------------------------------------------

/// Hard-delete a complaint. Admin only.
pub async fn delete_complaint(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let current = fetch_complaint(&state, id).await?;

    if !can_perform(&admin.actor(), Operation::Remove, &current.access_view()) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only admins may delete complaints".into(),
        )));
    }

    let removed = ComplaintRepo::delete(&state.pool, id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Complaint",
            id,
        }));
    }

    tracing::info!(complaint_id = id, admin_id = admin.profile_id, "Complaint deleted");

    state.event_bus.publish(
        ComplaintEvent::new(EVENT_DELETED, current.id, current.reporter_id)
            .with_actor(admin.profile_id)
            .with_assignee(current.assignee_email.as_deref()),
    );

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// GET /complaints/:id/events
// ---------------------------------------------------------------------------

/// Durable event history for a complaint, subject to the read policy.
pub async fn list_complaint_events(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let found = fetch_complaint(&state, id).await?;

    if !can_perform(&auth.actor(), Operation::Read, &found.access_view()) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not have access to this complaint".into(),
        )));
    }

    let events = EventRepo::list_for_complaint(&state.pool, id, MAX_LIST_LIMIT).await?;
    Ok(Json(DataResponse { data: events }))
}
