//! Integration tests for the complaint lifecycle at the repository layer.
//!
//! Exercises the guarded UPDATE statements against a real database:
//! - Creation defaults (pending / normal / unassigned)
//! - Assignment, re-assignment, and the terminal-state guard
//! - Resolution by the assignee only, exactly once
//! - Hard delete and dashboard counters
//! - Constraint violations (duplicate email, empty resolution note)

use civiclink_core::complaint::{
    PRIORITY_HIGH, PRIORITY_NORMAL, STATUS_IN_PROGRESS, STATUS_PENDING, STATUS_RESOLVED,
};
use civiclink_core::roles::{ROLE_CITIZEN, ROLE_EMPLOYEE};
use civiclink_db::models::complaint::CreateComplaint;
use civiclink_db::models::profile::CreateProfile;
use civiclink_db::repositories::{ComplaintRepo, ProfileRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_profile(email: &str, role: &str) -> CreateProfile {
    CreateProfile {
        email: email.to_string(),
        password_hash: "$argon2id$fake-hash-for-tests".to_string(),
        role: role.to_string(),
    }
}

fn new_complaint(title: &str) -> CreateComplaint {
    CreateComplaint {
        title: title.to_string(),
        description: "Overflowing bin at the corner of 5th and Main".to_string(),
        category: "Garbage".to_string(),
        location: "5th and Main".to_string(),
        evidence_url: None,
    }
}

async fn seed_reporter(pool: &PgPool, email: &str) -> i64 {
    ProfileRepo::create(pool, &new_profile(email, ROLE_CITIZEN))
        .await
        .unwrap()
        .id
}

// ---------------------------------------------------------------------------
// Test: Creation defaults
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_new_complaint_starts_pending_and_unassigned(pool: PgPool) {
    let reporter_id = seed_reporter(&pool, "citizen@example.com").await;

    let complaint = ComplaintRepo::create(&pool, reporter_id, &new_complaint("Street light out"), None)
        .await
        .unwrap();

    assert_eq!(complaint.reporter_id, reporter_id);
    assert_eq!(complaint.status, STATUS_PENDING);
    assert_eq!(complaint.priority, PRIORITY_NORMAL);
    assert!(complaint.assignee_email.is_none());
    assert!(complaint.evidence_url.is_none());
    assert!(complaint.resolution_note.is_none());
}

// ---------------------------------------------------------------------------
// Test: Assignment moves to in_progress and records the assignee
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_assign_moves_to_in_progress(pool: PgPool) {
    let reporter_id = seed_reporter(&pool, "citizen@example.com").await;
    let complaint = ComplaintRepo::create(&pool, reporter_id, &new_complaint("Pothole"), None)
        .await
        .unwrap();

    let assigned = ComplaintRepo::assign(&pool, complaint.id, "worker@gov.in")
        .await
        .unwrap()
        .expect("Assignment of a pending complaint should match");

    assert_eq!(assigned.status, STATUS_IN_PROGRESS);
    assert_eq!(assigned.assignee_email.as_deref(), Some("worker@gov.in"));
}

// ---------------------------------------------------------------------------
// Test: Re-assignment is a harmless overwrite, not an error
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_reassignment_overwrites_without_error(pool: PgPool) {
    let reporter_id = seed_reporter(&pool, "citizen@example.com").await;
    let complaint = ComplaintRepo::create(&pool, reporter_id, &new_complaint("Pothole"), None)
        .await
        .unwrap();

    ComplaintRepo::assign(&pool, complaint.id, "worker@gov.in")
        .await
        .unwrap()
        .expect("First assignment should match");

    // Same email again: still matches, state unchanged.
    let again = ComplaintRepo::assign(&pool, complaint.id, "worker@gov.in")
        .await
        .unwrap()
        .expect("Repeat assignment should match");
    assert_eq!(again.status, STATUS_IN_PROGRESS);
    assert_eq!(again.assignee_email.as_deref(), Some("worker@gov.in"));

    // Different email: hand-off to another employee.
    let handed_off = ComplaintRepo::assign(&pool, complaint.id, "other@gov.in")
        .await
        .unwrap()
        .expect("Re-assignment should match");
    assert_eq!(handed_off.assignee_email.as_deref(), Some("other@gov.in"));
    assert_eq!(handed_off.status, STATUS_IN_PROGRESS);
}

// ---------------------------------------------------------------------------
// Test: Resolution by the assignee records note, proof stays optional
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_assignee_resolves_with_note_only(pool: PgPool) {
    let reporter_id = seed_reporter(&pool, "citizen@example.com").await;
    let complaint = ComplaintRepo::create(&pool, reporter_id, &new_complaint("Water leak"), None)
        .await
        .unwrap();
    ComplaintRepo::assign(&pool, complaint.id, "worker@gov.in")
        .await
        .unwrap()
        .unwrap();

    let resolved = ComplaintRepo::resolve(&pool, complaint.id, "worker@gov.in", "Fixed", None)
        .await
        .unwrap()
        .expect("Assignee resolving an in_progress complaint should match");

    assert_eq!(resolved.status, STATUS_RESOLVED);
    assert_eq!(resolved.resolution_note.as_deref(), Some("Fixed"));
    assert!(resolved.resolution_evidence_url.is_none());
}

// ---------------------------------------------------------------------------
// Test: A second resolve matches zero rows
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_resolve_is_once_only(pool: PgPool) {
    let reporter_id = seed_reporter(&pool, "citizen@example.com").await;
    let complaint = ComplaintRepo::create(&pool, reporter_id, &new_complaint("Water leak"), None)
        .await
        .unwrap();
    ComplaintRepo::assign(&pool, complaint.id, "worker@gov.in")
        .await
        .unwrap()
        .unwrap();
    ComplaintRepo::resolve(&pool, complaint.id, "worker@gov.in", "Fixed", None)
        .await
        .unwrap()
        .unwrap();

    // A retry after success, or the loser of a concurrent race, matches
    // zero rows instead of double-applying.
    let second = ComplaintRepo::resolve(&pool, complaint.id, "worker@gov.in", "Fixed again", None)
        .await
        .unwrap();
    assert!(second.is_none(), "Resolved is terminal");

    let row = ComplaintRepo::find_by_id(&pool, complaint.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.resolution_note.as_deref(), Some("Fixed"));
}

// ---------------------------------------------------------------------------
// Test: Only the recorded assignee can resolve
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_non_assignee_cannot_resolve(pool: PgPool) {
    let reporter_id = seed_reporter(&pool, "citizen@example.com").await;
    let complaint = ComplaintRepo::create(&pool, reporter_id, &new_complaint("Blocked drain"), None)
        .await
        .unwrap();
    ComplaintRepo::assign(&pool, complaint.id, "worker@gov.in")
        .await
        .unwrap()
        .unwrap();

    let result = ComplaintRepo::resolve(&pool, complaint.id, "someone-else@gov.in", "Done", None)
        .await
        .unwrap();
    assert!(result.is_none(), "Assignee mismatch should match zero rows");

    let row = ComplaintRepo::find_by_id(&pool, complaint.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.status, STATUS_IN_PROGRESS);
}

// ---------------------------------------------------------------------------
// Test: Pending complaints cannot be resolved (no assignee yet)
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_pending_complaint_cannot_be_resolved(pool: PgPool) {
    let reporter_id = seed_reporter(&pool, "citizen@example.com").await;
    let complaint = ComplaintRepo::create(&pool, reporter_id, &new_complaint("Fallen tree"), None)
        .await
        .unwrap();

    let result = ComplaintRepo::resolve(&pool, complaint.id, "worker@gov.in", "Cleared", None)
        .await
        .unwrap();
    assert!(result.is_none(), "Resolution requires in_progress status");
}

// ---------------------------------------------------------------------------
// Test: Resolved is terminal for assign and priority changes
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_resolved_blocks_assign_and_priority(pool: PgPool) {
    let reporter_id = seed_reporter(&pool, "citizen@example.com").await;
    let complaint = ComplaintRepo::create(&pool, reporter_id, &new_complaint("Noise"), None)
        .await
        .unwrap();
    ComplaintRepo::assign(&pool, complaint.id, "worker@gov.in")
        .await
        .unwrap()
        .unwrap();
    ComplaintRepo::resolve(&pool, complaint.id, "worker@gov.in", "Handled", None)
        .await
        .unwrap()
        .unwrap();

    let reassign = ComplaintRepo::assign(&pool, complaint.id, "other@gov.in")
        .await
        .unwrap();
    assert!(reassign.is_none(), "Cannot assign a resolved complaint");

    let reprioritize = ComplaintRepo::set_priority(&pool, complaint.id, PRIORITY_HIGH)
        .await
        .unwrap();
    assert!(reprioritize.is_none(), "Cannot reprioritize a resolved complaint");
}

// ---------------------------------------------------------------------------
// Test: Priority changes are idempotent and leave status alone
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_set_priority_leaves_status_alone(pool: PgPool) {
    let reporter_id = seed_reporter(&pool, "citizen@example.com").await;
    let complaint = ComplaintRepo::create(&pool, reporter_id, &new_complaint("Flooding"), None)
        .await
        .unwrap();

    let raised = ComplaintRepo::set_priority(&pool, complaint.id, PRIORITY_HIGH)
        .await
        .unwrap()
        .expect("Priority change on a pending complaint should match");
    assert_eq!(raised.priority, PRIORITY_HIGH);
    assert_eq!(raised.status, STATUS_PENDING);

    let again = ComplaintRepo::set_priority(&pool, complaint.id, PRIORITY_HIGH)
        .await
        .unwrap()
        .expect("Repeating the same priority should match");
    assert_eq!(again.priority, PRIORITY_HIGH);
}

// ---------------------------------------------------------------------------
// Test: Hard delete
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_delete_removes_the_row(pool: PgPool) {
    let reporter_id = seed_reporter(&pool, "citizen@example.com").await;
    let complaint = ComplaintRepo::create(&pool, reporter_id, &new_complaint("Spam"), None)
        .await
        .unwrap();

    assert!(ComplaintRepo::delete(&pool, complaint.id).await.unwrap());
    assert!(ComplaintRepo::find_by_id(&pool, complaint.id)
        .await
        .unwrap()
        .is_none());

    // Deleting again is a no-op.
    assert!(!ComplaintRepo::delete(&pool, complaint.id).await.unwrap());
}

// ---------------------------------------------------------------------------
// Test: Dashboard counters track the lifecycle
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_stats_count_by_status(pool: PgPool) {
    let reporter_id = seed_reporter(&pool, "citizen@example.com").await;

    let a = ComplaintRepo::create(&pool, reporter_id, &new_complaint("A"), None)
        .await
        .unwrap();
    let b = ComplaintRepo::create(&pool, reporter_id, &new_complaint("B"), None)
        .await
        .unwrap();
    ComplaintRepo::create(&pool, reporter_id, &new_complaint("C"), None)
        .await
        .unwrap();

    ComplaintRepo::assign(&pool, a.id, "worker@gov.in")
        .await
        .unwrap()
        .unwrap();
    ComplaintRepo::assign(&pool, b.id, "worker@gov.in")
        .await
        .unwrap()
        .unwrap();
    ComplaintRepo::resolve(&pool, b.id, "worker@gov.in", "Done", None)
        .await
        .unwrap()
        .unwrap();

    let stats = ComplaintRepo::stats(&pool).await.unwrap();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.pending, 1);
    assert_eq!(stats.in_progress, 1);
    assert_eq!(stats.resolved, 1);
}

// ---------------------------------------------------------------------------
// Test: Duplicate email violates the unique constraint
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_duplicate_email_rejected(pool: PgPool) {
    ProfileRepo::create(&pool, &new_profile("taken@example.com", ROLE_EMPLOYEE))
        .await
        .unwrap();
    let result = ProfileRepo::create(&pool, &new_profile("taken@example.com", ROLE_CITIZEN)).await;
    assert!(result.is_err(), "Duplicate email should fail");
}

// ---------------------------------------------------------------------------
// Test: Resolved rows must carry a non-empty note
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_blank_resolution_note_rejected(pool: PgPool) {
    let reporter_id = seed_reporter(&pool, "citizen@example.com").await;
    let complaint = ComplaintRepo::create(&pool, reporter_id, &new_complaint("Graffiti"), None)
        .await
        .unwrap();
    ComplaintRepo::assign(&pool, complaint.id, "worker@gov.in")
        .await
        .unwrap()
        .unwrap();

    // The handler validates first, but the table CHECK is the backstop:
    // a whitespace note trims to empty and the UPDATE must fail.
    let result = ComplaintRepo::resolve(&pool, complaint.id, "worker@gov.in", "   ", None).await;
    assert!(result.is_err(), "Empty resolution note should violate the CHECK");

    let row = ComplaintRepo::find_by_id(&pool, complaint.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.status, STATUS_IN_PROGRESS, "Row should be untouched");
}
