//! Complaint lifecycle constants, state machine, and validation.
//!
//! Defines the valid statuses, categories, and priorities for complaints,
//! plus the transition rules and field validation helpers used by the DB
//! and API layers.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

/// Initial status for a newly submitted complaint.
pub const STATUS_PENDING: &str = "pending";
/// An employee has been assigned and is working on it.
pub const STATUS_IN_PROGRESS: &str = "in_progress";
/// The assigned employee has fixed the issue. Terminal.
pub const STATUS_RESOLVED: &str = "resolved";

/// All valid complaint statuses.
pub const VALID_STATUSES: &[&str] = &[STATUS_PENDING, STATUS_IN_PROGRESS, STATUS_RESOLVED];

// ---------------------------------------------------------------------------
// Category constants
// ---------------------------------------------------------------------------

pub const CATEGORY_ROADS: &str = "Roads";
pub const CATEGORY_GARBAGE: &str = "Garbage";
pub const CATEGORY_WATER: &str = "Water";
pub const CATEGORY_ELECTRICITY: &str = "Electricity";
pub const CATEGORY_OTHER: &str = "Other";

/// All valid complaint categories. Closed set: arbitrary category text from
/// the report form is rejected.
pub const VALID_CATEGORIES: &[&str] = &[
    CATEGORY_ROADS,
    CATEGORY_GARBAGE,
    CATEGORY_WATER,
    CATEGORY_ELECTRICITY,
    CATEGORY_OTHER,
];

// ---------------------------------------------------------------------------
// Priority constants
// ---------------------------------------------------------------------------

/// Default priority for new complaints.
pub const PRIORITY_NORMAL: &str = "normal";
/// Escalated by an admin.
pub const PRIORITY_HIGH: &str = "high";

/// All valid complaint priorities.
pub const VALID_PRIORITIES: &[&str] = &[PRIORITY_NORMAL, PRIORITY_HIGH];

// ---------------------------------------------------------------------------
// Validation limits
// ---------------------------------------------------------------------------

/// Maximum length for the complaint title (characters).
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length for the description and resolution note (characters).
pub const MAX_TEXT_LENGTH: usize = 10_000;

/// Points credited to a reporter's profile when their complaint is resolved.
pub const RESOLVED_SCORE_AWARD: i32 = 50;

// ---------------------------------------------------------------------------
// Status transitions
// ---------------------------------------------------------------------------

/// Returns the set of statuses that `from_status` may transition to.
///
/// Transition rules:
/// - `pending`     -> `in_progress` (admin assigns an employee)
/// - `in_progress` -> `resolved`    (assignee resolves with a note)
/// - `resolved`    is terminal
///
/// There is no direct `pending -> resolved`: every complaint must pass
/// through assignment before it can be resolved.
pub fn valid_transitions(from_status: &str) -> &'static [&'static str] {
    match from_status {
        STATUS_PENDING => &[STATUS_IN_PROGRESS],
        STATUS_IN_PROGRESS => &[STATUS_RESOLVED],
        STATUS_RESOLVED => &[],
        _ => &[],
    }
}

/// Validate that a status transition from `current` to `next` is allowed.
///
/// A disallowed transition is a [`CoreError::Conflict`]: the complaint
/// exists and the input is well-formed, but its current state does not
/// admit the requested change.
pub fn validate_transition(current: &str, next: &str) -> Result<(), CoreError> {
    let allowed = valid_transitions(current);
    if allowed.contains(&next) {
        Ok(())
    } else {
        Err(CoreError::Conflict(format!(
            "Cannot transition complaint from '{}' to '{}'. Allowed transitions: {:?}",
            current, next, allowed
        )))
    }
}

/// Whether a complaint in `status` can still be mutated at all.
///
/// `resolved` is terminal: assign, priority changes, and further resolve
/// calls are all rejected.
pub fn is_terminal(status: &str) -> bool {
    status == STATUS_RESOLVED
}

// ---------------------------------------------------------------------------
// Field validation
// ---------------------------------------------------------------------------

/// Validate that a status string is one of the known statuses.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid complaint status '{}'. Must be one of: {:?}",
            status, VALID_STATUSES
        )))
    }
}

/// Validate that a category string is one of the known categories.
pub fn validate_category(category: &str) -> Result<(), CoreError> {
    if VALID_CATEGORIES.contains(&category) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid category '{}'. Must be one of: {:?}",
            category, VALID_CATEGORIES
        )))
    }
}

/// Validate that a priority string is one of the known priorities.
pub fn validate_priority(priority: &str) -> Result<(), CoreError> {
    if VALID_PRIORITIES.contains(&priority) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid priority '{}'. Must be one of: {:?}",
            priority, VALID_PRIORITIES
        )))
    }
}

/// Validate a complaint submission: non-empty title and description within
/// length limits, and a known category. Location may be empty.
pub fn validate_submission(title: &str, description: &str, category: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Title must not be empty".to_string()));
    }
    if title.len() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Title exceeds maximum length of {MAX_TITLE_LENGTH} characters"
        )));
    }
    if description.trim().is_empty() {
        return Err(CoreError::Validation(
            "Description must not be empty".to_string(),
        ));
    }
    if description.len() > MAX_TEXT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Description exceeds maximum length of {MAX_TEXT_LENGTH} characters"
        )));
    }
    validate_category(category)
}

/// Validate an assignment target email.
///
/// The store records the assignee by email (dashboards assign by typing a
/// worker address), so the minimum bar is a non-empty string containing `@`.
pub fn validate_assignee_email(email: &str) -> Result<(), CoreError> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Assignee email must not be empty".to_string(),
        ));
    }
    if !trimmed.contains('@') {
        return Err(CoreError::Validation(format!(
            "'{trimmed}' is not a valid email address"
        )));
    }
    Ok(())
}

/// Validate a resolution note: required, non-empty, within length limits.
///
/// Resolution evidence is optional; the note is the mandatory proof of work.
pub fn validate_resolution_note(note: &str) -> Result<(), CoreError> {
    if note.trim().is_empty() {
        return Err(CoreError::Validation(
            "Resolution note must not be empty".to_string(),
        ));
    }
    if note.len() > MAX_TEXT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Resolution note exceeds maximum length of {MAX_TEXT_LENGTH} characters"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_statuses_are_valid() {
        for s in VALID_STATUSES {
            assert!(validate_status(s).is_ok(), "Status '{s}' should be valid");
        }
    }

    #[test]
    fn unknown_status_is_invalid() {
        assert!(validate_status("unknown").is_err());
        assert!(validate_status("").is_err());
        // Statuses are case-sensitive; the UI drafts that used 'Resolved'
        // must normalize before hitting the store.
        assert!(validate_status("Resolved").is_err());
    }

    #[test]
    fn pending_can_only_move_to_in_progress() {
        assert!(validate_transition(STATUS_PENDING, STATUS_IN_PROGRESS).is_ok());
        assert!(validate_transition(STATUS_PENDING, STATUS_RESOLVED).is_err());
        assert!(validate_transition(STATUS_PENDING, STATUS_PENDING).is_err());
    }

    #[test]
    fn in_progress_can_only_move_to_resolved() {
        assert!(validate_transition(STATUS_IN_PROGRESS, STATUS_RESOLVED).is_ok());
        assert!(validate_transition(STATUS_IN_PROGRESS, STATUS_PENDING).is_err());
    }

    #[test]
    fn resolved_is_terminal() {
        assert!(is_terminal(STATUS_RESOLVED));
        assert!(valid_transitions(STATUS_RESOLVED).is_empty());
        assert!(validate_transition(STATUS_RESOLVED, STATUS_PENDING).is_err());
        assert!(validate_transition(STATUS_RESOLVED, STATUS_IN_PROGRESS).is_err());
        assert!(validate_transition(STATUS_RESOLVED, STATUS_RESOLVED).is_err());
    }

    #[test]
    fn disallowed_transition_is_a_conflict() {
        let err = validate_transition(STATUS_RESOLVED, STATUS_IN_PROGRESS).unwrap_err();
        assert!(matches!(err, CoreError::Conflict(_)));
    }

    #[test]
    fn all_categories_are_valid() {
        for c in VALID_CATEGORIES {
            assert!(validate_category(c).is_ok(), "Category '{c}' should be valid");
        }
    }

    #[test]
    fn arbitrary_category_text_is_rejected() {
        assert!(validate_category("Potholes").is_err());
        assert!(validate_category("roads").is_err()); // case-sensitive closed set
        assert!(validate_category("").is_err());
    }

    #[test]
    fn valid_submission_passes() {
        assert!(validate_submission("Broken Light", "Street light is out", CATEGORY_ELECTRICITY).is_ok());
    }

    #[test]
    fn empty_title_or_description_rejected() {
        assert!(validate_submission("", "desc", CATEGORY_ROADS).is_err());
        assert!(validate_submission("   ", "desc", CATEGORY_ROADS).is_err());
        assert!(validate_submission("title", "", CATEGORY_ROADS).is_err());
        assert!(validate_submission("title", "  ", CATEGORY_ROADS).is_err());
    }

    #[test]
    fn overlong_fields_rejected() {
        let long_title = "t".repeat(MAX_TITLE_LENGTH + 1);
        assert!(validate_submission(&long_title, "desc", CATEGORY_ROADS).is_err());

        let long_desc = "d".repeat(MAX_TEXT_LENGTH + 1);
        assert!(validate_submission("title", &long_desc, CATEGORY_ROADS).is_err());
    }

    #[test]
    fn assignee_email_must_be_plausible() {
        assert!(validate_assignee_email("worker@gov.in").is_ok());
        assert!(validate_assignee_email("").is_err());
        assert!(validate_assignee_email("   ").is_err());
        assert!(validate_assignee_email("not-an-email").is_err());
    }

    #[test]
    fn resolution_note_is_mandatory() {
        assert!(validate_resolution_note("Fixed").is_ok());
        assert!(validate_resolution_note("").is_err());
        assert!(validate_resolution_note("   ").is_err());

        let long_note = "n".repeat(MAX_TEXT_LENGTH + 1);
        assert!(validate_resolution_note(&long_note).is_err());
    }

    #[test]
    fn priority_set_is_closed() {
        assert!(validate_priority(PRIORITY_NORMAL).is_ok());
        assert!(validate_priority(PRIORITY_HIGH).is_ok());
        assert!(validate_priority("urgent").is_err());
        assert!(validate_priority("").is_err());
    }
}
