//! Role-based authorization policy for complaint operations.
//!
//! [`can_perform`] is the single pure function every API entry point
//! consults before mutating a complaint. Keeping it here (rather than
//! scattered per-handler role checks) means the rules below are the whole
//! policy, and they are testable without a database.
//!
//! Rules:
//! - Citizens may submit, and may read only their own complaints.
//! - Employees may read and resolve only complaints assigned to them.
//! - Admins may read, assign, prioritize, and delete any complaint, but may
//!   not resolve: resolution is the assigned employee's action.

use crate::roles::{ROLE_ADMIN, ROLE_CITIZEN, ROLE_EMPLOYEE};
use crate::types::DbId;

/// The operations governed by the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Submit,
    Assign,
    SetPriority,
    Resolve,
    Remove,
}

/// The acting identity, as established by the authentication layer.
///
/// The role claim comes from the JWT and is treated as authoritative.
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: DbId,
    pub email: String,
    pub role: String,
}

/// The minimal view of a complaint the policy needs.
///
/// Handlers build this from the stored row; the policy never sees (and
/// cannot depend on) the rest of the record.
#[derive(Debug, Clone)]
pub struct ComplaintAccess {
    pub reporter_id: DbId,
    pub assignee_email: Option<String>,
}

/// Evaluate whether `actor` may perform `operation` on `complaint`.
///
/// Pure and total: unknown roles get no access.
pub fn can_perform(actor: &Actor, operation: Operation, complaint: &ComplaintAccess) -> bool {
    match actor.role.as_str() {
        ROLE_CITIZEN => match operation {
            Operation::Submit => true,
            Operation::Read => complaint.reporter_id == actor.id,
            _ => false,
        },
        ROLE_EMPLOYEE => match operation {
            Operation::Read | Operation::Resolve => complaint
                .assignee_email
                .as_deref()
                .is_some_and(|assignee| assignee == actor.email),
            _ => false,
        },
        ROLE_ADMIN => matches!(
            operation,
            Operation::Read | Operation::Assign | Operation::SetPriority | Operation::Remove
        ),
        _ => false,
    }
}
