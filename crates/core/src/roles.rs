//! Well-known role name constants.
//!
//! These must match the CHECK constraint on `profiles.role` in
//! `0001_create_profiles.sql`.

pub const ROLE_CITIZEN: &str = "citizen";
pub const ROLE_EMPLOYEE: &str = "employee";
pub const ROLE_ADMIN: &str = "admin";

/// All valid role names.
pub const VALID_ROLES: &[&str] = &[ROLE_CITIZEN, ROLE_EMPLOYEE, ROLE_ADMIN];

/// Check whether a role string is one of the known roles.
pub fn is_valid_role(role: &str) -> bool {
    VALID_ROLES.contains(&role)
}
