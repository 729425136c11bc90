//! Well-known role name constants.
//!
//! These must match the seed data in `db/migrations`. Roles drive
//! authorization: a user's role is the role of their linked member.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_MANAGER: &str = "manager";
pub const ROLE_DEVELOPER: &str = "developer";
pub const ROLE_DESIGNER: &str = "designer";

/// All roles seeded at first migration.
pub const SEEDED_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_MANAGER, ROLE_DEVELOPER, ROLE_DESIGNER];

/// Check whether a role name is one of the seeded roles.
pub fn is_seeded_role(name: &str) -> bool {
    SEEDED_ROLES.contains(&name)
}
