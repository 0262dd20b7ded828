//! Role hierarchy: Admin ⊇ Moderator ⊇ Contributor ⊇ Viewer.
//!
//! Each role maps to the complete, precomputed set of roles it subsumes,
//! itself included. A lookup is a single match; there is no graph walk.

use promptvault_core::error::AppError;
use promptvault_entity::user::Role;

/// Returns every role whose permissions are included in `role`'s, including `role`.
pub fn subsumed_roles(role: Role) -> &'static [Role] {
    match role {
        Role::Viewer => &[Role::Viewer],
        Role::Contributor => &[Role::Contributor, Role::Viewer],
        Role::Moderator => &[Role::Moderator, Role::Contributor, Role::Viewer],
        Role::Admin => &[
            Role::Admin,
            Role::Moderator,
            Role::Contributor,
            Role::Viewer,
        ],
    }
}

/// Checks whether `role` is at least `minimum` in the hierarchy.
pub fn role_at_least(role: Role, minimum: Role) -> bool {
    subsumed_roles(role).contains(&minimum)
}

/// Parses a role name coming from configuration.
///
/// Unknown names are configuration errors, reported at startup.
pub fn parse_configured_role(name: &str) -> Result<Role, AppError> {
    name.parse::<Role>().map_err(|e| {
        AppError::configuration(format!(
            "Unrecognized role in policy configuration: {}",
            e.message
        ))
    })
}
