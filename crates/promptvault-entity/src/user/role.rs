//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles available in the RBAC system.
///
/// Roles are ordered by privilege: Admin > Moderator > Contributor > Viewer.
/// The subsumption table derived from this order lives in
/// `promptvault_auth::rbac::hierarchy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Reads published prompts and manages their own favorites.
    Viewer,
    /// Creates prompts, edits their own, suggests tags.
    Contributor,
    /// Moderates prompts and tag suggestions.
    Moderator,
    /// Full access.
    Admin,
}

impl Role {
    /// Every role, least privileged first.
    pub const ALL: [Role; 4] = [Self::Viewer, Self::Contributor, Self::Moderator, Self::Admin];

    /// Return the role as its canonical uppercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Viewer => "VIEWER",
            Self::Contributor => "CONTRIBUTOR",
            Self::Moderator => "MODERATOR",
            Self::Admin => "ADMIN",
        }
    }

    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = promptvault_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "viewer" => Ok(Self::Viewer),
            "contributor" => Ok(Self::Contributor),
            "moderator" => Ok(Self::Moderator),
            "admin" => Ok(Self::Admin),
            _ => Err(promptvault_core::AppError::validation(format!(
                "Invalid role: '{s}'. Expected one of: viewer, contributor, moderator, admin"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("MODERATOR".parse::<Role>().unwrap(), Role::Moderator);
        assert_eq!(" Viewer ".parse::<Role>().unwrap(), Role::Viewer);
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        // Never silently treated as a viewer.
        assert!("".parse::<Role>().is_err());
        assert!("owner".parse::<Role>().is_err());
        assert!("undefined".parse::<Role>().is_err());
    }

    #[test]
    fn test_serde_uses_uppercase() {
        let json = serde_json::to_string(&Role::Contributor).expect("serialize");
        assert_eq!(json, "\"CONTRIBUTOR\"");
        let role: Role = serde_json::from_str("\"MODERATOR\"").expect("deserialize");
        assert_eq!(role, Role::Moderator);
    }
}
