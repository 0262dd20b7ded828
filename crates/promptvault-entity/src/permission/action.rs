//! Action definitions for RBAC.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Actions that can be checked against the policy rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Create a resource.
    Create,
    /// View a resource.
    Read,
    /// Modify a resource.
    Update,
    /// Remove a resource.
    Delete,
    /// Approve a pending prompt, suggestion, or approval request.
    Approve,
    /// Reject a pending prompt, suggestion, or approval request.
    Reject,
    /// Add a prompt to the principal's favorites.
    Favorite,
    /// Remove a prompt from the principal's favorites.
    Unfavorite,
    /// Suggest a new tag.
    Suggest,
    /// Use moderation tooling on a prompt (queue review, flagging).
    Moderate,
}

impl Action {
    /// Every action.
    pub const ALL: [Action; 10] = [
        Self::Create,
        Self::Read,
        Self::Update,
        Self::Delete,
        Self::Approve,
        Self::Reject,
        Self::Favorite,
        Self::Unfavorite,
        Self::Suggest,
        Self::Moderate,
    ];

    /// Return the action as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Favorite => "favorite",
            Self::Unfavorite => "unfavorite",
            Self::Suggest => "suggest",
            Self::Moderate => "moderate",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Action {
    type Err = promptvault_core::AppError;

    /// Parses canonical names plus the legacy route-level aliases
    /// (`edit`, `list`, `view`, `review`, `approveSuggestion`, `rejectSuggestion`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "create" => Ok(Self::Create),
            "read" | "list" | "view" => Ok(Self::Read),
            "update" | "edit" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            "approve" | "approvesuggestion" => Ok(Self::Approve),
            "reject" | "rejectsuggestion" => Ok(Self::Reject),
            "favorite" => Ok(Self::Favorite),
            "unfavorite" => Ok(Self::Unfavorite),
            "suggest" => Ok(Self::Suggest),
            "moderate" | "review" => Ok(Self::Moderate),
            _ => Err(promptvault_core::AppError::validation(format!(
                "Invalid action: '{s}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_names_round_trip_through_from_str() {
        for action in Action::ALL {
            assert_eq!(action.as_str().parse::<Action>().unwrap(), action);
        }
    }

    #[test]
    fn test_legacy_aliases() {
        assert_eq!("edit".parse::<Action>().unwrap(), Action::Update);
        assert_eq!("approveSuggestion".parse::<Action>().unwrap(), Action::Approve);
        assert_eq!("reject_suggestion".parse::<Action>().unwrap(), Action::Reject);
        assert_eq!("review".parse::<Action>().unwrap(), Action::Moderate);
        assert_eq!("list".parse::<Action>().unwrap(), Action::Read);
    }

    #[test]
    fn test_unknown_action() {
        assert!("publish".parse::<Action>().is_err());
    }
}
