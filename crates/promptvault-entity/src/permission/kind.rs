//! Resource kinds and the actions each kind supports.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::action::Action;

/// The kind of resource an action targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResourceKind {
    /// A prompt.
    Prompt,
    /// A tag attached to prompts.
    Tag,
    /// A user-submitted suggestion for a new tag.
    TagSuggestion,
    /// A principal's favorite entry for a prompt.
    Favorite,
    /// A request to publish a prompt, reviewed by moderators.
    ApprovalRequest,
}

impl ResourceKind {
    /// Every resource kind.
    pub const ALL: [ResourceKind; 5] = [
        Self::Prompt,
        Self::Tag,
        Self::TagSuggestion,
        Self::Favorite,
        Self::ApprovalRequest,
    ];

    /// Return the kind as its canonical string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Prompt => "Prompt",
            Self::Tag => "Tag",
            Self::TagSuggestion => "TagSuggestion",
            Self::Favorite => "Favorite",
            Self::ApprovalRequest => "ApprovalRequest",
        }
    }

    /// Lowercase name for user-facing messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Prompt => "prompt",
            Self::Tag => "tag",
            Self::TagSuggestion => "tag suggestion",
            Self::Favorite => "favorite",
            Self::ApprovalRequest => "approval request",
        }
    }

    /// The actions that are meaningful for this kind.
    pub fn actions(&self) -> &'static [Action] {
        use Action::*;
        match self {
            Self::Prompt => &[
                Create, Read, Update, Delete, Approve, Reject, Favorite, Unfavorite, Moderate,
            ],
            Self::Tag => &[Create, Read, Update, Delete, Suggest],
            Self::TagSuggestion => &[Create, Read, Update, Delete, Approve, Reject],
            Self::Favorite => &[Create, Read, Delete],
            Self::ApprovalRequest => &[Create, Read, Update, Delete, Approve, Reject],
        }
    }

    /// Check whether `action` applies to this kind.
    pub fn supports(&self, action: Action) -> bool {
        self.actions().contains(&action)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = promptvault_core::AppError;

    /// Accepts `TagSuggestion`, `tagSuggestion`, `tag_suggestion`, and
    /// `approval` (the original resource key for approval requests).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "prompt" => Ok(Self::Prompt),
            "tag" => Ok(Self::Tag),
            "tagsuggestion" => Ok(Self::TagSuggestion),
            "favorite" => Ok(Self::Favorite),
            "approvalrequest" | "approval" => Ok(Self::ApprovalRequest),
            _ => Err(promptvault_core::AppError::validation(format!(
                "Invalid resource kind: '{s}'"
            ))),
        }
    }
}
