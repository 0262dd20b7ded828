//! Tag and tag-suggestion snapshots.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tag attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagAttributes {
    /// The tag name.
    pub name: String,
}

/// Review state of a tag suggestion or approval request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReviewStatus {
    /// Awaiting review.
    #[default]
    Pending,
    /// Accepted by a moderator.
    Approved,
    /// Declined by a moderator.
    Rejected,
}

impl ReviewStatus {
    /// Return the status as its uppercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReviewStatus {
    type Err = promptvault_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(promptvault_core::AppError::validation(format!(
                "Invalid review status: '{s}'"
            ))),
        }
    }
}

/// Tag suggestion attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSuggestionAttributes {
    /// The suggested tag name.
    pub name: String,
    /// Review state.
    pub status: ReviewStatus,
}
