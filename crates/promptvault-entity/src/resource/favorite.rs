//! Favorite and approval-request snapshots.

use serde::{Deserialize, Serialize};

use promptvault_core::types::ResourceId;

use super::tag::ReviewStatus;

/// Favorite attributes. The favorite's owner is the principal who favorited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteAttributes {
    /// The favorited prompt.
    pub prompt_id: ResourceId,
}

/// Approval request attributes. The owner is the prompt's contributor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalRequestAttributes {
    /// The prompt awaiting approval.
    pub prompt_id: ResourceId,
    /// Review state.
    pub status: ReviewStatus,
}
