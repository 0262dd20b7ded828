//! Resource snapshots consumed by the decision engine.
//!
//! A snapshot is an immutable value supplied by the persistence layer for
//! a single decision. The authorization layer never mutates or caches it.

pub mod favorite;
pub mod prompt;
pub mod tag;

use serde::{Deserialize, Serialize};

use promptvault_core::types::{PrincipalId, ResourceId};

use crate::permission::ResourceKind;
use crate::user::Role;

pub use favorite::{ApprovalRequestAttributes, FavoriteAttributes};
pub use prompt::{PromptAttributes, SensitivityClassifier};
pub use tag::{ReviewStatus, TagAttributes, TagSuggestionAttributes};

/// Attributes shared by every resource kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceMeta {
    /// Resource identifier.
    pub id: ResourceId,
    /// The principal who created the resource.
    pub owner_id: PrincipalId,
    /// Role of the owner at snapshot time, when the resolver knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_role: Option<Role>,
}

impl ResourceMeta {
    /// Create metadata with an unknown owner role.
    pub fn new(id: impl Into<ResourceId>, owner_id: impl Into<PrincipalId>) -> Self {
        Self {
            id: id.into(),
            owner_id: owner_id.into(),
            owner_role: None,
        }
    }
}

/// Common metadata plus kind-specific attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot<A> {
    /// Shared attributes.
    #[serde(flatten)]
    pub meta: ResourceMeta,
    /// Kind-specific attributes.
    #[serde(flatten)]
    pub attributes: A,
}

/// Closed union of every resource kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Resource {
    /// A prompt.
    Prompt(Snapshot<PromptAttributes>),
    /// A tag.
    Tag(Snapshot<TagAttributes>),
    /// A tag suggestion.
    TagSuggestion(Snapshot<TagSuggestionAttributes>),
    /// A favorite entry.
    Favorite(Snapshot<FavoriteAttributes>),
    /// An approval request.
    ApprovalRequest(Snapshot<ApprovalRequestAttributes>),
}

impl Resource {
    /// Build a prompt snapshot.
    pub fn prompt(
        id: impl Into<ResourceId>,
        owner_id: impl Into<PrincipalId>,
        is_published: bool,
        is_sensitive: bool,
    ) -> Self {
        Self::Prompt(Snapshot {
            meta: ResourceMeta::new(id, owner_id),
            attributes: PromptAttributes {
                is_published,
                is_sensitive,
            },
        })
    }

    /// Build a tag snapshot.
    pub fn tag(
        id: impl Into<ResourceId>,
        owner_id: impl Into<PrincipalId>,
        name: impl Into<String>,
    ) -> Self {
        Self::Tag(Snapshot {
            meta: ResourceMeta::new(id, owner_id),
            attributes: TagAttributes { name: name.into() },
        })
    }

    /// Build a tag suggestion snapshot.
    pub fn tag_suggestion(
        id: impl Into<ResourceId>,
        owner_id: impl Into<PrincipalId>,
        name: impl Into<String>,
        status: ReviewStatus,
    ) -> Self {
        Self::TagSuggestion(Snapshot {
            meta: ResourceMeta::new(id, owner_id),
            attributes: TagSuggestionAttributes {
                name: name.into(),
                status,
            },
        })
    }

    /// Build a favorite snapshot.
    pub fn favorite(
        id: impl Into<ResourceId>,
        owner_id: impl Into<PrincipalId>,
        prompt_id: impl Into<ResourceId>,
    ) -> Self {
        Self::Favorite(Snapshot {
            meta: ResourceMeta::new(id, owner_id),
            attributes: FavoriteAttributes {
                prompt_id: prompt_id.into(),
            },
        })
    }

    /// Build an approval request snapshot.
    pub fn approval_request(
        id: impl Into<ResourceId>,
        owner_id: impl Into<PrincipalId>,
        prompt_id: impl Into<ResourceId>,
        status: ReviewStatus,
    ) -> Self {
        Self::ApprovalRequest(Snapshot {
            meta: ResourceMeta::new(id, owner_id),
            attributes: ApprovalRequestAttributes {
                prompt_id: prompt_id.into(),
                status,
            },
        })
    }

    /// Set the owner's role.
    pub fn with_owner_role(mut self, role: Role) -> Self {
        self.meta_mut().owner_role = Some(role);
        self
    }

    /// Set a prompt's sensitivity flag. Other kinds are returned unchanged.
    pub fn with_sensitive(mut self, is_sensitive: bool) -> Self {
        if let Self::Prompt(s) = &mut self {
            s.attributes.is_sensitive = is_sensitive;
        }
        self
    }

    /// The kind of this resource.
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Prompt(_) => ResourceKind::Prompt,
            Self::Tag(_) => ResourceKind::Tag,
            Self::TagSuggestion(_) => ResourceKind::TagSuggestion,
            Self::Favorite(_) => ResourceKind::Favorite,
            Self::ApprovalRequest(_) => ResourceKind::ApprovalRequest,
        }
    }

    /// Shared attributes.
    pub fn meta(&self) -> &ResourceMeta {
        match self {
            Self::Prompt(s) => &s.meta,
            Self::Tag(s) => &s.meta,
            Self::TagSuggestion(s) => &s.meta,
            Self::Favorite(s) => &s.meta,
            Self::ApprovalRequest(s) => &s.meta,
        }
    }

    fn meta_mut(&mut self) -> &mut ResourceMeta {
        match self {
            Self::Prompt(s) => &mut s.meta,
            Self::Tag(s) => &mut s.meta,
            Self::TagSuggestion(s) => &mut s.meta,
            Self::Favorite(s) => &mut s.meta,
            Self::ApprovalRequest(s) => &mut s.meta,
        }
    }

    /// The resource identifier.
    pub fn id(&self) -> &ResourceId {
        &self.meta().id
    }

    /// The creator of the resource.
    pub fn owner_id(&self) -> &PrincipalId {
        &self.meta().owner_id
    }

    /// Prompt attributes, if this is a prompt.
    pub fn as_prompt(&self) -> Option<&PromptAttributes> {
        match self {
            Self::Prompt(s) => Some(&s.attributes),
            _ => None,
        }
    }

    /// Review status, for the kinds that have one.
    pub fn review_status(&self) -> Option<ReviewStatus> {
        match self {
            Self::TagSuggestion(s) => Some(s.attributes.status),
            Self::ApprovalRequest(s) => Some(s.attributes.status),
            _ => None,
        }
    }
}
