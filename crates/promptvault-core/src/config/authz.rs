//! Authorization policy configuration.

use serde::{Deserialize, Serialize};

/// Whether moderators may act on content owned by an administrator.
///
/// The policy is encoded into the rule table at startup; the decision
/// engine itself never compares roles of owners. `Deny` requires resolvers
/// to fill in `owner_role` on prompt snapshots: a prompt whose owner role
/// is unknown is treated as admin-owned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeratorContentPolicy {
    /// Moderator prompt rules carry a "not admin-owned" condition.
    Deny,
    /// Moderator prompt rules are unconditional.
    #[default]
    Allow,
}

/// Authorization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthzConfig {
    /// Moderator access to admin-owned prompts.
    #[serde(default)]
    pub moderator_admin_content: ModeratorContentPolicy,
    /// Tag names that classify a prompt as sensitive (case-insensitive).
    #[serde(default = "default_sensitive_tags")]
    pub sensitive_tags: Vec<String>,
    /// Fail at startup when a kind with resource-dependent rules has no resolver.
    #[serde(default = "default_true")]
    pub require_resolvers: bool,
    /// Additional grants appended after the built-in rule table.
    #[serde(default)]
    pub grants: Vec<GrantConfig>,
}

/// A raw grant as written in configuration.
///
/// Every field is optional at the serde level so that a missing
/// `action` or `resource_kind` is reported as a configuration error
/// naming the offending entry, rather than as an opaque parse failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantConfig {
    /// Role name, e.g. `"contributor"`.
    #[serde(default)]
    pub role: Option<String>,
    /// Action name, e.g. `"update"`.
    #[serde(default)]
    pub action: Option<String>,
    /// Resource kind name, e.g. `"prompt"`.
    #[serde(default)]
    pub resource_kind: Option<String>,
    /// Optional condition name, e.g. `"owner"` or `"status_is:pending"`.
    #[serde(default)]
    pub condition: Option<String>,
}

impl Default for AuthzConfig {
    fn default() -> Self {
        Self {
            moderator_admin_content: ModeratorContentPolicy::default(),
            sensitive_tags: default_sensitive_tags(),
            require_resolvers: true,
            grants: Vec::new(),
        }
    }
}

fn default_sensitive_tags() -> Vec<String> {
    vec!["NSFW".to_string()]
}

fn default_true() -> bool {
    true
}
