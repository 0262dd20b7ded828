//! Policy rule table.
//!
//! Rules are plain data: (role, action, resource kind, optional condition).
//! The table is built once at startup and is read-only afterwards. For a
//! given (action, kind) the outcome is the OR of every applicable rule;
//! insertion order only decides which rule is reported as matched.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use promptvault_core::config::authz::{AuthzConfig, GrantConfig, ModeratorContentPolicy};
use promptvault_core::error::AppError;
use promptvault_entity::permission::{Action, ResourceKind};
use promptvault_entity::resource::ReviewStatus;
use promptvault_entity::user::Role;

use super::condition::Condition;
use super::hierarchy::parse_configured_role;

/// A single grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyRule {
    /// Minimum role the rule applies to (any role subsuming it also matches).
    pub role: Role,
    /// The action granted.
    pub action: Action,
    /// The resource kind the action targets.
    pub resource_kind: ResourceKind,
    /// Attribute guard; `None` means unconditional.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
}

impl PolicyRule {
    /// Whether evaluating this rule needs a resource snapshot.
    pub fn requires_resource(&self) -> bool {
        self.condition.is_some()
    }
}

impl fmt::Display for PolicyRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.role, self.action, self.resource_kind)?;
        if let Some(condition) = &self.condition {
            write!(f, " if {condition}")?;
        }
        Ok(())
    }
}

/// The loaded, validated rule table.
#[derive(Debug, Clone, Default)]
pub struct PolicyRuleSet {
    /// All rules in insertion order.
    rules: Vec<PolicyRule>,
    /// (action, kind) → matching rules in insertion order.
    index: HashMap<(Action, ResourceKind), Vec<PolicyRule>>,
}

impl PolicyRuleSet {
    /// Starts an empty builder.
    pub fn builder() -> PolicyRuleSetBuilder {
        PolicyRuleSetBuilder::default()
    }

    /// Builds the standard PromptVault table, followed by any configured grants.
    pub fn standard(config: &AuthzConfig) -> Result<Self, AppError> {
        use Action::*;
        use ResourceKind::{ApprovalRequest, Prompt, Tag, TagSuggestion};

        let moderator_guard = match config.moderator_admin_content {
            ModeratorContentPolicy::Deny => Some(Condition::NotAdminOwned),
            ModeratorContentPolicy::Allow => None,
        };
        let pending = Condition::StatusIs(ReviewStatus::Pending);
        let own_pending = Condition::AllOf(vec![Condition::Owner, pending.clone()]);

        let mut builder = Self::builder()
            // Prompt
            .allow_if(Role::Viewer, Read, Prompt, Condition::PublishedOrOwner)
            .allow_if(Role::Viewer, Favorite, Prompt, Condition::PublishedOrOwner)
            .allow(Role::Viewer, Unfavorite, Prompt)
            .allow(Role::Contributor, Create, Prompt)
            .allow_if(Role::Contributor, Update, Prompt, Condition::OwnerNotSensitive)
            .allow_if(Role::Contributor, Delete, Prompt, Condition::Owner)
            .allow(Role::Moderator, Read, Prompt);

        for action in [Update, Delete, Approve, Reject, Moderate] {
            builder = builder.rule(Role::Moderator, action, Prompt, moderator_guard.clone());
        }
        for action in [Read, Update, Delete, Approve, Reject, Moderate, Favorite] {
            builder = builder.allow(Role::Admin, action, Prompt);
        }

        let mut builder = builder
            // Tag
            .allow(Role::Viewer, Read, Tag)
            .allow(Role::Contributor, Suggest, Tag)
            .allow(Role::Moderator, Create, Tag)
            .allow(Role::Moderator, Update, Tag)
            .allow(Role::Admin, Delete, Tag)
            // TagSuggestion
            .allow(Role::Contributor, Create, TagSuggestion)
            .allow(Role::Contributor, Read, TagSuggestion)
            .allow_if(Role::Contributor, Update, TagSuggestion, own_pending.clone())
            .allow_if(Role::Contributor, Delete, TagSuggestion, own_pending)
            .allow(Role::Moderator, Update, TagSuggestion)
            .allow_if(Role::Moderator, Approve, TagSuggestion, pending.clone())
            .allow_if(Role::Moderator, Reject, TagSuggestion, pending.clone())
            .allow(Role::Admin, Delete, TagSuggestion)
            .allow(Role::Admin, Approve, TagSuggestion)
            .allow(Role::Admin, Reject, TagSuggestion)
            // Favorite
            .allow(Role::Viewer, Create, ResourceKind::Favorite)
            .allow_if(Role::Viewer, Read, ResourceKind::Favorite, Condition::Owner)
            .allow_if(Role::Viewer, Delete, ResourceKind::Favorite, Condition::Owner)
            .allow(Role::Moderator, Read, ResourceKind::Favorite)
            .allow(Role::Moderator, Delete, ResourceKind::Favorite)
            // ApprovalRequest
            .allow(Role::Contributor, Create, ApprovalRequest)
            .allow_if(Role::Contributor, Read, ApprovalRequest, Condition::Owner)
            .allow(Role::Moderator, Read, ApprovalRequest)
            .allow(Role::Moderator, Update, ApprovalRequest)
            .allow_if(Role::Moderator, Approve, ApprovalRequest, pending.clone())
            .allow_if(Role::Moderator, Reject, ApprovalRequest, pending)
            .allow(Role::Admin, Delete, ApprovalRequest)
            .allow(Role::Admin, Approve, ApprovalRequest)
            .allow(Role::Admin, Reject, ApprovalRequest);

        for (position, grant) in config.grants.iter().enumerate() {
            builder = builder.push(parse_grant(position, grant)?);
        }

        builder.build()
    }

    /// All rules whose action and kind match, across all roles, in insertion order.
    pub fn rules_for(&self, action: Action, kind: ResourceKind) -> &[PolicyRule] {
        self.index
            .get(&(action, kind))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether any rule for (action, kind) needs a resource snapshot.
    pub fn requires_resource(&self, action: Action, kind: ResourceKind) -> bool {
        self.rules_for(action, kind)
            .iter()
            .any(PolicyRule::requires_resource)
    }

    /// Kinds for which at least one rule needs a resource snapshot.
    pub fn kinds_requiring_resources(&self) -> BTreeSet<ResourceKind> {
        self.rules
            .iter()
            .filter(|r| r.requires_resource())
            .map(|r| r.resource_kind)
            .collect()
    }

    /// Iterates over every rule in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &PolicyRule> {
        self.rules.iter()
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Accumulates rules and validates them on [`build`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct PolicyRuleSetBuilder {
    rules: Vec<PolicyRule>,
}

impl PolicyRuleSetBuilder {
    /// Adds an unconditional rule.
    pub fn allow(self, role: Role, action: Action, kind: ResourceKind) -> Self {
        self.rule(role, action, kind, None)
    }

    /// Adds a conditional rule.
    pub fn allow_if(
        self,
        role: Role,
        action: Action,
        kind: ResourceKind,
        condition: Condition,
    ) -> Self {
        self.rule(role, action, kind, Some(condition))
    }

    /// Adds a rule with an optional condition.
    pub fn rule(
        self,
        role: Role,
        action: Action,
        kind: ResourceKind,
        condition: Option<Condition>,
    ) -> Self {
        self.push(PolicyRule {
            role,
            action,
            resource_kind: kind,
            condition,
        })
    }

    /// Adds an already-constructed rule.
    pub fn push(mut self, rule: PolicyRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Validates every rule and builds the lookup index.
    pub fn build(self) -> Result<PolicyRuleSet, AppError> {
        let mut index: HashMap<(Action, ResourceKind), Vec<PolicyRule>> = HashMap::new();

        for rule in &self.rules {
            validate_rule(rule)?;
            index
                .entry((rule.action, rule.resource_kind))
                .or_default()
                .push(rule.clone());
        }

        Ok(PolicyRuleSet {
            rules: self.rules,
            index,
        })
    }
}

fn validate_rule(rule: &PolicyRule) -> Result<(), AppError> {
    if !rule.resource_kind.supports(rule.action) {
        return Err(AppError::configuration(format!(
            "Invalid rule '{rule}': action '{}' does not apply to {}",
            rule.action, rule.resource_kind
        )));
    }

    if let Some(condition) = &rule.condition {
        if !condition.applies_to(rule.resource_kind) {
            return Err(AppError::configuration(format!(
                "Invalid rule '{rule}': condition '{condition}' can never hold for {}",
                rule.resource_kind
            )));
        }
    }

    Ok(())
}

/// Converts a configured grant into a rule, naming the entry on failure.
fn parse_grant(position: usize, grant: &GrantConfig) -> Result<PolicyRule, AppError> {
    let missing = |field: &str| {
        AppError::configuration(format!(
            "authz.grants[{position}] is missing required field '{field}'"
        ))
    };
    let invalid = |e: AppError| {
        AppError::configuration(format!("authz.grants[{position}]: {}", e.message))
    };

    let role = grant.role.as_deref().ok_or_else(|| missing("role"))?;
    let action = grant.action.as_deref().ok_or_else(|| missing("action"))?;
    let kind = grant
        .resource_kind
        .as_deref()
        .ok_or_else(|| missing("resource_kind"))?;

    Ok(PolicyRule {
        role: parse_configured_role(role).map_err(invalid)?,
        action: action.parse::<Action>().map_err(invalid)?,
        resource_kind: kind.parse::<ResourceKind>().map_err(invalid)?,
        condition: grant
            .condition
            .as_deref()
            .map(str::parse::<Condition>)
            .transpose()
            .map_err(invalid)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptvault_core::error::ErrorKind;

    fn standard() -> PolicyRuleSet {
        PolicyRuleSet::standard(&AuthzConfig::default()).expect("standard table is valid")
    }

    #[test]
    fn test_rules_for_preserves_insertion_order() {
        let rules = standard();
        let roles: Vec<Role> = rules
            .rules_for(Action::Update, ResourceKind::Prompt)
            .iter()
            .map(|r| r.role)
            .collect();
        assert_eq!(roles, vec![Role::Contributor, Role::Moderator, Role::Admin]);
    }

    #[test]
    fn test_unknown_pair_has_no_rules() {
        let rules = standard();
        assert!(rules.rules_for(Action::Approve, ResourceKind::Tag).is_empty());
        assert!(rules.rules_for(Action::Update, ResourceKind::Favorite).is_empty());
    }

    #[test]
    fn test_requires_resource() {
        let rules = standard();
        assert!(rules.requires_resource(Action::Update, ResourceKind::Prompt));
        assert!(rules.requires_resource(Action::Read, ResourceKind::Prompt));
        assert!(!rules.requires_resource(Action::Create, ResourceKind::Prompt));
        assert!(!rules.requires_resource(Action::Read, ResourceKind::Tag));
    }

    #[test]
    fn test_moderator_policy_changes_rules_not_engine() {
        let allow = standard();
        let deny = PolicyRuleSet::standard(&AuthzConfig {
            moderator_admin_content: ModeratorContentPolicy::Deny,
            ..AuthzConfig::default()
        })
        .unwrap();

        let find = |set: &PolicyRuleSet| {
            set.rules_for(Action::Delete, ResourceKind::Prompt)
                .iter()
                .find(|r| r.role == Role::Moderator)
                .cloned()
                .unwrap()
        };
        assert_eq!(find(&deny).condition, Some(Condition::NotAdminOwned));
        assert_eq!(find(&allow).condition, None);
    }

    #[test]
    fn test_inapplicable_action_is_rejected() {
        let err = PolicyRuleSet::builder()
            .allow(Role::Moderator, Action::Approve, ResourceKind::Favorite)
            .build()
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }

    #[test]
    fn test_impossible_condition_is_rejected() {
        let err = PolicyRuleSet::builder()
            .allow_if(
                Role::Viewer,
                Action::Read,
                ResourceKind::Tag,
                Condition::Published,
            )
            .build()
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }

    #[test]
    fn test_configured_grants_are_appended() {
        let config = AuthzConfig {
            grants: vec![GrantConfig {
                role: Some("viewer".into()),
                action: Some("suggest".into()),
                resource_kind: Some("tag".into()),
                condition: None,
            }],
            ..AuthzConfig::default()
        };
        let rules = PolicyRuleSet::standard(&config).unwrap();
        assert_eq!(rules.len(), standard().len() + 1);
        let last = rules.iter().last().unwrap();
        assert_eq!(last.role, Role::Viewer);
        assert_eq!(last.action, Action::Suggest);
    }

    #[test]
    fn test_malformed_grants_fail_fast() {
        let cases = [
            GrantConfig {
                role: Some("viewer".into()),
                action: None,
                resource_kind: Some("tag".into()),
                condition: None,
            },
            GrantConfig {
                role: Some("viewer".into()),
                action: Some("read".into()),
                resource_kind: None,
                condition: None,
            },
            GrantConfig {
                role: Some("owner".into()),
                action: Some("read".into()),
                resource_kind: Some("tag".into()),
                condition: None,
            },
            GrantConfig {
                role: Some("viewer".into()),
                action: Some("read".into()),
                resource_kind: Some("prompt".into()),
                condition: Some("is_friend".into()),
            },
        ];

        for grant in cases {
            let config = AuthzConfig {
                grants: vec![grant.clone()],
                ..AuthzConfig::default()
            };
            let err = PolicyRuleSet::standard(&config).unwrap_err();
            assert_eq!(err.kind, ErrorKind::Configuration, "{grant:?}");
            assert!(err.message.contains("authz.grants[0]"), "{}", err.message);
        }
    }

    #[test]
    fn test_display() {
        let rule = PolicyRule {
            role: Role::Contributor,
            action: Action::Update,
            resource_kind: ResourceKind::Prompt,
            condition: Some(Condition::OwnerNotSensitive),
        };
        assert_eq!(
            rule.to_string(),
            "CONTRIBUTOR update Prompt if owner_not_sensitive"
        );
    }
}
