//! Decision engine: evaluates a request against the policy rule set.
//!
//! Pure and synchronous. The engine performs no I/O and does not log;
//! logging and event publication happen in the enforcement adapter.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use promptvault_entity::permission::{Action, ResourceKind};
use promptvault_entity::resource::Resource;
use promptvault_entity::user::Principal;

use super::hierarchy::role_at_least;
use super::policies::{PolicyRule, PolicyRuleSet};

/// Why a request was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DenyReason {
    /// No rule exists for the (action, kind) pair.
    NoMatchingRule,
    /// A rule for the principal's role exists but its condition did not hold.
    ConditionFailed,
    /// Rules exist, but none for a role the principal holds.
    RoleInsufficient,
    /// The target resource does not exist.
    ResourceNotFound,
}

impl DenyReason {
    /// Wire value of the reason.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoMatchingRule => "NO_MATCHING_RULE",
            Self::ConditionFailed => "CONDITION_FAILED",
            Self::RoleInsufficient => "ROLE_INSUFFICIENT",
            Self::ResourceNotFound => "RESOURCE_NOT_FOUND",
        }
    }

    /// Whether the denial should be reported as a missing resource.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ResourceNotFound)
    }
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one authorization request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// Whether the request is permitted.
    pub allowed: bool,
    /// Present exactly when `allowed` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<DenyReason>,
    /// The first rule that permitted the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_rule: Option<PolicyRule>,
}

impl Decision {
    /// An allow decision citing `rule`.
    pub fn allow(rule: PolicyRule) -> Self {
        Self {
            allowed: true,
            reason: None,
            matched_rule: Some(rule),
        }
    }

    /// A deny decision.
    pub fn deny(reason: DenyReason) -> Self {
        Self {
            allowed: false,
            reason: Some(reason),
            matched_rule: None,
        }
    }

    /// Whether the request is permitted.
    pub fn is_allowed(&self) -> bool {
        self.allowed
    }
}

/// How a single rule fared during evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleEvaluation {
    pub rule: PolicyRule,
    pub role_matched: bool,
    /// `None` when the condition was not evaluated.
    pub condition_held: Option<bool>,
}

/// A decision together with the per-rule trace that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Explanation {
    pub decision: Decision,
    pub evaluations: Vec<RuleEvaluation>,
}

/// Evaluates requests against an immutable rule set.
#[derive(Debug, Clone)]
pub struct DecisionEngine {
    rules: Arc<PolicyRuleSet>,
}

impl DecisionEngine {
    /// Creates an engine over `rules`.
    pub fn new(rules: PolicyRuleSet) -> Self {
        Self {
            rules: Arc::new(rules),
        }
    }

    /// Creates an engine sharing an existing rule set.
    pub fn from_shared(rules: Arc<PolicyRuleSet>) -> Self {
        Self { rules }
    }

    /// The rule set this engine evaluates.
    pub fn rules(&self) -> &PolicyRuleSet {
        &self.rules
    }

    /// Decides whether `principal` may perform `action` on a resource of `kind`.
    ///
    /// `resource` is the snapshot of the target, or `None` when the target
    /// does not exist or the action has no target (e.g. create). A snapshot
    /// of a different kind is treated as absent.
    pub fn decide(
        &self,
        principal: &Principal,
        action: Action,
        kind: ResourceKind,
        resource: Option<&Resource>,
    ) -> Decision {
        self.evaluate(principal, action, kind, resource, None)
    }

    /// Like [`decide`](Self::decide), also returning the evaluation trace.
    pub fn explain(
        &self,
        principal: &Principal,
        action: Action,
        kind: ResourceKind,
        resource: Option<&Resource>,
    ) -> Explanation {
        let mut evaluations = Vec::new();
        let decision = self.evaluate(principal, action, kind, resource, Some(&mut evaluations));
        Explanation {
            decision,
            evaluations,
        }
    }

    fn evaluate(
        &self,
        principal: &Principal,
        action: Action,
        kind: ResourceKind,
        resource: Option<&Resource>,
        mut trace: Option<&mut Vec<RuleEvaluation>>,
    ) -> Decision {
        let resource = resource.filter(|r| r.kind() == kind);

        if resource.is_none() && self.rules.requires_resource(action, kind) {
            return Decision::deny(DenyReason::ResourceNotFound);
        }

        let candidates = self.rules.rules_for(action, kind);
        if candidates.is_empty() {
            return Decision::deny(DenyReason::NoMatchingRule);
        }

        let mut role_matched_any = false;
        let mut allowed_by: Option<&PolicyRule> = None;

        for rule in candidates {
            let role_matched = role_at_least(principal.role, rule.role);
            // Once a rule has matched, the rest are only evaluated for the trace.
            let condition_held = if role_matched {
                role_matched_any = true;
                Some(match (&rule.condition, resource) {
                    (None, _) => true,
                    (Some(condition), Some(resource)) => condition.evaluate(principal, resource),
                    (Some(_), None) => false,
                })
            } else {
                None
            };

            if let Some(trace) = trace.as_deref_mut() {
                trace.push(RuleEvaluation {
                    rule: rule.clone(),
                    role_matched,
                    condition_held,
                });
            }

            if allowed_by.is_none() && condition_held == Some(true) {
                allowed_by = Some(rule);
                if trace.is_none() {
                    break;
                }
            }
        }

        match allowed_by {
            Some(rule) => Decision::allow(rule.clone()),
            None if role_matched_any => Decision::deny(DenyReason::ConditionFailed),
            None => Decision::deny(DenyReason::RoleInsufficient),
        }
    }
}
