//! Handler-side authorization guards.

use promptvault_auth::{Authorizer, Decision, DenyReason};
use promptvault_entity::permission::{Action, ResourceKind};
use promptvault_entity::user::Principal;

use crate::error::ApiError;

/// Turns a decision into a handler result: `Ok` to proceed, or the
/// 403/404 denial response.
pub fn enforce(decision: &Decision, action: Action, kind: ResourceKind) -> Result<(), ApiError> {
    if decision.allowed {
        return Ok(());
    }
    Err(ApiError::Denied {
        reason: decision.reason.unwrap_or(DenyReason::NoMatchingRule),
        action,
        kind,
    })
}

/// Authorizes a request and enforces the decision.
///
/// Resolver failures surface as 500 responses, distinct from denials.
pub async fn guard(
    authorizer: &Authorizer,
    principal: &Principal,
    action: Action,
    kind: ResourceKind,
    resource_id: Option<&str>,
) -> Result<(), ApiError> {
    let decision = authorizer
        .authorize(principal, action, kind, resource_id)
        .await?;
    enforce(&decision, action, kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptvault_auth::PolicyRule;
    use promptvault_entity::user::Role;

    #[test]
    fn test_enforce() {
        let rule = PolicyRule {
            role: Role::Viewer,
            action: Action::Read,
            resource_kind: ResourceKind::Tag,
            condition: None,
        };
        assert!(enforce(&Decision::allow(rule), Action::Read, ResourceKind::Tag).is_ok());

        let err = enforce(
            &Decision::deny(DenyReason::ConditionFailed),
            Action::Update,
            ResourceKind::Prompt,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ApiError::Denied {
                reason: DenyReason::ConditionFailed,
                ..
            }
        ));
    }
}
