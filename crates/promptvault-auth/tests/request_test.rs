//! Integration tests for string-typed authorization requests.

mod helpers;

use promptvault_auth::{AuthorizeRequest, Decision, DenyReason};
use promptvault_core::error::ErrorKind;

use helpers::TestCatalog;

#[tokio::test]
async fn test_legacy_action_names() {
    let catalog = TestCatalog::new();

    let edit = AuthorizeRequest::new("alice", "CONTRIBUTOR", "edit", "Prompt").on("draft");
    assert!(catalog.authorizer.authorize_request(&edit).await.unwrap().allowed);

    let approve =
        AuthorizeRequest::new("mod", "moderator", "approveSuggestion", "tagSuggestion").on("pending");
    assert!(catalog.authorizer.authorize_request(&approve).await.unwrap().allowed);

    let review = AuthorizeRequest::new("mod", "Moderator", "review", "approval").on("req-alice");
    let decision = catalog.authorizer.authorize_request(&review).await.unwrap();
    // Approval requests have no "moderate" action.
    assert_eq!(decision.reason, Some(DenyReason::NoMatchingRule));
}

#[tokio::test]
async fn test_unknown_action_or_kind_is_denied() {
    let mut catalog = TestCatalog::new();

    for request in [
        AuthorizeRequest::new("root", "ADMIN", "transfer", "Prompt").on("published"),
        AuthorizeRequest::new("root", "ADMIN", "read", "nsfwQueue"),
    ] {
        let decision = catalog.authorizer.authorize_request(&request).await.unwrap();
        assert_eq!(decision, Decision::deny(DenyReason::NoMatchingRule));
    }

    let events = catalog.drain_events();
    assert_eq!(events.len(), 2);
    assert_eq!(catalog.prompt_lookups(), 0);
}

#[tokio::test]
async fn test_unknown_role_is_rejected() {
    let catalog = TestCatalog::new();
    let request = AuthorizeRequest::new("eve", "owner", "read", "Prompt").on("published");
    let err = catalog.authorizer.authorize_request(&request).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn test_request_deserializes_from_json() {
    let catalog = TestCatalog::new();
    let request: AuthorizeRequest = serde_json::from_value(serde_json::json!({
        "principal_id": "bob",
        "role": "VIEWER",
        "action": "view",
        "resource_kind": "Prompt",
        "resource_id": "draft"
    }))
    .unwrap();

    let decision = catalog.authorizer.authorize_request(&request).await.unwrap();
    assert_eq!(decision.reason, Some(DenyReason::ConditionFailed));
}
