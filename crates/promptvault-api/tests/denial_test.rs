//! Handler-level tests: a denied request never reaches the handler body.

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::extract::{Path, State};
use axum::http::{Request, StatusCode};
use axum::routing::get;
use tower::ServiceExt;

use promptvault_api::{ApiError, ApiErrorResponse, guard};
use promptvault_auth::{Authorizer, MemoryResolver};
use promptvault_core::config::AuthzConfig;
use promptvault_core::error::AppError;
use promptvault_entity::permission::{Action, ResourceKind};
use promptvault_entity::resource::Resource;
use promptvault_entity::user::{Principal, Role};

fn app() -> Router {
    let prompts = MemoryResolver::new()
        .with(Resource::prompt("published", "alice", true, false).with_owner_role(Role::Contributor))
        .with(Resource::prompt("draft", "alice", false, false).with_owner_role(Role::Contributor));

    let authorizer = Authorizer::builder(AuthzConfig::default())
        .resolver(ResourceKind::Prompt, Arc::new(prompts))
        .snapshot_only()
        .build()
        .unwrap();

    Router::new()
        .route("/prompts/{id}", get(read_prompt).delete(delete_prompt))
        .route("/broken/{id}", get(broken))
        .with_state(authorizer)
}

fn viewer() -> Principal {
    Principal::new("bob", Role::Viewer)
}

async fn read_prompt(
    State(authorizer): State<Authorizer>,
    Path(id): Path<String>,
) -> Result<&'static str, ApiError> {
    guard(&authorizer, &viewer(), Action::Read, ResourceKind::Prompt, Some(&id)).await?;
    Ok("prompt body")
}

async fn delete_prompt(
    State(authorizer): State<Authorizer>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    guard(&authorizer, &viewer(), Action::Delete, ResourceKind::Prompt, Some(&id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn broken(Path(_id): Path<String>) -> Result<StatusCode, ApiError> {
    Err(AppError::external("resolver timed out talking to 10.0.0.7").into())
}

async fn call(uri: &str, method: &str) -> (StatusCode, Vec<u8>) {
    let response = app()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

#[tokio::test]
async fn test_allowed_request_reaches_handler() {
    let (status, body) = call("/prompts/published", "GET").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"prompt body");
}

#[tokio::test]
async fn test_condition_failure_is_forbidden() {
    let (status, body) = call("/prompts/draft", "GET").await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let body: ApiErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(body.code, "CONDITION_FAILED");
    assert_eq!(body.error, "Insufficient permissions");
    assert_eq!(body.message, "You do not have permission to read this prompt.");
}

#[tokio::test]
async fn test_missing_prompt_is_not_found_before_role_check() {
    let (status, body) = call("/prompts/missing", "DELETE").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "code": "RESOURCE_NOT_FOUND",
            "error": "Prompt not found",
            "message": "The requested prompt does not exist."
        })
    );
}

#[tokio::test]
async fn test_role_insufficient_is_forbidden() {
    let (status, body) = call("/prompts/published", "DELETE").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let body: ApiErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(body.code, "ROLE_INSUFFICIENT");
}

#[tokio::test]
async fn test_backend_failure_is_server_error() {
    let (status, body) = call("/broken/x", "GET").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body: ApiErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(body.code, "PERMISSION_CHECK_ERROR");
    assert!(!body.message.contains("10.0.0.7"));
}
