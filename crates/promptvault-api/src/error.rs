//! Maps authorization denials and `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use promptvault_auth::{DenyReason, denial_message, denial_title};
use promptvault_core::error::{AppError, ErrorKind};
use promptvault_entity::permission::{Action, ResourceKind};

/// Standard API error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable code; the deny reason for authorization denials.
    pub code: String,
    /// Short title.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// Error returned by handlers.
#[derive(Debug)]
pub enum ApiError {
    /// The authorizer denied the request.
    Denied {
        reason: DenyReason,
        action: Action,
        kind: ResourceKind,
    },
    /// Any other failure.
    App(AppError),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Denied { reason, .. } if reason.is_not_found() => StatusCode::NOT_FOUND,
            Self::Denied { .. } => StatusCode::FORBIDDEN,
            Self::App(e) => match e.kind {
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::Forbidden => StatusCode::FORBIDDEN,
                ErrorKind::Validation => StatusCode::BAD_REQUEST,
                ErrorKind::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
                ErrorKind::Internal
                | ErrorKind::Configuration
                | ErrorKind::Serialization
                | ErrorKind::ExternalService => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// Response body for this error.
    pub fn body(&self) -> ApiErrorResponse {
        match self {
            Self::Denied {
                reason,
                action,
                kind,
            } => ApiErrorResponse {
                code: reason.as_str().to_string(),
                error: denial_title(*reason, *kind),
                message: denial_message(*reason, *action, *kind),
            },
            Self::App(e) => {
                let (code, error) = match e.kind {
                    ErrorKind::NotFound => ("NOT_FOUND", "Not found"),
                    ErrorKind::Forbidden => ("PERMISSION_DENIED", "Insufficient permissions"),
                    ErrorKind::Validation => ("VALIDATION_ERROR", "Bad request"),
                    ErrorKind::Cancelled => ("REQUEST_CANCELLED", "Service unavailable"),
                    _ => ("PERMISSION_CHECK_ERROR", "Internal Server Error"),
                };
                let message = if self.status().is_server_error() && e.kind != ErrorKind::Cancelled
                {
                    "An error occurred while checking permissions.".to_string()
                } else {
                    e.message.clone()
                };
                ApiErrorResponse {
                    code: code.to_string(),
                    error: error.to_string(),
                    message,
                }
            }
        }
    }
}

impl From<AppError> for ApiError {
    fn from(e: AppError) -> Self {
        Self::App(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let Self::App(e) = &self {
            if status.is_server_error() {
                tracing::error!(kind = %e.kind, error = %e.message, "Authorization failed");
            }
        }
        (status, Json(self.body())).into_response()
    }
}
