//! User-facing denial texts.
//!
//! Texts never name the condition that failed, and not-found texts never
//! echo the requested id.

use promptvault_core::error::AppError;
use promptvault_entity::permission::{Action, ResourceKind};

use crate::rbac::DenyReason;

/// Short title for a denial, e.g. `"Prompt not found"`.
pub fn denial_title(reason: DenyReason, kind: ResourceKind) -> String {
    if reason.is_not_found() {
        let label = kind.label();
        let mut chars = label.chars();
        match chars.next() {
            Some(first) => format!("{}{} not found", first.to_uppercase(), chars.as_str()),
            None => "Not found".to_string(),
        }
    } else {
        "Insufficient permissions".to_string()
    }
}

/// Full sentence explaining a denial to the client.
pub fn denial_message(reason: DenyReason, action: Action, kind: ResourceKind) -> String {
    if reason.is_not_found() {
        format!("The requested {} does not exist.", kind.label())
    } else {
        format!(
            "You do not have permission to {} this {}.",
            action.as_str(),
            kind.label()
        )
    }
}

/// Converts a denial into an [`AppError`]: `NotFound` or `Forbidden`.
pub fn denial_error(reason: DenyReason, action: Action, kind: ResourceKind) -> AppError {
    let message = denial_message(reason, action, kind);
    if reason.is_not_found() {
        AppError::not_found(message)
    } else {
        AppError::forbidden(message)
    }
}
