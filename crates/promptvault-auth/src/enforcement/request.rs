//! String-typed inbound authorization request.

use serde::{Deserialize, Serialize};

/// An authorization request as it arrives from the session layer.
///
/// All fields are raw strings; parsing happens in
/// [`Authorizer::authorize_request`](super::Authorizer::authorize_request).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizeRequest {
    /// The authenticated principal's id.
    pub principal_id: String,
    /// The principal's role, e.g. `"CONTRIBUTOR"`.
    pub role: String,
    /// The requested action, e.g. `"update"` or the legacy `"edit"`.
    pub action: String,
    /// The target resource kind, e.g. `"Prompt"`.
    pub resource_kind: String,
    /// The target resource id, absent for actions without a target.
    #[serde(default)]
    pub resource_id: Option<String>,
}

impl AuthorizeRequest {
    /// Creates a request without a target id.
    pub fn new(
        principal_id: impl Into<String>,
        role: impl Into<String>,
        action: impl Into<String>,
        resource_kind: impl Into<String>,
    ) -> Self {
        Self {
            principal_id: principal_id.into(),
            role: role.into(),
            action: action.into(),
            resource_kind: resource_kind.into(),
            resource_id: None,
        }
    }

    /// Sets the target resource id.
    pub fn on(mut self, resource_id: impl Into<String>) -> Self {
        self.resource_id = Some(resource_id.into());
        self
    }
}
