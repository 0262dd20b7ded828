//! The authenticated actor making a request.

use serde::{Deserialize, Serialize};

use promptvault_core::types::PrincipalId;

use super::role::Role;

/// An authenticated principal.
///
/// Built by the session layer from a validated session. Immutable for the
/// lifetime of a request: a role change takes effect on the next request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Principal {
    /// The principal's identifier.
    pub id: PrincipalId,
    /// The principal's role.
    pub role: Role,
}

impl Principal {
    /// Create a principal.
    pub fn new(id: impl Into<PrincipalId>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }

    /// Check whether this principal is the given owner.
    pub fn is(&self, owner: &PrincipalId) -> bool {
        &self.id == owner
    }
}
