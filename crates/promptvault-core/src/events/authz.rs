//! Authorization domain events.

use serde::{Deserialize, Serialize};

/// Events related to authorization decisions.
///
/// Values are carried as their wire strings so that this crate stays free
/// of entity types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AuthzEvent {
    /// A decision was produced for a request.
    DecisionMade {
        /// The principal's role.
        role: String,
        /// The requested action.
        action: String,
        /// The resource kind.
        resource_kind: String,
        /// The resource identifier, when one was supplied.
        resource_id: Option<String>,
        /// Whether the action was allowed.
        allowed: bool,
        /// Denial reason code, absent on allow.
        reason: Option<String>,
        /// Human-readable summary of the matched rule, on allow.
        matched_rule: Option<String>,
    },
    /// A resolver failed with an error other than "not found".
    ResolutionFailed {
        /// The resource kind.
        resource_kind: String,
        /// The resource identifier.
        resource_id: String,
        /// The error message.
        error: String,
    },
}
