//! Domain events emitted by PromptVault.
//!
//! Events are handed to [`EventSink`](crate::traits::EventSink)
//! implementations registered at startup. Persisting them (audit log,
//! analytics) is the business of the sink, not of the emitter.

pub mod authz;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::PrincipalId;

pub use authz::AuthzEvent;

/// Wrapper for all domain events with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Unique event ID.
    pub id: Uuid,
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
    /// The principal who caused the event (if applicable).
    pub actor_id: Option<PrincipalId>,
    /// The event payload.
    pub payload: EventPayload,
}

/// Union of all domain event types.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event")]
pub enum EventPayload {
    /// An authorization event.
    Authz(AuthzEvent),
}

impl DomainEvent {
    /// Create a new domain event.
    pub fn new(actor_id: Option<PrincipalId>, payload: EventPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            actor_id,
            payload,
        }
    }
}
