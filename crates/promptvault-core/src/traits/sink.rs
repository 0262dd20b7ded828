//! Event sink trait for the decision-event hook.

use crate::events::DomainEvent;
use crate::result::AppResult;

/// Receives domain events emitted by the authorization layer.
///
/// `publish` is synchronous: the decision path must not gain suspension
/// points beyond the resource fetch. Implementations that need I/O should
/// hand the event to a channel and return immediately.
pub trait EventSink: Send + Sync + std::fmt::Debug + 'static {
    /// Publish a single event.
    fn publish(&self, event: &DomainEvent) -> AppResult<()>;
}
