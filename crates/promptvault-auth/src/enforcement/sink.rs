//! In-process event sink over a tokio broadcast channel.

use tokio::sync::broadcast;

use promptvault_core::events::DomainEvent;
use promptvault_core::result::AppResult;
use promptvault_core::traits::EventSink;

/// Fans decision events out to any number of in-process subscribers.
///
/// Publishing never blocks. Slow subscribers lag and lose the oldest
/// events; having no subscribers at all is not an error.
#[derive(Debug, Clone)]
pub struct BroadcastEventSink {
    sender: broadcast::Sender<DomainEvent>,
}

impl BroadcastEventSink {
    /// Create a sink buffering up to `capacity` events per subscriber.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Subscribe to subsequently published events.
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.sender.subscribe()
    }
}

impl EventSink for BroadcastEventSink {
    fn publish(&self, event: &DomainEvent) -> AppResult<()> {
        let _ = self.sender.send(event.clone());
        Ok(())
    }
}
