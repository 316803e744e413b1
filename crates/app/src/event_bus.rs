//! In-process event bus backed by a tokio broadcast channel.

use std::future::Future;

use tokio::sync::broadcast;

use devconf_domain::error::DevConfError;
use devconf_domain::event::DomainEvent;

use crate::ports::EventPublisher;

/// Fan-out of device configuration events to live subscribers, such as
/// the SSE stream.
///
/// Events are delivered only to receivers that exist at publish time. With
/// nobody listening the event is dropped and publishing still succeeds.
pub struct InProcessEventBus {
    sender: broadcast::Sender<DomainEvent>,
}

impl InProcessEventBus {
    /// Create a new event bus with the given channel capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to events on this bus.
    ///
    /// Returns a receiver that will get all events published *after*
    /// the subscription is created.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.sender.subscribe()
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl EventPublisher for InProcessEventBus {
    fn publish(
        &self,
        event: DomainEvent,
    ) -> impl Future<Output = Result<(), DevConfError>> + Send {
        let kind = event.kind();
        let device_id = event.device_id().clone();
        match self.sender.send(event) {
            Ok(receivers) => {
                tracing::debug!(kind, %device_id, receivers, "device event delivered");
            }
            Err(_) => tracing::trace!(kind, %device_id, "no subscribers, device event dropped"),
        }
        async { Ok(()) }
    }
}
