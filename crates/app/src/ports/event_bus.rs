//! Event bus port: hands domain events to whoever listens.

use std::future::Future;

use devconf_domain::error::DevConfError;
use devconf_domain::event::DomainEvent;

/// Publishes domain events to interested subscribers.
pub trait EventPublisher {
    /// Publish an event to all current subscribers.
    fn publish(&self, event: DomainEvent)
    -> impl Future<Output = Result<(), DevConfError>> + Send;
}

impl<T: EventPublisher + Send + Sync> EventPublisher for std::sync::Arc<T> {
    fn publish(
        &self,
        event: DomainEvent,
    ) -> impl Future<Output = Result<(), DevConfError>> + Send {
        (**self).publish(event)
    }
}
