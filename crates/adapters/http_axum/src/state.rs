//! Shared application state for axum handlers.

use std::sync::Arc;

use devconf_app::event_bus::InProcessEventBus;
use devconf_app::ports::{DeviceRepository, EventPublisher};
use devconf_app::services::device_service::DeviceService;

/// Application state shared across all axum handlers.
///
/// Generic over the repository and event publisher to avoid dynamic dispatch.
/// `Clone` is implemented manually so the underlying types themselves do not
/// need to be `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<R, P> {
    /// Device configuration use-cases.
    pub device_service: Arc<DeviceService<R, P>>,
    /// Event bus the SSE stream subscribes to.
    pub event_bus: Arc<InProcessEventBus>,
}

impl<R, P> Clone for AppState<R, P> {
    fn clone(&self) -> Self {
        Self {
            device_service: Arc::clone(&self.device_service),
            event_bus: Arc::clone(&self.event_bus),
        }
    }
}

impl<R, P> AppState<R, P>
where
    R: DeviceRepository + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    /// Create a new application state.
    ///
    /// `event_bus` should be the bus `device_service` publishes to, otherwise
    /// the event stream stays silent.
    pub fn new(device_service: DeviceService<R, P>, event_bus: Arc<InProcessEventBus>) -> Self {
        Self {
            device_service: Arc::new(device_service),
            event_bus,
        }
    }
}
