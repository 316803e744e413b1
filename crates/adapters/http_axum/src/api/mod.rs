//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod devices;
pub mod events;

use axum::Router;
use axum::routing::get;

use devconf_app::ports::{DeviceRepository, EventPublisher};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<R, P>() -> Router<AppState<R, P>>
where
    R: DeviceRepository + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/devices/{id}",
            get(devices::get::<R, P>)
                .put(devices::create::<R, P>)
                .patch(devices::update::<R, P>),
        )
        .route("/events/stream", get(events::stream::<R, P>))
}
