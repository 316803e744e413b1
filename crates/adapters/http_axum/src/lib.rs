//! # devconf-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a JSON API over device configurations
//!   (`GET`/`PUT`/`PATCH /api/devices/{id}`)
//! - Stream published domain events as Server-Sent Events
//!   (`GET /api/events/stream`)
//! - Map HTTP requests into [`DeviceService`](devconf_app::services::device_service::DeviceService)
//!   calls and domain errors into status codes
//!
//! ## Dependency rule
//! Depends on `devconf-app` (for port traits and services) and `devconf-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;

#[cfg(test)]
mod testing;
