//! # devconf-adapter-ocpp16
//!
//! Message types of the OCPP 1.6 JSON protocol that carry device identity,
//! and their translation into domain values.
//!
//! ## Dependency rule
//! Depends on `devconf-domain` only. Framing, websocket transport and the
//! request/response exchange belong to the charger gateway, not to this crate.

pub mod boot_notification;
