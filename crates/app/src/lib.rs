//! # devconf-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `DeviceRepository`: load and save devices with optimistic concurrency
//!   - `EventPublisher`: hand domain events to the outside world
//! - Define the **driving/inbound** use-cases:
//!   - `DeviceService`: get, create, and update device configurations
//! - Provide **in-process infrastructure** (event bus) that doesn't need IO
//! - Orchestrate the Device aggregate without knowing *how* persistence or IO works
//!
//! ## Dependency rule
//! Depends on `devconf-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod event_bus;
pub mod ports;
pub mod services;
