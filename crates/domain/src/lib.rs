//! # devconf-domain
//!
//! Pure domain model for managing the configuration of chargers.
//!
//! ## Responsibilities
//! - Foundational types: the typed device identifier and error conventions
//! - Define the **value objects** of a configuration: [`ownership`],
//!   [`location`], [`opening_hours`], [`settings`]
//! - Derive **violations** and **visibility** from a configuration
//! - Define the **Device aggregate**, the only place where ownership
//!   transitions and configuration resets are decided
//! - Define the **domain events** returned by every effective change
//! - Define **device info** as reported by a booting charger
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod device;
pub mod device_info;
pub mod event;
pub mod location;
pub mod opening_hours;
pub mod ownership;
pub mod settings;
pub mod violations;
