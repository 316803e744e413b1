//! # devconf-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement [`DeviceRepository`](devconf_app::ports::DeviceRepository)
//!   with a version column for optimistic concurrency
//! - Manage the `SQLite` connection pool lifecycle
//! - Run the embedded migrations
//! - Map between the [`Device`](devconf_domain::device::Device) aggregate and
//!   the `devices` / `opening_hours` tables
//!
//! ## Dependency rule
//! Depends on `devconf-app` (for port traits) and `devconf-domain` (for domain
//! types). The `app` and `domain` crates must never reference this adapter.

pub mod device_repo;
pub mod error;
pub mod pool;
