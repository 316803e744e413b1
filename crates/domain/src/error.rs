//! Error types shared across the workspace.
//!
//! Every layer reports failures through [`DevConfError`]. Each variant wraps a
//! typed source error so callers can match on the precise failure; adapters
//! convert their own errors into [`DevConfError::Storage`].

use crate::id::DeviceId;

/// Top-level error for the devconf workspace.
#[derive(Debug, thiserror::Error)]
pub enum DevConfError {
    /// An input value is malformed.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A required argument was explicitly missing.
    #[error("null argument")]
    NullArgument(#[from] NullArgumentError),

    /// The device is owned by another operator and must be released first.
    #[error("invalid ownership transition")]
    InvalidOwnershipTransition(#[from] OwnershipTransitionError),

    /// The stored record changed since it was loaded.
    #[error("concurrent modification")]
    Conflict(#[from] ConflictError),

    /// Persistence failure reported by a storage adapter.
    #[error("storage error")]
    Storage(Box<dyn std::error::Error + Send + Sync>),
}

/// Malformed input values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("device id must not be empty")]
    EmptyDeviceId,

    #[error("location is incomplete, missing field `{0}`")]
    IncompleteLocation(&'static str),

    #[error("opening interval {open}..{close} must satisfy open < close <= 24")]
    InvalidInterval { open: u8, close: u8 },
}

/// A required argument was given as `null`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("argument `{field}` must not be null")]
pub struct NullArgumentError {
    pub field: &'static str,
}

/// Attempt to hand a device directly from one operator to another.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "device {device_id} is owned by operator {current:?} and cannot be assigned to {requested:?}"
)]
pub struct OwnershipTransitionError {
    pub device_id: DeviceId,
    pub current: Option<String>,
    pub requested: Option<String>,
}

/// Optimistic-concurrency failure on save.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("device {device_id} was modified concurrently")]
pub struct ConflictError {
    pub device_id: DeviceId,
}
