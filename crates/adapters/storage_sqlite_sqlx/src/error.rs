//! Storage-specific error type wrapping sqlx errors.

use devconf_domain::error::DevConfError;

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// Failed to run migrations.
    #[error("migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A stored row holds a value the domain rejects.
    #[error("corrupted row for device {device_id}: {reason}")]
    Corrupted { device_id: String, reason: String },
}

impl From<StorageError> for DevConfError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
