//! Storage port: persistence of devices with optimistic concurrency.
//!
//! The [`Device`] aggregate knows nothing about concurrent writers. Every
//! stored device travels with a [`Version`]; saving against a version that is
//! no longer current must fail with [`DevConfError::Conflict`].

use std::future::Future;

use devconf_domain::device::Device;
use devconf_domain::error::DevConfError;
use devconf_domain::id::DeviceId;

/// Opaque concurrency token assigned by the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(u64);

impl Version {
    /// Version of a record saved for the first time.
    #[must_use]
    pub fn initial() -> Self {
        Self(1)
    }

    /// Version following this one.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Wrap a raw value read from storage.
    #[must_use]
    pub fn from_raw(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// A device together with the version it was loaded or saved at.
#[derive(Debug, Clone)]
pub struct StoredDevice {
    pub device: Device,
    pub version: Version,
}

/// Repository for loading and saving [`Device`]s.
pub trait DeviceRepository {
    /// Get a device by its identifier.
    fn find_by_id(
        &self,
        id: &DeviceId,
    ) -> impl Future<Output = Result<Option<StoredDevice>, DevConfError>> + Send;

    /// Save a device.
    ///
    /// `expected` is the version the caller loaded, or `None` when no record
    /// is expected to exist yet. The returned version replaces it.
    ///
    /// # Errors
    ///
    /// Implementations return [`DevConfError::Conflict`] when the stored
    /// version does not match `expected`.
    fn save(
        &self,
        device: Device,
        expected: Option<Version>,
    ) -> impl Future<Output = Result<StoredDevice, DevConfError>> + Send;
}

impl<T: DeviceRepository + Send + Sync> DeviceRepository for std::sync::Arc<T> {
    fn find_by_id(
        &self,
        id: &DeviceId,
    ) -> impl Future<Output = Result<Option<StoredDevice>, DevConfError>> + Send {
        (**self).find_by_id(id)
    }

    fn save(
        &self,
        device: Device,
        expected: Option<Version>,
    ) -> impl Future<Output = Result<StoredDevice, DevConfError>> + Send {
        (**self).save(device, expected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_increment_version() {
        let version = Version::initial();
        assert_eq!(version.next().get(), version.get() + 1);
        assert!(version.next() > version);
    }

    #[test]
    fn should_roundtrip_raw_value() {
        assert_eq!(Version::from_raw(42).get(), 42);
    }
}
