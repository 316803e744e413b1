//! Device service: use-cases for reading and changing device configurations.
//!
//! Every use-case follows the same cycle: load the device, run aggregate
//! operations while collecting the events they return, save against the
//! loaded version, then publish the collected events. Events are moved into
//! the publisher only after the save succeeded, so a rejected or conflicting
//! change publishes nothing.

use devconf_domain::device::{Device, DeviceSnapshot};
use devconf_domain::error::DevConfError;
use devconf_domain::event::DomainEvent;
use devconf_domain::id::DeviceId;
use devconf_domain::location::Location;
use devconf_domain::opening_hours::OpeningHours;
use devconf_domain::ownership::Ownership;
use devconf_domain::settings::SettingsUpdate;

use crate::ports::{DeviceRepository, EventPublisher, StoredDevice, Version};

/// Requested changes to an existing device. Absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateDevice {
    pub ownership: Option<Ownership>,
    pub location: Option<Location>,
    pub opening_hours: Option<OpeningHours>,
    pub settings: Option<SettingsUpdate>,
}

impl UpdateDevice {
    #[must_use]
    pub fn ownership(mut self, ownership: Ownership) -> Self {
        self.ownership = Some(ownership);
        self
    }

    #[must_use]
    pub fn location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    #[must_use]
    pub fn opening_hours(mut self, opening_hours: OpeningHours) -> Self {
        self.opening_hours = Some(opening_hours);
        self
    }

    #[must_use]
    pub fn settings(mut self, settings: SettingsUpdate) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Apply the present fields in order: ownership, location, opening
    /// hours, settings.
    ///
    /// # Errors
    ///
    /// Returns [`DevConfError::Validation`] for opening hours with a
    /// malformed interval, or [`DevConfError::InvalidOwnershipTransition`]
    /// when the ownership change is not allowed. Nothing is applied in
    /// either case.
    pub fn apply_to(self, device: &mut Device) -> Result<Vec<DomainEvent>, DevConfError> {
        if let Some(opening_hours) = &self.opening_hours {
            opening_hours.validate()?;
        }
        let mut events = Vec::new();
        if let Some(ownership) = self.ownership {
            events.extend(device.assign_to(Some(ownership))?);
        }
        if let Some(location) = self.location {
            events.extend(device.update_location(Some(location)));
        }
        if let Some(opening_hours) = self.opening_hours {
            events.extend(device.update_opening_hours(opening_hours));
        }
        if let Some(settings) = self.settings {
            events.extend(device.update_settings(&settings));
        }
        Ok(events)
    }
}

/// Application service for device configurations.
pub struct DeviceService<R, P> {
    repo: R,
    publisher: P,
}

impl<R: DeviceRepository, P: EventPublisher> DeviceService<R, P> {
    /// Create a new service backed by the given repository and publisher.
    pub fn new(repo: R, publisher: P) -> Self {
        Self { repo, publisher }
    }

    /// Current configuration of a device, or `None` if it is unknown.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip_all, fields(device_id = %id))]
    pub async fn get(&self, id: &DeviceId) -> Result<Option<DeviceSnapshot>, DevConfError> {
        let stored = self.repo.find_by_id(id).await?;
        Ok(stored.map(|stored| stored.device.snapshot()))
    }

    /// Create a device from scratch, replacing any record stored under `id`.
    ///
    /// Opening hours and settings always start from their defaults, even
    /// when a device with the same id existed before. Events describe the
    /// difference from the replaced record, if any.
    ///
    /// # Errors
    ///
    /// Returns [`DevConfError::Conflict`] when the record changed while the
    /// device was being created, or a storage error from the repository.
    #[tracing::instrument(skip_all, fields(device_id = %id))]
    pub async fn create_new_device(
        &self,
        id: DeviceId,
        ownership: Option<Ownership>,
        location: Option<Location>,
    ) -> Result<DeviceSnapshot, DevConfError> {
        let (mut device, expected) = match self.repo.find_by_id(&id).await? {
            Some(StoredDevice { device, version }) => {
                tracing::info!("replacing existing device");
                (device, Some(version))
            }
            None => (Device::create(id), None),
        };

        let events = device.reinitialize(ownership, location);
        self.save_and_publish(device, expected, events).await
    }

    /// Apply `update` to an existing device.
    ///
    /// Returns `None`, without touching storage, when the device is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`DevConfError::InvalidOwnershipTransition`] when the update
    /// hands the device to another operator, [`DevConfError::Conflict`] when
    /// the device was modified concurrently, or a storage error.
    #[tracing::instrument(skip_all, fields(device_id = %id))]
    pub async fn update(
        &self,
        id: &DeviceId,
        update: UpdateDevice,
    ) -> Result<Option<DeviceSnapshot>, DevConfError> {
        let Some(StoredDevice {
            mut device,
            version,
        }) = self.repo.find_by_id(id).await?
        else {
            tracing::debug!("device not found");
            return Ok(None);
        };

        let events = update.apply_to(&mut device)?;
        self.save_and_publish(device, Some(version), events)
            .await
            .map(Some)
    }

    async fn save_and_publish(
        &self,
        device: Device,
        expected: Option<Version>,
        events: Vec<DomainEvent>,
    ) -> Result<DeviceSnapshot, DevConfError> {
        let stored = self.repo.save(device, expected).await?;
        tracing::debug!(
            version = stored.version.get(),
            events = events.len(),
            "device saved"
        );

        for event in events {
            let kind = event.kind();
            if let Err(err) = self.publisher.publish(event).await {
                tracing::warn!(error = %err, kind, "failed to publish event");
            }
        }

        Ok(stored.device.snapshot())
    }
}
