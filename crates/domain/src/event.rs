//! Domain events: notifications that part of a device configuration changed.
//!
//! Events are returned by the [`Device`](crate::device::Device) mutators only
//! when the new value differs from the previous one. The application layer
//! publishes them after the device has been saved.

use serde::{Deserialize, Serialize};

use crate::id::DeviceId;
use crate::location::Location;
use crate::opening_hours::OpeningHours;
use crate::ownership::Ownership;
use crate::settings::Settings;

/// A change to one part of a device configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    OwnershipUpdated {
        device_id: DeviceId,
        ownership: Ownership,
    },
    LocationUpdated {
        device_id: DeviceId,
        location: Option<Location>,
    },
    OpeningHoursUpdated {
        device_id: DeviceId,
        opening_hours: OpeningHours,
    },
    SettingsUpdated {
        device_id: DeviceId,
        settings: Settings,
    },
}

impl DomainEvent {
    /// The device the event refers to.
    #[must_use]
    pub fn device_id(&self) -> &DeviceId {
        match self {
            Self::OwnershipUpdated { device_id, .. }
            | Self::LocationUpdated { device_id, .. }
            | Self::OpeningHoursUpdated { device_id, .. }
            | Self::SettingsUpdated { device_id, .. } => device_id,
        }
    }

    /// Short, stable name of the event kind, suitable for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::OwnershipUpdated { .. } => "ownership_updated",
            Self::LocationUpdated { .. } => "location_updated",
            Self::OpeningHoursUpdated { .. } => "opening_hours_updated",
            Self::SettingsUpdated { .. } => "settings_updated",
        }
    }
}
