//! Device: the aggregate owning the configuration of one charger.
//!
//! All changes go through the mutators below. Each mutator compares the
//! candidate value with the current one and returns a [`DomainEvent`] only
//! when something actually changed. Validation happens before any field is
//! touched, so a failed call leaves the device as it was.
//!
//! Ownership follows a small state machine:
//!
//! | from            | to              | allowed |
//! |-----------------|-----------------|---------|
//! | unowned         | owned by `op`   | yes     |
//! | owned by `op`   | owned by `op`   | yes (provider may change) |
//! | owned by `op1`  | owned by `op2`  | **no**  |
//! | owned by `op`   | unowned         | yes, resets the configuration |

use serde::{Deserialize, Serialize};

use crate::error::{DevConfError, OwnershipTransitionError};
use crate::event::DomainEvent;
use crate::id::DeviceId;
use crate::location::Location;
use crate::opening_hours::OpeningHours;
use crate::ownership::Ownership;
use crate::settings::{Settings, SettingsUpdate};
use crate::violations::{Violations, Visibility};

/// Configuration of a single device.
///
/// The storage concurrency token is not part of this type; repositories
/// carry it next to the device.
#[derive(Debug, Clone, PartialEq)]
pub struct Device {
    id: DeviceId,
    ownership: Ownership,
    location: Option<Location>,
    opening_hours: OpeningHours,
    settings: Settings,
}

impl Device {
    /// A fresh, unowned device with default configuration.
    #[must_use]
    pub fn create(id: DeviceId) -> Self {
        Self {
            id,
            ownership: Ownership::unowned(),
            location: None,
            opening_hours: OpeningHours::always_open(),
            settings: Settings::default_settings(),
        }
    }

    /// Rebuild a device from persisted state. No rule is evaluated and no
    /// event is produced.
    #[must_use]
    pub fn restore(
        id: DeviceId,
        ownership: Ownership,
        location: Option<Location>,
        opening_hours: OpeningHours,
        settings: Settings,
    ) -> Self {
        Self {
            id,
            ownership,
            location,
            opening_hours,
            settings,
        }
    }

    #[must_use]
    pub fn id(&self) -> &DeviceId {
        &self.id
    }

    #[must_use]
    pub fn ownership(&self) -> &Ownership {
        &self.ownership
    }

    #[must_use]
    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    #[must_use]
    pub fn opening_hours(&self) -> &OpeningHours {
        &self.opening_hours
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Assign the device to an operator and provider. `None` releases it.
    ///
    /// Releasing the device resets its configuration first, so the returned
    /// events list the reset changes before the ownership change.
    ///
    /// # Errors
    ///
    /// Returns [`DevConfError::InvalidOwnershipTransition`] when the device
    /// is owned and `ownership` names a different operator. The device is
    /// left untouched in that case.
    pub fn assign_to(
        &mut self,
        ownership: Option<Ownership>,
    ) -> Result<Vec<DomainEvent>, DevConfError> {
        let ownership = ownership.unwrap_or_else(Ownership::unowned);
        self.ensure_operator_is_not_switched(&ownership)?;

        let mut events = Vec::new();
        if ownership.is_unowned() {
            events.extend(self.reset_configuration());
        }
        if self.ownership != ownership {
            self.ownership = ownership;
            events.push(DomainEvent::OwnershipUpdated {
                device_id: self.id.clone(),
                ownership: self.ownership.clone(),
            });
        }
        Ok(events)
    }

    /// Replace the whole configuration as if the device had just been
    /// created with `ownership` and `location`.
    ///
    /// The ownership state machine does not apply: the previous record is
    /// discarded rather than transitioned. Events are returned only for the
    /// fields whose value differs from the current one.
    #[must_use = "the returned events must be published"]
    pub fn reinitialize(
        &mut self,
        ownership: Option<Ownership>,
        location: Option<Location>,
    ) -> Vec<DomainEvent> {
        let ownership = ownership.unwrap_or_else(Ownership::unowned);
        let mut events = Vec::new();
        if self.ownership != ownership {
            self.ownership = ownership;
            events.push(DomainEvent::OwnershipUpdated {
                device_id: self.id.clone(),
                ownership: self.ownership.clone(),
            });
        }
        events.extend(self.update_location(location));
        events.extend(self.update_opening_hours(OpeningHours::always_open()));
        events.extend(self.update_settings(&SettingsUpdate::from(Settings::default_settings())));
        events
    }

    /// Drop location, reopen around the clock, and disable every setting.
    #[must_use = "the returned events must be published"]
    pub fn reset_configuration(&mut self) -> Vec<DomainEvent> {
        [
            self.update_location(None),
            self.update_opening_hours(OpeningHours::always_open()),
            self.update_settings(&SettingsUpdate::from(Settings::default_settings())),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Replace the location wholesale.
    #[must_use = "the returned event must be published"]
    pub fn update_location(&mut self, location: Option<Location>) -> Option<DomainEvent> {
        if self.location == location {
            return None;
        }
        self.location = location;
        Some(DomainEvent::LocationUpdated {
            device_id: self.id.clone(),
            location: self.location.clone(),
        })
    }

    /// Replace the weekly schedule wholesale.
    #[must_use = "the returned event must be published"]
    pub fn update_opening_hours(&mut self, opening_hours: OpeningHours) -> Option<DomainEvent> {
        if self.opening_hours == opening_hours {
            return None;
        }
        self.opening_hours = opening_hours;
        Some(DomainEvent::OpeningHoursUpdated {
            device_id: self.id.clone(),
            opening_hours: self.opening_hours,
        })
    }

    /// Merge a partial settings change into the current settings.
    #[must_use = "the returned event must be published"]
    pub fn update_settings(&mut self, update: &SettingsUpdate) -> Option<DomainEvent> {
        let merged = self.settings.merge(update);
        if self.settings == merged {
            return None;
        }
        self.settings = merged;
        Some(DomainEvent::SettingsUpdated {
            device_id: self.id.clone(),
            settings: self.settings,
        })
    }

    /// Read-only view of the current configuration with freshly derived
    /// violations and visibility.
    #[must_use]
    pub fn snapshot(&self) -> DeviceSnapshot {
        let violations =
            Violations::check(&self.ownership, self.location.as_ref(), &self.settings);
        let visibility = Visibility::derive(&violations, &self.settings);
        DeviceSnapshot {
            device_id: self.id.clone(),
            ownership: self.ownership.clone(),
            location: self.location.clone(),
            opening_hours: self.opening_hours,
            settings: self.settings,
            violations,
            visibility,
        }
    }

    fn ensure_operator_is_not_switched(
        &self,
        next: &Ownership,
    ) -> Result<(), OwnershipTransitionError> {
        if next.is_unowned()
            || self.ownership.is_unowned()
            || self.ownership.operator == next.operator
        {
            return Ok(());
        }
        Err(OwnershipTransitionError {
            device_id: self.id.clone(),
            current: self.ownership.operator.clone(),
            requested: next.operator.clone(),
        })
    }
}

/// Point-in-time configuration view returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceSnapshot {
    pub device_id: DeviceId,
    pub ownership: Ownership,
    pub location: Option<Location>,
    pub opening_hours: OpeningHours,
    pub settings: Settings,
    pub violations: Violations,
    pub visibility: Visibility,
}
