//! Location: postal address and GPS coordinates of a device.
//!
//! A location is either complete or absent. There is no representation for a
//! half-filled address: the device stores `Option<Location>` and the builder
//! refuses to produce a location with a missing field.

use serde::{Deserialize, Serialize};

use crate::error::{DevConfError, ValidationError};

/// Geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub longitude: f64,
    pub latitude: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

/// Complete address of a device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub street: String,
    pub house_number: String,
    pub city: String,
    pub postal_code: String,
    pub state: String,
    pub country: String,
    pub coordinates: Coordinates,
}

impl Location {
    /// Create a builder for constructing a [`Location`].
    #[must_use]
    pub fn builder() -> LocationBuilder {
        LocationBuilder::default()
    }
}

/// Step-by-step builder for [`Location`].
#[derive(Debug, Default)]
pub struct LocationBuilder {
    street: Option<String>,
    house_number: Option<String>,
    city: Option<String>,
    postal_code: Option<String>,
    state: Option<String>,
    country: Option<String>,
    coordinates: Option<Coordinates>,
}

impl LocationBuilder {
    #[must_use]
    pub fn street(mut self, street: impl Into<String>) -> Self {
        self.street = Some(street.into());
        self
    }

    #[must_use]
    pub fn house_number(mut self, house_number: impl Into<String>) -> Self {
        self.house_number = Some(house_number.into());
        self
    }

    #[must_use]
    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    #[must_use]
    pub fn postal_code(mut self, postal_code: impl Into<String>) -> Self {
        self.postal_code = Some(postal_code.into());
        self
    }

    #[must_use]
    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    #[must_use]
    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    #[must_use]
    pub fn coordinates(mut self, longitude: f64, latitude: f64) -> Self {
        self.coordinates = Some(Coordinates::new(longitude, latitude));
        self
    }

    /// Consume the builder and return a complete [`Location`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::IncompleteLocation`] naming the first
    /// missing field.
    pub fn build(self) -> Result<Location, DevConfError> {
        Ok(Location {
            street: required(self.street, "street")?,
            house_number: required(self.house_number, "house_number")?,
            city: required(self.city, "city")?,
            postal_code: required(self.postal_code, "postal_code")?,
            state: required(self.state, "state")?,
            country: required(self.country, "country")?,
            coordinates: required(self.coordinates, "coordinates")?,
        })
    }
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, ValidationError> {
    value.ok_or(ValidationError::IncompleteLocation(field))
}
