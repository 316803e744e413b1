//! Derived validity and visibility of a device configuration.
//!
//! Both are recomputed from the current ownership, location, and settings
//! every time a snapshot is taken; neither is ever stored.

use serde::{Deserialize, Serialize};

use crate::location::Location;
use crate::ownership::Ownership;
use crate::settings::Settings;

/// Conditions making a configuration incomplete or self-contradictory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct Violations {
    pub operator_not_assigned: bool,
    pub provider_not_assigned: bool,
    pub location_missing: bool,
    pub show_on_map_but_missing_location: bool,
    pub show_on_map_but_no_public_access: bool,
}

impl Violations {
    /// Evaluate every rule against the given configuration.
    #[must_use]
    pub fn check(ownership: &Ownership, location: Option<&Location>, settings: &Settings) -> Self {
        Self {
            operator_not_assigned: ownership.operator.is_none(),
            provider_not_assigned: ownership.provider.is_none(),
            location_missing: location.is_none(),
            show_on_map_but_missing_location: settings.show_on_map && location.is_none(),
            show_on_map_but_no_public_access: settings.show_on_map && !settings.public_access,
        }
    }

    /// `true` when no violation is present.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        *self == Self::default()
    }
}

/// Where a device shows up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visibility {
    pub on_map: bool,
    pub public: bool,
}

impl Visibility {
    #[must_use]
    pub fn based_on(publicly_visible: bool, show_on_map: bool) -> Self {
        Self {
            on_map: show_on_map,
            public: publicly_visible,
        }
    }

    /// A device is public only when its configuration is valid and public
    /// access is enabled.
    #[must_use]
    pub fn derive(violations: &Violations, settings: &Settings) -> Self {
        Self::based_on(
            violations.is_valid() && settings.public_access,
            settings.show_on_map,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location() -> Location {
        Location::builder()
            .street("Rakietowa")
            .house_number("1A")
            .city("Wrocław")
            .postal_code("54-621")
            .state("Dolnośląskie")
            .country("POL")
            .coordinates(16.93, 51.09)
            .build()
            .unwrap()
    }

    #[test]
    fn should_flag_missing_parties_and_location_when_unconfigured() {
        let violations = Violations::check(&Ownership::unowned(), None, &Settings::default());

        assert!(violations.operator_not_assigned);
        assert!(violations.provider_not_assigned);
        assert!(violations.location_missing);
        assert!(!violations.show_on_map_but_missing_location);
        assert!(!violations.show_on_map_but_no_public_access);
        assert!(!violations.is_valid());
    }

    #[test]
    fn should_be_valid_when_owned_and_located() {
        let loc = location();
        let violations =
            Violations::check(&Ownership::new("OpA", "ProvA"), Some(&loc), &Settings::default());
        assert!(violations.is_valid());
    }

    #[test]
    fn should_flag_show_on_map_without_public_access() {
        let loc = location();
        let settings = Settings {
            show_on_map: true,
            public_access: false,
            ..Settings::default()
        };
        let violations = Violations::check(&Ownership::new("OpA", "ProvA"), Some(&loc), &settings);

        assert!(violations.show_on_map_but_no_public_access);
        assert!(!Visibility::derive(&violations, &settings).public);
    }

    #[test]
    fn should_flag_show_on_map_without_location() {
        let settings = Settings {
            show_on_map: true,
            public_access: true,
            ..Settings::default()
        };
        let violations = Violations::check(&Ownership::new("OpA", "ProvA"), None, &settings);

        assert!(violations.show_on_map_but_missing_location);
        assert!(violations.location_missing);
        assert!(!violations.show_on_map_but_no_public_access);
    }

    #[test]
    fn should_be_public_when_valid_and_public_access_enabled() {
        let loc = location();
        let settings = Settings {
            show_on_map: true,
            public_access: true,
            ..Settings::default()
        };
        let violations = Violations::check(&Ownership::new("OpA", "ProvA"), Some(&loc), &settings);
        let visibility = Visibility::derive(&violations, &settings);

        assert_eq!(visibility, Visibility { on_map: true, public: true });
    }

    #[test]
    fn should_not_be_public_when_invalid_even_with_public_access() {
        let settings = Settings {
            public_access: true,
            ..Settings::default()
        };
        let violations = Violations::check(&Ownership::unowned(), None, &settings);
        assert!(!Visibility::derive(&violations, &settings).public);
    }

    #[test]
    fn should_package_flags_when_based_on() {
        assert_eq!(
            Visibility::based_on(true, false),
            Visibility {
                on_map: false,
                public: true
            }
        );
    }
}
