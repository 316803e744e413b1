//! Settings: capability flags of a device, and partial updates to them.

use serde::{Deserialize, Serialize};

/// Fully resolved capability flags stored on a device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct Settings {
    pub auto_start: bool,
    pub remote_control: bool,
    pub billing: bool,
    pub reimbursement: bool,
    pub show_on_map: bool,
    pub public_access: bool,
}

impl Settings {
    /// Every capability disabled.
    #[must_use]
    pub fn default_settings() -> Self {
        Self::default()
    }

    /// Apply the flags set in `update`, keeping the current value of every
    /// unset flag.
    #[must_use]
    pub fn merge(&self, update: &SettingsUpdate) -> Self {
        Self {
            auto_start: update.auto_start.unwrap_or(self.auto_start),
            remote_control: update.remote_control.unwrap_or(self.remote_control),
            billing: update.billing.unwrap_or(self.billing),
            reimbursement: update.reimbursement.unwrap_or(self.reimbursement),
            show_on_map: update.show_on_map.unwrap_or(self.show_on_map),
            public_access: update.public_access.unwrap_or(self.public_access),
        }
    }
}

/// Partial settings change: `None` leaves the flag untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsUpdate {
    pub auto_start: Option<bool>,
    pub remote_control: Option<bool>,
    pub billing: Option<bool>,
    pub reimbursement: Option<bool>,
    pub show_on_map: Option<bool>,
    pub public_access: Option<bool>,
}

impl SettingsUpdate {
    #[must_use]
    pub fn auto_start(mut self, value: bool) -> Self {
        self.auto_start = Some(value);
        self
    }

    #[must_use]
    pub fn remote_control(mut self, value: bool) -> Self {
        self.remote_control = Some(value);
        self
    }

    #[must_use]
    pub fn billing(mut self, value: bool) -> Self {
        self.billing = Some(value);
        self
    }

    #[must_use]
    pub fn reimbursement(mut self, value: bool) -> Self {
        self.reimbursement = Some(value);
        self
    }

    #[must_use]
    pub fn show_on_map(mut self, value: bool) -> Self {
        self.show_on_map = Some(value);
        self
    }

    #[must_use]
    pub fn public_access(mut self, value: bool) -> Self {
        self.public_access = Some(value);
        self
    }

    /// Whether no flag is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl From<Settings> for SettingsUpdate {
    fn from(settings: Settings) -> Self {
        Self {
            auto_start: Some(settings.auto_start),
            remote_control: Some(settings.remote_control),
            billing: Some(settings.billing),
            reimbursement: Some(settings.reimbursement),
            show_on_map: Some(settings.show_on_map),
            public_access: Some(settings.public_access),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_disable_every_flag_by_default() {
        let settings = Settings::default_settings();
        assert!(!settings.auto_start);
        assert!(!settings.remote_control);
        assert!(!settings.billing);
        assert!(!settings.reimbursement);
        assert!(!settings.show_on_map);
        assert!(!settings.public_access);
    }

    #[test]
    fn should_keep_current_values_when_update_is_empty() {
        let current = Settings {
            billing: true,
            ..Settings::default()
        };
        assert_eq!(current.merge(&SettingsUpdate::default()), current);
    }

    #[test]
    fn should_overwrite_only_set_flags() {
        let current = Settings {
            billing: true,
            auto_start: true,
            ..Settings::default()
        };
        let merged = current.merge(&SettingsUpdate::default().billing(false).show_on_map(true));

        assert!(merged.auto_start);
        assert!(!merged.billing);
        assert!(merged.show_on_map);
        assert!(!merged.public_access);
    }

    #[test]
    fn should_distinguish_explicit_false_from_unset() {
        let current = Settings {
            public_access: true,
            ..Settings::default()
        };
        let unset = current.merge(&SettingsUpdate::default());
        let explicit = current.merge(&SettingsUpdate::default().public_access(false));

        assert!(unset.public_access);
        assert!(!explicit.public_access);
    }

    #[test]
    fn should_replace_everything_when_merging_full_update() {
        let current = Settings {
            auto_start: true,
            reimbursement: true,
            ..Settings::default()
        };
        let merged = current.merge(&SettingsUpdate::from(Settings::default_settings()));
        assert_eq!(merged, Settings::default_settings());
    }

    #[test]
    fn should_deserialize_missing_fields_as_unset() {
        let update: SettingsUpdate = serde_json::from_str(r#"{"show_on_map":true}"#).unwrap();
        assert_eq!(update, SettingsUpdate::default().show_on_map(true));
        assert!(!update.is_empty());
    }
}
