//! Device info: identity and firmware reported by a charger when it boots.

use serde::{Deserialize, Serialize};

use crate::id::DeviceId;

/// What a device says about itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub device_id: DeviceId,
    pub vendor: String,
    pub model: String,
    pub firmware_version: Option<String>,
}
