//! `BootNotification.req`: sent by a charger after start-up.

use serde::{Deserialize, Serialize};

use devconf_domain::device_info::DeviceInfo;
use devconf_domain::id::DeviceId;

/// Payload of an OCPP 1.6 `BootNotification` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BootNotificationRequest {
    pub charge_point_vendor: String,
    pub charge_point_model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charge_point_serial_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charge_box_serial_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firmware_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iccid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imsi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meter_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meter_serial_number: Option<String>,
}

impl BootNotificationRequest {
    /// Identity of the charger that sent this notification.
    ///
    /// The protocol does not carry the device id in the payload; the gateway
    /// knows it from the connection.
    #[must_use]
    pub fn to_device_info(&self, device_id: DeviceId) -> DeviceInfo {
        DeviceInfo {
            device_id,
            vendor: self.charge_point_vendor.clone(),
            model: self.charge_point_model.clone(),
            firmware_version: self.firmware_version.clone(),
        }
    }
}
