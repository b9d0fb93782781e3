use serde::{Deserialize, Serialize};

use crate::ids::{ModelId, VendorId};

use super::DeviceDraft;

/// How a provisioned device reports back to OrcheNet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckInPolicy {
    pub method: String,
    pub interval_secs: u32,
}

impl Default for CheckInPolicy {
    fn default() -> Self {
        Self {
            method: "http".to_string(),
            interval_secs: 300,
        }
    }
}

/// Free-form data stored alongside the device record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceData {
    pub location: Option<String>,
    pub description: Option<String>,
}

/// Payload of a create-device request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRegistration {
    pub name: String,
    pub vendor: Option<VendorId>,
    pub model: Option<ModelId>,
    pub mac_address: String,
    pub check_in: CheckInPolicy,
    pub device_data: DeviceData,
}

impl DeviceRegistration {
    pub fn from_draft(draft: &DeviceDraft, check_in: CheckInPolicy) -> Self {
        Self {
            name: draft.name.trim().to_string(),
            vendor: draft.vendor.clone(),
            model: draft.model.clone(),
            mac_address: draft.mac_address.clone(),
            check_in,
            device_data: DeviceData {
                location: draft.location.clone(),
                description: draft.description.clone(),
            },
        }
    }
}
