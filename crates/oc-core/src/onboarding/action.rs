use serde::{Deserialize, Serialize};

use crate::device::DeviceDraft;
use crate::ids::DeviceId;

/// Side effects requested by state transitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OnboardingAction {
    /// Register the draft with the backend.
    CreateDevice { draft: DeviceDraft },
    /// Ask the backend for the provisioning script of an existing device.
    RequestScript {
        device_id: DeviceId,
        mac_address: String,
    },
}
