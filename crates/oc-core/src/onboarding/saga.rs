use serde::{Deserialize, Serialize};

use crate::device::ProvisionedDevice;

/// Progress of the two-call provisioning saga run from the review step.
///
/// There is no compensation: once a device exists remotely it stays, and a
/// retry only re-runs the stage that failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProvisioningSaga {
    /// No device record yet; `next` issues a create call.
    CreatingDevice,
    /// The device record exists; `next` requests its script.
    RequestingScript { device: ProvisionedDevice },
}

impl ProvisioningSaga {
    pub fn stage_name(&self) -> &'static str {
        match self {
            ProvisioningSaga::CreatingDevice => "CreatingDevice",
            ProvisioningSaga::RequestingScript { .. } => "RequestingScript",
        }
    }

    pub fn device(&self) -> Option<&ProvisionedDevice> {
        match self {
            ProvisioningSaga::CreatingDevice => None,
            ProvisioningSaga::RequestingScript { device } => Some(device),
        }
    }
}
