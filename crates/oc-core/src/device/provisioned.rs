use serde::{Deserialize, Serialize};

use crate::ids::DeviceId;

use super::DeviceDraft;

/// A device record that exists on the backend.
///
/// Created once per successful create call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionedDevice {
    id: DeviceId,
    draft: DeviceDraft,
}

impl ProvisionedDevice {
    pub fn new(id: DeviceId, draft: DeviceDraft) -> Self {
        Self { id, draft }
    }

    pub fn id(&self) -> &DeviceId {
        &self.id
    }

    pub fn draft(&self) -> &DeviceDraft {
        &self.draft
    }
}
