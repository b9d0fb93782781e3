use serde::{Deserialize, Serialize};

use super::id_macro::impl_id;

/// Identifier assigned by the provisioning backend when a device record is created.
///
/// The value is opaque to the workflow. The backend currently hands out integers,
/// so [`DeviceId::as_number`] exists for adapters that must echo it back as a number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(String);

impl_id!(DeviceId);

impl DeviceId {
    /// Numeric form of the id, when it is one.
    pub fn as_number(&self) -> Option<i64> {
        self.0.parse().ok()
    }
}
