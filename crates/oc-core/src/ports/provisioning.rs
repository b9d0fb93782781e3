//! Provisioning backend port
//!
//! The two calls of the provisioning saga. Implementations must not retry on
//! their own: the wizard decides when a call is repeated.

use async_trait::async_trait;

use crate::device::{DeviceRegistration, ScriptArtifact};
use crate::ids::DeviceId;

use super::RemoteError;

#[async_trait]
pub trait ProvisioningClientPort: Send + Sync {
    /// Register a new device record and return the id the backend assigned.
    async fn create_device(&self, registration: &DeviceRegistration)
        -> Result<DeviceId, RemoteError>;

    /// Request the provisioning script for an existing device.
    async fn request_script(
        &self,
        device_id: &DeviceId,
        mac_address: &str,
    ) -> Result<ScriptArtifact, RemoteError>;
}
