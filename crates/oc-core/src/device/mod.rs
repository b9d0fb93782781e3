//! Device domain models.

pub mod artifact;
pub mod draft;
pub mod provisioned;
pub mod registration;

pub use artifact::{ScriptArtifact, WireguardInfo};
pub use draft::{DeviceDraft, DraftEdit};
pub use provisioned::ProvisionedDevice;
pub use registration::{CheckInPolicy, DeviceData, DeviceRegistration};
