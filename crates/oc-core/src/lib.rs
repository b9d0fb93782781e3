//! # oc-core
//!
//! Core domain models and onboarding logic for OrcheNet.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

// Public module exports
pub mod catalog;
pub mod config;
pub mod device;
pub mod ids;
pub mod mac;
pub mod onboarding;
pub mod ports;

// Re-export commonly used types at the crate root
pub use catalog::{DeviceCatalog, ModelEntry, VendorEntry};
pub use config::AppConfig;
pub use device::{
    CheckInPolicy, DeviceDraft, DeviceRegistration, DraftEdit, ProvisionedDevice, ScriptArtifact,
    WireguardInfo,
};
pub use ids::{DeviceId, ModelId, VendorId, WorkflowId};
pub use mac::{MacAddress, MacAddressError, TunnelIdentity};
pub use onboarding::{
    OnboardingOutcome, OnboardingState, ValidationError, WizardError, WizardSnapshot, WizardStep,
};
pub use ports::RemoteError;
