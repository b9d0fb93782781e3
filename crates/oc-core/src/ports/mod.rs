//! Port interfaces for the application layer
//!
//! Ports define the contract between the onboarding use cases and the
//! infrastructure that talks to the OrcheNet backend or the filesystem.

pub mod errors;
pub mod onboarding_event;
pub mod provisioning;
pub mod script_export;

pub use errors::RemoteError;
pub use onboarding_event::{NoopOnboardingEventPort, OnboardingEventPort};
pub use provisioning::ProvisioningClientPort;
pub use script_export::ScriptExportPort;
