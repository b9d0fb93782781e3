//! OrcheNet Application Orchestration Layer
//!
//! This crate contains the onboarding use cases and the workflow that drives
//! the onboarding state machine against the provisioning backend.

pub mod usecases;

pub use usecases::{ExportProvisioningScript, OnboardingWorkflow, WorkflowError};
