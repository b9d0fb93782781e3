//! Onboarding use cases.
//!
//! This module exposes the onboarding workflow and the script export use case.

mod context;
pub mod export;
pub mod workflow;

pub use export::ExportProvisioningScript;
pub use workflow::{OnboardingWorkflow, WorkflowError};
