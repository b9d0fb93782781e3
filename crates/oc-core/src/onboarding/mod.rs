//! Onboarding domain module.
//!
//! This module defines the device onboarding wizard: its steps, the pure
//! state machine driving them, and the validation rules guarding each step.

pub mod action;
pub mod error;
pub mod event;
pub mod saga;
pub mod snapshot;
pub mod state;
pub mod state_machine;
pub mod step;
pub mod validator;

pub use action::OnboardingAction;
pub use error::{TransitionError, ValidationError, WizardError};
pub use event::OnboardingEvent;
pub use saga::ProvisioningSaga;
pub use snapshot::WizardSnapshot;
pub use state::{OnboardingOutcome, OnboardingState};
pub use state_machine::{OnboardingStateMachine, Transition};
pub use step::{WizardStep, TOTAL_STEPS};
pub use validator::StepValidator;
