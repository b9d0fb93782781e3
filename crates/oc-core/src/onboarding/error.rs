use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ports::RemoteError;

use super::WizardStep;

/// Why a step cannot be advanced.
///
/// Categories, not messages: front-ends map them to text. `Display` carries
/// the default English wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum ValidationError {
    #[error("Please select a vendor")]
    MissingVendor,
    #[error("This vendor is not in the catalog")]
    UnknownVendor,
    #[error("This vendor is not supported yet")]
    VendorDisabled,
    #[error("Please select a device type")]
    MissingModel,
    #[error("This device type is not offered for the selected vendor")]
    UnknownModel,
    #[error("This device type is not supported yet")]
    ModelDisabled,
    #[error("Please enter a device name")]
    MissingName,
    #[error("Please enter the device MAC address")]
    MissingMac,
    #[error("Invalid MAC address format. Use format: XX:XX:XX:XX:XX:XX")]
    InvalidMac,
}

/// Error shown by the wizard for the current step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardError {
    Validation(ValidationError),
    Remote(RemoteError),
}

impl fmt::Display for WizardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WizardError::Validation(err) => write!(f, "{err}"),
            WizardError::Remote(err) => write!(f, "{err}"),
        }
    }
}

impl From<ValidationError> for WizardError {
    fn from(err: ValidationError) -> Self {
        WizardError::Validation(err)
    }
}

impl From<RemoteError> for WizardError {
    fn from(err: RemoteError) -> Self {
        WizardError::Remote(err)
    }
}

/// Rejection of an event by the state machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{event} is not allowed in step {step}")]
    InvalidTransition {
        step: WizardStep,
        event: &'static str,
    },
}
