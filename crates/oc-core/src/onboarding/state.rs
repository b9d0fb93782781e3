use serde::{Deserialize, Serialize};

use crate::device::{DeviceDraft, ProvisionedDevice, ScriptArtifact};
use crate::mac::TunnelIdentity;

use super::{ProvisioningSaga, WizardStep};

/// Onboarding wizard state.
///
/// Each variant carries only what is meaningful in that step, so a device
/// without a draft or an artifact without a device cannot be represented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OnboardingState {
    /// Choosing the vendor.
    VendorSelect { draft: DeviceDraft },
    /// Choosing the model and entering name, MAC and notes.
    DeviceInfo { draft: DeviceDraft },
    /// Confirming the draft; advancing runs the provisioning saga.
    Review {
        draft: DeviceDraft,
        saga: ProvisioningSaga,
    },
    /// Device created and script issued.
    ScriptReady {
        device: ProvisionedDevice,
        artifact: ScriptArtifact,
    },
    Cancelled,
    Completed,
}

impl OnboardingState {
    pub fn initial() -> Self {
        OnboardingState::VendorSelect {
            draft: DeviceDraft::default(),
        }
    }

    pub fn step(&self) -> WizardStep {
        match self {
            OnboardingState::VendorSelect { .. } => WizardStep::VendorSelect,
            OnboardingState::DeviceInfo { .. } => WizardStep::DeviceInfo,
            OnboardingState::Review { .. } => WizardStep::Review,
            OnboardingState::ScriptReady { .. } => WizardStep::ScriptReady,
            OnboardingState::Cancelled => WizardStep::Cancelled,
            OnboardingState::Completed => WizardStep::Completed,
        }
    }

    pub fn draft(&self) -> Option<&DeviceDraft> {
        match self {
            OnboardingState::VendorSelect { draft }
            | OnboardingState::DeviceInfo { draft }
            | OnboardingState::Review { draft, .. } => Some(draft),
            OnboardingState::ScriptReady { device, .. } => Some(device.draft()),
            OnboardingState::Cancelled | OnboardingState::Completed => None,
        }
    }

    pub fn provisioned(&self) -> Option<&ProvisionedDevice> {
        match self {
            OnboardingState::Review { saga, .. } => saga.device(),
            OnboardingState::ScriptReady { device, .. } => Some(device),
            _ => None,
        }
    }

    pub fn artifact(&self) -> Option<&ScriptArtifact> {
        match self {
            OnboardingState::ScriptReady { artifact, .. } => Some(artifact),
            _ => None,
        }
    }
}

impl Default for OnboardingState {
    fn default() -> Self {
        Self::initial()
    }
}

/// What `finish` hands back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingOutcome {
    pub device: ProvisionedDevice,
    pub artifact: ScriptArtifact,
    pub tunnel: TunnelIdentity,
}
