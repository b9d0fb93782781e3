use serde::{Deserialize, Serialize};

use crate::device::{DraftEdit, ProvisionedDevice, ScriptArtifact};
use crate::ids::{ModelId, VendorId};

/// Events that drive the onboarding wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OnboardingEvent {
    SelectVendor { vendor: VendorId },
    SelectModel { model: ModelId },
    EditDraft(DraftEdit),
    Next,
    Back,
    Cancel,
    Finish,
    /// The backend created the device record.
    DeviceCreated { device: ProvisionedDevice },
    /// The backend issued the provisioning script.
    ScriptIssued { artifact: ScriptArtifact },
}

impl OnboardingEvent {
    pub fn name(&self) -> &'static str {
        match self {
            OnboardingEvent::SelectVendor { .. } => "SelectVendor",
            OnboardingEvent::SelectModel { .. } => "SelectModel",
            OnboardingEvent::EditDraft(_) => "EditDraft",
            OnboardingEvent::Next => "Next",
            OnboardingEvent::Back => "Back",
            OnboardingEvent::Cancel => "Cancel",
            OnboardingEvent::Finish => "Finish",
            OnboardingEvent::DeviceCreated { .. } => "DeviceCreated",
            OnboardingEvent::ScriptIssued { .. } => "ScriptIssued",
        }
    }
}
