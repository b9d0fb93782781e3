use serde::{Deserialize, Serialize};

use crate::device::{DeviceDraft, ProvisionedDevice, ScriptArtifact};
use crate::ids::WorkflowId;

use super::{OnboardingState, WizardError, WizardStep, TOTAL_STEPS};

/// Read-only view of a wizard session, handed to front-ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardSnapshot {
    pub workflow_id: WorkflowId,
    pub state: OnboardingState,
    /// Error of the last rejected operation; cleared by the next accepted one.
    pub error: Option<WizardError>,
    /// A remote call is in flight.
    pub busy: bool,
}

impl WizardSnapshot {
    pub fn step(&self) -> WizardStep {
        self.state.step()
    }

    pub fn draft(&self) -> Option<&DeviceDraft> {
        self.state.draft()
    }

    pub fn provisioned(&self) -> Option<&ProvisionedDevice> {
        self.state.provisioned()
    }

    pub fn artifact(&self) -> Option<&ScriptArtifact> {
        self.state.artifact()
    }

    /// Tunnel name for the draft MAC, once it is well formed.
    pub fn tunnel_name(&self) -> Option<String> {
        self.draft()
            .and_then(|draft| draft.tunnel_identity().ok())
            .map(|tunnel| tunnel.into_name())
    }

    /// `(position, total)` for a progress indicator.
    pub fn progress(&self) -> Option<(u8, u8)> {
        self.step().position().map(|pos| (pos, TOTAL_STEPS))
    }
}
