use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of visible wizard steps.
pub const TOTAL_STEPS: u8 = 4;

/// Wizard step, as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WizardStep {
    VendorSelect,
    DeviceInfo,
    Review,
    ScriptReady,
    Cancelled,
    Completed,
}

impl WizardStep {
    /// 1-based position in the progress bar; `None` once the wizard has ended.
    pub fn position(self) -> Option<u8> {
        match self {
            WizardStep::VendorSelect => Some(1),
            WizardStep::DeviceInfo => Some(2),
            WizardStep::Review => Some(3),
            WizardStep::ScriptReady => Some(4),
            WizardStep::Cancelled | WizardStep::Completed => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, WizardStep::Cancelled | WizardStep::Completed)
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::VendorSelect => "Vendor",
            WizardStep::DeviceInfo => "Device Info",
            WizardStep::Review => "Review",
            WizardStep::ScriptReady => "Script",
            WizardStep::Cancelled => "Cancelled",
            WizardStep::Completed => "Completed",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
