//! Per-step validation of the device draft.

use crate::catalog::DeviceCatalog;
use crate::device::DeviceDraft;
use crate::mac;

use super::{ValidationError, WizardStep};

/// Stateless validator deciding whether a step may be left forwards.
pub struct StepValidator;

impl StepValidator {
    /// Checks run in a fixed order and the first failure wins.
    pub fn can_advance(
        step: WizardStep,
        draft: &DeviceDraft,
        catalog: &DeviceCatalog,
    ) -> Result<(), ValidationError> {
        match step {
            WizardStep::VendorSelect => Self::check_vendor(draft, catalog),
            WizardStep::DeviceInfo => Self::check_device_info(draft, catalog),
            // Review collects no input; terminal steps are rejected by the state machine.
            WizardStep::Review
            | WizardStep::ScriptReady
            | WizardStep::Cancelled
            | WizardStep::Completed => Ok(()),
        }
    }

    fn check_vendor(draft: &DeviceDraft, catalog: &DeviceCatalog) -> Result<(), ValidationError> {
        let vendor = draft.vendor.as_ref().ok_or(ValidationError::MissingVendor)?;
        let entry = catalog
            .vendor(vendor)
            .ok_or(ValidationError::UnknownVendor)?;
        if !entry.enabled {
            return Err(ValidationError::VendorDisabled);
        }
        Ok(())
    }

    fn check_device_info(
        draft: &DeviceDraft,
        catalog: &DeviceCatalog,
    ) -> Result<(), ValidationError> {
        let model = draft.model.as_ref().ok_or(ValidationError::MissingModel)?;
        let vendor = draft.vendor.as_ref().ok_or(ValidationError::MissingVendor)?;
        let entry = catalog
            .model(vendor, model)
            .ok_or(ValidationError::UnknownModel)?;
        if !entry.enabled {
            return Err(ValidationError::ModelDisabled);
        }

        if draft.name.trim().is_empty() {
            return Err(ValidationError::MissingName);
        }

        if draft.mac_address.trim().is_empty() {
            return Err(ValidationError::MissingMac);
        }
        if !mac::is_valid(&draft.mac_address) {
            return Err(ValidationError::InvalidMac);
        }

        Ok(())
    }
}
