//! Interactive prompts for the onboarding wizard.

use anyhow::Result;
use dialoguer::{Input, Select};

use oc_core::catalog::{ModelEntry, VendorEntry};

/// What the user wants to do after filling in a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Next,
    Back,
    Cancel,
}

impl Navigation {
    fn label(self, next_label: &'static str) -> &'static str {
        match self {
            Navigation::Next => next_label,
            Navigation::Back => "Back",
            Navigation::Cancel => "Cancel",
        }
    }
}

fn entry_label(name: &str, enabled: bool) -> String {
    if enabled {
        name.to_string()
    } else {
        format!("{name} (coming soon)")
    }
}

/// Prompt for the vendor. Disabled vendors are listed but the workflow
/// rejects them.
pub fn prompt_vendor(vendors: &[VendorEntry], current: Option<usize>) -> Result<usize> {
    let items: Vec<String> = vendors
        .iter()
        .map(|v| entry_label(&v.name, v.enabled))
        .collect();
    let selection = Select::new()
        .with_prompt("Select device vendor")
        .items(&items)
        .default(current.unwrap_or(0))
        .interact()?;
    Ok(selection)
}

/// Prompt for the model of the selected vendor.
pub fn prompt_model(models: &[ModelEntry], current: Option<usize>) -> Result<usize> {
    let items: Vec<String> = models
        .iter()
        .map(|m| entry_label(&m.name, m.enabled))
        .collect();
    let selection = Select::new()
        .with_prompt("Device type")
        .items(&items)
        .default(current.unwrap_or(0))
        .interact()?;
    Ok(selection)
}

/// Prompt for the device name.
pub fn prompt_name(current: &str) -> Result<String> {
    let name: String = Input::new()
        .with_prompt("Device name (e.g. Branch-Office-FW-01)")
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()?;
    Ok(name)
}

/// Prompt for the MAC address. The format is checked by the workflow.
pub fn prompt_mac_address(current: &str) -> Result<String> {
    let mac_address: String = Input::new()
        .with_prompt("MAC address (XX:XX:XX:XX:XX:XX)")
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()?;
    Ok(mac_address)
}

/// Prompt for an optional free-text field; blank means none.
pub fn prompt_optional(label: &str, current: Option<&str>) -> Result<Option<String>> {
    let value: String = Input::new()
        .with_prompt(format!("{label} (optional)"))
        .with_initial_text(current.unwrap_or(""))
        .allow_empty(true)
        .interact_text()?;
    Ok(Some(value).filter(|v| !v.trim().is_empty()))
}

/// Prompt for the next move among `options`.
pub fn prompt_navigation(
    options: &[Navigation],
    next_label: &'static str,
) -> Result<Navigation> {
    let items: Vec<&str> = options.iter().map(|o| o.label(next_label)).collect();
    let selection = Select::new()
        .with_prompt("Continue")
        .items(&items)
        .default(0)
        .interact()?;
    Ok(options[selection])
}
