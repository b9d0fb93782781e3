//! Vendor and model catalog offered by the onboarding wizard.
//!
//! Entries that are not `enabled` are still listed so a front-end can show
//! them as "coming soon", but the wizard refuses to select them.

use serde::{Deserialize, Serialize};

use crate::ids::{ModelId, VendorId};

fn enabled_by_default() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelEntry {
    pub id: ModelId,
    pub name: String,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorEntry {
    pub id: VendorId,
    pub name: String,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(default)]
    pub models: Vec<ModelEntry>,
}

impl VendorEntry {
    pub fn model(&self, id: &ModelId) -> Option<&ModelEntry> {
        self.models.iter().find(|m| &m.id == id)
    }

    pub fn has_model(&self, id: &ModelId) -> bool {
        self.model(id).is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceCatalog {
    #[serde(default)]
    vendors: Vec<VendorEntry>,
}

impl DeviceCatalog {
    pub fn new(vendors: Vec<VendorEntry>) -> Self {
        Self { vendors }
    }

    pub fn vendors(&self) -> &[VendorEntry] {
        &self.vendors
    }

    pub fn vendor(&self, id: &VendorId) -> Option<&VendorEntry> {
        self.vendors.iter().find(|v| &v.id == id)
    }

    pub fn model(&self, vendor: &VendorId, model: &ModelId) -> Option<&ModelEntry> {
        self.vendor(vendor).and_then(|v| v.model(model))
    }

    pub fn is_empty(&self) -> bool {
        self.vendors.is_empty()
    }
}

/// The catalog shipped with OrcheNet: only MikroTik RouterBoard is provisionable.
impl Default for DeviceCatalog {
    fn default() -> Self {
        let vendor = |id: &str, name: &str, enabled: bool, models: Vec<ModelEntry>| VendorEntry {
            id: VendorId::new(id),
            name: name.to_string(),
            enabled,
            models,
        };
        let model = |id: &str, name: &str, enabled: bool| ModelEntry {
            id: ModelId::new(id),
            name: name.to_string(),
            enabled,
        };

        Self::new(vec![
            vendor(
                "mikrotik",
                "MikroTik",
                true,
                vec![
                    model("routerboard", "RouterBoard", true),
                    model("ccr", "Cloud Core Router (CCR)", false),
                    model("hex", "hEX Series", false),
                    model("rb5009", "RB5009", false),
                    model("other", "Other MikroTik", false),
                ],
            ),
            vendor("fortinet", "FortiGate", false, Vec::new()),
            vendor("watchguard", "WatchGuard", false, Vec::new()),
            vendor("ubiquiti", "Ubiquiti", false, Vec::new()),
        ])
    }
}
