use serde::{Deserialize, Serialize};

use crate::catalog::VendorEntry;
use crate::ids::{ModelId, VendorId};
use crate::mac::{MacAddressError, TunnelIdentity};

/// User-entered device data, before anything is sent to the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceDraft {
    pub vendor: Option<VendorId>,
    pub model: Option<ModelId>,
    pub name: String,
    pub mac_address: String,
    pub location: Option<String>,
    pub description: Option<String>,
}

/// A single edit of the free-text part of a draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DraftEdit {
    Name(String),
    MacAddress(String),
    Location(Option<String>),
    Description(Option<String>),
}

impl DeviceDraft {
    /// Sets the vendor and drops a model that does not belong to it.
    pub(crate) fn select_vendor(&mut self, vendor: &VendorEntry) {
        if let Some(model) = &self.model {
            if !vendor.has_model(model) {
                self.model = None;
            }
        }
        self.vendor = Some(vendor.id.clone());
    }

    pub(crate) fn select_model(&mut self, model: ModelId) {
        self.model = Some(model);
    }

    pub(crate) fn apply(&mut self, edit: DraftEdit) {
        match edit {
            DraftEdit::Name(name) => self.name = name,
            // Entered MACs are normalized to upper case, tunnel naming lowercases them again.
            DraftEdit::MacAddress(mac) => self.mac_address = mac.trim().to_ascii_uppercase(),
            DraftEdit::Location(location) => self.location = non_blank(location),
            DraftEdit::Description(description) => self.description = non_blank(description),
        }
    }

    /// Tunnel identity for the current MAC, if it is well formed.
    pub fn tunnel_identity(&self) -> Result<TunnelIdentity, MacAddressError> {
        TunnelIdentity::derive(&self.mac_address)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DeviceCatalog;

    #[test]
    fn test_mac_edit_is_trimmed_and_uppercased() {
        let mut draft = DeviceDraft::default();
        draft.apply(DraftEdit::MacAddress(" aa:bb:cc:11:22:33 ".into()));
        assert_eq!(draft.mac_address, "AA:BB:CC:11:22:33");
        assert_eq!(
            draft.tunnel_identity().unwrap().name(),
            "orcatun_aa_bb_cc_11_22_33"
        );
    }

    #[test]
    fn test_blank_optional_fields_become_none() {
        let mut draft = DeviceDraft::default();
        draft.apply(DraftEdit::Location(Some("   ".into())));
        draft.apply(DraftEdit::Description(Some("rack 4".into())));
        assert_eq!(draft.location, None);
        assert_eq!(draft.description.as_deref(), Some("rack 4"));
    }

    #[test]
    fn test_select_vendor_clears_foreign_model() {
        let catalog = DeviceCatalog::default();
        let mikrotik = catalog.vendor(&VendorId::new("mikrotik")).unwrap();
        let fortinet = catalog.vendor(&VendorId::new("fortinet")).unwrap();

        let mut draft = DeviceDraft::default();
        draft.select_vendor(mikrotik);
        draft.select_model(ModelId::new("routerboard"));
        draft.select_vendor(mikrotik);
        assert_eq!(draft.model, Some(ModelId::new("routerboard")));

        draft.select_vendor(fortinet);
        assert_eq!(draft.vendor, Some(VendorId::new("fortinet")));
        assert_eq!(draft.model, None);
    }
}
