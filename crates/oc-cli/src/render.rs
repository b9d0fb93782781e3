//! Plain-text views of the wizard for the terminal.

use std::fmt::Write;
use std::path::Path;

use oc_core::catalog::DeviceCatalog;
use oc_core::device::{DeviceDraft, ScriptArtifact};
use oc_core::mac::MacAddress;
use oc_core::onboarding::{OnboardingOutcome, WizardSnapshot};

const COMING_SOON: &str = "[coming soon]";

/// Vendor and model list, disabled entries marked.
pub fn render_catalog(catalog: &DeviceCatalog) -> String {
    let marker = |enabled: bool| {
        if enabled {
            String::new()
        } else {
            format!(" {COMING_SOON}")
        }
    };

    let mut out = String::new();
    for vendor in catalog.vendors() {
        let _ = writeln!(out, "{} ({}){}", vendor.name, vendor.id, marker(vendor.enabled));
        for model in &vendor.models {
            let _ = writeln!(out, "  {} ({}){}", model.name, model.id, marker(model.enabled));
        }
    }
    out
}

/// `[2/4] Device Info` style header.
pub fn render_progress(snapshot: &WizardSnapshot) -> String {
    match snapshot.progress() {
        Some((position, total)) => format!("[{position}/{total}] {}", snapshot.step()),
        None => snapshot.step().to_string(),
    }
}

/// Review summary shown before the device is created.
pub fn render_review(draft: &DeviceDraft, catalog: &DeviceCatalog) -> String {
    let vendor = draft.vendor.as_ref().and_then(|id| catalog.vendor(id));
    let model = match (&draft.vendor, &draft.model) {
        (Some(vendor), Some(model)) => catalog.model(vendor, model),
        _ => None,
    };

    let mut out = String::new();
    let mut row = |label: &str, value: &str| {
        let _ = writeln!(out, "  {label:<13}{value}");
    };
    row("Vendor:", vendor.map(|v| v.name.as_str()).unwrap_or("-"));
    row("Device Type:", model.map(|m| m.name.as_str()).unwrap_or("-"));
    row("Device Name:", draft.name.trim());
    let mac_address = MacAddress::parse(&draft.mac_address)
        .map(|mac| mac.to_string())
        .unwrap_or_else(|_| draft.mac_address.clone());
    row("MAC Address:", &mac_address);
    if let Ok(tunnel) = draft.tunnel_identity() {
        row("Tunnel Name:", tunnel.name());
    }
    if let Some(location) = &draft.location {
        row("Location:", location);
    }
    if let Some(description) = &draft.description {
        row("Description:", description);
    }
    out
}

/// Success summary with the installation steps.
pub fn render_outcome(outcome: &OnboardingOutcome, saved_to: Option<&Path>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Device created successfully (id {}).", outcome.device.id());
    let _ = writeln!(out);
    let _ = writeln!(out, "WireGuard configuration:");
    let _ = writeln!(out, "  Tunnel Name: {}", outcome.tunnel.name());
    if let Some(info) = &outcome.artifact.wireguard_info {
        let _ = writeln!(out, "  VPN IP:      {}", info.vpn_ip);
        let _ = writeln!(out, "  Server IP:   {}", info.server_ip);
    }
    if let Some(path) = saved_to {
        let _ = writeln!(out);
        let _ = writeln!(out, "Provisioning script saved to {}", path.display());
    }

    let filename = saved_to
        .and_then(Path::file_name)
        .and_then(|name| name.to_str())
        .unwrap_or(&outcome.artifact.filename);
    let _ = writeln!(out);
    let _ = writeln!(out, "Installation:");
    let _ = writeln!(
        out,
        "  1. Copy the script to your MikroTik router (via Winbox, SCP, or paste in terminal)"
    );
    let _ = writeln!(out, "  2. Run: /import {filename}");
    let _ = writeln!(
        out,
        "  3. Change default SSH password: /user set orchenet password=YOUR_PASSWORD"
    );
    let _ = writeln!(out, "  4. Device will appear in the dashboard within 5 minutes");
    out
}

/// Script text for the operator to copy when it could not be written out.
pub fn render_unsaved_script(artifact: &ScriptArtifact, reason: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(out, "Could not save {}: {reason}", artifact.filename);
    let _ = writeln!(out, "Copy the script below instead:");
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", artifact.script_text.trim_end());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use oc_core::device::{ProvisionedDevice, WireguardInfo};
    use oc_core::ids::{DeviceId, ModelId, VendorId, WorkflowId};
    use oc_core::mac::TunnelIdentity;
    use oc_core::onboarding::OnboardingState;
    use std::path::PathBuf;

    fn draft() -> DeviceDraft {
        DeviceDraft {
            vendor: Some(VendorId::new("mikrotik")),
            model: Some(ModelId::new("routerboard")),
            name: "FW-1".into(),
            mac_address: "AA:BB:CC:11:22:33".into(),
            location: Some("HQ".into()),
            description: None,
        }
    }

    #[test]
    fn test_render_catalog_marks_disabled_entries() {
        let text = render_catalog(&DeviceCatalog::default());
        assert!(text.contains("MikroTik (mikrotik)\n"));
        assert!(text.contains("  RouterBoard (routerboard)\n"));
        assert!(text.contains("  hEX Series (hex) [coming soon]\n"));
        assert!(text.contains("WatchGuard (watchguard) [coming soon]\n"));
    }

    #[test]
    fn test_render_review_lists_draft_and_tunnel() {
        let text = render_review(&draft(), &DeviceCatalog::default());
        assert!(text.contains("Vendor:      MikroTik"));
        assert!(text.contains("Device Type: RouterBoard"));
        assert!(text.contains("Tunnel Name: orcatun_aa_bb_cc_11_22_33"));
        assert!(text.contains("Location:    HQ"));
        assert!(!text.contains("Description:"));
    }

    #[test]
    fn test_render_review_shows_canonical_mac() {
        let mut draft = draft();
        draft.mac_address = "AA-BB-CC-11-22-33".into();
        let text = render_review(&draft, &DeviceCatalog::default());
        assert!(text.contains("MAC Address: AA:BB:CC:11:22:33"));

        draft.mac_address = "AA:BB".into();
        let text = render_review(&draft, &DeviceCatalog::default());
        assert!(text.contains("MAC Address: AA:BB\n"));
        assert!(!text.contains("Tunnel Name:"));
    }

    #[test]
    fn test_render_progress() {
        let snapshot = WizardSnapshot {
            workflow_id: WorkflowId::new("wf"),
            state: OnboardingState::initial(),
            error: None,
            busy: false,
        };
        assert_eq!(render_progress(&snapshot), "[1/4] Vendor");
    }

    #[test]
    fn test_render_outcome_uses_saved_file_name() {
        let outcome = OnboardingOutcome {
            device: ProvisionedDevice::new(DeviceId::new("17"), draft()),
            artifact: ScriptArtifact {
                script_text: "# script".into(),
                filename: "fw-1.rsc".into(),
                wireguard_info: Some(WireguardInfo {
                    vpn_ip: "10.10.0.2".into(),
                    server_ip: "203.0.113.5".into(),
                    tunnel_name: None,
                    public_key: None,
                }),
            },
            tunnel: TunnelIdentity::derive("AA:BB:CC:11:22:33").unwrap(),
        };

        let saved = PathBuf::from("/tmp/out/fw-1.rsc");
        let text = render_outcome(&outcome, Some(&saved));

        assert!(text.contains("id 17"));
        assert!(text.contains("VPN IP:      10.10.0.2"));
        assert!(text.contains("Run: /import fw-1.rsc"));
        assert!(text.contains("/user set orchenet password="));
        assert!(text.contains("saved to /tmp/out/fw-1.rsc"));
    }

    #[test]
    fn test_render_unsaved_script_includes_script_text() {
        let artifact = ScriptArtifact {
            script_text: "/interface wireguard add name=orcatun_aa\n".into(),
            filename: "fw-1.rsc".into(),
            wireguard_info: None,
        };
        let text = render_unsaved_script(&artifact, "permission denied");

        assert!(text.contains("Could not save fw-1.rsc: permission denied"));
        assert!(text.ends_with("/interface wireguard add name=orcatun_aa\n"));
    }
}
