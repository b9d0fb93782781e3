use serde::{Deserialize, Serialize};

/// Display-only WireGuard details returned with a provisioning script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireguardInfo {
    pub vpn_ip: String,
    pub server_ip: String,
    #[serde(default)]
    pub tunnel_name: Option<String>,
    #[serde(default)]
    pub public_key: Option<String>,
}

/// Provisioning script generated by the backend for one device.
///
/// The script text is opaque here; it is shown, copied or written out, never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptArtifact {
    pub script_text: String,
    pub filename: String,
    pub wireguard_info: Option<WireguardInfo>,
}
