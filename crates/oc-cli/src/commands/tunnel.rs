use anyhow::Context;

use oc_core::mac::TunnelIdentity;

/// `orchenet tunnel-name <MAC>`
pub fn run(mac_address: &str) -> anyhow::Result<String> {
    let tunnel = TunnelIdentity::derive(mac_address)
        .with_context(|| format!("Cannot derive a tunnel name from {mac_address:?}"))?;
    Ok(tunnel.into_name())
}
