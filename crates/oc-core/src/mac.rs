//! MAC address parsing and WireGuard tunnel naming.
//!
//! A device's tunnel name is derived from its MAC address alone, so the same
//! hardware always maps to the same `orcatun_*` interface on the router and on
//! the server.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Prefix of every tunnel interface created by a provisioning script.
pub const TUNNEL_PREFIX: &str = "orcatun_";

static MAC_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9A-Fa-f]{2}[:-]){5}[0-9A-Fa-f]{2}$").expect("MAC pattern must compile")
});

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MacAddressError {
    #[error("invalid MAC address format: {0:?}")]
    InvalidFormat(String),
}

/// Returns true iff `raw` is six hex octet pairs separated by `:` or `-`.
pub fn is_valid(raw: &str) -> bool {
    MAC_PATTERN.is_match(raw)
}

/// Shorthand for `TunnelIdentity::derive(raw)` when only the name is needed.
pub fn derive_tunnel_name(raw: &str) -> Result<String, MacAddressError> {
    TunnelIdentity::derive(raw).map(TunnelIdentity::into_name)
}

/// A validated MAC address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    pub fn parse(raw: &str) -> Result<Self, MacAddressError> {
        if !is_valid(raw) {
            return Err(MacAddressError::InvalidFormat(raw.to_string()));
        }

        let mut octets = [0u8; 6];
        for (slot, pair) in octets.iter_mut().zip(raw.split([':', '-'])) {
            *slot = u8::from_str_radix(pair, 16)
                .map_err(|_| MacAddressError::InvalidFormat(raw.to_string()))?;
        }
        Ok(Self(octets))
    }

    pub fn octets(&self) -> [u8; 6] {
        self.0
    }
}

impl FromStr for MacAddress {
    type Err = MacAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Canonical form: upper-case, colon separated.
impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02X}:{b:02X}:{c:02X}:{d:02X}:{e:02X}:{g:02X}")
    }
}

/// Tunnel identity derived from a device MAC address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TunnelIdentity {
    name: String,
    mac_address: String,
}

impl TunnelIdentity {
    /// Derives `orcatun_<mac>` with separators replaced by `_` and hex digits lowercased.
    ///
    /// Only the MAC is consulted. The source string is kept as given.
    pub fn derive(raw: &str) -> Result<Self, MacAddressError> {
        if !is_valid(raw) {
            return Err(MacAddressError::InvalidFormat(raw.to_string()));
        }

        let suffix: String = raw
            .chars()
            .map(|c| match c {
                ':' | '-' => '_',
                other => other.to_ascii_lowercase(),
            })
            .collect();

        Ok(Self {
            name: format!("{TUNNEL_PREFIX}{suffix}"),
            mac_address: raw.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn into_name(self) -> String {
        self.name
    }

    pub fn mac_address(&self) -> &str {
        &self.mac_address
    }

    /// File name the backend gives the provisioning script for this tunnel.
    pub fn script_filename(&self) -> String {
        format!("provision_{}.rsc", self.name)
    }
}

impl fmt::Display for TunnelIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
