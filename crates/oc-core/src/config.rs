//! Configuration DTO.
//!
//! Data only: no validation and no default values. Absent keys become empty
//! values here and the bootstrap layer decides what they mean.

use std::path::PathBuf;

use anyhow::Context;

use crate::catalog::DeviceCatalog;

/// Application configuration DTO (pure data, no logic)
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Backend base URL (may be empty)
    pub api_base_url: String,

    /// HTTP timeout in seconds, 0 when not configured
    pub api_timeout_secs: u64,

    /// Check-in method sent with new devices (may be empty)
    pub check_in_method: String,

    /// Check-in interval in seconds, 0 when not configured
    pub check_in_interval_secs: u32,

    /// Where exported scripts go (path info only, no existence check)
    pub script_dir: PathBuf,

    /// Catalog from `[catalog]`, `None` when the table is absent
    pub catalog: Option<DeviceCatalog>,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    ///
    /// Only a malformed `[catalog]` table is an error; every other key is
    /// read as-is.
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let str_at = |table: &str, key: &str| {
            toml_value
                .get(table)
                .and_then(|t| t.get(key))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string()
        };
        let int_at = |table: &str, key: &str| {
            toml_value
                .get(table)
                .and_then(|t| t.get(key))
                .and_then(|v| v.as_integer())
                .unwrap_or(0)
        };

        let catalog = toml_value
            .get("catalog")
            .cloned()
            .map(|value| value.try_into::<DeviceCatalog>())
            .transpose()
            .context("invalid [catalog] table")?;

        Ok(Self {
            api_base_url: str_at("api", "base_url"),
            api_timeout_secs: int_at("api", "timeout_secs").max(0) as u64,
            check_in_method: str_at("check_in", "method"),
            check_in_interval_secs: int_at("check_in", "interval_secs").clamp(0, u32::MAX as i64)
                as u32,
            script_dir: PathBuf::from(str_at("output", "script_dir")),
            catalog,
        })
    }

    /// Create empty AppConfig (all empty/default values)
    pub fn empty() -> Self {
        Self {
            api_base_url: String::new(),
            api_timeout_secs: 0,
            check_in_method: String::new(),
            check_in_interval_secs: 0,
            script_dir: PathBuf::new(),
            catalog: None,
        }
    }
}
