//! # Configuration Loader
//!
//! Reads the TOML configuration file and maps it to the [`AppConfig`] DTO.
//!
//! No validation and no default values here: whatever is in the file is
//! handed on. [`super::settings`] decides what empty values mean.

use std::path::PathBuf;

use anyhow::Context;
use oc_core::config::AppConfig;

const CONFIG_DIR_NAME: &str = "orchenet";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Load configuration from a TOML file
///
/// # Errors
///
/// Returns error if:
/// - File cannot be read (I/O error)
/// - Content is not valid TOML (parse error)
/// - The `[catalog]` table is malformed (mapping error)
pub fn load_config(config_path: PathBuf) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

/// `<config dir>/orchenet/config.toml`, when the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Loads the file given on the command line, or the default one if present.
///
/// An explicitly requested file must exist; a missing default file yields an
/// empty config.
pub fn resolve_config(explicit: Option<PathBuf>) -> anyhow::Result<AppConfig> {
    if let Some(path) = explicit {
        return load_config(path);
    }

    match default_config_path() {
        Some(path) if path.exists() => load_config(path),
        _ => Ok(AppConfig::empty()),
    }
}
