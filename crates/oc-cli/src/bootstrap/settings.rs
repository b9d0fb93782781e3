//! Runtime settings derived from the configuration DTO.
//!
//! This is where empty configuration values get their defaults and where
//! the environment may override the file.

use std::path::PathBuf;
use std::time::Duration;

use oc_core::catalog::DeviceCatalog;
use oc_core::config::AppConfig;
use oc_core::device::CheckInPolicy;

/// Environment variable overriding `[api] base_url`.
pub const API_URL_ENV: &str = "ORCHENET_API_URL";
pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_API_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq)]
pub struct OnboardingSettings {
    pub api_base_url: String,
    pub api_timeout: Duration,
    pub check_in: CheckInPolicy,
    pub script_dir: PathBuf,
    pub catalog: DeviceCatalog,
}

impl OnboardingSettings {
    /// Resolves settings from the config and the process environment.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::resolve(config, std::env::var(API_URL_ENV).ok())
    }

    /// Precedence for the API URL: environment, then file, then default.
    pub fn resolve(config: &AppConfig, env_api_url: Option<String>) -> Self {
        let api_base_url = env_api_url
            .filter(|url| !url.trim().is_empty())
            .or_else(|| non_empty(&config.api_base_url))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let api_timeout = match config.api_timeout_secs {
            0 => DEFAULT_API_TIMEOUT,
            secs => Duration::from_secs(secs),
        };

        let defaults = CheckInPolicy::default();
        let check_in = CheckInPolicy {
            method: non_empty(&config.check_in_method).unwrap_or(defaults.method),
            interval_secs: match config.check_in_interval_secs {
                0 => defaults.interval_secs,
                secs => secs,
            },
        };

        let script_dir = if config.script_dir.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            config.script_dir.clone()
        };

        Self {
            api_base_url,
            api_timeout,
            check_in,
            script_dir,
            catalog: config.catalog.clone().unwrap_or_default(),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
