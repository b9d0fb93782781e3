//! # Dependency Injection
//!
//! Builds the infra adapters and injects them into the onboarding use cases.
//! Assembly only: settings are already resolved and no decisions are taken
//! here.

use std::sync::Arc;

use oc_app::{ExportProvisioningScript, OnboardingWorkflow};
use oc_core::ports::{OnboardingEventPort, ProvisioningClientPort, ScriptExportPort};
use oc_infra::{FsScriptExporter, HttpProvisioningClient, HttpProvisioningConfig};

use crate::adapters::TracingOnboardingEventPort;

use super::settings::OnboardingSettings;

/// Result type for wiring operations
pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("HTTP client initialization failed: {0}")]
    HttpClientInit(String),
}

/// Everything the `onboard` command needs.
pub struct OnboardingDeps {
    pub workflow: Arc<OnboardingWorkflow>,
    pub export_script: ExportProvisioningScript,
}

pub fn wire_onboarding(settings: &OnboardingSettings) -> WiringResult<OnboardingDeps> {
    let provisioning: Arc<dyn ProvisioningClientPort> = Arc::new(
        HttpProvisioningClient::new(&HttpProvisioningConfig {
            base_url: settings.api_base_url.clone(),
            timeout: settings.api_timeout,
        })
        .map_err(|e| WiringError::HttpClientInit(e.to_string()))?,
    );
    let event_port: Arc<dyn OnboardingEventPort> = Arc::new(TracingOnboardingEventPort);
    let exporter: Arc<dyn ScriptExportPort> = Arc::new(FsScriptExporter::new());

    let workflow = OnboardingWorkflow::new(
        Arc::new(settings.catalog.clone()),
        settings.check_in.clone(),
        provisioning,
        event_port,
    );

    Ok(OnboardingDeps {
        workflow: Arc::new(workflow),
        export_script: ExportProvisioningScript::new(exporter),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use oc_core::config::AppConfig;
    use oc_core::onboarding::WizardStep;

    #[tokio::test]
    async fn test_wire_onboarding_uses_settings_catalog() {
        let settings = OnboardingSettings::resolve(&AppConfig::empty(), None);
        let deps = wire_onboarding(&settings).unwrap();

        assert_eq!(deps.workflow.catalog(), &settings.catalog);
        assert_eq!(
            deps.workflow.snapshot().await.step(),
            WizardStep::VendorSelect
        );
    }

    #[test]
    fn test_wire_onboarding_rejects_blank_url() {
        let mut settings = OnboardingSettings::resolve(&AppConfig::empty(), None);
        settings.api_base_url = String::new();

        assert!(matches!(
            wire_onboarding(&settings),
            Err(WiringError::HttpClientInit(_))
        ));
    }
}
