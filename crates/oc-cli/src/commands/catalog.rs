use oc_core::config::AppConfig;

use crate::bootstrap::OnboardingSettings;
use crate::render::render_catalog;

/// `orchenet catalog`
pub fn run(config: &AppConfig) -> String {
    let settings = OnboardingSettings::from_config(config);
    render_catalog(&settings.catalog)
}
