//! Process bootstrap: configuration, tracing and dependency wiring.

pub mod config;
pub mod settings;
pub mod tracing;
pub mod wiring;

pub use config::{default_config_path, load_config, resolve_config};
pub use settings::OnboardingSettings;
pub use self::tracing::init_tracing_subscriber;
pub use wiring::{wire_onboarding, OnboardingDeps, WiringError};
