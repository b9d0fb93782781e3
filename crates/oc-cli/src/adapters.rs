//! Front-end adapters for `oc-core` ports.

use async_trait::async_trait;
use tracing::debug;

use oc_core::onboarding::WizardSnapshot;
use oc_core::ports::OnboardingEventPort;

/// Records every wizard snapshot change in the log.
pub struct TracingOnboardingEventPort;

#[async_trait]
impl OnboardingEventPort for TracingOnboardingEventPort {
    async fn emit_snapshot_changed(&self, snapshot: WizardSnapshot) {
        debug!(
            workflow_id = %snapshot.workflow_id,
            step = %snapshot.step(),
            busy = snapshot.busy,
            error = ?snapshot.error,
            "onboarding snapshot changed"
        );
    }
}
