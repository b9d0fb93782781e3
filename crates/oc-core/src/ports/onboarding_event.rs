use async_trait::async_trait;

use crate::onboarding::WizardSnapshot;

#[async_trait]
pub trait OnboardingEventPort: Send + Sync {
    async fn emit_snapshot_changed(&self, snapshot: WizardSnapshot);
}

/// Event port for sessions nobody observes.
pub struct NoopOnboardingEventPort;

#[async_trait]
impl OnboardingEventPort for NoopOnboardingEventPort {
    async fn emit_snapshot_changed(&self, _snapshot: WizardSnapshot) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::WorkflowId;
    use crate::onboarding::OnboardingState;

    #[tokio::test]
    async fn test_noop_port_accepts_snapshots() {
        let port: &dyn OnboardingEventPort = &NoopOnboardingEventPort;
        port.emit_snapshot_changed(WizardSnapshot {
            workflow_id: WorkflowId::new("wf-1"),
            state: OnboardingState::initial(),
            error: None,
            busy: false,
        })
        .await;
    }
}
