use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use oc_core::ids::WorkflowId;
use oc_core::onboarding::{OnboardingState, WizardError, WizardSnapshot};

/// Mutable part of a wizard session.
#[derive(Debug, Default)]
pub(crate) struct Session {
    pub state: OnboardingState,
    pub error: Option<WizardError>,
    pub busy: bool,
}

/// Shared onboarding context holding the session of one wizard run.
///
/// ## Locking
/// The session lock is only held while reading or replacing the session. It
/// is released before any remote call so `cancel` can always get through.
#[derive(Clone)]
pub(crate) struct OnboardingContext {
    workflow_id: WorkflowId,
    session: Arc<Mutex<Session>>,
}

impl OnboardingContext {
    pub fn new(workflow_id: WorkflowId) -> Self {
        Self {
            workflow_id,
            session: Arc::new(Mutex::new(Session::default())),
        }
    }

    pub fn workflow_id(&self) -> &WorkflowId {
        &self.workflow_id
    }

    pub async fn lock(&self) -> MutexGuard<'_, Session> {
        self.session.lock().await
    }

    pub async fn snapshot(&self) -> WizardSnapshot {
        let session = self.lock().await;
        self.snapshot_of(&session)
    }

    /// Snapshot of an already locked session.
    pub fn snapshot_of(&self, session: &Session) -> WizardSnapshot {
        WizardSnapshot {
            workflow_id: self.workflow_id.clone(),
            state: session.state.clone(),
            error: session.error.clone(),
            busy: session.busy,
        }
    }
}
