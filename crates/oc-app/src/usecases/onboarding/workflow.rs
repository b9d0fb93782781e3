//! Onboarding workflow.
//!
//! This module coordinates the onboarding state machine and the provisioning
//! backend. The state machine decides, the workflow runs the remote calls it
//! asks for and feeds their results back in.

use std::sync::Arc;

use tracing::{debug, info, info_span, warn, Instrument};

use oc_core::{
    catalog::DeviceCatalog,
    device::{CheckInPolicy, DeviceRegistration, DraftEdit, ProvisionedDevice},
    ids::{ModelId, VendorId, WorkflowId},
    onboarding::{
        OnboardingAction, OnboardingEvent, OnboardingOutcome, OnboardingState,
        OnboardingStateMachine, TransitionError, ValidationError, WizardError, WizardSnapshot,
        WizardStep,
    },
    ports::{OnboardingEventPort, ProvisioningClientPort, RemoteError},
};

use super::context::OnboardingContext;

/// Errors returned by workflow operations.
///
/// Validation failures of `next` are not errors here: they are recorded in
/// the snapshot and the step stays put.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkflowError {
    #[error("another onboarding operation is still running")]
    ConcurrentOperation,
    #[error("{operation} is not allowed in step {step}")]
    InvalidTransition {
        step: WizardStep,
        operation: &'static str,
    },
    #[error("invalid selection: {0}")]
    InvalidSelection(ValidationError),
}

/// Drives one onboarding wizard session.
pub struct OnboardingWorkflow {
    context: OnboardingContext,
    catalog: Arc<DeviceCatalog>,
    check_in: CheckInPolicy,
    provisioning: Arc<dyn ProvisioningClientPort>,
    event_port: Arc<dyn OnboardingEventPort>,
}

impl OnboardingWorkflow {
    pub fn new(
        catalog: Arc<DeviceCatalog>,
        check_in: CheckInPolicy,
        provisioning: Arc<dyn ProvisioningClientPort>,
        event_port: Arc<dyn OnboardingEventPort>,
    ) -> Self {
        Self {
            context: OnboardingContext::new(WorkflowId::generate()),
            catalog,
            check_in,
            provisioning,
            event_port,
        }
    }

    pub fn workflow_id(&self) -> &WorkflowId {
        self.context.workflow_id()
    }

    pub fn catalog(&self) -> &DeviceCatalog {
        &self.catalog
    }

    pub async fn snapshot(&self) -> WizardSnapshot {
        self.context.snapshot().await
    }

    pub async fn select_vendor(
        &self,
        vendor: impl Into<VendorId>,
    ) -> Result<WizardSnapshot, WorkflowError> {
        self.edit(
            "select_vendor",
            OnboardingEvent::SelectVendor {
                vendor: vendor.into(),
            },
        )
        .await
    }

    pub async fn select_model(
        &self,
        model: impl Into<ModelId>,
    ) -> Result<WizardSnapshot, WorkflowError> {
        self.edit(
            "select_model",
            OnboardingEvent::SelectModel {
                model: model.into(),
            },
        )
        .await
    }

    pub async fn set_name(&self, name: impl Into<String>) -> Result<WizardSnapshot, WorkflowError> {
        self.edit(
            "set_name",
            OnboardingEvent::EditDraft(DraftEdit::Name(name.into())),
        )
        .await
    }

    pub async fn set_mac_address(
        &self,
        mac_address: impl Into<String>,
    ) -> Result<WizardSnapshot, WorkflowError> {
        self.edit(
            "set_mac_address",
            OnboardingEvent::EditDraft(DraftEdit::MacAddress(mac_address.into())),
        )
        .await
    }

    pub async fn set_location(
        &self,
        location: Option<String>,
    ) -> Result<WizardSnapshot, WorkflowError> {
        self.edit(
            "set_location",
            OnboardingEvent::EditDraft(DraftEdit::Location(location)),
        )
        .await
    }

    pub async fn set_description(
        &self,
        description: Option<String>,
    ) -> Result<WizardSnapshot, WorkflowError> {
        self.edit(
            "set_description",
            OnboardingEvent::EditDraft(DraftEdit::Description(description)),
        )
        .await
    }

    /// Advances the wizard. From the review step this runs the provisioning saga.
    pub async fn next(&self) -> Result<WizardSnapshot, WorkflowError> {
        let span = info_span!("usecase.onboarding.next", workflow_id = %self.workflow_id());
        async {
            let (snapshot, actions) = {
                let mut session = self.context.lock().await;
                if session.busy {
                    return Err(WorkflowError::ConcurrentOperation);
                }

                let from = session.state.step();
                match OnboardingStateMachine::transition(
                    &session.state,
                    OnboardingEvent::Next,
                    &self.catalog,
                ) {
                    Ok(transition) => {
                        session.state = transition.next;
                        session.error = None;
                        session.busy = !transition.actions.is_empty();
                        info!(from = %from, to = %session.state.step(), "onboarding step advanced");
                        (self.context.snapshot_of(&session), transition.actions)
                    }
                    Err(TransitionError::Validation(err)) => {
                        info!(step = %from, error = ?err, "onboarding step blocked by validation");
                        session.error = Some(WizardError::Validation(err));
                        (self.context.snapshot_of(&session), Vec::new())
                    }
                    Err(TransitionError::InvalidTransition { step, .. }) => {
                        return Err(WorkflowError::InvalidTransition {
                            step,
                            operation: "next",
                        });
                    }
                }
            };

            self.emit(snapshot.clone()).await;
            if actions.is_empty() {
                return Ok(snapshot);
            }
            Ok(self.run_actions(actions).await)
        }
        .instrument(span)
        .await
    }

    pub async fn back(&self) -> Result<WizardSnapshot, WorkflowError> {
        let span = info_span!("usecase.onboarding.back", workflow_id = %self.workflow_id());
        self.edit("back", OnboardingEvent::Back)
            .instrument(span)
            .await
    }

    /// Abandons the session. Never blocked by a call in flight; its result is
    /// dropped when it arrives.
    pub async fn cancel(&self) -> Result<WizardSnapshot, WorkflowError> {
        let span = info_span!("usecase.onboarding.cancel", workflow_id = %self.workflow_id());
        async {
            let snapshot = {
                let mut session = self.context.lock().await;
                let from = session.state.step();
                let transition = OnboardingStateMachine::transition(
                    &session.state,
                    OnboardingEvent::Cancel,
                    &self.catalog,
                )
                .map_err(|err| Self::rejected(err, "cancel"))?;

                if session.busy {
                    info!(from = %from, "onboarding cancelled while a remote call is in flight");
                } else {
                    info!(from = %from, "onboarding cancelled");
                }
                session.state = transition.next;
                session.error = None;
                session.busy = false;
                self.context.snapshot_of(&session)
            };

            self.emit(snapshot.clone()).await;
            Ok(snapshot)
        }
        .instrument(span)
        .await
    }

    /// Closes a session whose script has been issued.
    pub async fn finish(&self) -> Result<OnboardingOutcome, WorkflowError> {
        let span = info_span!("usecase.onboarding.finish", workflow_id = %self.workflow_id());
        async {
            let (outcome, snapshot) = {
                let mut session = self.context.lock().await;
                let (device, artifact) = match &session.state {
                    OnboardingState::ScriptReady { device, artifact } => {
                        (device.clone(), artifact.clone())
                    }
                    other => {
                        return Err(WorkflowError::InvalidTransition {
                            step: other.step(),
                            operation: "finish",
                        })
                    }
                };
                let tunnel = device
                    .draft()
                    .tunnel_identity()
                    .map_err(|_| WorkflowError::InvalidSelection(ValidationError::InvalidMac))?;

                let transition = OnboardingStateMachine::transition(
                    &session.state,
                    OnboardingEvent::Finish,
                    &self.catalog,
                )
                .map_err(|err| Self::rejected(err, "finish"))?;
                session.state = transition.next;
                session.error = None;

                info!(device_id = %device.id(), tunnel = %tunnel, "onboarding completed");
                (
                    OnboardingOutcome {
                        device,
                        artifact,
                        tunnel,
                    },
                    self.context.snapshot_of(&session),
                )
            };

            self.emit(snapshot).await;
            Ok(outcome)
        }
        .instrument(span)
        .await
    }

    /// Applies an event that needs no remote call.
    async fn edit(
        &self,
        operation: &'static str,
        event: OnboardingEvent,
    ) -> Result<WizardSnapshot, WorkflowError> {
        let (snapshot, result) = {
            let mut session = self.context.lock().await;
            if session.busy {
                return Err(WorkflowError::ConcurrentOperation);
            }

            let from = session.state.step();
            let result =
                match OnboardingStateMachine::transition(&session.state, event, &self.catalog) {
                    Ok(transition) => {
                        session.state = transition.next;
                        debug!(operation, from = %from, to = %session.state.step(), "onboarding draft updated");
                        match transition.blocked_by {
                            // Recorded in the draft, but the step cannot be left with it.
                            Some(err) => {
                                session.error = Some(WizardError::Validation(err));
                                Err(WorkflowError::InvalidSelection(err))
                            }
                            None => {
                                session.error = None;
                                Ok(())
                            }
                        }
                    }
                    // Rejected selections stay visible in the snapshot, the draft is untouched.
                    Err(TransitionError::Validation(err)) => {
                        session.error = Some(WizardError::Validation(err));
                        Err(WorkflowError::InvalidSelection(err))
                    }
                    Err(err) => return Err(Self::rejected(err, operation)),
                };
            (self.context.snapshot_of(&session), result)
        };

        self.emit(snapshot.clone()).await;
        result.map(|()| snapshot)
    }

    /// Runs remote actions until the saga stops, fails or is cancelled.
    async fn run_actions(&self, mut pending: Vec<OnboardingAction>) -> WizardSnapshot {
        while let Some(action) = pending.pop() {
            let result = self.execute_action(action).await;

            let snapshot = {
                let mut session = self.context.lock().await;
                if !session.busy {
                    debug!("discarding provisioning result, session no longer waiting for it");
                    return self.context.snapshot_of(&session);
                }

                match result {
                    Ok(event) => {
                        match OnboardingStateMachine::transition(
                            &session.state,
                            event,
                            &self.catalog,
                        ) {
                            Ok(transition) => {
                                session.state = transition.next;
                                session.busy = !transition.actions.is_empty();
                                pending.extend(transition.actions);
                            }
                            Err(err) => {
                                debug!(error = %err, "discarding provisioning result");
                                return self.context.snapshot_of(&session);
                            }
                        }
                    }
                    Err(err) => {
                        warn!(
                            status = ?err.status,
                            stage = stage_of(&session.state),
                            error = %err,
                            "provisioning call failed"
                        );
                        session.error = Some(WizardError::Remote(err));
                        session.busy = false;
                    }
                }
                self.context.snapshot_of(&session)
            };

            self.emit(snapshot).await;
        }

        self.context.snapshot().await
    }

    async fn execute_action(
        &self,
        action: OnboardingAction,
    ) -> Result<OnboardingEvent, RemoteError> {
        match action {
            OnboardingAction::CreateDevice { draft } => {
                let registration = DeviceRegistration::from_draft(&draft, self.check_in.clone());
                info!(name = %registration.name, mac = %registration.mac_address, "creating device record");
                let id = self.provisioning.create_device(&registration).await?;
                info!(device_id = %id, "device record created");
                Ok(OnboardingEvent::DeviceCreated {
                    device: ProvisionedDevice::new(id, draft),
                })
            }
            OnboardingAction::RequestScript {
                device_id,
                mac_address,
            } => {
                info!(device_id = %device_id, "requesting provisioning script");
                let artifact = self
                    .provisioning
                    .request_script(&device_id, &mac_address)
                    .await?;
                info!(device_id = %device_id, filename = %artifact.filename, "provisioning script issued");
                Ok(OnboardingEvent::ScriptIssued { artifact })
            }
        }
    }

    fn rejected(err: TransitionError, operation: &'static str) -> WorkflowError {
        match err {
            TransitionError::Validation(err) => WorkflowError::InvalidSelection(err),
            TransitionError::InvalidTransition { step, .. } => {
                WorkflowError::InvalidTransition { step, operation }
            }
        }
    }

    async fn emit(&self, snapshot: WizardSnapshot) {
        self.event_port.emit_snapshot_changed(snapshot).await;
    }
}

fn stage_of(state: &OnboardingState) -> &'static str {
    match state {
        OnboardingState::Review { saga, .. } => saga.stage_name(),
        _ => "none",
    }
}
