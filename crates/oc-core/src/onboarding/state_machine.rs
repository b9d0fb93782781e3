//! Onboarding state machine.
//!
//! Defines a pure state transition function for the device onboarding wizard.
//! Remote calls are returned as [`OnboardingAction`]s and their results come
//! back in as events.

use tracing::trace;

use crate::catalog::DeviceCatalog;

use super::{
    OnboardingAction, OnboardingEvent, OnboardingState, ProvisioningSaga, StepValidator,
    TransitionError, ValidationError,
};

/// Result of an accepted event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub next: OnboardingState,
    pub actions: Vec<OnboardingAction>,
    /// Set when the event was recorded but leaves the step unable to advance.
    pub blocked_by: Option<ValidationError>,
}

impl Transition {
    fn to(next: OnboardingState) -> Self {
        Self {
            next,
            actions: Vec::new(),
            blocked_by: None,
        }
    }

    fn with_action(next: OnboardingState, action: OnboardingAction) -> Self {
        Self {
            next,
            actions: vec![action],
            blocked_by: None,
        }
    }

    fn blocked(next: OnboardingState, reason: ValidationError) -> Self {
        Self {
            blocked_by: Some(reason),
            ..Self::to(next)
        }
    }
}

/// Pure onboarding state machine: no side effects.
pub struct OnboardingStateMachine;

impl OnboardingStateMachine {
    /// Applies `event` to `state`.
    ///
    /// On `Err` the caller keeps `state` as it was; nothing is partially applied.
    pub fn transition(
        state: &OnboardingState,
        event: OnboardingEvent,
        catalog: &DeviceCatalog,
    ) -> Result<Transition, TransitionError> {
        use OnboardingState as S;

        match (state, event) {
            (S::VendorSelect { draft }, OnboardingEvent::SelectVendor { vendor }) => {
                let entry = catalog
                    .vendor(&vendor)
                    .ok_or(ValidationError::UnknownVendor)?;
                if !entry.enabled {
                    return Err(ValidationError::VendorDisabled.into());
                }
                let mut draft = draft.clone();
                draft.select_vendor(entry);
                Ok(Transition::to(S::VendorSelect { draft }))
            }
            (S::DeviceInfo { draft }, OnboardingEvent::SelectModel { model }) => {
                let vendor = draft
                    .vendor
                    .as_ref()
                    .ok_or(ValidationError::MissingVendor)?;
                let entry = catalog
                    .model(vendor, &model)
                    .ok_or(ValidationError::UnknownModel)?;
                let enabled = entry.enabled;
                let mut draft = draft.clone();
                draft.select_model(model);
                // A disabled model is kept so that `Next` keeps reporting it.
                if enabled {
                    Ok(Transition::to(S::DeviceInfo { draft }))
                } else {
                    Ok(Transition::blocked(
                        S::DeviceInfo { draft },
                        ValidationError::ModelDisabled,
                    ))
                }
            }
            (S::DeviceInfo { draft }, OnboardingEvent::EditDraft(edit)) => {
                let mut draft = draft.clone();
                draft.apply(edit);
                Ok(Transition::to(S::DeviceInfo { draft }))
            }
            (S::VendorSelect { draft }, OnboardingEvent::Next) => {
                StepValidator::can_advance(state.step(), draft, catalog)?;
                Ok(Transition::to(S::DeviceInfo {
                    draft: draft.clone(),
                }))
            }
            (S::DeviceInfo { draft }, OnboardingEvent::Next) => {
                StepValidator::can_advance(state.step(), draft, catalog)?;
                Ok(Transition::to(S::Review {
                    draft: draft.clone(),
                    saga: ProvisioningSaga::CreatingDevice,
                }))
            }
            (S::Review { draft, saga }, OnboardingEvent::Next) => {
                StepValidator::can_advance(state.step(), draft, catalog)?;
                let action = match saga {
                    ProvisioningSaga::CreatingDevice => OnboardingAction::CreateDevice {
                        draft: draft.clone(),
                    },
                    // Retry after a failed script request must not create the device again.
                    ProvisioningSaga::RequestingScript { device } => {
                        OnboardingAction::RequestScript {
                            device_id: device.id().clone(),
                            mac_address: draft.mac_address.clone(),
                        }
                    }
                };
                Ok(Transition::with_action(state.clone(), action))
            }
            (S::DeviceInfo { draft }, OnboardingEvent::Back) => Ok(Transition::to(
                S::VendorSelect {
                    draft: draft.clone(),
                },
            )),
            (
                S::Review {
                    draft,
                    saga: ProvisioningSaga::CreatingDevice,
                },
                OnboardingEvent::Back,
            ) => Ok(Transition::to(S::DeviceInfo {
                draft: draft.clone(),
            })),
            (
                S::Review {
                    draft,
                    saga: ProvisioningSaga::CreatingDevice,
                },
                OnboardingEvent::DeviceCreated { device },
            ) => {
                let action = OnboardingAction::RequestScript {
                    device_id: device.id().clone(),
                    mac_address: draft.mac_address.clone(),
                };
                Ok(Transition::with_action(
                    S::Review {
                        draft: draft.clone(),
                        saga: ProvisioningSaga::RequestingScript { device },
                    },
                    action,
                ))
            }
            (
                S::Review {
                    saga: ProvisioningSaga::RequestingScript { device },
                    ..
                },
                OnboardingEvent::ScriptIssued { artifact },
            ) => Ok(Transition::to(S::ScriptReady {
                device: device.clone(),
                artifact,
            })),
            (S::ScriptReady { .. }, OnboardingEvent::Finish) => Ok(Transition::to(S::Completed)),
            (S::Completed, event @ OnboardingEvent::Cancel) => {
                Err(TransitionError::InvalidTransition {
                    step: state.step(),
                    event: event.name(),
                })
            }
            (_, OnboardingEvent::Cancel) => Ok(Transition::to(S::Cancelled)),
            (state, event) => {
                trace!(step = %state.step(), event = event.name(), "onboarding event not applicable");
                Err(TransitionError::InvalidTransition {
                    step: state.step(),
                    event: event.name(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{DeviceDraft, DraftEdit, ProvisionedDevice, ScriptArtifact};
    use crate::ids::{DeviceId, ModelId, VendorId};
    use crate::onboarding::WizardStep;

    fn catalog() -> DeviceCatalog {
        DeviceCatalog::default()
    }

    fn ready_draft() -> DeviceDraft {
        DeviceDraft {
            vendor: Some(VendorId::new("mikrotik")),
            model: Some(ModelId::new("routerboard")),
            name: "FW-1".into(),
            mac_address: "AA:BB:CC:11:22:33".into(),
            location: None,
            description: None,
        }
    }

    fn artifact() -> ScriptArtifact {
        ScriptArtifact {
            script_text: "# script".into(),
            filename: "fw-1.rsc".into(),
            wireguard_info: None,
        }
    }

    fn step(state: &OnboardingState, event: OnboardingEvent) -> Transition {
        OnboardingStateMachine::transition(state, event, &catalog()).unwrap()
    }

    #[test]
    fn onboarding_state_machine_select_disabled_vendor_is_rejected() {
        let state = OnboardingState::initial();
        let result = OnboardingStateMachine::transition(
            &state,
            OnboardingEvent::SelectVendor {
                vendor: VendorId::new("watchguard"),
            },
            &catalog(),
        );
        assert_eq!(
            result,
            Err(TransitionError::Validation(ValidationError::VendorDisabled))
        );
    }

    #[test]
    fn onboarding_state_machine_disabled_model_blocks_next() {
        let state = OnboardingState::DeviceInfo {
            draft: DeviceDraft {
                model: None,
                ..ready_draft()
            },
        };
        let t = step(
            &state,
            OnboardingEvent::SelectModel {
                model: ModelId::new("ccr"),
            },
        );
        assert_eq!(t.blocked_by, Some(ValidationError::ModelDisabled));
        assert_eq!(t.next.draft().unwrap().model, Some(ModelId::new("ccr")));

        let result = OnboardingStateMachine::transition(&t.next, OnboardingEvent::Next, &catalog());
        assert_eq!(
            result,
            Err(TransitionError::Validation(ValidationError::ModelDisabled))
        );
    }

    #[test]
    fn onboarding_state_machine_walks_to_review() {
        let state = OnboardingState::initial();
        let t = step(
            &state,
            OnboardingEvent::SelectVendor {
                vendor: VendorId::new("mikrotik"),
            },
        );
        let t = step(&t.next, OnboardingEvent::Next);
        assert_eq!(t.next.step(), WizardStep::DeviceInfo);

        let t = step(
            &t.next,
            OnboardingEvent::SelectModel {
                model: ModelId::new("routerboard"),
            },
        );
        let t = step(&t.next, OnboardingEvent::EditDraft(DraftEdit::Name("FW-1".into())));
        let t = step(
            &t.next,
            OnboardingEvent::EditDraft(DraftEdit::MacAddress("aa:bb:cc:11:22:33".into())),
        );
        let t = step(&t.next, OnboardingEvent::Next);

        assert_eq!(
            t.next,
            OnboardingState::Review {
                draft: ready_draft(),
                saga: ProvisioningSaga::CreatingDevice,
            }
        );
        assert!(t.actions.is_empty());
    }

    #[test]
    fn onboarding_state_machine_next_from_review_requests_create() {
        let state = OnboardingState::Review {
            draft: ready_draft(),
            saga: ProvisioningSaga::CreatingDevice,
        };
        let t = step(&state, OnboardingEvent::Next);
        assert_eq!(t.next, state);
        assert_eq!(
            t.actions,
            vec![OnboardingAction::CreateDevice {
                draft: ready_draft()
            }]
        );
    }

    #[test]
    fn onboarding_state_machine_device_created_requests_script() {
        let state = OnboardingState::Review {
            draft: ready_draft(),
            saga: ProvisioningSaga::CreatingDevice,
        };
        let device = ProvisionedDevice::new(DeviceId::new("dev-1"), ready_draft());
        let t = step(
            &state,
            OnboardingEvent::DeviceCreated {
                device: device.clone(),
            },
        );
        assert_eq!(t.next.provisioned(), Some(&device));
        assert_eq!(
            t.actions,
            vec![OnboardingAction::RequestScript {
                device_id: DeviceId::new("dev-1"),
                mac_address: "AA:BB:CC:11:22:33".into(),
            }]
        );
    }

    #[test]
    fn onboarding_state_machine_retry_with_device_only_requests_script() {
        let device = ProvisionedDevice::new(DeviceId::new("dev-1"), ready_draft());
        let state = OnboardingState::Review {
            draft: ready_draft(),
            saga: ProvisioningSaga::RequestingScript { device },
        };
        let t = step(&state, OnboardingEvent::Next);
        assert!(matches!(
            t.actions.as_slice(),
            [OnboardingAction::RequestScript { device_id, .. }] if device_id.as_str() == "dev-1"
        ));
    }

    #[test]
    fn onboarding_state_machine_back_is_blocked_once_device_exists() {
        let device = ProvisionedDevice::new(DeviceId::new("dev-1"), ready_draft());
        let state = OnboardingState::Review {
            draft: ready_draft(),
            saga: ProvisioningSaga::RequestingScript { device },
        };
        let result = OnboardingStateMachine::transition(&state, OnboardingEvent::Back, &catalog());
        assert_eq!(
            result,
            Err(TransitionError::InvalidTransition {
                step: WizardStep::Review,
                event: "Back",
            })
        );
    }

    #[test]
    fn onboarding_state_machine_back_from_vendor_select_is_invalid() {
        let result = OnboardingStateMachine::transition(
            &OnboardingState::initial(),
            OnboardingEvent::Back,
            &catalog(),
        );
        assert!(matches!(
            result,
            Err(TransitionError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn onboarding_state_machine_script_issued_then_finish() {
        let device = ProvisionedDevice::new(DeviceId::new("dev-1"), ready_draft());
        let state = OnboardingState::Review {
            draft: ready_draft(),
            saga: ProvisioningSaga::RequestingScript { device },
        };
        let t = step(
            &state,
            OnboardingEvent::ScriptIssued {
                artifact: artifact(),
            },
        );
        assert_eq!(t.next.step(), WizardStep::ScriptReady);
        assert_eq!(t.next.artifact(), Some(&artifact()));

        let t = step(&t.next, OnboardingEvent::Finish);
        assert_eq!(t.next, OnboardingState::Completed);
    }

    #[test]
    fn onboarding_state_machine_finish_before_script_ready_is_invalid() {
        let state = OnboardingState::DeviceInfo {
            draft: ready_draft(),
        };
        assert!(
            OnboardingStateMachine::transition(&state, OnboardingEvent::Finish, &catalog())
                .is_err()
        );
    }

    #[test]
    fn onboarding_state_machine_cancel_from_any_open_state() {
        let device = ProvisionedDevice::new(DeviceId::new("dev-1"), ready_draft());
        let states = vec![
            OnboardingState::initial(),
            OnboardingState::DeviceInfo {
                draft: ready_draft(),
            },
            OnboardingState::Review {
                draft: ready_draft(),
                saga: ProvisioningSaga::CreatingDevice,
            },
            OnboardingState::ScriptReady {
                device,
                artifact: artifact(),
            },
            OnboardingState::Cancelled,
        ];
        for state in states {
            let t = step(&state, OnboardingEvent::Cancel);
            assert_eq!(t.next, OnboardingState::Cancelled);
            assert!(t.actions.is_empty());
        }

        assert!(OnboardingStateMachine::transition(
            &OnboardingState::Completed,
            OnboardingEvent::Cancel,
            &catalog()
        )
        .is_err());
    }

    #[test]
    fn onboarding_state_machine_late_results_after_cancel_are_rejected() {
        let device = ProvisionedDevice::new(DeviceId::new("dev-1"), ready_draft());
        let result = OnboardingStateMachine::transition(
            &OnboardingState::Cancelled,
            OnboardingEvent::DeviceCreated { device },
            &catalog(),
        );
        assert!(matches!(
            result,
            Err(TransitionError::InvalidTransition {
                step: WizardStep::Cancelled,
                ..
            })
        ));
    }

    #[test]
    fn onboarding_state_machine_edits_outside_device_info_are_invalid() {
        let state = OnboardingState::Review {
            draft: ready_draft(),
            saga: ProvisioningSaga::CreatingDevice,
        };
        let result = OnboardingStateMachine::transition(
            &state,
            OnboardingEvent::EditDraft(DraftEdit::Name("other".into())),
            &catalog(),
        );
        assert!(matches!(
            result,
            Err(TransitionError::InvalidTransition { .. })
        ));
    }
}
