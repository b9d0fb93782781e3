//! `orchenet onboard`: drives an onboarding session from the terminal.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Args;
use tracing::{info, warn};

use oc_app::{ExportProvisioningScript, OnboardingWorkflow, WorkflowError};
use oc_core::onboarding::{OnboardingOutcome, WizardError, WizardSnapshot, WizardStep};

use crate::bootstrap::{OnboardingDeps, OnboardingSettings};
use crate::prompt::{self, Navigation};
use crate::render::{render_outcome, render_progress, render_review, render_unsaved_script};

#[derive(Debug, Clone, Default, Args)]
pub struct OnboardArgs {
    /// Vendor id, e.g. `mikrotik`
    #[arg(long)]
    pub vendor: Option<String>,

    /// Model id, e.g. `routerboard`
    #[arg(long)]
    pub model: Option<String>,

    /// Device name
    #[arg(long)]
    pub name: Option<String>,

    /// Device MAC address (XX:XX:XX:XX:XX:XX)
    #[arg(long)]
    pub mac: Option<String>,

    #[arg(long)]
    pub location: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Where to write the provisioning script (defaults to `[output] script_dir`)
    #[arg(long, short = 'o')]
    pub output_dir: Option<PathBuf>,

    /// Take everything from flags and fail on the first error
    #[arg(long)]
    pub non_interactive: bool,
}

pub async fn run(
    deps: OnboardingDeps,
    settings: &OnboardingSettings,
    args: OnboardArgs,
) -> anyhow::Result<()> {
    let workflow = deps.workflow.as_ref();
    info!(workflow_id = %workflow.workflow_id(), non_interactive = args.non_interactive, "onboarding started");

    let outcome = if args.non_interactive {
        drive_non_interactive(workflow, &args).await?
    } else {
        match drive_interactive(workflow, &args).await? {
            Some(outcome) => outcome,
            None => {
                println!("Onboarding cancelled.");
                return Ok(());
            }
        }
    };

    let dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| settings.script_dir.clone());

    println!();
    print!("{}", save_and_report(&deps.export_script, &outcome, &dir).await);
    Ok(())
}

/// Writes the script and builds the final summary. The device already exists
/// remotely, so a failed write still shows the script instead of failing.
async fn save_and_report(
    export_script: &ExportProvisioningScript,
    outcome: &OnboardingOutcome,
    dir: &Path,
) -> String {
    match export_script.execute(outcome, dir).await {
        Ok(saved_to) => render_outcome(outcome, Some(&saved_to)),
        Err(err) => {
            warn!(device_id = %outcome.device.id(), error = ?err, "provisioning script not saved");
            let mut text = render_outcome(outcome, None);
            text.push_str(&render_unsaved_script(&outcome.artifact, &format!("{err:#}")));
            text
        }
    }
}

/// Fills the draft from the flags and advances until the script is issued.
async fn drive_non_interactive(
    workflow: &OnboardingWorkflow,
    args: &OnboardArgs,
) -> anyhow::Result<OnboardingOutcome> {
    let vendor = args
        .vendor
        .as_deref()
        .context("--vendor is required with --non-interactive")?;
    workflow.select_vendor(vendor).await?;
    advance(workflow).await?;

    if let Some(model) = args.model.as_deref() {
        workflow.select_model(model).await?;
    }
    workflow.set_name(args.name.clone().unwrap_or_default()).await?;
    workflow
        .set_mac_address(args.mac.clone().unwrap_or_default())
        .await?;
    workflow.set_location(args.location.clone()).await?;
    workflow.set_description(args.description.clone()).await?;
    advance(workflow).await?;

    let snapshot = advance(workflow).await?;
    if snapshot.step() != WizardStep::ScriptReady {
        bail!("Onboarding stopped at step {}", snapshot.step());
    }
    Ok(workflow.finish().await?)
}

async fn advance(workflow: &OnboardingWorkflow) -> anyhow::Result<WizardSnapshot> {
    let snapshot = workflow.next().await?;
    if let Some(err) = &snapshot.error {
        bail!("{}: {err}", snapshot.step());
    }
    Ok(snapshot)
}

/// Step-by-step prompts. `None` when the user cancels.
async fn drive_interactive(
    workflow: &OnboardingWorkflow,
    args: &OnboardArgs,
) -> anyhow::Result<Option<OnboardingOutcome>> {
    let catalog = workflow.catalog();
    if catalog.is_empty() {
        bail!("The device catalog is empty");
    }

    loop {
        let snapshot = workflow.snapshot().await;
        println!();
        println!("{}", render_progress(&snapshot));
        if let Some(err) = &snapshot.error {
            println!("  ! {err}");
        }

        let navigation = match snapshot.step() {
            WizardStep::VendorSelect => {
                let draft = snapshot.draft().cloned().unwrap_or_default();
                let current = draft
                    .vendor
                    .as_ref()
                    .map(|v| v.as_str().to_string())
                    .or_else(|| args.vendor.clone());
                let vendors = catalog.vendors();
                let index = current
                    .as_deref()
                    .and_then(|id| vendors.iter().position(|v| v.id.as_str() == id));
                let choice = prompt::prompt_vendor(vendors, index)?;
                if !accepted(workflow.select_vendor(vendors[choice].id.clone()).await)? {
                    continue;
                }
                prompt::prompt_navigation(&[Navigation::Next, Navigation::Cancel], "Next")?
            }
            WizardStep::DeviceInfo => {
                if !fill_device_info(workflow, &snapshot, args).await? {
                    continue;
                }
                prompt::prompt_navigation(
                    &[Navigation::Next, Navigation::Back, Navigation::Cancel],
                    "Next",
                )?
            }
            WizardStep::Review => {
                if let Some(draft) = snapshot.draft() {
                    println!("{}", render_review(draft, catalog));
                }
                let remote_failure = matches!(snapshot.error, Some(WizardError::Remote(_)));
                if remote_failure || snapshot.provisioned().is_some() {
                    prompt::prompt_navigation(&[Navigation::Next, Navigation::Cancel], "Retry")?
                } else {
                    prompt::prompt_navigation(
                        &[Navigation::Next, Navigation::Back, Navigation::Cancel],
                        "Create device",
                    )?
                }
            }
            WizardStep::ScriptReady => return Ok(Some(workflow.finish().await?)),
            WizardStep::Cancelled => return Ok(None),
            WizardStep::Completed => bail!("Onboarding session already completed"),
        };

        match navigation {
            Navigation::Next => {
                if snapshot.step() == WizardStep::Review {
                    println!("Provisioning device...");
                }
                workflow.next().await?;
            }
            Navigation::Back => {
                workflow.back().await?;
            }
            Navigation::Cancel => {
                workflow.cancel().await?;
            }
        }
    }
}

/// Prompts for the model and the free-text fields. Returns `false` when a
/// selection was rejected and the step has to be shown again.
async fn fill_device_info(
    workflow: &OnboardingWorkflow,
    snapshot: &WizardSnapshot,
    args: &OnboardArgs,
) -> anyhow::Result<bool> {
    let draft = snapshot.draft().cloned().unwrap_or_default();
    let vendor = draft
        .vendor
        .as_ref()
        .and_then(|id| workflow.catalog().vendor(id));

    if let Some(vendor) = vendor.filter(|v| !v.models.is_empty()) {
        let current = draft
            .model
            .as_ref()
            .map(|m| m.as_str().to_string())
            .or_else(|| args.model.clone());
        let index = current
            .as_deref()
            .and_then(|id| vendor.models.iter().position(|m| m.id.as_str() == id));
        let choice = prompt::prompt_model(&vendor.models, index)?;
        if !accepted(workflow.select_model(vendor.models[choice].id.clone()).await)? {
            return Ok(false);
        }
    }

    let name = prompt::prompt_name(&prefill(&draft.name, args.name.as_deref()))?;
    workflow.set_name(name).await?;

    let mac_address =
        prompt::prompt_mac_address(&prefill(&draft.mac_address, args.mac.as_deref()))?;
    workflow.set_mac_address(mac_address).await?;

    let location = prompt::prompt_optional(
        "Location",
        draft.location.as_deref().or(args.location.as_deref()),
    )?;
    workflow.set_location(location).await?;

    let description = prompt::prompt_optional(
        "Description",
        draft.description.as_deref().or(args.description.as_deref()),
    )?;
    workflow.set_description(description).await?;

    Ok(true)
}

fn prefill(current: &str, flag: Option<&str>) -> String {
    if current.is_empty() {
        flag.unwrap_or_default().to_string()
    } else {
        current.to_string()
    }
}

/// A rejected selection is already recorded in the snapshot.
fn accepted(result: Result<WizardSnapshot, WorkflowError>) -> anyhow::Result<bool> {
    match result {
        Ok(_) => Ok(true),
        Err(WorkflowError::InvalidSelection(_)) => Ok(false),
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use oc_core::catalog::DeviceCatalog;
    use oc_core::device::{CheckInPolicy, DeviceRegistration, ScriptArtifact};
    use oc_core::ids::DeviceId;
    use oc_core::mac::TunnelIdentity;
    use oc_core::ports::{
        NoopOnboardingEventPort, ProvisioningClientPort, RemoteError, ScriptExportPort,
    };

    struct FixedBackend {
        fail_create: bool,
    }

    #[async_trait]
    impl ProvisioningClientPort for FixedBackend {
        async fn create_device(
            &self,
            _registration: &DeviceRegistration,
        ) -> Result<DeviceId, RemoteError> {
            if self.fail_create {
                return Err(RemoteError::http(
                    409,
                    Some("Device with this MAC already exists".into()),
                ));
            }
            Ok(DeviceId::new("5"))
        }

        async fn request_script(
            &self,
            _device_id: &DeviceId,
            _mac_address: &str,
        ) -> Result<ScriptArtifact, RemoteError> {
            Ok(ScriptArtifact {
                script_text: "# provisioning".into(),
                filename: "orchenet_fw-1.rsc".into(),
                wireguard_info: None,
            })
        }
    }

    fn workflow(fail_create: bool) -> OnboardingWorkflow {
        OnboardingWorkflow::new(
            Arc::new(DeviceCatalog::default()),
            CheckInPolicy::default(),
            Arc::new(FixedBackend { fail_create }),
            Arc::new(NoopOnboardingEventPort),
        )
    }

    fn args() -> OnboardArgs {
        OnboardArgs {
            vendor: Some("mikrotik".into()),
            model: Some("routerboard".into()),
            name: Some("FW-1".into()),
            mac: Some("aa:bb:cc:11:22:33".into()),
            location: Some("HQ".into()),
            non_interactive: true,
            ..OnboardArgs::default()
        }
    }

    #[tokio::test]
    async fn test_non_interactive_onboarding_completes() {
        let workflow = workflow(false);
        let outcome = drive_non_interactive(&workflow, &args()).await.unwrap();

        assert_eq!(outcome.device.id().as_str(), "5");
        assert_eq!(outcome.tunnel.name(), "orcatun_aa_bb_cc_11_22_33");
        assert_eq!(workflow.snapshot().await.step(), WizardStep::Completed);
    }

    #[tokio::test]
    async fn test_non_interactive_requires_vendor() {
        let workflow = workflow(false);
        let mut args = args();
        args.vendor = None;

        let err = drive_non_interactive(&workflow, &args).await.unwrap_err();
        assert!(err.to_string().contains("--vendor is required"));
    }

    #[tokio::test]
    async fn test_non_interactive_stops_on_validation_error() {
        let workflow = workflow(false);
        let mut args = args();
        args.mac = Some("not-a-mac".into());

        let err = drive_non_interactive(&workflow, &args).await.unwrap_err();
        assert!(err.to_string().contains("Invalid MAC address format"));
        assert_eq!(workflow.snapshot().await.step(), WizardStep::DeviceInfo);
    }

    #[tokio::test]
    async fn test_non_interactive_reports_backend_detail() {
        let workflow = workflow(true);

        let err = drive_non_interactive(&workflow, &args()).await.unwrap_err();
        assert!(err.to_string().contains("Device with this MAC already exists"));
        assert_eq!(workflow.snapshot().await.step(), WizardStep::Review);
    }

    #[tokio::test]
    async fn test_non_interactive_rejects_disabled_model() {
        let workflow = workflow(false);
        let mut args = args();
        args.model = Some("hex".into());

        let err = drive_non_interactive(&workflow, &args).await.unwrap_err();
        assert!(err.to_string().contains("not supported yet"));
    }

    struct ReadOnlyExporter;

    #[async_trait]
    impl ScriptExportPort for ReadOnlyExporter {
        async fn export(
            &self,
            _artifact: &ScriptArtifact,
            _tunnel: &TunnelIdentity,
            dir: &Path,
        ) -> anyhow::Result<PathBuf> {
            anyhow::bail!("{} is read-only", dir.display())
        }
    }

    #[tokio::test]
    async fn test_failed_save_still_shows_issued_script() {
        let workflow = workflow(false);
        let outcome = drive_non_interactive(&workflow, &args()).await.unwrap();
        let export_script = ExportProvisioningScript::new(Arc::new(ReadOnlyExporter));

        let text = save_and_report(&export_script, &outcome, Path::new("/ro")).await;

        assert!(text.contains("id 5"));
        assert!(text.contains("orcatun_aa_bb_cc_11_22_33"));
        assert!(text.contains("Run: /import orchenet_fw-1.rsc"));
        assert!(text.contains("/ro is read-only"));
        assert!(text.contains("# provisioning"));
        assert!(!text.contains("saved to"));
    }

    #[test]
    fn test_prefill_prefers_draft_value() {
        assert_eq!(prefill("FW-2", Some("FW-1")), "FW-2");
        assert_eq!(prefill("", Some("FW-1")), "FW-1");
        assert_eq!(prefill("", None), "");
    }
}
