use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use tracing::{info, info_span, Instrument};

use oc_core::onboarding::OnboardingOutcome;
use oc_core::ports::ScriptExportPort;

/// Use case for saving an issued provisioning script to disk.
pub struct ExportProvisioningScript {
    exporter: Arc<dyn ScriptExportPort>,
}

impl ExportProvisioningScript {
    pub fn new(exporter: Arc<dyn ScriptExportPort>) -> Self {
        Self { exporter }
    }

    pub async fn execute(&self, outcome: &OnboardingOutcome, dir: &Path) -> anyhow::Result<PathBuf> {
        let span = info_span!(
            "usecase.onboarding.export_script",
            device_id = %outcome.device.id(),
            dir = %dir.display()
        );
        async {
            let path = self
                .exporter
                .export(&outcome.artifact, &outcome.tunnel, dir)
                .await
                .with_context(|| {
                    format!("failed to export provisioning script to {}", dir.display())
                })?;
            info!(path = %path.display(), "provisioning script exported");
            Ok(path)
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mockall::mock;
    use oc_core::device::{DeviceDraft, ProvisionedDevice, ScriptArtifact};
    use oc_core::ids::DeviceId;
    use oc_core::mac::TunnelIdentity;

    mock! {
        pub Exporter {}

        #[async_trait]
        impl ScriptExportPort for Exporter {
            async fn export(
                &self,
                artifact: &ScriptArtifact,
                tunnel: &TunnelIdentity,
                dir: &Path,
            ) -> anyhow::Result<PathBuf>;
        }
    }

    fn outcome() -> OnboardingOutcome {
        OnboardingOutcome {
            device: ProvisionedDevice::new(DeviceId::new("7"), DeviceDraft::default()),
            artifact: ScriptArtifact {
                script_text: "# script".into(),
                filename: "fw-1.rsc".into(),
                wireguard_info: None,
            },
            tunnel: TunnelIdentity::derive("AA:BB:CC:11:22:33").unwrap(),
        }
    }

    #[tokio::test]
    async fn export_provisioning_script_delegates_to_port() {
        let mut exporter = MockExporter::new();
        exporter
            .expect_export()
            .withf(|artifact, tunnel, dir| {
                artifact.filename == "fw-1.rsc"
                    && tunnel.name() == "orcatun_aa_bb_cc_11_22_33"
                    && dir == Path::new("/tmp/out")
            })
            .times(1)
            .returning(|_, _, _| Ok(PathBuf::from("/tmp/out/fw-1.rsc")));

        let use_case = ExportProvisioningScript::new(Arc::new(exporter));
        let path = use_case
            .execute(&outcome(), Path::new("/tmp/out"))
            .await
            .unwrap();

        assert_eq!(path, PathBuf::from("/tmp/out/fw-1.rsc"));
    }

    #[tokio::test]
    async fn export_provisioning_script_adds_context_on_failure() {
        let mut exporter = MockExporter::new();
        exporter
            .expect_export()
            .returning(|_, _, _| Err(anyhow::anyhow!("disk full")));

        let use_case = ExportProvisioningScript::new(Arc::new(exporter));
        let err = use_case
            .execute(&outcome(), Path::new("/tmp/out"))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("/tmp/out"));
        assert_eq!(err.root_cause().to_string(), "disk full");
    }
}
