//! File-based script exporter
//!
//! Writes an issued provisioning script into a directory, the terminal
//! counterpart of a browser download.

use std::path::{Component, Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use oc_core::device::ScriptArtifact;
use oc_core::mac::TunnelIdentity;
use oc_core::ports::ScriptExportPort;

#[derive(Debug, Default, Clone)]
pub struct FsScriptExporter;

impl FsScriptExporter {
    pub fn new() -> Self {
        Self
    }

    /// Reduces the backend filename to a plain file name inside `dir`.
    ///
    /// Anything that would leave the directory falls back to the
    /// tunnel-derived name.
    fn file_name(artifact: &ScriptArtifact, tunnel: &TunnelIdentity) -> String {
        let raw = artifact.filename.trim();
        let candidate = Path::new(raw);
        let mut components = candidate.components();

        let plain = match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) => name.to_str().map(str::to_string),
            _ => None,
        };

        match plain {
            Some(name) if !name.is_empty() => name,
            _ => {
                if !raw.is_empty() {
                    warn!(filename = raw, "ignoring unsafe script filename from backend");
                }
                tunnel.script_filename()
            }
        }
    }
}

#[async_trait]
impl ScriptExportPort for FsScriptExporter {
    async fn export(
        &self,
        artifact: &ScriptArtifact,
        tunnel: &TunnelIdentity,
        dir: &Path,
    ) -> anyhow::Result<PathBuf> {
        fs::create_dir_all(dir)
            .await
            .with_context(|| format!("Failed to create script directory {}", dir.display()))?;

        let path = dir.join(Self::file_name(artifact, tunnel));
        debug!(path = %path.display(), "writing provisioning script");

        let mut file = fs::File::create(&path)
            .await
            .with_context(|| format!("Failed to create script file {}", path.display()))?;
        file.write_all(artifact.script_text.as_bytes())
            .await
            .with_context(|| format!("Failed to write script file {}", path.display()))?;
        file.sync_all()
            .await
            .with_context(|| format!("Failed to sync script file {}", path.display()))?;

        Ok(path)
    }
}
