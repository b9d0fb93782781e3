use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::device::ScriptArtifact;
use crate::mac::TunnelIdentity;

/// Writes an issued provisioning script somewhere the operator can pick it up.
#[async_trait]
pub trait ScriptExportPort: Send + Sync {
    /// Returns the path that was written.
    async fn export(
        &self,
        artifact: &ScriptArtifact,
        tunnel: &TunnelIdentity,
        dir: &Path,
    ) -> anyhow::Result<PathBuf>;
}
