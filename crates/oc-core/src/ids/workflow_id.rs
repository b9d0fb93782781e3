use serde::{Deserialize, Serialize};

use super::id_macro::impl_id;

/// Identifies one onboarding wizard session in logs and emitted snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkflowId(String);

impl_id!(WorkflowId);

impl WorkflowId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl Default for WorkflowId {
    fn default() -> Self {
        Self::generate()
    }
}
