use std::fmt;

use serde::{Deserialize, Serialize};

/// Shown when the backend gave no usable reason.
pub const FALLBACK_DETAIL: &str = "Failed to create device. Please try again.";

/// Failure of a call to the provisioning backend.
///
/// `status` is `None` when no HTTP response was received at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteError {
    pub status: Option<u16>,
    pub detail: Option<String>,
}

impl RemoteError {
    pub fn http(status: u16, detail: Option<String>) -> Self {
        Self {
            status: Some(status),
            detail,
        }
    }

    pub fn transport(detail: impl Into<String>) -> Self {
        Self {
            status: None,
            detail: Some(detail.into()),
        }
    }

    /// Text for the user; blank details fall back to a generic message.
    pub fn message(&self) -> &str {
        self.detail
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or(FALLBACK_DETAIL)
    }

    pub fn is_transport(&self) -> bool {
        self.status.is_none()
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for RemoteError {}
