//! Infrastructure adapters for OrcheNet onboarding.
//!
//! Implementations of the `oc-core` ports against the OrcheNet REST API and
//! the local filesystem.

pub mod fs;
pub mod http;

pub use fs::FsScriptExporter;
pub use http::{HttpProvisioningClient, HttpProvisioningConfig};
