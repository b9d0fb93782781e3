//! HTTP adapters.

mod provisioning_client;

pub use provisioning_client::{HttpProvisioningClient, HttpProvisioningConfig};
