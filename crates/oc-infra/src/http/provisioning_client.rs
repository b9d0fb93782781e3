//! OrcheNet REST API client.
//!
//! Implements [`ProvisioningClientPort`] with reqwest against
//! `POST /api/devices` and `POST /api/devices/provision-script`.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use oc_core::device::{DeviceRegistration, ScriptArtifact, WireguardInfo};
use oc_core::ids::DeviceId;
use oc_core::ports::{ProvisioningClientPort, RemoteError};

/// Connection settings for the provisioning backend.
#[derive(Debug, Clone)]
pub struct HttpProvisioningConfig {
    /// Backend root, e.g. `http://localhost:8000`.
    pub base_url: String,
    pub timeout: Duration,
}

#[derive(Debug, Serialize)]
struct DeviceDataBody<'a> {
    location: Option<&'a str>,
    description: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct CreateDeviceBody<'a> {
    name: &'a str,
    vendor: Option<&'a str>,
    model: Option<&'a str>,
    mac_address: &'a str,
    check_in_method: &'a str,
    check_in_interval: u32,
    device_data: DeviceDataBody<'a>,
}

impl<'a> From<&'a DeviceRegistration> for CreateDeviceBody<'a> {
    fn from(registration: &'a DeviceRegistration) -> Self {
        Self {
            name: &registration.name,
            vendor: registration.vendor.as_ref().map(|v| v.as_str()),
            model: registration.model.as_ref().map(|m| m.as_str()),
            mac_address: &registration.mac_address,
            check_in_method: &registration.check_in.method,
            check_in_interval: registration.check_in.interval_secs,
            device_data: DeviceDataBody {
                location: registration.device_data.location.as_deref(),
                description: registration.device_data.description.as_deref(),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct CreateDeviceResponse {
    id: Value,
}

#[derive(Debug, Serialize)]
struct ProvisionScriptBody<'a> {
    device_id: Value,
    mac_address: &'a str,
}

#[derive(Debug, Deserialize)]
struct ProvisionScriptResponse {
    script: String,
    filename: String,
    #[serde(default)]
    wireguard_info: Option<WireguardInfo>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<Value>,
}

impl ErrorBody {
    /// `detail` is a string for handled errors and a list of `{msg}` objects
    /// for request validation errors.
    fn into_text(self) -> Option<String> {
        match self.detail? {
            Value::String(text) => Some(text),
            Value::Array(items) => {
                let messages: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(Value::as_str))
                    .collect();
                (!messages.is_empty()).then(|| messages.join("; "))
            }
            _ => None,
        }
    }
}

/// reqwest-backed provisioning client.
#[derive(Debug, Clone)]
pub struct HttpProvisioningClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpProvisioningClient {
    pub fn new(config: &HttpProvisioningConfig) -> anyhow::Result<Self> {
        if config.base_url.trim().is_empty() {
            anyhow::bail!("provisioning API base URL is empty");
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;

        let base_url = config.base_url.trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/api/devices{}", self.base_url, path)
    }

    async fn post<B, R>(&self, url: &str, body: &B) -> Result<R, RemoteError>
    where
        B: Serialize + ?Sized,
        R: for<'de> Deserialize<'de>,
    {
        debug!(url, "POST");
        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| RemoteError::transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Self::status_error(resp).await);
        }

        resp.json::<R>().await.map_err(|e| {
            RemoteError::transport(format!("Invalid response from {url}: {e}"))
        })
    }

    async fn status_error(resp: reqwest::Response) -> RemoteError {
        let status = resp.status();
        let detail = resp
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(ErrorBody::into_text)
            .or_else(|| status.canonical_reason().map(str::to_string));
        RemoteError::http(status.as_u16(), detail)
    }

    /// The backend keys devices by integer; numeric ids go back as JSON numbers.
    fn device_id_value(id: &DeviceId) -> Value {
        match id.as_number() {
            Some(number) => Value::from(number),
            None => Value::from(id.as_str()),
        }
    }
}

#[async_trait]
impl ProvisioningClientPort for HttpProvisioningClient {
    async fn create_device(
        &self,
        registration: &DeviceRegistration,
    ) -> Result<DeviceId, RemoteError> {
        let body = CreateDeviceBody::from(registration);
        let created: CreateDeviceResponse = self.post(&self.api_url(""), &body).await?;

        match created.id {
            Value::Number(number) => Ok(DeviceId::new(number.to_string())),
            Value::String(id) if !id.is_empty() => Ok(DeviceId::new(id)),
            other => Err(RemoteError::transport(format!(
                "Invalid device id in response: {other}"
            ))),
        }
    }

    async fn request_script(
        &self,
        device_id: &DeviceId,
        mac_address: &str,
    ) -> Result<ScriptArtifact, RemoteError> {
        let body = ProvisionScriptBody {
            device_id: Self::device_id_value(device_id),
            mac_address,
        };
        let issued: ProvisionScriptResponse =
            self.post(&self.api_url("/provision-script"), &body).await?;

        Ok(ScriptArtifact {
            script_text: issued.script,
            filename: issued.filename,
            wireguard_info: issued.wireguard_info,
        })
    }
}
