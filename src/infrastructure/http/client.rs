//! Thin JSON client shared by all webhook gateways.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use super::error::GatewayError;

/// Joins endpoint paths onto a base URL and exchanges JSON.
#[derive(Clone)]
pub struct WebhookClient {
    http: Client,
    base: Url,
}

impl WebhookClient {
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidUrl`] if `base_url` is not an absolute
    /// http(s) URL, or [`GatewayError::Transport`] if the TLS backend cannot
    /// be initialised.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, GatewayError> {
        let http = Client::builder().timeout(timeout).build()?;
        Self::with_client(http, base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> Result<Self, GatewayError> {
        let mut base =
            Url::parse(base_url).map_err(|e| GatewayError::InvalidUrl(format!("{base_url}: {e}")))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(GatewayError::InvalidUrl(format!(
                "{base_url}: scheme must be http or https"
            )));
        }
        // Url::join replaces the last segment unless the base ends with '/'.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { http, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub fn endpoint(&self, path: &str) -> Result<Url, GatewayError> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|e| GatewayError::InvalidUrl(format!("{path}: {e}")))
    }

    pub async fn get_json(&self, path: &str) -> Result<Value, GatewayError> {
        let url = self.endpoint(path)?;
        debug!(%url, "GET webhook");
        let response = self.http.get(url).send().await?;
        read_json(response).await
    }

    pub async fn post_json<B>(&self, path: &str, body: &B) -> Result<Value, GatewayError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(path)?;
        debug!(%url, "POST webhook");
        let response = self.http.post(url).json(body).send().await?;
        read_json(response).await
    }
}

/// Empty bodies read as `null`; some webhooks answer 200 with nothing.
async fn read_json(response: Response) -> Result<Value, GatewayError> {
    let status = response.status();
    let url = response.url().clone();
    let body = response.text().await?;

    if !status.is_success() {
        warn!(%url, status = status.as_u16(), "Webhook returned error status");
        return Err(GatewayError::Status { status, body });
    }

    if body.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(&body).map_err(|e| GatewayError::decode(format!("{url}: {e}")))
}
