use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use super::Transport;
use crate::error::RequestFailure;

/// Talks to the real planning service over HTTP.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport. With `timeout` unset a request waits as long as the
    /// server takes.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("failed to build HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(&self, url: &str, body: &Value) -> Result<Value, RequestFailure> {
        debug!(url, "sending plan_trip request");

        // `.json()` sets `Content-Type: application/json`.
        let resp = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .inspect_err(|e| warn!(url, error = %e, "plan_trip request failed"))?;

        let status = resp.status();
        let text = resp.text().await?;
        debug!(url, %status, bytes = text.len(), "plan_trip response received");

        serde_json::from_str(&text).map_err(|e| {
            warn!(url, %status, error = %e, "plan_trip response is not JSON");
            RequestFailure::from(e)
        })
    }
}
