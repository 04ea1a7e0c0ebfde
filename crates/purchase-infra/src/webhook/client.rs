use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use purchase_core::models::SubmissionRecord;
use purchase_core::{FormConfig, FormError, FormResult};

use super::SubmissionSink;

/// Configuration for the webhook client
#[derive(Clone, Debug)]
pub struct WebhookClientConfig {
    pub url: String,
    pub timeout_seconds: u64,
}

impl From<&FormConfig> for WebhookClientConfig {
    fn from(config: &FormConfig) -> Self {
        Self {
            url: config.webhook_url.clone(),
            timeout_seconds: config.request_timeout_secs,
        }
    }
}

/// Response of a delivered submission
#[derive(Debug, Clone)]
pub struct WebhookResponse {
    pub status_code: u16,
    pub body: String,
}

/// Posts submission records to the workflow webhook as JSON.
#[derive(Clone, Debug)]
pub struct WebhookClient {
    http_client: Client,
    config: WebhookClientConfig,
}

impl WebhookClient {
    pub fn new(config: WebhookClientConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create HTTP client for webhook")?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Send one submission. 2xx is success; any other status or a transport
    /// failure is returned as `FormError::Transport`.
    #[tracing::instrument(skip(self, record), fields(documents = record.documents.len()))]
    pub async fn send(&self, record: &SubmissionRecord) -> FormResult<WebhookResponse> {
        let body =
            serde_json::to_vec(record).map_err(|e| FormError::serialization("submission", e))?;

        let response = self
            .http_client
            .post(&self.config.url)
            .header("Content-Type", "application/json")
            .header(
                "User-Agent",
                concat!("purchase-form/", env!("CARGO_PKG_VERSION")),
            )
            .body(body)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Webhook request failed before a response");
                FormError::network(e.to_string())
            })?;

        let status_code = response.status().as_u16();
        let response_body = response
            .text()
            .await
            .unwrap_or_else(|_| String::from("Failed to read response body"));

        if (200..300).contains(&status_code) {
            tracing::info!(status = status_code, "Submission delivered");
            Ok(WebhookResponse {
                status_code,
                body: response_body,
            })
        } else {
            tracing::warn!(
                status = status_code,
                body = %response_body,
                "Webhook returned non-2xx status"
            );
            Err(FormError::http_status(status_code, response_body))
        }
    }
}

#[async_trait]
impl SubmissionSink for WebhookClient {
    async fn submit(&self, record: SubmissionRecord) -> FormResult<()> {
        self.send(&record).await.map(|_| ())
    }
}
