//! Platform-managed identity: reads the signed-in principal from `/.auth/me`.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use purchase_core::constants::AUTH_ME_PATH;
use purchase_core::models::{AuthMeResponse, ClientPrincipal};
use purchase_core::FormConfig;

/// Source of the principal established by the hosting platform.
#[async_trait]
pub trait PrincipalSource: Send + Sync {
    /// `Ok(None)` when the platform reports no signed-in principal.
    async fn current_principal(&self) -> Result<Option<ClientPrincipal>>;
}

/// HTTP client for the platform's "who am I" endpoint.
#[derive(Clone, Debug)]
pub struct PrincipalClient {
    client: Client,
    base_url: String,
    session_cookie: Option<String>,
}

impl PrincipalClient {
    pub fn new(
        base_url: String,
        session_cookie: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session_cookie,
        })
    }

    pub fn from_config(config: &FormConfig) -> Result<Self> {
        Self::new(
            config.auth_base_url.clone(),
            config.auth_session_cookie.clone(),
            config.request_timeout_secs,
        )
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, AUTH_ME_PATH)
    }
}

#[async_trait]
impl PrincipalSource for PrincipalClient {
    async fn current_principal(&self) -> Result<Option<ClientPrincipal>> {
        let mut request = self.client.get(self.endpoint());
        if let Some(cookie) = &self.session_cookie {
            request = request.header("Cookie", cookie.as_str());
        }

        let response = request.send().await.context("Failed to send request")?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow::anyhow!(
                "Principal lookup failed with status {}",
                status
            ));
        }

        let body: AuthMeResponse = response
            .json()
            .await
            .context("Failed to parse response as JSON")?;

        Ok(body.client_principal.filter(ClientPrincipal::is_valid))
    }
}
