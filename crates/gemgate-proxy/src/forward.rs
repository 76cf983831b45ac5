//! Forwarding prompts to the upstream `generateContent` endpoint.
//!
//! One prompt becomes exactly one HTTPS POST. There is no retry, no backoff
//! and no timeout beyond what the transport itself imposes.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;

use gemgate_core::{
    ForwardError, GenerateContentRequest, GenerateContentResponse, Prompt, PromptForwarder,
    UpstreamConfig,
};

/// [`PromptForwarder`] backed by reqwest.
///
/// The client keeps no idle connections, so the upstream connection is
/// released when each call returns, whichever way it returns.
#[derive(Debug, Clone)]
pub struct GeminiForwarder {
    client: Client,
    config: UpstreamConfig,
}

impl GeminiForwarder {
    /// Create a forwarder for the given upstream.
    pub fn new(config: UpstreamConfig) -> reqwest::Result<Self> {
        let client = Client::builder()
            .pool_max_idle_per_host(0)
            .user_agent(concat!("gemgate/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::with_client(client, config))
    }

    /// Create a forwarder around an existing client.
    #[must_use]
    pub const fn with_client(client: Client, config: UpstreamConfig) -> Self {
        Self { client, config }
    }

    /// The upstream this forwarder talks to.
    #[must_use]
    pub const fn config(&self) -> &UpstreamConfig {
        &self.config
    }
}

/// Transport errors carry the request URL, which includes the key.
fn transport_error(err: reqwest::Error) -> ForwardError {
    ForwardError::Transport(err.without_url().to_string())
}

#[async_trait]
impl PromptForwarder for GeminiForwarder {
    async fn forward(&self, prompt: &Prompt) -> Result<String, ForwardError> {
        let Some(api_key) = self.config.api_key() else {
            debug!("Refusing to forward prompt: no API key configured");
            return Err(ForwardError::MissingApiKey);
        };

        let url = self.config.endpoint_url();
        debug!(upstream = %url, model = %self.config.model(), "Forwarding prompt");

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .json(&GenerateContentRequest::from_prompt(prompt.as_str()))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(transport_error)?;

        if status != StatusCode::OK {
            debug!(status = %status.as_u16(), "Upstream request failed");
            return Err(ForwardError::UpstreamStatus {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        debug!(bytes = body.len(), "Upstream response received");
        GenerateContentResponse::from_slice(&body)?.into_answer()
    }
}
