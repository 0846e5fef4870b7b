//! Flow gateway driver.
//!
//! Flow exposes an OpenAI-compatible chat completions endpoint behind an
//! organisation-specific base URL, so there is no public default.

use crate::openai_compat::OpenAiCompatibleClient;
use crate::{ModelConfig, ProviderKind};
use async_trait::async_trait;
use bcp_error::{BcpResult, ProviderError, ProviderErrorKind};
use bcp_interface::ModelDriver;
use tracing::instrument;

/// Flow gateway client.
#[derive(Debug, Clone)]
pub struct FlowClient {
    inner: OpenAiCompatibleClient,
}

impl FlowClient {
    /// Creates a new Flow client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL or API key is missing.
    pub fn new(config: &ModelConfig) -> BcpResult<Self> {
        let base_url = config.base_url().as_deref().ok_or_else(|| {
            ProviderError::new(ProviderErrorKind::MissingCredential(
                "no base_url configured for provider 'flow'".to_string(),
            ))
        })?;
        let inner = OpenAiCompatibleClient::new(ProviderKind::Flow, base_url, config)?;
        Ok(Self { inner })
    }
}

#[async_trait]
impl ModelDriver for FlowClient {
    #[instrument(skip(self, prompt), fields(provider = "flow", model = %self.inner.model_name()))]
    async fn invoke(&self, prompt: &str) -> BcpResult<String> {
        self.inner.complete(prompt).await
    }

    fn provider_name(&self) -> &'static str {
        "flow"
    }

    fn model_name(&self) -> &str {
        self.inner.model_name()
    }
}
