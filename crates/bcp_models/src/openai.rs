//! OpenAI chat completions driver.

use crate::openai_compat::OpenAiCompatibleClient;
use crate::{ModelConfig, ProviderKind};
use async_trait::async_trait;
use bcp_error::BcpResult;
use bcp_interface::ModelDriver;
use tracing::instrument;

const OPENAI_API_URL: &str = "https://api.openai.com/v1";

/// OpenAI API client.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    inner: OpenAiCompatibleClient,
}

impl OpenAiClient {
    /// Creates a new OpenAI client.
    ///
    /// Uses the configured base URL when present, otherwise the public API.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing.
    pub fn new(config: &ModelConfig) -> BcpResult<Self> {
        let base_url = config.base_url().as_deref().unwrap_or(OPENAI_API_URL);
        let inner = OpenAiCompatibleClient::new(ProviderKind::OpenAi, base_url, config)?;
        Ok(Self { inner })
    }
}

#[async_trait]
impl ModelDriver for OpenAiClient {
    #[instrument(skip(self, prompt), fields(provider = "openai", model = %self.inner.model_name()))]
    async fn invoke(&self, prompt: &str) -> BcpResult<String> {
        self.inner.complete(prompt).await
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn model_name(&self) -> &str {
        self.inner.model_name()
    }
}
