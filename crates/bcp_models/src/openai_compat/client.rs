//! HTTP client for OpenAI-compatible chat completion endpoints.

use super::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use crate::{ModelConfig, ProviderKind};
use bcp_error::{BcpResult, ProviderError, ProviderErrorKind};
use reqwest::Client;
use tracing::{debug, error, instrument};

/// Client for any endpoint speaking the OpenAI chat completions protocol.
///
/// Used directly by the OpenAI and Flow drivers, which only differ in
/// endpoint and provider name.
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleClient {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    provider: ProviderKind,
}

impl OpenAiCompatibleClient {
    /// Creates a client posting to `{base_url}/chat/completions`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client cannot
    /// be built.
    #[instrument(skip(config), fields(model = %config.model()))]
    pub fn new(provider: ProviderKind, base_url: &str, config: &ModelConfig) -> BcpResult<Self> {
        let api_key = config.require_api_key(provider)?.to_string();
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| {
                ProviderError::new(ProviderErrorKind::Http(format!(
                    "Failed to build HTTP client: {}",
                    e
                )))
            })?;

        let endpoint = format!("{}/chat/completions", base_url.trim_end_matches('/'));
        debug!(%endpoint, provider = %provider, "Creating OpenAI-compatible client");

        Ok(Self {
            client,
            api_key,
            endpoint,
            model: config.model().clone(),
            temperature: *config.temperature(),
            max_tokens: *config.max_tokens(),
            provider,
        })
    }

    /// Full URL requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Model identifier.
    pub fn model_name(&self) -> &str {
        &self.model
    }

    /// Send a single user message and return the first choice's text.
    #[instrument(skip(self, prompt), fields(provider = %self.provider, model = %self.model, prompt_len = prompt.len()))]
    pub async fn complete(&self, prompt: &str) -> BcpResult<String> {
        let request = ChatCompletionRequest::builder()
            .model(self.model.clone())
            .messages(vec![ChatMessage::user(prompt)])
            .temperature(self.temperature)
            .max_tokens(Some(self.max_tokens))
            .build()
            .map_err(|e| {
                ProviderError::new(ProviderErrorKind::ResponseParse(format!(
                    "Failed to build request: {}",
                    e
                )))
            })?;

        debug!("Sending chat completion request");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send chat completion request");
                ProviderError::new(ProviderErrorKind::Http(format!("Request failed: {}", e)))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Chat completion endpoint returned error");
            return Err(ProviderError::new(ProviderErrorKind::Api {
                status: status.as_u16(),
                message: body,
            })
            .into());
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse chat completion response");
            ProviderError::new(ProviderErrorKind::ResponseParse(e.to_string()))
        })?;

        let text = completion.first_text().ok_or_else(|| {
            ProviderError::new(ProviderErrorKind::ResponseParse(
                "response contained no choices".to_string(),
            ))
        })?;

        debug!(response_len = text.len(), "Received chat completion");
        Ok(text.to_string())
    }
}
