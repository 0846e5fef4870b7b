use super::{AnthropicMessage, AnthropicRequest, AnthropicResponse};
use crate::{ModelConfig, ProviderKind};
use bcp_error::{BcpResult, ProviderError, ProviderErrorKind};
use bcp_interface::ModelDriver;
use reqwest::Client;
use tracing::{debug, error, instrument};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic API client.
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl AnthropicClient {
    /// Creates a new Anthropic client.
    ///
    /// Requests go to `{base_url}/v1/messages`, defaulting to the public API.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client cannot
    /// be built.
    pub fn new(config: &ModelConfig) -> BcpResult<Self> {
        let api_key = config.require_api_key(ProviderKind::Claude)?.to_string();
        let base_url = config.base_url().as_deref().unwrap_or(ANTHROPIC_API_URL);
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| {
                ProviderError::new(ProviderErrorKind::Http(format!(
                    "Failed to build HTTP client: {}",
                    e
                )))
            })?;
        debug!("Creating new Anthropic client");
        Ok(Self {
            client,
            api_key,
            endpoint: format!("{}/v1/messages", base_url.trim_end_matches('/')),
            model: config.model().clone(),
            temperature: *config.temperature(),
            max_tokens: *config.max_tokens(),
        })
    }

    /// Sends a request to the Anthropic API.
    #[instrument(skip(self, request), fields(model = %request.model()))]
    pub async fn send(&self, request: &AnthropicRequest) -> BcpResult<AnthropicResponse> {
        debug!("Sending request to Anthropic API");

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send request to Anthropic API");
                ProviderError::new(ProviderErrorKind::Http(format!("Request failed: {}", e)))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Anthropic API returned error");
            return Err(ProviderError::new(ProviderErrorKind::Api {
                status: status.as_u16(),
                message: body,
            })
            .into());
        }

        let anthropic_response: AnthropicResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse Anthropic response");
            ProviderError::new(ProviderErrorKind::ResponseParse(format!(
                "Failed to parse response: {}",
                e
            )))
        })?;

        debug!(response_id = %anthropic_response.id(), "Received response from Anthropic");
        Ok(anthropic_response)
    }

    fn build_request(&self, prompt: &str) -> BcpResult<AnthropicRequest> {
        AnthropicRequest::builder()
            .model(self.model.clone())
            .messages(vec![AnthropicMessage::user(prompt)])
            .max_tokens(self.max_tokens)
            .temperature(Some(self.temperature))
            .build()
            .map_err(|e| {
                ProviderError::new(ProviderErrorKind::ResponseParse(format!(
                    "Failed to build request: {}",
                    e
                )))
                .into()
            })
    }
}

#[async_trait::async_trait]
impl ModelDriver for AnthropicClient {
    #[instrument(skip(self, prompt), fields(provider = "claude", model = %self.model))]
    async fn invoke(&self, prompt: &str) -> BcpResult<String> {
        let request = self.build_request(prompt)?;
        let response = self.send(&request).await?;
        Ok(response.joined_text())
    }

    fn provider_name(&self) -> &'static str {
        "claude"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
