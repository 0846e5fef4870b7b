//! Provider selection and per-provider settings.

use bcp_error::{BcpResult, ProviderError, ProviderErrorKind};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// Supported LLM providers.
///
/// Parsing is case-insensitive and accepts `anthropic` as an alias for `claude`.
///
/// # Examples
///
/// ```
/// use bcp_models::ProviderKind;
///
/// assert_eq!(ProviderKind::parse("OpenAI").unwrap(), ProviderKind::OpenAi);
/// assert_eq!(ProviderKind::parse("anthropic").unwrap(), ProviderKind::Claude);
/// assert!(ProviderKind::parse("gemini").is_err());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum ProviderKind {
    /// OpenAI chat completions
    #[default]
    #[serde(rename = "openai")]
    #[strum(serialize = "openai")]
    OpenAi,
    /// Anthropic Claude messages
    #[serde(rename = "claude", alias = "anthropic")]
    #[strum(to_string = "claude", serialize = "anthropic")]
    Claude,
    /// Flow OpenAI-compatible gateway
    #[serde(rename = "flow")]
    #[strum(serialize = "flow")]
    Flow,
}

impl ProviderKind {
    /// Parse a provider name, failing with `ProviderErrorKind::Unsupported`.
    #[track_caller]
    pub fn parse(name: &str) -> BcpResult<Self> {
        Self::from_str(name.trim())
            .map_err(|_| ProviderError::new(ProviderErrorKind::Unsupported(name.to_string())).into())
    }
}

/// Connection and sampling settings for one provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(default)]
pub struct ModelConfig {
    /// API key; required by every provider
    api_key: Option<String>,
    /// Model identifier
    model: String,
    /// Sampling temperature
    temperature: f32,
    /// Maximum tokens to generate
    max_tokens: u32,
    /// Base URL override (required for Flow)
    base_url: Option<String>,
    /// Request timeout in seconds
    timeout_secs: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: String::new(),
            temperature: 0.0,
            max_tokens: 4096,
            base_url: None,
            timeout_secs: 120,
        }
    }
}

impl ModelConfig {
    /// Defaults for OpenAI.
    pub fn openai_defaults() -> Self {
        Self::default().with_model("gpt-4o-2024-05-13")
    }

    /// Defaults for Anthropic Claude.
    pub fn anthropic_defaults() -> Self {
        Self::default().with_model("claude-3-sonnet-20240229-v1:0")
    }

    /// Defaults for the Flow gateway.
    pub fn flow_defaults() -> Self {
        Self::default().with_model("gpt-4o")
    }

    /// Builder method to set the API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Builder method to set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Builder method to set the temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Builder method to set the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Builder method to set the request timeout.
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Fill the API key when none is configured.
    pub fn api_key_or(mut self, api_key: Option<String>) -> Self {
        if self.api_key.is_none() {
            self.api_key = api_key;
        }
        self
    }

    /// Fill the base URL when none is configured.
    pub fn base_url_or(mut self, base_url: Option<String>) -> Self {
        if self.base_url.is_none() {
            self.base_url = base_url;
        }
        self
    }

    /// Fill the model when it is blank.
    pub fn model_or(self, model: Option<String>, fallback: &str) -> Self {
        if self.model.trim().is_empty() {
            let model = model.unwrap_or_else(|| fallback.to_string());
            self.with_model(model)
        } else {
            self
        }
    }

    /// Request timeout as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The API key, failing when it is missing or blank.
    #[track_caller]
    pub fn require_api_key(&self, provider: ProviderKind) -> BcpResult<&str> {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(ProviderError::new(ProviderErrorKind::MissingCredential(format!(
                "no API key configured for provider '{}'",
                provider
            )))
            .into()),
        }
    }
}

/// Settings for every supported provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    /// OpenAI settings
    pub openai: ModelConfig,
    /// Anthropic settings
    pub anthropic: ModelConfig,
    /// Flow gateway settings
    pub flow: ModelConfig,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            openai: ModelConfig::openai_defaults(),
            anthropic: ModelConfig::anthropic_defaults(),
            flow: ModelConfig::flow_defaults(),
        }
    }
}

impl ProvidersConfig {
    /// Settings for a provider.
    pub fn for_kind(&self, kind: ProviderKind) -> &ModelConfig {
        match kind {
            ProviderKind::OpenAi => &self.openai,
            ProviderKind::Claude => &self.anthropic,
            ProviderKind::Flow => &self.flow,
        }
    }
}
