//! Layered configuration.

use bcp_error::{BcpResult, ConfigError};
use bcp_interface::{ModelDriver, PromptSource};
use bcp_models::{build_driver, ModelConfig, ProviderKind, ProvidersConfig};
use bcp_pipeline::{BcpCalculator, FilePromptSource, StaticPromptSource};
use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Calculator over boxed collaborators, as built from configuration.
pub type DynCalculator = BcpCalculator<Box<dyn ModelDriver>, Box<dyn PromptSource>>;

/// Bundled default configuration
const DEFAULT_CONFIG: &str = include_str!("../../../bcp.toml");

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(default)]
pub struct BcpConfig {
    /// Provider used for calculations
    provider: ProviderKind,
    /// Directory of step templates; bundled templates when unset
    prompts_dir: Option<PathBuf>,
    /// OpenAI settings
    openai: ModelConfig,
    /// Anthropic settings
    anthropic: ModelConfig,
    /// Flow gateway settings
    flow: ModelConfig,
}

impl Default for BcpConfig {
    fn default() -> Self {
        let providers = ProvidersConfig::default();
        Self {
            provider: ProviderKind::default(),
            prompts_dir: None,
            openai: providers.openai,
            anthropic: providers.anthropic,
            flow: providers.flow,
        }
    }
}

impl BcpConfig {
    /// Load configuration with precedence: environment > user files > bundled default.
    ///
    /// Configuration sources in order of precedence (later sources override earlier):
    /// 1. Bundled defaults (bcp.toml shipped with the binary)
    /// 2. User config in home directory (~/.config/bcp/bcp.toml)
    /// 3. User config in current directory (./bcp.toml)
    /// 4. `BCP_*` environment variables, `__` separating nested keys
    ///
    /// Provider credentials still missing afterwards are taken from the usual
    /// variables (`OPENAI_API_KEY`, `ANTHROPIC_API_KEY`, `FLOW_API_KEY`,
    /// `FLOW_BASE_URL`, `*_MODEL_NAME`).
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or parsed.
    #[instrument]
    pub fn load() -> BcpResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");

        let mut builder = Self::defaults_builder();

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/bcp/bcp.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("bcp").required(false))
            .add_source(
                Environment::with_prefix("BCP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        Ok(Self::finish(builder)?.with_env_fallbacks(|name| std::env::var(name).ok()))
    }

    /// Load the bundled defaults overlaid with a single file.
    ///
    /// Environment variables are not consulted.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> BcpResult<Self> {
        debug!("Loading configuration from file");
        let builder = Self::defaults_builder().add_source(File::from(path.as_ref()));
        Ok(Self::finish(builder)?.with_env_fallbacks(|_| None))
    }

    fn defaults_builder() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> BcpResult<Self> {
        Ok(builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?)
    }

    /// Fill missing credentials and blank models from well-known variables.
    ///
    /// `lookup` resolves a variable name; blank values count as unset. A
    /// model left blank by every source gets the provider's default.
    pub fn with_env_fallbacks(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let defaults = ProvidersConfig::default();

        self.openai = self
            .openai
            .api_key_or(var("OPENAI_API_KEY"))
            .model_or(var("OPENAI_MODEL_NAME"), defaults.openai.model());
        self.anthropic = self
            .anthropic
            .api_key_or(var("ANTHROPIC_API_KEY"))
            .model_or(var("ANTHROPIC_MODEL_NAME"), defaults.anthropic.model());
        self.flow = self
            .flow
            .api_key_or(var("FLOW_API_KEY"))
            .base_url_or(var("FLOW_BASE_URL"))
            .model_or(var("FLOW_MODEL_NAME"), defaults.flow.model());
        self
    }

    /// Builder method to select the provider.
    pub fn with_provider(mut self, provider: ProviderKind) -> Self {
        self.provider = provider;
        self
    }

    /// Builder method to read templates from a directory.
    pub fn with_prompts_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.prompts_dir = Some(dir.into());
        self
    }

    /// Settings of every provider.
    pub fn providers(&self) -> ProvidersConfig {
        ProvidersConfig {
            openai: self.openai.clone(),
            anthropic: self.anthropic.clone(),
            flow: self.flow.clone(),
        }
    }

    /// The configured prompt source.
    pub fn prompt_source(&self) -> Box<dyn PromptSource> {
        match &self.prompts_dir {
            Some(dir) => Box::new(FilePromptSource::new(dir)),
            None => Box::new(StaticPromptSource::bundled()),
        }
    }

    /// Build the driver for a provider.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider's credentials or endpoint are missing.
    pub fn driver_for(&self, provider: ProviderKind) -> BcpResult<Box<dyn ModelDriver>> {
        build_driver(provider, &self.providers())
    }

    /// Build a calculator for a provider with the configured prompts.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider's credentials or endpoint are missing.
    pub fn calculator_for(&self, provider: ProviderKind) -> BcpResult<DynCalculator> {
        Ok(BcpCalculator::new(
            self.driver_for(provider)?,
            self.prompt_source(),
        ))
    }

    /// Build a calculator for the configured provider.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider's credentials or endpoint are missing.
    pub fn calculator(&self) -> BcpResult<DynCalculator> {
        self.calculator_for(self.provider)
    }
}
