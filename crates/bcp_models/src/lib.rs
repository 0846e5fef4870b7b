//! LLM provider clients for the BCP calculator.
//!
//! Every client implements [`bcp_interface::ModelDriver`]: a rendered prompt
//! goes in, the model's text comes out.
//!
//! # Available Providers
//!
//! - **OpenAI** - chat completions API
//! - **Claude** - Anthropic messages API
//! - **Flow** - OpenAI-compatible gateway at a configured base URL
//!
//! # Example
//!
//! ```no_run
//! use bcp_interface::ModelDriver;
//! use bcp_models::{ModelConfig, OpenAiClient};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ModelConfig::openai_defaults().with_api_key("sk-...");
//! let client = OpenAiClient::new(&config)?;
//! let text = client.invoke("Say hello").await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod anthropic;
mod config;
mod factory;
mod flow;
mod openai;
mod openai_compat;

pub use anthropic::{
    AnthropicClient, AnthropicContentBlock, AnthropicMessage, AnthropicRequest,
    AnthropicRequestBuilder, AnthropicResponse,
};
pub use config::{ModelConfig, ProviderKind, ProvidersConfig};
pub use factory::build_driver;
pub use flow::FlowClient;
pub use openai::OpenAiClient;
pub use openai_compat::{
    ChatChoice, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, OpenAiCompatibleClient,
};
