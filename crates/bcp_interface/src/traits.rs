//! Collaborator traits used by the calculation pipeline.

use async_trait::async_trait;
use bcp_core::PromptRef;
use bcp_error::BcpResult;

/// Core trait that all LLM providers must implement.
///
/// A driver turns a literal prompt into the literal text the model answered
/// with. Network, authentication and rate-limit failures are reported as
/// `ProviderError`s.
#[async_trait]
pub trait ModelDriver: Send + Sync {
    /// Send a prompt and return the model's text response.
    async fn invoke(&self, prompt: &str) -> BcpResult<String>;

    /// Provider name (e.g., "openai", "claude", "flow").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "gpt-4o-2024-05-13").
    fn model_name(&self) -> &str;
}

#[async_trait]
impl<T: ModelDriver + ?Sized> ModelDriver for Box<T> {
    async fn invoke(&self, prompt: &str) -> BcpResult<String> {
        (**self).invoke(prompt).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

/// Resolves prompt references to template text.
///
/// Implementations return `PromptErrorKind::NotFound` for unknown references.
pub trait PromptSource: Send + Sync {
    /// Load the template text for a reference.
    fn template(&self, reference: &PromptRef) -> BcpResult<String>;
}

impl<T: PromptSource + ?Sized> PromptSource for Box<T> {
    fn template(&self, reference: &PromptRef) -> BcpResult<String> {
        (**self).template(reference)
    }
}
