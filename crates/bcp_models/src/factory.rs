//! Driver construction from configuration.

use crate::{AnthropicClient, FlowClient, OpenAiClient, ProviderKind, ProvidersConfig};
use bcp_error::BcpResult;
use bcp_interface::ModelDriver;
use tracing::info;

/// Build the driver for a provider.
///
/// All credential and endpoint checks happen here, before any step runs.
///
/// # Errors
///
/// Returns an error if the provider's settings are incomplete.
pub fn build_driver(
    kind: ProviderKind,
    providers: &ProvidersConfig,
) -> BcpResult<Box<dyn ModelDriver>> {
    let config = providers.for_kind(kind);
    let driver: Box<dyn ModelDriver> = match kind {
        ProviderKind::OpenAi => Box::new(OpenAiClient::new(config)?),
        ProviderKind::Claude => Box::new(AnthropicClient::new(config)?),
        ProviderKind::Flow => Box::new(FlowClient::new(config)?),
    };
    info!(
        provider = driver.provider_name(),
        model = driver.model_name(),
        "Initialized provider"
    );
    Ok(driver)
}
