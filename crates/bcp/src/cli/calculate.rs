//! Single-story calculation command handler.

use bcp::{format_result, BcpConfig, BcpResult, OutputFormat, ProviderKind, Story};
use bcp_error::IoError;
use std::path::Path;
use tracing::{info, instrument};

/// Calculate one story and print or save the formatted result.
#[instrument(skip(config), fields(story_file = %story_file.display()))]
pub async fn run_calculate(
    config: BcpConfig,
    story_file: &Path,
    provider: Option<&str>,
    format: OutputFormat,
    output_file: Option<&Path>,
) -> BcpResult<()> {
    let config = match provider {
        Some(name) => config.with_provider(ProviderKind::parse(name)?),
        None => config,
    };

    if !story_file.is_file() {
        return Err(IoError::new(format!("Story file not found: {}", story_file.display())).into());
    }
    let text = std::fs::read_to_string(story_file).map_err(|e| {
        IoError::new(format!("Error reading story file {}: {}", story_file.display(), e))
    })?;

    let calculator = config.calculator()?;
    let result = calculator.calculate(&Story::new(text)).await;
    let formatted = format_result(&result, format)?;

    match output_file {
        Some(path) => {
            std::fs::write(path, formatted).map_err(|e| {
                IoError::new(format!("Error saving results to {}: {}", path.display(), e))
            })?;
            info!(path = %path.display(), "Results saved");
        }
        None => println!("{}", formatted),
    }

    Ok(())
}
