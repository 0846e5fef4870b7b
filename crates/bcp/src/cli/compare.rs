//! Provider comparison command handler.

use bcp::{
    compare_story, story_files, write_report, write_run, BcpConfig, BcpResult, ComparisonFormat,
    ComparisonRow, ProviderKind,
};
use bcp_error::IoError;
use std::path::Path;
use tracing::{error, info, instrument, warn};

/// Score every story with every provider and write the comparison report.
#[instrument(skip(config, providers), fields(stories_dir = %stories_dir.display()))]
pub async fn run_compare(
    config: BcpConfig,
    stories_dir: &Path,
    output_dir: &Path,
    providers: &[String],
    format: ComparisonFormat,
) -> BcpResult<()> {
    let providers = providers
        .iter()
        .map(|name| ProviderKind::parse(name))
        .collect::<BcpResult<Vec<_>>>()?;

    let stories = story_files(stories_dir)?;
    if stories.is_empty() {
        return Err(IoError::new(format!("No story files found in {}", stories_dir.display())).into());
    }
    info!(stories = stories.len(), providers = providers.len(), "Starting comparison");

    let started = chrono::Local::now();
    let mut rows = Vec::with_capacity(stories.len() * providers.len());

    for provider in &providers {
        let calculator = match config.calculator_for(*provider) {
            Ok(calculator) => calculator,
            Err(e) => {
                error!(provider = %provider, error = %e, "Provider unavailable");
                for story in &stories {
                    let file = story
                        .file_name()
                        .map(|name| name.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    rows.push(ComparisonRow::failed(file, provider.to_string(), &e));
                }
                continue;
            }
        };

        for story in &stories {
            let run = compare_story(&calculator, story).await;
            if let Some(result) = &run.result {
                if let Err(e) = write_run(result, output_dir, story, &provider.to_string()) {
                    warn!(error = %e, "Failed to save individual result");
                }
            }
            rows.push(run.row);
        }
    }

    let path = write_report(&rows, output_dir, format, &started)?;
    println!("{}", path.display());
    info!("Comparison completed successfully");
    Ok(())
}
