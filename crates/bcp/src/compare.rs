//! Provider comparison runs over a directory of stories.

use bcp_core::{CalculationResult, Component, Story};
use bcp_error::{BcpResult, IoError, JsonError};
use bcp_interface::{ModelDriver, PromptSource};
use bcp_pipeline::BcpCalculator;
use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info, instrument};

/// File extensions treated as stories.
const STORY_EXTENSIONS: [&str; 2] = ["md", "txt"];

/// Report file format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ComparisonFormat {
    /// JSON array of rows
    Json,
    /// Comma-separated values with a header row
    #[default]
    Csv,
}

impl ComparisonFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

/// One story scored by one provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct ComparisonRow {
    /// Story name, or the file name when the story could not be read
    #[serde(rename = "Story")]
    story: String,
    /// Story file name
    #[serde(rename = "File")]
    file: String,
    /// Provider name
    #[serde(rename = "Provider")]
    provider: String,
    /// Total points
    #[serde(rename = "Total BCP")]
    total_bcp: i64,
    /// Business rules points
    #[serde(rename = "Business Rules")]
    business_rules: i64,
    /// UI elements points
    #[serde(rename = "UI Elements")]
    ui_elements: i64,
    /// External integrations points
    #[serde(rename = "External Integrations")]
    external_integrations: i64,
    /// Wall-clock seconds spent on the calculation
    #[serde(rename = "Processing Time (s)")]
    processing_time_secs: f64,
    /// Why the run failed or halted
    #[serde(rename = "Error")]
    error: Option<String>,
}

impl ComparisonRow {
    /// Row for a completed calculation.
    pub fn from_result(
        file: impl Into<String>,
        provider: impl Into<String>,
        result: &CalculationResult,
        processing_time_secs: f64,
    ) -> Self {
        Self {
            story: result.story_name().clone(),
            file: file.into(),
            provider: provider.into(),
            total_bcp: *result.total_bcp(),
            business_rules: result.component(Component::BusinessRules),
            ui_elements: result.component(Component::UiElements),
            external_integrations: result.component(Component::ExternalIntegrations),
            processing_time_secs,
            error: result.error().clone(),
        }
    }

    /// Row for a story that could not be run at all.
    pub fn failed(
        file: impl Into<String>,
        provider: impl Into<String>,
        error: impl std::fmt::Display,
    ) -> Self {
        let file = file.into();
        Self {
            story: file.clone(),
            file,
            provider: provider.into(),
            total_bcp: 0,
            business_rules: 0,
            ui_elements: 0,
            external_integrations: 0,
            processing_time_secs: 0.0,
            error: Some(error.to_string()),
        }
    }
}

/// Outcome of running one story with one provider.
#[derive(Debug, Clone)]
pub struct StoryRun {
    /// Report row
    pub row: ComparisonRow,
    /// Full result, when the story could be read
    pub result: Option<CalculationResult>,
}

/// Story files in `dir`, sorted by name.
///
/// # Errors
///
/// Returns an error if the directory cannot be read.
pub fn story_files(dir: &Path) -> BcpResult<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| {
        IoError::new(format!(
            "Failed to read stories directory {}: {}",
            dir.display(),
            e
        ))
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| STORY_EXTENSIONS.contains(&ext))
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Run one story file through a calculator, timing the calculation.
///
/// A file that cannot be read yields a failed row rather than an error.
#[instrument(skip(calculator), fields(provider = calculator.driver().provider_name()))]
pub async fn compare_story<D, P>(calculator: &BcpCalculator<D, P>, path: &Path) -> StoryRun
where
    D: ModelDriver,
    P: PromptSource,
{
    let provider = calculator.driver().provider_name();
    let file = file_name(path);

    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            error!(error = %e, "Failed to read story file");
            return StoryRun {
                row: ComparisonRow::failed(file, provider, e),
                result: None,
            };
        }
    };

    let started = Instant::now();
    let result = calculator.calculate(&Story::new(text)).await;
    let elapsed = started.elapsed().as_secs_f64();
    info!(
        total_bcp = result.total_bcp(),
        seconds = elapsed,
        "Completed story"
    );

    StoryRun {
        row: ComparisonRow::from_result(file, provider, &result, elapsed),
        result: Some(result),
    }
}

/// Name of the report file for a run started at `timestamp`.
pub fn report_file_name<Tz>(timestamp: &DateTime<Tz>, format: ComparisonFormat) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!(
        "comparison_results_{}.{}",
        timestamp.format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}

/// Write the comparison report into `dir`, returning its path.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn write_report<Tz>(
    rows: &[ComparisonRow],
    dir: &Path,
    format: ComparisonFormat,
    timestamp: &DateTime<Tz>,
) -> BcpResult<PathBuf>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    create_dir(dir)?;
    let path = dir.join(report_file_name(timestamp, format));

    match format {
        ComparisonFormat::Json => {
            let text = serde_json::to_string_pretty(rows)
                .map_err(|e| JsonError::new(format!("Failed to serialize report: {}", e)))?;
            write_file(&path, &text)?;
        }
        ComparisonFormat::Csv => {
            let mut writer = csv::Writer::from_path(&path).map_err(|e| {
                IoError::new(format!("Failed to create {}: {}", path.display(), e))
            })?;
            for row in rows {
                writer.serialize(row).map_err(|e| {
                    IoError::new(format!("Failed to write {}: {}", path.display(), e))
                })?;
            }
            writer.flush().map_err(|e| {
                IoError::new(format!("Failed to write {}: {}", path.display(), e))
            })?;
        }
    }

    info!(path = %path.display(), rows = rows.len(), "Comparison report saved");
    Ok(path)
}

/// Save one full result as `<story stem>_<provider>.json` in `dir`.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_run(
    result: &CalculationResult,
    dir: &Path,
    story: &Path,
    provider: &str,
) -> BcpResult<PathBuf> {
    create_dir(dir)?;
    let stem = story
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("story");
    let path = dir.join(format!("{}_{}.json", stem, provider));
    let text = serde_json::to_string_pretty(result)
        .map_err(|e| JsonError::new(format!("Failed to serialize result: {}", e)))?;
    write_file(&path, &text)?;
    Ok(path)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn create_dir(dir: &Path) -> BcpResult<()> {
    std::fs::create_dir_all(dir).map_err(|e| {
        IoError::new(format!("Failed to create directory {}: {}", dir.display(), e)).into()
    })
}

fn write_file(path: &Path, text: &str) -> BcpResult<()> {
    std::fs::write(path, text)
        .map_err(|e| IoError::new(format!("Failed to write {}: {}", path.display(), e)).into())
}
