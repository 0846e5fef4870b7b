//! Comparison runs with a canned model.

use async_trait::async_trait;
use bcp::{
    compare_story, report_file_name, story_files, write_report, write_run, BcpCalculator,
    BcpResult, ComparisonFormat, ComparisonRow, ModelDriver, StaticPromptSource,
};
use chrono::{TimeZone, Utc};
use std::fs;

/// Answers every prompt with the same break-down-free text, so only the
/// default boundary point is scored.
struct CannedDriver;

#[async_trait]
impl ModelDriver for CannedDriver {
    async fn invoke(&self, _prompt: &str) -> BcpResult<String> {
        Ok("No structured answer.".to_string())
    }

    fn provider_name(&self) -> &'static str {
        "canned"
    }

    fn model_name(&self) -> &str {
        "canned-1"
    }
}

#[test]
fn test_story_files_filters_and_sorts() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("b.md"), "B")?;
    fs::write(dir.path().join("a.txt"), "A")?;
    fs::write(dir.path().join("notes.json"), "{}")?;
    fs::create_dir(dir.path().join("sub.md"))?;

    let files = story_files(dir.path())?;
    let names: Vec<_> = files
        .iter()
        .filter_map(|p| p.file_name()?.to_str().map(str::to_string))
        .collect();
    assert_eq!(names, vec!["a.txt", "b.md"]);
    Ok(())
}

#[tokio::test]
async fn test_compare_story_records_totals() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let story = dir.path().join("login.md");
    fs::write(&story, "Login\nAs a user I want to sign in.")?;

    let calculator = BcpCalculator::new(CannedDriver, StaticPromptSource::bundled());
    let run = compare_story(&calculator, &story).await;

    assert_eq!(run.row.story(), "Login");
    assert_eq!(run.row.file(), "login.md");
    assert_eq!(run.row.provider(), "canned");
    assert_eq!(*run.row.total_bcp(), 1);
    assert_eq!(*run.row.external_integrations(), 1);
    assert!(run.row.error().is_none());
    assert!(*run.row.processing_time_secs() >= 0.0);

    let saved = write_run(run.result.as_ref().unwrap(), dir.path(), &story, "canned")?;
    assert!(saved.ends_with("login_canned.json"));
    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(saved)?)?;
    assert_eq!(value["total_bcp"], 1);
    Ok(())
}

#[tokio::test]
async fn test_unreadable_story_is_failed_row() {
    let dir = tempfile::tempdir().unwrap();
    let calculator = BcpCalculator::new(CannedDriver, StaticPromptSource::bundled());
    let run = compare_story(&calculator, &dir.path().join("missing.md")).await;

    assert!(run.result.is_none());
    assert_eq!(run.row.story(), "missing.md");
    assert!(run.row.error().is_some());
}

#[test]
fn test_report_name_uses_timestamp() {
    let timestamp = Utc.with_ymd_and_hms(2024, 5, 13, 9, 5, 7).unwrap();
    assert_eq!(
        report_file_name(&timestamp, ComparisonFormat::Csv),
        "comparison_results_20240513_090507.csv"
    );
}

#[test]
fn test_csv_report_has_header_and_rows() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let rows = vec![
        ComparisonRow::failed("a.md", "openai", "no API key"),
        ComparisonRow::failed("b.md", "claude", "no API key"),
    ];
    let timestamp = Utc.with_ymd_and_hms(2024, 5, 13, 9, 5, 7).unwrap();

    let path = write_report(&rows, &dir.path().join("out"), ComparisonFormat::Csv, &timestamp)?;
    let text = fs::read_to_string(path)?;
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("Story,File,Provider,Total BCP,Business Rules,UI Elements,External Integrations,Processing Time (s),Error")
    );
    assert!(lines.next().is_some_and(|l| l.starts_with("a.md,a.md,openai,0,")));
    assert_eq!(lines.count(), 1);
    Ok(())
}

#[test]
fn test_json_report_round_trips() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let rows = vec![ComparisonRow::failed("a.md", "flow", "no base_url")];
    let timestamp = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();

    let path = write_report(&rows, dir.path(), ComparisonFormat::Json, &timestamp)?;
    let parsed: Vec<ComparisonRow> = serde_json::from_str(&fs::read_to_string(path)?)?;
    assert_eq!(parsed, rows);
    Ok(())
}
