//! Result formatting for the command line.

use bcp_core::{CalculationResult, ParsedResponse, StepName, StepOutcome};
use bcp_error::{BcpResult, JsonError};
use serde_json::{json, Map, Value};

/// How a calculation result is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    /// Condensed JSON summary
    #[default]
    Json,
    /// Plain-text sections per step
    Text,
    /// The full calculation result as JSON
    Raw,
}

/// Render a result in the requested format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_result(result: &CalculationResult, format: OutputFormat) -> BcpResult<String> {
    let text = match format {
        OutputFormat::Json => to_pretty(&summary(result))?,
        OutputFormat::Raw => to_pretty(result)?,
        OutputFormat::Text => format_text(result),
    };
    Ok(text)
}

fn to_pretty<T: serde::Serialize>(value: &T) -> BcpResult<String> {
    Ok(serde_json::to_string_pretty(value)
        .map_err(|e| JsonError::new(format!("Failed to serialize result: {}", e)))?)
}

/// Condensed JSON view of a result.
///
/// Each step is reduced to `assessment` (falling back to `description`),
/// `score` (falling back to `total`), `classification` and `raw_response`.
/// The informational steps' scores are repeated under `score`.
pub fn summary(result: &CalculationResult) -> Value {
    let mut steps = Map::new();
    for (name, outcome) in result.steps() {
        steps.insert(name.to_string(), step_summary(outcome));
    }

    let mut root = Map::new();
    root.insert("story_name".to_string(), json!(result.story_name()));
    root.insert("total_bcp".to_string(), json!(result.total_bcp()));
    root.insert("components".to_string(), json!(result.breakdown()));
    root.insert("steps".to_string(), Value::Object(steps));
    root.insert(
        "score".to_string(),
        json!({
            "maturity": informational_score(result, StepName::StoryMaturityComplexity),
            "invest": informational_score(result, StepName::StoryInvestMaturity),
        }),
    );
    if let Some(error) = result.error() {
        root.insert("error".to_string(), json!(error));
    }
    Value::Object(root)
}

fn step_summary(outcome: &StepOutcome) -> Value {
    match outcome {
        StepOutcome::Response(ParsedResponse::Object(map)) => {
            let field = |key: &str, fallback: &str, default: Value| {
                map.get(key)
                    .or_else(|| map.get(fallback))
                    .cloned()
                    .unwrap_or(default)
            };
            json!({
                "assessment": field("assessment", "description", json!("")),
                "score": field("score", "total", json!(0)),
                "classification": map.get("classification").cloned().unwrap_or(json!("")),
                "raw_response": "",
            })
        }
        StepOutcome::Response(ParsedResponse::RawText(text)) => json!({
            "assessment": "",
            "score": 0,
            "classification": "",
            "raw_response": text,
        }),
        StepOutcome::Response(ParsedResponse::Array(items)) => json!({
            "raw_response": Value::Array(items.clone()).to_string(),
        }),
        StepOutcome::Failed { error } => json!({
            "assessment": "",
            "score": 0,
            "classification": "",
            "raw_response": "",
            "error": error,
        }),
    }
}

fn informational_score(result: &CalculationResult, step: StepName) -> Value {
    result
        .step(step)
        .and_then(StepOutcome::response)
        .and_then(|response| response.get("score"))
        .cloned()
        .unwrap_or(json!(0))
}

/// Plain-text report: one section per step, then the total and breakdown.
pub fn format_text(result: &CalculationResult) -> String {
    let mut lines = Vec::new();

    for (name, outcome) in result.steps() {
        lines.push(format!("=== {} ===", name));
        lines.push(serde_json::to_string(outcome).unwrap_or_default());
        lines.push(String::new());
    }

    lines.push("=== FINAL BUSINESS COMPLEXITY POINTS ===".to_string());
    lines.push(format!("Total BCP: {}", result.total_bcp()));
    lines.push(String::new());

    lines.push("=== BCP BREAKDOWN ===".to_string());
    for (component, points) in result.breakdown() {
        lines.push(format!("{}: {}", component, points));
    }

    if let Some(error) = result.error() {
        lines.push(String::new());
        lines.push(format!("Error: {}", error));
    }

    lines.join("\n")
}
