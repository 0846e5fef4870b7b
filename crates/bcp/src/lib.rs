//! BCP - Business Complexity Points for user stories
//!
//! Scores a user story by running six LLM prompt steps and folding the
//! structured answers of the last three into a single number of Business
//! Complexity Points, with a breakdown by component.
//!
//! # Quick Start
//!
//! ```no_run
//! use bcp::{BcpConfig, Story};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = BcpConfig::load()?;
//!     let calculator = config.calculator()?;
//!
//!     let story = Story::new(std::fs::read_to_string("story.md")?);
//!     let result = calculator.calculate(&story).await;
//!     println!("{}: {} BCP", result.story_name(), result.total_bcp());
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! The workspace is organized as focused crates:
//!
//! - `bcp_error` - Error types
//! - `bcp_core` - Stories, steps, parsed responses and results
//! - `bcp_interface` - `ModelDriver` and `PromptSource` traits
//! - `bcp_models` - OpenAI, Anthropic and Flow clients
//! - `bcp_pipeline` - Step orchestration, parsing and scoring
//!
//! This crate re-exports the public surface and adds configuration loading,
//! tracing setup, result formatting and provider comparison runs.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod compare;
mod config;
mod output;
mod telemetry;

pub use compare::{
    compare_story, report_file_name, story_files, write_report, write_run, ComparisonFormat,
    ComparisonRow, StoryRun,
};
pub use self::config::{BcpConfig, DynCalculator};
pub use output::{format_result, format_text, summary, OutputFormat};
pub use telemetry::{init_tracing, LogFormat};

pub use bcp_core::{
    CalculationResult, Component, ParsedResponse, PromptRef, StepDefinition, StepName,
    StepOutcome, StepVariables, Story,
};
pub use bcp_error::{BcpError, BcpErrorKind, BcpResult};
pub use bcp_interface::{ModelDriver, PromptSource};
pub use bcp_models::{
    build_driver, AnthropicClient, FlowClient, ModelConfig, OpenAiClient, ProviderKind,
    ProvidersConfig,
};
pub use bcp_pipeline::{
    parse_response, render, step_definitions, BcpCalculator, FilePromptSource,
    StaticPromptSource,
};
