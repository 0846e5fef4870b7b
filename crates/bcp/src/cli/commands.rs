//! CLI command definitions.

use bcp::{ComparisonFormat, LogFormat, OutputFormat};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// BCP - Business Complexity Points for user stories
#[derive(Parser, Debug)]
#[command(name = "bcp")]
#[command(about = "Calculate Business Complexity Points (BCP) for user stories with LLM prompt steps", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Directory of step templates (defaults to the bundled templates)
    #[arg(long, global = true)]
    pub prompts_dir: Option<PathBuf>,

    /// Log level or filter directive; RUST_LOG takes precedence
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    /// Log line format
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Calculate the BCP of a single user story
    Calculate {
        /// Path to the user story file
        story_file: PathBuf,

        /// LLM provider to use: openai, claude or flow (defaults to configuration)
        #[arg(long)]
        provider: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Save the output to a file instead of printing it
        #[arg(long)]
        output_file: Option<PathBuf>,
    },

    /// Score every story in a directory with several providers
    Compare {
        /// Directory containing story files (*.md, *.txt)
        #[arg(long, default_value = "stories")]
        stories_dir: PathBuf,

        /// Directory to save results
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,

        /// Providers to compare
        #[arg(long, value_delimiter = ',', default_value = "openai,claude")]
        providers: Vec<String>,

        /// Report format
        #[arg(long, value_enum, default_value_t = ComparisonFormat::Csv)]
        format: ComparisonFormat,
    },
}
