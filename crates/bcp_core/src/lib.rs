//! Core data types for the BCP calculator.
//!
//! This crate provides the data model shared by the pipeline, the providers
//! and the command-line front end: stories, step definitions, prompt
//! variables, parsed model responses and the calculation result.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod outcome;
mod response;
mod result;
mod step;
mod story;
mod variables;

pub use outcome::StepOutcome;
pub use response::{ParsedResponse, RAW_RESPONSE_KEY};
pub use result::{CalculationResult, Component};
pub use step::{PromptRef, StepDefinition, StepName};
pub use story::{Story, UNNAMED_STORY};
pub use variables::StepVariables;
