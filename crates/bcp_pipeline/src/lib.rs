//! Step pipeline for computing Business Complexity Points.
//!
//! A calculation runs six fixed prompt steps against a [`ModelDriver`]:
//! each step's template is loaded from a [`PromptSource`], rendered with the
//! story and (for the last three steps) the elements extracted by step 3,
//! sent to the model, and parsed best-effort into JSON. The three scored
//! steps are folded into a [`CalculationResult`].
//!
//! # Example
//!
//! ```no_run
//! use bcp_core::Story;
//! use bcp_models::{ModelConfig, OpenAiClient};
//! use bcp_pipeline::{BcpCalculator, StaticPromptSource};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let driver = OpenAiClient::new(&ModelConfig::openai_defaults().with_api_key("sk-..."))?;
//! let calculator = BcpCalculator::new(driver, StaticPromptSource::bundled());
//! let result = calculator.calculate(&Story::new("Checkout\nAs a shopper...")).await;
//! println!("Total BCP: {}", result.total_bcp());
//! # Ok(())
//! # }
//! ```
//!
//! [`ModelDriver`]: bcp_interface::ModelDriver
//! [`PromptSource`]: bcp_interface::PromptSource
//! [`CalculationResult`]: bcp_core::CalculationResult

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod calculator;
mod extraction;
mod prompts;
mod scoring;
mod steps;
mod template;

pub use calculator::BcpCalculator;
pub use extraction::{extract_json_candidate, parse_response};
pub use prompts::{FilePromptSource, StaticPromptSource};
pub use scoring::{boundary_points, interface_points, rule_points, score_step, size_points, StepScore};
pub use steps::{default_response, derive_elements, step_definitions, HALT_PREFIX};
pub use template::render;
