//! Trait definitions for the BCP calculator.
//!
//! The calculator talks to the outside world through two seams:
//! - [`ModelDriver`] sends a rendered prompt to an LLM provider
//! - [`PromptSource`] resolves a step's prompt reference to template text

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{ModelDriver, PromptSource};
