//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the bcp binary.

mod calculate;
mod commands;
mod compare;

pub use calculate::run_calculate;
pub use commands::{Cli, Commands};
pub use compare::run_compare;
