//! Error types for the BCP calculator.
//!
//! This crate provides the error types used throughout the BCP workspace.
//!
//! # Error Hierarchy
//!
//! Errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - Constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use bcp_error::{BcpResult, ProviderError, ProviderErrorKind};
//!
//! fn invoke() -> BcpResult<String> {
//!     Err(ProviderError::new(ProviderErrorKind::Http("Connection refused".to_string())))?
//! }
//!
//! match invoke() {
//!     Ok(text) => println!("Got: {}", text),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod io;
mod json;
mod prompt;
mod provider;
mod template;

pub use config::ConfigError;
pub use error::{BcpError, BcpErrorKind, BcpResult};
pub use io::IoError;
pub use json::JsonError;
pub use prompt::{PromptError, PromptErrorKind};
pub use provider::{ProviderError, ProviderErrorKind};
pub use template::{TemplateError, TemplateErrorKind};
