//! Errors raised while assembling `BcpConfig` from its layered sources.

/// A configuration source could not be read, merged or deserialized.
///
/// Also covers invalid log filters handed to the tracing setup.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// What went wrong, including the offending source or value
    pub message: String,
    /// Line of the call that raised the error
    pub line: u32,
    /// File of the call that raised the error
    pub file: &'static str,
}

impl ConfigError {
    /// Record a configuration failure at the caller's location.
    ///
    /// ```
    /// use bcp_error::ConfigError;
    ///
    /// let err = ConfigError::new("Failed to parse configuration: invalid type for `max_tokens`");
    /// assert!(err.to_string().starts_with("Configuration Error: Failed to parse"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let caller = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: caller.line(),
            file: caller.file(),
        }
    }
}
