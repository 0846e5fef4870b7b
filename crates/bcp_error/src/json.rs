//! Errors raised while writing results and comparison reports as JSON.

/// A calculation result or report row could not be serialized.
///
/// Parsing model responses never produces this error: unparseable answers
/// become raw-text responses instead.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("JSON Error: {} at line {} in {}", message, line, file)]
pub struct JsonError {
    /// Serializer message and the artifact being written
    pub message: String,
    /// Line of the call that raised the error
    pub line: u32,
    /// File of the call that raised the error
    pub file: &'static str,
}

impl JsonError {
    /// Record a serialization failure at the caller's location.
    ///
    /// ```
    /// use bcp_error::JsonError;
    ///
    /// let err = JsonError::new("Failed to serialize report: key must be a string");
    /// assert!(err.to_string().starts_with("JSON Error: Failed to serialize report"));
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
