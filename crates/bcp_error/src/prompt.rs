//! Prompt source errors.

/// Specific error conditions for loading prompt templates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PromptErrorKind {
    /// No template exists for the reference
    #[display("Prompt not found: {}", _0)]
    NotFound(String),
    /// Template exists but could not be read
    #[display("Failed to read prompt {}: {}", reference, message)]
    Read {
        /// Prompt reference
        reference: String,
        /// Underlying error message
        message: String,
    },
}

/// Error type for prompt sources.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Prompt Error: {} at line {} in {}", kind, line, file)]
pub struct PromptError {
    /// The specific error condition
    pub kind: PromptErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl PromptError {
    /// Create a new PromptError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PromptErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
