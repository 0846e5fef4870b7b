//! Prompt template rendering errors.

/// Specific error conditions for template rendering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum TemplateErrorKind {
    /// Template references a variable that was not supplied
    #[display("'{}' is undefined", _0)]
    UndefinedVariable(String),
    /// Template syntax is malformed
    #[display("Template syntax error: {}", _0)]
    Syntax(String),
}

/// Error type for template rendering.
///
/// # Examples
///
/// ```
/// use bcp_error::{TemplateError, TemplateErrorKind};
///
/// let err = TemplateError::new(TemplateErrorKind::UndefinedVariable("elements".to_string()));
/// assert!(format!("{}", err).contains("'elements' is undefined"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Template Error: {} at line {} in {}", kind, line, file)]
pub struct TemplateError {
    /// The specific error condition
    pub kind: TemplateErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl TemplateError {
    /// Create a new TemplateError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: TemplateErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
