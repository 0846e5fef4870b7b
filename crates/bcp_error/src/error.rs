//! Top-level error wrapper types.

use crate::{ConfigError, IoError, JsonError, PromptError, ProviderError, TemplateError};

/// Every error condition the BCP workspace can produce.
///
/// # Examples
///
/// ```
/// use bcp_error::{BcpError, JsonError};
///
/// let err: BcpError = JsonError::new("trailing comma").into();
/// assert!(format!("{}", err).contains("JSON Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum BcpErrorKind {
    /// Prompt template rendering error
    #[from(TemplateError)]
    Template(TemplateError),
    /// Prompt template lookup error
    #[from(PromptError)]
    Prompt(PromptError),
    /// Model provider error
    #[from(ProviderError)]
    Provider(ProviderError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Filesystem error
    #[from(IoError)]
    Io(IoError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
}

/// BCP error with kind discrimination.
///
/// # Examples
///
/// ```
/// use bcp_error::{BcpResult, ConfigError};
///
/// fn might_fail() -> BcpResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("BCP Error: {}", _0)]
pub struct BcpError(Box<BcpErrorKind>);

impl BcpError {
    /// Create a new error from a kind.
    pub fn new(kind: BcpErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &BcpErrorKind {
        &self.0
    }
}

impl<T> From<T> for BcpError
where
    T: Into<BcpErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for BCP operations.
pub type BcpResult<T> = std::result::Result<T, BcpError>;
