//! Per-step outcomes stored in the calculation result.

use crate::ParsedResponse;
use serde::Serialize;

/// What a step produced: a response, or the error that stopped it.
///
/// Serializes as the response itself, or as `{"error": "<message>"}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StepOutcome {
    /// The step's parsed (or defaulted) response
    Response(ParsedResponse),
    /// The step failed before a response was obtained
    Failed {
        /// Error message
        error: String,
    },
}

impl StepOutcome {
    /// Build an error marker from any displayable error.
    pub fn failed(error: impl std::fmt::Display) -> Self {
        Self::Failed {
            error: error.to_string(),
        }
    }

    /// The response, if the step succeeded.
    pub fn response(&self) -> Option<&ParsedResponse> {
        match self {
            Self::Response(response) => Some(response),
            Self::Failed { .. } => None,
        }
    }

    /// The error message, if the step failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed { error } => Some(error),
            Self::Response(_) => None,
        }
    }
}

impl From<ParsedResponse> for StepOutcome {
    fn from(response: ParsedResponse) -> Self {
        Self::Response(response)
    }
}
