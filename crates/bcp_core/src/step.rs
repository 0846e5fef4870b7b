//! Step identities and definitions.

use crate::Component;
use serde::{Deserialize, Serialize};

/// The six steps of a BCP calculation, in execution order.
///
/// The derived ordering follows the declaration order, so maps keyed by
/// `StepName` iterate in execution order.
///
/// # Examples
///
/// ```
/// use bcp_core::StepName;
///
/// assert_eq!(StepName::BreakElements.to_string(), "Break Elements");
/// assert!(StepName::BreakElements < StepName::UiElementsComplexity);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
pub enum StepName {
    /// Step 1: story maturity assessment
    #[serde(rename = "Story Maturity Complexity")]
    #[strum(serialize = "Story Maturity Complexity")]
    StoryMaturityComplexity,
    /// Step 2: INVEST maturity assessment
    #[serde(rename = "Story INVEST Maturity")]
    #[strum(serialize = "Story INVEST Maturity")]
    StoryInvestMaturity,
    /// Step 3: break the story into elements used by steps 4-6
    #[serde(rename = "Break Elements")]
    #[strum(serialize = "Break Elements")]
    BreakElements,
    /// Step 4: external integration boundaries
    #[serde(rename = "External Integrations Complexity")]
    #[strum(serialize = "External Integrations Complexity")]
    ExternalIntegrationsComplexity,
    /// Step 5: user interface elements
    #[serde(rename = "UI Elements Complexity")]
    #[strum(serialize = "UI Elements Complexity")]
    UiElementsComplexity,
    /// Step 6: business rules
    #[serde(rename = "Business Rules Complexity")]
    #[strum(serialize = "Business Rules Complexity")]
    BusinessRulesComplexity,
}

impl StepName {
    /// Breakdown component this step scores into, if it is scored at all.
    pub fn component(self) -> Option<Component> {
        match self {
            Self::ExternalIntegrationsComplexity => Some(Component::ExternalIntegrations),
            Self::UiElementsComplexity => Some(Component::UiElements),
            Self::BusinessRulesComplexity => Some(Component::BusinessRules),
            Self::StoryMaturityComplexity | Self::StoryInvestMaturity | Self::BreakElements => {
                None
            }
        }
    }
}

/// Opaque handle identifying a prompt template, resolved by a prompt source.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
pub struct PromptRef(String);

impl PromptRef {
    /// Create a prompt reference.
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// The reference as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PromptRef {
    fn from(reference: &str) -> Self {
        Self(reference.to_string())
    }
}

/// A step in the calculation pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct StepDefinition {
    /// Step identity
    name: StepName,
    /// Template used to build the step's prompt
    prompt: PromptRef,
    /// Whether a failure of this step halts the run
    required: bool,
}

impl StepDefinition {
    /// Create a step definition.
    pub fn new(name: StepName, prompt: impl Into<PromptRef>, required: bool) -> Self {
        Self {
            name,
            prompt: prompt.into(),
            required,
        }
    }

    /// Whether this step's response is folded into the score.
    pub fn is_scored(&self) -> bool {
        self.required && self.name.component().is_some()
    }
}
