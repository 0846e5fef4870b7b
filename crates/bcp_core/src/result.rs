//! The aggregate result of a BCP calculation.

use crate::{StepName, StepOutcome};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Scored components of the BCP breakdown.
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
    strum::EnumIter,
    strum::AsRefStr,
)]
pub enum Component {
    /// Contribution of step 4
    #[serde(rename = "External Integrations")]
    #[strum(serialize = "External Integrations")]
    ExternalIntegrations,
    /// Contribution of step 5
    #[serde(rename = "UI Elements")]
    #[strum(serialize = "UI Elements")]
    UiElements,
    /// Contribution of step 6
    #[serde(rename = "Business Rules")]
    #[strum(serialize = "Business Rules")]
    BusinessRules,
}

/// Result of scoring one story.
///
/// Built incrementally by the calculator. `total_bcp` always equals the sum
/// of `breakdown`, and `breakdown` only holds strictly positive values.
///
/// # Examples
///
/// ```
/// use bcp_core::{CalculationResult, Component};
///
/// let mut result = CalculationResult::new("Login");
/// result.add_contribution(Component::UiElements, 13);
/// result.add_contribution(Component::BusinessRules, 0);
/// assert_eq!(*result.total_bcp(), 13);
/// assert_eq!(result.breakdown().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, derive_getters::Getters)]
pub struct CalculationResult {
    /// Display name of the story
    story_name: String,
    /// Outcome of every step that ran, in execution order
    steps: BTreeMap<StepName, StepOutcome>,
    /// Positive contributions per component
    breakdown: BTreeMap<Component, i64>,
    /// Sum of the breakdown
    total_bcp: i64,
    /// Set when a required step failed and the run halted
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl CalculationResult {
    /// Create an empty result for a story.
    pub fn new(story_name: impl Into<String>) -> Self {
        Self {
            story_name: story_name.into(),
            steps: BTreeMap::new(),
            breakdown: BTreeMap::new(),
            total_bcp: 0,
            error: None,
        }
    }

    /// Store the outcome of a step, replacing any earlier one.
    pub fn record_step(&mut self, step: StepName, outcome: impl Into<StepOutcome>) {
        self.steps.insert(step, outcome.into());
    }

    /// Fold a contribution into the breakdown.
    ///
    /// Only strictly positive contributions that keep the total within `i64`
    /// are recorded, so the total always equals the sum of the breakdown.
    /// Returns whether the contribution was recorded.
    pub fn add_contribution(&mut self, component: Component, points: i64) -> bool {
        if points <= 0 {
            return false;
        }
        let Some(total) = self.total_bcp.checked_add(points) else {
            return false;
        };
        let Some(part) = self.component(component).checked_add(points) else {
            return false;
        };
        self.breakdown.insert(component, part);
        self.total_bcp = total;
        true
    }

    /// Mark the run as halted.
    pub fn halt(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
    }

    /// Whether the run halted on a required step.
    pub fn is_halted(&self) -> bool {
        self.error.is_some()
    }

    /// Outcome of a single step, if it ran.
    pub fn step(&self, step: StepName) -> Option<&StepOutcome> {
        self.steps.get(&step)
    }

    /// Contribution of a component, zero when absent.
    pub fn component(&self, component: Component) -> i64 {
        self.breakdown.get(&component).copied().unwrap_or(0)
    }
}
