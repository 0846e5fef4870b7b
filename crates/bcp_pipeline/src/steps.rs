//! The fixed step sequence and the data flowing between steps.

use bcp_core::{ParsedResponse, StepDefinition, StepName};
use serde_json::{json, Map, Value};

/// Prefix of the error recorded when a required step fails.
pub const HALT_PREFIX: &str = "Failed to calculate BCP";

const BOUNDARIES_KEY: &str = "Integrations (Boundaries)";
const ACCEPTANCE_CRITERIA_KEY: &str = "Acceptance Criteria";
const INTERFACE_KEYS: [&str; 3] = ["User View", ACCEPTANCE_CRITERIA_KEY, "Test Plan"];
const BUSINESS_KEYS: [&str; 3] = [
    "Business Narrative",
    "Requirements and Business Rules",
    "Test Plan",
];

/// The six steps of a calculation, in execution order.
pub fn step_definitions() -> Vec<StepDefinition> {
    vec![
        StepDefinition::new(
            StepName::StoryMaturityComplexity,
            "step1_flow_story_maturity_complexity.jinja2",
            false,
        ),
        StepDefinition::new(
            StepName::StoryInvestMaturity,
            "step2_flow_story_invest_maturity.jinja2",
            false,
        ),
        StepDefinition::new(
            StepName::BreakElements,
            "step3_flow_bcp_break_elements.jinja2",
            true,
        ),
        StepDefinition::new(
            StepName::ExternalIntegrationsComplexity,
            "step4_flow_bcp_boundaries.jinja2",
            true,
        ),
        StepDefinition::new(
            StepName::UiElementsComplexity,
            "step5_flow_bcp_interface_elements.jinja2",
            true,
        ),
        StepDefinition::new(
            StepName::BusinessRulesComplexity,
            "step6_flow_bcp_business_rule.jinja2",
            true,
        ),
    ]
}

/// The `elements` variable for a step.
///
/// Returns `None` for steps that do not take elements. For the scoring
/// steps, an empty string means the break-down held nothing relevant and
/// the step's [`default_response`] applies.
///
/// # Examples
///
/// ```
/// use bcp_core::{ParsedResponse, StepName};
/// use bcp_pipeline::derive_elements;
///
/// let elements = ParsedResponse::from(serde_json::json!({
///     "Integrations (Boundaries)": ["Payment gateway", "CRM"]
/// }));
/// assert_eq!(
///     derive_elements(StepName::ExternalIntegrationsComplexity, Some(&elements)).as_deref(),
///     Some("Payment gateway, CRM")
/// );
/// assert_eq!(derive_elements(StepName::BreakElements, Some(&elements)), None);
/// ```
pub fn derive_elements(step: StepName, elements: Option<&ParsedResponse>) -> Option<String> {
    let object = elements.and_then(ParsedResponse::as_object);
    let derived = match step {
        StepName::ExternalIntegrationsComplexity => {
            object.and_then(|o| o.get(BOUNDARIES_KEY)).map(boundaries_text)
        }
        StepName::UiElementsComplexity => object.map(|o| section_text(o, &INTERFACE_KEYS)),
        StepName::BusinessRulesComplexity => object.map(|o| section_text(o, &BUSINESS_KEYS)),
        StepName::StoryMaturityComplexity
        | StepName::StoryInvestMaturity
        | StepName::BreakElements => return None,
    };
    Some(derived.unwrap_or_default())
}

/// Response used in place of a model call when a step has no elements.
pub fn default_response(step: StepName) -> Option<ParsedResponse> {
    let value = match step {
        StepName::ExternalIntegrationsComplexity => json!([{
            "Boundary": 1,
            "Summary": "There is no external integration detected",
            "Size": "XS"
        }]),
        StepName::UiElementsComplexity => json!({
            "step": "Interface",
            "description": "There is no interface elements detected",
            "total": 0
        }),
        StepName::BusinessRulesComplexity => json!({
            "step": "Business",
            "description": "There is no logical rules detected",
            "total": 0
        }),
        StepName::StoryMaturityComplexity
        | StepName::StoryInvestMaturity
        | StepName::BreakElements => return None,
    };
    Some(ParsedResponse::from(value))
}

fn boundaries_text(value: &Value) -> String {
    match value {
        Value::Array(items) => join_items(items),
        other => plain_text(other),
    }
}

fn join_items(items: &[Value]) -> String {
    items.iter().map(plain_text).collect::<Vec<_>>().join(", ")
}

fn plain_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn section_text(elements: &Map<String, Value>, keys: &[&str]) -> String {
    let mut section = Map::new();
    for key in keys {
        if let Some(value) = elements.get(*key) {
            let value = match value {
                Value::Array(items) if *key == ACCEPTANCE_CRITERIA_KEY => {
                    Value::String(join_items(items))
                }
                other => other.clone(),
            };
            section.insert((*key).to_string(), value);
        }
    }
    if section.is_empty() {
        return String::new();
    }

    serde_json::to_string_pretty(&Value::Object(section))
        .unwrap_or_default()
        .replace(['"', '\''], "")
}
