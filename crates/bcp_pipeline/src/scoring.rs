//! Scoring rules for the three scored steps.

use bcp_core::{Component, ParsedResponse, StepName};
use serde_json::{Map, Value};

/// How a step's response scored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepScore {
    /// Points for a breakdown component; may be zero
    Points {
        /// Component the points count towards
        component: Component,
        /// Contribution of the step
        points: i64,
    },
    /// The response is the raw-text sentinel
    Sentinel,
    /// The response, or a field the step reads, does not have the expected shape
    WrongShape {
        /// Shape the step expects
        expected: &'static str,
        /// Shape received
        found: &'static str,
    },
    /// A number in the response is too large to score
    OutOfRange {
        /// Field holding the number
        field: &'static str,
    },
    /// The step does not contribute to the score
    NotScored,
}

/// Score a step's response.
///
/// # Examples
///
/// ```
/// use bcp_core::{Component, ParsedResponse, StepName};
/// use bcp_pipeline::{score_step, StepScore};
///
/// let response = ParsedResponse::from(serde_json::json!({"Static": 5, "Dynamic": 6}));
/// assert_eq!(
///     score_step(StepName::UiElementsComplexity, &response),
///     StepScore::Points { component: Component::UiElements, points: 13 }
/// );
/// ```
pub fn score_step(step: StepName, response: &ParsedResponse) -> StepScore {
    let Some(component) = step.component() else {
        return StepScore::NotScored;
    };

    if response.is_sentinel() {
        return StepScore::Sentinel;
    }

    let points = match (step, response) {
        (StepName::ExternalIntegrationsComplexity, ParsedResponse::Array(items)) => {
            boundary_points(items)
        }
        (StepName::UiElementsComplexity, ParsedResponse::Object(map)) => interface_points(map),
        (StepName::BusinessRulesComplexity, ParsedResponse::Array(items)) => rule_points(items),
        (StepName::UiElementsComplexity, found) => {
            return StepScore::WrongShape {
                expected: "object",
                found: found.kind(),
            };
        }
        (_, found) => {
            return StepScore::WrongShape {
                expected: "array",
                found: found.kind(),
            };
        }
    };

    match points {
        Ok(points) => StepScore::Points { component, points },
        Err(skip) => skip,
    }
}

/// Points for one t-shirt size. Unknown sizes, including `L`, score 0.
pub fn size_points(size: &str) -> i64 {
    match size {
        "XS" => 1,
        "S" => 2,
        "M" => 3,
        "XL" => 8,
        _ => 0,
    }
}

/// Sum of the size points of every boundary object.
///
/// Items without a string `Size` score 0.
pub fn boundary_points(items: &[Value]) -> Result<i64, StepScore> {
    items
        .iter()
        .filter_map(|item| item.get("Size").and_then(Value::as_str))
        .map(size_points)
        .try_fold(0i64, |sum, points| {
            sum.checked_add(points)
                .ok_or(StepScore::OutOfRange { field: "Size" })
        })
}

/// `ceil(Static / 5) * 3 + ceil(Dynamic / 5) * 5`.
///
/// A missing count is 0; a count that is present but not a number is a
/// [`StepScore::WrongShape`].
pub fn interface_points(counts: &Map<String, Value>) -> Result<i64, StepScore> {
    let static_points = group_points(counts, "Static", 3)?;
    let dynamic_points = group_points(counts, "Dynamic", 5)?;
    static_points
        .checked_add(dynamic_points)
        .ok_or(StepScore::OutOfRange { field: "Dynamic" })
}

fn group_points(
    counts: &Map<String, Value>,
    field: &'static str,
    weight: i64,
) -> Result<i64, StepScore> {
    let count = match counts.get(field) {
        None => return Ok(0),
        Some(value) => value.as_f64().ok_or(StepScore::WrongShape {
            expected: "number",
            found: value_kind(value),
        })?,
    };

    let groups = (count / 5.0).ceil();
    // Casts saturate, so anything past the i64 range must be rejected first.
    if groups >= i64::MAX as f64 || groups <= i64::MIN as f64 {
        return Err(StepScore::OutOfRange { field });
    }
    (groups as i64)
        .checked_mul(weight)
        .ok_or(StepScore::OutOfRange { field })
}

/// Sum of the integer `Score` of every rule object.
///
/// Items without a `Score` score 0; a `Score` that is not an integer is a
/// [`StepScore::WrongShape`].
pub fn rule_points(items: &[Value]) -> Result<i64, StepScore> {
    items
        .iter()
        .filter_map(|item| item.get("Score"))
        .try_fold(0i64, |sum, score| {
            let score = match score.as_i64() {
                Some(score) => score,
                None if score.is_u64() => return Err(StepScore::OutOfRange { field: "Score" }),
                None => {
                    return Err(StepScore::WrongShape {
                        expected: "integer",
                        found: value_kind(score),
                    });
                }
            };
            sum.checked_add(score)
                .ok_or(StepScore::OutOfRange { field: "Score" })
        })
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
