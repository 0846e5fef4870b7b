//! End-to-end runs of the step pipeline against a scripted model.

mod test_utils;

use bcp_core::{CalculationResult, Component, ParsedResponse, StepName, StepOutcome, Story};
use bcp_pipeline::{BcpCalculator, StaticPromptSource, HALT_PREFIX};
use serde_json::json;
use test_utils::{full_script, scripted_prompts, ScriptedDriver, STORY};

type ScriptedCalculator = BcpCalculator<ScriptedDriver, StaticPromptSource>;

async fn run(driver: ScriptedDriver) -> (CalculationResult, ScriptedCalculator) {
    let calculator = BcpCalculator::new(driver, scripted_prompts());
    let result = calculator.calculate(&Story::new(STORY)).await;
    (result, calculator)
}

fn assert_total_matches_breakdown(result: &CalculationResult) {
    assert_eq!(*result.total_bcp(), result.breakdown().values().sum::<i64>());
    assert!(result.breakdown().values().all(|points| *points > 0));
}

#[tokio::test]
async fn test_full_run_scores_32() {
    let (result, calculator) = run(full_script()).await;
    let driver = calculator.driver();

    assert_eq!(result.story_name(), "Checkout with card");
    assert!(result.error().is_none());
    assert_eq!(*result.total_bcp(), 32);
    assert_eq!(result.component(Component::ExternalIntegrations), 13);
    assert_eq!(result.component(Component::UiElements), 13);
    assert_eq!(result.component(Component::BusinessRules), 6);
    assert_eq!(result.steps().len(), 6);
    assert_total_matches_breakdown(&result);

    assert_eq!(driver.prompts().len(), 6);
    let boundaries = driver
        .prompt_for(StepName::ExternalIntegrationsComplexity)
        .unwrap();
    assert!(boundaries.contains("Payment gateway, Email service, Fraud API"));
    let interface = driver.prompt_for(StepName::UiElementsComplexity).unwrap();
    assert!(interface.contains("User View: Checkout page with card form"));
    assert!(interface.contains("card is validated, receipt is emailed"));
    assert!(!interface.contains("Business Narrative"));
    let rules = driver.prompt_for(StepName::BusinessRulesComplexity).unwrap();
    assert!(rules.contains("orders over 500 need review"));
    assert!(!rules.contains("User View"));
}

#[tokio::test]
async fn test_breakdown_serializes_with_display_names() {
    let (result, _) = run(full_script()).await;
    let value = serde_json::to_value(&result).unwrap();

    assert_eq!(
        value["breakdown"],
        json!({"External Integrations": 13, "UI Elements": 13, "Business Rules": 6})
    );
    assert_eq!(value["total_bcp"], 32);
    assert_eq!(value["steps"]["Story Maturity Complexity"]["classification"], "High");
    assert!(value.get("error").is_none());
}

#[tokio::test]
async fn test_empty_break_down_uses_defaults() {
    let driver = full_script().reply(
        StepName::BreakElements,
        "```json\n{\"Unrelated\": \"nothing useful\"}\n```",
    );
    let (result, calculator) = run(driver).await;
    let driver = calculator.driver();

    assert_eq!(*result.total_bcp(), 1);
    assert_eq!(result.component(Component::ExternalIntegrations), 1);
    assert_eq!(result.breakdown().len(), 1);
    assert!(result.error().is_none());
    assert_eq!(driver.prompts().len(), 3);
    for step in [
        StepName::ExternalIntegrationsComplexity,
        StepName::UiElementsComplexity,
        StepName::BusinessRulesComplexity,
    ] {
        assert!(!driver.was_invoked(step), "{step} should not call the model");
    }
    assert_eq!(
        result
            .step(StepName::UiElementsComplexity)
            .and_then(StepOutcome::response)
            .and_then(|r| r.get("description")),
        Some(&json!("There is no interface elements detected"))
    );
}

#[tokio::test]
async fn test_raw_text_break_down_uses_defaults() {
    let driver = full_script().reply(StepName::BreakElements, "Sorry, I cannot help with that.");
    let (result, _) = run(driver).await;

    assert_eq!(*result.total_bcp(), 1);
    assert!(
        result
            .step(StepName::BreakElements)
            .and_then(StepOutcome::response)
            .is_some_and(ParsedResponse::is_sentinel)
    );
}

#[tokio::test]
async fn test_required_step_failure_halts() {
    let driver = full_script().fail(StepName::ExternalIntegrationsComplexity, "gateway down");
    let (result, calculator) = run(driver).await;
    let driver = calculator.driver();

    let error = result.error().as_deref().unwrap();
    assert!(error.starts_with(&format!("{}: ", HALT_PREFIX)));
    assert!(error.contains("gateway down"));

    let marker = result.step(StepName::ExternalIntegrationsComplexity).unwrap();
    assert!(marker.error().is_some_and(|e| e.contains("gateway down")));
    assert!(result.step(StepName::UiElementsComplexity).is_none());
    assert!(result.step(StepName::BusinessRulesComplexity).is_none());
    assert!(!driver.was_invoked(StepName::UiElementsComplexity));
    assert!(!driver.was_invoked(StepName::BusinessRulesComplexity));
    assert_eq!(*result.total_bcp(), 0);
    assert_total_matches_breakdown(&result);

    let value = serde_json::to_value(&result).unwrap();
    assert!(value["steps"]["External Integrations Complexity"]["error"].is_string());
}

#[tokio::test]
async fn test_optional_step_failure_continues() {
    let driver = full_script().fail(StepName::StoryInvestMaturity, "overloaded");
    let (result, _) = run(driver).await;

    assert!(result.error().is_none());
    assert_eq!(*result.total_bcp(), 32);
    assert!(
        result
            .step(StepName::StoryInvestMaturity)
            .and_then(StepOutcome::error)
            .is_some()
    );
}

#[tokio::test]
async fn test_sentinel_responses_are_not_scored() {
    let driver = full_script()
        .reply(StepName::UiElementsComplexity, "About a dozen widgets.")
        .reply(StepName::BusinessRulesComplexity, "{\"raw_response\": \"echoed\"}");
    let (result, _) = run(driver).await;

    assert!(result.error().is_none());
    assert_eq!(result.component(Component::UiElements), 0);
    assert_eq!(result.component(Component::BusinessRules), 0);
    assert!(!result.breakdown().contains_key(&Component::UiElements));
    assert!(!result.breakdown().contains_key(&Component::BusinessRules));
    assert_eq!(*result.total_bcp(), 13);
    assert_total_matches_breakdown(&result);
}

#[tokio::test]
async fn test_wrong_shapes_and_large_size() {
    let driver = full_script()
        .reply(
            StepName::ExternalIntegrationsComplexity,
            "```json\n[{\"Size\": \"L\"}, {\"Size\": \"L\"}]\n```",
        )
        .reply(
            StepName::BusinessRulesComplexity,
            "```json\n{\"step\": \"Business\", \"total\": 9}\n```",
        );
    let (result, _) = run(driver).await;

    assert!(!result.breakdown().contains_key(&Component::ExternalIntegrations));
    assert!(!result.breakdown().contains_key(&Component::BusinessRules));
    assert_eq!(*result.total_bcp(), 13);
}

#[tokio::test]
async fn test_missing_template_is_step_error() {
    let prompts = StaticPromptSource::new();
    let calculator = BcpCalculator::new(full_script(), prompts);
    let result = calculator.calculate(&Story::new(STORY)).await;

    // Steps 1 and 2 are optional, step 3 is the first to halt.
    assert!(result.step(StepName::StoryMaturityComplexity).and_then(StepOutcome::error).is_some());
    let error = result.error().as_deref().unwrap();
    assert!(error.contains("Prompt not found"));
    assert!(error.contains("step3_flow_bcp_break_elements.jinja2"));
    assert!(calculator.driver().prompts().is_empty());
}

#[tokio::test]
async fn test_undefined_variable_is_step_error() {
    let prompts = scripted_prompts().with(
        "step3_flow_bcp_break_elements.jinja2",
        "# Break Elements\n{{ storyTitle }}",
    );
    let calculator = BcpCalculator::new(full_script(), prompts);
    let result = calculator.calculate(&Story::new(STORY)).await;

    let error = result.error().as_deref().unwrap();
    assert!(error.contains("'storyTitle' is undefined"));
    assert!(result.step(StepName::ExternalIntegrationsComplexity).is_none());
}

#[tokio::test]
async fn test_calculator_is_reusable() {
    let calculator = BcpCalculator::new(full_script(), scripted_prompts());
    let first = calculator.calculate(&Story::new(STORY)).await;
    let second = calculator
        .calculate(&Story::new("Another story\nwith other text"))
        .await;

    assert_eq!(*first.total_bcp(), 32);
    assert_eq!(*second.total_bcp(), 32);
    assert_eq!(second.story_name(), "Another story");
    assert_eq!(calculator.driver().prompts().len(), 12);
}

#[tokio::test]
async fn test_empty_story_is_unnamed() {
    let calculator = BcpCalculator::new(full_script(), scripted_prompts());
    let result = calculator.calculate(&Story::new("   \n")).await;
    assert_eq!(result.story_name(), "Unnamed Story");
}

#[tokio::test]
async fn test_overflowing_rule_score_is_skipped() {
    let driver = full_script().reply(
        StepName::BusinessRulesComplexity,
        "```json\n[{\"Rule\": \"fraud\", \"Score\": 9223372036854775800}]\n```",
    );
    let (result, _) = run(driver).await;

    assert!(result.error().is_none());
    assert_eq!(*result.total_bcp(), 26);
    assert_eq!(result.component(Component::BusinessRules), 0);
    assert!(result.step(StepName::BusinessRulesComplexity).is_some());
    assert_total_matches_breakdown(&result);
}

#[tokio::test]
async fn test_huge_interface_count_is_skipped() {
    let driver = full_script().reply(
        StepName::UiElementsComplexity,
        "```json\n{\"Static\": 1, \"Dynamic\": 1e300}\n```",
    );
    let (result, _) = run(driver).await;

    assert!(result.error().is_none());
    assert_eq!(*result.total_bcp(), 19);
    assert_eq!(result.component(Component::UiElements), 0);
    assert_total_matches_breakdown(&result);
}

#[tokio::test]
async fn test_non_numeric_interface_count_is_skipped() {
    let driver = full_script().reply(
        StepName::UiElementsComplexity,
        "```json\n{\"Static\": \"many\", \"Dynamic\": 6}\n```",
    );
    let (result, _) = run(driver).await;

    assert!(result.error().is_none());
    assert_eq!(*result.total_bcp(), 19);
    assert_eq!(result.component(Component::UiElements), 0);
    let recorded = result
        .step(StepName::UiElementsComplexity)
        .and_then(StepOutcome::response)
        .and_then(|response| response.get("Static"));
    assert_eq!(recorded, Some(&json!("many")));
    assert_total_matches_breakdown(&result);
}

#[tokio::test]
async fn test_break_down_keeps_sections_beside_raw_response() {
    let driver = full_script().reply(
        StepName::BreakElements,
        "```json\n{\"raw_response\": \"partial\", \"Integrations (Boundaries)\": [\"CRM\"]}\n```",
    );
    let (result, calculator) = run(driver).await;

    let recorded = result
        .step(StepName::BreakElements)
        .and_then(StepOutcome::response)
        .and_then(|response| response.get("Integrations (Boundaries)"));
    assert_eq!(recorded, Some(&json!(["CRM"])));
    let boundaries = calculator
        .driver()
        .prompt_for(StepName::ExternalIntegrationsComplexity)
        .unwrap();
    assert!(boundaries.contains("CRM"));
    assert_eq!(result.component(Component::ExternalIntegrations), 13);
}
