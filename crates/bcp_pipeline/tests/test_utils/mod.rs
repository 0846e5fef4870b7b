//! Scripted doubles for pipeline tests.

#![allow(dead_code)]

use async_trait::async_trait;
use bcp_core::StepName;
use bcp_error::{BcpResult, ProviderError, ProviderErrorKind};
use bcp_interface::ModelDriver;
use bcp_pipeline::{step_definitions, StaticPromptSource};
use std::collections::HashMap;
use std::sync::Mutex;

/// First line of the test template for a step.
pub fn header(step: StepName) -> String {
    format!("# {}", step)
}

/// Prompt source whose templates start with a per-step header line followed
/// by every variable the step receives.
pub fn scripted_prompts() -> StaticPromptSource {
    step_definitions()
        .into_iter()
        .fold(StaticPromptSource::new(), |source, step| {
            let body = match step.name() {
                StepName::ExternalIntegrationsComplexity
                | StepName::UiElementsComplexity
                | StepName::BusinessRulesComplexity => "{{ storyName }}\n{{ elements }}",
                _ => "{{ storyName }}\n{{ story }}",
            };
            let template = format!("{}\n{}", header(*step.name()), body);
            source.with(step.prompt().clone(), template)
        })
}

enum Reply {
    Text(String),
    Fail(String),
}

/// Model driver answering each step from a script keyed by the prompt's
/// header line, and recording every prompt it receives.
#[derive(Default)]
pub struct ScriptedDriver {
    replies: HashMap<String, Reply>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, step: StepName, text: impl Into<String>) -> Self {
        self.replies.insert(header(step), Reply::Text(text.into()));
        self
    }

    pub fn fail(mut self, step: StepName, message: impl Into<String>) -> Self {
        self.replies.insert(header(step), Reply::Fail(message.into()));
        self
    }

    /// Prompts received so far, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }

    /// Whether the step's prompt was sent to the model.
    pub fn was_invoked(&self, step: StepName) -> bool {
        let header = header(step);
        self.prompts()
            .iter()
            .any(|prompt| prompt.lines().next() == Some(header.as_str()))
    }

    /// The prompt sent for a step, if any.
    pub fn prompt_for(&self, step: StepName) -> Option<String> {
        let header = header(step);
        self.prompts()
            .into_iter()
            .find(|prompt| prompt.lines().next() == Some(header.as_str()))
    }
}

#[async_trait]
impl ModelDriver for ScriptedDriver {
    async fn invoke(&self, prompt: &str) -> BcpResult<String> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        let key = prompt.lines().next().unwrap_or_default();
        match self.replies.get(key) {
            Some(Reply::Text(text)) => Ok(text.clone()),
            Some(Reply::Fail(message)) => Err(ProviderError::new(ProviderErrorKind::Api {
                status: 500,
                message: message.clone(),
            })
            .into()),
            None => Ok("I have nothing structured to say.".to_string()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted-model"
    }
}

/// Break-down covering every section the scoring steps read.
pub const FULL_BREAK_DOWN: &str = r#"Here is the breakdown:
```json
{
  "Business Narrative": "Shoppers pay for their basket",
  "User View": "Checkout page with card form",
  "Acceptance Criteria": ["card is validated", "receipt is emailed"],
  "Requirements and Business Rules": ["orders over 500 need review"],
  "Integrations (Boundaries)": ["Payment gateway", "Email service", "Fraud API"],
  "Test Plan": ["pay with valid card", "pay with expired card"]
}
```"#;

/// Script producing 13 + 13 + 6 = 32 points.
pub fn full_script() -> ScriptedDriver {
    ScriptedDriver::new()
        .reply(
            StepName::StoryMaturityComplexity,
            r#"{"step": "Maturity", "assessment": "Clear", "classification": "High", "total": 8}"#,
        )
        .reply(
            StepName::StoryInvestMaturity,
            "```json\n{\"step\": \"INVEST\", \"total\": 10}\n```",
        )
        .reply(StepName::BreakElements, FULL_BREAK_DOWN)
        .reply(
            StepName::ExternalIntegrationsComplexity,
            "```json\n[{\"Boundary\": 1, \"Size\": \"M\"}, {\"Boundary\": 2, \"Size\": \"S\"}, {\"Boundary\": 3, \"Size\": \"XL\"}]\n```",
        )
        .reply(
            StepName::UiElementsComplexity,
            "Counts:\n```\n{\"step\": \"Interface\", \"Static\": 5, \"Dynamic\": 6}\n```\n",
        )
        .reply(
            StepName::BusinessRulesComplexity,
            "```json\n[{\"Rule\": \"review\", \"Score\": 4}, {\"Rule\": \"limit\", \"Score\": 2}]\n```",
        )
}

pub const STORY: &str = "Checkout with card\nAs a shopper I want to pay by card so that I get my goods.";
