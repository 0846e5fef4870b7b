//! The step orchestrator.

use crate::{
    default_response, derive_elements, parse_response, render, score_step, step_definitions,
    StepScore, HALT_PREFIX,
};
use bcp_core::{
    CalculationResult, ParsedResponse, StepDefinition, StepName, StepOutcome, StepVariables, Story,
};
use bcp_error::BcpResult;
use bcp_interface::{ModelDriver, PromptSource};
use std::ops::ControlFlow;
use tracing::{debug, error, info, info_span, instrument, warn, Instrument};

/// Runs the six BCP steps for a story.
///
/// The calculator holds no per-run state: the elements produced by the
/// "Break Elements" step live in the local scope of [`calculate`], so one
/// calculator can serve any number of callers.
///
/// [`calculate`]: BcpCalculator::calculate
#[derive(Debug)]
pub struct BcpCalculator<D, P> {
    driver: D,
    prompts: P,
    steps: Vec<StepDefinition>,
}

impl<D, P> BcpCalculator<D, P>
where
    D: ModelDriver,
    P: PromptSource,
{
    /// Creates a calculator using `driver` for model calls and `prompts` for
    /// step templates.
    pub fn new(driver: D, prompts: P) -> Self {
        Self {
            driver,
            prompts,
            steps: step_definitions(),
        }
    }

    /// The model driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// The prompt source.
    pub fn prompts(&self) -> &P {
        &self.prompts
    }

    /// The steps run by [`calculate`](Self::calculate), in order.
    pub fn steps(&self) -> &[StepDefinition] {
        &self.steps
    }

    /// Calculate the Business Complexity Points of a story.
    ///
    /// Steps run strictly in order. A failing optional step is recorded and
    /// skipped; a failing required step is recorded and ends the run with
    /// [`CalculationResult::error`] set. The result is returned either way.
    #[instrument(
        skip(self, story),
        fields(
            story_name = %story.name(),
            provider = self.driver.provider_name(),
            model = self.driver.model_name(),
        )
    )]
    pub async fn calculate(&self, story: &Story) -> CalculationResult {
        info!("Starting BCP calculation");

        let mut result = CalculationResult::new(story.name().clone());
        let mut elements: Option<ParsedResponse> = None;

        for step in &self.steps {
            let span = info_span!("step", step = %step.name());
            let outcome = self
                .execute_step(step, story, elements.as_ref())
                .instrument(span.clone())
                .await;
            let flow = span.in_scope(|| fold_step(&mut result, &mut elements, step, outcome));
            if flow.is_break() {
                return result;
            }
        }

        info!(total_bcp = result.total_bcp(), "BCP calculation completed");
        result
    }

    async fn execute_step(
        &self,
        step: &StepDefinition,
        story: &Story,
        elements: Option<&ParsedResponse>,
    ) -> BcpResult<ParsedResponse> {
        info!("Processing step");

        let mut variables = StepVariables::for_story(story);
        if let Some(derived) = derive_elements(*step.name(), elements) {
            debug!(elements = %derived, "Using elements section");
            if derived.is_empty() {
                if let Some(response) = default_response(*step.name()) {
                    info!("No elements found, using default response");
                    return Ok(response);
                }
            }
            variables.insert(StepVariables::ELEMENTS, derived);
        }

        let template = self.prompts.template(step.prompt())?;
        let prompt = render(&template, &variables)?;
        debug!(prompt_length = prompt.len(), "Rendered prompt");

        let raw = self.driver.invoke(&prompt).await?;
        debug!(response_length = raw.len(), "Received model response");

        let parsed = parse_response(&raw);
        if parsed.is_sentinel() {
            warn!("Model response contained no usable JSON");
        }
        Ok(parsed)
    }
}

fn fold_step(
    result: &mut CalculationResult,
    elements: &mut Option<ParsedResponse>,
    step: &StepDefinition,
    outcome: BcpResult<ParsedResponse>,
) -> ControlFlow<()> {
    let name = *step.name();
    match outcome {
        Ok(response) => {
            info!("Step completed successfully");
            if name == StepName::BreakElements {
                *elements = Some(response.clone());
            }
            if step.is_scored() {
                apply_score(result, name, &response);
            }
            result.record_step(name, response);
            ControlFlow::Continue(())
        }
        Err(e) => {
            error!(error = %e, "Error processing step");
            result.record_step(name, StepOutcome::failed(&e));
            if *step.required() {
                error!("Required step failed, cannot calculate BCP");
                result.halt(format!("{}: {}", HALT_PREFIX, e));
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        }
    }
}

fn apply_score(result: &mut CalculationResult, name: StepName, response: &ParsedResponse) {
    match score_step(name, response) {
        StepScore::Points { component, points } => {
            if result.add_contribution(component, points) {
                debug!(%component, points, "Added step contribution");
            } else if points > 0 {
                warn!(
                    points,
                    total_bcp = result.total_bcp(),
                    "Contribution overflows total, skipping step"
                );
            } else {
                warn!(points, "No BCP value found in response");
            }
        }
        StepScore::Sentinel => warn!("Raw response cannot be scored, skipping step"),
        StepScore::WrongShape { expected, found } => {
            warn!(expected, found, "Unexpected response shape, skipping step")
        }
        StepScore::OutOfRange { field } => {
            warn!(field, "Value too large to score, skipping step")
        }
        StepScore::NotScored => {}
    }
}
