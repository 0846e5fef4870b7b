//! Prompt template sources.

use bcp_core::PromptRef;
use bcp_error::{BcpResult, PromptError, PromptErrorKind};
use bcp_interface::PromptSource;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Loads templates from files in a directory, one file per reference.
#[derive(Debug, Clone)]
pub struct FilePromptSource {
    dir: PathBuf,
}

impl FilePromptSource {
    /// Creates a source reading from `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory templates are read from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl PromptSource for FilePromptSource {
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    fn template(&self, reference: &PromptRef) -> BcpResult<String> {
        let path = self.dir.join(reference.as_str());
        debug!(path = %path.display(), "Loading prompt template");
        std::fs::read_to_string(&path).map_err(|e| {
            let kind = match e.kind() {
                ErrorKind::NotFound => PromptErrorKind::NotFound(path.display().to_string()),
                _ => PromptErrorKind::Read {
                    reference: reference.to_string(),
                    message: e.to_string(),
                },
            };
            PromptError::new(kind).into()
        })
    }
}

/// In-memory templates keyed by reference.
#[derive(Debug, Clone, Default)]
pub struct StaticPromptSource {
    templates: BTreeMap<PromptRef, String>,
}

impl StaticPromptSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// The six step templates compiled into the binary.
    pub fn bundled() -> Self {
        Self::new()
            .with(
                "step1_flow_story_maturity_complexity.jinja2",
                include_str!("../prompts/step1_flow_story_maturity_complexity.jinja2"),
            )
            .with(
                "step2_flow_story_invest_maturity.jinja2",
                include_str!("../prompts/step2_flow_story_invest_maturity.jinja2"),
            )
            .with(
                "step3_flow_bcp_break_elements.jinja2",
                include_str!("../prompts/step3_flow_bcp_break_elements.jinja2"),
            )
            .with(
                "step4_flow_bcp_boundaries.jinja2",
                include_str!("../prompts/step4_flow_bcp_boundaries.jinja2"),
            )
            .with(
                "step5_flow_bcp_interface_elements.jinja2",
                include_str!("../prompts/step5_flow_bcp_interface_elements.jinja2"),
            )
            .with(
                "step6_flow_bcp_business_rule.jinja2",
                include_str!("../prompts/step6_flow_bcp_business_rule.jinja2"),
            )
    }

    /// Builder method to add a template.
    pub fn with(mut self, reference: impl Into<PromptRef>, template: impl Into<String>) -> Self {
        self.insert(reference, template);
        self
    }

    /// Add or replace a template.
    pub fn insert(&mut self, reference: impl Into<PromptRef>, template: impl Into<String>) {
        self.templates.insert(reference.into(), template.into());
    }

    /// Number of templates held.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether the source holds no templates.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl PromptSource for StaticPromptSource {
    fn template(&self, reference: &PromptRef) -> BcpResult<String> {
        self.templates
            .get(reference)
            .cloned()
            .ok_or_else(|| PromptError::new(PromptErrorKind::NotFound(reference.to_string())).into())
    }
}
