//! Named variables supplied to prompt templates.

use crate::Story;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// String-keyed variables handed to the prompt renderer.
///
/// # Examples
///
/// ```
/// use bcp_core::{Story, StepVariables};
///
/// let vars = StepVariables::for_story(&Story::new("Login\nbody"))
///     .with_elements("Payments API");
/// assert_eq!(vars.get(StepVariables::STORY_NAME), Some("Login"));
/// assert_eq!(vars.elements(), Some("Payments API"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepVariables(BTreeMap<String, String>);

impl StepVariables {
    /// Variable holding the full story text.
    pub const STORY: &'static str = "story";
    /// Variable holding the story display name.
    pub const STORY_NAME: &'static str = "storyName";
    /// Variable holding the elements derived from step 3.
    pub const ELEMENTS: &'static str = "elements";

    /// Create an empty variable set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Variables every step receives: the story text and its name.
    pub fn for_story(story: &Story) -> Self {
        Self::new()
            .with(Self::STORY, story.text().clone())
            .with(Self::STORY_NAME, story.name().clone())
    }

    /// Add or replace a variable.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Add or replace the `elements` variable.
    pub fn with_elements(self, elements: impl Into<String>) -> Self {
        self.with(Self::ELEMENTS, elements)
    }

    /// Add or replace a variable in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Look up a variable.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// The `elements` variable, if set.
    pub fn elements(&self) -> Option<&str> {
        self.get(Self::ELEMENTS)
    }

    /// Variable names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}
