//! User story input.

use serde::{Deserialize, Serialize};

/// Name used when a story has no text at all.
pub const UNNAMED_STORY: &str = "Unnamed Story";

/// A user story submitted for scoring.
///
/// The text is opaque; only its first line is interpreted, as the display name.
///
/// # Examples
///
/// ```
/// use bcp_core::Story;
///
/// let story = Story::new("Password Reset\nAs a user I want to reset my password.");
/// assert_eq!(story.name(), "Password Reset");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct Story {
    /// Full story text
    text: String,
    /// Display name (first line of the trimmed text)
    name: String,
}

impl Story {
    /// Create a story, deriving its name from the first line.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let name = text
            .trim()
            .lines()
            .next()
            .map(str::to_string)
            .unwrap_or_else(|| UNNAMED_STORY.to_string());
        Self { text, name }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_skips_leading_blank_lines() {
        let story = Story::new("\n\n  Checkout flow\nbody");
        assert_eq!(story.name(), "Checkout flow");
    }

    #[test]
    fn empty_story_is_unnamed() {
        assert_eq!(Story::new("   ").name(), UNNAMED_STORY);
    }
}
