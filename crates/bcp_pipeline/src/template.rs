//! Prompt template rendering.
//!
//! Templates use a small Jinja-compatible subset: `{{ name }}` placeholders
//! and `{# ... #}` comments. Substituted values are inserted verbatim and are
//! never re-scanned.

use bcp_core::StepVariables;
use bcp_error::{BcpResult, TemplateError, TemplateErrorKind};
use regex::Regex;
use std::sync::LazyLock;

static COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{#.*?#\}").expect("valid comment pattern"));
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{\{(.*?)\}\}").expect("valid placeholder pattern"));
static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid identifier pattern"));

/// Render a template with the given variables.
///
/// # Errors
///
/// Fails with [`TemplateErrorKind::UndefinedVariable`] when a placeholder
/// names a missing variable, and with [`TemplateErrorKind::Syntax`] for a
/// placeholder that is not a plain identifier or an unclosed `{{` or `{#`.
///
/// # Examples
///
/// ```
/// use bcp_core::StepVariables;
/// use bcp_pipeline::render;
///
/// let vars = StepVariables::new().with("storyName", "Checkout");
/// let prompt = render("{# header #}Story: {{ storyName }}", &vars).unwrap();
/// assert_eq!(prompt, "Story: Checkout");
/// ```
pub fn render(template: &str, variables: &StepVariables) -> BcpResult<String> {
    let stripped = COMMENT.replace_all(template, "");
    let template: &str = &stripped;
    if template.contains("{#") {
        return Err(syntax("unclosed comment '{#'").into());
    }

    let mut rendered = String::with_capacity(template.len());
    let mut last = 0;

    for caps in PLACEHOLDER.captures_iter(template) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        push_literal(&mut rendered, &template[last..whole.start()])?;

        let name = inner.as_str().trim();
        if !IDENTIFIER.is_match(name) {
            return Err(syntax(format!("invalid placeholder '{}'", whole.as_str())).into());
        }
        let value = variables.get(name).ok_or_else(|| {
            TemplateError::new(TemplateErrorKind::UndefinedVariable(name.to_string()))
        })?;
        rendered.push_str(value);
        last = whole.end();
    }

    push_literal(&mut rendered, &template[last..])?;
    Ok(rendered)
}

fn push_literal(rendered: &mut String, literal: &str) -> BcpResult<()> {
    if literal.contains("{{") {
        return Err(syntax("unclosed placeholder '{{'").into());
    }
    rendered.push_str(literal);
    Ok(())
}

#[track_caller]
fn syntax(message: impl Into<String>) -> TemplateError {
    TemplateError::new(TemplateErrorKind::Syntax(message.into()))
}
