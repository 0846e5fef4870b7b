//! Prompt sources backed by files and by the bundled templates.

use bcp_core::{PromptRef, StepVariables, Story};
use bcp_error::{BcpErrorKind, PromptErrorKind};
use bcp_interface::PromptSource;
use bcp_pipeline::{render, step_definitions, FilePromptSource, StaticPromptSource};
use std::fs;

#[test]
fn test_file_source_reads_templates() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("custom.jinja2"), "Story: {{ storyName }}")?;

    let source = FilePromptSource::new(dir.path());
    let template = source.template(&PromptRef::from("custom.jinja2"))?;
    assert_eq!(template, "Story: {{ storyName }}");
    assert_eq!(source.dir(), dir.path());
    Ok(())
}

#[test]
fn test_file_source_missing_template() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let source = FilePromptSource::new(dir.path());

    let err = source
        .template(&PromptRef::from("step1_flow_story_maturity_complexity.jinja2"))
        .unwrap_err();
    match err.kind() {
        BcpErrorKind::Prompt(prompt) => {
            assert!(matches!(&prompt.kind, PromptErrorKind::NotFound(path) if path.ends_with("step1_flow_story_maturity_complexity.jinja2")));
        }
        other => panic!("expected prompt error, got {other:?}"),
    }
    Ok(())
}

#[test]
fn test_file_source_directory_is_read_error() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    fs::create_dir(dir.path().join("nested.jinja2"))?;
    let source = FilePromptSource::new(dir.path());

    let err = source
        .template(&PromptRef::from("nested.jinja2"))
        .unwrap_err();
    assert!(matches!(err.kind(), BcpErrorKind::Prompt(_)));
    Ok(())
}

#[test]
fn test_bundled_templates_render_for_every_step() -> Result<(), Box<dyn std::error::Error>> {
    let source = StaticPromptSource::bundled();
    assert_eq!(source.len(), 6);

    let story = Story::new("Password reset\nAs a user I want to reset my password.");
    for step in step_definitions() {
        let variables = StepVariables::for_story(&story).with_elements("Email service");
        let prompt = render(&source.template(step.prompt())?, &variables)?;
        assert!(prompt.contains("Password reset"), "{}", step.name());
        assert!(!prompt.contains("{{"), "{}", step.name());
        assert!(!prompt.contains("{#"), "{}", step.name());
    }
    Ok(())
}

#[test]
fn test_bundled_templates_match_files_on_disk() -> Result<(), Box<dyn std::error::Error>> {
    let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("prompts");
    let files = FilePromptSource::new(dir);
    let bundled = StaticPromptSource::bundled();
    for step in step_definitions() {
        assert_eq!(files.template(step.prompt())?, bundled.template(step.prompt())?);
    }
    Ok(())
}
