use crate::compile::{compile, GenerationOutput, Request};
use crate::target::{Framework, Language, Output, Target};
use logic_compiler::errors::Kind;
use logic_compiler::BuiltinLoader;
use logic_syntax::ast::Document;
use logic_syntax::component::Component;
use logic_syntax::ids::SequentialIds;
use logic_syntax::raw::{make, RawNode};

pub const EMPTY_PROGRAM: &str = r#"{ "type": "Program", "children": [] }"#;

pub fn document_from(code: &str) -> anyhow::Result<Document> {
    let raw = RawNode::parse(code)?;
    Ok(make(&raw, &mut SequentialIds::new("n"))?)
}

pub fn logic_output(code: &str, language: &str, framework: &str) -> anyhow::Result<GenerationOutput> {
    let request = Request {
        output: Output::Logic(Target::parse(language, Some(framework))?),
        component: None,
    };
    Ok(compile(document_from(code)?, &request, &mut BuiltinLoader)?)
}

pub fn component_output(
    program: &str,
    component: &str,
    language: &str,
    framework: &str,
) -> anyhow::Result<GenerationOutput> {
    let request = Request {
        output: Output::Component(Target::parse(language, Some(framework))?),
        component: Some(Component::parse(component)?),
    };
    Ok(compile(document_from(program)?, &request, &mut BuiltinLoader)?)
}

#[test]
fn targets_default_their_framework() -> anyhow::Result<()> {
    assert_eq!(Target::parse("js", None)?.framework, Framework::ReactDom);
    assert_eq!(Target::parse("JavaScript", None)?.language, Language::Js);
    assert_eq!(Target::parse("swift", None)?.framework, Framework::UiKit);
    assert_eq!(
        Target::parse("swift", Some("appkit"))?.to_string(),
        "swift/appkit"
    );
    Ok(())
}

#[test]
fn mismatched_targets_are_rejected() {
    let err = Target::parse("swift", Some("reactdom")).expect_err("expected an invalid target");
    assert_eq!(err.kind(), Kind::InvalidTarget);
    assert_eq!(err.message(), "reactdom does not generate swift");

    let err = Target::parse("kotlin", None).expect_err("expected an unknown language");
    assert_eq!(err.kind(), Kind::InvalidTarget);
}

#[test]
fn only_the_dom_draws_vectors() -> anyhow::Result<()> {
    assert!(Target::parse("js", Some("reactdom"))?.capabilities().vectors);
    assert!(!Target::parse("js", Some("reactnative"))?.capabilities().vectors);
    assert!(!Target::parse("swift", Some("uikit"))?.capabilities().vectors);
    Ok(())
}

#[test]
fn components_need_a_component() -> anyhow::Result<()> {
    let request = Request {
        output: Output::Component(Target::parse("js", None)?),
        component: None,
    };
    let err = compile(document_from(EMPTY_PROGRAM)?, &request, &mut BuiltinLoader)
        .expect_err("expected a missing component");
    assert_eq!(err.kind(), Kind::InvalidTarget);
    Ok(())
}
