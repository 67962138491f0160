use crate::compile::{compile, OutputKind, Request};
use crate::target::Output;
use crate::tests::{component_output, logic_output};
use logic_compiler::errors::Kind;
use logic_compiler::BuiltinLoader;
use logic_syntax::ids::ConstantIds;
use logic_syntax::raw::{make, RawNode};

#[test]
fn json_output_matches_the_fixture() -> anyhow::Result<()> {
    let raw = RawNode::parse(
        r#"{ "type": "Declarations", "children": [
            { "type": "ImportDeclaration", "name": "Prelude" }
        ] }"#,
    )?;
    let document = make(&raw, &mut ConstantIds::new("0"))?;
    let request = Request {
        output: Output::Json,
        component: None,
    };
    let output = compile(document, &request, &mut BuiltinLoader)?;

    let expected = include_str!("../../logic-syntax/tests/fixtures/import_declaration.json");
    assert_eq!(output.kind, OutputKind::Document);
    assert_eq!(output.text, expected.trim_end());
    assert!(output.diagnostics.is_empty());

    Ok(())
}

#[test]
fn type_errors_do_not_stop_generation() -> anyhow::Result<()> {
    let output = logic_output(
        r#"{ "type": "Program", "children": [
            { "type": "Variable", "name": "bad", "annotation": "Number", "children": [
                { "type": "Literal", "annotation": "String", "value": "one" }
            ] },
            { "type": "Variable", "name": "ghostly", "children": [
                { "type": "IdentifierExpression", "name": "ghost" }
            ] }
        ] }"#,
        "swift",
        "uikit",
    )?;
    let kinds: Vec<_> = output.diagnostics.iter().map(|d| d.kind()).collect();

    assert_eq!(output.kind, OutputKind::Source);
    assert!(kinds.contains(&Kind::Unification));
    assert!(kinds.contains(&Kind::UnresolvedIdentifier));
    assert!(output.text.contains("public let bad: CGFloat = \"one\""));
    assert!(output.text.contains("public let ghostly: Void = ghost"));

    Ok(())
}

#[test]
fn missing_needed_library_is_fatal() -> anyhow::Result<()> {
    let result = component_output(
        r#"{ "type": "Program", "children": [
            { "type": "ImportDeclaration", "name": "Theme" },
            { "type": "Variable", "name": "c", "children": [
                { "type": "IdentifierExpression", "name": "primary" }
            ] }
        ] }"#,
        r#"{ "name": "Empty", "root": { "type": "View" } }"#,
        "js",
        "reactdom",
    );
    let err = result.expect_err("expected an import failure");
    let err = err.downcast::<logic_compiler::Error>()?;
    assert_eq!(err.kind(), Kind::ImportFailed);

    Ok(())
}
