use crate::compile::analyze;
use crate::errors::Kind;
use crate::inference::ty::Type;
use crate::stdlib::BuiltinLoader;
use crate::tests::{analyze_from, declaration_named, document_from};
use crate::value::Value;

#[test]
fn missing_library_is_fatal_when_needed() -> anyhow::Result<()> {
    let document = document_from(
        r#"{ "type": "Program", "children": [
            { "type": "ImportDeclaration", "name": "Theme" },
            { "type": "Variable", "name": "c", "children": [
                { "type": "IdentifierExpression", "name": "primary" }
            ] }
        ] }"#,
    )?;
    let err = analyze(document, &mut BuiltinLoader).expect_err("expected an import failure");

    assert_eq!(err.kind(), Kind::ImportFailed);
    assert!(err.node().is_some());

    Ok(())
}

#[test]
fn missing_library_is_a_warning_otherwise() -> anyhow::Result<()> {
    let analysis = analyze_from(
        r#"{ "type": "Program", "children": [
            { "type": "ImportDeclaration", "name": "Theme" },
            { "type": "Variable", "name": "c", "annotation": "Number", "value": 1 }
        ] }"#,
    )?;

    assert_eq!(analysis.diagnostics.len(), 1);
    assert_eq!(analysis.diagnostics[0].kind(), Kind::ImportFailed);

    Ok(())
}

#[test]
fn diagnostics_name_the_unresolved() -> anyhow::Result<()> {
    let analysis = analyze_from(
        r#"{ "type": "Program", "children": [
            { "type": "Variable", "name": "a", "children": [
                { "type": "IdentifierExpression", "name": "ghost" }
            ] },
            { "type": "Namespace", "name": "N" },
            { "type": "Variable", "name": "b", "children": [
                { "type": "MemberExpression", "name": "missing", "children": [
                    { "type": "IdentifierExpression", "name": "N" }
                ] }
            ] }
        ] }"#,
    )?;
    let messages: Vec<_> = analysis
        .diagnostics
        .iter()
        .map(|d| (d.kind(), d.message().to_owned()))
        .collect();

    assert_eq!(
        messages,
        vec![
            (Kind::UnresolvedIdentifier, "ghost is undefined".to_owned()),
            (Kind::UnresolvedMember, "N.missing is undefined".to_owned()),
        ]
    );

    Ok(())
}

#[test]
fn inconclusive_types_fall_back() -> anyhow::Result<()> {
    let analysis = analyze_from(
        r#"{ "type": "Program", "children": [
            { "type": "Variable", "name": "declared", "annotation": "Number" },
            { "type": "Variable", "name": "nothing", "children": [
                { "type": "Literal" }
            ] },
            { "type": "Variable", "name": "unknown", "children": [
                { "type": "IdentifierExpression", "name": "ghost" }
            ] },
            { "type": "Variable", "name": "bad", "annotation": "Number", "children": [
                { "type": "Literal", "annotation": "String", "value": "one" }
            ] }
        ] }"#,
    )?;
    let type_of = |name: &str| analysis.declaration_type(&declaration_named(&analysis.program, name));

    assert_eq!(type_of("declared"), Type::number());
    assert_eq!(type_of("nothing"), Type::optional(Type::unit()));
    assert_eq!(type_of("unknown"), Type::unit());
    assert_eq!(type_of("bad"), Type::number());
    assert!(analysis
        .diagnostics
        .iter()
        .any(|d| d.kind() == Kind::Unification));

    Ok(())
}

#[test]
fn values_by_qualified_path() -> anyhow::Result<()> {
    let analysis = analyze_from(
        r##"{ "type": "Declarations", "children": [
            { "type": "ImportDeclaration", "name": "Prelude" },
            { "type": "Namespace", "name": "Colors", "children": [
                { "type": "Variable", "name": "primary", "annotation": "Color", "value": "#FF0000" },
                { "type": "Variable", "name": "muted", "children": [
                    { "type": "FunctionCallExpression", "children": [
                        { "type": "MemberExpression", "name": "saturate", "children": [
                            { "type": "IdentifierExpression", "name": "Color" }
                        ] },
                        { "type": "Argument", "children": [
                            { "type": "IdentifierExpression", "name": "primary" }
                        ] },
                        { "type": "Argument", "children": [
                            { "type": "Literal", "annotation": "Number", "value": 0 }
                        ] }
                    ] }
                ] }
            ] }
        ] }"##,
    )?;
    let path = |names: &[&str]| names.iter().map(|s| (*s).to_owned()).collect::<Vec<_>>();

    assert!(analysis.diagnostics.is_empty(), "{:?}", analysis.diagnostics);
    assert_eq!(
        analysis.value_at(&path(&["Colors", "primary"])),
        Some(&Value::Color("#FF0000".to_owned()))
    );
    assert_eq!(
        analysis.value_at(&path(&["Colors", "muted"])),
        Some(&Value::Color("#808080".to_owned()))
    );
    assert!(analysis.libraries.contains("Color"));

    Ok(())
}
