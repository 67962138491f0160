use crate::color::Rgba;
use crate::errors::Kind;
use crate::stdlib::{BuiltinLoader, Intrinsics, LIBRARIES};
use crate::tests::{analyze_from, declaration_named};
use crate::value::Value;

fn value_of(code: &str, name: &str) -> anyhow::Result<(Value, Vec<Kind>)> {
    let analysis = analyze_from(code)?;
    let decl = declaration_named(&analysis.program, name);
    let value = analysis.evaluation.value(&decl).cloned().unwrap_or_default();
    let kinds = analysis.diagnostics.iter().map(|d| d.kind()).collect();
    Ok((value, kinds))
}

#[test]
fn builtin_libraries_are_stable() {
    for name in LIBRARIES.iter().chain(std::iter::once(&"Prelude")) {
        let first = BuiltinLoader::library(name);
        assert!(first.is_some(), "{name}");
        assert_eq!(first, BuiltinLoader::library(name));
    }
    assert_eq!(BuiltinLoader::library("Nope"), None);
}

#[test]
fn every_function_has_an_intrinsic() {
    let intrinsics = Intrinsics::standard();
    let paths: [&[&str]; 9] = [
        &["Boolean", "or"],
        &["Boolean", "and"],
        &["Boolean", "not"],
        &["String", "concat"],
        &["Array", "at"],
        &["Optional", "value"],
        &["Color", "saturate"],
        &["TextStyle"],
        &["Shadow"],
    ];
    for path in paths {
        let path: Vec<String> = path.iter().map(|s| (*s).to_owned()).collect();
        assert!(intrinsics.contains(&path), "{path:?}");
    }
}

#[test]
fn boolean_or() -> anyhow::Result<()> {
    let (value, kinds) = value_of(
        r#"{ "type": "Program", "children": [
            { "type": "ImportDeclaration", "name": "Prelude" },
            { "type": "Variable", "name": "t", "children": [
                { "type": "FunctionCallExpression", "children": [
                    { "type": "MemberExpression", "name": "or", "children": [
                        { "type": "IdentifierExpression", "name": "Boolean" }
                    ] },
                    { "type": "Argument", "children": [
                        { "type": "Literal", "annotation": "Boolean", "value": false }
                    ] },
                    { "type": "Argument", "children": [
                        { "type": "Literal", "annotation": "Boolean", "value": true }
                    ] }
                ] }
            ] }
        ] }"#,
        "t",
    )?;

    assert_eq!(value, Value::Boolean(true));
    assert!(kinds.is_empty(), "{kinds:?}");

    Ok(())
}

#[test]
fn string_concat() -> anyhow::Result<()> {
    let (value, _) = value_of(
        r#"{ "type": "Program", "children": [
            { "type": "ImportDeclaration", "name": "String" },
            { "type": "Variable", "name": "s", "children": [
                { "type": "FunctionCallExpression", "children": [
                    { "type": "MemberExpression", "name": "concat", "children": [
                        { "type": "IdentifierExpression", "name": "String" }
                    ] },
                    { "type": "Argument", "children": [
                        { "type": "Literal", "annotation": "String", "value": "Lo" }
                    ] },
                    { "type": "Argument", "children": [
                        { "type": "Literal", "annotation": "String", "value": "gic" }
                    ] }
                ] }
            ] }
        ] }"#,
        "s",
    )?;

    assert_eq!(value, Value::String("Logic".to_owned()));

    Ok(())
}

#[test]
fn font_weights() -> anyhow::Result<()> {
    let analysis = analyze_from(
        r#"{ "type": "Program", "children": [
            { "type": "ImportDeclaration", "name": "FontWeight" }
        ] }"#,
    )?;
    let path = ["FontWeight".to_owned(), "bold".to_owned()];

    assert_eq!(
        analysis.value_at(&path),
        Some(&Value::String("700".to_owned()))
    );

    Ok(())
}

#[test]
fn array_index_out_of_bounds() -> anyhow::Result<()> {
    let (value, kinds) = value_of(
        r#"{ "type": "Program", "children": [
            { "type": "ImportDeclaration", "name": "Array" },
            { "type": "Variable", "name": "x", "children": [
                { "type": "FunctionCallExpression", "children": [
                    { "type": "MemberExpression", "name": "at", "children": [
                        { "type": "IdentifierExpression", "name": "Array" }
                    ] },
                    { "type": "Argument", "children": [
                        { "type": "Literal", "annotation": "Array(Number)", "children": [
                            { "type": "Literal", "annotation": "Number", "value": 1 }
                        ] }
                    ] },
                    { "type": "Argument", "children": [
                        { "type": "Literal", "annotation": "Number", "value": 3 }
                    ] }
                ] }
            ] }
        ] }"#,
        "x",
    )?;

    assert_eq!(value, Value::Unit);
    assert_eq!(kinds, vec![Kind::Evaluation]);

    Ok(())
}

#[test]
fn colors() {
    let red = Rgba::parse("#F00").expect("valid color");
    assert_eq!(red.to_hex(), "#FF0000");
    assert_eq!(Rgba::parse("#FF000080").map(|c| c.to_hex()), Some("#FF000080".to_owned()));
    assert_eq!(Rgba::parse("red"), None);
    assert_eq!(
        Rgba::parse("#FF0101").map(|c| c.saturate(0.0).to_hex()),
        Some("#808080".to_owned())
    );
}
