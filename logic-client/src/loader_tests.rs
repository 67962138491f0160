use crate::{loader, parse_document, DirectoryLoader, Format};
use logic_compiler::errors::Kind;
use logic_compiler::value::Value;
use logic_compiler::{analyze, Loader};
use std::path::PathBuf;

const THEME: &str = r##"{ "type": "Declarations", "children": [
    { "type": "Namespace", "name": "Colors", "children": [
        { "type": "Variable", "name": "primary", "annotation": "Color", "value": "#FF0000" }
    ] }
] }"##;

fn library_dir(name: &str) -> anyhow::Result<PathBuf> {
    let dir = std::env::temp_dir().join(format!("lonac-{name}-{}", std::process::id()));
    std::fs::create_dir_all(&dir)?;
    std::fs::write(dir.join("Theme.logic"), THEME)?;
    Ok(dir)
}

#[test]
fn libraries_load_from_the_directory() -> anyhow::Result<()> {
    let dir = library_dir("directory")?;
    let mut loader = loader(Some(dir.clone()));
    let document = parse_document(
        r#"{ "type": "Program", "children": [
            { "type": "ImportDeclaration", "name": "Theme" },
            { "type": "Variable", "name": "c", "children": [
                { "type": "MemberExpression", "name": "primary", "children": [
                    { "type": "IdentifierExpression", "name": "Colors" }
                ] }
            ] }
        ] }"#,
    )?;
    let analysis = analyze(document, &mut loader)?;
    std::fs::remove_dir_all(dir)?;

    let path = vec!["c".to_owned()];
    assert!(analysis.diagnostics.is_empty(), "{:?}", analysis.diagnostics);
    assert_eq!(analysis.value_at(&path), Some(&Value::Color("#FF0000".to_owned())));
    assert_eq!(loader.len(), 1);

    Ok(())
}

#[test]
fn builtins_are_the_fallback() -> anyhow::Result<()> {
    let dir = library_dir("fallback")?;
    let mut loader = DirectoryLoader::new(Some(dir.clone()));
    let prelude = loader.load("Prelude")?;
    let missing = loader.load("Missing")?;
    std::fs::remove_dir_all(dir)?;

    assert_eq!(prelude, logic_compiler::BuiltinLoader::library("Prelude"));
    assert_eq!(missing, None);
    assert!(DirectoryLoader::default().load("Color")?.is_some());

    Ok(())
}

#[test]
fn documents_in_either_format() -> anyhow::Result<()> {
    let compact = parse_document(THEME)?;
    let json = logic_syntax::json::to_string(&compact)?;
    let parsed = parse_document(&json)?;

    assert_eq!(parsed, compact);
    assert!(parse_document("{ \"type\": \"Nonsense\" }").is_err());

    Ok(())
}

#[test]
fn formats_are_told_apart() {
    assert_eq!(Format::detect(THEME), Format::Compact);
    assert_eq!(Format::detect(r#"{ "type": "program", "data": {} }"#), Format::Json);
    assert_eq!(Format::detect("  <?xml version=\"1.0\"?><Program/>"), Format::Xml);
    assert_eq!(Format::detect("{ \"type\": "), Format::Json);
}

#[test]
fn compact_documents_parse_the_same_every_time() -> anyhow::Result<()> {
    let first = parse_document(THEME)?;
    let second = parse_document(THEME)?;

    assert_eq!(first, second);
    assert!(first.id().as_str().starts_with('n'));

    Ok(())
}

#[test]
fn malformed_logic_json_reports_the_json_error() -> anyhow::Result<()> {
    for text in [
        r#"{ "type": "program", "data": { "id": 3 } }"#,
        r#"{ "type": "Nonsense" }"#,
        r#"{ "type": "program", "data": "#,
    ] {
        let err = parse_document(text).expect_err("expected an error");
        assert_eq!(err.kind(), Kind::MalformedSyntax);
        assert_eq!(err.message(), "malformed JSON document", "{text}");
        assert_eq!(err.details().len(), 1, "{text}");
    }

    Ok(())
}

#[test]
fn xml_documents_parse() -> anyhow::Result<()> {
    let xml = parse_document(
        r##"<?xml version="1.0"?>
<Declarations>
  <Namespace name="Colors">
    <Variable name="primary" type="Color" value="#FF0000"/>
  </Namespace>
</Declarations>"##,
    )?;
    let compact = parse_document(THEME)?;

    assert_eq!(
        logic_syntax::json::structure(&xml)?,
        logic_syntax::json::structure(&compact)?
    );

    Ok(())
}
