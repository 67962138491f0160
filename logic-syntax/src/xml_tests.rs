use crate::ast::{Declaration, Document, Expression, Literal, Statement};
use crate::builder::Builder;
use crate::errors::Error;
use crate::ids::{ConstantIds, SequentialIds};
use crate::raw::{make, RawNode};
use crate::{json, xml};

#[test]
fn record_declaration() -> anyhow::Result<()> {
    let doc = xml::from_str(
        r#"<?xml version="1.0"?>
<Declarations>
  <Record name="ThemedColor">
    <Variable name="light" type="Color" value="white"/>
    <Variable name="dark" type="Color" value="black"/>
  </Record>
</Declarations>"#,
        &mut SequentialIds::new("n"),
    )?;

    let Document::TopLevelDeclarations(top) = doc else { panic!("expected declarations") };
    let Declaration::Record(record) = &top.declarations[0] else { panic!("expected a record") };
    assert_eq!(record.name.name, "ThemedColor");
    let colors: Vec<_> = record
        .fields()
        .map(|f| match &f.initializer {
            Some(Expression::Literal(l)) => match &l.literal {
                Literal::Color(c) => c.value.clone(),
                _ => String::new(),
            },
            _ => String::new(),
        })
        .collect();
    assert_eq!(colors, vec!["white".to_owned(), "black".to_owned()]);

    Ok(())
}

#[test]
fn same_tree_as_the_compact_form() -> anyhow::Result<()> {
    let from_xml = xml::from_str(
        r#"<?xml version="1.0"?>
<Declarations>
  <ImportDeclaration name="Prelude"/>
  <Variable name="x" type="Number" value="123"/>
  <Namespace name="Test">
    <Variable name="b" type="Boolean" value="false"/>
  </Namespace>
</Declarations>"#,
        &mut ConstantIds::new("0"),
    )?;
    let from_compact = make(
        &RawNode::parse(
            r#"{ "type": "Declarations", "children": [
                { "type": "ImportDeclaration", "name": "Prelude" },
                { "type": "Variable", "name": "x", "annotation": "Number", "value": 123 },
                { "type": "Namespace", "name": "Test", "children": [
                    { "type": "Variable", "name": "b", "annotation": "Boolean", "value": false }
                ] }
            ] }"#,
        )?,
        &mut ConstantIds::new("0"),
    )?;

    assert_eq!(from_xml, from_compact);

    Ok(())
}

#[test]
fn prefixed_declarations_in_programs() -> anyhow::Result<()> {
    let doc = xml::from_str(
        r##"<Program>
  <Declaration.ImportDeclaration name="Prelude"/>
  <Declaration.Namespace name="Colors">
    <Variable name="a" type="Color" value="#FF3409"/>
  </Declaration.Namespace>
</Program>"##,
        &mut SequentialIds::new("n"),
    )?;

    let Document::Program(program) = doc else { panic!("expected a program") };
    assert_eq!(program.block.len(), 2);
    assert!(matches!(
        &program.block[1],
        Statement::Declaration(d) if matches!(&d.content, Declaration::Namespace(n) if n.name.name == "Colors")
    ));

    Ok(())
}

#[test]
fn printed_markup() -> anyhow::Result<()> {
    let mut ids = SequentialIds::new("n");
    let b = &mut Builder::new(&mut ids);
    let color = b.type_named("Color", vec![]);
    let white = b.color("white");
    let light = b.variable("light", Some(color), Some(white));
    let record = b.record("ThemedColor", vec![light]);
    let number = b.type_named("Number", vec![]);
    let small = b.case("small", vec![]);
    let custom = b.case("custom", vec![number]);
    let size = b.enumeration("Size", vec![small, custom]);
    let items = b.reference("items");
    let item = b.reference("item");
    let body = b.expression(item);
    let each = b.for_each("item", items, vec![body]);
    let label = b.string("a < b & \"c\"");
    let callee = b.reference("f");
    let call = b.call(callee, vec![(Some("text"), label)]);
    let statement = b.expression(call);
    let declarations = b.declaration(record);
    let enumeration = b.declaration(size);
    let doc = Document::Program(b.program(vec![declarations, enumeration, each, statement]));

    let text = xml::to_string(&doc)?;

    assert!(text.starts_with("<?xml version=\"1.0\"?>"));
    assert!(text.contains(r#"<Variable name="light" type="Color" value="white"/>"#));
    assert!(text.contains(r#"<Case name="custom" associatedValueTypes="Number"/>"#));
    assert!(text.contains(r#"<Loop pattern="item">"#));
    assert!(text.contains("&lt;"));

    let parsed = xml::from_str(&text, &mut SequentialIds::new("m"))?;
    assert_eq!(json::structure(&parsed)?, json::structure(&doc)?);

    Ok(())
}

#[test]
fn malformed_markup() {
    let mut ids = SequentialIds::new("n");
    assert!(matches!(xml::from_str("<Declarations>", &mut ids), Err(Error::Xml(_))));
    assert!(matches!(
        xml::from_str("<Declarations></Program>", &mut ids),
        Err(Error::Xml(_))
    ));
    assert!(matches!(
        xml::from_str("<Declarations><Unknown/></Declarations>", &mut ids),
        Err(Error::UnknownNode(_))
    ));
}
