use crate::component::{ArgumentValue, Component, LayerKind, SizingRule};

#[test]
fn parse_component() -> anyhow::Result<()> {
    let component = Component::parse(
        r#"{
            "name": "Card",
            "params": [ { "name": "title", "type": "String", "optional": true } ],
            "root": {
                "type": "View",
                "parameters": { "flexDirection": "row", "widthSizingRule": "Fixed", "width": 150 },
                "children": [
                    { "type": "Text", "bindings": { "text": "title" } },
                    { "type": "Component", "component": "Button",
                      "arguments": { "label": { "parameter": "title" }, "size": 2 } }
                ]
            }
        }"#,
    )?;

    assert_eq!(component.root.kind, LayerKind::View);
    assert_eq!(component.root.parameters.width_rule(), SizingRule::Fixed);
    assert_eq!(component.root.children[1].kind, LayerKind::Component);
    assert_eq!(
        component.root.children[1].arguments.get("label"),
        Some(&ArgumentValue::Parameter {
            parameter: "title".to_owned()
        })
    );
    assert_eq!(
        component.root.children[1].arguments.get("size"),
        Some(&ArgumentValue::Literal(serde_json::json!(2)))
    );
    assert!(component.parameter("title").is_some_and(|p| p.optional));

    Ok(())
}

#[test]
fn default_sizing_rule() -> anyhow::Result<()> {
    let component = Component::parse(r#"{ "name": "Empty", "root": { "type": "View" } }"#)?;

    assert_eq!(component.root.parameters.height_rule(), SizingRule::Shrink);

    Ok(())
}

#[test]
fn text_without_content() {
    let result = Component::parse(
        r#"{ "name": "Broken", "root": { "type": "View", "children": [ { "type": "Text" } ] } }"#,
    );
    assert!(result.is_err());
}

#[test]
fn instance_without_component() {
    let result = Component::parse(r#"{ "name": "Broken", "root": { "type": "Component" } }"#);
    assert!(result.is_err());
}
