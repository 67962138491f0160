use crate::style::StyleValue;
use crate::tests::{component_output, EMPTY_PROGRAM};
use logic_compiler::errors::Kind;

const NESTED: &str = r#"{
    "name": "NestedComponent",
    "root": {
        "type": "View",
        "children": [
            { "type": "Text", "parameters": { "text": "Example nested component" } }
        ]
    }
}"#;

const SIZED: &str = r#"{
    "name": "Sized",
    "root": {
        "type": "View",
        "children": [
            { "type": "View", "parameters": {
                "widthSizingRule": "Fixed", "width": 150,
                "heightSizingRule": "Fixed", "height": 100 } },
            { "type": "Text", "parameters": {
                "text": "Fill", "widthSizingRule": "Expand", "heightSizingRule": "Expand" } },
            { "type": "Text", "parameters": { "text": "Hug", "width": 80 } }
        ]
    }
}"#;

fn string(s: &str) -> StyleValue {
    StyleValue::String(s.to_owned())
}

#[test]
fn nested_text_component() -> anyhow::Result<()> {
    let output = component_output(EMPTY_PROGRAM, NESTED, "js", "reactdom")?;

    assert_eq!(output.styles.keys().collect::<Vec<_>>(), vec!["view", "text"]);
    assert!(output.text.contains(r#"{"Example nested component"}"#), "{}", output.text);
    assert!(output.text.contains("<span style={styles.text}>"));
    assert!(output.text.contains("let styles = {"));
    assert!(output.diagnostics.is_empty(), "{:?}", output.diagnostics);

    Ok(())
}

#[test]
fn sizing_rules_on_the_dom() -> anyhow::Result<()> {
    let output = component_output(EMPTY_PROGRAM, SIZED, "js", "reactdom")?;
    let fixed = &output.styles["view1"];
    let fill = &output.styles["text"];
    let hug = &output.styles["text1"];

    assert_eq!(fixed.get("width"), Some(&string("150px")));
    assert_eq!(fixed.get("height"), Some(&string("100px")));
    assert_eq!(fill.get("flex"), Some(&string("1 1 0%")));
    assert_eq!(fill.get("alignSelf"), Some(&string("stretch")));
    assert_eq!(fill.get("height"), None);
    assert_eq!(fill.get("width"), None);
    assert_eq!(hug.get("flex"), Some(&string("0 0 auto")));
    assert_eq!(hug.get("width"), None);
    assert_eq!(hug.get("alignSelf"), None);
    assert!(output.text.contains(r#"width: "150px""#));

    Ok(())
}

#[test]
fn sizing_rules_on_react_native() -> anyhow::Result<()> {
    let output = component_output(EMPTY_PROGRAM, SIZED, "js", "reactnative")?;
    let fixed = &output.styles["view1"];

    assert_eq!(fixed.get("width"), Some(&StyleValue::Number(150.0)));
    assert_eq!(output.styles["text"].get("flex"), Some(&StyleValue::Number(1.0)));
    assert_eq!(fixed.get("display"), None);
    assert!(output.text.contains("const styles = StyleSheet.create({"));
    assert!(output.text.contains(r#"import { StyleSheet, Text, View } from "react-native""#));

    Ok(())
}

#[test]
fn generation_is_deterministic() -> anyhow::Result<()> {
    for framework in ["reactdom", "reactnative"] {
        let first = component_output(EMPTY_PROGRAM, SIZED, "js", framework)?;
        let second = component_output(EMPTY_PROGRAM, SIZED, "js", framework)?;
        assert_eq!(first.text, second.text);
        assert_eq!(first.styles, second.styles);
    }
    let first = component_output(EMPTY_PROGRAM, SIZED, "swift", "uikit")?;
    let second = component_output(EMPTY_PROGRAM, SIZED, "swift", "uikit")?;
    assert_eq!(first.text, second.text);

    Ok(())
}

const THEME: &str = r##"{ "type": "Declarations", "children": [
    { "type": "ImportDeclaration", "name": "Prelude" },
    { "type": "Namespace", "name": "Colors", "children": [
        { "type": "Variable", "name": "primary", "annotation": "Color", "value": "#FF0000" }
    ] },
    { "type": "Variable", "name": "body", "children": [
        { "type": "FunctionCallExpression", "children": [
            { "type": "IdentifierExpression", "name": "TextStyle" },
            { "type": "Argument", "label": "fontSize", "children": [
                { "type": "Literal", "annotation": "Number", "value": 16 }
            ] },
            { "type": "Argument", "label": "color", "children": [
                { "type": "MemberExpression", "name": "primary", "children": [
                    { "type": "IdentifierExpression", "name": "Colors" }
                ] }
            ] }
        ] }
    ] }
] }"##;

const THEMED: &str = r##"{
    "name": "Themed",
    "root": {
        "type": "View",
        "parameters": { "backgroundColor": "Colors.primary", "borderColor": "Colors.ghost" },
        "children": [
            { "type": "View", "parameters": { "backgroundColor": "#00FF00" } },
            { "type": "Text", "parameters": { "text": "Title", "textStyle": "body" } }
        ]
    }
}"##;

#[test]
fn theme_references_never_dangle() -> anyhow::Result<()> {
    let output = component_output(THEME, THEMED, "js", "reactdom")?;

    assert_eq!(output.theme.colors.get("colorsPrimary").map(String::as_str), Some("#FF0000"));
    assert!(output.theme.text_styles.contains_key("body"));
    assert_eq!(
        output.styles["view"].get("backgroundColor"),
        Some(&StyleValue::Token(crate::theme::Table::Colors, "colorsPrimary".to_owned()))
    );
    assert_eq!(output.styles["view"].get("borderColor"), None);
    assert_eq!(output.styles["view1"].get("backgroundColor"), Some(&string("#00FF00")));
    assert!(output.text.contains("backgroundColor: theme.colors.colorsPrimary"));
    assert!(output.text.contains("...theme.textStyles.body"));
    assert!(output.text.contains(r##"colorsPrimary: "#FF0000""##));
    assert!(!output.text.contains("ghost"));

    let unresolved: Vec<_> = output
        .diagnostics
        .iter()
        .filter(|d| d.kind() == Kind::UnresolvedIdentifier)
        .map(|d| d.message().to_owned())
        .collect();
    assert_eq!(unresolved, vec!["theme has no colors named colorsGhost".to_owned()]);

    Ok(())
}

const ICON: &str = r#"{
    "name": "Icon",
    "root": {
        "type": "View",
        "children": [
            { "type": "Vector", "name": "Icon", "parameters": { "image": "star.svg" } },
            { "type": "Text", "parameters": { "text": "Hi" } }
        ]
    }
}"#;

#[test]
fn vectors_are_skipped_where_unsupported() -> anyhow::Result<()> {
    let output = component_output(EMPTY_PROGRAM, ICON, "js", "reactnative")?;

    assert_eq!(output.styles.keys().collect::<Vec<_>>(), vec!["view", "text"]);
    assert!(output
        .text
        .contains("{/* Vector layer icon is not supported by js/reactnative */}"));
    assert!(output.text.contains(r#"{"Hi"}"#));
    let kinds: Vec<_> = output.diagnostics.iter().map(|d| d.kind()).collect();
    assert_eq!(kinds, vec![Kind::UnsupportedNode]);

    let output = component_output(EMPTY_PROGRAM, ICON, "js", "reactdom")?;
    assert!(output.styles.contains_key("icon"));
    assert!(output.text.contains("<svg style={styles.icon} />"));
    assert!(output.diagnostics.is_empty());

    let output = component_output(EMPTY_PROGRAM, ICON, "swift", "uikit")?;
    assert!(output.text.contains("// Vector layer icon is not supported by swift/uikit"));
    assert!(!output.text.contains("iconView"));

    Ok(())
}

const CARD: &str = r#"{
    "name": "Card",
    "params": [ { "name": "title", "type": "String" } ],
    "root": {
        "type": "View",
        "children": [
            { "type": "Text", "bindings": { "text": "title" } },
            { "type": "Component", "name": "Button", "component": "Button",
              "arguments": {
                  "label": { "parameter": "title" },
                  "icon": { "parameter": "nope" },
                  "badge": null
              } }
        ]
    }
}"#;

#[test]
fn instance_arguments_default_to_null() -> anyhow::Result<()> {
    let output = component_output(EMPTY_PROGRAM, CARD, "js", "reactdom")?;

    assert!(output.text.contains(r#"import Button from "./Button""#));
    assert!(output
        .text
        .contains("<Button label={this.props.title} icon={null} badge={null} />"));
    assert!(output.text.contains("{this.props.title}"));
    assert!(!output.styles.contains_key("button"));

    let output = component_output(EMPTY_PROGRAM, CARD, "swift", "uikit")?;
    assert!(output
        .text
        .contains("buttonView = Button(label: title, icon: nil, badge: nil)"));
    assert!(output.text.contains("textView.text = title"));
    assert!(output.text.contains("public var title: String { didSet { update() } }"));

    Ok(())
}

const PADDED: &str = r#"{
    "name": "Padded",
    "root": {
        "type": "View",
        "parameters": { "paddingTop": 10, "widthSizingRule": "Fixed", "width": 200 },
        "children": [
            { "type": "Text", "parameters": { "text": "Hello" } }
        ]
    }
}"#;

#[test]
fn uikit_views_are_pinned_by_constraints() -> anyhow::Result<()> {
    let output = component_output(EMPTY_PROGRAM, PADDED, "swift", "uikit")?;
    let text = &output.text;

    assert!(text.starts_with("import UIKit\n"));
    assert!(text.contains("public class Padded: UIView {"));
    assert!(text.contains("private var textView = UILabel()"));
    assert!(text.contains("textView.text = \"Hello\""));
    assert!(text.contains("    addSubview(textView)\n"));
    assert!(text.contains(
        "let textViewTopAnchorConstraint = textView.topAnchor.constraint(equalTo: topAnchor, constant: 10)"
    ));
    assert!(text.contains(
        "let textViewBottomAnchorConstraint = bottomAnchor.constraint(equalTo: textView.bottomAnchor, constant: 0)"
    ));
    assert!(text.contains(
        "let textViewTrailingAnchorConstraint = textView.trailingAnchor.constraint(lessThanOrEqualTo: trailingAnchor, constant: 0)"
    ));
    assert!(text.contains("let widthAnchorConstraint = widthAnchor.constraint(equalToConstant: 200)"));
    assert!(text.contains("NSLayoutConstraint.activate(["));

    let output = component_output(EMPTY_PROGRAM, PADDED, "swift", "appkit")?;
    assert!(output.text.contains("public class Padded: NSView {"));
    assert!(output
        .text
        .contains("private var textView = NSTextField(labelWithString: \"\")"));
    assert!(output.text.contains("textView.stringValue = \"Hello\""));

    Ok(())
}

#[test]
fn swift_theme_holds_fonts_and_colors() -> anyhow::Result<()> {
    let output = component_output(THEME, THEMED, "swift", "uikit")?;

    assert!(output.text.contains("private enum Theme {"));
    assert!(output
        .text
        .contains("static let colorsPrimary = UIColor(red: 1, green: 0, blue: 0, alpha: 1)"));
    assert!(output
        .text
        .contains("static let bodyFont = UIFont.systemFont(ofSize: 16, weight: .regular)"));
    assert!(output.text.contains("  enum Colors {\n    static let colorsPrimary"));
    assert!(output.text.contains("  enum TextStyles {\n    static let bodyFont"));
    assert!(output.text.contains("textView.font = Theme.TextStyles.bodyFont"));
    assert!(output.text.contains("textView.textColor = Theme.TextStyles.bodyColor"));
    assert!(output.text.contains("backgroundColor = Theme.Colors.colorsPrimary"));

    Ok(())
}

#[test]
fn swift_theme_tables_do_not_collide() -> anyhow::Result<()> {
    let program = r##"{ "type": "Declarations", "children": [
        { "type": "ImportDeclaration", "name": "Prelude" },
        { "type": "Variable", "name": "bodyColor", "annotation": "Color", "value": "#0000FF" },
        { "type": "Variable", "name": "body", "children": [
            { "type": "FunctionCallExpression", "children": [
                { "type": "IdentifierExpression", "name": "TextStyle" },
                { "type": "Argument", "label": "fontSize", "children": [
                    { "type": "Literal", "annotation": "Number", "value": 16 }
                ] },
                { "type": "Argument", "label": "color", "children": [
                    { "type": "Literal", "annotation": "Color", "value": "#FF0000" }
                ] }
            ] }
        ] }
    ] }"##;
    let component = r##"{
        "name": "Clash",
        "root": {
            "type": "View",
            "parameters": { "backgroundColor": "bodyColor" },
            "children": [
                { "type": "Text", "parameters": { "text": "Title", "textStyle": "body" } }
            ]
        }
    }"##;
    let output = component_output(program, component, "swift", "uikit")?;
    let text = &output.text;

    assert_eq!(text.matches("static let bodyColor =").count(), 2, "{text}");
    assert!(text.contains("    static let bodyColor = UIColor(red: 0, green: 0, blue: 1, alpha: 1)\n  }\n"));
    assert!(text.contains("backgroundColor = Theme.Colors.bodyColor"));
    assert!(text.contains("textView.textColor = Theme.TextStyles.bodyColor"));

    Ok(())
}
