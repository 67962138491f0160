//! React DOM and React Native components.

use crate::emit::indent;
use crate::js::{quote, value_literal};
use crate::layout::{name_layers, partition, unsupported, Generated, NamedLayer};
use crate::names::pascal_case;
use crate::style::{format_number, styles, StyleBag, StyleValue, Units};
use crate::target::{Framework, Target};
use crate::theme::{Resolver, Table, Theme};
use indexmap::IndexSet;
use logic_compiler::errors::Error;
use logic_compiler::value::Record;
use logic_syntax::component::{ArgumentValue, Component, LayerKind};

fn style_value(value: &StyleValue) -> String {
    match value {
        StyleValue::String(s) => quote(s),
        StyleValue::Number(n) => format_number(*n),
        StyleValue::Token(table, name) => format!("theme.{}.{name}", table.js_name()),
        StyleValue::Spread(table, name) => format!("...theme.{}.{name}", table.js_name()),
    }
}

fn style_object(bag: &StyleBag, depth: usize) -> String {
    if bag.is_empty() {
        return "{}".to_owned();
    }
    let pad = indent(depth + 1);
    let entries: Vec<String> = bag
        .iter()
        .map(|(key, value)| match value {
            StyleValue::Spread(..) => format!("{pad}{}", style_value(value)),
            _ => format!("{pad}{key}: {}", style_value(value)),
        })
        .collect();
    format!("{{\n{}\n{}}}", entries.join(",\n"), indent(depth))
}

fn object<I: IntoIterator<Item = (String, String)>>(entries: I, depth: usize) -> String {
    let pad = indent(depth + 1);
    let entries: Vec<String> = entries
        .into_iter()
        .map(|(k, v)| format!("{pad}{k}: {v}"))
        .collect();
    if entries.is_empty() {
        return "{}".to_owned();
    }
    format!("{{\n{}\n{}}}", entries.join(",\n"), indent(depth))
}

fn number_field(record: &Record, name: &str) -> f64 {
    record.fields.get(name).and_then(|v| v.as_number()).unwrap_or(0.0)
}

fn shadow_literal(record: &Record, framework: Framework) -> String {
    let color = record
        .fields
        .get("color")
        .and_then(|v| v.as_str())
        .unwrap_or("#000000");
    match framework {
        Framework::ReactDom => quote(&format!(
            "{}px {}px {}px {}px {color}",
            format_number(number_field(record, "x")),
            format_number(number_field(record, "y")),
            format_number(number_field(record, "blur")),
            format_number(number_field(record, "radius")),
        )),
        _ => format!(
            "{{ shadowColor: {}, shadowOffset: {{ width: {}, height: {} }}, shadowRadius: {}, shadowOpacity: 1 }}",
            quote(color),
            format_number(number_field(record, "x")),
            format_number(number_field(record, "y")),
            format_number(number_field(record, "blur")),
        ),
    }
}

/// The `theme` object literal.
pub fn theme_literal(theme: &Theme, framework: Framework) -> String {
    let mut tables = Vec::new();
    if !theme.colors.is_empty() {
        let colors = theme.colors.iter().map(|(k, v)| (k.clone(), quote(v)));
        tables.push((Table::Colors.js_name().to_owned(), object(colors, 1)));
    }
    if !theme.text_styles.is_empty() {
        let styles = theme.text_styles.iter().map(|(k, v)| {
            let fields = v.fields.iter().map(|(f, v)| (f.clone(), value_literal(v)));
            (k.clone(), object(fields, 2))
        });
        tables.push((Table::TextStyles.js_name().to_owned(), object(styles, 1)));
    }
    if !theme.shadows.is_empty() {
        let shadows = theme
            .shadows
            .iter()
            .map(|(k, v)| (k.clone(), shadow_literal(v, framework)));
        tables.push((Table::Shadows.js_name().to_owned(), object(shadows, 1)));
    }
    object(tables, 0)
}

/// Generates a React class component for the DOM or React Native.
pub fn component(component: &Component, theme: &Theme, target: Target) -> Generated {
    let root = name_layers(&component.root);
    let (layers, skipped) = partition(&root, target);
    let mut diagnostics: Vec<Error> = skipped.iter().map(|l| unsupported(l, target)).collect();

    let units = if target.capabilities().css_units {
        Units::Css
    } else {
        Units::Points
    };
    let mut resolver = Resolver::new(theme);
    let styles = styles(&layers, units, &mut resolver);
    diagnostics.append(&mut resolver.diagnostics);

    let writer = Writer {
        component,
        framework: target.framework,
        target,
        skipped: skipped.iter().map(|l| l.name.clone()).collect(),
    };
    let mut imports = IndexSet::new();
    let body = writer.element(&root, 3, &mut imports);

    let mut text = String::from("import React from \"react\"\n");
    if target.framework == Framework::ReactNative {
        let mut used: Vec<&str> = layers
            .iter()
            .filter_map(|l| match l.kind() {
                LayerKind::View => Some("View"),
                LayerKind::Text => Some("Text"),
                LayerKind::Image => Some("Image"),
                LayerKind::Vector | LayerKind::Component => None,
            })
            .chain(std::iter::once("StyleSheet"))
            .collect();
        used.sort_unstable();
        used.dedup();
        text.push_str(&format!(
            "import {{ {} }} from \"react-native\"\n",
            used.join(", ")
        ));
    }
    for name in imports.iter() {
        text.push_str(&format!("import {name} from \"./{name}\"\n"));
    }
    text.push_str(&format!(
        "\nexport default class {} extends React.Component {{\n  render() {{\n    return (\n{body}    )\n  }}\n}}\n",
        pascal_case(&component.name)
    ));
    if !theme.is_empty() {
        text.push_str(&format!(
            "\nlet theme = {}\n",
            theme_literal(theme, target.framework)
        ));
    }
    let bags = styles.iter().map(|(k, v)| (k.clone(), style_object(v, 1)));
    match target.framework {
        Framework::ReactNative => {
            text.push_str(&format!("\nconst styles = StyleSheet.create({})\n", object(bags, 0)))
        }
        _ => text.push_str(&format!("\nlet styles = {}\n", object(bags, 0))),
    }

    Generated {
        text,
        styles,
        diagnostics,
    }
}

struct Writer<'a> {
    component: &'a Component,
    framework: Framework,
    target: Target,
    skipped: IndexSet<String>,
}

impl Writer<'_> {
    fn tag(&self, kind: LayerKind) -> &'static str {
        match (self.framework, kind) {
            (Framework::ReactDom, LayerKind::View) => "div",
            (Framework::ReactDom, LayerKind::Text) => "span",
            (Framework::ReactDom, LayerKind::Image) => "img",
            (Framework::ReactDom, LayerKind::Vector) => "svg",
            (_, LayerKind::Text) => "Text",
            (_, LayerKind::Image) => "Image",
            _ => "View",
        }
    }

    /// A property of the enclosing component, or `null` if it declares no
    /// such parameter.
    fn prop(&self, parameter: &str) -> String {
        match self.component.parameter(parameter) {
            Some(p) => format!("this.props.{}", p.name),
            None => "null".to_owned(),
        }
    }

    fn style_attribute(&self, layer: &NamedLayer) -> String {
        let overrides: Vec<String> = layer
            .layer
            .bindings
            .iter()
            .filter(|(property, _)| !matches!(property.as_str(), "text" | "image"))
            .map(|(property, parameter)| format!("{property}: {}", self.prop(parameter)))
            .collect();
        if overrides.is_empty() {
            format!("style={{styles.{}}}", layer.name)
        } else {
            format!(
                "style={{{{ ...styles.{}, {} }}}}",
                layer.name,
                overrides.join(", ")
            )
        }
    }

    fn element(&self, layer: &NamedLayer, depth: usize, imports: &mut IndexSet<String>) -> String {
        let pad = indent(depth);
        if self.skipped.contains(&layer.name) {
            return format!(
                "{pad}{{/* {} layer {} is not supported by {} */}}\n",
                layer.kind().as_str(),
                layer.name,
                self.target
            );
        }
        let params = &layer.layer.parameters;
        match layer.kind() {
            LayerKind::Component => {
                let name = pascal_case(layer.layer.component.as_deref().unwrap_or_default());
                imports.insert(name.clone());
                let args: Vec<String> = layer
                    .layer
                    .arguments
                    .iter()
                    .map(|(key, value)| {
                        let value = match value {
                            ArgumentValue::Parameter { parameter } => self.prop(parameter),
                            ArgumentValue::Literal(serde_json::Value::Null) => "null".to_owned(),
                            ArgumentValue::Literal(v) => v.to_string(),
                        };
                        format!(" {key}={{{value}}}")
                    })
                    .collect();
                format!("{pad}<{name}{} />\n", args.concat())
            }
            LayerKind::Text => {
                let content = match layer.layer.bindings.get("text") {
                    Some(parameter) => self.prop(parameter),
                    None => quote(params.text.as_deref().unwrap_or_default()),
                };
                format!(
                    "{pad}<{tag} {}>\n{pad}  {{{content}}}\n{pad}</{tag}>\n",
                    self.style_attribute(layer),
                    tag = self.tag(LayerKind::Text)
                )
            }
            LayerKind::Image => {
                let source = match layer.layer.bindings.get("image") {
                    Some(parameter) => self.prop(parameter),
                    None => quote(params.image.as_deref().unwrap_or_default()),
                };
                let source = match self.framework {
                    Framework::ReactDom => format!("src={{{source}}}"),
                    _ => format!("source={{{{ uri: {source} }}}}"),
                };
                format!(
                    "{pad}<{} {} {source} />\n",
                    self.tag(LayerKind::Image),
                    self.style_attribute(layer)
                )
            }
            kind @ (LayerKind::View | LayerKind::Vector) => {
                let tag = self.tag(kind);
                if layer.children.is_empty() {
                    return format!("{pad}<{tag} {} />\n", self.style_attribute(layer));
                }
                let children: String = layer
                    .children
                    .iter()
                    .map(|c| self.element(c, depth + 1, imports))
                    .collect();
                format!(
                    "{pad}<{tag} {}>\n{children}{pad}</{tag}>\n",
                    self.style_attribute(layer)
                )
            }
        }
    }
}
