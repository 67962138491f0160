//! UIKit and AppKit view classes.

use crate::emit::indent;
use crate::js::quote;
use crate::layout::{name_layers, partition, unsupported, Generated, NamedLayer};
use crate::names::pascal_case;
use crate::style::{format_number, styles, StyleBag, StyleValue, Units};
use crate::swift::{color_literal, swift_type};
use crate::target::{Framework, Target};
use crate::theme::{Resolver, Table, Theme};
use indexmap::IndexSet;
use logic_compiler::inference::ty::Type;
use logic_compiler::value::Record;
use logic_syntax::component::{ArgumentValue, Component, FlexDirection, LayerKind, SizingRule};

fn font_weight(weight: &str) -> &'static str {
    match weight {
        "100" => ".ultraLight",
        "200" => ".thin",
        "300" => ".light",
        "500" => ".medium",
        "600" => ".semibold",
        "700" => ".bold",
        "800" => ".heavy",
        "900" => ".black",
        _ => ".regular",
    }
}

fn font(record: &Record, framework: Framework) -> String {
    let class = match framework {
        Framework::AppKit => "NSFont",
        _ => "UIFont",
    };
    let size = record
        .fields
        .get("fontSize")
        .and_then(|v| v.as_number())
        .unwrap_or(17.0);
    let weight = font_weight(
        record
            .fields
            .get("fontWeight")
            .and_then(|v| v.as_str())
            .unwrap_or("400"),
    );
    let system = format!("{class}.systemFont(ofSize: {}, weight: {weight})", format_number(size));
    match record.fields.get("fontFamily").and_then(|v| v.as_str()) {
        Some(family) => format!(
            "{class}(name: {}, size: {}) ?? {system}",
            quote(family),
            format_number(size)
        ),
        None => system,
    }
}

fn number(bag: &StyleBag, key: &str) -> f64 {
    match bag.get(key) {
        Some(StyleValue::Number(n)) => *n,
        _ => 0.0,
    }
}

/// A JSON argument as a Swift literal.
fn json_literal(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "nil".to_owned(),
        serde_json::Value::String(s) => quote(s),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(items) => {
            let items: Vec<String> = items.iter().map(json_literal).collect();
            format!("[{}]", items.join(", "))
        }
        serde_json::Value::Object(_) => "nil".to_owned(),
    }
}

/// Generates a view class for UIKit or AppKit.
pub fn component(component: &Component, theme: &Theme, target: Target) -> Generated {
    let root = name_layers(&component.root);
    let (layers, skipped) = partition(&root, target);
    let mut diagnostics = skipped.iter().map(|l| unsupported(l, target)).collect::<Vec<_>>();
    let mut resolver = Resolver::new(theme);
    let styles = styles(&layers, Units::Points, &mut resolver);
    diagnostics.append(&mut resolver.diagnostics);

    let writer = Writer {
        component,
        theme,
        framework: target.framework,
        target,
        skipped: skipped.iter().map(|l| l.name.clone()).collect(),
        styles: &styles,
    };
    let text = writer.class(&root, &layers);
    Generated {
        text,
        styles,
        diagnostics,
    }
}

struct Writer<'a> {
    component: &'a Component,
    theme: &'a Theme,
    framework: Framework,
    target: Target,
    skipped: IndexSet<String>,
    styles: &'a indexmap::IndexMap<String, StyleBag>,
}

impl Writer<'_> {
    fn appkit(&self) -> bool {
        self.framework == Framework::AppKit
    }

    /// The variable holding a layer's view, empty for the root.
    fn var(&self, layer: &NamedLayer) -> String {
        if layer.is_root() {
            String::new()
        } else {
            format!("{}View", layer.name)
        }
    }

    fn member(&self, layer: &NamedLayer, property: &str) -> String {
        if layer.is_root() {
            property.to_owned()
        } else {
            format!("{}.{property}", self.var(layer))
        }
    }

    fn layer_member(&self, layer: &NamedLayer, property: &str) -> String {
        let layer_property = if self.appkit() { "layer?" } else { "layer" };
        self.member(layer, &format!("{layer_property}.{property}"))
    }

    fn view_class(&self, layer: &NamedLayer) -> String {
        let kit = if self.appkit() { "NS" } else { "UI" };
        match layer.kind() {
            LayerKind::Text if self.appkit() => "NSTextField".to_owned(),
            LayerKind::Text => "UILabel".to_owned(),
            LayerKind::Image => format!("{kit}ImageView"),
            LayerKind::Component => pascal_case(layer.layer.component.as_deref().unwrap_or_default()),
            LayerKind::View | LayerKind::Vector => format!("{kit}View"),
        }
    }

    fn color(&self, value: &StyleValue) -> Option<String> {
        match value {
            StyleValue::Token(Table::Colors, key) => Some(format!("Theme.Colors.{key}")),
            StyleValue::String(hex) => Some(color_literal(hex, self.framework)),
            _ => None,
        }
    }

    fn class(&self, root: &NamedLayer, layers: &[&NamedLayer]) -> String {
        let name = pascal_case(&self.component.name);
        let kit = if self.appkit() { "AppKit" } else { "UIKit" };
        let base = if self.appkit() { "NSView" } else { "UIView" };

        let params: Vec<String> = self
            .component
            .params
            .iter()
            .map(|p| {
                let ty = swift_type(&Type::constant(&p.ty), self.framework);
                let ty = if p.optional { format!("{ty}?") } else { ty };
                format!("{}: {ty}", p.name)
            })
            .collect();

        let mut out = format!("import {kit}\n\n// MARK: - {name}\n\npublic class {name}: {base} {{\n\n");
        out.push_str("  // MARK: Lifecycle\n\n");
        out.push_str(&format!("  public init({}) {{\n", params.join(", ")));
        for p in self.component.params.iter() {
            out.push_str(&format!("    self.{0} = {0}\n", p.name));
        }
        for layer in layers.iter().filter(|l| l.kind() == LayerKind::Component) {
            out.push_str(&format!(
                "    {} = {}\n",
                self.var(layer),
                self.instance(layer)
            ));
        }
        out.push_str("\n    super.init(frame: .zero)\n\n    setUpViews()\n    setUpConstraints()\n\n    update()\n  }\n\n");
        out.push_str("  public required init?(coder aDecoder: NSCoder) {\n    fatalError(\"init(coder:) has not been implemented\")\n  }\n");

        if !params.is_empty() {
            out.push_str("\n  // MARK: Public\n\n");
            for p in params.iter() {
                out.push_str(&format!("  public var {p} {{ didSet {{ update() }} }}\n"));
            }
        }

        out.push_str("\n  // MARK: Private\n\n");
        for layer in layers.iter().filter(|l| !l.is_root()) {
            match layer.kind() {
                LayerKind::Component => out.push_str(&format!(
                    "  private var {}: {}\n",
                    self.var(layer),
                    self.view_class(layer)
                )),
                LayerKind::Text if self.appkit() => out.push_str(&format!(
                    "  private var {} = NSTextField(labelWithString: \"\")\n",
                    self.var(layer)
                )),
                _ => out.push_str(&format!(
                    "  private var {} = {}()\n",
                    self.var(layer),
                    self.view_class(layer)
                )),
            }
        }

        out.push_str("\n  private func setUpViews() {\n");
        for layer in layers.iter() {
            out.push_str(&self.properties(layer));
        }
        out.push_str(&self.hierarchy(root));
        out.push_str("  }\n");

        out.push_str("\n  private func setUpConstraints() {\n");
        out.push_str(&self.constraints(layers));
        out.push_str("  }\n");

        out.push_str("\n  private func update() {\n");
        for layer in layers.iter() {
            out.push_str(&self.bindings(layer));
        }
        out.push_str("  }\n}\n");

        let theme = self.theme_enum();
        if !theme.is_empty() {
            out.push_str("\n// MARK: - Theme\n\n");
            out.push_str(&theme);
        }
        out
    }

    fn instance(&self, layer: &NamedLayer) -> String {
        let args: Vec<String> = layer
            .layer
            .arguments
            .iter()
            .map(|(key, value)| {
                let value = match value {
                    ArgumentValue::Parameter { parameter } => match self.component.parameter(parameter) {
                        Some(p) => p.name.clone(),
                        None => "nil".to_owned(),
                    },
                    ArgumentValue::Literal(v) => json_literal(v),
                };
                format!("{key}: {value}")
            })
            .collect();
        format!("{}({})", self.view_class(layer), args.join(", "))
    }

    fn properties(&self, layer: &NamedLayer) -> String {
        let Some(bag) = self.styles.get(&layer.name) else {
            return String::new();
        };
        let params = &layer.layer.parameters;
        let mut lines = Vec::new();
        if layer.kind() == LayerKind::Text {
            if let Some(text) = &params.text {
                let property = if self.appkit() { "stringValue" } else { "text" };
                lines.push(format!("{} = {}", self.member(layer, property), quote(text)));
            }
            if let Some(StyleValue::Spread(Table::TextStyles, key)) = bag.get("textStyle") {
                lines.push(format!("{} = Theme.TextStyles.{key}Font", self.member(layer, "font")));
                let has_color = self
                    .theme
                    .text_styles
                    .get(key)
                    .is_some_and(|r| r.fields.contains_key("color"));
                if has_color {
                    lines.push(format!("{} = Theme.TextStyles.{key}Color", self.member(layer, "textColor")));
                }
            }
            if let Some(StyleValue::String(align)) = bag.get("textAlign") {
                let property = if self.appkit() { "alignment" } else { "textAlignment" };
                lines.push(format!("{} = .{align}", self.member(layer, property)));
            }
        }
        if layer.kind() == LayerKind::Image {
            if let Some(image) = &params.image {
                let class = if self.appkit() { "NSImage" } else { "UIImage" };
                lines.push(format!(
                    "{} = {class}(named: {})",
                    self.member(layer, "image"),
                    quote(image)
                ));
            }
        }
        if self.appkit() && bag.keys().any(|k| k.starts_with("border") || k == "backgroundColor" || k == "shadow") {
            lines.push(format!("{} = true", self.member(layer, "wantsLayer")));
        }
        if let Some(color) = bag.get("backgroundColor").and_then(|v| self.color(v)) {
            if self.appkit() {
                lines.push(format!("{} = {color}.cgColor", self.layer_member(layer, "backgroundColor")));
            } else {
                lines.push(format!("{} = {color}", self.member(layer, "backgroundColor")));
            }
        }
        if bag.contains_key("borderRadius") {
            lines.push(format!(
                "{} = {}",
                self.layer_member(layer, "cornerRadius"),
                format_number(number(bag, "borderRadius"))
            ));
        }
        if bag.contains_key("borderWidth") {
            lines.push(format!(
                "{} = {}",
                self.layer_member(layer, "borderWidth"),
                format_number(number(bag, "borderWidth"))
            ));
        }
        if let Some(color) = bag.get("borderColor").and_then(|v| self.color(v)) {
            lines.push(format!("{} = {color}.cgColor", self.layer_member(layer, "borderColor")));
        }
        if let Some(StyleValue::Spread(Table::Shadows, key)) = bag.get("shadow") {
            if let Some(shadow) = self.theme.shadows.get(key) {
                lines.extend(self.shadow(layer, shadow));
            }
        }
        if bag.contains_key("opacity") {
            let property = if self.appkit() { "alphaValue" } else { "alpha" };
            lines.push(format!(
                "{} = {}",
                self.member(layer, property),
                format_number(number(bag, "opacity"))
            ));
        }
        if matches!(bag.get("display"), Some(StyleValue::String(d)) if d == "none") {
            lines.push(format!("{} = true", self.member(layer, "isHidden")));
        }
        lines.iter().map(|l| format!("    {l}\n")).collect()
    }

    fn shadow(&self, layer: &NamedLayer, shadow: &Record) -> Vec<String> {
        let field = |name: &str| {
            shadow
                .fields
                .get(name)
                .and_then(|v| v.as_number())
                .map_or("0".to_owned(), format_number)
        };
        let color = shadow
            .fields
            .get("color")
            .and_then(|v| v.as_str())
            .map_or("#000000".to_owned(), str::to_owned);
        vec![
            format!(
                "{} = {}.cgColor",
                self.layer_member(layer, "shadowColor"),
                color_literal(&color, self.framework)
            ),
            format!("{} = 1", self.layer_member(layer, "shadowOpacity")),
            format!(
                "{} = CGSize(width: {}, height: {})",
                self.layer_member(layer, "shadowOffset"),
                field("x"),
                field("y")
            ),
            format!("{} = {}", self.layer_member(layer, "shadowRadius"), field("blur")),
        ]
    }

    fn hierarchy(&self, layer: &NamedLayer) -> String {
        let mut out = String::new();
        for child in layer.children.iter() {
            if self.skipped.contains(&child.name) {
                out.push_str(&format!(
                    "    // {} layer {} is not supported by {}\n",
                    child.kind().as_str(),
                    child.name,
                    self.target
                ));
                continue;
            }
            out.push_str(&format!(
                "    {}({})\n",
                self.member(layer, "addSubview"),
                self.var(child)
            ));
        }
        for child in layer.children.iter().filter(|c| !self.skipped.contains(&c.name)) {
            out.push_str(&self.hierarchy(child));
        }
        out
    }

    fn constraints(&self, layers: &[&NamedLayer]) -> String {
        let mut lines = Vec::new();
        let mut names = Vec::new();
        for layer in layers.iter() {
            lines.push(format!(
                "{} = false",
                self.member(layer, "translatesAutoresizingMaskIntoConstraints")
            ));
        }
        lines.push(String::new());
        for layer in layers.iter() {
            self.child_constraints(layer, &mut lines, &mut names);
        }
        for layer in layers.iter() {
            self.size_constraints(layer, &mut lines, &mut names);
        }
        let mut out: String = lines
            .iter()
            .map(|l| if l.is_empty() { "\n".to_owned() } else { format!("    {l}\n") })
            .collect();
        if !names.is_empty() {
            out.push_str("\n    NSLayoutConstraint.activate([\n");
            let names: Vec<String> = names.iter().map(|n| format!("{}{n}", indent(3))).collect();
            out.push_str(&names.join(",\n"));
            out.push_str("\n    ])\n");
        }
        out
    }

    fn constraint(
        &self,
        lines: &mut Vec<String>,
        names: &mut Vec<String>,
        name: String,
        definition: String,
    ) {
        lines.push(format!("let {name} = {definition}"));
        names.push(name);
    }

    /// Pins the children of a layer along its axes.
    fn child_constraints(&self, parent: &NamedLayer, lines: &mut Vec<String>, names: &mut Vec<String>) {
        let children: Vec<&NamedLayer> = parent
            .children
            .iter()
            .filter(|c| !self.skipped.contains(&c.name))
            .collect();
        let Some(parent_bag) = self.styles.get(&parent.name) else {
            return;
        };
        let direction = parent.layer.parameters.direction();
        let (start, end, cross_start, cross_end) = match direction {
            FlexDirection::Column => (
                ("topAnchor", "Top", "paddingTop", "marginTop"),
                ("bottomAnchor", "Bottom", "paddingBottom", "marginBottom"),
                ("leadingAnchor", "Leading", "paddingLeft", "marginLeft"),
                ("trailingAnchor", "Trailing", "paddingRight", "marginRight"),
            ),
            FlexDirection::Row => (
                ("leadingAnchor", "Leading", "paddingLeft", "marginLeft"),
                ("trailingAnchor", "Trailing", "paddingRight", "marginRight"),
                ("topAnchor", "Top", "paddingTop", "marginTop"),
                ("bottomAnchor", "Bottom", "paddingBottom", "marginBottom"),
            ),
        };
        let parent_primary = match direction {
            FlexDirection::Column => parent.layer.parameters.height_rule(),
            FlexDirection::Row => parent.layer.parameters.width_rule(),
        };
        let margin = |c: &NamedLayer, key: &str| {
            self.styles.get(&c.name).map_or(0.0, |b| number(b, key))
        };

        for (i, &child) in children.iter().enumerate() {
            let var = self.var(child);
            let anchor = |a: &str| self.member(child, a);

            let leading = match i.checked_sub(1).and_then(|j| children.get(j).copied()) {
                None => format!(
                    "{}.constraint(equalTo: {}, constant: {})",
                    anchor(start.0),
                    self.member(parent, start.0),
                    format_number(number(parent_bag, start.2) + margin(child, start.3))
                ),
                Some(previous) => format!(
                    "{}.constraint(equalTo: {}, constant: {})",
                    anchor(start.0),
                    self.member(previous, end.0),
                    format_number(margin(previous, end.3) + margin(child, start.3))
                ),
            };
            self.constraint(lines, names, format!("{var}{}AnchorConstraint", start.1), leading);

            if i + 1 == children.len() {
                let relation = if parent_primary == SizingRule::Shrink {
                    "equalTo"
                } else {
                    "greaterThanOrEqualTo"
                };
                self.constraint(
                    lines,
                    names,
                    format!("{var}{}AnchorConstraint", end.1),
                    format!(
                        "{}.constraint({relation}: {}, constant: {})",
                        self.member(parent, end.0),
                        anchor(end.0),
                        format_number(number(parent_bag, end.2) + margin(child, end.3))
                    ),
                );
            }

            self.constraint(
                lines,
                names,
                format!("{var}{}AnchorConstraint", cross_start.1),
                format!(
                    "{}.constraint(equalTo: {}, constant: {})",
                    anchor(cross_start.0),
                    self.member(parent, cross_start.0),
                    format_number(number(parent_bag, cross_start.2) + margin(child, cross_start.3))
                ),
            );
            let relation = match self.styles.get(&child.name).and_then(|b| b.get("alignSelf")) {
                Some(_) => "equalTo",
                None => "lessThanOrEqualTo",
            };
            self.constraint(
                lines,
                names,
                format!("{var}{}AnchorConstraint", cross_end.1),
                format!(
                    "{}.constraint({relation}: {}, constant: {})",
                    anchor(cross_end.0),
                    self.member(parent, cross_end.0),
                    format_number(-(number(parent_bag, cross_end.2) + margin(child, cross_end.3)))
                ),
            );
        }
    }

    fn size_constraints(&self, layer: &NamedLayer, lines: &mut Vec<String>, names: &mut Vec<String>) {
        let Some(bag) = self.styles.get(&layer.name) else {
            return;
        };
        let prefix = if layer.is_root() {
            String::new()
        } else {
            self.var(layer)
        };
        for (key, anchor, suffix) in [
            ("width", "widthAnchor", "Width"),
            ("height", "heightAnchor", "Height"),
        ] {
            if bag.contains_key(key) {
                let name = if prefix.is_empty() {
                    format!("{key}AnchorConstraint")
                } else {
                    format!("{prefix}{suffix}AnchorConstraint")
                };
                self.constraint(
                    lines,
                    names,
                    name,
                    format!(
                        "{}.constraint(equalToConstant: {})",
                        self.member(layer, anchor),
                        format_number(number(bag, key))
                    ),
                );
            }
        }
    }

    fn bindings(&self, layer: &NamedLayer) -> String {
        layer
            .layer
            .bindings
            .iter()
            .map(|(property, parameter)| {
                let value = match self.component.parameter(parameter) {
                    Some(p) => p.name.clone(),
                    None => "nil".to_owned(),
                };
                let line = match property.as_str() {
                    "text" if self.appkit() => format!("{} = {value}", self.member(layer, "stringValue")),
                    "visible" => format!("{} = !{value}", self.member(layer, "isHidden")),
                    "opacity" if self.appkit() => format!("{} = {value}", self.member(layer, "alphaValue")),
                    "opacity" => format!("{} = {value}", self.member(layer, "alpha")),
                    "backgroundColor" if self.appkit() => format!(
                        "{} = {value}.cgColor",
                        self.layer_member(layer, "backgroundColor")
                    ),
                    other => format!("{} = {value}", self.member(layer, other)),
                };
                format!("    {line}\n")
            })
            .collect()
    }

    /// One nested enum per table, so colour and text style keys never clash.
    fn theme_enum(&self) -> String {
        let colors: Vec<String> = self
            .theme
            .colors
            .iter()
            .map(|(key, hex)| format!("    static let {key} = {}\n", color_literal(hex, self.framework)))
            .collect();
        let mut text_styles = Vec::new();
        for (key, style) in self.theme.text_styles.iter() {
            text_styles.push(format!("    static let {key}Font = {}\n", font(style, self.framework)));
            if let Some(color) = style.fields.get("color").and_then(|v| v.as_str()) {
                text_styles.push(format!(
                    "    static let {key}Color = {}\n",
                    color_literal(color, self.framework)
                ));
            }
        }
        let tables: Vec<String> = [("Colors", colors), ("TextStyles", text_styles)]
            .into_iter()
            .filter(|(_, entries)| !entries.is_empty())
            .map(|(name, entries)| format!("  enum {name} {{\n{}  }}\n", entries.concat()))
            .collect();
        if tables.is_empty() {
            return String::new();
        }
        format!("private enum Theme {{\n{}}}\n", tables.join("\n"))
    }
}
