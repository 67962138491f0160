//! Per-layer style tables.

use crate::layout::NamedLayer;
use crate::theme::{Reference, Resolver, Table};
use indexmap::IndexMap;
use logic_syntax::component::{FlexDirection, LayerKind, SizingRule};

#[derive(Clone, Debug, PartialEq)]
pub enum StyleValue {
    String(String),
    Number(f64),
    /// A reference into the theme, e.g. `theme.colors.primary`.
    Token(Table, String),
    /// The properties of a theme entry, spread into the style.
    Spread(Table, String),
}

/// Style properties in emission order.
pub type StyleBag = IndexMap<String, StyleValue>;

/// How lengths are written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Units {
    /// CSS strings such as `"150px"`.
    Css,
    /// Plain numbers.
    Points,
}

impl Units {
    fn length(&self, n: f64) -> StyleValue {
        match self {
            Units::Css => StyleValue::String(format!("{}px", format_number(n))),
            Units::Points => StyleValue::Number(n),
        }
    }
}

/// Formats a number without a fractional part when it is integral.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

fn string(s: &str) -> StyleValue {
    StyleValue::String(s.to_owned())
}

/// The sizing rules of a layer along its parent's primary and cross axes.
pub fn axis_rules(layer: &NamedLayer) -> (SizingRule, SizingRule) {
    let params = &layer.layer.parameters;
    match layer.parent_direction.unwrap_or(FlexDirection::Column) {
        FlexDirection::Column => (params.height_rule(), params.width_rule()),
        FlexDirection::Row => (params.width_rule(), params.height_rule()),
    }
}

fn color(bag: &mut StyleBag, key: &str, reference: Option<&str>, resolver: &mut Resolver) {
    let Some(reference) = reference else { return };
    match resolver.resolve(Table::Colors, reference) {
        Some(Reference::Token(table, name)) => {
            bag.insert(key.to_owned(), StyleValue::Token(table, name));
        }
        Some(Reference::Literal(c)) => {
            bag.insert(key.to_owned(), StyleValue::String(c));
        }
        None => {}
    }
}

/// Computes the style of one layer.
pub fn layer_style(layer: &NamedLayer, units: Units, resolver: &mut Resolver) -> StyleBag {
    let params = &layer.layer.parameters;
    let is_text = layer.kind() == LayerKind::Text;
    let (primary, cross) = axis_rules(layer);
    let mut bag = StyleBag::new();

    if is_text {
        if let Some(align) = &params.text_align {
            bag.insert("textAlign".to_owned(), string(align));
        }
        if let Some(style) = &params.text_style {
            if let Some(Reference::Token(table, name)) = resolver.resolve(Table::TextStyles, style) {
                bag.insert("textStyle".to_owned(), StyleValue::Spread(table, name));
            }
        }
    } else {
        let align = params.align_items.map(|a| a.as_css()).unwrap_or("flex-start");
        bag.insert("alignItems".to_owned(), string(align));
    }
    if cross == SizingRule::Expand && !layer.is_root() {
        bag.insert("alignSelf".to_owned(), string("stretch"));
    }
    color(&mut bag, "backgroundColor", params.background_color.as_deref(), resolver);
    if let Some(radius) = params.border_radius {
        bag.insert("borderRadius".to_owned(), units.length(radius));
    }
    if let Some(width) = params.border_width {
        bag.insert("borderWidth".to_owned(), units.length(width));
        if units == Units::Css {
            bag.insert("borderStyle".to_owned(), string("solid"));
        }
    }
    color(&mut bag, "borderColor", params.border_color.as_deref(), resolver);
    if units == Units::Css {
        bag.insert("display".to_owned(), string(if is_text { "block" } else { "flex" }));
    }

    let expands = if layer.is_root() {
        primary == SizingRule::Expand || cross == SizingRule::Expand
    } else {
        primary == SizingRule::Expand
    };
    if expands {
        bag.insert("flex".to_owned(), flex(units, "1 1 0%", 1.0));
    } else if primary == SizingRule::Shrink && !layer.is_root() {
        bag.insert("flex".to_owned(), flex(units, "0 0 auto", 0.0));
    }

    if !is_text {
        let direction = match params.direction() {
            FlexDirection::Column => "column",
            FlexDirection::Row => "row",
        };
        bag.insert("flexDirection".to_owned(), string(direction));
        let justify = params.justify_content.map(|a| a.as_css()).unwrap_or("flex-start");
        bag.insert("justifyContent".to_owned(), string(justify));
    }

    for (key, value) in [
        ("paddingTop", params.padding_top),
        ("paddingRight", params.padding_right),
        ("paddingBottom", params.padding_bottom),
        ("paddingLeft", params.padding_left),
        ("marginTop", params.margin_top),
        ("marginRight", params.margin_right),
        ("marginBottom", params.margin_bottom),
        ("marginLeft", params.margin_left),
    ] {
        if let Some(v) = value {
            bag.insert(key.to_owned(), units.length(v));
        }
    }
    if let Some(opacity) = params.opacity {
        bag.insert("opacity".to_owned(), StyleValue::Number(opacity));
    }
    if params.visible == Some(false) {
        bag.insert("display".to_owned(), string("none"));
    }
    if let Some(shadow) = &params.shadow {
        if let Some(Reference::Token(table, name)) = resolver.resolve(Table::Shadows, shadow) {
            match units {
                Units::Css => bag.insert("boxShadow".to_owned(), StyleValue::Token(table, name)),
                Units::Points => bag.insert("shadow".to_owned(), StyleValue::Spread(table, name)),
            };
        }
    }

    if params.width_rule() == SizingRule::Fixed {
        if let Some(width) = params.width {
            bag.insert("width".to_owned(), units.length(width));
        }
    }
    if params.height_rule() == SizingRule::Fixed {
        if let Some(height) = params.height {
            bag.insert("height".to_owned(), units.length(height));
        }
    }
    bag
}

fn flex(units: Units, css: &str, points: f64) -> StyleValue {
    match units {
        Units::Css => string(css),
        Units::Points => StyleValue::Number(points),
    }
}

/// Computes the style of the given layers, keyed by layer name.
/// Component instances carry no style of their own.
pub fn styles(layers: &[&NamedLayer], units: Units, resolver: &mut Resolver) -> IndexMap<String, StyleBag> {
    layers
        .iter()
        .filter(|l| l.kind() != LayerKind::Component)
        .map(|l| (l.name.clone(), layer_style(l, units, resolver)))
        .collect()
}
