//! Visual component trees.

use crate::errors::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub name: String,
    #[serde(default)]
    pub params: Vec<ComponentParameter>,
    pub root: Layer,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub optional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerKind {
    View,
    Text,
    Image,
    Vector,
    Component,
}

impl LayerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayerKind::View => "View",
            LayerKind::Text => "Text",
            LayerKind::Image => "Image",
            LayerKind::Vector => "Vector",
            LayerKind::Component => "Component",
        }
    }
}

/// An argument passed to a nested component instance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgumentValue {
    /// Forwards a parameter of the enclosing component.
    Parameter { parameter: String },
    Literal(Value),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    #[serde(rename = "type")]
    pub kind: LayerKind,
    /// The user-given name, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The component instantiated by a `Component` layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    #[serde(default)]
    pub parameters: LayerParameters,
    /// Layer properties driven by component parameters.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub bindings: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub arguments: IndexMap<String, ArgumentValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Layer>,
}

impl Layer {
    pub fn new(kind: LayerKind) -> Self {
        Layer {
            kind,
            name: None,
            component: None,
            parameters: Default::default(),
            bindings: Default::default(),
            arguments: Default::default(),
            children: Vec::new(),
        }
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_owned());
        self
    }

    pub fn with_child(mut self, child: Layer) -> Self {
        self.children.push(child);
        self
    }

    fn validate(&self) -> Result<()> {
        match self.kind {
            LayerKind::Component if self.component.is_none() => {
                return Err(Error::Component(format!(
                    "component layer {} names no component",
                    self.name.as_deref().unwrap_or("<unnamed>")
                )))
            }
            LayerKind::Text
                if self.parameters.text.is_none() && !self.bindings.contains_key("text") =>
            {
                return Err(Error::Component(format!(
                    "text layer {} has no text",
                    self.name.as_deref().unwrap_or("<unnamed>")
                )))
            }
            _ => {}
        }
        self.children.iter().try_for_each(Layer::validate)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlexDirection {
    Row,
    Column,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Alignment {
    FlexStart,
    Center,
    FlexEnd,
}

impl Alignment {
    pub fn as_css(&self) -> &'static str {
        match self {
            Alignment::FlexStart => "flex-start",
            Alignment::Center => "center",
            Alignment::FlexEnd => "flex-end",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizingRule {
    Fixed,
    Expand,
    #[default]
    Shrink,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flex_direction: Option<FlexDirection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align_items: Option<Alignment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub justify_content: Option<Alignment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width_sizing_rule: Option<SizingRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_sizing_rule: Option<SizingRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_top: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_right: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_bottom: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_left: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin_top: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin_right: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin_bottom: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin_left: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resize_mode: Option<String>,
}

impl LayerParameters {
    pub fn width_rule(&self) -> SizingRule {
        self.width_sizing_rule.unwrap_or_default()
    }

    pub fn height_rule(&self) -> SizingRule {
        self.height_sizing_rule.unwrap_or_default()
    }

    pub fn direction(&self) -> FlexDirection {
        self.flex_direction.unwrap_or(FlexDirection::Column)
    }
}

impl Component {
    pub fn parse(s: &str) -> Result<Self> {
        let component: Component = serde_json::from_str(s)?;
        component.root.validate()?;
        Ok(component)
    }

    pub fn parameter(&self, name: &str) -> Option<&ComponentParameter> {
        self.params.iter().find(|p| p.name == name)
    }
}
