use crate::names::NameGenerator;
use crate::style::StyleBag;
use crate::target::Target;
use indexmap::IndexMap;
use logic_compiler::errors::{Error, Kind};
use logic_syntax::component::{FlexDirection, Layer, LayerKind};

/// Source text of a component with its auxiliary tables.
#[derive(Debug)]
pub struct Generated {
    pub text: String,
    pub styles: IndexMap<String, StyleBag>,
    pub diagnostics: Vec<Error>,
}

/// A layer with its generated name and position in the tree.
#[derive(Debug)]
pub struct NamedLayer<'a> {
    pub name: String,
    pub layer: &'a Layer,
    /// The direction of the parent, `None` at the root.
    pub parent_direction: Option<FlexDirection>,
    pub children: Vec<NamedLayer<'a>>,
}

impl<'a> NamedLayer<'a> {
    pub fn is_root(&self) -> bool {
        self.parent_direction.is_none()
    }

    pub fn kind(&self) -> LayerKind {
        self.layer.kind
    }

    /// Every layer of the subtree in depth-first order.
    pub fn flatten(&self) -> Vec<&NamedLayer<'a>> {
        let mut layers = vec![self];
        for child in self.children.iter() {
            layers.extend(child.flatten());
        }
        layers
    }
}

/// Splits the tree into the layers a target can generate, depth-first, and
/// the roots of the subtrees it cannot.
pub fn partition<'t, 'a>(
    root: &'t NamedLayer<'a>,
    target: Target,
) -> (Vec<&'t NamedLayer<'a>>, Vec<&'t NamedLayer<'a>>) {
    fn walk<'t, 'a>(
        layer: &'t NamedLayer<'a>,
        vectors: bool,
        out: &mut (Vec<&'t NamedLayer<'a>>, Vec<&'t NamedLayer<'a>>),
    ) {
        if layer.kind() == LayerKind::Vector && !vectors {
            out.1.push(layer);
            return;
        }
        out.0.push(layer);
        layer.children.iter().for_each(|c| walk(c, vectors, out));
    }
    let mut out = (Vec::new(), Vec::new());
    walk(root, target.capabilities().vectors, &mut out);
    out
}

/// The error reported for a subtree a target cannot generate.
pub fn unsupported(layer: &NamedLayer, target: Target) -> Error {
    log::warn!("skipping {} layer {} for {target}", layer.kind().as_str(), layer.name);
    Error::new(
        Kind::UnsupportedNode,
        &format!(
            "{} layer {} is not supported by {target}",
            layer.kind().as_str(),
            layer.name
        ),
    )
    .with(&target.to_string())
}

/// Names every layer of the tree in a single depth-first traversal.
pub fn name_layers(root: &Layer) -> NamedLayer<'_> {
    fn walk<'a>(
        layer: &'a Layer,
        parent_direction: Option<FlexDirection>,
        names: &mut NameGenerator,
    ) -> NamedLayer<'a> {
        let base = layer.name.as_deref().unwrap_or(layer.kind.as_str());
        let name = names.name(base);
        let direction = layer.parameters.direction();
        let children = layer
            .children
            .iter()
            .map(|child| walk(child, Some(direction), names))
            .collect();
        NamedLayer {
            name,
            layer,
            parent_direction,
            children,
        }
    }
    walk(root, None, &mut NameGenerator::new())
}
