use crate::layout::Generated;
use crate::style::StyleBag;
use crate::target::{Framework, Language, Output, Target};
use crate::theme::{extract, Theme};
use crate::{js, react, swift, uikit};
use indexmap::IndexMap;
use logic_compiler::errors::{Error, Kind, Result};
use logic_compiler::{analyze, Loader};
use logic_syntax::ast::Document;
use logic_syntax::component::Component;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputKind {
    /// A serialized syntax tree.
    Document,
    /// Target language source text.
    Source,
}

#[derive(Debug)]
pub struct GenerationOutput {
    pub kind: OutputKind,
    pub text: String,
    /// Style bags by generated layer name, for components.
    pub styles: IndexMap<String, StyleBag>,
    pub theme: Theme,
    pub diagnostics: Vec<Error>,
}

impl GenerationOutput {
    fn document(text: String) -> Self {
        GenerationOutput {
            kind: OutputKind::Document,
            text,
            styles: IndexMap::new(),
            theme: Theme::default(),
            diagnostics: Vec::new(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Request {
    pub output: Output,
    /// The component to generate, for component outputs.
    pub component: Option<Component>,
}

/// Serializes a document as canonical Logic JSON.
pub fn serialize(document: &Document) -> Result<String> {
    Ok(logic_syntax::json::to_string(document)?)
}

fn generate_component(component: &Component, theme: &Theme, target: Target) -> Generated {
    match target.framework {
        Framework::ReactDom | Framework::ReactNative => react::component(component, theme, target),
        Framework::UiKit | Framework::AppKit => uikit::component(component, theme, target),
    }
}

/// Compiles a document into the requested output.
///
/// Fails on malformed input and on libraries that are both missing and
/// needed. Every other problem is reported in the output diagnostics.
pub fn compile<L: Loader>(
    document: Document,
    request: &Request,
    loader: &mut L,
) -> Result<GenerationOutput> {
    let target = match request.output {
        Output::Json => return Ok(GenerationOutput::document(serialize(&document)?)),
        Output::Logic(target) | Output::Component(target) => target,
    };
    let component = match (request.output, &request.component) {
        (Output::Component(_), None) => {
            return Err(Error::new(
                Kind::InvalidTarget,
                "component output requires a component",
            ))
        }
        (Output::Component(_), Some(c)) => Some(c),
        _ => None,
    };

    let mut analysis = analyze(document, loader)?;
    log::debug!(
        "analysis done with {} diagnostics, generating {target}",
        analysis.diagnostics.len()
    );
    let mut diagnostics = std::mem::take(&mut analysis.diagnostics);

    let output = match component {
        None => {
            let text = match target.language {
                Language::Js => js::logic_module(&analysis),
                Language::Swift => swift::logic_module(&analysis, target.framework),
            };
            GenerationOutput {
                kind: OutputKind::Source,
                text,
                styles: IndexMap::new(),
                theme: extract(&analysis),
                diagnostics,
            }
        }
        Some(component) => {
            let theme = extract(&analysis);
            let mut generated = generate_component(component, &theme, target);
            diagnostics.append(&mut generated.diagnostics);
            GenerationOutput {
                kind: OutputKind::Source,
                text: generated.text,
                styles: generated.styles,
                theme,
                diagnostics,
            }
        }
    };
    if !output.diagnostics.is_empty() {
        log::warn!("{} diagnostics for {target}", output.diagnostics.len());
    }
    Ok(output)
}
