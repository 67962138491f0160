//! Design tokens extracted from an evaluated program.

use crate::names::{camel_case, path_key};
use indexmap::{IndexMap, IndexSet};
use logic_compiler::color::Rgba;
use logic_compiler::errors::{Error, Kind};
use logic_compiler::value::{Record, Value};
use logic_compiler::Analysis;
use logic_syntax::ast::{Declaration, Statement};
use logic_syntax::traverse::{descendants, NodeRef};
use logic_syntax::NodeId;

/// Colors, text styles and shadows, keyed by the camel-cased path of the
/// declaration defining them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Theme {
    pub colors: IndexMap<String, String>,
    pub text_styles: IndexMap<String, Record>,
    pub shadows: IndexMap<String, Record>,
}

impl Theme {
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty() && self.text_styles.is_empty() && self.shadows.is_empty()
    }
}

/// Declarations of the program itself, leaving out imported libraries.
pub fn main_declarations(analysis: &Analysis) -> IndexSet<NodeId> {
    analysis
        .program
        .block
        .iter()
        .filter(|s| !analysis.is_imported(s.id()))
        .flat_map(|s: &Statement| descendants(NodeRef::Statement(s)))
        .filter_map(|n| match n {
            NodeRef::Declaration(d @ (Declaration::Variable(_) | Declaration::Function(_))) => {
                Some(d.id().clone())
            }
            _ => None,
        })
        .collect()
}

/// Collects the tokens of the program's hoisted variables.
pub fn extract(analysis: &Analysis) -> Theme {
    let main = main_declarations(analysis);
    let mut theme = Theme::default();
    for (path, decl) in analysis.scope.namespace.iter() {
        if !main.contains(decl) {
            continue;
        }
        let key = path_key(path);
        match analysis.evaluation.value(decl) {
            Some(Value::Color(c)) => {
                theme.colors.insert(key, c.clone());
            }
            Some(Value::Record(r)) if r.name == "TextStyle" => {
                theme.text_styles.insert(key, r.clone());
            }
            Some(Value::Record(r)) if r.name == "Shadow" => {
                theme.shadows.insert(key, r.clone());
            }
            _ => {}
        }
    }
    log::debug!(
        "theme has {} colors, {} text styles, {} shadows",
        theme.colors.len(),
        theme.text_styles.len(),
        theme.shadows.len()
    );
    theme
}

/// The table a theme reference points into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Table {
    Colors,
    TextStyles,
    Shadows,
}

impl Table {
    pub fn js_name(&self) -> &'static str {
        match self {
            Table::Colors => "colors",
            Table::TextStyles => "textStyles",
            Table::Shadows => "shadows",
        }
    }
}

/// What a reference from a component resolves to.
#[derive(Clone, Debug, PartialEq)]
pub enum Reference {
    Token(Table, String),
    /// A color written inline, such as `#FF0000`.
    Literal(String),
}

/// Resolves component references against a theme, recording those that
/// cannot be resolved.
#[derive(Debug)]
pub struct Resolver<'a> {
    pub theme: &'a Theme,
    pub diagnostics: Vec<Error>,
}

impl<'a> Resolver<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Resolver {
            theme,
            diagnostics: Vec::new(),
        }
    }

    /// Resolves a reference such as `primary` or `Colors.primary`.
    pub fn resolve(&mut self, table: Table, reference: &str) -> Option<Reference> {
        let key = path_key(&reference.split('.').collect::<Vec<_>>());
        let known = match table {
            Table::Colors => self.theme.colors.contains_key(&key),
            Table::TextStyles => self.theme.text_styles.contains_key(&key),
            Table::Shadows => self.theme.shadows.contains_key(&key),
        };
        if known {
            return Some(Reference::Token(table, key));
        }
        if table == Table::Colors && Rgba::parse(reference).is_some() {
            return Some(Reference::Literal(reference.to_owned()));
        }
        log::warn!("dropping unknown theme reference {reference}");
        self.diagnostics.push(Error::new(
            Kind::UnresolvedIdentifier,
            &format!("theme has no {} named {}", table.js_name(), camel_case(reference)),
        ));
        None
    }

    /// Resolves a color to its value, inlining tokens.
    pub fn color_value(&mut self, reference: &str) -> Option<String> {
        match self.resolve(Table::Colors, reference)? {
            Reference::Token(_, key) => self.theme.colors.get(&key).cloned(),
            Reference::Literal(c) => Some(c),
        }
    }
}
