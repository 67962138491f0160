//! Helpers shared by the program emitters.

use logic_compiler::Analysis;
use logic_syntax::ast::*;
use logic_syntax::traverse::{find, NodeRef};

/// Intrinsic functions that translate to target language operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Builtin {
    Or,
    And,
    Not,
    Concat,
    At,
    OptionalValue,
    OptionalNone,
    Saturate,
    Constructor,
}

impl Builtin {
    pub fn from_path(path: &[String]) -> Option<Self> {
        let path: Vec<&str> = path.iter().map(String::as_str).collect();
        let builtin = match path.as_slice() {
            ["Boolean", "or"] => Builtin::Or,
            ["Boolean", "and"] => Builtin::And,
            ["Boolean", "not"] => Builtin::Not,
            ["String", "concat"] => Builtin::Concat,
            ["Array", "at"] => Builtin::At,
            ["Optional", "value"] => Builtin::OptionalValue,
            ["Optional", "none"] => Builtin::OptionalNone,
            ["Color", "saturate"] => Builtin::Saturate,
            ["TextStyle"] | ["Shadow"] => Builtin::Constructor,
            _ => return None,
        };
        Some(builtin)
    }
}

/// The function declaration a callee refers to, with its qualified path.
pub fn callee<'a>(
    analysis: &'a Analysis,
    expression: &Expression,
) -> Option<(&'a FunctionDeclaration, Vec<String>)> {
    let decl = analysis.scope.declaration_of(expression)?;
    let path = analysis.scope.path_of(decl).map(<[String]>::to_vec);
    match find(NodeRef::Program(&analysis.program), decl)? {
        NodeRef::Declaration(Declaration::Function(f)) => {
            let path = path.unwrap_or_else(|| vec![f.name.name.clone()]);
            Some((f, path))
        }
        _ => None,
    }
}

/// A record or enumeration case a callee refers to.
#[derive(Clone, Copy, Debug)]
pub enum Constructor<'a> {
    Record(&'a RecordDeclaration),
    Case(&'a EnumCase),
}

pub fn constructor<'a>(analysis: &'a Analysis, expression: &Expression) -> Option<Constructor<'a>> {
    let decl = analysis.scope.declaration_of(expression)?;
    match find(NodeRef::Program(&analysis.program), decl)? {
        NodeRef::Declaration(Declaration::Record(r)) => Some(Constructor::Record(r)),
        NodeRef::Case(EnumerationCase::EnumerationCase(c)) => Some(Constructor::Case(c)),
        _ => None,
    }
}

/// Matches labelled call arguments with the fields of a record, in field
/// order.
pub fn record_arguments<'a>(
    record: &'a RecordDeclaration,
    arguments: &'a [FunctionCallArgument],
) -> Vec<(&'a VariableDeclaration, Option<&'a Expression>)> {
    let given = given_arguments(arguments);
    record
        .fields()
        .map(|field| {
            let argument = given
                .iter()
                .copied()
                .find(|a| a.label.as_deref() == Some(field.name.name.as_str()));
            (field, argument.map(|a| &a.expression))
        })
        .collect()
}

/// Matches call arguments with the declared parameters: by label first,
/// then by position.
pub fn bind_arguments<'a>(
    decl: &'a FunctionDeclaration,
    arguments: &'a [FunctionCallArgument],
) -> Vec<(&'a Parameter, Option<&'a Expression>)> {
    let mut remaining: Vec<Option<&Argument>> = arguments
        .iter()
        .map(|a| match a {
            FunctionCallArgument::Argument(a) => Some(a),
            FunctionCallArgument::Placeholder(_) => None,
        })
        .collect();
    decl.parameters
        .iter()
        .filter_map(|p| match p {
            FunctionParameter::Parameter(p) => Some(p),
            FunctionParameter::Placeholder(_) => None,
        })
        .map(|p| {
            let index = remaining
                .iter()
                .position(|a| a.is_some_and(|a| a.label.as_deref() == Some(p.label())))
                .or_else(|| remaining.iter().position(|a| a.is_some_and(|a| a.label.is_none())));
            let argument = index.and_then(|i| remaining[i].take());
            (p, argument.map(|a| &a.expression))
        })
        .collect()
}

/// The expressions of the arguments actually given.
pub fn given_arguments(arguments: &[FunctionCallArgument]) -> Vec<&Argument> {
    arguments
        .iter()
        .filter_map(|a| match a {
            FunctionCallArgument::Argument(a) => Some(a),
            FunctionCallArgument::Placeholder(_) => None,
        })
        .collect()
}

/// The statements written by the author, leaving out imported libraries.
pub fn own_statements(analysis: &Analysis) -> impl Iterator<Item = &Statement> {
    analysis
        .program
        .block
        .iter()
        .filter(|s| !analysis.is_imported(s.id()))
}

pub fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}
