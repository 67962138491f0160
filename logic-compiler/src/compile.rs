use crate::errors::{Error, Kind, Result};
use crate::eval::{evaluate, EvaluationContext};
use crate::inference::ty::Type;
use crate::inference::unify::{solve, Substitution};
use crate::inference::{constrain, UnificationContext};
use crate::module::{expand_imports, Loader};
use crate::scope::{resolve, ScopeContext};
use crate::stdlib::Intrinsics;
use crate::value::Value;
use indexmap::IndexSet;
use logic_syntax::ast::{Document, Program};
use logic_syntax::traverse::{find, NodeRef};
use logic_syntax::NodeId;

/// Everything known about a program after analysis.
#[derive(Debug)]
pub struct Analysis {
    /// The program with its imports expanded.
    pub program: Program,
    pub libraries: IndexSet<String>,
    /// Statements spliced in from libraries.
    pub imported: IndexSet<NodeId>,
    pub scope: ScopeContext,
    pub unification: UnificationContext,
    pub substitution: Substitution,
    pub evaluation: EvaluationContext,
    /// Non-fatal errors, in pipeline order.
    pub diagnostics: Vec<Error>,
}

impl Analysis {
    /// The type of a declaration, falling back on its annotation, then on
    /// `Unit`, when inference is inconclusive.
    pub fn declaration_type(&self, decl: &NodeId) -> Type {
        match self.unification.pattern_types.get(decl) {
            Some(t) => self
                .substitution
                .resolve_or(t, self.unification.annotations.get(decl)),
            None => Type::unit(),
        }
    }

    /// The type of an expression, or `Unit` if unknown.
    pub fn expression_type(&self, expr: &NodeId) -> Type {
        match self.unification.nodes.get(expr) {
            Some(t) => self.substitution.resolve_or(t, None),
            None => Type::unit(),
        }
    }

    /// The value of the declaration with the given qualified path.
    pub fn value_at(&self, path: &[String]) -> Option<&Value> {
        let decl = self.scope.namespace.get(path)?;
        self.evaluation.value(decl)
    }

    pub fn is_imported(&self, statement: &NodeId) -> bool {
        self.imported.contains(statement)
    }
}

fn name_of(program: &Program, id: &NodeId) -> String {
    match find(NodeRef::Program(program), id) {
        Some(NodeRef::Identifier(i)) => i.string.clone(),
        Some(NodeRef::Expression(e)) => e
            .flatten_member_path()
            .map(|p| p.join("."))
            .unwrap_or_default(),
        _ => String::new(),
    }
}

/// Runs every analysis stage over a document.
///
/// Fails only if a library needed to resolve the program is missing.
/// All other problems are reported as diagnostics.
pub fn analyze<L: Loader>(document: Document, loader: &mut L) -> Result<Analysis> {
    let expansion = expand_imports(document.into_program(), loader)?;
    let program = expansion.program;
    let mut diagnostics = Vec::new();

    let scope = resolve(&program);
    if let Some((first, import)) = expansion.missing.first() {
        let names: Vec<&str> = expansion.missing.iter().map(|(n, _)| n.as_str()).collect();
        let err = Error::new(Kind::ImportFailed, &format!("library {first} not found"))
            .with(&names)
            .at(import);
        if scope.has_unresolved() {
            return Err(err);
        }
        diagnostics.push(err);
    }
    for id in scope.undefined_identifiers.iter() {
        let name = name_of(&program, id);
        diagnostics.push(
            Error::new(Kind::UnresolvedIdentifier, &format!("{name} is undefined")).at(id),
        );
    }
    for id in scope.undefined_member_expressions.iter() {
        let name = name_of(&program, id);
        diagnostics
            .push(Error::new(Kind::UnresolvedMember, &format!("{name} is undefined")).at(id));
    }

    let unification = constrain(&program, &scope);
    let substitution = match solve(&unification) {
        Ok(s) => s,
        Err(failure) => {
            diagnostics.extend(failure.errors);
            failure.partial
        }
    };

    let evaluation = evaluate(
        &program,
        &scope,
        &unification,
        &substitution,
        &Intrinsics::standard(),
    );
    diagnostics.extend(evaluation.diagnostics);

    Ok(Analysis {
        program,
        libraries: expansion.libraries,
        imported: expansion.imported,
        scope,
        unification,
        substitution,
        evaluation: evaluation.context,
        diagnostics,
    })
}
