use super::ty::{FunctionType, Type, TypeArgument};
use super::union::{reduce, UnionFind};
use super::{Constraint, UnificationContext};
use crate::errors::{Error, Kind, Result};
use std::collections::BTreeMap;

/// A solution to a set of type constraints.
#[derive(Clone, Debug, Default)]
pub struct Substitution {
    sets: UnionFind,
}

impl Substitution {
    /// Resolves a type as far as the solution allows.
    pub fn apply(&self, t: &Type) -> Type {
        reduce(&self.sets, t)
    }

    /// Resolves a type, replacing it by the fallback if it does not resolve
    /// to a ground type. Variables left inside the fallback become `Unit`.
    pub fn resolve_or(&self, t: &Type, fallback: Option<&Type>) -> Type {
        let resolved = self.apply(t);
        if resolved.is_ground() {
            return resolved;
        }
        match fallback {
            Some(f) => self.apply(f).ground(),
            None => resolved.ground(),
        }
    }

    /// Every type variable with its resolved type, by variable index.
    pub fn resolved(&self) -> BTreeMap<usize, Type> {
        self.sets
            .variables()
            .map(|v| (v, self.apply(&Type::Var(v))))
            .collect()
    }
}

/// The outcome of unification, successful or not.
#[derive(Clone, Debug, Default)]
pub struct Unified {
    pub substitution: Substitution,
    pub errors: Vec<Error>,
}

/// Unification failed on some constraints. The partial substitution
/// reflects every constraint that could be satisfied.
#[derive(Clone, Debug)]
pub struct UnificationFailure {
    pub partial: Substitution,
    pub errors: Vec<Error>,
}

/// Unifies every constraint, recording failures and carrying on.
pub fn unify(constraints: &[Constraint]) -> Unified {
    let mut unified = Unified::default();
    for c in constraints {
        if let Err(err) = unify_types(&mut unified.substitution.sets, &c.head, &c.tail) {
            log::debug!("unification failure at {}: {err}", c.node);
            unified.errors.push(err.at(&c.node));
        }
    }
    unified
}

/// Solves the constraints of a unification context.
pub fn solve(ctx: &UnificationContext) -> std::result::Result<Substitution, UnificationFailure> {
    let Unified {
        substitution,
        errors,
    } = unify(&ctx.constraints);
    if errors.is_empty() {
        Ok(substitution)
    } else {
        Err(UnificationFailure {
            partial: substitution,
            errors,
        })
    }
}

fn mismatch(left: &Type, right: &Type) -> Error {
    Error::new(Kind::Unification, "type mismatch")
        .with(left)
        .with(right)
}

fn unify_types(sets: &mut UnionFind, left: &Type, right: &Type) -> Result<()> {
    let left = reduce(sets, left);
    let right = reduce(sets, right);
    if left == right {
        return Ok(());
    }
    match (&left, &right) {
        (Type::Var(v), _) => bind(sets, *v, &left, &right),
        (_, Type::Var(v)) => bind(sets, *v, &right, &left),
        (
            Type::Constant {
                name: n1,
                parameters: p1,
            },
            Type::Constant {
                name: n2,
                parameters: p2,
            },
        ) => {
            if n1 != n2 || p1.len() != p2.len() {
                return Err(mismatch(&left, &right));
            }
            p1.iter()
                .zip(p2.iter())
                .try_for_each(|(a, b)| unify_types(sets, a, b))
        }
        (Type::Function(f1), Type::Function(f2)) => unify_functions(sets, f1, f2),
        _ => Err(mismatch(&left, &right)),
    }
}

fn bind(sets: &mut UnionFind, v: usize, var: &Type, other: &Type) -> Result<()> {
    if other.occurs(v) {
        return Err(Error::new(Kind::Unification, "recursive type")
            .with(var)
            .with(other));
    }
    sets.union(var.clone(), other.clone());
    Ok(())
}

fn unify_functions(sets: &mut UnionFind, f1: &FunctionType, f2: &FunctionType) -> Result<()> {
    // An empty argument list counts as labelled, so that a call may omit
    // every defaulted argument.
    let labelled = |args: &[TypeArgument]| args.iter().all(|a| a.label.is_some());
    if labelled(&f1.arguments) && labelled(&f2.arguments) {
        // Labelled arguments match by name. Unmatched ones may have defaults.
        for a in f1.arguments.iter() {
            if let Some(b) = f2.arguments.iter().find(|b| b.label == a.label) {
                unify_types(sets, &a.ty, &b.ty)?;
            }
        }
    } else {
        if f1.arguments.len() != f2.arguments.len() {
            return Err(Error::new(Kind::Unification, "argument count mismatch")
                .with(&f1.arguments.len())
                .with(&f2.arguments.len()));
        }
        for (a, b) in f1.arguments.iter().zip(f2.arguments.iter()) {
            unify_types(sets, &a.ty, &b.ty)?;
        }
    }
    unify_types(sets, &f1.ret, &f2.ret)
}
