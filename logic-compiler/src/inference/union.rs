use super::ty::{FunctionType, Type, TypeArgument};
use indexmap::IndexSet;

/// A union-find structure over [`Type`] values.
///
/// Classes are represented by a concrete type whenever one is known.
/// Between two variables, the one allocated first represents the class,
/// so the outcome does not depend on the order of unions.
#[derive(Clone, Debug, Default)]
pub struct UnionFind {
    types: IndexSet<Type>,
    parents: Vec<usize>,
}

impl UnionFind {
    pub fn new() -> Self {
        Default::default()
    }

    fn insert(&mut self, t: Type) -> usize {
        let (index, _) = self.types.insert_full(t);
        if index == self.parents.len() {
            self.parents.push(index);
        }
        index
    }

    /// Walks the parent path, flattening it on the way.
    fn reduce_mut(&mut self, v: usize) -> usize {
        let mut w = v;
        while self.parents[w] != w {
            w = self.parents[w];
        }
        self.parents[v] = w;
        w
    }

    fn reduce(&self, mut v: usize) -> usize {
        while self.parents[v] != v {
            v = self.parents[v];
        }
        v
    }

    /// Joins the class of the variable `var` with the class of `other`.
    pub fn union(&mut self, var: Type, other: Type) {
        let v = self.insert(var);
        let w = self.insert(other);
        let vrep = self.reduce_mut(v);
        let wrep = self.reduce_mut(w);
        if vrep == wrep {
            return;
        }
        match (&self.types[vrep], &self.types[wrep]) {
            (Type::Var(a), Type::Var(b)) if b < a => self.parents[vrep] = wrep,
            (Type::Var(_), Type::Var(_)) => self.parents[wrep] = vrep,
            (Type::Var(_), _) => self.parents[vrep] = wrep,
            _ => self.parents[wrep] = vrep,
        }
    }

    /// Finds the representative of the class of `t`, and whether it differs
    /// from `t`.
    pub fn find(&self, t: &Type) -> Option<(&Type, bool)> {
        let (v, _) = self.types.get_full(t)?;
        let vrep = self.reduce(v);
        self.types.get_index(vrep).map(|rep| (rep, vrep != v))
    }

    /// All the type variables known to the structure.
    pub fn variables(&self) -> impl Iterator<Item = usize> + '_ {
        self.types.iter().filter_map(|t| match t {
            Type::Var(v) => Some(*v),
            _ => None,
        })
    }
}

/// Reduces a type according to the classes of equivalence.
pub fn reduce(sets: &UnionFind, t: &Type) -> Type {
    match t {
        Type::Var(_) => sets
            .find(t)
            .and_then(|(rep, reduced)| reduced.then(|| reduce(sets, rep)))
            .unwrap_or_else(|| t.clone()),
        Type::Constant { name, parameters } => Type::Constant {
            name: name.clone(),
            parameters: parameters.iter().map(|p| reduce(sets, p)).collect(),
        },
        Type::Generic(_) => t.clone(),
        Type::Function(f) => Type::Function(FunctionType {
            arguments: f
                .arguments
                .iter()
                .map(|a| TypeArgument {
                    label: a.label.clone(),
                    ty: reduce(sets, &a.ty),
                })
                .collect(),
            ret: Box::new(reduce(sets, &f.ret)),
        }),
    }
}
