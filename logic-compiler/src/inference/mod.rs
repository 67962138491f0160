pub mod ty;
pub mod unify;
pub mod union;

#[cfg(test)]
mod tests;

use crate::scope::ScopeContext;
use indexmap::{IndexMap, IndexSet};
use logic_syntax::ast::*;
use logic_syntax::NodeId;
use ty::{FunctionType, Seq, Type, TypeArgument};

/// An equation between two types, originating from a syntax node.
#[derive(Clone, Debug, PartialEq)]
pub struct Constraint {
    pub head: Type,
    pub tail: Type,
    pub node: NodeId,
}

/// The type equations of a program.
#[derive(Debug, Default)]
pub struct UnificationContext {
    pub constraints: Vec<Constraint>,
    /// The type of every expression.
    pub nodes: IndexMap<NodeId, Type>,
    /// The type of every declaration and parameter.
    pub pattern_types: IndexMap<NodeId, Type>,
    /// Declared types, used as fallback when inference is inconclusive.
    pub annotations: IndexMap<NodeId, Type>,
    pub seq: Seq,
}

impl UnificationContext {
    fn push(&mut self, head: Type, tail: Type, node: &NodeId) {
        self.constraints.push(Constraint {
            head,
            tail,
            node: node.clone(),
        });
    }

    pub fn type_of(&self, node: &NodeId) -> Option<&Type> {
        self.nodes.get(node).or_else(|| self.pattern_types.get(node))
    }
}

/// Converts a type annotation, resolving generic parameter names.
pub fn annotation_type(ann: &TypeAnnotation, generics: &IndexSet<String>, seq: &mut Seq) -> Type {
    match ann {
        TypeAnnotation::TypeIdentifier(t) => {
            let name = &t.identifier.string;
            if t.generic_arguments.is_empty() && generics.contains(name) {
                Type::Generic(name.clone())
            } else {
                Type::Constant {
                    name: name.clone(),
                    parameters: t
                        .generic_arguments
                        .iter()
                        .map(|a| annotation_type(a, generics, seq))
                        .collect(),
                }
            }
        }
        TypeAnnotation::FunctionType(f) => Type::Function(FunctionType {
            arguments: f
                .argument_types
                .iter()
                .map(|a| TypeArgument {
                    label: None,
                    ty: annotation_type(a, generics, seq),
                })
                .collect(),
            ret: Box::new(annotation_type(&f.return_type, generics, seq)),
        }),
        TypeAnnotation::Placeholder(_) => seq.fresh(),
    }
}

/// Returns the type equations for the given program.
pub fn constrain(program: &Program, scope: &ScopeContext) -> UnificationContext {
    let mut c = Constrainer {
        ctx: UnificationContext::default(),
        scope,
        generics: Vec::new(),
        functions: IndexSet::new(),
        returns: Vec::new(),
    };
    c.declare_block(&program.block);
    c.block(&program.block);
    log::debug!(
        "generated {} constraints over {} type variables",
        c.ctx.constraints.len(),
        c.ctx.seq.len()
    );
    c.ctx
}

struct Constrainer<'a> {
    ctx: UnificationContext,
    scope: &'a ScopeContext,
    /// Generic parameters in scope, innermost last.
    generics: Vec<IndexSet<String>>,
    functions: IndexSet<NodeId>,
    returns: Vec<Type>,
}

impl Constrainer<'_> {
    fn annotation(&mut self, ann: &TypeAnnotation) -> Type {
        let generics: IndexSet<String> = self.generics.iter().flatten().cloned().collect();
        annotation_type(ann, &generics, &mut self.ctx.seq)
    }

    fn declare_block(&mut self, block: &[Statement]) {
        for stmt in block {
            match stmt {
                Statement::Declaration(d) => self.declare(&d.content),
                Statement::Branch(b) => self.declare_block(&b.block),
                Statement::Loop(l) => self.declare_block(&l.block),
                _ => {}
            }
        }
    }

    fn generic_names(parameters: &[GenericParameter]) -> IndexSet<String> {
        parameters
            .iter()
            .filter_map(|g| match g {
                GenericParameter::Parameter(g) => Some(g.name.name.clone()),
                GenericParameter::Placeholder(_) => None,
            })
            .collect()
    }

    /// The type built by a record or enumeration with generic parameters.
    fn nominal(name: &str, generics: &IndexSet<String>) -> Type {
        Type::Constant {
            name: name.to_owned(),
            parameters: generics.iter().cloned().map(Type::Generic).collect(),
        }
    }

    fn declare(&mut self, decl: &Declaration) {
        match decl {
            Declaration::Variable(v) => {
                let t = match &v.annotation {
                    Some(ann) => {
                        let t = self.annotation(ann);
                        self.ctx.annotations.insert(v.id.clone(), t.clone());
                        t
                    }
                    None => self.ctx.seq.fresh(),
                };
                self.ctx.pattern_types.insert(v.id.clone(), t);
            }
            Declaration::Function(f) => {
                self.generics.push(Self::generic_names(&f.generic_parameters));
                let mut arguments = Vec::new();
                for param in f.parameters.iter() {
                    if let FunctionParameter::Parameter(p) = param {
                        let t = self.annotation(&p.annotation);
                        self.ctx.annotations.insert(p.id.clone(), t.clone());
                        self.ctx.pattern_types.insert(p.id.clone(), t.clone());
                        arguments.push(TypeArgument {
                            label: Some(p.label().to_owned()),
                            ty: t,
                        });
                    }
                }
                let ret = self.annotation(&f.return_type);
                let t = Type::Function(FunctionType {
                    arguments,
                    ret: Box::new(ret),
                });
                self.ctx.annotations.insert(f.id.clone(), t.clone());
                self.ctx.pattern_types.insert(f.id.clone(), t);
                self.functions.insert(f.id.clone());
                self.declare_block(&f.block);
                self.generics.pop();
            }
            Declaration::Namespace(n) => {
                let t = self.ctx.seq.fresh();
                self.ctx.pattern_types.insert(n.id.clone(), t);
                n.declarations.iter().for_each(|d| self.declare(d));
            }
            Declaration::Record(r) => {
                let generics = Self::generic_names(&r.generic_parameters);
                let ret = Self::nominal(&r.name.name, &generics);
                self.generics.push(generics);
                let mut arguments = Vec::new();
                for field in r.fields() {
                    let t = match &field.annotation {
                        Some(ann) => {
                            let t = self.annotation(ann);
                            self.ctx.annotations.insert(field.id.clone(), t.clone());
                            t
                        }
                        None => self.ctx.seq.fresh(),
                    };
                    self.ctx.pattern_types.insert(field.id.clone(), t.clone());
                    arguments.push(TypeArgument {
                        label: Some(field.name.name.clone()),
                        ty: t,
                    });
                }
                self.generics.pop();
                let t = Type::Function(FunctionType {
                    arguments,
                    ret: Box::new(ret),
                });
                self.ctx.annotations.insert(r.id.clone(), t.clone());
                self.ctx.pattern_types.insert(r.id.clone(), t);
                self.functions.insert(r.id.clone());
            }
            Declaration::Enumeration(e) => {
                let generics = Self::generic_names(&e.generic_parameters);
                let ret = Self::nominal(&e.name.name, &generics);
                let t = self.ctx.seq.fresh();
                self.ctx.pattern_types.insert(e.id.clone(), t);
                self.generics.push(generics);
                for case in e.defined_cases() {
                    // Cases without associated values are values, not constructors.
                    let t = if case.associated_value_types.is_empty() {
                        ret.clone()
                    } else {
                        Type::Function(FunctionType {
                            arguments: case
                                .associated_value_types
                                .iter()
                                .map(|a| TypeArgument {
                                    label: None,
                                    ty: self.annotation(a),
                                })
                                .collect(),
                            ret: Box::new(ret.clone()),
                        })
                    };
                    self.ctx.pattern_types.insert(case.id.clone(), t);
                    self.functions.insert(case.id.clone());
                }
                self.generics.pop();
            }
            Declaration::ImportDeclaration(_) | Declaration::Placeholder(_) => {}
        }
    }

    fn block(&mut self, block: &[Statement]) {
        block.iter().for_each(|s| self.statement(s));
    }

    fn statement(&mut self, stmt: &Statement) {
        match stmt {
            Statement::Declaration(d) => self.declaration(&d.content),
            Statement::Branch(b) => {
                let t = self.expression(&b.condition);
                self.ctx.push(t, Type::boolean(), &b.id);
                self.block(&b.block);
            }
            Statement::Loop(l) => {
                let t = self.expression(&l.expression);
                let element = self.ctx.seq.fresh();
                self.ctx.push(t, Type::array(element.clone()), &l.id);
                self.ctx.pattern_types.insert(l.pattern.id.clone(), element);
                self.block(&l.block);
            }
            Statement::Return(r) => {
                let t = self.expression(&r.expression);
                if let Some(ret) = self.returns.last().cloned() {
                    self.ctx.push(ret, t, &r.id);
                }
            }
            Statement::Expression(e) => {
                self.expression(&e.expression);
            }
            Statement::Placeholder(_) => {}
        }
    }

    fn pattern_type(&mut self, decl: &NodeId) -> Type {
        match self.ctx.pattern_types.get(decl) {
            Some(t) => t.clone(),
            None => {
                let t = self.ctx.seq.fresh();
                self.ctx.pattern_types.insert(decl.clone(), t.clone());
                t
            }
        }
    }

    fn declaration(&mut self, decl: &Declaration) {
        match decl {
            Declaration::Variable(v) => {
                if let Some(init) = &v.initializer {
                    let t = self.expression(init);
                    let p = self.pattern_type(&v.id);
                    self.ctx.push(p, t, &v.id);
                }
            }
            Declaration::Function(f) => {
                let ret = match self.pattern_type(&f.id) {
                    Type::Function(ft) => *ft.ret,
                    _ => self.ctx.seq.fresh(),
                };
                for param in f.parameters.iter() {
                    if let FunctionParameter::Parameter(p) = param {
                        if let DefaultValue::Value(d) = &p.default_value {
                            let t = self.expression(&d.expression);
                            let pt = self.pattern_type(&p.id);
                            self.ctx.push(pt, t, &d.id);
                        }
                    }
                }
                self.returns.push(ret);
                self.block(&f.block);
                self.returns.pop();
            }
            Declaration::Namespace(n) => n.declarations.iter().for_each(|d| self.declaration(d)),
            Declaration::Record(r) => {
                for field in r.fields() {
                    if let Some(init) = &field.initializer {
                        let t = self.expression(init);
                        let p = self.pattern_type(&field.id);
                        self.ctx.push(p, t, &field.id);
                    }
                }
            }
            Declaration::Enumeration(_) | Declaration::ImportDeclaration(_) | Declaration::Placeholder(_) => {}
        }
    }

    /// The type of a reference to a declaration. Functions are instantiated
    /// afresh at every use.
    fn reference(&mut self, decl: Option<&NodeId>) -> Type {
        match decl {
            Some(decl) => {
                let t = self.pattern_type(decl);
                if self.functions.contains(decl) {
                    t.instantiate(&mut self.ctx.seq)
                } else {
                    t
                }
            }
            None => self.ctx.seq.fresh(),
        }
    }

    fn expression(&mut self, expr: &Expression) -> Type {
        let t = match expr {
            Expression::Identifier(e) => {
                let decl = self.scope.identifier_to_declaration.get(&e.identifier.id);
                self.reference(decl)
            }
            Expression::Member(m) => {
                if let Some(decl) = self.scope.member_to_declaration.get(&m.id) {
                    self.reference(Some(decl))
                } else {
                    // Record fields are not typed statically.
                    self.expression(&m.expression);
                    self.ctx.seq.fresh()
                }
            }
            Expression::FunctionCall(c) => {
                let callee = self.expression(&c.expression);
                let arguments = c
                    .arguments
                    .iter()
                    .filter_map(|a| match a {
                        FunctionCallArgument::Argument(a) => Some(a),
                        FunctionCallArgument::Placeholder(_) => None,
                    })
                    .map(|a| TypeArgument {
                        label: a.label.clone(),
                        ty: self.expression(&a.expression),
                    })
                    .collect();
                let ret = self.ctx.seq.fresh();
                let expected = Type::Function(FunctionType {
                    arguments,
                    ret: Box::new(ret.clone()),
                });
                self.ctx.push(callee, expected, &c.id);
                ret
            }
            Expression::Literal(l) => self.literal(&l.literal),
            Expression::Binary(b) => {
                let left = self.expression(&b.left);
                let right = self.expression(&b.right);
                self.ctx.push(left, right, &b.id);
                match b.op.kind() {
                    OperatorKind::SetEqualTo => Type::unit(),
                    _ => Type::boolean(),
                }
            }
            Expression::Placeholder(_) => self.ctx.seq.fresh(),
        };
        self.ctx.nodes.insert(expr.id().clone(), t.clone());
        t
    }

    fn literal(&mut self, literal: &Literal) -> Type {
        match literal {
            Literal::None(_) => Type::optional(self.ctx.seq.fresh()),
            Literal::Boolean(_) => Type::boolean(),
            Literal::Number(_) => Type::number(),
            Literal::String(_) => Type::string(),
            Literal::Color(_) => Type::color(),
            Literal::Array(a) => {
                let element = self.ctx.seq.fresh();
                for e in a.value.iter() {
                    let t = self.expression(e);
                    self.ctx.push(element.clone(), t, e.id());
                }
                Type::array(element)
            }
        }
    }
}
