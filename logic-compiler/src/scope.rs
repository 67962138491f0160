//! Binding of identifiers to declarations.

use crate::env::Env;
use indexmap::{IndexMap, IndexSet};
use logic_syntax::ast::*;
use logic_syntax::traverse::{descendants, NodeRef};
use logic_syntax::NodeId;

/// The outcome of scope resolution over one program.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScopeContext {
    /// Identifier node to the declaration it refers to.
    pub identifier_to_declaration: IndexMap<NodeId, NodeId>,
    /// Member expression to the declaration its qualified path names.
    pub member_to_declaration: IndexMap<NodeId, NodeId>,
    pub undefined_identifiers: IndexSet<NodeId>,
    pub undefined_member_expressions: IndexSet<NodeId>,
    /// Member expressions accessing a field of a value, resolved at evaluation.
    pub dynamic_members: IndexSet<NodeId>,
    /// Qualified path of every hoisted declaration.
    pub namespace: IndexMap<Vec<String>, NodeId>,
    /// The reverse of `namespace`.
    pub declaration_paths: IndexMap<NodeId, Vec<String>>,
}

impl ScopeContext {
    pub fn has_unresolved(&self) -> bool {
        !self.undefined_identifiers.is_empty() || !self.undefined_member_expressions.is_empty()
    }

    /// The declaration an identifier or member expression resolves to.
    pub fn declaration_of(&self, expression: &Expression) -> Option<&NodeId> {
        match expression {
            Expression::Identifier(e) => self.identifier_to_declaration.get(&e.identifier.id),
            Expression::Member(e) => self.member_to_declaration.get(&e.id),
            _ => None,
        }
    }

    pub fn path_of(&self, declaration: &NodeId) -> Option<&[String]> {
        self.declaration_paths.get(declaration).map(Vec::as_slice)
    }
}

/// A declaration reachable by identifier.
#[derive(Clone, Copy, Debug)]
pub enum DeclarationRef<'a> {
    Variable(&'a VariableDeclaration),
    Function(&'a FunctionDeclaration),
    Parameter(&'a Parameter),
    Namespace(&'a NamespaceDeclaration),
    Record(&'a RecordDeclaration),
    Enumeration(&'a EnumerationDeclaration),
    Case(&'a EnumerationDeclaration, &'a EnumCase),
}

/// Indexes every declaration of the program by identifier.
pub fn index_declarations(program: &Program) -> IndexMap<NodeId, DeclarationRef<'_>> {
    descendants(NodeRef::Program(program))
        .into_iter()
        .flat_map(|node| match node {
            NodeRef::Declaration(Declaration::Variable(v)) => {
                vec![(v.id.clone(), DeclarationRef::Variable(v))]
            }
            NodeRef::Declaration(Declaration::Function(f)) => {
                vec![(f.id.clone(), DeclarationRef::Function(f))]
            }
            NodeRef::Declaration(Declaration::Namespace(n)) => {
                vec![(n.id.clone(), DeclarationRef::Namespace(n))]
            }
            NodeRef::Declaration(Declaration::Record(r)) => {
                vec![(r.id.clone(), DeclarationRef::Record(r))]
            }
            NodeRef::Declaration(Declaration::Enumeration(e)) => {
                std::iter::once((e.id.clone(), DeclarationRef::Enumeration(e)))
                    .chain(
                        e.defined_cases()
                            .map(|c| (c.id.clone(), DeclarationRef::Case(e, c))),
                    )
                    .collect()
            }
            NodeRef::Parameter(FunctionParameter::Parameter(p)) => {
                vec![(p.id.clone(), DeclarationRef::Parameter(p))]
            }
            _ => vec![],
        })
        .collect()
}

/// Resolves every identifier of the program. Never fails: unresolved
/// references are recorded in the returned context.
pub fn resolve(program: &Program) -> ScopeContext {
    let mut resolver = Resolver::default();
    resolver.hoist_block(&program.block);
    resolver.block(&program.block);
    log::debug!(
        "resolved {} identifiers, {} undefined",
        resolver.ctx.identifier_to_declaration.len(),
        resolver.ctx.undefined_identifiers.len()
    );
    resolver.ctx
}

#[derive(Default)]
struct Resolver {
    ctx: ScopeContext,
    env: Env,
    path: Vec<String>,
    namespaces: IndexSet<NodeId>,
    local_depth: usize,
}

impl Resolver {
    fn hoist_block(&mut self, block: &[Statement]) {
        for stmt in block {
            if let Statement::Declaration(d) = stmt {
                self.hoist(&d.content);
            }
        }
    }

    fn hoist(&mut self, decl: &Declaration) {
        match decl {
            Declaration::Variable(v) => self.register(&v.name.name, &v.id),
            Declaration::Function(f) => self.register(&f.name.name, &f.id),
            Declaration::Namespace(n) => {
                self.register(&n.name.name, &n.id);
                self.namespaces.insert(n.id.clone());
                self.path.push(n.name.name.clone());
                n.declarations.iter().for_each(|d| self.hoist(d));
                self.path.pop();
            }
            // Fields are reached through values only.
            Declaration::Record(r) => self.register(&r.name.name, &r.id),
            Declaration::Enumeration(e) => {
                self.register(&e.name.name, &e.id);
                self.namespaces.insert(e.id.clone());
                self.path.push(e.name.name.clone());
                for case in e.defined_cases() {
                    self.register(&case.name.name, &case.id);
                }
                self.path.pop();
            }
            Declaration::ImportDeclaration(_) | Declaration::Placeholder(_) => {}
        }
    }

    fn register(&mut self, name: &str, id: &NodeId) {
        let mut path = self.path.clone();
        path.push(name.to_owned());
        if !self.ctx.namespace.contains_key(&path) {
            self.ctx.namespace.insert(path.clone(), id.clone());
            self.ctx.declaration_paths.insert(id.clone(), path);
        }
    }

    /// Looks a qualified path up from the current namespace outwards.
    fn lookup_path(&self, path: &[&str]) -> Option<&NodeId> {
        (0..=self.path.len()).rev().find_map(|depth| {
            let key: Vec<String> = self.path[..depth]
                .iter()
                .cloned()
                .chain(path.iter().map(|s| (*s).to_owned()))
                .collect();
            self.ctx.namespace.get(&key)
        })
    }

    fn lookup(&self, name: &str) -> Option<NodeId> {
        self.env
            .lookup(name)
            .or_else(|| self.lookup_path(&[name]))
            .cloned()
    }

    fn block(&mut self, block: &[Statement]) {
        block.iter().for_each(|s| self.statement(s));
    }

    fn statement(&mut self, stmt: &Statement) {
        match stmt {
            Statement::Declaration(d) => self.declaration(&d.content),
            Statement::Branch(b) => {
                self.expression(&b.condition);
                self.local_depth += 1;
                self.env.open();
                self.block(&b.block);
                self.env.close();
                self.local_depth -= 1;
            }
            Statement::Loop(l) => {
                self.expression(&l.expression);
                self.local_depth += 1;
                self.env.open();
                self.env.declare(l.pattern.name.clone(), l.pattern.id.clone());
                self.block(&l.block);
                self.env.close();
                self.local_depth -= 1;
            }
            Statement::Return(r) => self.expression(&r.expression),
            Statement::Expression(e) => self.expression(&e.expression),
            Statement::Placeholder(_) => {}
        }
    }

    fn declaration(&mut self, decl: &Declaration) {
        match decl {
            Declaration::Variable(v) => {
                if let Some(init) = &v.initializer {
                    self.expression(init);
                }
                if self.local_depth > 0 {
                    self.env.declare(v.name.name.clone(), v.id.clone());
                }
            }
            Declaration::Function(f) => {
                if self.local_depth > 0 {
                    self.env.declare(f.name.name.clone(), f.id.clone());
                }
                self.local_depth += 1;
                self.env.open();
                for param in f.parameters.iter() {
                    if let FunctionParameter::Parameter(p) = param {
                        if let DefaultValue::Value(d) = &p.default_value {
                            self.expression(&d.expression);
                        }
                        self.env.declare(p.local_name.name.clone(), p.id.clone());
                    }
                }
                self.block(&f.block);
                self.env.close();
                self.local_depth -= 1;
            }
            Declaration::Namespace(n) => {
                self.path.push(n.name.name.clone());
                n.declarations.iter().for_each(|d| self.declaration(d));
                self.path.pop();
            }
            Declaration::Record(r) => {
                for field in r.fields() {
                    if let Some(init) = &field.initializer {
                        self.expression(init);
                    }
                }
            }
            Declaration::Enumeration(_) | Declaration::ImportDeclaration(_) | Declaration::Placeholder(_) => {}
        }
    }

    fn expression(&mut self, expr: &Expression) {
        match expr {
            Expression::Identifier(e) => self.identifier(&e.identifier),
            Expression::Member(m) => self.member(m),
            Expression::FunctionCall(c) => {
                self.expression(&c.expression);
                for arg in c.arguments.iter() {
                    if let FunctionCallArgument::Argument(a) = arg {
                        self.expression(&a.expression);
                    }
                }
            }
            Expression::Literal(l) => {
                if let Literal::Array(a) = &l.literal {
                    a.value.iter().for_each(|e| self.expression(e));
                }
            }
            Expression::Binary(b) => {
                self.expression(&b.left);
                self.expression(&b.right);
            }
            Expression::Placeholder(_) => {}
        }
    }

    fn identifier(&mut self, ident: &Identifier) {
        if ident.is_placeholder {
            return;
        }
        match self.lookup(&ident.string) {
            Some(decl) => {
                self.ctx
                    .identifier_to_declaration
                    .insert(ident.id.clone(), decl);
            }
            None => {
                self.ctx.undefined_identifiers.insert(ident.id.clone());
            }
        }
    }

    fn member(&mut self, member: &MemberExpression) {
        let Some((head, mut path)) = chain(&member.expression) else {
            // The base is not a name, e.g. `f().x`.
            self.expression(&member.expression);
            self.ctx.dynamic_members.insert(member.id.clone());
            return;
        };
        path.push(member.member_name.string.as_str());

        let local = self.env.lookup(&head.string).is_some();
        if !local {
            if let Some(decl) = self.lookup_path(&path).cloned() {
                self.ctx.member_to_declaration.insert(member.id.clone(), decl);
                return;
            }
        }

        match self.lookup(&head.string) {
            Some(decl) if !self.namespaces.contains(&decl) => {
                self.ctx
                    .identifier_to_declaration
                    .insert(head.id.clone(), decl);
                self.ctx.dynamic_members.insert(member.id.clone());
            }
            _ => {
                self.ctx
                    .undefined_member_expressions
                    .insert(member.id.clone());
            }
        }
    }
}

/// Splits a chain of member accesses into its head identifier and path.
fn chain(expr: &Expression) -> Option<(&Identifier, Vec<&str>)> {
    match expr {
        Expression::Identifier(e) => Some((&e.identifier, vec![e.identifier.string.as_str()])),
        Expression::Member(m) => {
            let (head, mut path) = chain(&m.expression)?;
            path.push(m.member_name.string.as_str());
            Some((head, path))
        }
        _ => None,
    }
}
