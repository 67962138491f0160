//! Generic walks over syntax trees.
//!
//! Nodes never point to their parents. Ancestry is recomputed on demand by
//! [`path_to`], and walk controls live in a [`TraversalConfig`] passed to
//! the visitor rather than on the nodes themselves.

use crate::ast::*;
use crate::ids::NodeId;

/// A borrowed reference to any syntax node.
#[derive(Clone, Copy, Debug)]
pub enum NodeRef<'a> {
    Program(&'a Program),
    TopLevelDeclarations(&'a TopLevelDeclarations),
    Statement(&'a Statement),
    Declaration(&'a Declaration),
    Expression(&'a Expression),
    Literal(&'a Literal),
    Argument(&'a FunctionCallArgument),
    Parameter(&'a FunctionParameter),
    GenericParameter(&'a GenericParameter),
    Case(&'a EnumerationCase),
    DefaultValue(&'a DefaultValue),
    TypeAnnotation(&'a TypeAnnotation),
    Operator(&'a BinaryOperator),
    Pattern(&'a Pattern),
    Identifier(&'a Identifier),
}

impl<'a> From<&'a Document> for NodeRef<'a> {
    fn from(doc: &'a Document) -> Self {
        match doc {
            Document::Program(p) => NodeRef::Program(p),
            Document::TopLevelDeclarations(t) => NodeRef::TopLevelDeclarations(t),
        }
    }
}

impl<'a> From<&'a Program> for NodeRef<'a> {
    fn from(p: &'a Program) -> Self {
        NodeRef::Program(p)
    }
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> &'a NodeId {
        match *self {
            NodeRef::Program(n) => &n.id,
            NodeRef::TopLevelDeclarations(n) => &n.id,
            NodeRef::Statement(n) => n.id(),
            NodeRef::Declaration(n) => n.id(),
            NodeRef::Expression(n) => n.id(),
            NodeRef::Literal(n) => n.id(),
            NodeRef::Argument(n) => n.id(),
            NodeRef::Parameter(n) => n.id(),
            NodeRef::GenericParameter(n) => n.id(),
            NodeRef::Case(n) => n.id(),
            NodeRef::DefaultValue(n) => match n {
                DefaultValue::None(m) => &m.id,
                DefaultValue::Value(v) => &v.id,
            },
            NodeRef::TypeAnnotation(n) => n.id(),
            NodeRef::Operator(n) => n.id(),
            NodeRef::Pattern(n) => &n.id,
            NodeRef::Identifier(n) => &n.id,
        }
    }

    /// The direct children of the node, in declaration order.
    pub fn children(&self) -> Vec<NodeRef<'a>> {
        use NodeRef as N;
        match *self {
            N::Program(p) => p.block.iter().map(N::Statement).collect(),
            N::TopLevelDeclarations(t) => t.declarations.iter().map(N::Declaration).collect(),
            N::Statement(s) => match s {
                Statement::Declaration(d) => vec![N::Declaration(&d.content)],
                Statement::Branch(b) => std::iter::once(N::Expression(&b.condition))
                    .chain(b.block.iter().map(N::Statement))
                    .collect(),
                Statement::Loop(l) => [N::Pattern(&l.pattern), N::Expression(&l.expression)]
                    .into_iter()
                    .chain(l.block.iter().map(N::Statement))
                    .collect(),
                Statement::Return(r) => vec![N::Expression(&r.expression)],
                Statement::Expression(e) => vec![N::Expression(&e.expression)],
                Statement::Placeholder(_) => vec![],
            },
            N::Declaration(d) => match d {
                Declaration::ImportDeclaration(i) => vec![N::Pattern(&i.name)],
                Declaration::Variable(v) => {
                    let mut children = vec![N::Pattern(&v.name)];
                    children.extend(v.annotation.iter().map(N::TypeAnnotation));
                    children.extend(v.initializer.iter().map(N::Expression));
                    children
                }
                Declaration::Function(f) => std::iter::once(N::Pattern(&f.name))
                    .chain(std::iter::once(N::TypeAnnotation(&f.return_type)))
                    .chain(f.generic_parameters.iter().map(N::GenericParameter))
                    .chain(f.parameters.iter().map(N::Parameter))
                    .chain(f.block.iter().map(N::Statement))
                    .collect(),
                Declaration::Namespace(n) => std::iter::once(N::Pattern(&n.name))
                    .chain(n.declarations.iter().map(N::Declaration))
                    .collect(),
                Declaration::Record(r) => std::iter::once(N::Pattern(&r.name))
                    .chain(r.generic_parameters.iter().map(N::GenericParameter))
                    .chain(r.declarations.iter().map(N::Declaration))
                    .collect(),
                Declaration::Enumeration(e) => std::iter::once(N::Pattern(&e.name))
                    .chain(e.generic_parameters.iter().map(N::GenericParameter))
                    .chain(e.cases.iter().map(N::Case))
                    .collect(),
                Declaration::Placeholder(_) => vec![],
            },
            N::Case(c) => match c {
                EnumerationCase::EnumerationCase(c) => std::iter::once(N::Pattern(&c.name))
                    .chain(c.associated_value_types.iter().map(N::TypeAnnotation))
                    .collect(),
                EnumerationCase::Placeholder(_) => vec![],
            },
            N::Expression(e) => match e {
                Expression::Identifier(i) => vec![N::Identifier(&i.identifier)],
                Expression::Member(m) => {
                    vec![N::Expression(&m.expression), N::Identifier(&m.member_name)]
                }
                Expression::FunctionCall(c) => std::iter::once(N::Expression(&*c.expression))
                    .chain(c.arguments.iter().map(N::Argument))
                    .collect(),
                Expression::Literal(l) => vec![N::Literal(&l.literal)],
                Expression::Binary(b) => vec![
                    N::Expression(&b.left),
                    N::Expression(&b.right),
                    N::Operator(&b.op),
                ],
                Expression::Placeholder(_) => vec![],
            },
            N::Literal(l) => match l {
                Literal::Array(a) => a.value.iter().map(N::Expression).collect(),
                _ => vec![],
            },
            N::Argument(a) => match a {
                FunctionCallArgument::Argument(a) => vec![N::Expression(&a.expression)],
                FunctionCallArgument::Placeholder(_) => vec![],
            },
            N::Parameter(p) => match p {
                FunctionParameter::Parameter(p) => vec![
                    N::Pattern(&p.local_name),
                    N::TypeAnnotation(&p.annotation),
                    N::DefaultValue(&p.default_value),
                ],
                FunctionParameter::Placeholder(_) => vec![],
            },
            N::GenericParameter(g) => match g {
                GenericParameter::Parameter(g) => vec![N::Pattern(&g.name)],
                GenericParameter::Placeholder(_) => vec![],
            },
            N::DefaultValue(d) => match d {
                DefaultValue::Value(v) => vec![N::Expression(&v.expression)],
                DefaultValue::None(_) => vec![],
            },
            N::TypeAnnotation(t) => match t {
                TypeAnnotation::TypeIdentifier(t) => std::iter::once(N::Identifier(&t.identifier))
                    .chain(t.generic_arguments.iter().map(N::TypeAnnotation))
                    .collect(),
                TypeAnnotation::FunctionType(f) => f
                    .argument_types
                    .iter()
                    .map(N::TypeAnnotation)
                    .chain(std::iter::once(N::TypeAnnotation(&*f.return_type)))
                    .collect(),
                TypeAnnotation::Placeholder(_) => vec![],
            },
            N::Operator(_) | N::Pattern(_) | N::Identifier(_) => vec![],
        }
    }
}

/// Controls a walk from within the visitor.
#[derive(Debug, Default)]
pub struct TraversalConfig {
    /// Stops the walk entirely once set.
    pub stop_traversal: bool,
    /// Skips the children of the node being visited, then resets.
    pub ignore_children: bool,
}

/// Folds over the tree depth-first, parents before children.
pub fn reduce<'a, T, F>(root: NodeRef<'a>, init: T, config: &mut TraversalConfig, mut f: F) -> T
where
    F: FnMut(T, NodeRef<'a>, &mut TraversalConfig) -> T,
{
    fn walk<'a, T, F>(node: NodeRef<'a>, acc: T, config: &mut TraversalConfig, f: &mut F) -> T
    where
        F: FnMut(T, NodeRef<'a>, &mut TraversalConfig) -> T,
    {
        let mut acc = f(acc, node, config);
        if config.ignore_children {
            config.ignore_children = false;
            return acc;
        }
        for child in node.children() {
            if config.stop_traversal {
                break;
            }
            acc = walk(child, acc, config, f);
        }
        acc
    }
    walk(root, init, config, &mut f)
}

/// Every node of the tree depth-first, the root included.
pub fn descendants(root: NodeRef<'_>) -> Vec<NodeRef<'_>> {
    reduce(root, Vec::new(), &mut Default::default(), |mut acc, node, _| {
        acc.push(node);
        acc
    })
}

/// Finds a node by identifier, depth-first.
pub fn find<'a>(root: NodeRef<'a>, id: &NodeId) -> Option<NodeRef<'a>> {
    reduce(root, None, &mut Default::default(), |acc, node, config| {
        if node.id() == id {
            config.stop_traversal = true;
            Some(node)
        } else {
            acc
        }
    })
}

/// The chain of nodes from the root down to the node with the given
/// identifier, both ends included.
pub fn path_to<'a>(root: NodeRef<'a>, id: &NodeId) -> Option<Vec<NodeRef<'a>>> {
    if root.id() == id {
        return Some(vec![root]);
    }
    root.children().into_iter().find_map(|child| {
        path_to(child, id).map(|mut path| {
            path.insert(0, root);
            path
        })
    })
}

/// The declarations enclosing the node with the given identifier,
/// outermost first. The node itself is included if it is a declaration.
pub fn declaration_path_to<'a>(root: NodeRef<'a>, id: &NodeId) -> Vec<&'a Declaration> {
    path_to(root, id)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|n| match n {
            NodeRef::Declaration(d) => Some(d),
            _ => None,
        })
        .collect()
}
