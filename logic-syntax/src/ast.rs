//! Syntax nodes of Logic programs.
//!
//! Each node kind is a plain struct, grouped under tagged enums by syntactic
//! category. The serde attributes define the Logic JSON interchange format:
//! `{ "type": <kind>, "data": { "id": ..., ... } }`.

use crate::ids::NodeId;
use serde::{Deserialize, Serialize};

/// A node without any payload beyond its identity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub id: NodeId,
}

/// A name introduced by a declaration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    pub id: NodeId,
    pub name: String,
}

/// A name referring to a declaration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identifier {
    pub id: NodeId,
    pub string: String,
    #[serde(default)]
    pub is_placeholder: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum Document {
    Program(Program),
    TopLevelDeclarations(TopLevelDeclarations),
}

impl Document {
    pub fn id(&self) -> &NodeId {
        match self {
            Document::Program(p) => &p.id,
            Document::TopLevelDeclarations(t) => &t.id,
        }
    }

    /// Turns the document into a program.
    ///
    /// Top-level declarations are wrapped in declaration statements whose
    /// identifiers derive from the declaration they contain.
    pub fn into_program(self) -> Program {
        match self {
            Document::Program(p) => p,
            Document::TopLevelDeclarations(t) => Program {
                id: t.id,
                block: t
                    .declarations
                    .into_iter()
                    .map(|content| {
                        Statement::Declaration(DeclarationStatement {
                            id: content.id().derive("statement"),
                            content,
                        })
                    })
                    .collect(),
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub id: NodeId,
    pub block: Vec<Statement>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TopLevelDeclarations {
    pub id: NodeId,
    pub declarations: Vec<Declaration>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum Statement {
    Declaration(DeclarationStatement),
    Branch(BranchStatement),
    Loop(LoopStatement),
    Return(ReturnStatement),
    Expression(ExpressionStatement),
    Placeholder(Marker),
}

impl Statement {
    pub fn id(&self) -> &NodeId {
        match self {
            Statement::Declaration(s) => &s.id,
            Statement::Branch(s) => &s.id,
            Statement::Loop(s) => &s.id,
            Statement::Return(s) => &s.id,
            Statement::Expression(s) => &s.id,
            Statement::Placeholder(s) => &s.id,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeclarationStatement {
    pub id: NodeId,
    pub content: Declaration,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BranchStatement {
    pub id: NodeId,
    pub condition: Expression,
    pub block: Vec<Statement>,
}

/// Runs the block once per element of an array, bound to the pattern.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoopStatement {
    pub id: NodeId,
    pub pattern: Pattern,
    pub expression: Expression,
    pub block: Vec<Statement>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReturnStatement {
    pub id: NodeId,
    pub expression: Expression,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExpressionStatement {
    pub id: NodeId,
    pub expression: Expression,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum Declaration {
    ImportDeclaration(ImportDeclaration),
    Variable(VariableDeclaration),
    Function(FunctionDeclaration),
    Namespace(NamespaceDeclaration),
    Record(RecordDeclaration),
    Enumeration(EnumerationDeclaration),
    Placeholder(Marker),
}

impl Declaration {
    pub fn id(&self) -> &NodeId {
        match self {
            Declaration::ImportDeclaration(d) => &d.id,
            Declaration::Variable(d) => &d.id,
            Declaration::Function(d) => &d.id,
            Declaration::Namespace(d) => &d.id,
            Declaration::Record(d) => &d.id,
            Declaration::Enumeration(d) => &d.id,
            Declaration::Placeholder(d) => &d.id,
        }
    }

    /// The name introduced by the declaration, if any.
    pub fn name(&self) -> Option<&Pattern> {
        match self {
            Declaration::ImportDeclaration(d) => Some(&d.name),
            Declaration::Variable(d) => Some(&d.name),
            Declaration::Function(d) => Some(&d.name),
            Declaration::Namespace(d) => Some(&d.name),
            Declaration::Record(d) => Some(&d.name),
            Declaration::Enumeration(d) => Some(&d.name),
            Declaration::Placeholder(_) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImportDeclaration {
    pub id: NodeId,
    pub name: Pattern,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VariableDeclaration {
    pub id: NodeId,
    pub name: Pattern,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<TypeAnnotation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initializer: Option<Expression>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionDeclaration {
    pub id: NodeId,
    pub name: Pattern,
    pub return_type: TypeAnnotation,
    #[serde(default)]
    pub generic_parameters: Vec<GenericParameter>,
    #[serde(default)]
    pub parameters: Vec<FunctionParameter>,
    #[serde(default)]
    pub block: Vec<Statement>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NamespaceDeclaration {
    pub id: NodeId,
    pub name: Pattern,
    pub declarations: Vec<Declaration>,
}

/// A record type. Its variable declarations are the fields, and the record
/// name doubles as a constructor taking the fields as labelled arguments.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordDeclaration {
    pub id: NodeId,
    pub name: Pattern,
    #[serde(default)]
    pub generic_parameters: Vec<GenericParameter>,
    #[serde(default)]
    pub declarations: Vec<Declaration>,
}

impl RecordDeclaration {
    /// The fields of the record, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &VariableDeclaration> {
        self.declarations.iter().filter_map(|d| match d {
            Declaration::Variable(v) => Some(v),
            _ => None,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumerationDeclaration {
    pub id: NodeId,
    pub name: Pattern,
    #[serde(default)]
    pub generic_parameters: Vec<GenericParameter>,
    #[serde(default)]
    pub cases: Vec<EnumerationCase>,
}

impl EnumerationDeclaration {
    pub fn defined_cases(&self) -> impl Iterator<Item = &EnumCase> {
        self.cases.iter().filter_map(|c| match c {
            EnumerationCase::EnumerationCase(c) => Some(c),
            EnumerationCase::Placeholder(_) => None,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum EnumerationCase {
    EnumerationCase(EnumCase),
    Placeholder(Marker),
}

impl EnumerationCase {
    pub fn id(&self) -> &NodeId {
        match self {
            EnumerationCase::EnumerationCase(c) => &c.id,
            EnumerationCase::Placeholder(c) => &c.id,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumCase {
    pub id: NodeId,
    pub name: Pattern,
    #[serde(default)]
    pub associated_value_types: Vec<TypeAnnotation>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum GenericParameter {
    Parameter(GenericTypeParameter),
    Placeholder(Marker),
}

impl GenericParameter {
    pub fn id(&self) -> &NodeId {
        match self {
            GenericParameter::Parameter(p) => &p.id,
            GenericParameter::Placeholder(p) => &p.id,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenericTypeParameter {
    pub id: NodeId,
    pub name: Pattern,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum FunctionParameter {
    Parameter(Parameter),
    Placeholder(Marker),
}

impl FunctionParameter {
    pub fn id(&self) -> &NodeId {
        match self {
            FunctionParameter::Parameter(p) => &p.id,
            FunctionParameter::Placeholder(p) => &p.id,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub id: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_name: Option<String>,
    pub local_name: Pattern,
    pub annotation: TypeAnnotation,
    pub default_value: DefaultValue,
}

impl Parameter {
    /// The label callers use for this parameter.
    pub fn label(&self) -> &str {
        self.external_name
            .as_deref()
            .unwrap_or(self.local_name.name.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum DefaultValue {
    None(Marker),
    Value(DefaultExpression),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DefaultExpression {
    pub id: NodeId,
    pub expression: Expression,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum TypeAnnotation {
    TypeIdentifier(TypeIdentifier),
    FunctionType(FunctionTypeAnnotation),
    Placeholder(Marker),
}

impl TypeAnnotation {
    pub fn id(&self) -> &NodeId {
        match self {
            TypeAnnotation::TypeIdentifier(t) => &t.id,
            TypeAnnotation::FunctionType(t) => &t.id,
            TypeAnnotation::Placeholder(t) => &t.id,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeIdentifier {
    pub id: NodeId,
    pub identifier: Identifier,
    #[serde(default)]
    pub generic_arguments: Vec<TypeAnnotation>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionTypeAnnotation {
    pub id: NodeId,
    pub return_type: Box<TypeAnnotation>,
    #[serde(default)]
    pub argument_types: Vec<TypeAnnotation>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Expression {
    #[serde(rename = "identifierExpression")]
    Identifier(IdentifierExpression),
    #[serde(rename = "memberExpression")]
    Member(MemberExpression),
    #[serde(rename = "functionCallExpression")]
    FunctionCall(FunctionCallExpression),
    #[serde(rename = "literalExpression")]
    Literal(LiteralExpression),
    #[serde(rename = "binaryExpression")]
    Binary(BinaryExpression),
    #[serde(rename = "placeholder")]
    Placeholder(Marker),
}

impl Expression {
    pub fn id(&self) -> &NodeId {
        match self {
            Expression::Identifier(e) => &e.id,
            Expression::Member(e) => &e.id,
            Expression::FunctionCall(e) => &e.id,
            Expression::Literal(e) => &e.id,
            Expression::Binary(e) => &e.id,
            Expression::Placeholder(e) => &e.id,
        }
    }

    /// Flattens a chain of member accesses rooted at an identifier,
    /// e.g. `a.b.c` into `["a", "b", "c"]`.
    pub fn flatten_member_path(&self) -> Option<Vec<&str>> {
        match self {
            Expression::Identifier(e) => Some(vec![e.identifier.string.as_str()]),
            Expression::Member(e) => {
                let mut path = e.expression.flatten_member_path()?;
                path.push(e.member_name.string.as_str());
                Some(path)
            }
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IdentifierExpression {
    pub id: NodeId,
    pub identifier: Identifier,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberExpression {
    pub id: NodeId,
    pub expression: Box<Expression>,
    pub member_name: Identifier,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FunctionCallExpression {
    pub id: NodeId,
    pub expression: Box<Expression>,
    #[serde(default)]
    pub arguments: Vec<FunctionCallArgument>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum FunctionCallArgument {
    Argument(Argument),
    Placeholder(Marker),
}

impl FunctionCallArgument {
    pub fn id(&self) -> &NodeId {
        match self {
            FunctionCallArgument::Argument(a) => &a.id,
            FunctionCallArgument::Placeholder(a) => &a.id,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    pub id: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub expression: Expression,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LiteralExpression {
    pub id: NodeId,
    pub literal: Literal,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BinaryExpression {
    pub id: NodeId,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
    pub op: BinaryOperator,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperatorKind {
    IsEqualTo,
    IsNotEqualTo,
    IsLessThan,
    IsGreaterThan,
    IsLessThanOrEqual,
    IsGreaterThanOrEqual,
    SetEqualTo,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum BinaryOperator {
    IsEqualTo(Marker),
    IsNotEqualTo(Marker),
    IsLessThan(Marker),
    IsGreaterThan(Marker),
    IsLessThanOrEqual(Marker),
    IsGreaterThanOrEqual(Marker),
    SetEqualTo(Marker),
}

impl BinaryOperator {
    pub fn new(kind: OperatorKind, id: NodeId) -> Self {
        let m = Marker { id };
        match kind {
            OperatorKind::IsEqualTo => BinaryOperator::IsEqualTo(m),
            OperatorKind::IsNotEqualTo => BinaryOperator::IsNotEqualTo(m),
            OperatorKind::IsLessThan => BinaryOperator::IsLessThan(m),
            OperatorKind::IsGreaterThan => BinaryOperator::IsGreaterThan(m),
            OperatorKind::IsLessThanOrEqual => BinaryOperator::IsLessThanOrEqual(m),
            OperatorKind::IsGreaterThanOrEqual => BinaryOperator::IsGreaterThanOrEqual(m),
            OperatorKind::SetEqualTo => BinaryOperator::SetEqualTo(m),
        }
    }

    pub fn id(&self) -> &NodeId {
        match self {
            BinaryOperator::IsEqualTo(m)
            | BinaryOperator::IsNotEqualTo(m)
            | BinaryOperator::IsLessThan(m)
            | BinaryOperator::IsGreaterThan(m)
            | BinaryOperator::IsLessThanOrEqual(m)
            | BinaryOperator::IsGreaterThanOrEqual(m)
            | BinaryOperator::SetEqualTo(m) => &m.id,
        }
    }

    pub fn kind(&self) -> OperatorKind {
        match self {
            BinaryOperator::IsEqualTo(_) => OperatorKind::IsEqualTo,
            BinaryOperator::IsNotEqualTo(_) => OperatorKind::IsNotEqualTo,
            BinaryOperator::IsLessThan(_) => OperatorKind::IsLessThan,
            BinaryOperator::IsGreaterThan(_) => OperatorKind::IsGreaterThan,
            BinaryOperator::IsLessThanOrEqual(_) => OperatorKind::IsLessThanOrEqual,
            BinaryOperator::IsGreaterThanOrEqual(_) => OperatorKind::IsGreaterThanOrEqual,
            BinaryOperator::SetEqualTo(_) => OperatorKind::SetEqualTo,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum Literal {
    None(Marker),
    Boolean(BooleanLiteral),
    Number(NumberLiteral),
    String(StringLiteral),
    Color(ColorLiteral),
    Array(ArrayLiteral),
}

impl Literal {
    pub fn id(&self) -> &NodeId {
        match self {
            Literal::None(l) => &l.id,
            Literal::Boolean(l) => &l.id,
            Literal::Number(l) => &l.id,
            Literal::String(l) => &l.id,
            Literal::Color(l) => &l.id,
            Literal::Array(l) => &l.id,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BooleanLiteral {
    pub id: NodeId,
    pub value: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NumberLiteral {
    pub id: NodeId,
    #[serde(with = "crate::json::number")]
    pub value: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StringLiteral {
    pub id: NodeId,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorLiteral {
    pub id: NodeId,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArrayLiteral {
    pub id: NodeId,
    pub value: Vec<Expression>,
}
