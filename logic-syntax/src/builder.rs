use crate::ast::*;
use crate::ids::{IdGenerator, NodeId};

/// Constructs syntax nodes, drawing every identifier from a generator.
pub struct Builder<'a> {
    ids: &'a mut dyn IdGenerator,
}

impl<'a> Builder<'a> {
    pub fn new(ids: &'a mut dyn IdGenerator) -> Self {
        Builder { ids }
    }

    pub fn id(&mut self) -> NodeId {
        self.ids.next_id()
    }

    pub fn marker(&mut self) -> Marker {
        Marker { id: self.id() }
    }

    pub fn pattern(&mut self, name: &str) -> Pattern {
        Pattern {
            id: self.id(),
            name: name.to_owned(),
        }
    }

    pub fn identifier(&mut self, name: &str) -> Identifier {
        Identifier {
            id: self.id(),
            string: name.to_owned(),
            is_placeholder: false,
        }
    }

    pub fn type_named(&mut self, name: &str, generics: Vec<TypeAnnotation>) -> TypeAnnotation {
        TypeAnnotation::TypeIdentifier(TypeIdentifier {
            id: self.id(),
            identifier: self.identifier(name),
            generic_arguments: generics,
        })
    }

    pub fn type_function(
        &mut self,
        arguments: Vec<TypeAnnotation>,
        ret: TypeAnnotation,
    ) -> TypeAnnotation {
        TypeAnnotation::FunctionType(FunctionTypeAnnotation {
            id: self.id(),
            return_type: Box::new(ret),
            argument_types: arguments,
        })
    }

    pub fn reference(&mut self, name: &str) -> Expression {
        Expression::Identifier(IdentifierExpression {
            id: self.id(),
            identifier: self.identifier(name),
        })
    }

    pub fn member(&mut self, expression: Expression, name: &str) -> Expression {
        Expression::Member(MemberExpression {
            id: self.id(),
            expression: Box::new(expression),
            member_name: self.identifier(name),
        })
    }

    /// A reference to a qualified name such as `Boolean.or`.
    pub fn path(&mut self, path: &[&str]) -> Expression {
        let Some((head, tail)) = path.split_first() else {
            return Expression::Placeholder(self.marker());
        };
        let mut expression = self.reference(head);
        for segment in tail {
            expression = self.member(expression, segment);
        }
        expression
    }

    pub fn call(&mut self, callee: Expression, arguments: Vec<(Option<&str>, Expression)>) -> Expression {
        let id = self.id();
        let arguments = arguments
            .into_iter()
            .map(|(label, expression)| {
                FunctionCallArgument::Argument(Argument {
                    id: self.id(),
                    label: label.map(str::to_owned),
                    expression,
                })
            })
            .collect();
        Expression::FunctionCall(FunctionCallExpression {
            id,
            expression: Box::new(callee),
            arguments,
        })
    }

    pub fn literal(&mut self, literal: Literal) -> Expression {
        Expression::Literal(LiteralExpression {
            id: self.id(),
            literal,
        })
    }

    pub fn none(&mut self) -> Expression {
        let literal = Literal::None(self.marker());
        self.literal(literal)
    }

    pub fn boolean(&mut self, value: bool) -> Expression {
        let id = self.id();
        self.literal(Literal::Boolean(BooleanLiteral { id, value }))
    }

    pub fn number(&mut self, value: f64) -> Expression {
        let id = self.id();
        self.literal(Literal::Number(NumberLiteral { id, value }))
    }

    pub fn string(&mut self, value: &str) -> Expression {
        let id = self.id();
        let value = value.to_owned();
        self.literal(Literal::String(StringLiteral { id, value }))
    }

    pub fn color(&mut self, value: &str) -> Expression {
        let id = self.id();
        let value = value.to_owned();
        self.literal(Literal::Color(ColorLiteral { id, value }))
    }

    pub fn array(&mut self, value: Vec<Expression>) -> Expression {
        let id = self.id();
        self.literal(Literal::Array(ArrayLiteral { id, value }))
    }

    pub fn binary(&mut self, left: Expression, kind: OperatorKind, right: Expression) -> Expression {
        let id = self.id();
        let op = BinaryOperator::new(kind, self.id());
        Expression::Binary(BinaryExpression {
            id,
            left: Box::new(left),
            right: Box::new(right),
            op,
        })
    }

    pub fn import(&mut self, name: &str) -> Declaration {
        Declaration::ImportDeclaration(ImportDeclaration {
            id: self.id(),
            name: self.pattern(name),
        })
    }

    pub fn variable(
        &mut self,
        name: &str,
        annotation: Option<TypeAnnotation>,
        initializer: Option<Expression>,
    ) -> Declaration {
        Declaration::Variable(VariableDeclaration {
            id: self.id(),
            name: self.pattern(name),
            annotation,
            initializer,
        })
    }

    pub fn parameter(
        &mut self,
        name: &str,
        annotation: TypeAnnotation,
        default: Option<Expression>,
    ) -> FunctionParameter {
        let id = self.id();
        let local_name = self.pattern(name);
        let default_value = match default {
            Some(expression) => DefaultValue::Value(DefaultExpression {
                id: self.id(),
                expression,
            }),
            None => DefaultValue::None(self.marker()),
        };
        FunctionParameter::Parameter(Parameter {
            id,
            external_name: None,
            local_name,
            annotation,
            default_value,
        })
    }

    pub fn function(
        &mut self,
        name: &str,
        generics: &[&str],
        parameters: Vec<FunctionParameter>,
        return_type: TypeAnnotation,
        block: Vec<Statement>,
    ) -> Declaration {
        let id = self.id();
        let name = self.pattern(name);
        let generic_parameters = generics
            .iter()
            .map(|g| {
                GenericParameter::Parameter(GenericTypeParameter {
                    id: self.id(),
                    name: self.pattern(g),
                })
            })
            .collect();
        Declaration::Function(FunctionDeclaration {
            id,
            name,
            return_type,
            generic_parameters,
            parameters,
            block,
        })
    }

    pub fn namespace(&mut self, name: &str, declarations: Vec<Declaration>) -> Declaration {
        Declaration::Namespace(NamespaceDeclaration {
            id: self.id(),
            name: self.pattern(name),
            declarations,
        })
    }

    pub fn record(&mut self, name: &str, fields: Vec<Declaration>) -> Declaration {
        Declaration::Record(RecordDeclaration {
            id: self.id(),
            name: self.pattern(name),
            generic_parameters: vec![],
            declarations: fields,
        })
    }

    pub fn case(&mut self, name: &str, associated_value_types: Vec<TypeAnnotation>) -> EnumerationCase {
        EnumerationCase::EnumerationCase(EnumCase {
            id: self.id(),
            name: self.pattern(name),
            associated_value_types,
        })
    }

    pub fn enumeration(&mut self, name: &str, cases: Vec<EnumerationCase>) -> Declaration {
        Declaration::Enumeration(EnumerationDeclaration {
            id: self.id(),
            name: self.pattern(name),
            generic_parameters: vec![],
            cases,
        })
    }

    pub fn declaration(&mut self, content: Declaration) -> Statement {
        Statement::Declaration(DeclarationStatement {
            id: self.id(),
            content,
        })
    }

    pub fn branch(&mut self, condition: Expression, block: Vec<Statement>) -> Statement {
        Statement::Branch(BranchStatement {
            id: self.id(),
            condition,
            block,
        })
    }

    pub fn for_each(&mut self, name: &str, expression: Expression, block: Vec<Statement>) -> Statement {
        Statement::Loop(LoopStatement {
            id: self.id(),
            pattern: self.pattern(name),
            expression,
            block,
        })
    }

    pub fn ret(&mut self, expression: Expression) -> Statement {
        Statement::Return(ReturnStatement {
            id: self.id(),
            expression,
        })
    }

    pub fn expression(&mut self, expression: Expression) -> Statement {
        Statement::Expression(ExpressionStatement {
            id: self.id(),
            expression,
        })
    }

    pub fn program(&mut self, block: Vec<Statement>) -> Program {
        Program {
            id: self.id(),
            block,
        }
    }

    /// A program made of declaration statements only.
    pub fn program_of(&mut self, declarations: Vec<Declaration>) -> Program {
        let block = declarations
            .into_iter()
            .map(|d| self.declaration(d))
            .collect();
        self.program(block)
    }

    pub fn top_level(&mut self, declarations: Vec<Declaration>) -> Document {
        Document::TopLevelDeclarations(TopLevelDeclarations {
            id: self.id(),
            declarations,
        })
    }
}
