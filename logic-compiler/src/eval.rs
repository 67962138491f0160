//! Evaluation of Logic programs to values.

use crate::errors::{Error, Kind};
use crate::inference::ty::Type;
use crate::inference::unify::Substitution;
use crate::inference::UnificationContext;
use crate::scope::{index_declarations, DeclarationRef, ScopeContext};
use crate::stdlib::Intrinsics;
use crate::value::{EnumValue, FunctionValue, Record, Value};
use indexmap::{IndexMap, IndexSet};
use logic_syntax::ast::*;
use logic_syntax::NodeId;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Calls nested deeper than this evaluate to `Unit`.
pub const MAX_CALL_DEPTH: usize = 64;

/// The values computed for a program.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EvaluationContext {
    /// Value of every expression and declaration evaluated outside of a
    /// function call.
    pub values: IndexMap<NodeId, Value>,
    /// Declaration cycles, each recorded once.
    pub cycles: Vec<Vec<NodeId>>,
}

impl EvaluationContext {
    pub fn value(&self, node: &NodeId) -> Option<&Value> {
        self.values.get(node)
    }
}

#[derive(Debug, Default)]
pub struct Evaluation {
    pub context: EvaluationContext,
    pub diagnostics: Vec<Error>,
}

/// Evaluates every top-level declaration of the program.
pub fn evaluate(
    program: &Program,
    scope: &ScopeContext,
    unification: &UnificationContext,
    substitution: &Substitution,
    intrinsics: &Intrinsics,
) -> Evaluation {
    let mut evaluator = Evaluator {
        scope,
        unification,
        substitution,
        intrinsics,
        declarations: index_declarations(program),
        globals: HashMap::new(),
        stack: Vec::new(),
        frames: Vec::new(),
        depth: 0,
        cycles: IndexSet::new(),
        eval: Evaluation::default(),
    };
    evaluator.top_level(&program.block);
    log::debug!(
        "evaluated {} values, {} cycles",
        evaluator.eval.context.values.len(),
        evaluator.eval.context.cycles.len()
    );
    evaluator.eval
}

type Frame = IndexMap<NodeId, Value>;

enum Flow {
    Normal,
    Return(Value),
}

struct Evaluator<'a> {
    scope: &'a ScopeContext,
    unification: &'a UnificationContext,
    substitution: &'a Substitution,
    intrinsics: &'a Intrinsics,
    declarations: IndexMap<NodeId, DeclarationRef<'a>>,
    globals: HashMap<NodeId, Value>,
    /// Global declarations being evaluated.
    stack: Vec<NodeId>,
    frames: Vec<Frame>,
    depth: usize,
    /// Sorted members of the cycles found so far.
    cycles: IndexSet<Vec<NodeId>>,
    eval: Evaluation,
}

impl<'a> Evaluator<'a> {
    fn record(&mut self, node: &NodeId, value: &Value) {
        if self.frames.is_empty() {
            self.eval.context.values.insert(node.clone(), value.clone());
        }
    }

    fn diagnose(&mut self, err: Error) {
        log::warn!("{err}");
        self.eval.diagnostics.push(err);
    }

    fn top_level(&mut self, block: &'a [Statement]) {
        for stmt in block {
            match stmt {
                Statement::Declaration(d) => self.global_declaration(&d.content),
                Statement::Branch(_) | Statement::Loop(_) | Statement::Expression(_) => {
                    self.frames.push(Frame::new());
                    self.statement(stmt);
                    self.frames.pop();
                }
                Statement::Return(_) | Statement::Placeholder(_) => {}
            }
        }
    }

    fn global_declaration(&mut self, decl: &'a Declaration) {
        match decl {
            Declaration::Variable(v) => {
                self.global(&v.id);
            }
            Declaration::Function(f) => {
                let value = self.function_value(&f.id, &f.name.name);
                self.record(&f.id, &value);
            }
            Declaration::Namespace(n) => n
                .declarations
                .iter()
                .for_each(|d| self.global_declaration(d)),
            Declaration::Record(r) => {
                let value = self.function_value(&r.id, &r.name.name);
                self.record(&r.id, &value);
            }
            Declaration::Enumeration(e) => {
                for case in e.defined_cases() {
                    let value = self.case_value(e, case);
                    self.record(&case.id, &value);
                }
            }
            Declaration::ImportDeclaration(_) | Declaration::Placeholder(_) => {}
        }
    }

    /// A case without associated values is a value, any other case
    /// constructs one.
    fn case_value(&self, enumeration: &EnumerationDeclaration, case: &EnumCase) -> Value {
        if case.associated_value_types.is_empty() {
            Value::Enum(EnumValue {
                name: enumeration.name.name.clone(),
                case: case.name.name.clone(),
                data: vec![],
            })
        } else {
            self.function_value(&case.id, &case.name.name)
        }
    }

    fn function_value(&self, decl: &NodeId, name: &str) -> Value {
        let path = self
            .scope
            .path_of(decl)
            .map(<[String]>::to_vec)
            .unwrap_or_else(|| vec![name.to_owned()]);
        Value::Function(FunctionValue::new(decl.clone(), path))
    }

    /// Evaluates a hoisted variable, at most once.
    fn global(&mut self, decl: &NodeId) -> Value {
        if let Some(value) = self.globals.get(decl) {
            return value.clone();
        }
        if let Some(start) = self.stack.iter().position(|d| d == decl) {
            let cycle = self.stack[start..].to_vec();
            let mut key = cycle.clone();
            key.sort();
            if self.cycles.insert(key) {
                self.diagnose(
                    Error::new(Kind::EvaluationCycle, "declaration depends on itself")
                        .with(&cycle)
                        .at(decl),
                );
                self.eval.context.cycles.push(cycle);
            }
            return Value::Unit;
        }
        let Some(DeclarationRef::Variable(v)) = self.declarations.get(decl).copied() else {
            return Value::Unit;
        };

        self.stack.push(decl.clone());
        let frames = std::mem::take(&mut self.frames);
        let value = match &v.initializer {
            Some(init) => self.expression(init),
            None => Value::Unit,
        };
        self.frames = frames;
        self.stack.pop();

        self.globals.insert(decl.clone(), value.clone());
        self.record(decl, &value);
        value
    }

    fn local(&self, decl: &NodeId) -> Option<&Value> {
        self.frames.last().and_then(|f| f.get(decl))
    }

    fn reference(&mut self, decl: &NodeId) -> Value {
        if let Some(value) = self.local(decl) {
            return value.clone();
        }
        match self.declarations.get(decl).copied() {
            Some(DeclarationRef::Variable(v)) if self.scope.path_of(&v.id).is_some() => {
                self.global(decl)
            }
            Some(DeclarationRef::Function(f)) => self.function_value(&f.id, &f.name.name),
            Some(DeclarationRef::Record(r)) => self.function_value(&r.id, &r.name.name),
            Some(DeclarationRef::Case(e, c)) => self.case_value(e, c),
            _ => Value::Unit,
        }
    }

    fn block(&mut self, block: &'a [Statement]) -> Flow {
        for stmt in block {
            if let Flow::Return(value) = self.statement(stmt) {
                return Flow::Return(value);
            }
        }
        Flow::Normal
    }

    fn bind(&mut self, decl: &NodeId, value: Value) {
        if let Some(frame) = self.frames.last_mut() {
            frame.insert(decl.clone(), value);
        }
    }

    fn statement(&mut self, stmt: &'a Statement) -> Flow {
        match stmt {
            Statement::Declaration(d) => {
                match &d.content {
                    Declaration::Variable(v) => {
                        let value = match &v.initializer {
                            Some(init) => self.expression(init),
                            None => Value::Unit,
                        };
                        self.bind(&v.id, value);
                    }
                    Declaration::Function(f) => {
                        let mut value = self.function_value(&f.id, &f.name.name);
                        if let (Value::Function(func), Some(frame)) = (&mut value, self.frames.last()) {
                            func.captures = frame.clone();
                        }
                        self.bind(&f.id, value);
                    }
                    _ => {}
                }
                Flow::Normal
            }
            Statement::Branch(b) => match self.expression(&b.condition) {
                Value::Boolean(true) => self.block(&b.block),
                Value::Boolean(false) => Flow::Normal,
                other => {
                    self.diagnose(
                        Error::new(Kind::Evaluation, "branch condition is not a boolean")
                            .with(&other)
                            .at(&b.id),
                    );
                    Flow::Normal
                }
            },
            Statement::Loop(l) => match self.expression(&l.expression) {
                Value::Array(items) => {
                    for item in items {
                        self.bind(&l.pattern.id, item);
                        if let Flow::Return(value) = self.block(&l.block) {
                            return Flow::Return(value);
                        }
                    }
                    Flow::Normal
                }
                other => {
                    self.diagnose(
                        Error::new(Kind::Evaluation, "loop over a non-array")
                            .with(&other)
                            .at(&l.id),
                    );
                    Flow::Normal
                }
            },
            Statement::Return(r) => Flow::Return(self.expression(&r.expression)),
            Statement::Expression(e) => {
                self.expression(&e.expression);
                Flow::Normal
            }
            Statement::Placeholder(_) => Flow::Normal,
        }
    }

    fn expression(&mut self, expr: &'a Expression) -> Value {
        let value = match expr {
            Expression::Identifier(e) => {
                match self.scope.identifier_to_declaration.get(&e.identifier.id) {
                    Some(decl) => self.reference(decl),
                    None => Value::Unit,
                }
            }
            Expression::Member(m) => self.member(m),
            Expression::FunctionCall(c) => self.call(c),
            Expression::Literal(l) => self.literal(&l.literal),
            Expression::Binary(b) => self.binary(b),
            Expression::Placeholder(_) => Value::Unit,
        };
        self.record(expr.id(), &value);
        value
    }

    fn member(&mut self, m: &'a MemberExpression) -> Value {
        if let Some(decl) = self.scope.member_to_declaration.get(&m.id) {
            return self.reference(decl);
        }
        if !self.scope.dynamic_members.contains(&m.id) {
            return Value::Unit;
        }
        let base = self.expression(&m.expression);
        match base.field(&m.member_name.string) {
            Some(value) => value.clone(),
            None => {
                self.diagnose(
                    Error::new(Kind::Evaluation, "no such field")
                        .with(&m.member_name.string)
                        .at(&m.id),
                );
                Value::Unit
            }
        }
    }

    fn literal(&mut self, literal: &'a Literal) -> Value {
        match literal {
            Literal::None(_) => Value::Unit,
            Literal::Boolean(l) => Value::Boolean(l.value),
            Literal::Number(l) => Value::Number(l.value),
            Literal::String(l) => Value::String(l.value.clone()),
            Literal::Color(l) => Value::Color(l.value.clone()),
            Literal::Array(a) => Value::Array(a.value.iter().map(|e| self.expression(e)).collect()),
        }
    }

    fn binary(&mut self, b: &'a BinaryExpression) -> Value {
        if b.op.kind() == OperatorKind::SetEqualTo {
            let value = self.expression(&b.right);
            let target = match b.left.as_ref() {
                Expression::Identifier(e) => self
                    .scope
                    .identifier_to_declaration
                    .get(&e.identifier.id)
                    .filter(|d| self.local(d).is_some())
                    .cloned(),
                _ => None,
            };
            match target {
                Some(decl) => self.bind(&decl, value),
                None => self.diagnose(
                    Error::new(Kind::Evaluation, "assignment to a non-local").at(&b.id),
                ),
            }
            return Value::Unit;
        }

        let left = self.expression(&b.left);
        let right = self.expression(&b.right);
        let ordering = match (&left, &right) {
            (Value::Number(l), Value::Number(r)) => l.partial_cmp(r),
            (Value::String(l), Value::String(r)) => Some(l.cmp(r)),
            _ => None,
        };
        let result = match b.op.kind() {
            OperatorKind::IsEqualTo => Some(left == right),
            OperatorKind::IsNotEqualTo => Some(left != right),
            OperatorKind::IsLessThan => ordering.map(Ordering::is_lt),
            OperatorKind::IsGreaterThan => ordering.map(Ordering::is_gt),
            OperatorKind::IsLessThanOrEqual => ordering.map(Ordering::is_le),
            OperatorKind::IsGreaterThanOrEqual => ordering.map(Ordering::is_ge),
            OperatorKind::SetEqualTo => None,
        };
        match result {
            Some(b) => Value::Boolean(b),
            None => {
                self.diagnose(
                    Error::new(Kind::Evaluation, "operands cannot be compared")
                        .with(&left)
                        .with(&right)
                        .at(&b.id),
                );
                Value::Unit
            }
        }
    }

    /// Whether the callee is known not to be a function.
    fn ill_typed_callee(&self, callee: &Expression) -> Option<Type> {
        let t = self.unification.nodes.get(callee.id())?;
        match self.substitution.apply(t) {
            t @ Type::Constant { .. } => Some(t),
            _ => None,
        }
    }

    fn call(&mut self, c: &'a FunctionCallExpression) -> Value {
        if let Some(t) = self.ill_typed_callee(&c.expression) {
            self.diagnose(
                Error::new(Kind::Evaluation, "callee is not a function")
                    .with(&t)
                    .at(&c.id),
            );
            return Value::Unit;
        }
        let callee = self.expression(&c.expression);
        let arguments: Vec<(Option<&'a str>, Value)> = c
            .arguments
            .iter()
            .filter_map(|a| match a {
                FunctionCallArgument::Argument(a) => Some(a),
                FunctionCallArgument::Placeholder(_) => None,
            })
            .map(|a| (a.label.as_deref(), self.expression(&a.expression)))
            .collect();

        let func = match callee {
            Value::Function(func) => func,
            other => {
                self.diagnose(
                    Error::new(Kind::Evaluation, "callee is not a function")
                        .with(&other)
                        .at(&c.id),
                );
                return Value::Unit;
            }
        };
        let decl = match self.declarations.get(&func.declaration).copied() {
            Some(DeclarationRef::Function(decl)) => decl,
            Some(DeclarationRef::Record(r)) => return self.construct_record(r, arguments),
            Some(DeclarationRef::Case(e, case)) => {
                return Value::Enum(EnumValue {
                    name: e.name.name.clone(),
                    case: case.name.name.clone(),
                    data: arguments.into_iter().map(|(_, value)| value).collect(),
                })
            }
            _ => return Value::Unit,
        };

        if self.depth >= MAX_CALL_DEPTH {
            self.diagnose(
                Error::new(Kind::Evaluation, "maximum call depth exceeded")
                    .with(&func.path)
                    .at(&c.id),
            );
            return Value::Unit;
        }
        self.depth += 1;
        let mut frame = func.captures.clone();
        frame.insert(func.declaration.clone(), Value::Function(func.clone()));
        self.frames.push(frame);
        let bound = self.bind_parameters(decl, arguments);

        let result = if decl.block.is_empty() {
            match self.intrinsics.get(&func.path) {
                Some(intrinsic) => match intrinsic.eval(&bound) {
                    Ok(value) => value,
                    Err(err) => {
                        self.diagnose(err.at(&c.id));
                        Value::Unit
                    }
                },
                None => Value::Unit,
            }
        } else {
            match self.block(&decl.block) {
                Flow::Return(value) => value,
                Flow::Normal => Value::Unit,
            }
        };

        self.frames.pop();
        self.depth -= 1;
        result
    }

    /// Builds a record from labelled arguments, falling back to the field
    /// defaults. Fields left without a value are omitted.
    fn construct_record(
        &mut self,
        decl: &'a RecordDeclaration,
        arguments: Vec<(Option<&str>, Value)>,
    ) -> Value {
        let mut fields = IndexMap::new();
        for field in decl.fields() {
            let name = field.name.name.as_str();
            let given = arguments
                .iter()
                .find(|(label, _)| *label == Some(name))
                .map(|(_, value)| value.clone());
            let value = match (given, &field.initializer) {
                (Some(value), _) => value,
                (None, Some(init)) => {
                    let frames = std::mem::take(&mut self.frames);
                    let value = self.expression(init);
                    self.frames = frames;
                    value
                }
                (None, None) => Value::Unit,
            };
            if !value.is_unit() {
                fields.insert(name.to_owned(), value);
            }
        }
        Value::Record(Record {
            name: decl.name.name.clone(),
            fields,
        })
    }

    /// Binds arguments to parameters by label, then by position, then to
    /// their default values, in the frame of the call.
    fn bind_parameters(
        &mut self,
        decl: &'a FunctionDeclaration,
        arguments: Vec<(Option<&str>, Value)>,
    ) -> Vec<(String, Value)> {
        let mut arguments: Vec<Option<(Option<&str>, Value)>> =
            arguments.into_iter().map(Some).collect();
        let mut bound = Vec::new();
        for param in decl.parameters.iter() {
            let FunctionParameter::Parameter(p) = param else {
                continue;
            };
            let label = p.label();
            let index = arguments
                .iter()
                .position(|a| matches!(a, Some((Some(l), _)) if *l == label))
                .or_else(|| arguments.iter().position(|a| matches!(a, Some((None, _)))));
            let value = match index.and_then(|i| arguments[i].take()) {
                Some((_, value)) => value,
                None => match &p.default_value {
                    DefaultValue::Value(d) => self.expression(&d.expression),
                    DefaultValue::None(_) => Value::Unit,
                },
            };
            self.bind(&p.id, value.clone());
            bound.push((label.to_owned(), value));
        }
        bound
    }
}
