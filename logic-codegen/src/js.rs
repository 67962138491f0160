//! JavaScript modules from Logic programs.

use crate::emit::{
    bind_arguments, callee, constructor, given_arguments, indent, own_statements, record_arguments,
    Builtin, Constructor,
};
use crate::style::format_number;
use logic_compiler::value::Value;
use logic_compiler::Analysis;
use logic_syntax::ast::*;

/// A JSON-escaped string literal.
pub fn quote(s: &str) -> String {
    serde_json::Value::String(s.to_owned()).to_string()
}

/// A JavaScript literal for an evaluated value.
pub fn value_literal(value: &Value) -> String {
    match value {
        Value::Unit => "null".to_owned(),
        Value::Boolean(b) => b.to_string(),
        Value::Number(n) => format_number(*n),
        Value::String(s) | Value::Color(s) => quote(s),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(value_literal).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Record(r) => {
            let fields: Vec<String> = r
                .fields
                .iter()
                .map(|(k, v)| format!("{k}: {}", value_literal(v)))
                .collect();
            format!("{{ {} }}", fields.join(", "))
        }
        Value::Enum(e) if e.data.is_empty() => quote(&e.case),
        Value::Enum(e) => {
            let data: Vec<String> = e.data.iter().map(value_literal).collect();
            format!("{{ case: {}, data: [{}] }}", quote(&e.case), data.join(", "))
        }
        Value::Function(f) => f.path.join("."),
    }
}

/// Emits the program as an ES module.
pub fn logic_module(analysis: &Analysis) -> String {
    let emitter = Emitter { analysis };
    let mut out = String::new();
    for stmt in own_statements(analysis) {
        let code = match stmt {
            Statement::Declaration(d) => emitter.export(&d.content),
            other => emitter.statement(other, 0),
        };
        if !code.is_empty() {
            out.push_str(&code);
            out.push('\n');
        }
    }
    out
}

struct Emitter<'a> {
    analysis: &'a Analysis,
}

impl Emitter<'_> {
    fn export(&self, decl: &Declaration) -> String {
        match decl {
            Declaration::Variable(v) => {
                format!("export const {} = {};\n", v.name.name, self.initializer(v))
            }
            Declaration::Function(f) => format!("export {}\n", self.function(f, 0)),
            Declaration::Namespace(n) => {
                format!("export const {} = {};\n", n.name.name, self.namespace(n, 0))
            }
            Declaration::Enumeration(e) => {
                format!("export const {} = {};\n", e.name.name, self.enumeration(e, 0))
            }
            Declaration::Record(_) | Declaration::ImportDeclaration(_) | Declaration::Placeholder(_) => {
                String::new()
            }
        }
    }

    /// Cases are their own names at run time.
    fn enumeration(&self, e: &EnumerationDeclaration, depth: usize) -> String {
        let inner = indent(depth + 1);
        let cases: Vec<String> = e
            .defined_cases()
            .map(|c| format!("{inner}{}: {}", c.name.name, quote(&c.name.name)))
            .collect();
        if cases.is_empty() {
            return "{}".to_owned();
        }
        format!("{{\n{}\n{}}}", cases.join(",\n"), indent(depth))
    }

    fn initializer(&self, v: &VariableDeclaration) -> String {
        match &v.initializer {
            Some(init) => self.expression(init),
            None => "undefined".to_owned(),
        }
    }

    fn namespace(&self, n: &NamespaceDeclaration, depth: usize) -> String {
        let inner = indent(depth + 1);
        let members: Vec<String> = n
            .declarations
            .iter()
            .filter_map(|d| match d {
                Declaration::Variable(v) => {
                    Some(format!("{inner}{}: {}", v.name.name, self.initializer(v)))
                }
                Declaration::Function(f) => Some(format!(
                    "{inner}{}: {}",
                    f.name.name,
                    self.function(f, depth + 1)
                )),
                Declaration::Namespace(m) => Some(format!(
                    "{inner}{}: {}",
                    m.name.name,
                    self.namespace(m, depth + 1)
                )),
                Declaration::Enumeration(e) => Some(format!(
                    "{inner}{}: {}",
                    e.name.name,
                    self.enumeration(e, depth + 1)
                )),
                Declaration::Record(_) | Declaration::ImportDeclaration(_) | Declaration::Placeholder(_) => None,
            })
            .collect();
        if members.is_empty() {
            return "{}".to_owned();
        }
        format!("{{\n{}\n{}}}", members.join(",\n"), indent(depth))
    }

    fn parameters(&self, f: &FunctionDeclaration) -> String {
        let params: Vec<String> = f
            .parameters
            .iter()
            .filter_map(|p| match p {
                FunctionParameter::Parameter(p) => Some(match &p.default_value {
                    DefaultValue::Value(d) => {
                        format!("{} = {}", p.local_name.name, self.expression(&d.expression))
                    }
                    DefaultValue::None(_) => p.local_name.name.clone(),
                }),
                FunctionParameter::Placeholder(_) => None,
            })
            .collect();
        params.join(", ")
    }

    fn function(&self, f: &FunctionDeclaration, depth: usize) -> String {
        format!(
            "function {}({}) {{\n{}{}}}",
            f.name.name,
            self.parameters(f),
            self.block(&f.block, depth + 1),
            indent(depth)
        )
    }

    fn block(&self, block: &[Statement], depth: usize) -> String {
        block
            .iter()
            .map(|s| self.statement(s, depth))
            .filter(|s| !s.is_empty())
            .collect()
    }

    fn statement(&self, stmt: &Statement, depth: usize) -> String {
        let pad = indent(depth);
        match stmt {
            Statement::Declaration(d) => match &d.content {
                Declaration::Variable(v) => {
                    format!("{pad}let {} = {};\n", v.name.name, self.initializer(v))
                }
                Declaration::Function(f) => format!("{pad}{}\n", self.function(f, depth)),
                Declaration::Namespace(n) => format!(
                    "{pad}const {} = {};\n",
                    n.name.name,
                    self.namespace(n, depth)
                ),
                Declaration::Enumeration(e) => format!(
                    "{pad}const {} = {};\n",
                    e.name.name,
                    self.enumeration(e, depth)
                ),
                Declaration::Record(_) | Declaration::ImportDeclaration(_) | Declaration::Placeholder(_) => {
                    String::new()
                }
            },
            Statement::Branch(b) => format!(
                "{pad}if ({}) {{\n{}{pad}}}\n",
                self.expression(&b.condition),
                self.block(&b.block, depth + 1)
            ),
            Statement::Loop(l) => format!(
                "{pad}for (const {} of {}) {{\n{}{pad}}}\n",
                l.pattern.name,
                self.expression(&l.expression),
                self.block(&l.block, depth + 1)
            ),
            Statement::Return(r) => format!("{pad}return {};\n", self.expression(&r.expression)),
            Statement::Expression(e) => format!("{pad}{};\n", self.expression(&e.expression)),
            Statement::Placeholder(_) => String::new(),
        }
    }

    /// The name a reference is emitted with: qualified for hoisted
    /// declarations, as written otherwise.
    fn reference(&self, expression: &Expression, written: &str) -> String {
        self.analysis
            .scope
            .declaration_of(expression)
            .and_then(|d| self.analysis.scope.path_of(d))
            .map(|p| p.join("."))
            .unwrap_or_else(|| written.to_owned())
    }

    fn expression(&self, expr: &Expression) -> String {
        match expr {
            Expression::Identifier(e) => self.reference(expr, &e.identifier.string),
            Expression::Member(m) => {
                if self.analysis.scope.member_to_declaration.contains_key(&m.id) {
                    let written = expr.flatten_member_path().unwrap_or_default().join(".");
                    self.reference(expr, &written)
                } else {
                    format!("{}.{}", self.expression(&m.expression), m.member_name.string)
                }
            }
            Expression::FunctionCall(c) => self.call(c),
            Expression::Literal(l) => self.literal(&l.literal),
            Expression::Binary(b) => {
                let op = match b.op.kind() {
                    OperatorKind::IsEqualTo => "===",
                    OperatorKind::IsNotEqualTo => "!==",
                    OperatorKind::IsLessThan => "<",
                    OperatorKind::IsGreaterThan => ">",
                    OperatorKind::IsLessThanOrEqual => "<=",
                    OperatorKind::IsGreaterThanOrEqual => ">=",
                    OperatorKind::SetEqualTo => "=",
                };
                let left = self.expression(&b.left);
                let right = self.expression(&b.right);
                if op == "=" {
                    format!("{left} = {right}")
                } else {
                    format!("({left} {op} {right})")
                }
            }
            Expression::Placeholder(_) => "undefined".to_owned(),
        }
    }

    fn literal(&self, literal: &Literal) -> String {
        match literal {
            Literal::None(_) => "null".to_owned(),
            Literal::Boolean(l) => l.value.to_string(),
            Literal::Number(l) => format_number(l.value),
            Literal::String(l) => quote(&l.value),
            Literal::Color(l) => quote(&l.value),
            Literal::Array(a) => {
                let items: Vec<String> = a.value.iter().map(|e| self.expression(e)).collect();
                format!("[{}]", items.join(", "))
            }
        }
    }

    fn evaluated(&self, c: &FunctionCallExpression) -> String {
        self.analysis
            .evaluation
            .value(&c.id)
            .map(value_literal)
            .unwrap_or_else(|| "undefined".to_owned())
    }

    fn construct(&self, c: &FunctionCallExpression, constructor: Constructor) -> String {
        match constructor {
            Constructor::Record(r) => {
                let fields: Vec<String> = record_arguments(r, &c.arguments)
                    .into_iter()
                    .filter_map(|(field, given)| {
                        given
                            .or(field.initializer.as_ref())
                            .map(|e| format!("{}: {}", field.name.name, self.expression(e)))
                    })
                    .collect();
                format!("{{ {} }}", fields.join(", "))
            }
            Constructor::Case(case) => {
                let data: Vec<String> = given_arguments(&c.arguments)
                    .iter()
                    .map(|a| self.expression(&a.expression))
                    .collect();
                format!("{{ case: {}, data: [{}] }}", quote(&case.name.name), data.join(", "))
            }
        }
    }

    fn call(&self, c: &FunctionCallExpression) -> String {
        if let Some(constructor) = constructor(self.analysis, &c.expression) {
            return self.construct(c, constructor);
        }
        let Some((decl, path)) = callee(self.analysis, &c.expression) else {
            let args: Vec<String> = given_arguments(&c.arguments)
                .iter()
                .map(|a| self.expression(&a.expression))
                .collect();
            return format!("{}({})", self.expression(&c.expression), args.join(", "));
        };
        let bound = bind_arguments(decl, &c.arguments);
        let arg = |i: usize| {
            bound
                .get(i)
                .and_then(|(_, e)| *e)
                .map(|e| self.expression(e))
                .unwrap_or_else(|| "undefined".to_owned())
        };

        if decl.block.is_empty() {
            match Builtin::from_path(&path) {
                Some(Builtin::Or) => return format!("({} || {})", arg(0), arg(1)),
                Some(Builtin::And) => return format!("({} && {})", arg(0), arg(1)),
                Some(Builtin::Not) => return format!("!{}", arg(0)),
                Some(Builtin::Concat) => return format!("({} + {})", arg(0), arg(1)),
                Some(Builtin::At) => return format!("{}[{}]", arg(0), arg(1)),
                Some(Builtin::OptionalValue) => return format!("({} ?? {})", arg(0), arg(1)),
                Some(Builtin::OptionalNone) => return "null".to_owned(),
                Some(Builtin::Saturate) => return self.evaluated(c),
                Some(Builtin::Constructor) => {
                    let fields: Vec<String> = bound
                        .iter()
                        .filter_map(|(p, e)| e.map(|e| format!("{}: {}", p.label(), self.expression(e))))
                        .collect();
                    return format!("{{ {} }}", fields.join(", "));
                }
                None => {}
            }
        }

        let last = bound.iter().rposition(|(_, e)| e.is_some()).map_or(0, |i| i + 1);
        let args: Vec<String> = (0..last).map(arg).collect();
        format!("{}({})", path.join("."), args.join(", "))
    }
}
