//! Swift sources from Logic programs.

use crate::emit::{
    bind_arguments, callee, constructor, given_arguments, indent, own_statements, record_arguments,
    Builtin, Constructor,
};
use crate::js::quote;
use crate::style::format_number;
use crate::target::Framework;
use logic_compiler::color::Rgba;
use logic_compiler::inference::ty::Type;
use logic_compiler::value::Value;
use logic_compiler::Analysis;
use logic_syntax::ast::*;
use logic_syntax::NodeId;

fn component(c: f64) -> String {
    format_number((c * 1000.0).round() / 1000.0)
}

pub fn color_class(framework: Framework) -> &'static str {
    match framework {
        Framework::AppKit => "NSColor",
        _ => "UIColor",
    }
}

/// A color initializer for a CSS hex color.
pub fn color_literal(hex: &str, framework: Framework) -> String {
    let class = color_class(framework);
    match Rgba::parse(hex) {
        Some(c) => format!(
            "{class}(red: {}, green: {}, blue: {}, alpha: {})",
            component(c.red),
            component(c.green),
            component(c.blue),
            component(c.alpha)
        ),
        None => format!("{class}.clear"),
    }
}

/// The Swift spelling of a type.
pub fn swift_type(t: &Type, framework: Framework) -> String {
    match t {
        Type::Constant { name, parameters } => match (name.as_str(), parameters.as_slice()) {
            ("Unit", []) => "Void".to_owned(),
            ("Boolean", []) => "Bool".to_owned(),
            ("Number", []) => "CGFloat".to_owned(),
            ("String", []) => "String".to_owned(),
            ("Color", []) => color_class(framework).to_owned(),
            ("Array", [element]) => format!("[{}]", swift_type(element, framework)),
            ("Optional", [element]) => format!("{}?", swift_type(element, framework)),
            (_, []) => name.clone(),
            (_, parameters) => {
                let parameters: Vec<String> =
                    parameters.iter().map(|p| swift_type(p, framework)).collect();
                format!("{name}<{}>", parameters.join(", "))
            }
        },
        Type::Generic(name) => name.clone(),
        Type::Function(f) => {
            let arguments: Vec<String> = f
                .arguments
                .iter()
                .map(|a| swift_type(&a.ty, framework))
                .collect();
            format!("({}) -> {}", arguments.join(", "), swift_type(&f.ret, framework))
        }
        Type::Var(_) => "Void".to_owned(),
    }
}

/// A Swift literal for an evaluated value.
pub fn value_literal(value: &Value, framework: Framework) -> String {
    match value {
        Value::Unit => "()".to_owned(),
        Value::Boolean(b) => b.to_string(),
        Value::Number(n) => format_number(*n),
        Value::String(s) => quote(s),
        Value::Color(c) => color_literal(c, framework),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(|v| value_literal(v, framework)).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Record(r) => {
            let fields: Vec<String> = r
                .fields
                .iter()
                .map(|(k, v)| format!("{k}: {}", value_literal(v, framework)))
                .collect();
            format!("{}({})", r.name, fields.join(", "))
        }
        Value::Enum(e) if e.data.is_empty() => format!("{}.{}", e.name, e.case),
        Value::Enum(e) => {
            let data: Vec<String> = e.data.iter().map(|v| value_literal(v, framework)).collect();
            format!("{}.{}({})", e.name, e.case, data.join(", "))
        }
        Value::Function(f) => f.path.join("."),
    }
}

/// Emits the program as a Swift source file.
pub fn logic_module(analysis: &Analysis, framework: Framework) -> String {
    let emitter = Emitter {
        analysis,
        framework,
    };
    let module = match framework {
        Framework::AppKit => "AppKit",
        _ => "UIKit",
    };
    let mut out = format!("import {module}\n");
    for stmt in own_statements(analysis) {
        let code = match stmt {
            Statement::Declaration(d) => emitter.declaration(&d.content, 0, Scope::Global),
            other => emitter.statement(other, 0),
        };
        if !code.is_empty() {
            out.push('\n');
            out.push_str(&code);
        }
    }
    out
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Scope {
    Global,
    Namespace,
    Local,
}

struct Emitter<'a> {
    analysis: &'a Analysis,
    framework: Framework,
}

impl Emitter<'_> {
    fn ty(&self, decl: &NodeId) -> String {
        swift_type(&self.analysis.declaration_type(decl), self.framework)
    }

    fn declaration(&self, decl: &Declaration, depth: usize, scope: Scope) -> String {
        let pad = indent(depth);
        let modifiers = match scope {
            Scope::Global => "public ",
            Scope::Namespace => "public static ",
            Scope::Local => "",
        };
        match decl {
            Declaration::Variable(v) => {
                let keyword = if scope == Scope::Local { "var" } else { "let" };
                let init = match &v.initializer {
                    Some(init) => format!(" = {}", self.expression(init)),
                    None => String::new(),
                };
                format!(
                    "{pad}{modifiers}{keyword} {}: {}{init}\n",
                    v.name.name,
                    self.ty(&v.id)
                )
            }
            Declaration::Function(f) => self.function(f, depth, modifiers),
            Declaration::Namespace(n) => {
                let modifiers = if scope == Scope::Local { "" } else { "public " };
                let members: String = n
                    .declarations
                    .iter()
                    .map(|d| self.declaration(d, depth + 1, Scope::Namespace))
                    .collect();
                format!(
                    "{pad}{modifiers}enum {} {{\n{members}{pad}}}\n",
                    n.name.name
                )
            }
            Declaration::Record(r) => {
                let modifiers = if scope == Scope::Local { "" } else { "public " };
                self.record(r, depth, modifiers)
            }
            Declaration::Enumeration(e) => {
                let modifiers = if scope == Scope::Local { "" } else { "public " };
                self.enumeration(e, depth, modifiers)
            }
            Declaration::ImportDeclaration(_) | Declaration::Placeholder(_) => String::new(),
        }
    }

    fn record(&self, r: &RecordDeclaration, depth: usize, modifiers: &str) -> String {
        let pad = indent(depth);
        let inner = indent(depth + 1);
        let body = indent(depth + 2);
        let fields: Vec<(&VariableDeclaration, String)> =
            r.fields().map(|f| (f, self.ty(&f.id))).collect();
        let params: Vec<String> = fields
            .iter()
            .map(|(f, t)| match &f.initializer {
                Some(init) => format!("{}: {t} = {}", f.name.name, self.expression(init)),
                None => format!("{}: {t}", f.name.name),
            })
            .collect();
        let assignments: String = fields
            .iter()
            .map(|(f, _)| format!("{body}self.{0} = {0}\n", f.name.name))
            .collect();
        let properties: String = fields
            .iter()
            .map(|(f, t)| format!("{inner}{modifiers}var {}: {t}\n", f.name.name))
            .collect();
        format!(
            "{pad}{modifiers}struct {}: Equatable {{\n{inner}{modifiers}init({}) {{\n{assignments}{inner}}}\n\n{properties}{pad}}}\n",
            r.name.name,
            params.join(", ")
        )
    }

    fn enumeration(&self, e: &EnumerationDeclaration, depth: usize, modifiers: &str) -> String {
        let pad = indent(depth);
        let inner = indent(depth + 1);
        let cases: String = e
            .defined_cases()
            .map(|c| match self.analysis.declaration_type(&c.id) {
                Type::Function(f) => {
                    let data: Vec<String> = f
                        .arguments
                        .iter()
                        .map(|a| swift_type(&a.ty, self.framework))
                        .collect();
                    format!("{inner}case {}({})\n", c.name.name, data.join(", "))
                }
                _ => format!("{inner}case {}\n", c.name.name),
            })
            .collect();
        format!(
            "{pad}{modifiers}indirect enum {} {{\n{cases}{pad}}}\n",
            e.name.name
        )
    }

    fn function(&self, f: &FunctionDeclaration, depth: usize, modifiers: &str) -> String {
        let pad = indent(depth);
        let generics: Vec<&str> = f
            .generic_parameters
            .iter()
            .filter_map(|g| match g {
                GenericParameter::Parameter(g) => Some(g.name.name.as_str()),
                GenericParameter::Placeholder(_) => None,
            })
            .collect();
        let generics = if generics.is_empty() {
            String::new()
        } else {
            format!("<{}>", generics.join(", "))
        };
        let params: Vec<String> = f
            .parameters
            .iter()
            .filter_map(|p| match p {
                FunctionParameter::Parameter(p) => Some(p),
                FunctionParameter::Placeholder(_) => None,
            })
            .map(|p| {
                let name = match &p.external_name {
                    Some(label) => format!("{label} {}", p.local_name.name),
                    None => p.local_name.name.clone(),
                };
                let default = match &p.default_value {
                    DefaultValue::Value(d) => format!(" = {}", self.expression(&d.expression)),
                    DefaultValue::None(_) => String::new(),
                };
                format!("{name}: {}{default}", self.ty(&p.id))
            })
            .collect();
        let ret = match self.analysis.declaration_type(&f.id) {
            Type::Function(t) => swift_type(&t.ret, self.framework),
            _ => "Void".to_owned(),
        };
        let ret = if ret == "Void" {
            String::new()
        } else {
            format!(" -> {ret}")
        };
        let body: String = f.block.iter().map(|s| self.statement(s, depth + 1)).collect();
        format!(
            "{pad}{modifiers}func {}{generics}({}){ret} {{\n{body}{pad}}}\n",
            f.name.name,
            params.join(", ")
        )
    }

    fn statement(&self, stmt: &Statement, depth: usize) -> String {
        let pad = indent(depth);
        match stmt {
            Statement::Declaration(d) => self.declaration(&d.content, depth, Scope::Local),
            Statement::Branch(b) => {
                let body: String = b.block.iter().map(|s| self.statement(s, depth + 1)).collect();
                format!(
                    "{pad}if {} {{\n{body}{pad}}}\n",
                    self.expression(&b.condition)
                )
            }
            Statement::Loop(l) => {
                let body: String = l.block.iter().map(|s| self.statement(s, depth + 1)).collect();
                format!(
                    "{pad}for {} in {} {{\n{body}{pad}}}\n",
                    l.pattern.name,
                    self.expression(&l.expression)
                )
            }
            Statement::Return(r) => format!("{pad}return {}\n", self.expression(&r.expression)),
            Statement::Expression(e) => match &e.expression {
                Expression::Binary(b) if b.op.kind() == OperatorKind::SetEqualTo => {
                    format!("{pad}{}\n", self.expression(&e.expression))
                }
                Expression::Placeholder(_) => String::new(),
                other => format!("{pad}_ = {}\n", self.expression(other)),
            },
            Statement::Placeholder(_) => String::new(),
        }
    }

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
            Expression::Literal(l) => match &l.literal {
                Literal::None(_) => "nil".to_owned(),
                Literal::Boolean(b) => b.value.to_string(),
                Literal::Number(n) => format_number(n.value),
                Literal::String(s) => quote(&s.value),
                Literal::Color(c) => color_literal(&c.value, self.framework),
                Literal::Array(a) => {
                    let items: Vec<String> = a.value.iter().map(|e| self.expression(e)).collect();
                    format!("[{}]", items.join(", "))
                }
            },
            Expression::Binary(b) => {
                let left = self.expression(&b.left);
                let right = self.expression(&b.right);
                let op = match b.op.kind() {
                    OperatorKind::IsEqualTo => "==",
                    OperatorKind::IsNotEqualTo => "!=",
                    OperatorKind::IsLessThan => "<",
                    OperatorKind::IsGreaterThan => ">",
                    OperatorKind::IsLessThanOrEqual => "<=",
                    OperatorKind::IsGreaterThanOrEqual => ">=",
                    OperatorKind::SetEqualTo => return format!("{left} = {right}"),
                };
                format!("({left} {op} {right})")
            }
            Expression::Placeholder(_) => "nil".to_owned(),
        }
    }

    fn construct(&self, c: &FunctionCallExpression, constructor: Constructor) -> String {
        let callee = self.expression(&c.expression);
        let args: Vec<String> = match constructor {
            Constructor::Record(r) => record_arguments(r, &c.arguments)
                .into_iter()
                .filter_map(|(field, given)| {
                    given.map(|e| format!("{}: {}", field.name.name, self.expression(e)))
                })
                .collect(),
            Constructor::Case(_) => given_arguments(&c.arguments)
                .iter()
                .map(|a| self.expression(&a.expression))
                .collect(),
        };
        format!("{callee}({})", args.join(", "))
    }

    fn call(&self, c: &FunctionCallExpression) -> String {
        if let Some(constructor) = constructor(self.analysis, &c.expression) {
            return self.construct(c, constructor);
        }
        let Some((decl, path)) = callee(self.analysis, &c.expression) else {
            let args: Vec<String> = given_arguments(&c.arguments)
                .iter()
                .map(|a| match &a.label {
                    Some(label) => format!("{label}: {}", self.expression(&a.expression)),
                    None => self.expression(&a.expression),
                })
                .collect();
            return format!("{}({})", self.expression(&c.expression), args.join(", "));
        };
        let bound = bind_arguments(decl, &c.arguments);
        let arg = |i: usize| {
            bound
                .get(i)
                .and_then(|(_, e)| *e)
                .map(|e| self.expression(e))
                .unwrap_or_else(|| "nil".to_owned())
        };

        if decl.block.is_empty() {
            match Builtin::from_path(&path) {
                Some(Builtin::Or) => return format!("({} || {})", arg(0), arg(1)),
                Some(Builtin::And) => return format!("({} && {})", arg(0), arg(1)),
                Some(Builtin::Not) => return format!("!{}", arg(0)),
                Some(Builtin::Concat) => return format!("({} + {})", arg(0), arg(1)),
                Some(Builtin::At) => return format!("{}[Int({})]", arg(0), arg(1)),
                Some(Builtin::OptionalValue) => return format!("({} ?? {})", arg(0), arg(1)),
                Some(Builtin::OptionalNone) => return "nil".to_owned(),
                Some(Builtin::Saturate) => {
                    return self
                        .analysis
                        .evaluation
                        .value(&c.id)
                        .map(|v| value_literal(v, self.framework))
                        .unwrap_or_else(|| "nil".to_owned())
                }
                Some(Builtin::Constructor) | None => {}
            }
        }

        let args: Vec<String> = bound
            .iter()
            .filter_map(|(p, e)| e.map(|e| format!("{}: {}", p.label(), self.expression(e))))
            .collect();
        format!("{}({})", path.join("."), args.join(", "))
    }
}
