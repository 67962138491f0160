//! The compact declaration format.
//!
//! A hand-authored shorthand for Logic documents in which every node is
//! `{ "type": <tag>, <attributes>..., "children": [...] }`:
//!
//! ```json
//! { "type": "Declarations", "children": [
//!     { "type": "ImportDeclaration", "name": "Prelude" },
//!     { "type": "Variable", "name": "x", "annotation": "Number", "value": 123 }
//! ] }
//! ```

use crate::ast::*;
use crate::builder::Builder;
use crate::errors::{Error, Result};
use crate::ids::IdGenerator;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RawNode {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub children: Vec<RawNode>,
    #[serde(flatten)]
    pub attributes: IndexMap<String, Value>,
}

impl RawNode {
    pub fn parse(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    fn optional(&self, attribute: &str) -> Result<Option<&str>> {
        match self.attributes.get(attribute) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(self.invalid(attribute, other)),
        }
    }

    fn required(&self, attribute: &str) -> Result<&str> {
        self.optional(attribute)?
            .ok_or_else(|| Error::MissingAttribute {
                node: self.kind.clone(),
                attribute: attribute.to_owned(),
            })
    }

    fn invalid(&self, attribute: &str, value: &Value) -> Error {
        Error::InvalidAttribute {
            node: self.kind.clone(),
            attribute: attribute.to_owned(),
            value: value.to_string(),
        }
    }

    fn single_child(&self) -> Result<&RawNode> {
        match self.children.as_slice() {
            [child] => Ok(child),
            _ => Err(Error::MissingAttribute {
                node: self.kind.clone(),
                attribute: "children".to_owned(),
            }),
        }
    }
}

/// Builds a document from its compact form.
pub fn make(raw: &RawNode, ids: &mut dyn IdGenerator) -> Result<Document> {
    let b = &mut Builder::new(ids);
    match raw.kind.as_str() {
        "Declarations" => {
            let declarations = raw
                .children
                .iter()
                .map(|c| make_declaration(b, c))
                .collect::<Result<Vec<_>>>()?;
            Ok(b.top_level(declarations))
        }
        "Program" => {
            let block = make_block(b, &raw.children)?;
            Ok(Document::Program(b.program(block)))
        }
        other => Err(Error::UnknownNode(other.to_owned())),
    }
}

fn make_block(b: &mut Builder, nodes: &[RawNode]) -> Result<Vec<Statement>> {
    nodes.iter().map(|n| make_statement(b, n)).collect()
}

pub fn make_statement(b: &mut Builder, raw: &RawNode) -> Result<Statement> {
    match raw.kind.as_str() {
        "ImportDeclaration" | "Variable" | "Namespace" | "Function" | "Record" | "Enumeration" => {
            let content = make_declaration(b, raw)?;
            Ok(b.declaration(content))
        }
        "Return" => {
            let expression = make_expression(b, raw.single_child()?)?;
            Ok(b.ret(expression))
        }
        "Branch" => {
            let (condition, block) = raw.children.split_first().ok_or_else(|| {
                Error::MissingAttribute {
                    node: raw.kind.clone(),
                    attribute: "children".to_owned(),
                }
            })?;
            let condition = make_expression(b, condition)?;
            let block = make_block(b, block)?;
            Ok(b.branch(condition, block))
        }
        "Loop" => {
            let pattern = raw.required("pattern")?;
            let (expression, block) = raw.children.split_first().ok_or_else(|| {
                Error::MissingAttribute {
                    node: raw.kind.clone(),
                    attribute: "children".to_owned(),
                }
            })?;
            let expression = make_expression(b, expression)?;
            let block = make_block(b, block)?;
            Ok(b.for_each(pattern, expression, block))
        }
        "ExpressionStatement" => {
            let expression = make_expression(b, raw.single_child()?)?;
            Ok(b.expression(expression))
        }
        "Placeholder" => Ok(Statement::Placeholder(b.marker())),
        other => Err(Error::UnknownNode(other.to_owned())),
    }
}

pub fn make_declaration(b: &mut Builder, raw: &RawNode) -> Result<Declaration> {
    match raw.kind.as_str() {
        "ImportDeclaration" => Ok(b.import(raw.required("name")?)),
        "Variable" => {
            let name = raw.required("name")?;
            let annotation = raw.optional("annotation")?.map(parse_annotation).transpose()?;
            let initializer = match raw.attributes.get("value") {
                Some(value) => Some(make_literal(b, raw, annotation.as_ref(), value)?),
                None => match (annotation.as_ref(), raw.children.as_slice()) {
                    (Some(a), children) if a.name == "Array" => {
                        let items = make_expressions(b, children)?;
                        Some(b.array(items))
                    }
                    (_, []) => None,
                    (_, [child]) => Some(make_expression(b, child)?),
                    _ => return Err(raw.invalid("children", &Value::from(raw.children.len()))),
                },
            };
            let annotation = annotation.map(|a| a.build(b));
            Ok(b.variable(name, annotation, initializer))
        }
        "Namespace" => {
            let name = raw.required("name")?;
            let declarations = raw
                .children
                .iter()
                .map(|c| make_declaration(b, c))
                .collect::<Result<Vec<_>>>()?;
            Ok(b.namespace(name, declarations))
        }
        "Function" => {
            let name = raw.required("name")?;
            let return_type = parse_annotation(raw.optional("returnType")?.unwrap_or("Unit"))?;
            let generics = generic_names(raw)?;
            let mut parameters = Vec::new();
            let mut block = Vec::new();
            for child in raw.children.iter() {
                if child.kind == "Parameter" {
                    parameters.push(make_parameter(b, child)?);
                } else {
                    block.push(make_statement(b, child)?);
                }
            }
            let return_type = return_type.build(b);
            Ok(b.function(name, &generics, parameters, return_type, block))
        }
        "Record" => {
            let name = raw.required("name")?;
            let generics = generic_names(raw)?;
            let fields = raw
                .children
                .iter()
                .map(|c| make_declaration(b, c))
                .collect::<Result<Vec<_>>>()?;
            let mut record = b.record(name, fields);
            if let Declaration::Record(r) = &mut record {
                r.generic_parameters = generic_parameters(b, &generics);
            }
            Ok(record)
        }
        "Enumeration" => {
            let name = raw.required("name")?;
            let generics = generic_names(raw)?;
            let mut cases = Vec::new();
            for case in raw.children.iter() {
                cases.push(match case.kind.as_str() {
                    "Case" => {
                        let types = match case.optional("associatedValueTypes")? {
                            Some(s) => parse_annotation_list(s)?,
                            None => vec![],
                        };
                        let types = types.iter().map(|a| a.build(b)).collect();
                        b.case(case.required("name")?, types)
                    }
                    "Placeholder" => EnumerationCase::Placeholder(b.marker()),
                    other => return Err(Error::UnknownNode(other.to_owned())),
                });
            }
            let mut enumeration = b.enumeration(name, cases);
            if let Declaration::Enumeration(e) = &mut enumeration {
                e.generic_parameters = generic_parameters(b, &generics);
            }
            Ok(enumeration)
        }
        "Placeholder" => Ok(Declaration::Placeholder(b.marker())),
        other => Err(Error::UnknownNode(other.to_owned())),
    }
}

fn generic_names(raw: &RawNode) -> Result<Vec<&str>> {
    Ok(raw
        .optional("generics")?
        .map(|g| {
            g.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
        })
        .unwrap_or_default())
}

fn generic_parameters(b: &mut Builder, names: &[&str]) -> Vec<GenericParameter> {
    names
        .iter()
        .map(|g| {
            GenericParameter::Parameter(GenericTypeParameter {
                id: b.id(),
                name: b.pattern(g),
            })
        })
        .collect()
}

fn make_parameter(b: &mut Builder, raw: &RawNode) -> Result<FunctionParameter> {
    let name = raw.required("name")?;
    let annotation = parse_annotation(raw.required("annotation")?)?.build(b);
    let default = match raw.children.as_slice() {
        [] => None,
        [child] => Some(make_expression(b, child)?),
        _ => return Err(raw.invalid("children", &Value::from(raw.children.len()))),
    };
    let mut parameter = b.parameter(name, annotation, default);
    if let (FunctionParameter::Parameter(p), Some(label)) = (&mut parameter, raw.optional("label")?) {
        p.external_name = Some(label.to_owned());
    }
    Ok(parameter)
}

fn make_expressions(b: &mut Builder, nodes: &[RawNode]) -> Result<Vec<Expression>> {
    nodes.iter().map(|n| make_expression(b, n)).collect()
}

pub fn make_expression(b: &mut Builder, raw: &RawNode) -> Result<Expression> {
    match raw.kind.as_str() {
        "IdentifierExpression" => Ok(b.reference(raw.required("name")?)),
        "MemberExpression" => {
            let name = raw.required("name")?;
            let expression = make_expression(b, raw.single_child()?)?;
            Ok(b.member(expression, name))
        }
        "FunctionCallExpression" => {
            let (callee, rest) = raw.children.split_first().ok_or_else(|| {
                Error::MissingAttribute {
                    node: raw.kind.clone(),
                    attribute: "children".to_owned(),
                }
            })?;
            let callee = make_expression(b, callee)?;
            let id = b.id();
            let mut arguments = Vec::new();
            for argument in rest {
                arguments.push(match argument.kind.as_str() {
                    "Argument" => FunctionCallArgument::Argument(Argument {
                        id: b.id(),
                        label: argument.optional("label")?.map(str::to_owned),
                        expression: make_expression(b, argument.single_child()?)?,
                    }),
                    "Placeholder" => FunctionCallArgument::Placeholder(b.marker()),
                    other => return Err(Error::UnknownNode(other.to_owned())),
                });
            }
            Ok(Expression::FunctionCall(FunctionCallExpression {
                id,
                expression: Box::new(callee),
                arguments,
            }))
        }
        "Literal" => {
            let annotation = raw.optional("annotation")?.map(parse_annotation).transpose()?;
            match (raw.attributes.get("value"), annotation.as_ref()) {
                (Some(value), _) => make_literal(b, raw, annotation.as_ref(), value),
                (None, Some(a)) if a.name == "Array" => {
                    let items = make_expressions(b, &raw.children)?;
                    Ok(b.array(items))
                }
                (None, _) => Ok(b.none()),
            }
        }
        "BinaryExpression" => {
            let op = raw.required("operator")?;
            let kind = operator_kind(op).ok_or_else(|| raw.invalid("operator", &Value::from(op)))?;
            match raw.children.as_slice() {
                [left, right] => {
                    let left = make_expression(b, left)?;
                    let right = make_expression(b, right)?;
                    Ok(b.binary(left, kind, right))
                }
                _ => Err(raw.invalid("children", &Value::from(raw.children.len()))),
            }
        }
        "Placeholder" => Ok(Expression::Placeholder(b.marker())),
        other => Err(Error::UnknownNode(other.to_owned())),
    }
}

fn operator_kind(s: &str) -> Option<OperatorKind> {
    let kind = match s {
        "isEqualTo" => OperatorKind::IsEqualTo,
        "isNotEqualTo" => OperatorKind::IsNotEqualTo,
        "isLessThan" => OperatorKind::IsLessThan,
        "isGreaterThan" => OperatorKind::IsGreaterThan,
        "isLessThanOrEqual" => OperatorKind::IsLessThanOrEqual,
        "isGreaterThanOrEqual" => OperatorKind::IsGreaterThanOrEqual,
        "setEqualTo" => OperatorKind::SetEqualTo,
        _ => return None,
    };
    Some(kind)
}

/// Builds a literal from a compact attribute value, guided by the declared
/// type when there is one.
fn make_literal(
    b: &mut Builder,
    raw: &RawNode,
    annotation: Option<&Annotation>,
    value: &Value,
) -> Result<Expression> {
    let invalid = || raw.invalid("value", value);
    let name = annotation.map(|a| a.name.as_str());
    match (name, value) {
        (Some("Boolean") | None, Value::Bool(v)) => Ok(b.boolean(*v)),
        (Some("Boolean"), Value::String(s)) => match s.as_str() {
            "true" => Ok(b.boolean(true)),
            "false" => Ok(b.boolean(false)),
            _ => Err(invalid()),
        },
        (Some("Number") | None, Value::Number(n)) => n.as_f64().map(|n| b.number(n)).ok_or_else(invalid),
        (Some("Number"), Value::String(s)) => {
            s.trim().parse::<f64>().map(|n| b.number(n)).map_err(|_| invalid())
        }
        (Some("String") | None, Value::String(s)) => Ok(b.string(s)),
        (Some("Color"), Value::String(s)) => Ok(b.color(s)),
        (Some("Optional"), Value::Null) | (None, Value::Null) => Ok(b.none()),
        _ => Err(invalid()),
    }
}

/// A parsed type annotation string such as `Array(Optional(Number))`.
#[derive(Clone, Debug, PartialEq)]
pub struct Annotation {
    pub name: String,
    pub arguments: Vec<Annotation>,
}

impl Annotation {
    pub fn build(&self, b: &mut Builder) -> TypeAnnotation {
        let generics = self.arguments.iter().map(|a| a.build(b)).collect();
        b.type_named(&self.name, generics)
    }
}

pub fn parse_annotation(s: &str) -> Result<Annotation> {
    let mut chars = s.chars().peekable();
    let annotation = parse_annotation_chars(s, &mut chars)?;
    match chars.next() {
        None => Ok(annotation),
        Some(_) => Err(Error::Annotation(s.to_owned())),
    }
}

/// Parses comma separated annotations, e.g. `Number, Array(String)`.
pub fn parse_annotation_list(s: &str) -> Result<Vec<Annotation>> {
    let mut chars = s.chars().peekable();
    let mut annotations = Vec::new();
    if s.trim().is_empty() {
        return Ok(annotations);
    }
    loop {
        annotations.push(parse_annotation_chars(s, &mut chars)?);
        match chars.next() {
            None => return Ok(annotations),
            Some(',') => continue,
            Some(_) => return Err(Error::Annotation(s.to_owned())),
        }
    }
}

fn parse_annotation_chars(
    source: &str,
    chars: &mut std::iter::Peekable<std::str::Chars>,
) -> Result<Annotation> {
    let malformed = || Error::Annotation(source.to_owned());
    while chars.next_if(|c| c.is_whitespace()).is_some() {}
    let mut name = String::new();
    while let Some(c) = chars.next_if(|c| c.is_alphanumeric() || *c == '_' || *c == '.') {
        name.push(c);
    }
    if name.is_empty() {
        return Err(malformed());
    }
    let mut arguments = Vec::new();
    if chars.next_if_eq(&'(').is_some() {
        loop {
            arguments.push(parse_annotation_chars(source, chars)?);
            while chars.next_if(|c| c.is_whitespace()).is_some() {}
            match chars.next() {
                Some(',') => continue,
                Some(')') => break,
                _ => return Err(malformed()),
            }
        }
    }
    while chars.next_if(|c| c.is_whitespace()).is_some() {}
    Ok(Annotation { name, arguments })
}

impl RawNode {
    fn new(kind: &str) -> Self {
        RawNode {
            kind: kind.to_owned(),
            children: vec![],
            attributes: IndexMap::new(),
        }
    }

    fn with(mut self, attribute: &str, value: impl Into<String>) -> Self {
        self.attributes
            .insert(attribute.to_owned(), Value::String(value.into()));
        self
    }

    fn with_children(mut self, children: Vec<RawNode>) -> Self {
        self.children = children;
        self
    }

    /// The attribute as text, as written in markup.
    pub fn text(&self, attribute: &str) -> Option<String> {
        match self.attributes.get(attribute)? {
            Value::String(s) => Some(s.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

/// The compact form of a document. Identifiers are dropped.
pub fn unmake(doc: &Document) -> Result<RawNode> {
    match doc {
        Document::Program(p) => Ok(RawNode::new("Program").with_children(unmake_block(&p.block)?)),
        Document::TopLevelDeclarations(t) => Ok(RawNode::new("Declarations")
            .with_children(t.declarations.iter().map(unmake_declaration).collect::<Result<_>>()?)),
    }
}

fn unmake_block(block: &[Statement]) -> Result<Vec<RawNode>> {
    block.iter().map(unmake_statement).collect()
}

fn unmake_statement(statement: &Statement) -> Result<RawNode> {
    Ok(match statement {
        Statement::Declaration(d) => unmake_declaration(&d.content)?,
        Statement::Branch(s) => {
            let mut children = vec![unmake_expression(&s.condition)?];
            children.extend(unmake_block(&s.block)?);
            RawNode::new("Branch").with_children(children)
        }
        Statement::Loop(s) => {
            let mut children = vec![unmake_expression(&s.expression)?];
            children.extend(unmake_block(&s.block)?);
            RawNode::new("Loop")
                .with("pattern", &s.pattern.name)
                .with_children(children)
        }
        Statement::Return(s) => {
            RawNode::new("Return").with_children(vec![unmake_expression(&s.expression)?])
        }
        Statement::Expression(s) => RawNode::new("ExpressionStatement")
            .with_children(vec![unmake_expression(&s.expression)?]),
        Statement::Placeholder(_) => RawNode::new("Placeholder"),
    })
}

fn generics_attribute(node: RawNode, generics: &[GenericParameter]) -> RawNode {
    let names: Vec<&str> = generics
        .iter()
        .filter_map(|g| match g {
            GenericParameter::Parameter(p) => Some(p.name.name.as_str()),
            GenericParameter::Placeholder(_) => None,
        })
        .collect();
    if names.is_empty() {
        node
    } else {
        node.with("generics", names.join(", "))
    }
}

fn unmake_declaration(declaration: &Declaration) -> Result<RawNode> {
    Ok(match declaration {
        Declaration::ImportDeclaration(d) => RawNode::new("ImportDeclaration").with("name", &d.name.name),
        Declaration::Variable(v) => {
            let mut node = RawNode::new("Variable").with("name", &v.name.name);
            let annotation = v.annotation.as_ref().map(annotation_string).transpose()?;
            if let Some(a) = &annotation {
                node = node.with("annotation", a);
            }
            let Some(initializer) = &v.initializer else {
                return Ok(node);
            };
            let literal = match initializer {
                Expression::Literal(l) => Some(&l.literal),
                _ => None,
            };
            match (annotation.as_deref(), literal) {
                (Some(a), Some(Literal::Array(items))) if a == "Array" || a.starts_with("Array(") => {
                    node.with_children(unmake_expressions(&items.value)?)
                }
                (Some(a), Some(literal)) if a == literal_type(literal) => match literal_text(literal) {
                    Some(text) => node.with("value", text),
                    None => node.with_children(vec![unmake_expression(initializer)?]),
                },
                _ => node.with_children(vec![unmake_expression(initializer)?]),
            }
        }
        Declaration::Function(f) => {
            let node = RawNode::new("Function")
                .with("name", &f.name.name)
                .with("returnType", annotation_string(&f.return_type)?);
            let mut children = Vec::new();
            for parameter in f.parameters.iter() {
                if let FunctionParameter::Parameter(p) = parameter {
                    let mut param = RawNode::new("Parameter")
                        .with("name", &p.local_name.name)
                        .with("annotation", annotation_string(&p.annotation)?);
                    if let Some(label) = &p.external_name {
                        param = param.with("label", label);
                    }
                    if let DefaultValue::Value(d) = &p.default_value {
                        param = param.with_children(vec![unmake_expression(&d.expression)?]);
                    }
                    children.push(param);
                }
            }
            children.extend(unmake_block(&f.block)?);
            generics_attribute(node, &f.generic_parameters).with_children(children)
        }
        Declaration::Namespace(n) => RawNode::new("Namespace")
            .with("name", &n.name.name)
            .with_children(n.declarations.iter().map(unmake_declaration).collect::<Result<_>>()?),
        Declaration::Record(r) => {
            let node = RawNode::new("Record").with("name", &r.name.name);
            generics_attribute(node, &r.generic_parameters)
                .with_children(r.declarations.iter().map(unmake_declaration).collect::<Result<_>>()?)
        }
        Declaration::Enumeration(e) => {
            let mut cases = Vec::new();
            for case in e.cases.iter() {
                cases.push(match case {
                    EnumerationCase::EnumerationCase(c) => {
                        let case = RawNode::new("Case").with("name", &c.name.name);
                        if c.associated_value_types.is_empty() {
                            case
                        } else {
                            let types = c
                                .associated_value_types
                                .iter()
                                .map(annotation_string)
                                .collect::<Result<Vec<_>>>()?;
                            case.with("associatedValueTypes", types.join(", "))
                        }
                    }
                    EnumerationCase::Placeholder(_) => RawNode::new("Placeholder"),
                });
            }
            let node = RawNode::new("Enumeration").with("name", &e.name.name);
            generics_attribute(node, &e.generic_parameters).with_children(cases)
        }
        Declaration::Placeholder(_) => RawNode::new("Placeholder"),
    })
}

fn unmake_expressions(expressions: &[Expression]) -> Result<Vec<RawNode>> {
    expressions.iter().map(unmake_expression).collect()
}

fn unmake_expression(expression: &Expression) -> Result<RawNode> {
    Ok(match expression {
        Expression::Identifier(e) => RawNode::new("IdentifierExpression").with("name", &e.identifier.string),
        Expression::Member(e) => RawNode::new("MemberExpression")
            .with("name", &e.member_name.string)
            .with_children(vec![unmake_expression(&e.expression)?]),
        Expression::FunctionCall(c) => {
            let mut children = vec![unmake_expression(&c.expression)?];
            for argument in c.arguments.iter() {
                children.push(match argument {
                    FunctionCallArgument::Argument(a) => {
                        let node = RawNode::new("Argument")
                            .with_children(vec![unmake_expression(&a.expression)?]);
                        match &a.label {
                            Some(label) => node.with("label", label),
                            None => node,
                        }
                    }
                    FunctionCallArgument::Placeholder(_) => RawNode::new("Placeholder"),
                });
            }
            RawNode::new("FunctionCallExpression").with_children(children)
        }
        Expression::Literal(l) => unmake_literal(&l.literal)?,
        Expression::Binary(e) => RawNode::new("BinaryExpression")
            .with("operator", operator_name(e.op.kind()))
            .with_children(vec![unmake_expression(&e.left)?, unmake_expression(&e.right)?]),
        Expression::Placeholder(_) => RawNode::new("Placeholder"),
    })
}

fn unmake_literal(literal: &Literal) -> Result<RawNode> {
    let mut node = RawNode::new("Literal").with("annotation", literal_type(literal));
    if let Some(text) = literal_text(literal) {
        node = node.with("value", text);
    }
    if let Literal::Array(a) = literal {
        node = node.with_children(unmake_expressions(&a.value)?);
    }
    Ok(node)
}

fn literal_type(literal: &Literal) -> &'static str {
    match literal {
        Literal::None(_) => "Optional",
        Literal::Boolean(_) => "Boolean",
        Literal::Number(_) => "Number",
        Literal::String(_) => "String",
        Literal::Color(_) => "Color",
        Literal::Array(_) => "Array",
    }
}

fn literal_text(literal: &Literal) -> Option<String> {
    match literal {
        Literal::Boolean(l) => Some(l.value.to_string()),
        Literal::Number(l) => Some(number_text(l.value)),
        Literal::String(l) => Some(l.value.clone()),
        Literal::Color(l) => Some(l.value.clone()),
        Literal::None(_) | Literal::Array(_) => None,
    }
}

fn number_text(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

fn operator_name(kind: OperatorKind) -> &'static str {
    match kind {
        OperatorKind::IsEqualTo => "isEqualTo",
        OperatorKind::IsNotEqualTo => "isNotEqualTo",
        OperatorKind::IsLessThan => "isLessThan",
        OperatorKind::IsGreaterThan => "isGreaterThan",
        OperatorKind::IsLessThanOrEqual => "isLessThanOrEqual",
        OperatorKind::IsGreaterThanOrEqual => "isGreaterThanOrEqual",
        OperatorKind::SetEqualTo => "setEqualTo",
    }
}

/// The compact string of a type annotation, e.g. `Array(Number)`.
pub fn annotation_string(annotation: &TypeAnnotation) -> Result<String> {
    match annotation {
        TypeAnnotation::TypeIdentifier(t) if t.generic_arguments.is_empty() => Ok(t.identifier.string.clone()),
        TypeAnnotation::TypeIdentifier(t) => {
            let arguments = t
                .generic_arguments
                .iter()
                .map(annotation_string)
                .collect::<Result<Vec<_>>>()?;
            Ok(format!("{}({})", t.identifier.string, arguments.join(", ")))
        }
        TypeAnnotation::FunctionType(_) => Err(Error::Annotation("function type".to_owned())),
        TypeAnnotation::Placeholder(_) => Err(Error::Annotation("placeholder".to_owned())),
    }
}
