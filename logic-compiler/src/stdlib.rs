//! Built-in libraries and their intrinsic functions.

use crate::color::Rgba;
use crate::errors::{Error, Kind, Result};
use crate::module::Loader;
use crate::value::{Record, Value};
use indexmap::IndexMap;
use logic_syntax::ast::{Declaration, FunctionParameter, Program, TypeAnnotation};
use logic_syntax::builder::Builder;
use logic_syntax::ids::SequentialIds;
use std::fmt::Debug;

/// A function implemented natively rather than in Logic.
///
/// Arguments are bound to the declared parameters beforehand and passed in
/// declaration order, missing ones as `Unit`.
pub trait Intrinsic: Debug {
    fn eval(&self, args: &[(String, Value)]) -> Result<Value>;
}

fn arg<'a>(args: &'a [(String, Value)], index: usize) -> &'a Value {
    args.get(index).map(|(_, v)| v).unwrap_or(&Value::Unit)
}

fn bad_argument(name: &str, value: &Value) -> Error {
    Error::new(Kind::Evaluation, &format!("invalid argument to {name}")).with(value)
}

#[derive(Debug)]
struct Or;

impl Intrinsic for Or {
    fn eval(&self, args: &[(String, Value)]) -> Result<Value> {
        match (arg(args, 0).as_bool(), arg(args, 1).as_bool()) {
            (Some(a), Some(b)) => Ok(Value::Boolean(a || b)),
            _ => Err(bad_argument("Boolean.or", arg(args, 0))),
        }
    }
}

#[derive(Debug)]
struct And;

impl Intrinsic for And {
    fn eval(&self, args: &[(String, Value)]) -> Result<Value> {
        match (arg(args, 0).as_bool(), arg(args, 1).as_bool()) {
            (Some(a), Some(b)) => Ok(Value::Boolean(a && b)),
            _ => Err(bad_argument("Boolean.and", arg(args, 0))),
        }
    }
}

#[derive(Debug)]
struct Not;

impl Intrinsic for Not {
    fn eval(&self, args: &[(String, Value)]) -> Result<Value> {
        let value = arg(args, 0);
        value
            .as_bool()
            .map(|b| Value::Boolean(!b))
            .ok_or_else(|| bad_argument("Boolean.not", value))
    }
}

#[derive(Debug)]
struct Concat;

impl Intrinsic for Concat {
    fn eval(&self, args: &[(String, Value)]) -> Result<Value> {
        match (arg(args, 0), arg(args, 1)) {
            (Value::String(a), Value::String(b)) => Ok(Value::String(format!("{a}{b}"))),
            (a, _) => Err(bad_argument("String.concat", a)),
        }
    }
}

#[derive(Debug)]
struct At;

impl Intrinsic for At {
    fn eval(&self, args: &[(String, Value)]) -> Result<Value> {
        let (Value::Array(items), Some(index)) = (arg(args, 0), arg(args, 1).as_number()) else {
            return Err(bad_argument("Array.at", arg(args, 0)));
        };
        if index < 0.0 || index.fract() != 0.0 {
            return Err(bad_argument("Array.at", arg(args, 1)));
        }
        items
            .get(index as usize)
            .cloned()
            .ok_or_else(|| Error::new(Kind::Evaluation, "array index out of bounds").with(&index))
    }
}

#[derive(Debug)]
struct OptionalValue;

impl Intrinsic for OptionalValue {
    fn eval(&self, args: &[(String, Value)]) -> Result<Value> {
        match arg(args, 0) {
            Value::Unit => Ok(arg(args, 1).clone()),
            v => Ok(v.clone()),
        }
    }
}

#[derive(Debug)]
struct OptionalNone;

impl Intrinsic for OptionalNone {
    fn eval(&self, _args: &[(String, Value)]) -> Result<Value> {
        Ok(Value::Unit)
    }
}

#[derive(Debug)]
struct Saturate;

impl Intrinsic for Saturate {
    fn eval(&self, args: &[(String, Value)]) -> Result<Value> {
        let color = arg(args, 0);
        let rgba = color
            .as_str()
            .and_then(Rgba::parse)
            .ok_or_else(|| bad_argument("Color.saturate", color))?;
        let factor = arg(args, 1)
            .as_number()
            .ok_or_else(|| bad_argument("Color.saturate", arg(args, 1)))?;
        Ok(Value::Color(rgba.saturate(factor).to_hex()))
    }
}

/// Builds a record from the arguments that were given.
#[derive(Debug)]
struct Constructor(&'static str);

impl Intrinsic for Constructor {
    fn eval(&self, args: &[(String, Value)]) -> Result<Value> {
        let fields = args
            .iter()
            .filter(|(_, v)| !v.is_unit())
            .map(|(label, v)| (label.clone(), v.clone()))
            .collect();
        Ok(Value::Record(Record {
            name: self.0.to_owned(),
            fields,
        }))
    }
}

/// Intrinsic functions by qualified declaration path.
#[derive(Debug, Default)]
pub struct Intrinsics {
    table: IndexMap<Vec<String>, Box<dyn Intrinsic>>,
}

impl Intrinsics {
    pub fn new() -> Self {
        Default::default()
    }

    /// The intrinsics backing the built-in libraries.
    pub fn standard() -> Self {
        let mut intrinsics = Intrinsics::new();
        intrinsics.register(&["Boolean", "or"], Box::new(Or));
        intrinsics.register(&["Boolean", "and"], Box::new(And));
        intrinsics.register(&["Boolean", "not"], Box::new(Not));
        intrinsics.register(&["String", "concat"], Box::new(Concat));
        intrinsics.register(&["Array", "at"], Box::new(At));
        intrinsics.register(&["Optional", "value"], Box::new(OptionalValue));
        intrinsics.register(&["Optional", "none"], Box::new(OptionalNone));
        intrinsics.register(&["Color", "saturate"], Box::new(Saturate));
        intrinsics.register(&["TextStyle"], Box::new(Constructor("TextStyle")));
        intrinsics.register(&["Shadow"], Box::new(Constructor("Shadow")));
        intrinsics
    }

    pub fn register(&mut self, path: &[&str], intrinsic: Box<dyn Intrinsic>) {
        let path = path.iter().map(|s| (*s).to_owned()).collect();
        self.table.insert(path, intrinsic);
    }

    pub fn get(&self, path: &[String]) -> Option<&dyn Intrinsic> {
        self.table.get(path).map(Box::as_ref)
    }

    pub fn contains(&self, path: &[String]) -> bool {
        self.table.contains_key(path)
    }
}

/// Names of the built-in libraries, in the order `Prelude` imports them.
pub const LIBRARIES: [&str; 8] = [
    "Boolean",
    "String",
    "Array",
    "Optional",
    "Color",
    "FontWeight",
    "TextStyle",
    "Shadow",
];

const FONT_WEIGHTS: [(&str, &str); 9] = [
    ("ultraLight", "100"),
    ("thin", "200"),
    ("light", "300"),
    ("regular", "400"),
    ("medium", "500"),
    ("semibold", "600"),
    ("bold", "700"),
    ("heavy", "800"),
    ("black", "900"),
];

/// Serves the built-in libraries.
///
/// Identifiers are sequential and prefixed by the library name, so loading
/// a library twice yields identical programs.
#[derive(Debug, Default)]
pub struct BuiltinLoader;

impl BuiltinLoader {
    pub fn library(name: &str) -> Option<Program> {
        let mut ids = SequentialIds::new(format!("{name}-"));
        let mut b = Builder::new(&mut ids);
        let declarations: Vec<Declaration> = match name {
            "Prelude" => LIBRARIES.iter().map(|l| b.import(l)).collect(),
            "Boolean" => {
                let or = binary_function(&mut b, "or", "Boolean", "Boolean");
                let and = binary_function(&mut b, "and", "Boolean", "Boolean");
                let value = param(&mut b, "value", "Boolean");
                let ret = b.type_named("Boolean", vec![]);
                let not = b.function("not", &[], vec![value], ret, vec![]);
                vec![b.namespace("Boolean", vec![or, and, not])]
            }
            "String" => {
                let concat = binary_function(&mut b, "concat", "String", "String");
                vec![b.namespace("String", vec![concat])]
            }
            "Array" => {
                let t = b.type_named("T", vec![]);
                let array_type = b.type_named("Array", vec![t]);
                let array = b.parameter("array", array_type, None);
                let index = param(&mut b, "index", "Number");
                let ret = b.type_named("T", vec![]);
                let at = b.function("at", &["T"], vec![array, index], ret, vec![]);
                vec![b.namespace("Array", vec![at])]
            }
            "Optional" => {
                let t = b.type_named("T", vec![]);
                let optional_type = b.type_named("Optional", vec![t]);
                let optional = b.parameter("optional", optional_type, None);
                let default = param(&mut b, "default", "T");
                let ret = b.type_named("T", vec![]);
                let value = b.function("value", &["T"], vec![optional, default], ret, vec![]);
                let t = b.type_named("T", vec![]);
                let ret = b.type_named("Optional", vec![t]);
                let none = b.function("none", &["T"], vec![], ret, vec![]);
                vec![b.namespace("Optional", vec![value, none])]
            }
            "Color" => {
                let color = param(&mut b, "color", "Color");
                let factor = param(&mut b, "factor", "Number");
                let ret = b.type_named("Color", vec![]);
                let saturate = b.function("saturate", &[], vec![color, factor], ret, vec![]);
                vec![b.namespace("Color", vec![saturate])]
            }
            "FontWeight" => {
                let weights = FONT_WEIGHTS
                    .iter()
                    .map(|(name, weight)| {
                        let ann = b.type_named("String", vec![]);
                        let init = b.string(weight);
                        b.variable(name, Some(ann), Some(init))
                    })
                    .collect();
                vec![b.namespace("FontWeight", weights)]
            }
            "TextStyle" => {
                let params = [
                    ("fontFamily", "String"),
                    ("fontWeight", "String"),
                    ("fontSize", "Number"),
                    ("lineHeight", "Number"),
                    ("letterSpacing", "Number"),
                    ("color", "Color"),
                ]
                .iter()
                .map(|(name, ty)| param(&mut b, name, ty))
                .collect();
                let ret = b.type_named("TextStyle", vec![]);
                vec![b.function("TextStyle", &[], params, ret, vec![])]
            }
            "Shadow" => {
                let params = [
                    ("x", "Number"),
                    ("y", "Number"),
                    ("blur", "Number"),
                    ("radius", "Number"),
                    ("color", "Color"),
                ]
                .iter()
                .map(|(name, ty)| param(&mut b, name, ty))
                .collect();
                let ret = b.type_named("Shadow", vec![]);
                vec![b.function("Shadow", &[], params, ret, vec![])]
            }
            _ => return None,
        };
        Some(b.program_of(declarations))
    }
}

fn param(b: &mut Builder, name: &str, ty: &str) -> FunctionParameter {
    let ann: TypeAnnotation = b.type_named(ty, vec![]);
    b.parameter(name, ann, None)
}

fn binary_function(b: &mut Builder, name: &str, operand: &str, ret: &str) -> Declaration {
    let left = param(b, "left", operand);
    let right = param(b, "right", operand);
    let ret = b.type_named(ret, vec![]);
    b.function(name, &[], vec![left, right], ret, vec![])
}

impl Loader for BuiltinLoader {
    fn load(&mut self, name: &str) -> Result<Option<Program>> {
        Ok(BuiltinLoader::library(name))
    }
}
