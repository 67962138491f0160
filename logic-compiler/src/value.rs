use indexmap::IndexMap;
use logic_syntax::NodeId;
use std::fmt::{Display, Formatter};

/// A named record, e.g. a text style.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    pub name: String,
    pub fields: IndexMap<String, Value>,
}

/// A case of an enumeration with its associated values.
#[derive(Clone, Debug, PartialEq)]
pub struct EnumValue {
    pub name: String,
    pub case: String,
    pub data: Vec<Value>,
}

/// A reference to a function, record or enumeration case declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionValue {
    pub declaration: NodeId,
    /// The qualified path of the declaration, when hoisted.
    pub path: Vec<String>,
    /// Locals of the enclosing call at the point of declaration.
    pub captures: IndexMap<NodeId, Value>,
}

impl FunctionValue {
    pub fn new(declaration: NodeId, path: Vec<String>) -> Self {
        FunctionValue {
            declaration,
            path,
            captures: IndexMap::new(),
        }
    }
}

/// The result of evaluating an expression.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Unit,
    Boolean(bool),
    Number(f64),
    String(String),
    /// A color in CSS hex notation.
    Color(String),
    Array(Vec<Value>),
    Record(Record),
    Enum(EnumValue),
    Function(FunctionValue),
}

impl Value {
    pub fn is_unit(&self) -> bool {
        matches!(self, Value::Unit)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) | Value::Color(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }

    /// A field of a record value.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.as_record().and_then(|r| r.fields.get(name))
    }

    /// The name of the type of the value.
    pub fn type_name(&self) -> &str {
        match self {
            Value::Unit => "Unit",
            Value::Boolean(_) => "Boolean",
            Value::Number(_) => "Number",
            Value::String(_) => "String",
            Value::Color(_) => "Color",
            Value::Array(_) => "Array",
            Value::Record(r) => &r.name,
            Value::Enum(e) => &e.name,
            Value::Function(_) => "Function",
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Unit => f.write_str("()"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Color(c) => f.write_str(c),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Record(r) => {
                write!(f, "{}(", r.name)?;
                for (i, (name, value)) in r.fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name}: {value}")?;
                }
                f.write_str(")")
            }
            Value::Enum(e) => {
                write!(f, "{}.{}", e.name, e.case)?;
                if !e.data.is_empty() {
                    let data: Vec<String> = e.data.iter().map(Value::to_string).collect();
                    write!(f, "({})", data.join(", "))?;
                }
                Ok(())
            }
            Value::Function(func) => write!(f, "<function {}>", func.path.join(".")),
        }
    }
}
