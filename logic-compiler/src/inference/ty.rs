use std::collections::HashMap;
use std::fmt::{Display, Formatter};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeArgument {
    pub label: Option<String>,
    pub ty: Type,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FunctionType {
    pub arguments: Vec<TypeArgument>,
    pub ret: Box<Type>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Type {
    Var(usize),
    /// A named type, e.g. `Number` or `Array<T>`.
    Constant { name: String, parameters: Vec<Type> },
    /// A generic parameter of a function declaration.
    Generic(String),
    Function(FunctionType),
}

impl Type {
    pub fn constant(name: &str) -> Type {
        Type::Constant {
            name: name.to_owned(),
            parameters: Vec::new(),
        }
    }

    pub fn unit() -> Type {
        Type::constant("Unit")
    }

    pub fn boolean() -> Type {
        Type::constant("Boolean")
    }

    pub fn number() -> Type {
        Type::constant("Number")
    }

    pub fn string() -> Type {
        Type::constant("String")
    }

    pub fn color() -> Type {
        Type::constant("Color")
    }

    pub fn array(element: Type) -> Type {
        Type::Constant {
            name: "Array".to_owned(),
            parameters: vec![element],
        }
    }

    pub fn optional(element: Type) -> Type {
        Type::Constant {
            name: "Optional".to_owned(),
            parameters: vec![element],
        }
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Type::Var(_))
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Type::Constant { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Whether the variable `v` occurs in the type.
    pub fn occurs(&self, v: usize) -> bool {
        match self {
            Type::Var(w) => *w == v,
            Type::Constant { parameters, .. } => parameters.iter().any(|p| p.occurs(v)),
            Type::Generic(_) => false,
            Type::Function(f) => f.ret.occurs(v) || f.arguments.iter().any(|a| a.ty.occurs(v)),
        }
    }

    /// Whether the type is free of type variables.
    pub fn is_ground(&self) -> bool {
        match self {
            Type::Var(_) => false,
            Type::Constant { parameters, .. } => parameters.iter().all(Type::is_ground),
            Type::Generic(_) => true,
            Type::Function(f) => f.ret.is_ground() && f.arguments.iter().all(|a| a.ty.is_ground()),
        }
    }

    /// Replaces generic parameters with fresh type variables, consistently
    /// within the type.
    pub fn instantiate(&self, seq: &mut Seq) -> Type {
        fn go(t: &Type, seq: &mut Seq, vars: &mut HashMap<String, Type>) -> Type {
            match t {
                Type::Generic(name) => vars.entry(name.clone()).or_insert_with(|| seq.fresh()).clone(),
                Type::Var(_) => t.clone(),
                Type::Constant { name, parameters } => Type::Constant {
                    name: name.clone(),
                    parameters: parameters.iter().map(|p| go(p, seq, vars)).collect(),
                },
                Type::Function(f) => Type::Function(FunctionType {
                    arguments: f
                        .arguments
                        .iter()
                        .map(|a| TypeArgument {
                            label: a.label.clone(),
                            ty: go(&a.ty, seq, vars),
                        })
                        .collect(),
                    ret: Box::new(go(&f.ret, seq, vars)),
                }),
            }
        }
        go(self, seq, &mut HashMap::new())
    }

    /// Replaces every type variable with the `Unit` type.
    pub fn ground(self) -> Type {
        match self {
            Type::Var(_) => Type::unit(),
            Type::Constant { name, parameters } => Type::Constant {
                name,
                parameters: parameters.into_iter().map(Type::ground).collect(),
            },
            Type::Generic(_) => self,
            Type::Function(f) => Type::Function(FunctionType {
                arguments: f
                    .arguments
                    .into_iter()
                    .map(|a| TypeArgument {
                        label: a.label,
                        ty: a.ty.ground(),
                    })
                    .collect(),
                ret: Box::new(f.ret.ground()),
            }),
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Var(v) => write!(f, "?{v}"),
            Type::Constant { name, parameters } if parameters.is_empty() => f.write_str(name),
            Type::Constant { name, parameters } => {
                write!(f, "{name}<")?;
                for (i, p) in parameters.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{p}")?;
                }
                f.write_str(">")
            }
            Type::Generic(name) => f.write_str(name),
            Type::Function(func) => {
                f.write_str("(")?;
                for (i, a) in func.arguments.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    if let Some(label) = &a.label {
                        write!(f, "{label}: ")?;
                    }
                    write!(f, "{}", a.ty)?;
                }
                write!(f, ") -> {}", func.ret)
            }
        }
    }
}

/// Allocates type variables.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Seq(usize);

impl Seq {
    pub fn new() -> Self {
        Seq(0)
    }

    pub fn next(&mut self) -> usize {
        let n = self.0;
        self.0 += 1;
        n
    }

    pub fn fresh(&mut self) -> Type {
        Type::Var(self.next())
    }

    pub fn len(&self) -> usize {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}
