use logic_syntax::NodeId;
use std::fmt::{Debug, Display, Formatter};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Kind {
    #[error("malformed syntax")]
    MalformedSyntax,
    #[error("unresolved identifier")]
    UnresolvedIdentifier,
    #[error("unresolved member")]
    UnresolvedMember,
    #[error("type mismatch")]
    Unification,
    #[error("evaluation cycle")]
    EvaluationCycle,
    #[error("evaluation failed")]
    Evaluation,
    #[error("unsupported node")]
    UnsupportedNode,
    #[error("import failed")]
    ImportFailed,
    #[error("invalid target")]
    InvalidTarget,
}

/// A compilation error, fatal or reported as a diagnostic.
#[derive(Clone, Debug, PartialEq)]
pub struct Error {
    kind: Kind,
    msg: String,
    details: Vec<String>,
    node: Option<NodeId>,
}

impl Error {
    pub fn new(kind: Kind, msg: &str) -> Self {
        Error {
            kind,
            msg: msg.to_owned(),
            details: Vec::new(),
            node: None,
        }
    }

    pub fn with<T: Debug>(mut self, x: &T) -> Self {
        self.details.push(format!("{x:?}"));
        self
    }

    pub fn at(mut self, node: &NodeId) -> Self {
        self.node = Some(node.clone());
        self
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.msg
    }

    pub fn node(&self) -> Option<&NodeId> {
        self.node.as_ref()
    }

    pub fn details(&self) -> &[String] {
        &self.details
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.msg)?;
        if let Some(node) = &self.node {
            write!(f, " (at {node})")?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {}

impl From<logic_syntax::errors::Error> for Error {
    fn from(e: logic_syntax::errors::Error) -> Self {
        let err = Error::new(Kind::MalformedSyntax, &e.to_string());
        match std::error::Error::source(&e) {
            Some(source) => err.with(&source.to_string()),
            None => err,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
