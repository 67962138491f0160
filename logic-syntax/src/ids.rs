use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// The stable identifier of a syntax node.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new<S: Into<String>>(s: S) -> Self {
        NodeId(s.into())
    }

    /// Derives a new identifier from an existing one, deterministically.
    pub fn derive(&self, suffix: &str) -> Self {
        NodeId(format!("{}-{}", self.0, suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        NodeId(s.to_owned())
    }
}

/// A source of node identifiers.
pub trait IdGenerator {
    fn next_id(&mut self) -> NodeId;
}

/// Random upper-case UUIDs, the default for authored documents.
#[derive(Debug, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> NodeId {
        NodeId(uuid::Uuid::new_v4().to_string().to_uppercase())
    }
}

/// Always the same identifier.
#[derive(Debug)]
pub struct ConstantIds(String);

impl ConstantIds {
    pub fn new<S: Into<String>>(s: S) -> Self {
        ConstantIds(s.into())
    }
}

impl IdGenerator for ConstantIds {
    fn next_id(&mut self) -> NodeId {
        NodeId(self.0.clone())
    }
}

/// Identifiers made of a prefix and an increasing counter.
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    next: usize,
}

impl SequentialIds {
    pub fn new<S: Into<String>>(prefix: S) -> Self {
        SequentialIds {
            prefix: prefix.into(),
            next: 0,
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> NodeId {
        let id = NodeId(format!("{}{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}
