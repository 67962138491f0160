/// The syntax analysis error type.
///
/// Every variant is a malformed-syntax condition: the input cannot be turned
/// into a tree of known node kinds.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("unknown node kind `{0}`")]
    UnknownNode(String),
    #[error("missing attribute `{attribute}` on `{node}`")]
    MissingAttribute { node: String, attribute: String },
    #[error("invalid value for `{attribute}` on `{node}`: {value}")]
    InvalidAttribute {
        node: String,
        attribute: String,
        value: String,
    },
    #[error("malformed type annotation `{0}`")]
    Annotation(String),
    #[error("malformed component: {0}")]
    Component(String),
    #[error("malformed XML document: {0}")]
    Xml(String),
    #[error("malformed JSON document")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
