use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported Swagger version: {0}")]
    UnsupportedVersion(String),
}

/// Structural problems caught while constructing or finalizing the schema.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("invalid type name: {0:?}")]
    InvalidTypeName(String),

    #[error("invalid identifier {name:?} in {context}")]
    InvalidIdentifier { name: String, context: String },

    #[error("type {0} is defined more than once")]
    DuplicateType(String),

    #[error("type {0} shadows a built-in type")]
    ReservedTypeName(String),

    #[error("{context} references undefined type {name}")]
    UndefinedType { name: String, context: String },

    #[error("resource {method} {path} is defined more than once")]
    DuplicateResource { method: String, path: String },
}

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("schema build failed: {0}")]
    Build(#[from] BuildError),

    #[error("resource input '{name}' in '{method} {path}' has no corresponding type declaration")]
    UnboundPathParameter {
        name: String,
        method: String,
        path: String,
    },

    #[error("bad path template syntax: {path}")]
    MalformedPathTemplate { path: String },
}
