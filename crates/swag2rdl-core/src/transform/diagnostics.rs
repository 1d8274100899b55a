use std::fmt;

/// A non-fatal report about a construct the importer could not express.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A definition whose kind is missing or has no RDL counterpart.
    UnsupportedType { name: String, kind: Option<String> },
    /// An `x-constraint` key with no meaning for the type's kind.
    UnknownConstraint { type_name: String, key: String },
    /// A struct property with no resolvable type; the field is dropped.
    UntypedField { type_name: String, field: String },
    /// A struct property with an empty name; the field is dropped.
    EmptyFieldName { type_name: String },
    /// A non-string `enum` value; the element is dropped.
    NonStringEnumValue { type_name: String, value: String },
    /// An operation producing something other than JSON.
    NonJsonMediaType {
        method: String,
        path: String,
        media_type: String,
    },
    /// A `$ref` to a shared parameter or response that does not exist.
    UnresolvedReference { reference: String, context: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnsupportedType { name, kind } => match kind {
                Some(kind) => write!(f, "unsupported top level type {name}: {kind}"),
                None => write!(f, "unsupported top level type {name}: no type"),
            },
            Diagnostic::UnknownConstraint { type_name, key } => {
                write!(f, "unknown constraint {key} on {type_name}")
            }
            Diagnostic::UntypedField { type_name, field } => {
                write!(f, "field {field} of {type_name} has no resolvable type")
            }
            Diagnostic::EmptyFieldName { type_name } => {
                write!(f, "{type_name} declares a property with an empty name")
            }
            Diagnostic::NonStringEnumValue { type_name, value } => {
                write!(f, "enum {type_name} has non-string value {value}")
            }
            Diagnostic::NonJsonMediaType {
                method,
                path,
                media_type,
            } => write!(f, "{method} {path} produces {media_type}, treated as JSON"),
            Diagnostic::UnresolvedReference { reference, context } => {
                write!(f, "unresolved reference {reference} in {context}")
            }
        }
    }
}
