//! The RDL schema model produced by the importer.

pub mod builder;
pub mod resources;
pub mod types;

use serde::Serialize;

use crate::error::BuildError;

pub use builder::SchemaBuilder;
pub use resources::{ExceptionDef, HttpMethod, Resource, ResourceInput};
pub use types::{
    Annotations, ArrayTypeDef, EnumElementDef, EnumTypeDef, Number, NumberTypeDef,
    StringTypeDef, StructFieldDef, StructTypeDef, TypeDef,
};

/// Type names every schema can reference without defining them.
pub const BUILTIN_TYPES: &[&str] = &[
    "Bool",
    "Int8",
    "Int16",
    "Int32",
    "Int64",
    "Float32",
    "Float64",
    "Bytes",
    "String",
    "Timestamp",
    "Symbol",
    "UUID",
    "Array",
    "Map",
    "Struct",
    "Enum",
    "Union",
    "Any",
];

pub fn is_builtin_type(name: &str) -> bool {
    BUILTIN_TYPES.contains(&name)
}

/// A finished, validated schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schema {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<TypeDef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<Resource>,
}

impl Schema {
    pub fn find_type(&self, name: &str) -> Option<&TypeDef> {
        self.types.iter().find(|t| t.name() == name)
    }

    /// Pretty-printed JSON using `indent` spaces per level.
    pub fn to_json_pretty(&self, indent: usize) -> Result<String, serde_json::Error> {
        let indent = " ".repeat(indent);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
        let mut out = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.serialize(&mut serializer)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

pub(crate) fn check_type_name(name: &str) -> Result<(), BuildError> {
    if is_identifier(name) {
        Ok(())
    } else {
        Err(BuildError::InvalidTypeName(name.to_string()))
    }
}

pub(crate) fn check_identifier(name: &str, context: &str) -> Result<(), BuildError> {
    if is_identifier(name) {
        Ok(())
    } else {
        Err(BuildError::InvalidIdentifier {
            name: name.to_string(),
            context: context.to_string(),
        })
    }
}
