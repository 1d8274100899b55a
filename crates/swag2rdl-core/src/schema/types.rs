use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use super::check_type_name;
use crate::error::BuildError;

/// Extension annotations (`x_*` key to string value), in attachment order.
pub type Annotations = IndexMap<String, String>;

fn is_false(b: &bool) -> bool {
    !*b
}

/// A named type in the schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TypeDef {
    #[serde(rename = "StructTypeDef")]
    Struct(StructTypeDef),
    #[serde(rename = "ArrayTypeDef")]
    Array(ArrayTypeDef),
    #[serde(rename = "EnumTypeDef")]
    Enum(EnumTypeDef),
    #[serde(rename = "StringTypeDef")]
    String(StringTypeDef),
    #[serde(rename = "NumberTypeDef")]
    Number(NumberTypeDef),
}

impl TypeDef {
    pub fn structure(def: StructTypeDef) -> Result<Self, BuildError> {
        check_type_name(&def.name)?;
        for field in &def.fields {
            if field.name.is_empty() {
                return Err(BuildError::InvalidIdentifier {
                    name: String::new(),
                    context: format!("fields of {}", def.name),
                });
            }
        }
        Ok(TypeDef::Struct(def))
    }

    pub fn array(def: ArrayTypeDef) -> Result<Self, BuildError> {
        check_type_name(&def.name)?;
        Ok(TypeDef::Array(def))
    }

    pub fn enumeration(def: EnumTypeDef) -> Result<Self, BuildError> {
        check_type_name(&def.name)?;
        if let Some(element) = def.elements.iter().find(|e| e.symbol.is_empty()) {
            return Err(BuildError::InvalidIdentifier {
                name: element.symbol.clone(),
                context: format!("symbols of {}", def.name),
            });
        }
        Ok(TypeDef::Enum(def))
    }

    pub fn string(def: StringTypeDef) -> Result<Self, BuildError> {
        check_type_name(&def.name)?;
        Ok(TypeDef::String(def))
    }

    pub fn number(def: NumberTypeDef) -> Result<Self, BuildError> {
        check_type_name(&def.name)?;
        Ok(TypeDef::Number(def))
    }

    pub fn name(&self) -> &str {
        match self {
            TypeDef::Struct(t) => &t.name,
            TypeDef::Array(t) => &t.name,
            TypeDef::Enum(t) => &t.name,
            TypeDef::String(t) => &t.name,
            TypeDef::Number(t) => &t.name,
        }
    }

    pub fn comment(&self) -> Option<&str> {
        match self {
            TypeDef::Struct(t) => t.comment.as_deref(),
            TypeDef::Array(t) => t.comment.as_deref(),
            TypeDef::Enum(t) => t.comment.as_deref(),
            TypeDef::String(t) => t.comment.as_deref(),
            TypeDef::Number(t) => t.comment.as_deref(),
        }
    }

    pub fn annotations(&self) -> &Annotations {
        match self {
            TypeDef::Struct(t) => &t.annotations,
            TypeDef::Array(t) => &t.annotations,
            TypeDef::Enum(t) => &t.annotations,
            TypeDef::String(t) => &t.annotations,
            TypeDef::Number(t) => &t.annotations,
        }
    }

    /// Short variant label, as shown by `inspect`.
    pub fn kind(&self) -> &'static str {
        match self {
            TypeDef::Struct(_) => "struct",
            TypeDef::Array(_) => "array",
            TypeDef::Enum(_) => "enum",
            TypeDef::String(_) => "string",
            TypeDef::Number(_) => "number",
        }
    }

    /// Names of the types this definition refers to.
    pub fn references(&self) -> Vec<&str> {
        match self {
            TypeDef::Struct(t) => t.fields.iter().map(|f| f.field_type.as_str()).collect(),
            TypeDef::Array(t) => t.items.as_deref().into_iter().collect(),
            TypeDef::Enum(_) | TypeDef::String(_) | TypeDef::Number(_) => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructTypeDef {
    #[serde(rename = "type")]
    pub supertype: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub annotations: Annotations,
    /// Always present, so that "no properties" stays distinguishable.
    pub fields: Vec<StructFieldDef>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructFieldDef {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(skip_serializing_if = "is_false")]
    pub optional: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub annotations: Annotations,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayTypeDef {
    #[serde(rename = "type")]
    pub supertype: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub annotations: Annotations,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumTypeDef {
    #[serde(rename = "type")]
    pub supertype: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub annotations: Annotations,
    pub elements: Vec<EnumElementDef>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumElementDef {
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StringTypeDef {
    #[serde(rename = "type")]
    pub supertype: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub annotations: Annotations,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(rename = "maxSize", skip_serializing_if = "Option::is_none")]
    pub max_size: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumberTypeDef {
    #[serde(rename = "type")]
    pub supertype: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub annotations: Annotations,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<Number>,
}

/// A numeric bound, tagged with its base type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Number {
    Int32(i32),
    Float64(f64),
}
