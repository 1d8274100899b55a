use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

const DEFINITIONS_PREFIX: &str = "#/definitions/";

/// Deserialize an optional field, treating a value of the wrong shape as absent.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// A JSON Schema primitive kind as used by Swagger 2.0 `type` keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    String,
    Integer,
    Number,
    Boolean,
    Object,
    Array,
}

impl SchemaKind {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "string" => Some(SchemaKind::String),
            "integer" => Some(SchemaKind::Integer),
            "number" => Some(SchemaKind::Number),
            "boolean" => Some(SchemaKind::Boolean),
            "object" => Some(SchemaKind::Object),
            "array" => Some(SchemaKind::Array),
            _ => None,
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            SchemaKind::String => "string",
            SchemaKind::Integer => "integer",
            SchemaKind::Number => "number",
            SchemaKind::Boolean => "boolean",
            SchemaKind::Object => "object",
            SchemaKind::Array => "array",
        }
    }

    /// The RDL base type this kind maps to.
    pub fn canonical_name(&self) -> &'static str {
        match self {
            SchemaKind::String => "String",
            SchemaKind::Integer => "Int32",
            SchemaKind::Number => "Float64",
            SchemaKind::Boolean => "Bool",
            SchemaKind::Object => "Struct",
            SchemaKind::Array => "Array",
        }
    }
}

/// A Swagger type definition, as found under `definitions`, `properties`,
/// `items`, parameter and response schemas.
///
/// Every key is optional and read leniently: a key holding a value of the
/// wrong JSON shape is treated the same as a missing key.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TypeFragment {
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub kind: Option<String>,

    #[serde(rename = "$ref", default, deserialize_with = "lenient")]
    pub reference: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub properties: Option<IndexMap<String, TypeFragment>>,

    #[serde(default, deserialize_with = "lenient")]
    pub items: Option<Box<TypeFragment>>,

    #[serde(default, deserialize_with = "lenient")]
    pub required: Option<Vec<String>>,

    #[serde(rename = "enum", default, deserialize_with = "lenient")]
    pub enum_values: Option<Vec<Value>>,

    #[serde(default, deserialize_with = "lenient")]
    pub pattern: Option<String>,

    // Constraint keys. Only their presence matters for most rules, so the
    // raw values are kept.
    #[serde(rename = "maxLength", default)]
    pub max_length: Option<Value>,
    #[serde(rename = "minLength", default)]
    pub min_length: Option<Value>,
    #[serde(default)]
    pub maximum: Option<Value>,
    #[serde(default)]
    pub minimum: Option<Value>,
    #[serde(rename = "minItems", default)]
    pub min_items: Option<Value>,
    #[serde(rename = "maxItems", default)]
    pub max_items: Option<Value>,

    #[serde(default)]
    pub example: Option<Value>,

    #[serde(default)]
    pub default: Option<Value>,

    #[serde(rename = "x-constraint", default, deserialize_with = "lenient")]
    pub x_constraint: Option<BTreeMap<String, Value>>,

    #[serde(rename = "x-format", default, deserialize_with = "lenient")]
    pub x_format: Option<BTreeMap<String, Value>>,
}

impl TypeFragment {
    /// The explicit `type` keyword, if it names a known kind.
    pub fn explicit_kind(&self) -> Option<SchemaKind> {
        self.kind.as_deref().and_then(SchemaKind::from_token)
    }

    /// The kind this fragment describes: the explicit `type`, or `object`
    /// when it declares properties, or `array` when it declares items.
    pub fn effective_kind(&self) -> Option<SchemaKind> {
        match self.kind.as_deref() {
            Some(token) => SchemaKind::from_token(token),
            None if self.properties.is_some() => Some(SchemaKind::Object),
            None if self.items.is_some() => Some(SchemaKind::Array),
            None => None,
        }
    }

    /// The definition name of a local `#/definitions/<Name>` reference.
    pub fn definition_ref(&self) -> Option<&str> {
        self.reference
            .as_deref()
            .and_then(|r| r.strip_prefix(DEFINITIONS_PREFIX))
    }

    pub fn is_required(&self, field: &str) -> bool {
        self.required
            .as_ref()
            .is_some_and(|names| names.iter().any(|n| n == field))
    }

    /// `maxLength` as a 32-bit size. Negative or non-numeric values are absent.
    pub fn max_length(&self) -> Option<i32> {
        let n = self.max_length.as_ref().and_then(value_as_i32)?;
        (n >= 0).then_some(n)
    }

    /// Whether an inline field with this fragment needs its own named type
    /// to carry its constraints.
    pub fn requires_type_def(&self) -> bool {
        self.pattern.is_some()
            || self.x_constraint.is_some()
            || self.x_format.is_some()
            || self.max_length.is_some()
            || self.maximum.is_some()
            || self.min_length.is_some()
            || self.minimum.is_some()
            || self.min_items.is_some()
            || self.max_items.is_some()
            || self.enum_values.is_some()
    }

    /// `x-constraint.positive` is literally `true`.
    pub fn is_positive(&self) -> bool {
        self.x_constraint
            .as_ref()
            .and_then(|c| c.get("positive"))
            .is_some_and(|v| *v == Value::Bool(true))
    }
}

fn value_as_i32(value: &Value) -> Option<i32> {
    let n = value.as_i64().or_else(|| value.as_f64().map(|f| f as i64))?;
    i32::try_from(n).ok()
}
