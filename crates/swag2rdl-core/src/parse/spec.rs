use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use super::fragment::{TypeFragment, lenient};
use super::operation::PathItem;
use super::parameter::Parameter;
use super::response::Response;

/// Info object describing the API.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Info {
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,

    /// Usually a string, but YAML documents often carry a bare number.
    #[serde(default)]
    pub version: Option<Value>,
}

impl Info {
    /// The version as a whole number, when it is one.
    pub fn numeric_version(&self) -> Option<i32> {
        match self.version.as_ref()? {
            Value::String(s) => s.trim().parse().ok(),
            Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
            _ => None,
        }
    }
}

/// Top-level Swagger 2.0 document.
///
/// Keyed sections are `BTreeMap`s so that every walk over them visits keys
/// in lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SwaggerDoc {
    #[serde(default)]
    pub swagger: Option<Value>,

    /// Only read to reject OpenAPI 3.x documents.
    #[serde(default)]
    pub openapi: Option<Value>,

    #[serde(default)]
    pub info: Info,

    #[serde(rename = "basePath", default, deserialize_with = "lenient")]
    pub base_path: Option<String>,

    /// Document-wide media types, used by operations that declare none.
    #[serde(default)]
    pub produces: Vec<String>,

    #[serde(default)]
    pub definitions: BTreeMap<String, TypeFragment>,

    #[serde(default)]
    pub parameters: BTreeMap<String, Parameter>,

    #[serde(default)]
    pub responses: BTreeMap<String, Response>,

    #[serde(default)]
    pub paths: BTreeMap<String, PathItem>,
}

impl SwaggerDoc {
    /// The `swagger` version field rendered as text.
    pub fn swagger_version(&self) -> Option<String> {
        match self.swagger.as_ref()? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}
