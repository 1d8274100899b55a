use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

use super::check_identifier;
use super::types::Annotations;
use crate::error::BuildError;

fn is_false(b: &bool) -> bool {
    !*b
}

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
            HttpMethod::Patch => "PATCH",
        }
    }
}

impl Serialize for HttpMethod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A fully resolved HTTP resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resource {
    #[serde(rename = "type")]
    pub result_type: String,
    pub method: HttpMethod,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub inputs: Vec<ResourceInput>,
    pub expected: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub exceptions: IndexMap<String, ExceptionDef>,
    pub name: String,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub annotations: Annotations,
}

impl Resource {
    /// Check the resource's identifiers, returning it unchanged when valid.
    pub fn validated(self) -> Result<Self, BuildError> {
        let context = format!("{} {}", self.method.as_str(), self.path);
        if self.name.is_empty() {
            return Err(BuildError::InvalidIdentifier {
                name: String::new(),
                context,
            });
        }
        for input in &self.inputs {
            check_identifier(&input.name, &context)?;
        }
        Ok(self)
    }

    /// Names of the types this resource refers to.
    pub fn references(&self) -> Vec<&str> {
        std::iter::once(self.result_type.as_str())
            .chain(self.inputs.iter().map(|i| i.input_type.as_str()))
            .chain(self.exceptions.values().map(|e| e.exception_type.as_str()))
            .collect()
    }
}

/// A request input: path, query, header or body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceInput {
    pub name: String,
    #[serde(rename = "type")]
    pub input_type: String,
    #[serde(rename = "pathParam", skip_serializing_if = "is_false")]
    pub path_param: bool,
    #[serde(rename = "queryParam", skip_serializing_if = "Option::is_none")]
    pub query_param: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub optional: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// A status code whose payload type differs from the resource's result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExceptionDef {
    #[serde(rename = "type")]
    pub exception_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}
