use serde::Deserialize;
use serde_json::Value;

use super::fragment::{TypeFragment, lenient};

const PARAMETERS_PREFIX: &str = "#/parameters/";

/// Where a parameter is carried in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Body,
    /// `formData` and anything else the importer cannot express.
    Unsupported,
}

impl ParameterLocation {
    pub fn from_token(token: &str) -> Self {
        match token {
            "path" => ParameterLocation::Path,
            "query" => ParameterLocation::Query,
            "header" => ParameterLocation::Header,
            "body" => ParameterLocation::Body,
            _ => ParameterLocation::Unsupported,
        }
    }
}

/// An operation parameter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Parameter {
    pub name: String,

    #[serde(rename = "in")]
    pub location: String,

    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub required: Option<bool>,

    /// Simple type of non-body parameters.
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub kind: Option<String>,

    /// Schema of body parameters.
    #[serde(default, deserialize_with = "lenient")]
    pub schema: Option<TypeFragment>,

    #[serde(default)]
    pub default: Option<Value>,
}

impl Parameter {
    pub fn location(&self) -> ParameterLocation {
        ParameterLocation::from_token(&self.location)
    }

    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(false)
    }
}

/// A reference or inline parameter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ParameterOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Parameter(Parameter),
}

impl ParameterOrRef {
    /// The shared parameter name of a local `#/parameters/<Name>` reference.
    pub fn shared_name(ref_path: &str) -> Option<&str> {
        ref_path.strip_prefix(PARAMETERS_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_inline_and_ref() {
        let params: Vec<ParameterOrRef> = serde_json::from_value(json!([
            {"$ref": "#/parameters/limit"},
            {"name": "petId", "in": "path", "required": true, "type": "integer"},
        ]))
        .unwrap();
        assert!(matches!(&params[0], ParameterOrRef::Ref { ref_path } if ref_path == "#/parameters/limit"));
        match &params[1] {
            ParameterOrRef::Parameter(p) => {
                assert_eq!(p.location(), ParameterLocation::Path);
                assert!(p.is_required());
                assert_eq!(p.kind.as_deref(), Some("integer"));
            }
            _ => panic!("expected inline parameter"),
        }
    }

    #[test]
    fn test_location_tokens() {
        assert_eq!(ParameterLocation::from_token("query"), ParameterLocation::Query);
        assert_eq!(ParameterLocation::from_token("header"), ParameterLocation::Header);
        assert_eq!(ParameterLocation::from_token("body"), ParameterLocation::Body);
        assert_eq!(
            ParameterLocation::from_token("formData"),
            ParameterLocation::Unsupported
        );
    }

    #[test]
    fn test_shared_name() {
        assert_eq!(ParameterOrRef::shared_name("#/parameters/limit"), Some("limit"));
        assert_eq!(ParameterOrRef::shared_name("#/definitions/Pet"), None);
    }
}
