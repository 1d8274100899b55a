use serde::Deserialize;

use super::fragment::{TypeFragment, lenient};

const RESPONSES_PREFIX: &str = "#/responses/";

/// A response definition.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Response {
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub schema: Option<TypeFragment>,
}

/// A reference or inline response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ResponseOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Response(Response),
}

impl ResponseOrRef {
    /// The shared response name of a local `#/responses/<Name>` reference.
    pub fn shared_name(ref_path: &str) -> Option<&str> {
        ref_path.strip_prefix(RESPONSES_PREFIX)
    }
}
