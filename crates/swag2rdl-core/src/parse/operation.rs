use std::collections::BTreeMap;

use serde::Deserialize;

use super::fragment::lenient;
use super::parameter::ParameterOrRef;
use super::response::ResponseOrRef;
use crate::schema::HttpMethod;

/// An API operation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Operation {
    #[serde(rename = "operationId", default, deserialize_with = "lenient")]
    pub operation_id: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub summary: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    /// `None` means the document-level `produces` applies.
    #[serde(default, deserialize_with = "lenient")]
    pub produces: Option<Vec<String>>,

    #[serde(default)]
    pub parameters: Vec<ParameterOrRef>,

    #[serde(default)]
    pub responses: BTreeMap<String, ResponseOrRef>,
}

/// A path item, containing operations keyed by HTTP method.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct PathItem {
    /// Parameters shared by every operation on this path.
    #[serde(default)]
    pub parameters: Vec<ParameterOrRef>,

    #[serde(default)]
    pub get: Option<Operation>,
    #[serde(default)]
    pub put: Option<Operation>,
    #[serde(default)]
    pub post: Option<Operation>,
    #[serde(default)]
    pub delete: Option<Operation>,
    #[serde(default)]
    pub options: Option<Operation>,
    #[serde(default)]
    pub head: Option<Operation>,
    #[serde(default)]
    pub patch: Option<Operation>,
}

impl PathItem {
    /// The declared operations, in GET, PUT, POST, DELETE, OPTIONS, HEAD,
    /// PATCH order.
    pub fn operations(&self) -> impl Iterator<Item = (HttpMethod, &Operation)> {
        [
            (HttpMethod::Get, &self.get),
            (HttpMethod::Put, &self.put),
            (HttpMethod::Post, &self.post),
            (HttpMethod::Delete, &self.delete),
            (HttpMethod::Options, &self.options),
            (HttpMethod::Head, &self.head),
            (HttpMethod::Patch, &self.patch),
        ]
        .into_iter()
        .filter_map(|(method, op)| op.as_ref().map(|op| (method, op)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_operations_in_fixed_order() {
        let item: PathItem = serde_json::from_value(json!({
            "patch": {},
            "get": {},
            "delete": {},
            "post": {},
        }))
        .unwrap();
        let methods: Vec<HttpMethod> = item.operations().map(|(m, _)| m).collect();
        assert_eq!(
            methods,
            [
                HttpMethod::Get,
                HttpMethod::Post,
                HttpMethod::Delete,
                HttpMethod::Patch
            ]
        );
    }

    #[test]
    fn test_produces_absent_vs_empty() {
        let op: Operation = serde_json::from_value(json!({})).unwrap();
        assert_eq!(op.produces, None);
        let op: Operation = serde_json::from_value(json!({"produces": []})).unwrap();
        assert_eq!(op.produces, Some(vec![]));
    }
}
