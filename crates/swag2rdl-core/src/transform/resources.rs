use std::collections::BTreeMap;

use indexmap::IndexMap;
use log::debug;

use crate::error::TransformError;
use crate::parse::operation::Operation;
use crate::parse::parameter::{Parameter, ParameterLocation, ParameterOrRef};
use crate::parse::response::{Response, ResponseOrRef};
use crate::schema::{Annotations, ExceptionDef, HttpMethod, Resource, ResourceInput};

use super::context::ImportContext;
use super::diagnostics::Diagnostic;
use super::naming::input_identifier;
use super::path_template::template_variables;
use super::type_names::resolve_type_name;

/// Placeholder type of a response or parameter that declares no type.
pub const UNTYPED: &str = "?";

const DEFAULT_RESPONSE: &str = "default";

/// Result type, alternative success codes and typed exceptions of an
/// operation.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseTyping {
    pub result_type: String,
    pub alternatives: Vec<String>,
    pub exceptions: IndexMap<String, ExceptionDef>,
}

impl ImportContext<'_> {
    /// Build the resource for one operation and register it.
    pub fn materialize_resource(
        &mut self,
        path: &str,
        method: HttpMethod,
        operation: &Operation,
        path_parameters: &[ParameterOrRef],
    ) -> Result<(), TransformError> {
        let resource = self.build_resource(path, method, operation, path_parameters)?;
        self.builder.add_resource(resource);
        Ok(())
    }

    /// Build the resource for one operation without registering it.
    pub fn build_resource(
        &mut self,
        path: &str,
        method: HttpMethod,
        operation: &Operation,
        path_parameters: &[ParameterOrRef],
    ) -> Result<Resource, TransformError> {
        let context = format!("{} {}", method.as_str(), path);

        let typing = self.classify_responses(&operation.responses, &context);
        self.check_media_types(method, path, operation);
        let inputs = self.build_inputs(path_parameters, &operation.parameters, &context);
        check_path_variables(path, method, &inputs)?;

        let default_name = format!("{}{}", method.as_str().to_lowercase(), typing.result_type);
        let name = operation
            .operation_id
            .clone()
            .filter(|id| !id.is_empty())
            .unwrap_or(default_name);

        let mut annotations = Annotations::new();
        if !operation.tags.is_empty() {
            annotations.insert("x_tags".to_string(), operation.tags.join(","));
        }

        let resource = Resource {
            result_type: typing.result_type,
            method,
            path: path.to_string(),
            comment: operation
                .summary
                .clone()
                .or_else(|| operation.description.clone()),
            inputs,
            expected: "OK".to_string(),
            alternatives: typing.alternatives,
            exceptions: typing.exceptions,
            name,
            annotations,
        };
        Ok(resource.validated()?)
    }

    /// Split responses into the result type, alternatives and exceptions.
    ///
    /// Without a typed `default` response the first typed status code in
    /// lexicographic order supplies the result type.
    pub fn classify_responses(
        &mut self,
        responses: &BTreeMap<String, ResponseOrRef>,
        context: &str,
    ) -> ResponseTyping {
        let mut result_type = None;
        let mut coded = Vec::new();
        for (code, response) in responses {
            let Some(response) = self.resolve_response(response, context) else {
                continue;
            };
            let type_name = resolve_type_name(response.schema.as_ref(), UNTYPED);
            if code == DEFAULT_RESPONSE {
                result_type = Some(type_name);
            } else {
                coded.push((code.clone(), type_name, response.description));
            }
        }

        let result_type = result_type
            .filter(|type_name| type_name != UNTYPED)
            .or_else(|| {
                coded
                    .iter()
                    .map(|(_, type_name, _)| type_name)
                    .find(|type_name| *type_name != UNTYPED)
                    .cloned()
            })
            .unwrap_or_else(|| UNTYPED.to_string());

        let mut alternatives = Vec::new();
        let mut exceptions = IndexMap::new();
        for (code, type_name, description) in coded {
            if type_name == result_type {
                alternatives.push(code);
            } else if type_name == UNTYPED {
                debug!("{context}: response {code} has no schema, not listed as an exception");
            } else {
                exceptions.insert(
                    code,
                    ExceptionDef {
                        exception_type: type_name,
                        comment: description,
                    },
                );
            }
        }

        ResponseTyping {
            result_type,
            alternatives,
            exceptions,
        }
    }

    fn resolve_response(&mut self, response: &ResponseOrRef, context: &str) -> Option<Response> {
        match response {
            ResponseOrRef::Response(response) => Some(response.clone()),
            ResponseOrRef::Ref { ref_path } => {
                let found = ResponseOrRef::shared_name(ref_path)
                    .and_then(|name| self.shared.responses.get(name))
                    .cloned();
                if found.is_none() {
                    self.report(Diagnostic::UnresolvedReference {
                        reference: ref_path.clone(),
                        context: context.to_string(),
                    });
                }
                found
            }
        }
    }

    fn resolve_parameter(&mut self, parameter: &ParameterOrRef, context: &str) -> Option<Parameter> {
        match parameter {
            ParameterOrRef::Parameter(parameter) => Some(parameter.clone()),
            ParameterOrRef::Ref { ref_path } => {
                let found = ParameterOrRef::shared_name(ref_path)
                    .and_then(|name| self.shared.parameters.get(name))
                    .cloned();
                if found.is_none() {
                    self.report(Diagnostic::UnresolvedReference {
                        reference: ref_path.clone(),
                        context: context.to_string(),
                    });
                }
                found
            }
        }
    }

    /// Resolve and merge path-level and operation parameters, then translate
    /// them into inputs. An operation parameter replaces a path-level one
    /// with the same name and location.
    fn build_inputs(
        &mut self,
        path_parameters: &[ParameterOrRef],
        operation_parameters: &[ParameterOrRef],
        context: &str,
    ) -> Vec<ResourceInput> {
        let mut merged: Vec<Parameter> = Vec::new();
        for parameter in path_parameters.iter().chain(operation_parameters) {
            let Some(parameter) = self.resolve_parameter(parameter, context) else {
                continue;
            };
            match merged
                .iter_mut()
                .find(|p| p.name == parameter.name && p.location == parameter.location)
            {
                Some(existing) => *existing = parameter,
                None => merged.push(parameter),
            }
        }
        merged
            .iter()
            .filter_map(|parameter| build_input(parameter, context))
            .collect()
    }

    fn check_media_types(&mut self, method: HttpMethod, path: &str, operation: &Operation) {
        let produces = operation
            .produces
            .as_deref()
            .unwrap_or(&self.shared.produces);
        let unexpected: Vec<String> = produces
            .iter()
            .filter(|media_type| !is_media_type(media_type, &self.options.json_media_type))
            .cloned()
            .collect();
        for media_type in unexpected {
            self.report(Diagnostic::NonJsonMediaType {
                method: method.as_str().to_string(),
                path: path.to_string(),
                media_type,
            });
        }
    }
}

/// Compare a media type ignoring parameters such as `charset`.
fn is_media_type(media_type: &str, expected: &str) -> bool {
    let essence = media_type.split(';').next().unwrap_or_default().trim();
    essence.eq_ignore_ascii_case(expected)
}

fn build_input(parameter: &Parameter, context: &str) -> Option<ResourceInput> {
    let (path_param, query_param, header) = match parameter.location() {
        ParameterLocation::Path => (true, None, None),
        ParameterLocation::Query => (false, Some(parameter.name.clone()), None),
        ParameterLocation::Header => (false, None, Some(parameter.name.clone())),
        ParameterLocation::Body => (false, None, None),
        ParameterLocation::Unsupported => {
            debug!(
                "{context}: dropping {} parameter {}",
                parameter.location, parameter.name
            );
            return None;
        }
    };
    let hint = parameter.kind.as_deref().unwrap_or(UNTYPED);
    Some(ResourceInput {
        name: input_identifier(&parameter.name),
        input_type: resolve_type_name(parameter.schema.as_ref(), hint),
        path_param,
        query_param,
        header,
        optional: !path_param && !parameter.is_required(),
        default: parameter.default.clone(),
        comment: parameter.description.clone(),
    })
}

/// Every template variable must name one of the inputs.
fn check_path_variables(
    path: &str,
    method: HttpMethod,
    inputs: &[ResourceInput],
) -> Result<(), TransformError> {
    for name in template_variables(path)? {
        if !inputs.iter().any(|input| input.name == name) {
            return Err(TransformError::UnboundPathParameter {
                name: name.to_string(),
                method: method.as_str().to_string(),
                path: path.to_string(),
            });
        }
    }
    Ok(())
}
