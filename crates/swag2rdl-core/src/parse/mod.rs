pub mod fragment;
pub mod operation;
pub mod parameter;
pub mod response;
pub mod spec;

use crate::error::ParseError;
use spec::SwaggerDoc;

/// Parse a Swagger document from YAML.
pub fn from_yaml(input: &str) -> Result<SwaggerDoc, ParseError> {
    let doc: SwaggerDoc = serde_yaml_ng::from_str(input)?;
    validate_version(&doc)?;
    Ok(doc)
}

/// Parse a Swagger document from JSON.
pub fn from_json(input: &str) -> Result<SwaggerDoc, ParseError> {
    let doc: SwaggerDoc = serde_json::from_str(input)?;
    validate_version(&doc)?;
    Ok(doc)
}

fn validate_version(doc: &SwaggerDoc) -> Result<(), ParseError> {
    if let Some(openapi) = &doc.openapi {
        return Err(ParseError::UnsupportedVersion(format!("openapi {openapi}")));
    }
    match doc.swagger_version() {
        Some(version) if version != "2.0" && version != "2" => {
            Err(ParseError::UnsupportedVersion(version))
        }
        _ => Ok(()),
    }
}
