use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::transform::TransformOptions;
use crate::transform::convert::{DEFAULT_JSON_MEDIA_TYPE, DEFAULT_RESERVED_TYPE};

/// Project configuration loaded from `.swag2rdl.yaml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    pub input: String,
    /// Output file. When unset, the schema goes to stdout.
    pub output: Option<String>,
    /// Schema name override.
    pub name: Option<String>,
    pub reserved_types: Vec<String>,
    pub json_media_type: String,
    /// Spaces per indentation level of the emitted JSON.
    pub indent: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            input: "swagger.json".to_string(),
            output: None,
            name: None,
            reserved_types: vec![DEFAULT_RESERVED_TYPE.to_string()],
            json_media_type: DEFAULT_JSON_MEDIA_TYPE.to_string(),
            indent: 4,
        }
    }
}

impl ImportConfig {
    pub fn transform_options(&self) -> TransformOptions {
        TransformOptions {
            name_override: self.name.clone(),
            reserved_types: self.reserved_types.clone(),
            json_media_type: self.json_media_type.clone(),
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".swag2rdl.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<ImportConfig>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
    let config: ImportConfig = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# swag2rdl configuration
input: swagger.json
# output: schema.json     # omit to write to stdout
# name: petstore          # schema name, defaults to the info.title or file name

reserved_types:
  - ResourceError         # never generated, may still be referenced

json_media_type: application/json
indent: 4
"#
}
