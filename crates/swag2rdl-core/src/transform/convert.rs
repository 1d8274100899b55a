use log::{debug, info};

use crate::error::TransformError;
use crate::parse::spec::SwaggerDoc;
use crate::schema::{Schema, SchemaBuilder};

use super::context::{ImportContext, SharedComponents};
use super::diagnostics::Diagnostic;
use super::naming::schema_name;

/// Type the importer never generates a definition for, by default.
pub const DEFAULT_RESERVED_TYPE: &str = "ResourceError";

pub const DEFAULT_JSON_MEDIA_TYPE: &str = "application/json";

/// Options controlling the import.
#[derive(Debug, Clone)]
pub struct TransformOptions {
    /// Schema name to use instead of the one derived from title or file name.
    pub name_override: Option<String>,
    /// Definition names that are skipped and may still be referenced.
    pub reserved_types: Vec<String>,
    /// Media type `produces` entries are expected to match.
    pub json_media_type: String,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            name_override: None,
            reserved_types: vec![DEFAULT_RESERVED_TYPE.to_string()],
            json_media_type: DEFAULT_JSON_MEDIA_TYPE.to_string(),
        }
    }
}

/// A finished import: the schema and everything reported along the way.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub schema: Schema,
    pub diagnostics: Vec<Diagnostic>,
}

/// Convert a parsed document with default options.
pub fn convert(doc: &SwaggerDoc, file_stem: &str) -> Result<Conversion, TransformError> {
    convert_with_options(doc, file_stem, &TransformOptions::default())
}

/// Convert a parsed document into a schema.
pub fn convert_with_options(
    doc: &SwaggerDoc,
    file_stem: &str,
    options: &TransformOptions,
) -> Result<Conversion, TransformError> {
    // Phase 1: Schema metadata
    let name = options
        .name_override
        .clone()
        .unwrap_or_else(|| schema_name(file_stem, doc.info.title.as_deref()));
    info!("importing schema {name}");

    let mut builder =
        SchemaBuilder::new(name).external_types(options.reserved_types.iter().cloned());
    if let Some(comment) = &doc.info.description {
        builder = builder.comment(comment.clone());
    }
    match doc.info.numeric_version() {
        Some(version) => builder = builder.version(version),
        None if doc.info.version.is_some() => debug!("ignoring non-numeric info.version"),
        None => {}
    }
    if let Some(base) = &doc.base_path {
        builder = builder.base(base.clone());
    }

    let mut ctx =
        ImportContext::new(builder, options).with_shared(SharedComponents::from_doc(doc));

    // Phase 2: Definitions, in name order
    for (name, fragment) in &doc.definitions {
        debug!("materializing type {name}");
        ctx.materialize_type(name, fragment, false)?;
    }

    // Phase 3: Operations, by path then verb
    for (path, item) in &doc.paths {
        for (method, operation) in item.operations() {
            debug!("materializing resource {} {path}", method.as_str());
            ctx.materialize_resource(path, method, operation, &item.parameters)?;
        }
    }

    // Phase 4: Paranoid build
    ctx.finish()
}
