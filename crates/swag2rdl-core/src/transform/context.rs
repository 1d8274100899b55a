use std::collections::BTreeMap;

use log::warn;

use crate::error::TransformError;
use crate::parse::parameter::Parameter;
use crate::parse::response::Response;
use crate::parse::spec::SwaggerDoc;
use crate::schema::SchemaBuilder;

use super::convert::{Conversion, TransformOptions};
use super::diagnostics::Diagnostic;

/// Document-level sections that operations may refer to.
#[derive(Debug, Clone, Default)]
pub struct SharedComponents {
    pub parameters: BTreeMap<String, Parameter>,
    pub responses: BTreeMap<String, Response>,
    pub produces: Vec<String>,
}

impl SharedComponents {
    pub fn from_doc(doc: &SwaggerDoc) -> Self {
        Self {
            parameters: doc.parameters.clone(),
            responses: doc.responses.clone(),
            produces: doc.produces.clone(),
        }
    }
}

/// State shared by the type and resource materializers while one document
/// is imported: the schema being built and the diagnostics reported so far.
pub struct ImportContext<'a> {
    pub(super) builder: SchemaBuilder,
    pub(super) options: &'a TransformOptions,
    pub(super) shared: SharedComponents,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> ImportContext<'a> {
    pub fn new(builder: SchemaBuilder, options: &'a TransformOptions) -> Self {
        Self {
            builder,
            options,
            shared: SharedComponents::default(),
            diagnostics: Vec::new(),
        }
    }

    pub fn with_shared(mut self, shared: SharedComponents) -> Self {
        self.shared = shared;
        self
    }

    pub fn builder(&self) -> &SchemaBuilder {
        &self.builder
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub(super) fn report(&mut self, diagnostic: Diagnostic) {
        warn!("{diagnostic}");
        self.diagnostics.push(diagnostic);
    }

    /// Run the paranoid build over everything registered.
    pub fn finish(self) -> Result<Conversion, TransformError> {
        let schema = self.builder.build_paranoid()?;
        Ok(Conversion {
            schema,
            diagnostics: self.diagnostics,
        })
    }
}
