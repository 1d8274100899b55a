pub mod context;
pub mod convert;
pub mod diagnostics;
pub mod naming;
pub mod path_template;
pub mod resources;
pub mod type_names;
pub mod types;

pub use context::{ImportContext, SharedComponents};
pub use convert::{Conversion, TransformOptions, convert, convert_with_options};
pub use diagnostics::Diagnostic;
