use crate::parse::fragment::{SchemaKind, TypeFragment};

use super::naming::{camelize, canonical_type_name};

/// The name a use-site (array item, response, parameter) should reference
/// for `fragment`, falling back to `hint` when the fragment says nothing.
///
/// Resolution order: a local `#/definitions/` reference, then the explicit
/// `type`, then the hint. Never registers anything.
pub fn resolve_type_name(fragment: Option<&TypeFragment>, hint: &str) -> String {
    if let Some(fragment) = fragment {
        if let Some(name) = fragment.definition_ref() {
            return camelize(name);
        }
        if let Some(kind) = fragment.kind.as_deref() {
            return canonical_type_name(kind).to_string();
        }
    }
    canonical_type_name(&camelize(hint)).to_string()
}

/// A struct field's type, with the primitive kind it is built on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldType {
    pub name: String,
    /// `None` for references to other definitions.
    pub base: Option<SchemaKind>,
}

/// Resolve a struct field's type.
///
/// A local reference wins for the name; otherwise the explicit or inferred
/// kind supplies both name and base. Returns `None` when neither is known.
pub fn resolve_field_type(fragment: &TypeFragment) -> Option<FieldType> {
    let base = fragment.effective_kind();
    if let Some(name) = fragment.definition_ref() {
        return Some(FieldType {
            name: camelize(name),
            base: fragment.explicit_kind(),
        });
    }
    base.map(|kind| FieldType {
        name: kind.canonical_name().to_string(),
        base: Some(kind),
    })
}
