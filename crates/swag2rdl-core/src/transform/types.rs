use std::collections::BTreeMap;

use log::debug;
use serde_json::Value;

use crate::error::{BuildError, TransformError};
use crate::parse::fragment::{SchemaKind, TypeFragment};
use crate::schema::{
    Annotations, ArrayTypeDef, EnumElementDef, EnumTypeDef, Number, NumberTypeDef,
    StringTypeDef, StructFieldDef, StructTypeDef, TypeDef,
};

use super::context::ImportContext;
use super::diagnostics::Diagnostic;
use super::naming::{camelize, capitalize, input_identifier};
use super::type_names::{resolve_field_type, resolve_type_name};

/// Render an annotation value: strings verbatim, other values as compact
/// JSON. `null` renders to nothing.
pub fn annotation_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn annotate(annotations: &mut Annotations, key: impl Into<String>, value: Option<&Value>) {
    if let Some(rendered) = value.and_then(annotation_value) {
        annotations.insert(key.into(), rendered);
    }
}

fn annotate_each(
    annotations: &mut Annotations,
    prefix: &str,
    entries: Option<&BTreeMap<String, Value>>,
) {
    for (key, value) in entries.into_iter().flatten() {
        annotate(annotations, format!("{prefix}{key}"), Some(value));
    }
}

impl ImportContext<'_> {
    /// Materialize a definition into a named schema type and register it.
    ///
    /// Returns the registered name, or `None` when the definition is
    /// reserved or cannot be expressed. `nested` marks a type synthesized for
    /// a constrained struct field: such types carry no type-level comment or
    /// example, since both stay on the field.
    pub fn materialize_type(
        &mut self,
        name: &str,
        fragment: &TypeFragment,
        nested: bool,
    ) -> Result<Option<String>, TransformError> {
        self.materialize(name, fragment, nested, None)
    }

    fn materialize(
        &mut self,
        name: &str,
        fragment: &TypeFragment,
        nested: bool,
        base: Option<SchemaKind>,
    ) -> Result<Option<String>, TransformError> {
        if self.options.reserved_types.iter().any(|r| r == name) {
            debug!("skipping reserved type {name}");
            return Ok(None);
        }
        let name = camelize(name);

        let kind = if fragment.kind.is_some() {
            fragment.explicit_kind()
        } else {
            fragment.effective_kind().or(base)
        };
        let Some(kind) = kind else {
            self.report(Diagnostic::UnsupportedType {
                name,
                kind: fragment.kind.clone(),
            });
            return Ok(None);
        };

        let comment = if nested {
            None
        } else {
            fragment.description.clone()
        };
        let example = if nested {
            None
        } else {
            fragment.example.as_ref()
        };

        let def = match kind {
            SchemaKind::Object => self.struct_type(&name, fragment, example)?,
            SchemaKind::Array => array_type(&name, fragment, comment, example)?,
            SchemaKind::String if fragment.enum_values.is_some() => {
                self.enum_type(&name, fragment, comment)?
            }
            SchemaKind::String => string_type(&name, fragment, comment, example)?,
            SchemaKind::Integer | SchemaKind::Number => {
                self.number_type(&name, kind, fragment, comment, example)?
            }
            SchemaKind::Boolean => {
                self.report(Diagnostic::UnsupportedType {
                    name,
                    kind: Some(kind.token().to_string()),
                });
                return Ok(None);
            }
        };
        self.builder.add_type(def);
        Ok(Some(name))
    }

    fn struct_type(
        &mut self,
        name: &str,
        fragment: &TypeFragment,
        example: Option<&Value>,
    ) -> Result<TypeDef, TransformError> {
        let mut fields = Vec::new();
        for (field_name, field) in fragment.properties.iter().flatten() {
            if field_name.is_empty() {
                self.report(Diagnostic::EmptyFieldName {
                    type_name: name.to_string(),
                });
                continue;
            }
            let Some(resolved) = resolve_field_type(field) else {
                self.report(Diagnostic::UntypedField {
                    type_name: name.to_string(),
                    field: field_name.clone(),
                });
                continue;
            };

            // Constraints cannot sit on a field reference, so the field gets
            // a type of its own, registered before this struct.
            let mut field_type = resolved.name;
            if field.requires_type_def() {
                let synthesized = format!("{name}_{}", capitalize(&input_identifier(field_name)));
                if let Some(registered) =
                    self.materialize(&synthesized, field, true, resolved.base)?
                {
                    field_type = registered;
                }
            }

            let mut annotations = Annotations::new();
            annotate(&mut annotations, "x_example", field.example.as_ref());
            fields.push(StructFieldDef {
                name: field_name.clone(),
                field_type,
                optional: !fragment.is_required(field_name),
                default: field.default.clone(),
                comment: field.description.clone(),
                annotations,
            });
        }

        let mut annotations = Annotations::new();
        annotate(&mut annotations, "x_example", example);
        Ok(TypeDef::structure(StructTypeDef {
            supertype: "Struct".to_string(),
            name: name.to_string(),
            comment: fragment.description.clone(),
            annotations,
            fields,
        })?)
    }

    fn enum_type(
        &mut self,
        name: &str,
        fragment: &TypeFragment,
        comment: Option<String>,
    ) -> Result<TypeDef, BuildError> {
        let mut elements = Vec::new();
        for value in fragment.enum_values.iter().flatten() {
            match value.as_str() {
                Some(symbol) => elements.push(EnumElementDef {
                    symbol: symbol.to_string(),
                    comment: None,
                }),
                None => self.report(Diagnostic::NonStringEnumValue {
                    type_name: name.to_string(),
                    value: value.to_string(),
                }),
            }
        }
        TypeDef::enumeration(EnumTypeDef {
            supertype: "Enum".to_string(),
            name: name.to_string(),
            comment,
            annotations: Annotations::new(),
            elements,
        })
    }

    fn number_type(
        &mut self,
        name: &str,
        kind: SchemaKind,
        fragment: &TypeFragment,
        comment: Option<String>,
        example: Option<&Value>,
    ) -> Result<TypeDef, BuildError> {
        let positive = fragment.is_positive();
        let (supertype, min) = match kind {
            SchemaKind::Integer => ("Int32", positive.then_some(Number::Int32(0))),
            _ => {
                for key in fragment.x_constraint.iter().flat_map(|c| c.keys()) {
                    if key != "positive" {
                        self.report(Diagnostic::UnknownConstraint {
                            type_name: name.to_string(),
                            key: key.clone(),
                        });
                    }
                }
                ("Float64", positive.then_some(Number::Float64(0.0)))
            }
        };

        let mut annotations = Annotations::new();
        annotate(&mut annotations, "x_example", example);
        TypeDef::number(NumberTypeDef {
            supertype: supertype.to_string(),
            name: name.to_string(),
            comment,
            annotations,
            min,
        })
    }
}

fn array_type(
    name: &str,
    fragment: &TypeFragment,
    comment: Option<String>,
    example: Option<&Value>,
) -> Result<TypeDef, BuildError> {
    let items = fragment
        .items
        .as_deref()
        .map(|items| resolve_type_name(Some(items), "Any"));

    let mut annotations = Annotations::new();
    annotate(&mut annotations, "x_minItems", fragment.min_items.as_ref());
    annotate(&mut annotations, "x_example", example);
    annotate_each(
        &mut annotations,
        "x_constraint_",
        fragment.x_constraint.as_ref(),
    );

    TypeDef::array(ArrayTypeDef {
        supertype: "Array".to_string(),
        name: name.to_string(),
        comment,
        annotations,
        items,
    })
}

fn string_type(
    name: &str,
    fragment: &TypeFragment,
    comment: Option<String>,
    example: Option<&Value>,
) -> Result<TypeDef, BuildError> {
    let mut annotations = Annotations::new();
    annotate(&mut annotations, "x_example", example);
    annotate_each(&mut annotations, "x_format_", fragment.x_format.as_ref());
    annotate_each(
        &mut annotations,
        "x_constraint_",
        fragment.x_constraint.as_ref(),
    );

    TypeDef::string(StringTypeDef {
        supertype: "String".to_string(),
        name: name.to_string(),
        comment,
        annotations,
        pattern: fragment.pattern.clone(),
        max_size: fragment.max_length(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaBuilder;
    use crate::transform::TransformOptions;
    use serde_json::json;

    fn materialize(definitions: Value) -> (Vec<TypeDef>, Vec<Diagnostic>) {
        let options = TransformOptions::default();
        let mut ctx = ImportContext::new(SchemaBuilder::new("test"), &options);
        let definitions: BTreeMap<String, TypeFragment> =
            serde_json::from_value(definitions).unwrap();
        for (name, fragment) in &definitions {
            ctx.materialize_type(name, fragment, false).unwrap();
        }
        (ctx.builder().types().to_vec(), ctx.diagnostics().to_vec())
    }

    fn names(types: &[TypeDef]) -> Vec<&str> {
        types.iter().map(|t| t.name()).collect()
    }

    fn as_struct(def: &TypeDef) -> &StructTypeDef {
        match def {
            TypeDef::Struct(s) => s,
            other => panic!("expected struct, got {other:?}"),
        }
    }

    #[test]
    fn test_pet_with_constrained_name() {
        let (types, diagnostics) = materialize(json!({
            "Pet": {
                "type": "object",
                "required": ["id"],
                "properties": {
                    "id": {"type": "integer"},
                    "name": {"type": "string", "maxLength": 30},
                },
            },
        }));
        assert!(diagnostics.is_empty());
        assert_eq!(names(&types), ["Pet_Name", "Pet"]);

        match &types[0] {
            TypeDef::String(s) => assert_eq!(s.max_size, Some(30)),
            other => panic!("expected string, got {other:?}"),
        }
        let pet = as_struct(&types[1]);
        assert_eq!(pet.fields[0].name, "id");
        assert_eq!(pet.fields[0].field_type, "Int32");
        assert!(!pet.fields[0].optional);
        assert_eq!(pet.fields[1].name, "name");
        assert_eq!(pet.fields[1].field_type, "Pet_Name");
        assert!(pet.fields[1].optional);
    }

    #[test]
    fn test_punctuated_field_name_synthesizes_identifier() {
        let (types, diagnostics) = materialize(json!({
            "Pet": {
                "type": "object",
                "properties": {
                    "first-name": {"type": "string", "pattern": "^[A-Z]"},
                    "tag.code": {"type": "integer", "minimum": 1},
                },
            },
        }));
        assert!(diagnostics.is_empty());
        assert_eq!(names(&types), ["Pet_First_name", "Pet_Tag_code", "Pet"]);
        let pet = as_struct(&types[2]);
        assert_eq!(pet.fields[0].name, "first-name");
        assert_eq!(pet.fields[0].field_type, "Pet_First_name");
        assert_eq!(pet.fields[1].field_type, "Pet_Tag_code");
    }

    #[test]
    fn test_plain_fields_register_nothing_extra() {
        let (types, _) = materialize(json!({
            "Order": {
                "type": "object",
                "properties": {
                    "petId": {"type": "integer", "description": "the pet"},
                    "complete": {"type": "boolean", "default": false},
                    "pet": {"$ref": "#/definitions/Pet"},
                    "tags": {"type": "array", "items": {"type": "string"}},
                },
            },
        }));
        assert_eq!(names(&types), ["Order"]);
        let order = as_struct(&types[0]);
        let field_types: Vec<&str> = order.fields.iter().map(|f| f.field_type.as_str()).collect();
        assert_eq!(field_types, ["Int32", "Bool", "Pet", "Array"]);
        assert_eq!(order.fields[0].comment.as_deref(), Some("the pet"));
        assert_eq!(order.fields[1].default, Some(json!(false)));
    }

    #[test]
    fn test_every_constraint_key_synthesizes_a_type() {
        let cases = [
            ("pattern", json!({"type": "string", "pattern": "^[a-z]+$"})),
            ("x-constraint", json!({"type": "integer", "x-constraint": {"positive": true}})),
            ("x-format", json!({"type": "string", "x-format": {"case": "lower"}})),
            ("maxLength", json!({"type": "string", "maxLength": 10})),
            ("maximum", json!({"type": "integer", "maximum": 10})),
            ("minLength", json!({"type": "string", "minLength": 1})),
            ("minimum", json!({"type": "number", "minimum": 0})),
            ("minItems", json!({"type": "array", "items": {"type": "string"}, "minItems": 1})),
            ("maxItems", json!({"type": "array", "items": {"type": "string"}, "maxItems": 5})),
            ("enum", json!({"type": "string", "enum": ["a", "b"]})),
        ];
        for (key, field) in cases {
            let (types, _) = materialize(json!({
                "Thing": {"type": "object", "properties": {"value": field}},
            }));
            assert_eq!(names(&types), ["Thing_Value", "Thing"], "constraint {key}");
            assert_eq!(as_struct(&types[1]).fields[0].field_type, "Thing_Value");
        }
    }

    #[test]
    fn test_enum_field() {
        let (types, _) = materialize(json!({
            "Pet": {
                "properties": {
                    "status": {
                        "type": "string",
                        "description": "pet status in the store",
                        "enum": ["available", "pending", "sold"],
                    },
                },
            },
        }));
        match &types[0] {
            TypeDef::Enum(e) => {
                assert_eq!(e.name, "Pet_Status");
                assert_eq!(e.comment, None);
                let symbols: Vec<&str> = e.elements.iter().map(|el| el.symbol.as_str()).collect();
                assert_eq!(symbols, ["available", "pending", "sold"]);
            }
            other => panic!("expected enum, got {other:?}"),
        }
        let pet = as_struct(&types[1]);
        assert_eq!(pet.fields[0].comment.as_deref(), Some("pet status in the store"));
    }

    #[test]
    fn test_examples() {
        let (types, _) = materialize(json!({
            "Pet": {
                "type": "object",
                "example": {"name": "doggie"},
                "properties": {
                    "name": {"type": "string", "example": "doggie", "pattern": "^[a-z]+$"},
                    "age": {"type": "integer", "example": 3},
                },
            },
        }));
        assert_eq!(names(&types), ["Pet_Name", "Pet"]);
        assert!(types[0].annotations().is_empty(), "nested type keeps no example");

        let pet = as_struct(&types[1]);
        assert_eq!(pet.annotations["x_example"], r#"{"name":"doggie"}"#);
        assert_eq!(pet.fields[0].annotations["x_example"], "doggie");
        assert_eq!(pet.fields[1].annotations["x_example"], "3");
    }

    #[test]
    fn test_empty_struct() {
        let (types, _) = materialize(json!({"Empty": {"type": "object"}}));
        assert!(as_struct(&types[0]).fields.is_empty());
    }

    #[test]
    fn test_array_type() {
        let (types, _) = materialize(json!({
            "Tags": {
                "type": "array",
                "description": "a list of tags",
                "items": {"$ref": "#/definitions/Tag"},
                "minItems": 1,
                "example": ["a"],
                "x-constraint": {"unique": true, "length": 4},
            },
            "Anything": {"items": {}},
        }));
        match &types[0] {
            TypeDef::Array(a) => {
                assert_eq!(a.name, "Anything");
                assert_eq!(a.items.as_deref(), Some("Any"));
            }
            other => panic!("expected array, got {other:?}"),
        }
        match &types[1] {
            TypeDef::Array(a) => {
                assert_eq!(a.items.as_deref(), Some("Tag"));
                assert_eq!(a.comment.as_deref(), Some("a list of tags"));
                let keys: Vec<&str> = a.annotations.keys().map(String::as_str).collect();
                assert_eq!(
                    keys,
                    ["x_minItems", "x_example", "x_constraint_length", "x_constraint_unique"]
                );
                assert_eq!(a.annotations["x_minItems"], "1");
                assert_eq!(a.annotations["x_example"], r#"["a"]"#);
            }
            other => panic!("expected array, got {other:?}"),
        }
    }

    #[test]
    fn test_string_type() {
        let (types, _) = materialize(json!({
            "Code": {
                "type": "string",
                "pattern": "^[A-Z]{3}$",
                "maxLength": -1,
                "x-format": {"case": "upper"},
                "x-constraint": {"iso": "4217"},
            },
        }));
        match &types[0] {
            TypeDef::String(s) => {
                assert_eq!(s.pattern.as_deref(), Some("^[A-Z]{3}$"));
                assert_eq!(s.max_size, None);
                assert_eq!(s.annotations["x_format_case"], "upper");
                assert_eq!(s.annotations["x_constraint_iso"], "4217");
            }
            other => panic!("expected string, got {other:?}"),
        }
    }

    #[test]
    fn test_integer_constraints() {
        let (types, diagnostics) = materialize(json!({
            "Count": {"type": "integer", "x-constraint": {"positive": true, "even": true}},
            "Offset": {"type": "integer", "x-constraint": {"positive": false}},
        }));
        assert!(diagnostics.is_empty());
        match (&types[0], &types[1]) {
            (TypeDef::Number(count), TypeDef::Number(offset)) => {
                assert_eq!(count.supertype, "Int32");
                assert_eq!(count.min, Some(Number::Int32(0)));
                assert_eq!(offset.min, None);
            }
            other => panic!("expected numbers, got {other:?}"),
        }
    }

    #[test]
    fn test_number_unknown_constraint() {
        let (types, diagnostics) = materialize(json!({
            "Price": {"type": "number", "x-constraint": {"positive": true, "precision": 2}},
        }));
        match &types[0] {
            TypeDef::Number(n) => {
                assert_eq!(n.supertype, "Float64");
                assert_eq!(n.min, Some(Number::Float64(0.0)));
            }
            other => panic!("expected number, got {other:?}"),
        }
        assert_eq!(
            diagnostics,
            [Diagnostic::UnknownConstraint {
                type_name: "Price".to_string(),
                key: "precision".to_string(),
            }]
        );
    }

    #[test]
    fn test_unsupported_kinds() {
        let (types, diagnostics) = materialize(json!({
            "Flag": {"type": "boolean"},
            "Mystery": {"description": "no type at all"},
        }));
        assert!(types.is_empty());
        assert_eq!(
            diagnostics,
            [
                Diagnostic::UnsupportedType {
                    name: "Flag".to_string(),
                    kind: Some("boolean".to_string()),
                },
                Diagnostic::UnsupportedType {
                    name: "Mystery".to_string(),
                    kind: None,
                },
            ]
        );
    }

    #[test]
    fn test_reserved_type_is_skipped() {
        let (types, diagnostics) = materialize(json!({
            "ResourceError": {"type": "object", "properties": {"code": {"type": "integer"}}},
        }));
        assert!(types.is_empty());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_name_is_camelized() {
        let (types, _) = materialize(json!({"pet owner": {"type": "object"}}));
        assert_eq!(names(&types), ["PetOwner"]);
    }

    #[test]
    fn test_untyped_field_is_dropped() {
        let (types, diagnostics) = materialize(json!({
            "Pet": {"properties": {"blob": {"description": "anything"}, "id": {"type": "integer"}}},
        }));
        assert_eq!(as_struct(&types[0]).fields.len(), 1);
        assert_eq!(
            diagnostics,
            [Diagnostic::UntypedField {
                type_name: "Pet".to_string(),
                field: "blob".to_string(),
            }]
        );
    }

    #[test]
    fn test_constrained_ref_field_keeps_reference() {
        let (types, diagnostics) = materialize(json!({
            "Pet": {"properties": {"owner": {"$ref": "#/definitions/Owner", "minimum": 1}}},
        }));
        assert_eq!(names(&types), ["Pet"]);
        assert_eq!(as_struct(&types[0]).fields[0].field_type, "Owner");
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_annotation_value() {
        assert_eq!(annotation_value(&json!("x")), Some("x".to_string()));
        assert_eq!(annotation_value(&json!(30)), Some("30".to_string()));
        assert_eq!(annotation_value(&json!(1.5)), Some("1.5".to_string()));
        assert_eq!(annotation_value(&json!(true)), Some("true".to_string()));
        assert_eq!(annotation_value(&json!([1, 2])), Some("[1,2]".to_string()));
        assert_eq!(annotation_value(&Value::Null), None);
    }
}
