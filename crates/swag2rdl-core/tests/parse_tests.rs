use swag2rdl_core::error::ParseError;
use swag2rdl_core::parse;
use swag2rdl_core::parse::parameter::ParameterOrRef;
use swag2rdl_core::parse::response::ResponseOrRef;
use swag2rdl_core::schema::HttpMethod;

const PETSTORE: &str = include_str!("fixtures/petstore.json");
const INVENTORY: &str = include_str!("fixtures/inventory.yaml");

#[test]
fn parse_petstore_json() {
    let doc = parse::from_json(PETSTORE).expect("should parse petstore.json");
    assert_eq!(doc.swagger_version().as_deref(), Some("2.0"));
    assert_eq!(doc.info.title.as_deref(), Some("The Petstore API"));
    assert_eq!(doc.base_path.as_deref(), Some("/api"));
    assert_eq!(doc.produces, ["application/json"]);
    assert_eq!(doc.definitions.len(), 5);
    assert_eq!(doc.paths.len(), 2);
    assert!(doc.parameters.contains_key("limit"));
    assert!(doc.responses.contains_key("Error"));

    let pet = &doc.definitions["Pet"];
    let properties: Vec<&str> = pet
        .properties
        .as_ref()
        .expect("Pet should have properties")
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(
        properties,
        ["id", "category", "name", "photoUrls", "tags", "status"]
    );
}

#[test]
fn parse_path_items() {
    let doc = parse::from_json(PETSTORE).unwrap();

    let pets = &doc.paths["/pet"];
    let methods: Vec<HttpMethod> = pets.operations().map(|(m, _)| m).collect();
    assert_eq!(methods, [HttpMethod::Get, HttpMethod::Post]);

    let list = pets.get.as_ref().expect("should have GET");
    assert_eq!(list.operation_id.as_deref(), Some("listPets"));
    assert!(matches!(
        &list.parameters[0],
        ParameterOrRef::Ref { ref_path } if ref_path == "#/parameters/limit"
    ));

    let post = pets.post.as_ref().expect("should have POST");
    assert!(matches!(post.responses["400"], ResponseOrRef::Ref { .. }));
    match &post.responses["405"] {
        ResponseOrRef::Response(r) => {
            assert_eq!(r.description.as_deref(), Some("Invalid input"));
            assert!(r.schema.is_none());
        }
        other => panic!("expected inline response, got {other:?}"),
    }

    let by_id = &doc.paths["/pet/{petId}"];
    assert_eq!(by_id.parameters.len(), 1);
    let methods: Vec<HttpMethod> = by_id.operations().map(|(m, _)| m).collect();
    assert_eq!(methods, [HttpMethod::Get, HttpMethod::Delete]);
}

#[test]
fn parse_inventory_yaml() {
    let doc = parse::from_yaml(INVENTORY).expect("should parse inventory.yaml");
    assert_eq!(doc.info.numeric_version(), Some(2));
    let names: Vec<&str> = doc.definitions.keys().map(String::as_str).collect();
    assert_eq!(names, ["Flag", "Item", "Sku List"]);

    let item = &doc.definitions["Item"];
    let properties: Vec<&str> = item
        .properties
        .as_ref()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(properties, ["sku", "quantity", "price"]);
    assert!(item.properties.as_ref().unwrap()["quantity"].is_positive());
}

#[test]
fn parse_rejects_openapi_3() {
    let yaml = r#"
openapi: "3.0.0"
info:
  title: Test
  version: "1.0"
paths: {}
"#;
    let err = parse::from_yaml(yaml).unwrap_err();
    assert!(matches!(err, ParseError::UnsupportedVersion(_)));
}

#[test]
fn parse_rejects_other_swagger_versions() {
    let err = parse::from_json(r#"{"swagger": "1.2", "paths": {}}"#).unwrap_err();
    assert!(matches!(err, ParseError::UnsupportedVersion(ref v) if v == "1.2"));
}

#[test]
fn parse_accepts_missing_version() {
    let doc = parse::from_json(r#"{"paths": {}}"#).expect("should parse");
    assert!(doc.paths.is_empty());
}

#[test]
fn parse_tolerates_wrongly_shaped_fields() {
    let json = r#"{
        "swagger": "2.0",
        "info": {"title": 42, "description": ["not", "text"]},
        "definitions": {
            "Pet": {"type": "object", "required": "id", "maxLength": "ten", "properties": {"id": {"type": "integer"}}}
        }
    }"#;
    let doc = parse::from_json(json).expect("should parse leniently");
    assert_eq!(doc.info.title, None);
    assert_eq!(doc.info.description, None);
    let pet = &doc.definitions["Pet"];
    assert!(!pet.is_required("id"));
    assert_eq!(pet.max_length(), None);
}

#[test]
fn parse_invalid_json() {
    assert!(matches!(
        parse::from_json("{not json"),
        Err(ParseError::Json(_))
    ));
}
