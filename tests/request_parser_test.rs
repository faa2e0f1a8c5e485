//! End-to-end test: parsing a request body into domain objects.

use jsonprobe::{AssertionFailed, Error, Json, Validator, Value};

#[derive(Debug, PartialEq)]
struct Color {
    name: String,
    category: String,
    kind: Option<String>,
    code_rgba: Vec<i64>,
    code_hex: String,
}

fn parse_color(json: Value<'_>) -> Result<Color, AssertionFailed> {
    let code = json.field("code")?;

    Ok(Color {
        name: json.field("name")?.string()?.to_string(),
        category: json.field("category")?.string()?.to_string(),
        kind: json.opt_field("type")?.string()?.map(str::to_string),
        code_rgba: code.field("rgba")?.array_map(|c| c.int())?,
        code_hex: code.field("hex")?.string()?.to_string(),
    })
}

fn parse_request(body: &str) -> Result<Vec<Color>, Error> {
    let document = Json::parse(body)?;
    let root = document.root();
    root.array_map(|json| Ok(parse_color(json)?))
}

const BODY: &str = r##"[
    {
        "name": "black",
        "category": "hue",
        "type": "primary",
        "code": {"rgba": [255, 255, 255, 1], "hex": "#000"}
    },
    {
        "name": "white",
        "category": "value",
        "code": {"rgba": [0, 0, 0, 1], "hex": "#FFF"}
    }
]"##;

#[test]
fn test_parses_every_color() {
    let colors = parse_request(BODY).unwrap();

    assert_eq!(
        colors,
        vec![
            Color {
                name: "black".to_string(),
                category: "hue".to_string(),
                kind: Some("primary".to_string()),
                code_rgba: vec![255, 255, 255, 1],
                code_hex: "#000".to_string(),
            },
            Color {
                name: "white".to_string(),
                category: "value".to_string(),
                kind: None,
                code_rgba: vec![0, 0, 0, 1],
                code_hex: "#FFF".to_string(),
            },
        ]
    );
}

#[test]
fn test_reports_where_the_body_is_wrong() {
    let body = BODY.replace(r#""rgba": [0, 0, 0, 1]"#, r#""rgba": [0, "zero", 0, 1]"#);

    let error = parse_request(&body).unwrap_err();

    assert_eq!(
        error.to_string(),
        "Expected $[1].code.rgba[1] to be a number, string given."
    );
}

#[test]
fn test_reports_undecodable_bodies() {
    let error = parse_request("[{").unwrap_err();
    assert!(matches!(error, Error::CantDecode(_)));
}

#[test]
fn test_validator_guards_the_body() {
    let list_of_objects = |json: &Value<'_>| -> Result<(), AssertionFailed> {
        json.array_map(|item| item.field("name").map(|_| ()))?;
        Ok(())
    };

    assert!(list_of_objects.parse(BODY).is_ok());
    assert_eq!(
        list_of_objects.parse(r#"[{"name": "x"}, {}]"#).unwrap_err().to_string(),
        "Expected $[1].name to be present, none given."
    );
}

#[cfg(feature = "json-schema")]
#[test]
fn test_schema_repository_guards_the_body() {
    use jsonprobe::SchemaRepository;
    use serde_json::json;

    let schemas = SchemaRepository::new("file:///schemas");
    schemas
        .register(
            "/colors.schema.json",
            &json!({
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["name", "category", "code"]
                }
            }),
        )
        .unwrap();

    let document = schemas.parse("/colors.schema.json", BODY).unwrap();
    let colors = document.root().array_map(parse_color).unwrap();
    assert_eq!(colors.len(), 2);

    let message = schemas
        .parse("/colors.schema.json", r#"[{"name": "x", "category": "y"}]"#)
        .unwrap_err()
        .to_string();
    assert!(message.starts_with("JSON Schema violation at $[0] : "), "{}", message);
}
