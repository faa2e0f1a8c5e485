//! Integration tests for the validator capability.

use jsonprobe::{AssertionFailed, CantDecode, Error, Json, ParseOptions, Validator, Value};

/// Requires an object whose `password` and `confirm` fields agree.
struct PasswordsMatch;

impl Validator for PasswordsMatch {
    fn validate(&self, json: &Value<'_>) -> Result<(), Error> {
        let password = json.field("password")?.string()?;
        let confirm = json.field("confirm")?.string()?;

        if password != confirm {
            return Err(AssertionFailed::new(format!(
                "Expected {} to equal {}.",
                json.field("confirm")?.pointer(),
                json.field("password")?.pointer()
            ))
            .into());
        }
        Ok(())
    }
}

#[test]
fn test_validate_returns_the_value() {
    let document = Json::parse(r#"{"password": "x", "confirm": "x"}"#).unwrap();
    let root = document.root();

    let validated = root.validate(&PasswordsMatch).unwrap();
    assert_eq!(validated.field("password").unwrap().string().unwrap(), "x");
}

#[test]
fn test_validate_propagates_rejections() {
    let document = Json::parse(r#"{"password": "x", "confirm": "y"}"#).unwrap();

    let error = document.root().validate(&PasswordsMatch).unwrap_err();
    assert_eq!(error.to_string(), "Expected $.confirm to equal $.password.");
}

#[test]
fn test_validator_shape_errors_surface_as_assertions() {
    let error = PasswordsMatch.parse(r#"{"password": 1}"#).unwrap_err();

    assert_eq!(
        error.as_assertion().map(ToString::to_string),
        Some("Expected $.password to be a string, number given.".to_string())
    );
}

#[test]
fn test_parse_decodes_then_validates() {
    let document = PasswordsMatch
        .parse(r#"{"password": "x", "confirm": "x"}"#)
        .unwrap();
    assert!(document.root().is_object());

    let error = PasswordsMatch.parse("not json").unwrap_err();
    assert!(matches!(error, Error::CantDecode(CantDecode { code: CantDecode::SYNTAX, .. })));
}

#[test]
fn test_parse_with_options() {
    let options = ParseOptions::default().with_max_depth(1);
    let error = PasswordsMatch
        .parse_with(r#"{"password": "x", "confirm": "x"}"#, &options)
        .unwrap_err();

    assert!(matches!(error, Error::CantDecode(CantDecode { code: CantDecode::DEPTH, .. })));
}

#[test]
fn test_validation_on_nested_values() {
    let document = Json::parse(r#"{"account": {"password": "a", "confirm": "b"}}"#).unwrap();
    let account = document.root().field("account").unwrap();

    assert_eq!(
        account.validate(&PasswordsMatch).unwrap_err().to_string(),
        "Expected $.account.confirm to equal $.account.password."
    );
}

#[test]
fn test_closures_are_validators() {
    let positive = |json: &Value<'_>| -> Result<(), AssertionFailed> {
        if json.int()? > 0 {
            Ok(())
        } else {
            Err(AssertionFailed::new(format!("Expected {} to be positive.", json.pointer())))
        }
    };

    assert!(positive.parse("3").is_ok());
    assert_eq!(
        positive.parse("-3").unwrap_err().to_string(),
        "Expected $ to be positive."
    );

    let boxed: Box<dyn Validator> = Box::new(positive);
    assert!(boxed.parse("1").is_ok());
}
