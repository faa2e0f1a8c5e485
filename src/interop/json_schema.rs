//! JSON Schema validation.
//!
//! [`JsonSchema`] compiles a JSON Schema document with the `jsonschema` crate
//! and rejects values that violate it, reporting every violation with a
//! pointer in the same notation accessors use.

use std::fmt;

use jsonschema::Resource;
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::error::{AssertionFailed, Error, Runtime};
use crate::path::JsonPath;
use crate::validation::Validator;
use crate::value::Value;

/// A compiled JSON Schema, usable wherever a [`Validator`] is expected.
///
/// # Example
///
/// ```rust
/// use jsonprobe::{JsonSchema, Validator};
/// use serde_json::json;
///
/// let schema = JsonSchema::new(&json!({
///     "type": "object",
///     "properties": {"age": {"type": "integer"}}
/// }))
/// .unwrap();
///
/// assert!(schema.parse(r#"{"age": 30}"#).is_ok());
///
/// let error = schema.parse(r#"{"age": "thirty"}"#).unwrap_err();
/// assert!(error.to_string().starts_with("JSON Schema violation at $.age : "));
/// ```
pub struct JsonSchema {
    reference: String,
    validator: jsonschema::Validator,
}

impl JsonSchema {
    /// Compiles a standalone schema, identified by its `$id` if it has one.
    ///
    /// # Errors
    ///
    /// Returns [`Runtime`] if the schema itself is invalid or refers to a
    /// schema that cannot be resolved.
    pub fn new(schema: &JsonValue) -> Result<Self, Runtime> {
        let reference = schema
            .get("$id")
            .and_then(JsonValue::as_str)
            .unwrap_or_default()
            .to_string();

        Self::compile(reference, schema, std::iter::empty())
    }

    /// Compiles a schema that may refer to any of `resources` by URI.
    pub(crate) fn compile<'r>(
        reference: String,
        schema: &JsonValue,
        resources: impl IntoIterator<Item = (&'r str, &'r JsonValue)>,
    ) -> Result<Self, Runtime> {
        let mut options = jsonschema::options();
        for (uri, contents) in resources {
            let resource = Resource::from_contents(contents.clone())
                .map_err(|e| Runtime::new(format!("Invalid schema {}: {}", uri, e)))?;
            options = options.with_resource(uri, resource);
        }

        let validator = options
            .build(schema)
            .map_err(|e| Runtime::new(format!("Invalid schema {}: {}", reference, e)))?;

        Ok(Self {
            reference,
            validator,
        })
    }

    /// The URI identifying this schema, empty if it has none.
    pub fn reference(&self) -> &str {
        &self.reference
    }
}

impl fmt::Debug for JsonSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonSchema")
            .field("reference", &self.reference)
            .finish_non_exhaustive()
    }
}

impl Validator for JsonSchema {
    fn validate(&self, json: &Value<'_>) -> Result<(), Error> {
        let violations: Vec<String> = self
            .validator
            .iter_errors(json.json())
            .map(|error| {
                let pointer = resolve(json, error.instance_path.as_str());
                format!("{} : {}.", pointer, error)
            })
            .collect();

        if violations.is_empty() {
            return Ok(());
        }

        debug!(
            schema = %self.reference,
            pointer = %json.pointer(),
            violations = violations.len(),
            "value rejected by JSON Schema"
        );

        let message = match violations.as_slice() {
            [violation] => format!("JSON Schema violation at {}", violation),
            _ => format!("JSON Schema violations:\n    {}", violations.join("\n    ")),
        };

        Err(AssertionFailed::new(message).into())
    }
}

/// Translates a JSON Pointer relative to `json` into a path below
/// `json.pointer()`. Numeric tokens are indices only where the node they
/// select from is an array.
fn resolve(json: &Value<'_>, pointer: &str) -> JsonPath {
    let mut path = json.pointer().clone();
    let mut node = Some(json.json());

    for token in pointer.split('/').skip(1) {
        let token = token.replace("~1", "/").replace("~0", "~");
        let index = match node {
            Some(JsonValue::Array(_)) => token.parse::<usize>().ok(),
            _ => None,
        };

        match index {
            Some(n) => {
                node = node.and_then(|node| node.get(n));
                path = path.index(n);
            }
            None => {
                node = node.and_then(|node| node.get(token.as_str()));
                path = path.field(token);
            }
        }
    }

    path
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<JsonSchema>();
    assert_sync::<JsonSchema>();
};
