//! Decoding entry points and type rendering.
//!
//! [`Json`] turns text (or an in-memory structure) into a [`Document`], whose
//! [`root`](Document::root) is the first [`Value`] of every accessor chain.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::{debug, trace};

use crate::error::{CantDecode, CantEncode};
use crate::options::ParseOptions;
use crate::path::JsonPath;
use crate::value::Value;

/// Longest string rendered in full by [`Json::pretty_print_value`].
const MAX_RENDERED_CHARS: usize = 30;

/// Entry point for decoding JSON into navigable values.
///
/// # Example
///
/// ```rust
/// use jsonprobe::Json;
///
/// let document = Json::parse(r#"{"name": "Alice", "tags": ["admin"]}"#).unwrap();
/// let root = document.root();
///
/// assert_eq!(root.field("name").unwrap().string().unwrap(), "Alice");
/// assert_eq!(root.field("tags").unwrap().nth(0).unwrap().string().unwrap(), "admin");
///
/// let error = root.field("age").unwrap_err();
/// assert_eq!(error.to_string(), "Expected $.age to be present, none given.");
/// ```
pub struct Json;

impl Json {
    /// Decodes JSON text with the default [`ParseOptions`].
    pub fn parse(source: &str) -> Result<Document, CantDecode> {
        Self::parse_with(source, &ParseOptions::default())
    }

    /// Decodes JSON text.
    ///
    /// A source consisting of the literal `null`, optionally surrounded by
    /// whitespace, yields a null document. The literal is case-sensitive.
    ///
    /// # Errors
    ///
    /// Returns [`CantDecode`] if the text is not valid JSON or nests deeper
    /// than `options.max_depth`.
    pub fn parse_with(source: &str, options: &ParseOptions) -> Result<Document, CantDecode> {
        if source.trim_matches(is_json_whitespace) == "null" {
            debug!("decoded literal null document");
            return Ok(Document::new(JsonValue::Null));
        }

        // Containers count towards depth, so bracket nesting bounds the
        // decoder's recursion before it starts.
        if nesting(source) > options.max_depth {
            return Err(CantDecode::depth_exceeded(options.max_depth));
        }

        let mut deserializer = serde_json::Deserializer::from_str(source);
        deserializer.disable_recursion_limit();
        let root = JsonValue::deserialize(&mut deserializer)?;
        deserializer.end()?;

        let depth = depth(&root);
        if depth > options.max_depth {
            return Err(CantDecode::depth_exceeded(options.max_depth));
        }

        trace!(depth, bytes = source.len(), "decoded JSON document");
        Ok(Document::new(root))
    }

    /// Wraps an in-memory JSON structure as if it had been decoded.
    pub fn pretend(value: impl Into<JsonValue>) -> Document {
        Document::new(value.into())
    }

    /// Wraps any serializable value as if its JSON encoding had been decoded.
    ///
    /// # Errors
    ///
    /// Returns [`CantEncode`] if the value has no JSON representation, for
    /// instance a map with non-string keys or a type that refuses to
    /// serialize.
    pub fn pretend_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Document, CantEncode> {
        Ok(Document::new(serde_json::to_value(value)?))
    }

    /// Borrows a node as the root of an accessor chain.
    pub fn view(node: &JsonValue) -> Value<'_> {
        Value::new(node, JsonPath::root())
    }

    /// Names the type of a node as it appears in failure messages:
    /// `string`, `null`, `true`, `false`, `number`, `array` or `object`.
    pub fn pretty_print_type(node: &JsonValue) -> &'static str {
        match node {
            JsonValue::String(_) => "string",
            JsonValue::Null => "null",
            JsonValue::Bool(true) => "true",
            JsonValue::Bool(false) => "false",
            JsonValue::Number(_) => "number",
            JsonValue::Array(_) => "array",
            JsonValue::Object(_) => "object",
        }
    }

    /// Names the JSON type of an arbitrary value, or `unknown type` if it has
    /// no JSON representation.
    pub fn pretty_print_type_of<T: Serialize + ?Sized>(value: &T) -> &'static str {
        match serde_json::to_value(value) {
            Ok(node) => Self::pretty_print_type(&node),
            Err(_) => "unknown type",
        }
    }

    /// Renders a node for failure messages.
    ///
    /// Scalars render as literals, strings quoted and cut after 30
    /// characters; arrays and objects render as their type name.
    pub fn pretty_print_value(node: &JsonValue) -> String {
        match node {
            JsonValue::String(s) if s.chars().count() > MAX_RENDERED_CHARS => {
                let head: String = s.chars().take(MAX_RENDERED_CHARS).collect();
                format!("\"{} ...\"", head)
            }
            JsonValue::String(s) => format!("\"{}\"", s),
            JsonValue::Number(n) => n.to_string(),
            other => Self::pretty_print_type(other).to_string(),
        }
    }
}

/// An owned, decoded JSON tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: JsonValue,
}

impl Document {
    fn new(root: JsonValue) -> Self {
        Self { root }
    }

    /// The root value, at pointer `$`.
    pub fn root(&self) -> Value<'_> {
        Value::new(&self.root, JsonPath::root())
    }

    /// The underlying tree.
    pub fn as_json(&self) -> &JsonValue {
        &self.root
    }

    /// Consumes the document, returning the underlying tree.
    pub fn into_inner(self) -> JsonValue {
        self.root
    }
}

/// Nesting depth of a node: 1 for scalars and empty containers, plus one
/// for every enclosing array or object.
pub(crate) fn depth(node: &JsonValue) -> usize {
    match node {
        JsonValue::Array(items) => 1 + items.iter().map(depth).max().unwrap_or(0),
        JsonValue::Object(members) => 1 + members.values().map(depth).max().unwrap_or(0),
        _ => 1,
    }
}

fn is_json_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// Deepest bracket nesting of JSON text, ignoring brackets inside strings.
fn nesting(source: &str) -> usize {
    let mut current = 0usize;
    let mut deepest = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for byte in source.bytes() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b'[' | b'{' => {
                current += 1;
                deepest = deepest.max(current);
            }
            b']' | b'}' => current = current.saturating_sub(1),
            _ => {}
        }
    }

    deepest
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Document>();
    assert_sync::<Document>();
};
