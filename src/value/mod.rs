//! Accessors over decoded JSON.
//!
//! [`Value`] is the strict accessor: every method asserts the shape of the
//! node it wraps and fails with an [`AssertionFailed`] naming the pointer, the
//! expected shape and the shape actually found. [`OptionalValue`] is its
//! nullable counterpart, which lets absent or null nodes flow through a chain
//! of accessors.
//!
//! # Example
//!
//! ```rust
//! use jsonprobe::{AssertionFailed, Json};
//!
//! let document = Json::parse(r#"{"colors": [{"name": "red", "rgb": [255, 0, 0]}]}"#).unwrap();
//!
//! let colors = document
//!     .root()
//!     .field("colors")
//!     .unwrap()
//!     .array_map(|color| {
//!         let name = color.field("name")?.string()?;
//!         let rgb = color.field("rgb")?.array_map(|c| c.int())?;
//!         let kind = color.opt_field("kind")?.string()?;
//!         Ok::<_, AssertionFailed>((name, rgb, kind))
//!     })
//!     .unwrap();
//!
//! assert_eq!(colors, vec![("red", vec![255, 0, 0], None)]);
//! ```

mod enumeration;
mod leaf;
mod optional;

pub use enumeration::{EnumKey, EnumRepr, Enumeration};
pub use leaf::formats;
pub use optional::OptionalValue;

use indexmap::IndexMap;
use serde_json::{Map, Value as JsonValue};
use tracing::{debug, trace};

use crate::error::{AssertionFailed, CantEncode, Error, TryIntoAssertion};
use crate::json::{depth, Json};
use crate::options::EncodeOptions;
use crate::path::JsonPath;
use crate::validation::Validator;
use crate::AssertionResult;

/// One alternative handed to [`Value::either`].
pub type Alternative<'f, 'a, T, E> = &'f dyn Fn(&Value<'a>) -> Result<T, E>;

/// A JSON node together with the pointer where it was found.
///
/// Values borrow the tree they point into; navigating to a child yields a new
/// value borrowing the same tree, never the parent value, so children can
/// outlive the temporaries that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct Value<'a> {
    node: &'a JsonValue,
    pointer: JsonPath,
}

impl<'a> Value<'a> {
    pub(crate) fn new(node: &'a JsonValue, pointer: JsonPath) -> Self {
        Self { node, pointer }
    }

    /// Where this value resides, e.g. `$.users[0]`.
    pub fn pointer(&self) -> &JsonPath {
        &self.pointer
    }

    /// The underlying node, whatever it may be.
    pub fn json(&self) -> &'a JsonValue {
        self.node
    }

    /// Switches to the nullable API at this position.
    pub fn into_optional(self) -> OptionalValue<'a> {
        let pointer = self.pointer.clone();
        OptionalValue::new(Some(self), pointer)
    }

    fn mismatch(&self, expected: &str) -> AssertionFailed {
        AssertionFailed::new(format!(
            "Expected {} to be {}, {} given.",
            self.pointer,
            expected,
            Json::pretty_print_type(self.node)
        ))
    }

    fn object(&self) -> AssertionResult<&'a Map<String, JsonValue>> {
        self.node
            .as_object()
            .ok_or_else(|| self.mismatch("an object"))
    }

    fn array(&self) -> AssertionResult<&'a Vec<JsonValue>> {
        self.node.as_array().ok_or_else(|| self.mismatch("an array"))
    }

    // Predicates

    /// Is this value an object?
    pub fn is_object(&self) -> bool {
        self.node.is_object()
    }

    /// Is this value an array?
    pub fn is_array(&self) -> bool {
        self.node.is_array()
    }

    /// Is this value a number?
    pub fn is_number(&self) -> bool {
        self.node.is_number()
    }

    /// Is this value a string?
    pub fn is_string(&self) -> bool {
        self.node.is_string()
    }

    /// Is this value `true` or `false`?
    pub fn is_bool(&self) -> bool {
        self.node.is_boolean()
    }

    /// Is this value `true`?
    pub fn is_true(&self) -> bool {
        self.node.as_bool() == Some(true)
    }

    /// Is this value `false`?
    pub fn is_false(&self) -> bool {
        self.node.as_bool() == Some(false)
    }

    /// Is this value `null`?
    pub fn is_null(&self) -> bool {
        self.node.is_null()
    }

    // Navigation

    /// Asserts this value is an object with the given field, then returns
    /// that field.
    ///
    /// # Errors
    ///
    /// Fails if this value is not an object or the field is missing.
    pub fn field(&self, name: &str) -> AssertionResult<Value<'a>> {
        let pointer = self.pointer.field(name);
        match self.object()?.get(name) {
            Some(child) => Ok(Value::new(child, pointer)),
            None => Err(AssertionFailed::new(format!(
                "Expected {} to be present, none given.",
                pointer
            ))),
        }
    }

    /// Asserts this value is an object, then returns the given field as an
    /// [`OptionalValue`], absent if the field is missing or null.
    pub fn opt_field(&self, name: &str) -> AssertionResult<OptionalValue<'a>> {
        let pointer = self.pointer.field(name);
        let child = self
            .object()?
            .get(name)
            .map(|child| Value::new(child, pointer.clone()));
        Ok(OptionalValue::new(child, pointer))
    }

    /// Asserts this value is an object, then reports whether it has the
    /// given field.
    pub fn has_field(&self, name: &str) -> AssertionResult<bool> {
        Ok(self.object()?.contains_key(name))
    }

    /// Asserts this value is an array with an element at `n`, then returns
    /// that element.
    ///
    /// # Errors
    ///
    /// Fails if this value is not an array or `n` is out of bounds.
    pub fn nth(&self, n: usize) -> AssertionResult<Value<'a>> {
        let pointer = self.pointer.index(n);
        match self.array()?.get(n) {
            Some(child) => Ok(Value::new(child, pointer)),
            None => Err(AssertionFailed::new(format!(
                "Expected {} to be present, none given.",
                pointer
            ))),
        }
    }

    /// Asserts this value is an array, then returns the element at `n` as an
    /// [`OptionalValue`], absent if out of bounds or null.
    pub fn opt_nth(&self, n: usize) -> AssertionResult<OptionalValue<'a>> {
        let pointer = self.pointer.index(n);
        let child = self
            .array()?
            .get(n)
            .map(|child| Value::new(child, pointer.clone()));
        Ok(OptionalValue::new(child, pointer))
    }

    /// Asserts this value is an array, then reports whether it has an
    /// element at `n`.
    pub fn has_nth(&self, n: usize) -> AssertionResult<bool> {
        Ok(n < self.array()?.len())
    }

    // Terminals

    /// Asserts this value is a number, then returns it as an integer.
    ///
    /// Fractions are truncated toward zero; numbers beyond the range of
    /// `i64` saturate.
    pub fn int(&self) -> AssertionResult<i64> {
        let number = match self.node {
            JsonValue::Number(number) => number,
            _ => return Err(self.mismatch("a number")),
        };

        if let Some(n) = number.as_i64() {
            Ok(n)
        } else if let Some(n) = number.as_u64() {
            Ok(i64::try_from(n).unwrap_or(i64::MAX))
        } else {
            Ok(number.as_f64().map_or(0, |f| f as i64))
        }
    }

    /// Asserts this value is a number, then returns it as a float.
    pub fn float(&self) -> AssertionResult<f64> {
        match self.node {
            JsonValue::Number(number) => Ok(number.as_f64().unwrap_or(f64::NAN)),
            _ => Err(self.mismatch("a number")),
        }
    }

    /// Asserts this value is a string, then returns it.
    pub fn string(&self) -> AssertionResult<&'a str> {
        self.node.as_str().ok_or_else(|| self.mismatch("a string"))
    }

    /// Asserts this value is `true` or `false`, then returns it.
    pub fn bool(&self) -> AssertionResult<bool> {
        self.node
            .as_bool()
            .ok_or_else(|| self.mismatch("true or false"))
    }

    /// Asserts this value is `true`.
    pub fn assert_true(&self) -> AssertionResult<bool> {
        if self.is_true() {
            Ok(true)
        } else {
            Err(self.mismatch("true"))
        }
    }

    /// Asserts this value is `false`.
    pub fn assert_false(&self) -> AssertionResult<bool> {
        if self.is_false() {
            Ok(false)
        } else {
            Err(self.mismatch("false"))
        }
    }

    /// Asserts this value is `null`.
    pub fn null(&self) -> AssertionResult<()> {
        if self.is_null() {
            Ok(())
        } else {
            Err(self.mismatch("null"))
        }
    }

    // Iteration

    /// Asserts this value is an array, then maps `f` over its elements paired
    /// with their index.
    ///
    /// Any error returned by `f` is returned unchanged.
    pub fn array_map_with_index<T, E, F>(&self, mut f: F) -> Result<Vec<T>, E>
    where
        F: FnMut(usize, Value<'a>) -> Result<T, E>,
        E: From<AssertionFailed>,
    {
        self.array()?
            .iter()
            .enumerate()
            .map(|(i, child)| f(i, Value::new(child, self.pointer.index(i))))
            .collect()
    }

    /// Asserts this value is an array, then maps `f` over its elements.
    pub fn array_map<T, E, F>(&self, mut f: F) -> Result<Vec<T>, E>
    where
        F: FnMut(Value<'a>) -> Result<T, E>,
        E: From<AssertionFailed>,
    {
        self.array_map_with_index(|_, child| f(child))
    }

    /// Asserts this value is an object, then maps `f` over its members paired
    /// with their names, keeping the original member order.
    ///
    /// Any error returned by `f` is returned unchanged.
    pub fn object_map_with_index<T, E, F>(&self, mut f: F) -> Result<IndexMap<String, T>, E>
    where
        F: FnMut(&'a str, Value<'a>) -> Result<T, E>,
        E: From<AssertionFailed>,
    {
        self.object()?
            .iter()
            .map(|(key, child)| {
                f(key.as_str(), Value::new(child, self.pointer.field(key.as_str())))
                    .map(|mapped| (key.clone(), mapped))
            })
            .collect()
    }

    /// Asserts this value is an object, then maps `f` over its members.
    pub fn object_map<T, E, F>(&self, mut f: F) -> Result<IndexMap<String, T>, E>
    where
        F: FnMut(Value<'a>) -> Result<T, E>,
        E: From<AssertionFailed>,
    {
        self.object_map_with_index(|_, child| f(child))
    }

    // Combinators

    /// Applies a sub-parser to this value.
    pub fn apply<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&Value<'a>) -> Result<T, E>,
    {
        f(self)
    }

    /// Tries each alternative in order and returns the first success.
    ///
    /// Assertion failures are collected; if every alternative fails they are
    /// combined, in call order, into one [`AssertionFailed::Many`]. Any other
    /// error is returned immediately without trying the remaining
    /// alternatives.
    ///
    /// # Example
    ///
    /// ```rust
    /// use jsonprobe::{AssertionFailed, Json, Value};
    ///
    /// fn as_number(v: &Value<'_>) -> Result<i64, AssertionFailed> {
    ///     v.int()
    /// }
    ///
    /// fn as_numeric_string(v: &Value<'_>) -> Result<i64, AssertionFailed> {
    ///     v.string()?
    ///         .parse()
    ///         .map_err(|_| AssertionFailed::new(format!("Expected {} to be numeric.", v.pointer())))
    /// }
    ///
    /// let document = Json::parse(r#"["12", 13, true]"#).unwrap();
    /// let root = document.root();
    ///
    /// assert_eq!(root.nth(0).unwrap().either(&as_number, &as_numeric_string, &[]), Ok(12));
    /// assert_eq!(root.nth(1).unwrap().either(&as_number, &as_numeric_string, &[]), Ok(13));
    ///
    /// let error = root.nth(2).unwrap().either(&as_number, &as_numeric_string, &[]).unwrap_err();
    /// assert!(error.is_many());
    /// ```
    pub fn either<T, E>(
        &self,
        first: Alternative<'_, 'a, T, E>,
        second: Alternative<'_, 'a, T, E>,
        more: &[Alternative<'_, 'a, T, E>],
    ) -> Result<T, E>
    where
        E: From<AssertionFailed> + TryIntoAssertion,
    {
        let first_failure = match first(self) {
            Ok(result) => return Ok(result),
            Err(error) => error.try_into_assertion()?,
        };

        let mut other_failures = Vec::with_capacity(1 + more.len());
        for alternative in std::iter::once(second).chain(more.iter().copied()) {
            match alternative(self) {
                Ok(result) => return Ok(result),
                Err(error) => other_failures.push(error.try_into_assertion()?),
            }
        }

        debug!(
            pointer = %self.pointer,
            alternatives = other_failures.len() + 1,
            "no alternative matched"
        );
        Err(AssertionFailed::many(first_failure, other_failures).into())
    }

    // Validation and encoding

    /// Runs a validator over this value, then returns this value.
    ///
    /// # Errors
    ///
    /// Returns whatever the validator rejects this value with.
    pub fn validate<V>(&self, validator: &V) -> Result<&Self, Error>
    where
        V: Validator + ?Sized,
    {
        validator.validate(self)?;
        Ok(self)
    }

    /// Encodes this value as JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`CantEncode`] if the value nests deeper than
    /// `options.max_depth` or cannot be serialized.
    pub fn encode(&self, options: &EncodeOptions) -> Result<String, CantEncode> {
        if depth(self.node) > options.max_depth {
            return Err(CantEncode::depth_exceeded(options.max_depth));
        }

        let encoded = if options.pretty {
            serde_json::to_string_pretty(self.node)?
        } else {
            serde_json::to_string(self.node)?
        };

        trace!(pointer = %self.pointer, bytes = encoded.len(), "encoded value");
        Ok(encoded)
    }

    /// Encodes this value as indented, multi-line JSON text.
    pub fn pretty_print(&self) -> Result<String, CantEncode> {
        self.encode(&EncodeOptions::default().pretty())
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Value<'static>>();
    assert_sync::<Value<'static>>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn message<T: std::fmt::Debug>(result: AssertionResult<T>) -> String {
        result.unwrap_err().to_string()
    }

    #[test]
    fn test_field_on_non_object() {
        let node = json!(true);
        let value = Json::view(&node);

        assert_eq!(
            message(value.field("b")),
            "Expected $ to be an object, true given."
        );
        assert_eq!(
            message(value.opt_field("b")),
            "Expected $ to be an object, true given."
        );
    }

    #[test]
    fn test_missing_field_names_the_child_pointer() {
        let node = json!({"a": 1});
        let value = Json::view(&node);

        assert_eq!(
            message(value.field("b")),
            "Expected $.b to be present, none given."
        );
        assert!(!value.has_field("b").unwrap());
        assert!(value.has_field("a").unwrap());
    }

    #[test]
    fn test_nth_bounds() {
        let node = json!(["a", "b"]);
        let value = Json::view(&node);

        assert_eq!(value.nth(1).unwrap().string().unwrap(), "b");
        assert_eq!(value.nth(1).unwrap().pointer().to_string(), "$[1]");
        assert_eq!(
            message(value.nth(3)),
            "Expected $[3] to be present, none given."
        );
        assert!(value.has_nth(1).unwrap());
        assert!(!value.has_nth(2).unwrap());
    }

    #[test]
    fn test_int_truncates_toward_zero() {
        assert_eq!(Json::view(&json!(12.7)).int().unwrap(), 12);
        assert_eq!(Json::view(&json!(-12.7)).int().unwrap(), -12);
        assert_eq!(Json::view(&json!(u64::MAX)).int().unwrap(), i64::MAX);
    }

    #[test]
    fn test_children_outlive_parent_values() {
        let node = json!({"a": {"b": [1, 2]}});
        let b = Json::view(&node).field("a").unwrap().field("b").unwrap();

        assert_eq!(b.pointer().to_string(), "$.a.b");
        assert_eq!(b.nth(1).unwrap().int().unwrap(), 2);
    }

    #[test]
    fn test_into_optional_collapses_null() {
        assert!(Json::view(&json!(null)).into_optional().is_null());
        assert!(!Json::view(&json!(0)).into_optional().is_null());
    }
}
