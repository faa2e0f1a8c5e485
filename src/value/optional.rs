//! The nullable accessor.

use chrono::{DateTime, FixedOffset, Utc};
use indexmap::IndexMap;
use serde_json::Value as JsonValue;

use super::{Alternative, Enumeration, Value};
use crate::error::{AssertionFailed, CantEncode, Error, TryIntoAssertion};
use crate::options::EncodeOptions;
use crate::path::JsonPath;
use crate::validation::Validator;
use crate::AssertionResult;

/// A JSON value that may be absent.
///
/// A missing field, an out of range index and an explicit `null` are all
/// absent. Operations on an absent value never fail: navigation yields
/// another absent value, terminals yield `Ok(None)` and callbacks are not
/// invoked. A present value delegates to [`Value`], so a present value of
/// the wrong shape fails exactly like the strict API would.
///
/// # Example
///
/// ```rust
/// use jsonprobe::Json;
///
/// let document = Json::parse(r#"{"user": {"nickname": null}}"#).unwrap();
/// let user = document.root().opt_field("user").unwrap();
///
/// assert_eq!(user.field("nickname").unwrap().string().unwrap(), None);
/// assert_eq!(user.field("address").unwrap().field("city").unwrap().pointer().to_string(), "$.user.address.city");
/// assert!(user.field("address").unwrap().field("city").unwrap().is_null());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OptionalValue<'a> {
    value: Option<Value<'a>>,
    pointer: JsonPath,
}

impl<'a> OptionalValue<'a> {
    pub(crate) fn new(value: Option<Value<'a>>, pointer: JsonPath) -> Self {
        Self {
            value: value.filter(|value| !value.is_null()),
            pointer,
        }
    }

    fn present<T, E>(
        &self,
        f: impl FnOnce(&Value<'a>) -> Result<T, E>,
    ) -> Result<Option<T>, E> {
        self.value.as_ref().map(f).transpose()
    }

    /// Where this value resides, or would reside if it were present.
    pub fn pointer(&self) -> &JsonPath {
        &self.pointer
    }

    /// The underlying node, if present.
    pub fn json(&self) -> Option<&'a JsonValue> {
        self.value.as_ref().map(Value::json)
    }

    /// The strict value, if present.
    pub fn value(&self) -> Option<&Value<'a>> {
        self.value.as_ref()
    }

    /// Returns the strict value, if present.
    pub fn into_value(self) -> Option<Value<'a>> {
        self.value
    }

    // Predicates

    /// Is this value absent or `null`?
    pub fn is_null(&self) -> bool {
        self.value.is_none()
    }

    /// Is this value a present object?
    pub fn is_object(&self) -> bool {
        self.value.as_ref().is_some_and(Value::is_object)
    }

    /// Is this value a present array?
    pub fn is_array(&self) -> bool {
        self.value.as_ref().is_some_and(Value::is_array)
    }

    /// Is this value a present number?
    pub fn is_number(&self) -> bool {
        self.value.as_ref().is_some_and(Value::is_number)
    }

    /// Is this value a present string?
    pub fn is_string(&self) -> bool {
        self.value.as_ref().is_some_and(Value::is_string)
    }

    /// Is this value a present boolean?
    pub fn is_bool(&self) -> bool {
        self.value.as_ref().is_some_and(Value::is_bool)
    }

    /// Is this value present and `true`?
    pub fn is_true(&self) -> bool {
        self.value.as_ref().is_some_and(Value::is_true)
    }

    /// Is this value present and `false`?
    pub fn is_false(&self) -> bool {
        self.value.as_ref().is_some_and(Value::is_false)
    }

    // Navigation

    /// Asserts this value is an object or absent, then returns the given
    /// field, absent if this value or the field is.
    pub fn field(&self, name: &str) -> AssertionResult<OptionalValue<'a>> {
        match &self.value {
            Some(value) => value.opt_field(name),
            None => Ok(OptionalValue::new(None, self.pointer.field(name))),
        }
    }

    /// Asserts this value is an array or absent, then returns the element at
    /// `n`, absent if this value or the element is.
    pub fn nth(&self, n: usize) -> AssertionResult<OptionalValue<'a>> {
        match &self.value {
            Some(value) => value.opt_nth(n),
            None => Ok(OptionalValue::new(None, self.pointer.index(n))),
        }
    }

    // Terminals

    /// See [`Value::int`].
    pub fn int(&self) -> AssertionResult<Option<i64>> {
        self.present(Value::int)
    }

    /// See [`Value::float`].
    pub fn float(&self) -> AssertionResult<Option<f64>> {
        self.present(Value::float)
    }

    /// See [`Value::string`].
    pub fn string(&self) -> AssertionResult<Option<&'a str>> {
        self.present(Value::string)
    }

    /// See [`Value::bool`].
    pub fn bool(&self) -> AssertionResult<Option<bool>> {
        self.present(Value::bool)
    }

    /// Asserts a present value is `true`.
    pub fn assert_true(&self) -> AssertionResult<Option<bool>> {
        self.present(Value::assert_true)
    }

    /// Asserts a present value is `false`.
    pub fn assert_false(&self) -> AssertionResult<Option<bool>> {
        self.present(Value::assert_false)
    }

    /// Asserts this value is `null` or absent. Since a present value is
    /// never `null`, this fails whenever one is present.
    pub fn null(&self) -> AssertionResult<()> {
        self.present(Value::null).map(|_| ())
    }

    /// See [`Value::date_time`].
    pub fn date_time(
        &self,
        format: &str,
        timezone: Option<FixedOffset>,
    ) -> AssertionResult<Option<DateTime<FixedOffset>>> {
        self.present(|value| value.date_time(format, timezone))
    }

    /// See [`Value::date`].
    pub fn date(&self, format: &str) -> AssertionResult<Option<DateTime<FixedOffset>>> {
        self.present(|value| value.date(format))
    }

    /// See [`Value::timestamp`].
    pub fn timestamp(&self) -> AssertionResult<Option<DateTime<Utc>>> {
        self.present(Value::timestamp)
    }

    /// See [`Value::base64`].
    pub fn base64(&self) -> AssertionResult<Option<Vec<u8>>> {
        self.present(Value::base64)
    }

    /// See [`Value::enumeration`].
    pub fn enumeration<T: Enumeration>(&self) -> Result<Option<T>, Error> {
        self.present(Value::enumeration::<T>)
    }

    // Iteration

    /// Maps over the elements of a present array. Absent yields `Ok(None)`,
    /// which is distinct from an empty array.
    pub fn array_map_with_index<T, E, F>(&self, f: F) -> Result<Option<Vec<T>>, E>
    where
        F: FnMut(usize, Value<'a>) -> Result<T, E>,
        E: From<AssertionFailed>,
    {
        self.present(|value| value.array_map_with_index(f))
    }

    /// Like [`OptionalValue::array_map_with_index`], without the index.
    pub fn array_map<T, E, F>(&self, f: F) -> Result<Option<Vec<T>>, E>
    where
        F: FnMut(Value<'a>) -> Result<T, E>,
        E: From<AssertionFailed>,
    {
        self.present(|value| value.array_map(f))
    }

    /// Maps over the members of a present object. Absent yields `Ok(None)`,
    /// which is distinct from an empty object.
    pub fn object_map_with_index<T, E, F>(&self, f: F) -> Result<Option<IndexMap<String, T>>, E>
    where
        F: FnMut(&'a str, Value<'a>) -> Result<T, E>,
        E: From<AssertionFailed>,
    {
        self.present(|value| value.object_map_with_index(f))
    }

    /// Like [`OptionalValue::object_map_with_index`], without the key.
    pub fn object_map<T, E, F>(&self, f: F) -> Result<Option<IndexMap<String, T>>, E>
    where
        F: FnMut(Value<'a>) -> Result<T, E>,
        E: From<AssertionFailed>,
    {
        self.present(|value| value.object_map(f))
    }

    // Combinators

    /// Applies `f` to a present value; `f` is not called when absent.
    pub fn apply<T, E, F>(&self, f: F) -> Result<Option<T>, E>
    where
        F: FnOnce(&Value<'a>) -> Result<T, E>,
    {
        self.present(f)
    }

    /// See [`Value::either`]. No alternative is tried when absent.
    pub fn either<T, E>(
        &self,
        first: Alternative<'_, 'a, T, E>,
        second: Alternative<'_, 'a, T, E>,
        more: &[Alternative<'_, 'a, T, E>],
    ) -> Result<Option<T>, E>
    where
        E: From<AssertionFailed> + TryIntoAssertion,
    {
        self.present(|value| value.either(first, second, more))
    }

    /// Runs a validator over a present value; absent values are not
    /// validated.
    pub fn validate<V>(&self, validator: &V) -> Result<&Self, Error>
    where
        V: Validator + ?Sized,
    {
        self.present(|value| value.validate(validator).map(|_| ()))?;
        Ok(self)
    }

    // Encoding

    /// Encodes a present value as JSON text, or returns `Ok(None)`.
    pub fn encode(&self, options: &EncodeOptions) -> Result<Option<String>, CantEncode> {
        self.present(|value| value.encode(options))
    }

    /// Encodes a present value as indented JSON text, or returns `Ok(None)`.
    pub fn pretty_print(&self) -> Result<Option<String>, CantEncode> {
        self.present(Value::pretty_print)
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<OptionalValue<'static>>();
    assert_sync::<OptionalValue<'static>>();
};

#[cfg(test)]
mod tests {
    use super::{AssertionFailed, Value};
    use crate::json::Json;
    use serde_json::json;

    #[test]
    fn test_absent_keeps_extending_the_pointer() {
        let node = json!({});
        let absent = Json::view(&node)
            .opt_field("a")
            .unwrap()
            .nth(2)
            .unwrap()
            .field("b")
            .unwrap();

        assert!(absent.is_null());
        assert_eq!(absent.pointer().to_string(), "$.a[2].b");
    }

    #[test]
    fn test_present_wrong_shape_fails_like_strict() {
        let node = json!({"a": "text"});
        let present = Json::view(&node).opt_field("a").unwrap();

        assert_eq!(
            present.int().unwrap_err().to_string(),
            "Expected $.a to be a number, string given."
        );
        assert_eq!(
            present.field("b").unwrap_err().to_string(),
            "Expected $.a to be an object, string given."
        );
    }

    #[test]
    fn test_absent_map_is_not_empty_collection() {
        let node = json!({"empty": []});
        let root = Json::view(&node);

        let absent: Option<Vec<i64>> = root
            .opt_field("missing")
            .unwrap()
            .array_map(|v| v.int())
            .unwrap();
        let empty: Option<Vec<i64>> = root
            .opt_field("empty")
            .unwrap()
            .array_map(|v| v.int())
            .unwrap();

        assert_eq!(absent, None);
        assert_eq!(empty, Some(Vec::new()));
    }

    #[test]
    fn test_null_on_present_value_fails() {
        let node = json!([1]);
        let present = Json::view(&node).opt_nth(0).unwrap();

        assert_eq!(
            present.null().unwrap_err().to_string(),
            "Expected $[0] to be null, number given."
        );
    }

    #[test]
    fn test_validate_chains_on_present_and_absent() {
        fn positive(json: &Value<'_>) -> Result<(), AssertionFailed> {
            match json.int()? {
                n if n > 0 => Ok(()),
                _ => Err(AssertionFailed::new(format!("Expected {} to be positive.", json.pointer()))),
            }
        }

        let node = json!({"count": 3, "debt": -1});
        let root = Json::view(&node);

        let count = root.opt_field("count").unwrap();
        assert_eq!(count.validate(&positive).unwrap().int().unwrap(), Some(3));

        let missing = root.opt_field("missing").unwrap();
        assert!(missing.validate(&positive).unwrap().is_null());

        let debt = root.opt_field("debt").unwrap();
        assert_eq!(
            debt.validate(&positive).unwrap_err().to_string(),
            "Expected $.debt to be positive."
        );
    }
}
