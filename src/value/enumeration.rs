//! Lookup of enumeration constants by their JSON representation.

use std::fmt::{self, Display};

use serde_json::Value as JsonValue;

use super::Value;
use crate::error::{AssertionFailed, Error, Runtime};

/// How the cases of an [`Enumeration`] are represented in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumRepr {
    String,
    Integer,
}

impl Display for EnumRepr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnumRepr::String => write!(f, "string"),
            EnumRepr::Integer => write!(f, "integer"),
        }
    }
}

/// The JSON representation of a single enumeration case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumKey {
    String(&'static str),
    Integer(i64),
}

impl EnumKey {
    /// Which representation this key belongs to.
    pub fn repr(&self) -> EnumRepr {
        match self {
            EnumKey::String(_) => EnumRepr::String,
            EnumKey::Integer(_) => EnumRepr::Integer,
        }
    }

    fn matches(&self, node: &JsonValue) -> bool {
        match self {
            EnumKey::String(key) => node.as_str() == Some(*key),
            EnumKey::Integer(key) => node.as_i64() == Some(*key),
        }
    }
}

impl Display for EnumKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnumKey::String(key) => write!(f, "{}", key),
            EnumKey::Integer(key) => write!(f, "{}", key),
        }
    }
}

/// A closed set of constants, each backed by a string or an integer.
///
/// # Example
///
/// ```rust
/// use jsonprobe::{EnumKey, EnumRepr, Enumeration, Json};
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// enum Suit {
///     Hearts,
///     Spades,
/// }
///
/// impl Enumeration for Suit {
///     const REPR: EnumRepr = EnumRepr::String;
///
///     fn cases() -> Vec<(EnumKey, Self)> {
///         vec![
///             (EnumKey::String("H"), Suit::Hearts),
///             (EnumKey::String("S"), Suit::Spades),
///         ]
///     }
/// }
///
/// let document = Json::parse(r#""S""#).unwrap();
/// assert_eq!(document.root().enumeration::<Suit>().unwrap(), Suit::Spades);
/// ```
pub trait Enumeration: Sized {
    /// Representation shared by every case.
    const REPR: EnumRepr;

    /// All cases with their keys, in declaration order.
    fn cases() -> Vec<(EnumKey, Self)>;
}

impl<'a> Value<'a> {
    /// Asserts this value is the representation of one of `T`'s cases, then
    /// returns that case.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::AssertionFailed`] if this value has the wrong type
    /// or matches no case; when there are cases, the failure aggregates one
    /// message per case. Fails with [`Error::Runtime`] if `T` declares a case
    /// whose key does not match [`Enumeration::REPR`].
    pub fn enumeration<T: Enumeration>(&self) -> Result<T, Error> {
        let cases = T::cases();

        if let Some((key, _)) = cases.iter().find(|(key, _)| key.repr() != T::REPR) {
            return Err(Runtime::new(format!(
                "Enumeration {} is backed by {} values, but declares case '{}' as {}.",
                std::any::type_name::<T>(),
                T::REPR,
                key,
                key.repr()
            ))
            .into());
        }

        let given = match T::REPR {
            EnumRepr::String => self.string()?.to_string(),
            EnumRepr::Integer => self.integral()?.to_string(),
        };

        let mut failures = Vec::with_capacity(cases.len());
        for (key, case) in cases {
            if key.matches(self.node) {
                return Ok(case);
            }
            failures.push(AssertionFailed::new(format!(
                "Expected {} to be enumeration constant '{}', '{}' given.",
                self.pointer, key, given
            )));
        }

        let mut failures = failures.into_iter();
        let failure = match failures.next() {
            Some(first) => AssertionFailed::many(first, failures),
            None => AssertionFailed::new(format!(
                "Expected field {} to be enumeration constant '{}', \
                 but the enumeration itself is empty.",
                self.pointer, given
            )),
        };

        Err(failure.into())
    }

    fn integral(&self) -> Result<i64, AssertionFailed> {
        self.node
            .as_i64()
            .ok_or_else(|| self.mismatch("a(n) integer"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::Json;
    use serde_json::json;

    #[derive(Debug, PartialEq)]
    enum Empty {}

    impl Enumeration for Empty {
        const REPR: EnumRepr = EnumRepr::String;

        fn cases() -> Vec<(EnumKey, Self)> {
            Vec::new()
        }
    }

    #[derive(Debug, PartialEq)]
    enum Misdeclared {
        One,
    }

    impl Enumeration for Misdeclared {
        const REPR: EnumRepr = EnumRepr::Integer;

        fn cases() -> Vec<(EnumKey, Self)> {
            vec![(EnumKey::String("one"), Misdeclared::One)]
        }
    }

    #[test]
    fn test_empty_enumeration() {
        let node = json!("anything");
        let error = Json::view(&node).enumeration::<Empty>().unwrap_err();

        assert_eq!(
            error.to_string(),
            "Expected field $ to be enumeration constant 'anything', \
             but the enumeration itself is empty."
        );
    }

    #[test]
    fn test_misdeclared_key_is_a_runtime_error() {
        let node = json!(1);
        let error = Json::view(&node).enumeration::<Misdeclared>().unwrap_err();

        assert!(matches!(error, Error::Runtime(_)));
    }

    #[test]
    fn test_key_display() {
        assert_eq!(EnumKey::String("red").to_string(), "red");
        assert_eq!(EnumKey::Integer(-4).to_string(), "-4");
    }
}
