//! # jsonprobe
//!
//! A defensive layer for reading JSON of unknown shape: every accessor asserts
//! the shape it needs and, when the data disagrees, fails with a message that
//! says exactly where and how.
//!
//! ## Overview
//!
//! Decoded JSON is navigated through accessors that carry a pointer to their
//! position in the document. Shape mismatches surface as [`AssertionFailed`]
//! errors such as `Expected $.users[0].age to be a number, string given.`
//! Data that may be missing is read through [`OptionalValue`], and data that
//! may take one of several shapes through [`Value::either`], which reports
//! every alternative that failed.
//!
//! ## Core Types
//!
//! - [`Json`]: Entry point for decoding text into a [`Document`]
//! - [`Value`]: Strict accessor for a node at a [`JsonPath`]
//! - [`OptionalValue`]: Accessor for a node that may be absent or null
//! - [`AssertionFailed`]: A shape mismatch, possibly aggregating several
//! - [`Validator`]: Anything that can accept or reject a value
//!
//! ## Example
//!
//! ```rust
//! use jsonprobe::{AssertionFailed, Json, Value};
//!
//! #[derive(Debug, PartialEq)]
//! struct User<'a> {
//!     name: &'a str,
//!     age: Option<i64>,
//! }
//!
//! fn user<'a>(json: &Value<'a>) -> Result<User<'a>, AssertionFailed> {
//!     Ok(User {
//!         name: json.field("name")?.string()?,
//!         age: json.opt_field("age")?.int()?,
//!     })
//! }
//!
//! let document = Json::parse(r#"{"name": "Alice"}"#).unwrap();
//! assert_eq!(document.root().apply(user).unwrap(), User { name: "Alice", age: None });
//!
//! let document = Json::parse(r#"{"name": "Bob", "age": "old"}"#).unwrap();
//! assert_eq!(
//!     document.root().apply(user).unwrap_err().to_string(),
//!     "Expected $.age to be a number, string given."
//! );
//! ```

pub mod error;
pub mod json;
pub mod options;
pub mod path;
pub mod validation;
pub mod value;

#[cfg(feature = "json-schema")]
pub mod interop;
#[cfg(feature = "json-schema")]
pub mod registry;

pub use error::{
    AssertionFailed, CantDecode, CantEncode, Error, ManyAssertionsFailed, Runtime,
    TryIntoAssertion,
};
pub use json::{Document, Json};
pub use options::{EncodeOptions, ParseOptions, DEFAULT_MAX_DEPTH};
pub use path::{JsonPath, PathSegment};
pub use validation::Validator;
pub use value::{formats, Alternative, EnumKey, EnumRepr, Enumeration, OptionalValue, Value};

#[cfg(feature = "json-schema")]
pub use interop::JsonSchema;
#[cfg(feature = "json-schema")]
pub use registry::{RegistryError, SchemaRepository};

/// Type alias for the result of a single assertion.
pub type AssertionResult<T> = Result<T, AssertionFailed>;
