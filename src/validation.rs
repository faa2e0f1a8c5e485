//! The validator capability.
//!
//! This module provides the [`Validator`] trait: anything that can accept or
//! reject a [`Value`], and by extension decode and validate text in one step.

use crate::error::{AssertionFailed, Error};
use crate::json::{Document, Json};
use crate::options::ParseOptions;
use crate::value::Value;

/// Accepts or rejects values.
///
/// The `Send + Sync` bounds allow validators to be shared across threads and
/// stored as trait objects like `Box<dyn Validator>`.
///
/// Plain functions and closures from `&Value` to
/// `Result<(), AssertionFailed>` are validators.
///
/// # Example
///
/// ```rust
/// use jsonprobe::{AssertionFailed, Validator, Value};
///
/// fn non_empty(value: &Value<'_>) -> Result<(), AssertionFailed> {
///     if value.string()?.is_empty() {
///         return Err(AssertionFailed::new(format!("Expected {} to be non-empty.", value.pointer())));
///     }
///     Ok(())
/// }
///
/// assert!(non_empty.parse(r#""hello""#).is_ok());
/// assert_eq!(
///     non_empty.parse(r#""""#).unwrap_err().to_string(),
///     "Expected $ to be non-empty."
/// );
/// ```
pub trait Validator: Send + Sync {
    /// Checks a value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AssertionFailed`] if the value is rejected.
    fn validate(&self, json: &Value<'_>) -> Result<(), Error>;

    /// Decodes text with the default [`ParseOptions`], then validates the
    /// root value.
    fn parse(&self, source: &str) -> Result<Document, Error> {
        self.parse_with(source, &ParseOptions::default())
    }

    /// Decodes text, then validates the root value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CantDecode`] if the text is not valid JSON, or
    /// whatever [`validate`](Self::validate) rejects the root with.
    fn parse_with(&self, source: &str, options: &ParseOptions) -> Result<Document, Error> {
        let document = Json::parse_with(source, options)?;
        self.validate(&document.root())?;
        Ok(document)
    }
}

impl<F> Validator for F
where
    F: Fn(&Value<'_>) -> Result<(), AssertionFailed> + Send + Sync,
{
    fn validate(&self, json: &Value<'_>) -> Result<(), Error> {
        self(json).map_err(Error::from)
    }
}
