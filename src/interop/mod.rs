//! Interoperability with external schema languages.
//!
//! This module provides [`JsonSchema`], a [`Validator`](crate::Validator)
//! backed by JSON Schema documents.

pub mod json_schema;

pub use json_schema::JsonSchema;
