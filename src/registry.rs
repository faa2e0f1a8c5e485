//! Repository of JSON Schemas addressed by slug.
//!
//! This module provides the [`SchemaRepository`] type that stores schemas
//! under short names and lets them refer to one another by URI.

use indexmap::IndexMap;
use parking_lot::RwLock;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tracing::debug;

use crate::error::{Error, Runtime};
use crate::interop::JsonSchema;
use crate::json::Document;
use crate::validation::Validator;
use crate::value::Value;

struct Entry {
    document: JsonValue,
    schema: Arc<JsonSchema>,
}

/// Type alias for the schema storage map, in registration order.
type SchemaMap = Arc<RwLock<IndexMap<String, Entry>>>;

/// A thread-safe repository of named JSON Schemas.
///
/// Each schema is identified by its slug appended to the repository's base
/// URI. A schema may `$ref` any schema registered before it by that URI.
///
/// # Thread Safety
///
/// The repository uses `Arc<RwLock<...>>` for thread-safe access:
/// - Multiple threads can validate concurrently (read-only access)
/// - Registration operations are serialized (write access)
///
/// Clones share the same storage.
///
/// # Example
///
/// ```rust
/// use jsonprobe::SchemaRepository;
/// use serde_json::json;
///
/// let repository = SchemaRepository::new("https://example.com/schemas/");
///
/// repository.register("id", &json!({"type": "integer", "minimum": 1})).unwrap();
/// repository.register("user", &json!({
///     "type": "object",
///     "properties": {"id": {"$ref": "https://example.com/schemas/id"}},
///     "required": ["id"]
/// })).unwrap();
///
/// assert!(repository.parse("user", r#"{"id": 7}"#).is_ok());
/// assert!(repository.parse("user", r#"{"id": 0}"#).is_err());
/// ```
#[derive(Clone)]
pub struct SchemaRepository {
    base_uri: String,
    schemas: SchemaMap,
}

impl SchemaRepository {
    /// Creates an empty repository whose schemas live under `base_uri`.
    pub fn new(base_uri: impl Into<String>) -> Self {
        Self {
            base_uri: base_uri.into(),
            schemas: Arc::new(RwLock::new(IndexMap::new())),
        }
    }

    /// The URI prefix shared by every schema in this repository.
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// The URI identifying the schema registered under `slug`.
    pub fn reference(&self, slug: &str) -> String {
        format!("{}{}", self.base_uri, slug)
    }

    /// Compiles and stores a schema under the given slug.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateSlug` if the slug is already taken and
    /// `RegistryError::InvalidSchema` if the schema does not compile.
    pub fn register(&self, slug: impl Into<String>, schema: &JsonValue) -> Result<(), RegistryError> {
        let slug = slug.into();
        let mut schemas = self.schemas.write();

        if schemas.contains_key(&slug) {
            return Err(RegistryError::DuplicateSlug(slug));
        }

        let references: Vec<(String, &JsonValue)> = schemas
            .iter()
            .map(|(known, entry)| (self.reference(known), &entry.document))
            .collect();

        let compiled = JsonSchema::compile(
            self.reference(&slug),
            schema,
            references.iter().map(|(uri, document)| (uri.as_str(), *document)),
        )
        .map_err(|source| RegistryError::InvalidSchema {
            slug: slug.clone(),
            source,
        })?;

        debug!(slug = %slug, reference = %compiled.reference(), "registered JSON Schema");

        schemas.insert(
            slug,
            Entry {
                document: schema.clone(),
                schema: Arc::new(compiled),
            },
        );
        Ok(())
    }

    /// Retrieves a schema by slug.
    pub fn get(&self, slug: &str) -> Option<Arc<JsonSchema>> {
        self.schemas
            .read()
            .get(slug)
            .map(|entry| Arc::clone(&entry.schema))
    }

    /// Returns true if a schema is registered under `slug`.
    pub fn contains(&self, slug: &str) -> bool {
        self.schemas.read().contains_key(slug)
    }

    /// Returns the registered slugs in registration order.
    pub fn slugs(&self) -> Vec<String> {
        self.schemas.read().keys().cloned().collect()
    }

    /// Returns the number of registered schemas.
    pub fn len(&self) -> usize {
        self.schemas.read().len()
    }

    /// Returns true if no schema is registered.
    pub fn is_empty(&self) -> bool {
        self.schemas.read().is_empty()
    }

    /// Validates a value against the schema registered under `slug`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Runtime`] if no such schema exists, otherwise whatever
    /// the schema rejects the value with.
    pub fn validate(&self, slug: &str, json: &Value<'_>) -> Result<(), Error> {
        self.lookup(slug)?.validate(json)
    }

    /// Decodes text, then validates the root against the schema registered
    /// under `slug`.
    pub fn parse(&self, slug: &str, source: &str) -> Result<Document, Error> {
        self.lookup(slug)?.parse(source)
    }

    fn lookup(&self, slug: &str) -> Result<Arc<JsonSchema>, Runtime> {
        self.get(slug).ok_or_else(|| {
            Runtime::new(format!(
                "No JSON Schema registered as {}",
                self.reference(slug)
            ))
        })
    }
}

/// Errors that can occur during repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Attempted to register a schema under a slug that already exists.
    #[error("schema '{0}' already registered")]
    DuplicateSlug(String),

    /// The schema could not be compiled.
    #[error("schema '{slug}' is invalid: {source}")]
    InvalidSchema {
        slug: String,
        #[source]
        source: Runtime,
    },
}
