//! Symbolic pointers into a JSON tree.
//!
//! This module provides [`JsonPath`] and [`PathSegment`], the JSONPath-like
//! pointers (`$`, `$.users[0].email`) carried by every accessor and quoted in
//! every assertion failure.

use std::fmt::{self, Display};

/// A single navigation step.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Object member access, rendered as `.name`.
    Field(String),
    /// Array element access, rendered as `[n]`.
    Index(usize),
}

/// A pointer from the root of a JSON tree to one of its nodes.
///
/// Paths are immutable: [`field`](JsonPath::field) and
/// [`index`](JsonPath::index) return a new path and leave the original
/// untouched, so sibling accessors can branch off a shared parent.
///
/// # Example
///
/// ```rust
/// use jsonprobe::JsonPath;
///
/// let path = JsonPath::root()
///     .field("users")
///     .index(0)
///     .field("email");
///
/// assert_eq!(path.to_string(), "$.users[0].email");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct JsonPath {
    segments: Vec<PathSegment>,
}

impl JsonPath {
    /// The root pointer, `$`.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new path with `.name` appended.
    pub fn field(&self, name: impl Into<String>) -> Self {
        self.with(PathSegment::Field(name.into()))
    }

    /// Returns a new path with `[n]` appended.
    pub fn index(&self, n: usize) -> Self {
        self.with(PathSegment::Index(n))
    }

    fn with(&self, segment: PathSegment) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(segment);
        Self { segments }
    }

    /// Returns true if this is the root pointer.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of steps from the root.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this path has no steps, i.e. it is the root.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the steps, root first.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }
}

impl Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.segments {
            match segment {
                PathSegment::Field(name) => write!(f, ".{}", name)?,
                PathSegment::Index(n) => write!(f, "[{}]", n)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_renders_as_dollar() {
        let path = JsonPath::root();
        assert!(path.is_root());
        assert!(path.is_empty());
        assert_eq!(path.len(), 0);
        assert_eq!(path.to_string(), "$");
    }

    #[test]
    fn test_field_then_index() {
        let path = JsonPath::root().field("users").index(0);
        assert_eq!(path.to_string(), "$.users[0]");
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn test_index_at_root() {
        assert_eq!(JsonPath::root().index(3).to_string(), "$[3]");
    }

    #[test]
    fn test_branches_share_nothing() {
        let base = JsonPath::root().field("items");
        let first = base.index(0);
        let second = base.index(1);

        assert_eq!(base.to_string(), "$.items");
        assert_eq!(first.to_string(), "$.items[0]");
        assert_eq!(second.to_string(), "$.items[1]");
    }

    #[test]
    fn test_segments_in_order() {
        let path = JsonPath::root().field("a").index(1).field("b");
        let segments: Vec<_> = path.segments().collect();

        assert_eq!(
            segments,
            vec![
                &PathSegment::Field("a".to_string()),
                &PathSegment::Index(1),
                &PathSegment::Field("b".to_string()),
            ]
        );
    }

    #[test]
    fn test_equality() {
        let a = JsonPath::root().field("a").index(0);
        let b = JsonPath::root().field("a").index(0);
        let c = JsonPath::root().field("a").index(1);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
