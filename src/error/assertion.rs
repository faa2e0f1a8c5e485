//! Assertion failures.
//!
//! This module provides [`AssertionFailed`], raised whenever a value does not
//! have the shape an accessor requires, and [`ManyAssertionsFailed`], the
//! aggregate produced when every alternative of a choice failed.

use std::fmt::{self, Display};

use stillwater::prelude::*;

const INDENT: &str = "    ";

/// A structural mismatch between a JSON value and what was expected of it.
///
/// A failure is either a single pre-rendered message, or an aggregate of
/// failures collected from alternatives that were tried one after another.
/// Aggregates nest: an alternative may itself have failed with an aggregate.
///
/// # Example
///
/// ```rust
/// use jsonprobe::AssertionFailed;
///
/// let failure = AssertionFailed::many(
///     AssertionFailed::new("Expected $ to be a number, string given."),
///     [AssertionFailed::new("Expected $ to be an array, string given.")],
/// );
///
/// assert_eq!(
///     failure.to_string(),
///     "Expected any of the following:\n\
///      \x20   - Expected $ to be a number, string given.\n\
///      \x20   - Expected $ to be an array, string given."
/// );
/// ```
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AssertionFailed {
    /// A single failed assertion.
    #[error("{message}")]
    Single {
        /// Message naming the pointer, the expectation and what was found.
        message: String,
    },
    /// Several failed alternatives.
    #[error("{0}")]
    Many(Box<ManyAssertionsFailed>),
}

impl AssertionFailed {
    /// Creates a single failure with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        AssertionFailed::Single {
            message: message.into(),
        }
    }

    /// Combines failures into one aggregate, keeping their order.
    pub fn many(first: AssertionFailed, others: impl IntoIterator<Item = AssertionFailed>) -> Self {
        AssertionFailed::Many(Box::new(ManyAssertionsFailed::new(first, others)))
    }

    /// Returns true if this failure aggregates other failures.
    pub fn is_many(&self) -> bool {
        matches!(self, AssertionFailed::Many(_))
    }

    /// Returns the rendered message.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// A non-empty, ordered collection of failed alternatives.
///
/// Construction never reorders. Rendering lists single failures before nested
/// aggregates, otherwise keeping the original order, and indents each level
/// of nesting by four spaces.
#[derive(Debug, Clone, PartialEq)]
pub struct ManyAssertionsFailed(NonEmptyVec<AssertionFailed>);

impl ManyAssertionsFailed {
    /// Creates an aggregate from a first failure and any number of others.
    pub fn new(first: AssertionFailed, others: impl IntoIterator<Item = AssertionFailed>) -> Self {
        let failures = others
            .into_iter()
            .fold(NonEmptyVec::singleton(first), |failures, next| {
                failures.combine(NonEmptyVec::singleton(next))
            });
        Self(failures)
    }

    /// Returns the first failure.
    pub fn first(&self) -> &AssertionFailed {
        self.0.head()
    }

    /// Returns the failures after the first one.
    pub fn others(&self) -> impl Iterator<Item = &AssertionFailed> {
        self.0.iter().skip(1)
    }

    /// Returns every failure in construction order.
    pub fn failed_assertions(&self) -> impl Iterator<Item = &AssertionFailed> {
        self.0.iter()
    }

    /// Splits into the first failure and the rest.
    pub fn uncons(self) -> (AssertionFailed, Vec<AssertionFailed>) {
        let mut failures = self.0.into_vec();
        let others = failures.split_off(1);
        let first = failures.remove(0);
        (first, others)
    }

    /// Returns the number of direct children.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false: an aggregate holds at least one failure.
    pub fn is_empty(&self) -> bool {
        false
    }

    fn write_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        write!(
            f,
            "{}{}Expected any of the following:",
            INDENT.repeat(depth),
            if depth > 0 { "- " } else { "" }
        )?;

        let (single, nested): (Vec<_>, Vec<_>) =
            self.0.iter().partition(|failure| !failure.is_many());

        for failure in single.into_iter().chain(nested) {
            writeln!(f)?;
            match failure {
                AssertionFailed::Single { message } => {
                    write!(f, "{}- {}", INDENT.repeat(depth + 1), message)?
                }
                AssertionFailed::Many(many) => many.write_tree(f, depth + 1)?,
            }
        }

        Ok(())
    }
}

impl Display for ManyAssertionsFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_tree(f, 0)
    }
}

impl std::error::Error for ManyAssertionsFailed {}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<AssertionFailed>();
    assert_sync::<AssertionFailed>();
};
