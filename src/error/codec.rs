//! Decode, encode and configuration errors, and the crate-wide [`Error`].

use serde_json::error::Category;

use super::AssertionFailed;

/// Source text could not be decoded as JSON.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct CantDecode {
    /// The decoder's message.
    pub message: String,
    /// Machine-readable error code, one of the associated constants.
    pub code: i32,
}

impl CantDecode {
    /// Nesting exceeds the configured maximum depth.
    pub const DEPTH: i32 = 1;
    /// The text is not syntactically valid JSON, or ends prematurely.
    pub const SYNTAX: i32 = 4;
    /// The text is valid JSON the decoder refuses, e.g. a number out of range.
    pub const DATA: i32 = 5;
    /// Reading the source failed.
    pub const IO: i32 = 6;

    /// Creates a decode error.
    pub fn new(message: impl Into<String>, code: i32) -> Self {
        Self {
            message: message.into(),
            code,
        }
    }

    pub(crate) fn depth_exceeded(max_depth: usize) -> Self {
        Self::new(
            format!("Maximum stack depth of {} exceeded", max_depth),
            Self::DEPTH,
        )
    }
}

impl From<serde_json::Error> for CantDecode {
    fn from(error: serde_json::Error) -> Self {
        let code = match error.classify() {
            Category::Syntax | Category::Eof => Self::SYNTAX,
            Category::Data => Self::DATA,
            Category::Io => Self::IO,
        };
        Self::new(error.to_string(), code)
    }
}

/// A value could not be encoded as JSON text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct CantEncode {
    /// The encoder's message.
    pub message: String,
    /// Machine-readable error code, one of the associated constants.
    pub code: i32,
}

impl CantEncode {
    /// Nesting exceeds the configured maximum depth.
    pub const DEPTH: i32 = 1;
    /// The value has no JSON representation.
    pub const UNSUPPORTED: i32 = 8;

    /// Creates an encode error.
    pub fn new(message: impl Into<String>, code: i32) -> Self {
        Self {
            message: message.into(),
            code,
        }
    }

    pub(crate) fn depth_exceeded(max_depth: usize) -> Self {
        Self::new(
            format!("Maximum stack depth of {} exceeded", max_depth),
            Self::DEPTH,
        )
    }
}

impl From<serde_json::Error> for CantEncode {
    fn from(error: serde_json::Error) -> Self {
        Self::new(error.to_string(), Self::UNSUPPORTED)
    }
}

/// The API itself was misused: a programming error, not malformed input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct Runtime {
    /// What was misused and how.
    pub message: String,
}

impl Runtime {
    /// Creates a runtime error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Any error raised while decoding, navigating, validating or encoding.
///
/// Callbacks handed to accessors may return this type, and can wrap errors
/// of their own with [`Error::other`]. Only [`Error::AssertionFailed`]
/// takes part in `either` aggregation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    AssertionFailed(#[from] AssertionFailed),

    #[error(transparent)]
    CantDecode(#[from] CantDecode),

    #[error(transparent)]
    CantEncode(#[from] CantEncode),

    #[error(transparent)]
    Runtime(#[from] Runtime),

    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Wraps an arbitrary error raised by user code.
    pub fn other(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Error::Other(error.into())
    }

    /// Returns the assertion failure, if this is one.
    pub fn as_assertion(&self) -> Option<&AssertionFailed> {
        match self {
            Error::AssertionFailed(failure) => Some(failure),
            _ => None,
        }
    }
}

/// Separates assertion failures from every other kind of error.
///
/// `either` only recovers from errors for which this returns `Ok`; anything
/// else is handed back untouched and aborts the remaining alternatives.
pub trait TryIntoAssertion: Sized {
    /// Returns the assertion failure, or gives the error back.
    fn try_into_assertion(self) -> Result<AssertionFailed, Self>;
}

impl TryIntoAssertion for AssertionFailed {
    fn try_into_assertion(self) -> Result<AssertionFailed, Self> {
        Ok(self)
    }
}

impl TryIntoAssertion for Error {
    fn try_into_assertion(self) -> Result<AssertionFailed, Self> {
        match self {
            Error::AssertionFailed(failure) => Ok(failure),
            other => Err(other),
        }
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Error>();
    assert_sync::<Error>();
};
