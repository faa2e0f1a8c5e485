//! Decoder and encoder configuration.

/// Nesting limit applied when none is configured.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Options for [`Json::parse_with`](crate::Json::parse_with).
///
/// # Example
///
/// ```rust
/// use jsonprobe::{Json, ParseOptions};
///
/// let options = ParseOptions::default().with_max_depth(2);
///
/// assert!(Json::parse_with("[1]", &options).is_ok());
/// assert!(Json::parse_with("[[1]]", &options).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum nesting depth; a scalar has depth 1, each array or object
    /// around it adds one.
    pub max_depth: usize,
}

impl ParseOptions {
    /// Sets the maximum nesting depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Options for [`Value::encode`](crate::Value::encode).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Indent the output over multiple lines.
    pub pretty: bool,
    /// Maximum nesting depth, counted as for [`ParseOptions`].
    pub max_depth: usize,
}

impl EncodeOptions {
    /// Enables multi-line, indented output.
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Sets the maximum nesting depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            pretty: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
