use thiserror::Error;

/// Result type for ctorlint operations
pub type Result<T> = std::result::Result<T, Error>;

/// Internal-invariant failures of the validation pass.
///
/// These are never produced for well-formed-but-illegal input; illegal input
/// surfaces as [`crate::review::Violation`] diagnostics instead. An `Error`
/// aborts validation of the current body only, and the caller is expected to
/// continue with other constructors.
#[derive(Error, Debug)]
pub enum Error {
    #[error("malformed statement tree: {message}")]
    MalformedTree { message: String },

    #[error("statement nesting exceeds the supported depth of {limit}")]
    NestingTooDeep { limit: usize },
}

impl Error {
    /// Create a malformed-tree error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedTree { message: message.into() }
    }
}
