//! Error types for value codecs.

use thiserror::Error;

/// Errors produced when converting between record payloads and value types.
#[derive(Debug, Error)]
pub enum GridValueError {
    /// A fixed-width frame was given fewer values than its minimum.
    #[error("{keyword} given too few values, {got} < {expected}")]
    TooFewValues {
        keyword: &'static str,
        got: usize,
        expected: usize,
    },

    /// A token did not match any variant of the target enum.
    #[error("unknown {expected} token {token:?}")]
    InvalidEnumValue {
        expected: &'static str,
        token: String,
    },

    /// A payload had the wrong shape or element type for its keyword.
    #[error("incorrect values for {keyword}: {message}")]
    IncorrectValues {
        keyword: &'static str,
        message: String,
    },
}

impl GridValueError {
    /// Create an IncorrectValues error.
    pub fn incorrect(keyword: &'static str, message: impl Into<String>) -> Self {
        Self::IncorrectValues {
            keyword,
            message: message.into(),
        }
    }
}

/// Result type alias for value codec operations.
pub type Result<T> = std::result::Result<T, GridValueError>;
