//! Error types.

use thiserror::Error;

/// Errors a row source can surface while materializing the collection.
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    /// The provider could not deliver the collection.
    #[error("source unavailable: {0}")]
    Unavailable(String),

    /// The provider delivered data the row type cannot represent.
    #[error("malformed source data: {0}")]
    Malformed(String),
}

impl SourceError {
    /// Create an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    /// Create a malformed-data error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }
}
