//! Error types for lexicon-llm

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using [`LexiconError`]
pub type Result<T> = std::result::Result<T, LexiconError>;

/// Boxed cause attached to connection failures
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for lexicon-llm
#[derive(Debug, Error)]
pub enum LexiconError {
    /// The chat context does not end in a usable user turn
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Any failure while talking to the remote chatbot or handling its reply
    #[error("API connection error: {message}")]
    ApiConnection {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// Configuration parse error
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// Configuration validation error
    #[error("Invalid configuration: {0}")]
    ConfigValidation(String),
}

impl LexiconError {
    /// Wrap an underlying failure as a connection error, keeping it as the source
    pub fn connection<E>(message: impl Into<String>, source: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::ApiConnection {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Check if this is an argument error
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Check if this is a connection error
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::ApiConnection { .. })
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_connection_error_keeps_source() {
        let cause = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = LexiconError::connection("request failed", cause);

        assert!(err.is_connection());
        assert_eq!(err.to_string(), "API connection error: request failed");
        assert_eq!(err.source().unwrap().to_string(), "refused");
    }

    #[test]
    fn test_invalid_argument_display() {
        let err = LexiconError::InvalidArgument("no user turn".into());
        assert!(err.is_invalid_argument());
        assert!(!err.is_connection());
        assert_eq!(err.to_string(), "Invalid argument: no user turn");
    }
}
