//! Error types for folio
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! Validation errors (cursor, params) are raised before any round trip is
//! issued. Failures from a [`DocumentSource`](crate::source::DocumentSource)
//! or an item transformer are carried through untouched.

use thiserror::Error;

/// Boxed error produced by a collaborator (document source, transformer)
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The main error type for folio
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Request Errors
    // ============================================================================
    #[error("Invalid cursor: {cursor}")]
    InvalidCursor { cursor: String },

    #[error("Unsupported params type: {message}")]
    UnsupportedParamsType { message: String },

    #[error("Invalid value for '{field}': {message}")]
    InvalidParam { field: String, message: String },

    // ============================================================================
    // Upstream Errors
    // ============================================================================
    #[error(transparent)]
    Upstream(BoxError),

    #[error(transparent)]
    Transformer(BoxError),

    #[error("Transformer returned {actual} items, expected {expected}")]
    TransformerLength { expected: usize, actual: usize },

    // ============================================================================
    // Document Errors
    // ============================================================================
    #[error("Document has no usable key in field '{field}'")]
    MissingKey { field: String },

    #[error("Failed to decode document: {0}")]
    Decode(#[from] bson::de::Error),

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create an invalid cursor error
    pub fn invalid_cursor(cursor: impl Into<String>) -> Self {
        Self::InvalidCursor {
            cursor: cursor.into(),
        }
    }

    /// Create an unsupported params error
    pub fn unsupported_params(message: impl Into<String>) -> Self {
        Self::UnsupportedParamsType {
            message: message.into(),
        }
    }

    /// Create an invalid param error
    pub fn invalid_param(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParam {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Wrap a document source failure
    pub fn upstream(err: impl Into<BoxError>) -> Self {
        Self::Upstream(err.into())
    }

    /// Wrap an item transformer failure
    pub fn transformer(err: impl Into<BoxError>) -> Self {
        Self::Transformer(err.into())
    }

    /// Create a missing key error
    pub fn missing_key(field: impl Into<String>) -> Self {
        Self::MissingKey {
            field: field.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Check if this error was caused by the caller's input
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::InvalidCursor { .. } | Error::InvalidParam { .. })
    }
}

/// Result type alias for folio
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_cursor("prev_nope");
        assert_eq!(err.to_string(), "Invalid cursor: prev_nope");

        let err = Error::invalid_param("size", "must be greater than 0");
        assert_eq!(err.to_string(), "Invalid value for 'size': must be greater than 0");

        let err = Error::TransformerLength {
            expected: 3,
            actual: 2,
        };
        assert_eq!(err.to_string(), "Transformer returned 2 items, expected 3");
    }

    #[test]
    fn test_upstream_is_transparent() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "socket closed");
        let err = Error::upstream(io);
        assert_eq!(err.to_string(), "socket closed");
        assert!(std::error::Error::source(&err).is_none());
    }

    #[test]
    fn test_anyhow_conversion() {
        let err: Error = anyhow::anyhow!("lookup failed").into();
        assert!(matches!(err, Error::Anyhow(_)));
        assert_eq!(err.to_string(), "lookup failed");
    }

    #[test]
    fn test_is_client_error() {
        assert!(Error::invalid_cursor("x").is_client_error());
        assert!(Error::invalid_param("limit", "too big").is_client_error());

        assert!(!Error::unsupported_params("neither").is_client_error());
        assert!(!Error::upstream("boom").is_client_error());
        assert!(!Error::transformer("boom").is_client_error());
        assert!(!Error::config("bad").is_client_error());
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));
    }
}
