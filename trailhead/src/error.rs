//! Error types for configuration, session storage and client setup
//!
//! Failures of individual backend calls are described by
//! [`ApiError`](crate::client::ApiError); this module covers everything
//! around them and wraps `ApiError` when a caller wants a single error type.

use thiserror::Error;

use crate::client::ApiError;

/// Result type alias using the crate error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the crate
///
/// Large error variants are boxed to reduce stack size
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),

    /// The configured backend base URL could not be parsed
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// The rejected URL
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// The HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    /// Session storage could not be read or written
    #[error("Session storage error: {0}")]
    Session(String),

    /// Tracing subscriber could not be installed
    #[error("Logging error: {0}")]
    Logging(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A backend call failed
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl Error {
    /// Whether this error means the stored credential was rejected
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Api(e) if e.is_unauthorized())
    }
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(Box::new(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Session(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ApiErrorKind, ApiOperation};

    #[test]
    fn test_invalid_base_url_display() {
        let err = Error::InvalidBaseUrl {
            url: "not a url".to_string(),
            reason: "relative URL without a base".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid base URL 'not a url': relative URL without a base"
        );
    }

    #[test]
    fn test_api_error_is_transparent() {
        let api = ApiError::new(
            ApiOperation::List,
            ApiErrorKind::Business,
            "Mountain not found",
        );
        let err: Error = api.into();
        assert!(err.to_string().contains("Mountain not found"));
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn test_is_unauthorized() {
        let api = ApiError::new(ApiOperation::Get, ApiErrorKind::Unauthorized, "expired");
        assert!(Error::from(api).is_unauthorized());
        assert!(!Error::Session("disk full".to_string()).is_unauthorized());
    }
}
