//! Failures of individual backend calls
//!
//! Every resource call resolves to an [`ApiResult`]. The error records which
//! operation failed, on which resource and record, and why, in the shape of
//! a structured operation/kind/message error.
//!
//! # Example
//!
//! ```rust
//! use trailhead::client::{ApiError, ApiErrorKind, ApiOperation};
//!
//! let error = ApiError::new(ApiOperation::Get, ApiErrorKind::Business, "Mountain not found")
//!     .with_resource("mountains")
//!     .with_id(12)
//!     .with_status(404);
//! assert_eq!(error.message, "Mountain not found");
//! assert!(!error.is_retriable());
//! ```

use std::fmt;

use crate::listing::RecordId;

/// Result of a backend call
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Shown when neither the backend nor the transport said anything useful
pub const FALLBACK_MESSAGE: &str = "Something went wrong. Please try again later.";

/// Resource operation being performed when the call failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiOperation {
    /// `GET /{resource}`
    List,
    /// `GET /{resource}/{id}`
    Get,
    /// `POST /{resource}`
    Create,
    /// `PUT /{resource}/{id}`
    Update,
    /// `DELETE /{resource}/{id}`
    Delete,
}

impl fmt::Display for ApiOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List => write!(f, "list"),
            Self::Get => write!(f, "get"),
            Self::Create => write!(f, "create"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// Why a call failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// No response: connection refused, reset, DNS failure
    Transport,
    /// The transport gave up waiting for a response
    Timeout,
    /// The backend answered with a failing status
    Business,
    /// The backend rejected the credential (401)
    Unauthorized,
    /// The response did not have the expected envelope or record shape
    Decode,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport => write!(f, "transport"),
            Self::Timeout => write!(f, "timeout"),
            Self::Business => write!(f, "business"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::Decode => write!(f, "decode"),
        }
    }
}

/// Structured error of a single backend call
///
/// `message` is what a view shows to the user and is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// The operation being performed
    pub operation: ApiOperation,
    /// The category of failure
    pub kind: ApiErrorKind,
    /// Human-readable message
    pub message: String,
    /// Resource path, e.g. `mountains`
    pub resource: Option<String>,
    /// Record the call targeted, for get/update/delete
    pub id: Option<RecordId>,
    /// HTTP or envelope status, when a response was received
    pub status: Option<u16>,
}

impl ApiError {
    /// Create a new error; an empty message is replaced by [`FALLBACK_MESSAGE`]
    pub fn new(operation: ApiOperation, kind: ApiErrorKind, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            operation,
            kind,
            message: preferred_message(Some(&message), None),
            resource: None,
            id: None,
            status: None,
        }
    }

    /// Create an error whose message prefers the backend's text, then the
    /// transport's, then [`FALLBACK_MESSAGE`]
    pub fn from_messages(
        operation: ApiOperation,
        kind: ApiErrorKind,
        backend: Option<&str>,
        transport: Option<&str>,
    ) -> Self {
        Self {
            operation,
            kind,
            message: preferred_message(backend, transport),
            resource: None,
            id: None,
            status: None,
        }
    }

    #[must_use]
    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<RecordId>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// The credential was rejected and the session has been cleared
    pub fn is_unauthorized(&self) -> bool {
        self.kind == ApiErrorKind::Unauthorized
    }

    /// Transient failures that may succeed if the user tries again
    pub fn is_retriable(&self) -> bool {
        matches!(self.kind, ApiErrorKind::Transport | ApiErrorKind::Timeout)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "API {} error during {}: {}",
            self.kind, self.operation, self.message
        )?;
        match (&self.resource, &self.id) {
            (Some(resource), Some(id)) => write!(f, " [{resource}: {id}]")?,
            (Some(resource), None) => write!(f, " [{resource}]")?,
            _ => {}
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

fn preferred_message(backend: Option<&str>, transport: Option<&str>) -> String {
    backend
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .or_else(|| transport.map(str::trim).filter(|m| !m.is_empty()))
        .unwrap_or(FALLBACK_MESSAGE)
        .to_string()
}
