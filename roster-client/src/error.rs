//! Client error types
//!
//! [`ClientError`] is what the transport and data sources return.
//! Controllers never hand it to their callers; they fold it into an
//! [`ErrorKind`] held in their own state.

use reqwest::StatusCode;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service could not be reached
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Any other error status from the service
    #[error("API error {status}: {message}")]
    Api { status: StatusCode, message: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Whether the failure happened below the application protocol
    /// (no usable response from the service at all).
    pub fn is_transport(&self) -> bool {
        match self {
            Self::Http(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            Self::Unavailable(_) => true,
            _ => false,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Error state a controller surfaces to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    FetchFailed,
    DeleteFailed,
    SaveFailed,
    ValidationFailed,
    NetworkUnavailable,
}

impl ErrorKind {
    /// Fold a remote failure into the kind for the operation that failed.
    ///
    /// Transport-level failures collapse into `NetworkUnavailable`.
    pub fn classify(err: &ClientError, operation: ErrorKind) -> Self {
        if err.is_transport() {
            Self::NetworkUnavailable
        } else {
            operation
        }
    }

    /// User-visible message; `label` names the record type
    pub fn message(&self, label: &str) -> String {
        match self {
            Self::FetchFailed => format!("Error fetching {label} data"),
            Self::DeleteFailed => format!("Error deleting {label}"),
            Self::SaveFailed => format!("Error saving {label}"),
            Self::ValidationFailed => "Please fill out all fields".to_string(),
            Self::NetworkUnavailable => "Network error or server is down".to_string(),
        }
    }
}
