//! Unified error handling for armkit-core
//!
//! Every failure the poller, the pager and the invoker can produce is a
//! [`CoreError`]. Helper methods classify errors the same way regardless of
//! where they came from.
//!
//! # Example
//!
//! ```rust
//! use armkit_core::CoreError;
//!
//! fn describe(err: &CoreError) -> &'static str {
//!     if err.is_not_found() {
//!         "gone"
//!     } else if err.is_retryable() {
//!         "transient"
//!     } else {
//!         "fatal"
//!     }
//! }
//!
//! let err = CoreError::Http {
//!     status: 404,
//!     error: None,
//!     body: String::new(),
//! };
//! assert!(err.is_not_found());
//! ```

use crate::http::RawResponse;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Boxed error used as the source of transport failures
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error payload returned by the service
///
/// Resource-management APIs wrap this in an `{"error": {...}}` envelope; some
/// data-plane and status-monitor responses return it bare.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<ErrorDetail>,
}

impl ErrorDetail {
    /// Extract an error payload from a response body, if there is one
    pub fn from_body(body: &[u8]) -> Option<Self> {
        #[derive(Deserialize)]
        struct Envelope {
            error: ErrorDetail,
        }

        if let Ok(envelope) = serde_json::from_slice::<Envelope>(body) {
            return Some(envelope.error);
        }
        serde_json::from_slice::<ErrorDetail>(body)
            .ok()
            .filter(|e| e.code.is_some() || e.message.is_some())
    }
}

/// Core error type
#[derive(Error, Debug)]
pub enum CoreError {
    /// A required parameter was missing or malformed; raised before any network call
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument { name: String, reason: String },

    /// The response that started an operation matches no known polling pattern
    #[error("Invalid initial response (HTTP {status}): {reason}")]
    InvalidInitialResponse { status: u16, reason: String },

    /// A response body did not have the documented shape
    #[error("Unexpected response shape: {0}")]
    UnexpectedResponseShape(String),

    /// The service could not be reached
    #[error("Transport error: {message}")]
    Transport {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// The service answered with a status the caller did not expect
    #[error("HTTP {status}: {}", summarize(.error, .body))]
    Http {
        status: u16,
        error: Option<ErrorDetail>,
        body: String,
    },

    /// The long-running operation reached a failed or canceled terminal state
    #[error("Operation failed (HTTP {status_code}): {}", summarize(.error, .body))]
    OperationFailed {
        status_code: u16,
        error: Option<ErrorDetail>,
        body: String,
    },

    /// The operation was still running when the wait deadline passed
    #[error("Operation did not complete within {0:?}")]
    WaitTimeout(Duration),

    /// A blocking entry point was called from inside an async runtime
    #[error("Blocking call made from within an async runtime; use the async API instead")]
    BlockingInAsyncContext,

    /// The blocking runtime could not be started
    #[error("Failed to start blocking runtime: {0}")]
    Runtime(#[source] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Result alias used throughout armkit-core
pub type Result<T> = std::result::Result<T, CoreError>;

fn summarize(error: &Option<ErrorDetail>, body: &str) -> String {
    match error {
        Some(ErrorDetail {
            code: Some(code),
            message: Some(message),
            ..
        }) => format!("{code}: {message}"),
        Some(ErrorDetail {
            message: Some(message),
            ..
        }) => message.clone(),
        Some(ErrorDetail {
            code: Some(code), ..
        }) => code.clone(),
        _ if body.is_empty() => "<empty body>".to_string(),
        _ => body.to_string(),
    }
}

impl CoreError {
    /// Build an `InvalidArgument` error
    pub fn invalid_argument(name: impl Into<String>, reason: impl Into<String>) -> Self {
        CoreError::InvalidArgument {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Wrap a transport-level failure
    pub fn transport<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        CoreError::Transport {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }

    /// Build an `Http` error from an unexpected response
    pub fn from_response(response: &RawResponse) -> Self {
        CoreError::Http {
            status: response.status(),
            error: ErrorDetail::from_body(response.body()),
            body: response.text(),
        }
    }

    /// Build an `OperationFailed` error from the response that reported the failure
    pub fn operation_failed(response: &RawResponse) -> Self {
        CoreError::OperationFailed {
            status_code: response.status(),
            error: ErrorDetail::from_body(response.body()),
            body: response.text(),
        }
    }

    /// HTTP status carried by this error, if any
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            CoreError::Http { status, .. } => Some(*status),
            CoreError::OperationFailed { status_code, .. } => Some(*status_code),
            CoreError::InvalidInitialResponse { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Service error payload carried by this error, if any
    #[must_use]
    pub fn error_detail(&self) -> Option<&ErrorDetail> {
        match self {
            CoreError::Http { error, .. } | CoreError::OperationFailed { error, .. } => {
                error.as_ref()
            }
            _ => None,
        }
    }

    /// HTTP 404
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, CoreError::Http { status: 404, .. })
    }

    /// HTTP 401 or 403
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, CoreError::Http { status: 401 | 403, .. })
    }

    /// Any 5xx status
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, CoreError::Http { status, .. } if (500..600).contains(status))
    }

    /// HTTP 408 or an exhausted wait deadline
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            CoreError::WaitTimeout(_) | CoreError::Http { status: 408, .. }
        )
    }

    /// HTTP 429
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, CoreError::Http { status: 429, .. })
    }

    /// HTTP 409 or 412
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, CoreError::Http { status: 409 | 412, .. })
    }

    /// HTTP 400, or an argument rejected before sending
    #[must_use]
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            CoreError::Http { status: 400, .. } | CoreError::InvalidArgument { .. }
        )
    }

    /// Returns true if an outer retry policy could reasonably try again
    ///
    /// Nothing in this crate acts on it.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            CoreError::Transport { .. } => true,
            CoreError::Http { status, .. } => {
                matches!(status, 408 | 429) || (500..600).contains(status)
            }
            CoreError::WaitTimeout(_) => true,
            _ => false,
        }
    }
}
