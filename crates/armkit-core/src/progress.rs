//! Progress events for long-running operation waits
//!
//! A wait emits these so a CLI can drive a spinner while a library caller
//! ignores them entirely.

use crate::lro::OperationStatus;
use std::time::Duration;

/// Progress events emitted while waiting on an operation
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// Waiting has begun
    Started { operation: String },
    /// One poll round trip finished
    Polling {
        operation: String,
        status: OperationStatus,
        elapsed: Duration,
    },
    /// Operation reached `Succeeded`
    Completed { operation: String },
    /// Operation reached `Failed` or `Canceled`
    Failed { operation: String, error: String },
}

/// Callback type for progress updates
pub type ProgressCallback = Box<dyn Fn(ProgressEvent) + Send + Sync>;

/// Helper to emit progress events
pub(crate) fn emit(callback: &Option<ProgressCallback>, event: ProgressEvent) {
    if let Some(cb) = callback {
        cb(event);
    }
}
