use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a long-running operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationStatus {
    NotStarted,
    Running,
    Succeeded,
    Failed,
    Canceled,
}

impl OperationStatus {
    /// Map a service `status` string onto the lifecycle
    ///
    /// Matching is case-insensitive. Only known lifecycle values are
    /// recognized; anything else (a resource's own `status` field such as
    /// `Active`) is `None`, leaving the HTTP status to decide.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "succeeded" | "success" | "completed" => Some(OperationStatus::Succeeded),
            "failed" | "error" => Some(OperationStatus::Failed),
            "canceled" | "cancelled" => Some(OperationStatus::Canceled),
            "notstarted" | "not_started" => Some(OperationStatus::NotStarted),
            "inprogress" | "accepted" | "creating" | "updating" | "deleting" | "running" => {
                Some(OperationStatus::Running)
            }
            _ => None,
        }
    }

    /// Map a resource's `provisioningState` onto the lifecycle
    ///
    /// Resource providers define their own transitional states
    /// (`Provisioning`, `Initializing`, ...), so anything that is not
    /// terminal counts as running.
    pub fn from_provisioning_state(value: &str) -> Self {
        Self::parse(value).unwrap_or(OperationStatus::Running)
    }

    /// `Succeeded`, `Failed` and `Canceled` are final
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            OperationStatus::Succeeded | OperationStatus::Failed | OperationStatus::Canceled
        )
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationStatus::NotStarted => write!(f, "NotStarted"),
            OperationStatus::Running => write!(f, "Running"),
            OperationStatus::Succeeded => write!(f, "Succeeded"),
            OperationStatus::Failed => write!(f, "Failed"),
            OperationStatus::Canceled => write!(f, "Canceled"),
        }
    }
}
